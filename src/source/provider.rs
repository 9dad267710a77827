use crate::Result;
use crate::source::RepositorySource;
use crate::source::fetched::Fetched;
use crate::source::npm::{PackageDoc, RegistryClient};
use crate::source::records::{
    CommentRecord, CommitRecord, ContentPayload, ContributorRecord, DependencyManifest, IssueRecord, PullRecord,
    RepoMetadata, ReviewRecord, SearchCount,
};
use crate::source::repo_ref::{RepoRef, SourceOrigin, UrlKind};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use core::time::Duration;
use octocrab::Octocrab;
use ohno::{EnrichableExt, IntoAppError};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

const LOG_TARGET: &str = "    source";

const ISSUE_PAGE_SIZE: u8 = 50;
const PULL_PAGE_SIZE: u8 = 100;
const CONTRIBUTOR_PAGE_SIZE: u8 = 100;

/// GitHub- or npm-backed implementation of [`RepositorySource`].
///
/// One instance is resolved per score request and discarded once the report
/// is produced, so every request sees current repository state.
#[derive(Debug, Clone)]
pub struct Provider {
    octocrab: Octocrab,
    repo_ref: RepoRef,
    registry_doc: Option<PackageDoc>,
    github_backed: bool,
}

impl Provider {
    /// Resolve an input URL to a scoreable repository.
    ///
    /// GitHub remotes resolve directly. npm package pages resolve through the
    /// registry's `repository.url` metadata; packages that do not declare a
    /// GitHub repository stay registry-backed, and every GitHub accessor then
    /// reports its facts as missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be mapped to a known host format or
    /// if the named npm package does not exist.
    pub async fn resolve(
        input: &str,
        token: Option<&str>,
        timeout: Duration,
        github_base: &Url,
        registry_base: &Url,
    ) -> Result<Self> {
        let octocrab = build_octocrab(token, github_base, timeout)?;

        match UrlKind::parse(input)? {
            UrlKind::GitHub { owner, repo, canonical } => {
                log::info!(target: LOG_TARGET, "Scoring repository '{canonical}'");

                Ok(Self {
                    octocrab,
                    repo_ref: RepoRef::new(owner, repo, canonical, SourceOrigin::GitHost),
                    registry_doc: None,
                    github_backed: true,
                })
            }
            UrlKind::NpmPackage { name, version } => {
                let registry = RegistryClient::new(registry_base.as_str().trim_end_matches('/'), timeout)?;
                let doc = registry.package_version(&name, version.as_ref()).await?;

                if let Some(repo_url) = doc.repository_url()
                    && let Ok(UrlKind::GitHub { owner, repo, canonical }) = UrlKind::parse(repo_url)
                {
                    log::info!(target: LOG_TARGET, "Resolved npm package '{name}' to repository '{canonical}'");

                    return Ok(Self {
                        octocrab,
                        repo_ref: RepoRef::new(owner, repo, canonical, SourceOrigin::PackageRegistry),
                        registry_doc: Some(doc),
                        github_backed: true,
                    });
                }

                log::info!(target: LOG_TARGET, "npm package '{name}' does not declare a GitHub repository; host facts will be reported as missing");

                let page = Url::parse(&format!("https://www.npmjs.com/package/{name}"))
                    .into_app_err("reconstructing npm package page URL")?;
                let (owner, repo) = split_package_name(&name);

                Ok(Self {
                    octocrab,
                    repo_ref: RepoRef::new(owner, repo, Arc::new(page), SourceOrigin::PackageRegistry),
                    registry_doc: Some(doc),
                    github_backed: false,
                })
            }
        }
    }

    /// Fetch a typed payload from a GitHub REST route, classifying the outcome.
    ///
    /// A 404 means the item does not exist and is not an error. Everything
    /// else that fails is reported as unavailable so metrics can distinguish
    /// "absent" from "could not be measured".
    async fn fetch<T: DeserializeOwned>(&self, route: String, what: &str) -> Fetched<T> {
        if !self.github_backed {
            return Fetched::Missing;
        }

        log::debug!(target: LOG_TARGET, "Fetching {what} for '{}'", self.repo_ref);

        match self.get_json(&route).await {
            Ok(data) => Fetched::Found(data),
            Err(e) => {
                if let Some(octocrab::Error::GitHub { source, .. }) = e.source().and_then(|e| e.downcast_ref::<octocrab::Error>())
                    && source.status_code.as_u16() == 404
                {
                    log::debug!(target: LOG_TARGET, "No {what} found (404) for '{}'", self.repo_ref);
                    return Fetched::Missing;
                }

                log::info!(target: LOG_TARGET, "Failed to fetch {what} for '{}': {e:#}", self.repo_ref);
                Fetched::Unavailable(Arc::new(
                    e.enrich_with(|| format!("could not fetch {what} for repository '{}'", self.repo_ref)),
                ))
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, route: &str) -> Result<T> {
        Ok(self.octocrab.get::<T, _, ()>(route, None::<&()>).await?)
    }

    /// Fetch and decode a file through the contents API.
    async fn decoded_contents(&self, route: String, what: &str) -> Fetched<String> {
        match self.fetch::<ContentPayload>(route, what).await {
            Fetched::Found(payload) => match decode_content(&payload) {
                Ok(text) => Fetched::Found(text),
                Err(e) => {
                    log::info!(target: LOG_TARGET, "Could not decode {what} for '{}': {e:#}", self.repo_ref);
                    Fetched::Unavailable(Arc::new(e))
                }
            },
            Fetched::Missing => Fetched::Missing,
            Fetched::Unavailable(e) => Fetched::Unavailable(e),
        }
    }

    fn repo_route(&self, suffix: &str) -> String {
        format!("/repos/{}/{}{suffix}", self.repo_ref.owner(), self.repo_ref.repo())
    }
}

impl RepositorySource for Provider {
    fn repo_ref(&self) -> &RepoRef {
        &self.repo_ref
    }

    async fn metadata(&self) -> Fetched<RepoMetadata> {
        self.fetch(self.repo_route(""), "repository metadata").await
    }

    async fn file_exists(&self, path: &str) -> bool {
        // Any successful contents response counts, whether file or directory.
        self.fetch::<serde_json::Value>(self.repo_route(&format!("/contents/{path}")), "contents probe")
            .await
            .is_found()
    }

    async fn directory_exists(&self, path: &str) -> bool {
        self.file_exists(path).await
    }

    async fn file_contents(&self, path: &str) -> Fetched<String> {
        self.decoded_contents(self.repo_route(&format!("/contents/{path}")), "file contents").await
    }

    async fn readme(&self) -> Fetched<String> {
        self.decoded_contents(self.repo_route("/readme"), "readme").await
    }

    async fn list_issues(&self) -> Fetched<Vec<IssueRecord>> {
        self.fetch(
            self.repo_route(&format!("/issues?state=all&per_page={ISSUE_PAGE_SIZE}")),
            "issues",
        )
        .await
    }

    async fn list_issue_comments(&self, issue_number: u64) -> Fetched<Vec<CommentRecord>> {
        // Oldest comment first; only the first one matters for response time.
        self.fetch(
            self.repo_route(&format!("/issues/{issue_number}/comments?per_page=1")),
            "issue comments",
        )
        .await
    }

    async fn closed_issue_count(&self) -> Fetched<u64> {
        let route = format!(
            "/search/issues?q=repo:{}/{}+type:issue+state:closed&per_page=1",
            self.repo_ref.owner(),
            self.repo_ref.repo()
        );

        self.fetch::<SearchCount>(route, "closed issue count").await.map(|c| c.total_count)
    }

    async fn list_merged_pulls(&self) -> Fetched<Vec<PullRecord>> {
        self.fetch::<Vec<PullRecord>>(
            self.repo_route(&format!("/pulls?state=closed&per_page={PULL_PAGE_SIZE}")),
            "pull requests",
        )
        .await
        .map(|pulls| pulls.into_iter().filter(|p| p.merged_at.is_some()).collect())
    }

    async fn list_pull_reviews(&self, pull_number: u64) -> Fetched<Vec<ReviewRecord>> {
        self.fetch(
            self.repo_route(&format!("/pulls/{pull_number}/reviews?per_page=1")),
            "pull request reviews",
        )
        .await
    }

    async fn contributors(&self) -> Fetched<Vec<ContributorRecord>> {
        // Registry-only packages have no contributor endpoint; the people
        // listed in the package document stand in, one contribution each.
        if !self.github_backed {
            return match &self.registry_doc {
                Some(doc) => Fetched::Found(doc.contributor_records()),
                None => Fetched::Missing,
            };
        }

        self.fetch(
            self.repo_route(&format!("/contributors?per_page={CONTRIBUTOR_PAGE_SIZE}")),
            "contributors",
        )
        .await
    }

    async fn last_commit_at(&self) -> Fetched<Option<DateTime<Utc>>> {
        self.fetch::<Vec<CommitRecord>>(self.repo_route("/commits?per_page=1"), "latest commit")
            .await
            .map(|commits| commits.first().and_then(|c| c.commit.committer.as_ref()).and_then(|a| a.date))
    }

    async fn dependency_manifest(&self) -> Fetched<DependencyManifest> {
        if self.github_backed {
            return match self.file_contents("package.json").await {
                Fetched::Found(text) => {
                    let parsed = serde_json::from_str::<DependencyManifest>(&text)
                        .into_app_err_with(|| format!("malformed package.json in repository '{}'", self.repo_ref));

                    match parsed {
                        Ok(manifest) => Fetched::Found(manifest),
                        Err(e) => {
                            log::info!(target: LOG_TARGET, "Could not parse package.json for '{}': {e:#}", self.repo_ref);
                            Fetched::Unavailable(Arc::new(e))
                        }
                    }
                }
                Fetched::Missing => Fetched::Missing,
                Fetched::Unavailable(e) => Fetched::Unavailable(e),
            };
        }

        match &self.registry_doc {
            Some(doc) => Fetched::Found(doc.manifest.clone()),
            None => Fetched::Missing,
        }
    }
}

fn build_octocrab(token: Option<&str>, github_base: &Url, timeout: Duration) -> Result<Octocrab> {
    let mut builder = Octocrab::builder()
        .base_uri(github_base.as_str())?
        .set_connect_timeout(Some(timeout))
        .set_read_timeout(Some(timeout));

    if let Some(t) = token {
        builder = builder.personal_token(t);
    }

    Ok(builder.build()?)
}

/// Decode a contents API payload into text.
fn decode_content(payload: &ContentPayload) -> Result<String> {
    let raw = payload.content.as_deref().unwrap_or_default();

    if payload.encoding.as_deref() != Some("base64") {
        return Ok(raw.to_string());
    }

    // GitHub inserts line breaks into the base64 body.
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(cleaned).into_app_err("decoding base64 content payload")?;

    String::from_utf8(bytes).into_app_err("content payload is not valid UTF-8")
}

/// Split an npm package name into display (owner, repo) parts.
fn split_package_name(name: &str) -> (Arc<str>, Arc<str>) {
    match name.split_once('/') {
        Some((scope, pkg)) => (Arc::from(scope), Arc::from(pkg)),
        None => (Arc::from(name), Arc::from(name)),
    }
}
