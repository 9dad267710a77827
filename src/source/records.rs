//! Wire shapes for the GitHub REST API and the npm registry API.
//!
//! Each struct carries only the fields the metrics actually read. Missing
//! numeric and boolean fields deserialize to their zero values, matching how
//! the hosts omit fields on older or sparse repositories.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Repository metadata from `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoMetadata {
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub watchers_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde(default)]
    pub has_wiki: bool,
    #[serde(default)]
    pub has_pages: bool,
    #[serde(default)]
    pub has_discussions: bool,
    #[serde(default)]
    pub license: Option<LicenseInfo>,
}

/// Structured license field inside repository metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct LicenseInfo {
    pub key: Option<String>,
}

/// Minimal issue info from the issues listing endpoint.
///
/// The listing mixes issues and pull requests; the `pull_request` marker is
/// present only on entries that are pull requests.
#[derive(Debug, Clone, Deserialize)]
pub struct IssueRecord {
    pub number: u64,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub pull_request: Option<PullRequestMarker>,
}

impl IssueRecord {
    /// Returns `true` if this listing entry is actually a pull request.
    #[must_use]
    pub const fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Marker type to detect if an issue is actually a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestMarker {
    pub merged_at: Option<DateTime<Utc>>,
}

/// Minimal issue comment info.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentRecord {
    pub created_at: DateTime<Utc>,
}

/// Minimal pull request info from the pulls listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRecord {
    pub number: u64,
    pub merged_at: Option<DateTime<Utc>>,
}

/// Minimal pull request review info.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRecord {
    pub id: u64,
}

/// Contributor info from the contributors endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributorRecord {
    pub login: Option<String>,
    #[serde(default)]
    pub contributions: u64,
}

/// Minimal commit info from the commits listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRecord {
    pub commit: CommitDetail,
}

/// Nested commit detail carrying the committer timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub committer: Option<GitActor>,
}

/// Author/committer signature inside a commit.
#[derive(Debug, Clone, Deserialize)]
pub struct GitActor {
    pub date: Option<DateTime<Utc>>,
}

/// Count-only slice of a search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchCount {
    #[serde(default)]
    pub total_count: u64,
}

/// File payload from the contents and readme endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentPayload {
    pub content: Option<String>,
    pub encoding: Option<String>,
}

/// Dependency tables from a `package.json` manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependencyManifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(rename = "devDependencies", default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl DependencyManifest {
    /// Merges direct and development dependencies into one specifier table.
    /// A name present in both tables takes its development specifier.
    #[must_use]
    pub fn merged_specifiers(&self) -> BTreeMap<String, String> {
        let mut merged = self.dependencies.clone();
        merged.extend(self.dev_dependencies.clone());
        merged
    }
}
