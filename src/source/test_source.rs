//! In-memory repository snapshot for exercising metrics without a network.

use crate::source::fetched::Fetched;
use crate::source::records::{
    CommentRecord, ContributorRecord, DependencyManifest, IssueRecord, PullRecord, RepoMetadata, ReviewRecord,
};
use crate::source::repo_ref::{RepoRef, SourceOrigin};
use crate::source::RepositorySource;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use url::Url;

/// Fixed repository state served verbatim to every accessor.
#[derive(Debug, Clone)]
pub struct StaticSource {
    pub repo_ref: RepoRef,
    pub metadata: Fetched<RepoMetadata>,
    pub files: BTreeSet<String>,
    pub dirs: BTreeSet<String>,
    pub contents: BTreeMap<String, String>,
    pub readme: Fetched<String>,
    pub issues: Fetched<Vec<IssueRecord>>,
    pub comments: BTreeMap<u64, Vec<CommentRecord>>,
    pub closed_issues: Fetched<u64>,
    pub merged_pulls: Fetched<Vec<PullRecord>>,
    pub reviews: BTreeMap<u64, Vec<ReviewRecord>>,
    pub contributors: Fetched<Vec<ContributorRecord>>,
    pub last_commit: Fetched<Option<DateTime<Utc>>>,
    pub manifest: Fetched<DependencyManifest>,
}

impl Default for StaticSource {
    fn default() -> Self {
        let url = Url::parse("https://github.com/acme/widget").unwrap();

        Self {
            repo_ref: RepoRef::new(Arc::from("acme"), Arc::from("widget"), Arc::new(url), SourceOrigin::GitHost),
            metadata: Fetched::Missing,
            files: BTreeSet::new(),
            dirs: BTreeSet::new(),
            contents: BTreeMap::new(),
            readme: Fetched::Missing,
            issues: Fetched::Found(Vec::new()),
            comments: BTreeMap::new(),
            closed_issues: Fetched::Found(0),
            merged_pulls: Fetched::Found(Vec::new()),
            reviews: BTreeMap::new(),
            contributors: Fetched::Found(Vec::new()),
            last_commit: Fetched::Found(None),
            manifest: Fetched::Missing,
        }
    }
}

impl RepositorySource for StaticSource {
    fn repo_ref(&self) -> &RepoRef {
        &self.repo_ref
    }

    async fn metadata(&self) -> Fetched<RepoMetadata> {
        self.metadata.clone()
    }

    async fn file_exists(&self, path: &str) -> bool {
        self.files.contains(path) || self.dirs.contains(path)
    }

    async fn directory_exists(&self, path: &str) -> bool {
        self.dirs.contains(path) || self.files.contains(path)
    }

    async fn file_contents(&self, path: &str) -> Fetched<String> {
        match self.contents.get(path) {
            Some(text) => Fetched::Found(text.clone()),
            None => Fetched::Missing,
        }
    }

    async fn readme(&self) -> Fetched<String> {
        self.readme.clone()
    }

    async fn list_issues(&self) -> Fetched<Vec<IssueRecord>> {
        self.issues.clone()
    }

    async fn list_issue_comments(&self, issue_number: u64) -> Fetched<Vec<CommentRecord>> {
        Fetched::Found(self.comments.get(&issue_number).cloned().unwrap_or_default())
    }

    async fn closed_issue_count(&self) -> Fetched<u64> {
        self.closed_issues.clone()
    }

    async fn list_merged_pulls(&self) -> Fetched<Vec<PullRecord>> {
        self.merged_pulls.clone()
    }

    async fn list_pull_reviews(&self, pull_number: u64) -> Fetched<Vec<ReviewRecord>> {
        Fetched::Found(self.reviews.get(&pull_number).cloned().unwrap_or_default())
    }

    async fn contributors(&self) -> Fetched<Vec<ContributorRecord>> {
        self.contributors.clone()
    }

    async fn last_commit_at(&self) -> Fetched<Option<DateTime<Utc>>> {
        self.last_commit.clone()
    }

    async fn dependency_manifest(&self) -> Fetched<DependencyManifest> {
        self.manifest.clone()
    }
}
