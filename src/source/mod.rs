//! Repository fact gathering
//!
//! This module is responsible for turning an input URL into a stream of
//! repository facts the metrics can score. Input URLs name either a GitHub
//! repository (in web, `git+https`, `git+ssh`, or `ssh` remote form) or an
//! npm package page, which resolves to its GitHub repository through the
//! registry's `repository.url` metadata.
//!
//! # Implementation Model
//!
//! The core abstraction is [`RepositorySource`], a capability interface over
//! a single code host. [`Provider`] is the production implementation, backed
//! by the GitHub REST API and the npm registry JSON API.
//!
//! Every accessor returns a [`Fetched`] value distinguishing three outcomes:
//! data that exists, data the host says does not exist, and data that could
//! not be retrieved at all. Metrics rely on that distinction to separate a
//! genuinely poor score from an unmeasurable one. Only URL resolution itself
//! fails hard; once a source is resolved, accessor failures never propagate.

mod fetched;
mod npm;
mod provider;
mod records;
mod repo_ref;

#[cfg(test)]
pub mod test_source;

pub use fetched::Fetched;
pub use npm::{PackageDoc, RegistryClient, RegistryPerson, RepositoryField};
pub use provider::Provider;
pub use records::{
    CommentRecord, CommitDetail, CommitRecord, ContentPayload, ContributorRecord, DependencyManifest, GitActor,
    IssueRecord, LicenseInfo, PullRecord, PullRequestMarker, RepoMetadata, ReviewRecord, SearchCount,
};
pub use repo_ref::{RepoRef, SourceOrigin, UrlKind};

use chrono::{DateTime, Utc};
use core::future::Future;

/// Capability interface over a single code host.
///
/// Accessors fail soft: a missing item or an unreachable host surfaces
/// through the returned [`Fetched`] value, never as an error. The two
/// existence probes collapse further, reporting plain `false` when the
/// answer cannot be determined.
pub trait RepositorySource: Send + Sync {
    /// Identity of the repository this source reads from.
    fn repo_ref(&self) -> &RepoRef;

    /// Repository-level metadata: popularity counts, feature flags, license.
    fn metadata(&self) -> impl Future<Output = Fetched<RepoMetadata>> + Send;

    /// Whether a file exists at the given path.
    fn file_exists(&self, path: &str) -> impl Future<Output = bool> + Send;

    /// Whether a directory exists at the given path.
    fn directory_exists(&self, path: &str) -> impl Future<Output = bool> + Send;

    /// Decoded text of the file at the given path.
    fn file_contents(&self, path: &str) -> impl Future<Output = Fetched<String>> + Send;

    /// Decoded text of the repository's README.
    fn readme(&self) -> impl Future<Output = Fetched<String>> + Send;

    /// Most recent issues and pull requests, newest first, one page deep.
    fn list_issues(&self) -> impl Future<Output = Fetched<Vec<IssueRecord>>> + Send;

    /// Oldest comment on an issue, if any.
    fn list_issue_comments(&self, issue_number: u64) -> impl Future<Output = Fetched<Vec<CommentRecord>>> + Send;

    /// Total number of closed issues, excluding pull requests.
    fn closed_issue_count(&self) -> impl Future<Output = Fetched<u64>> + Send;

    /// Recently closed pull requests that were merged.
    fn list_merged_pulls(&self) -> impl Future<Output = Fetched<Vec<PullRecord>>> + Send;

    /// Reviews recorded against a pull request.
    fn list_pull_reviews(&self, pull_number: u64) -> impl Future<Output = Fetched<Vec<ReviewRecord>>> + Send;

    /// Contributors ranked by contribution count.
    fn contributors(&self) -> impl Future<Output = Fetched<Vec<ContributorRecord>>> + Send;

    /// Committer timestamp of the most recent commit.
    fn last_commit_at(&self) -> impl Future<Output = Fetched<Option<DateTime<Utc>>>> + Send;

    /// Parsed dependency tables from the package manifest.
    fn dependency_manifest(&self) -> impl Future<Output = Fetched<DependencyManifest>> + Send;
}
