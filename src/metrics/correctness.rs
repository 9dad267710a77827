use crate::metrics::numeric::{days_since, indicator};
use crate::metrics::{Metric, MetricKind, MetricOutcome};
use crate::source::{Fetched, RepositorySource};
use chrono::Utc;

const TEST_DIRS: [&str; 2] = ["test", "tests"];
const CI_FILES: [&str; 3] = [".travis.yml", ".circleci/config.yml", "Jenkinsfile"];
const CI_DIRS: [&str; 1] = [".github/workflows"];
const DOC_FILES: [&str; 2] = ["README.md", "README"];
const LINTER_FILES: [&str; 4] = [".eslintrc", ".eslintrc.js", ".eslint.json", ".tslint.json"];

const TEST_WEIGHT: f64 = 0.25;
const ISSUE_WEIGHT: f64 = 0.20;
const RECENCY_WEIGHT: f64 = 0.20;
const CI_WEIGHT: f64 = 0.15;
const DOC_WEIGHT: f64 = 0.10;
const LINTER_WEIGHT: f64 = 0.10;

const RECENCY_WINDOW_DAYS: f64 = 365.0;

/// Weighted blend of engineering-hygiene signals.
///
/// Each factor soft-fails to zero on its own, so the metric always yields a
/// genuine score even when some facts cannot be fetched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Correctness;

impl Metric for Correctness {
    fn kind(&self) -> MetricKind {
        MetricKind::Correctness
    }

    async fn compute<S: RepositorySource>(&self, source: &S) -> MetricOutcome {
        let tests = any_directory_exists(source, &TEST_DIRS).await;
        let issue_health = 1.0 - open_issue_ratio(source).await;
        let recency = recency_score(source).await;
        let ci = any_file_exists(source, &CI_FILES).await || any_directory_exists(source, &CI_DIRS).await;
        let docs = any_file_exists(source, &DOC_FILES).await;
        let linters = any_file_exists(source, &LINTER_FILES).await;

        let score = TEST_WEIGHT * indicator(tests)
            + ISSUE_WEIGHT * issue_health
            + RECENCY_WEIGHT * recency
            + CI_WEIGHT * indicator(ci)
            + DOC_WEIGHT * indicator(docs)
            + LINTER_WEIGHT * indicator(linters);

        MetricOutcome::Scored(score)
    }
}

/// Share of this repository's issues that are still open.
/// A repository with no issues at all is not penalized.
#[expect(clippy::cast_precision_loss, reason = "issue counts are far below 2^52")]
async fn open_issue_ratio<S: RepositorySource>(source: &S) -> f64 {
    let open = source.metadata().await.found().map_or(0, |m| m.open_issues_count);
    let closed = source.closed_issue_count().await.found().unwrap_or(0);

    let total = open + closed;
    if total == 0 {
        return 0.0;
    }

    open as f64 / total as f64
}

/// Linear decay from 1 to 0 over a year since the last commit.
async fn recency_score<S: RepositorySource>(source: &S) -> f64 {
    match source.last_commit_at().await {
        Fetched::Found(Some(date)) => {
            let days = days_since(date, Utc::now());
            ((RECENCY_WINDOW_DAYS - days) / RECENCY_WINDOW_DAYS).clamp(0.0, 1.0)
        }
        _ => 0.0,
    }
}

async fn any_file_exists<S: RepositorySource>(source: &S, paths: &[&str]) -> bool {
    for path in paths {
        if source.file_exists(path).await {
            return true;
        }
    }

    false
}

async fn any_directory_exists<S: RepositorySource>(source: &S, paths: &[&str]) -> bool {
    for path in paths {
        if source.directory_exists(path).await {
            return true;
        }
    }

    false
}
