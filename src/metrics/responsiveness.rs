use crate::metrics::numeric::hours_between;
use crate::metrics::{Metric, MetricKind, MetricOutcome};
use crate::source::{Fetched, IssueRecord, RepositorySource};

const RESPONSE_WINDOW_HOURS: f64 = 7.0 * 24.0;
const PR_CLOSE_WINDOW_HOURS: f64 = 15.0 * 24.0;

/// Comment lookups stop once this many issues have been sampled, so one
/// rating cannot burn through the API quota of a busy repository.
const MAX_SAMPLED_ISSUES: usize = 100;

/// Measures how promptly maintainers engage with incoming issues and
/// pull requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Responsiveness;

impl Metric for Responsiveness {
    fn kind(&self) -> MetricKind {
        MetricKind::Responsiveness
    }

    #[expect(clippy::cast_precision_loss, reason = "issue counts are far below 2^52")]
    async fn compute<S: RepositorySource>(&self, source: &S) -> MetricOutcome {
        let issues = match source.list_issues().await {
            Fetched::Found(issues) => issues,
            Fetched::Missing => return MetricOutcome::Scored(1.0),
            Fetched::Unavailable(_) => return MetricOutcome::Unavailable,
        };

        if issues.is_empty() {
            return MetricOutcome::Scored(1.0);
        }

        let mut penalty_sum = 0.0;
        let mut sampled = 0;
        for issue in &issues {
            if !issue.is_pull_request() {
                sampled += 1;
            }

            penalty_sum += issue_penalty(source, issue).await;

            if sampled >= MAX_SAMPLED_ISSUES {
                break;
            }
        }

        MetricOutcome::Scored(1.0 - penalty_sum / issues.len() as f64)
    }
}

/// Penalty in [0, 1] for how long an entry sat before getting attention.
///
/// The first comment is the preferred signal. Entries that were closed
/// without discussion are judged on time-to-close instead, with a longer
/// grace window for pull requests. Never-touched open entries take the
/// full penalty.
async fn issue_penalty<S: RepositorySource>(source: &S, issue: &IssueRecord) -> f64 {
    let comments = source.list_issue_comments(issue.number).await.found().unwrap_or_default();

    if let Some(first) = comments.first() {
        return (hours_between(issue.created_at, first.created_at) / RESPONSE_WINDOW_HOURS).min(1.0);
    }

    if let Some(closed_at) = issue.closed_at {
        let window = if issue.is_pull_request() {
            PR_CLOSE_WINDOW_HOURS
        } else {
            RESPONSE_WINDOW_HOURS
        };

        return (hours_between(issue.created_at, closed_at) / window).min(1.0);
    }

    1.0
}
