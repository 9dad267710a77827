use crate::metrics::numeric::{indicator, log_normalize};
use crate::metrics::{Metric, MetricKind, MetricOutcome};
use crate::source::{Fetched, RepositorySource};

const STAR_WEIGHT: f64 = 0.10;
const FORK_WEIGHT: f64 = 0.10;
const OPEN_ISSUE_WEIGHT: f64 = 0.15;
const WATCHER_WEIGHT: f64 = 0.05;
const WIKI_WEIGHT: f64 = 0.15;
const PAGES_WEIGHT: f64 = 0.10;
const DISCUSSIONS_WEIGHT: f64 = 0.10;
const README_WEIGHT: f64 = 0.25;

const STAR_SCALE: f64 = 10_000.0;
const FORK_SCALE: f64 = 10_000.0;
const OPEN_ISSUE_SCALE: f64 = 1_000.0;
const WATCHER_SCALE: f64 = 3_000.0;
const README_LINE_SCALE: f64 = 400.0;

/// Estimates how quickly a newcomer can get productive with the package,
/// from popularity signals, hosted documentation surfaces, and the size of
/// the readme.
#[derive(Debug, Clone, Copy, Default)]
pub struct RampUp;

impl Metric for RampUp {
    #[expect(clippy::cast_precision_loss, reason = "repository counters are far below 2^52")]
    async fn compute<S: RepositorySource>(&self, source: &S) -> MetricOutcome {
        let meta = match source.metadata().await {
            Fetched::Found(meta) => meta,
            Fetched::Missing => return MetricOutcome::Scored(0.0),
            Fetched::Unavailable(_) => return MetricOutcome::Unavailable,
        };

        let readme_lines = readme_line_count(source).await;

        let score = STAR_WEIGHT * log_normalize(meta.stargazers_count as f64, STAR_SCALE)
            + FORK_WEIGHT * log_normalize(meta.forks_count as f64, FORK_SCALE)
            + OPEN_ISSUE_WEIGHT * (1.0 - log_normalize(meta.open_issues_count as f64, OPEN_ISSUE_SCALE))
            + WATCHER_WEIGHT * log_normalize(meta.watchers_count as f64, WATCHER_SCALE)
            + WIKI_WEIGHT * indicator(meta.has_wiki)
            + PAGES_WEIGHT * indicator(meta.has_pages)
            + DISCUSSIONS_WEIGHT * indicator(meta.has_discussions)
            + README_WEIGHT * log_normalize(readme_lines, README_LINE_SCALE);

        MetricOutcome::Scored(score)
    }

    fn kind(&self) -> MetricKind {
        MetricKind::RampUp
    }
}

/// Number of lines in the repository readme, zero when there is none.
#[expect(clippy::cast_precision_loss, reason = "readme line counts are far below 2^52")]
async fn readme_line_count<S: RepositorySource>(source: &S) -> f64 {
    match source.readme().await {
        Fetched::Found(text) if !text.is_empty() => text.split('\n').count() as f64,
        _ => 0.0,
    }
}
