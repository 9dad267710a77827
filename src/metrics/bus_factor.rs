use crate::metrics::{Metric, MetricKind, MetricOutcome};
use crate::source::{Fetched, RepositorySource};

/// How concentrated the project's commit activity is in its single busiest
/// contributor. A score of zero means one person carries the project.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusFactor;

impl Metric for BusFactor {
    fn kind(&self) -> MetricKind {
        MetricKind::BusFactor
    }

    #[expect(clippy::cast_precision_loss, reason = "contribution counts are far below 2^52")]
    async fn compute<S: RepositorySource>(&self, source: &S) -> MetricOutcome {
        let contributors = match source.contributors().await {
            Fetched::Found(contributors) => contributors,
            Fetched::Missing => return MetricOutcome::Scored(0.0),
            Fetched::Unavailable(_) => return MetricOutcome::Unavailable,
        };

        let total: u64 = contributors.iter().map(|c| c.contributions).sum();
        let top = contributors.iter().map(|c| c.contributions).max().unwrap_or(0);
        if total == 0 {
            return MetricOutcome::Scored(0.0);
        }

        MetricOutcome::Scored(1.0 - top as f64 / total as f64)
    }
}
