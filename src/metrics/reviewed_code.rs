use crate::metrics::{Metric, MetricKind, MetricOutcome};
use crate::source::{Fetched, RepositorySource};
use futures::future::join_all;

/// Fraction of merged pull requests that received at least one review
/// before landing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewedCode;

impl Metric for ReviewedCode {
    fn kind(&self) -> MetricKind {
        MetricKind::ReviewedCode
    }

    #[expect(clippy::cast_precision_loss, reason = "pull request counts are far below 2^52")]
    async fn compute<S: RepositorySource>(&self, source: &S) -> MetricOutcome {
        let merged = match source.list_merged_pulls().await {
            Fetched::Found(pulls) => pulls,
            Fetched::Missing => return MetricOutcome::Scored(0.0),
            Fetched::Unavailable(_) => return MetricOutcome::Unavailable,
        };

        if merged.is_empty() {
            return MetricOutcome::Scored(0.0);
        }

        let lookups = merged.iter().map(|pull| source.list_pull_reviews(pull.number));
        let reviewed = join_all(lookups)
            .await
            .into_iter()
            .filter(|reviews| reviews.as_found().is_some_and(|found| !found.is_empty()))
            .count();

        MetricOutcome::Scored(reviewed as f64 / merged.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{PullRecord, ReviewRecord};
    use crate::source::test_source::StaticSource;
    use chrono::Utc;
    use std::sync::Arc;

    fn merged_pull(number: u64) -> PullRecord {
        PullRecord {
            number,
            merged_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn test_no_merged_pulls_scores_zero() {
        let source = StaticSource::default();

        let outcome = ReviewedCode.compute(&source).await;

        assert_eq!(outcome, MetricOutcome::Scored(0.0));
    }

    #[tokio::test]
    async fn test_missing_pull_list_scores_zero() {
        let mut source = StaticSource::default();
        source.merged_pulls = Fetched::Missing;

        let outcome = ReviewedCode.compute(&source).await;

        assert_eq!(outcome, MetricOutcome::Scored(0.0));
    }

    #[tokio::test]
    async fn test_unreachable_pull_list_is_unavailable() {
        let mut source = StaticSource::default();
        source.merged_pulls = Fetched::Unavailable(Arc::new(ohno::app_err!("boom")));

        let outcome = ReviewedCode.compute(&source).await;

        assert_eq!(outcome, MetricOutcome::Unavailable);
    }

    #[tokio::test]
    async fn test_reviewed_fraction() {
        let mut source = StaticSource::default();
        source.merged_pulls = Fetched::Found((1..=5).map(merged_pull).collect());
        for number in 1..=3 {
            let _ = source.reviews.insert(number, vec![ReviewRecord { id: number * 7 }]);
        }

        let outcome = ReviewedCode.compute(&source).await;

        let MetricOutcome::Scored(score) = outcome else {
            panic!("expected a scored outcome");
        };
        assert!((score - 0.6).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_unfetchable_reviews_count_as_unreviewed() {
        let mut source = StaticSource::default();
        source.merged_pulls = Fetched::Found(vec![merged_pull(1), merged_pull(2)]);
        let _ = source.reviews.insert(1, vec![ReviewRecord { id: 11 }]);

        let outcome = ReviewedCode.compute(&source).await;

        assert_eq!(outcome, MetricOutcome::Scored(0.5));
    }
}
