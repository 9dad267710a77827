use crate::metrics::{Metric, MetricKind, MetricOutcome};
use crate::source::{Fetched, RepositorySource};
use regex::Regex;
use std::sync::LazyLock;

/// Exact versions and patch-wildcard versions count as pinned. Ranges,
/// caret and tilde specifiers do not.
static PINNED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$|^\d+\.\d+\.x$").expect("invalid regex"));

/// Fraction of declared dependencies whose version specifiers are pinned
/// down enough to make installs reproducible.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyPinning;

impl Metric for DependencyPinning {
    fn kind(&self) -> MetricKind {
        MetricKind::DependencyPinning
    }

    #[expect(clippy::cast_precision_loss, reason = "dependency counts are far below 2^52")]
    async fn compute<S: RepositorySource>(&self, source: &S) -> MetricOutcome {
        let Fetched::Found(manifest) = source.dependency_manifest().await else {
            return MetricOutcome::Scored(0.0);
        };

        let specifiers = manifest.merged_specifiers();
        if specifiers.is_empty() {
            return MetricOutcome::Scored(1.0);
        }

        let pinned = specifiers.values().filter(|spec| PINNED.is_match(spec)).count();

        MetricOutcome::Scored(pinned as f64 / specifiers.len() as f64)
    }
}
