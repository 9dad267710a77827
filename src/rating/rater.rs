use crate::metrics::{
    BusFactor, Correctness, DependencyPinning, License, Metric, MetricOutcome, MetricScore, RampUp,
    Responsiveness, ReviewedCode,
};
use crate::rating::report::ScoreReport;
use crate::rating::timing::measure;
use crate::source::RepositorySource;

const LOG_TARGET: &str = "    rating";

/// Runs every metric against one repository and folds the outcomes into a
/// finished report. The metrics run concurrently and each one is clocked
/// individually.
pub async fn rate<S: RepositorySource>(source: &S) -> crate::Result<ScoreReport> {
    log::debug!(target: LOG_TARGET, "rating '{}'", source.repo_ref());

    let (correctness, bus_factor, ramp_up, responsiveness, license, pinning, reviewed) = tokio::join!(
        scored(&Correctness, source),
        scored(&BusFactor, source),
        scored(&RampUp, source),
        scored(&Responsiveness, source),
        scored(&License, source),
        scored(&DependencyPinning, source),
        scored(&ReviewedCode, source),
    );

    let report = ScoreReport::assemble(&[
        correctness,
        bus_factor,
        ramp_up,
        responsiveness,
        license,
        pinning,
        reviewed,
    ])?;

    log::debug!(target: LOG_TARGET, "rated '{}' with a net score of {:.2}", source.repo_ref(), report.net_score);

    Ok(report)
}

async fn scored<M: Metric, S: RepositorySource>(metric: &M, source: &S) -> MetricScore {
    let (outcome, latency_secs) = measure(metric.compute(source)).await;

    match outcome {
        MetricOutcome::Scored(value) => {
            log::debug!(target: LOG_TARGET, "{} scored {value:.2} in {latency_secs:.3}s", metric.kind());
        }
        MetricOutcome::Unavailable => {
            log::info!(target: LOG_TARGET, "{} could not be computed after {latency_secs:.3}s", metric.kind());
        }
    }

    MetricScore {
        kind: metric.kind(),
        outcome,
        latency_secs,
    }
}
