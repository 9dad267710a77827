use crate::metrics::{MetricKind, MetricScore};
use serde::{Deserialize, Serialize};

/// Serialized value standing in for a score that could not be computed.
const UNAVAILABLE: f64 = -1.0;

/// The finished rating for one package, shaped for the wire.
///
/// Scores are rounded to two decimal places and latencies to three. A score
/// of `-1` means the metric could not be computed because the facts behind
/// it were unreachable, which is distinct from a package that earned a zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScoreReport {
    pub net_score: f64,
    pub net_score_latency: f64,
    pub ramp_up: f64,
    pub ramp_up_latency: f64,
    pub correctness: f64,
    pub correctness_latency: f64,
    pub bus_factor: f64,
    pub bus_factor_latency: f64,
    pub responsive_maintainer: f64,
    pub responsive_maintainer_latency: f64,
    pub license_score: f64,
    pub license_score_latency: f64,
    pub good_pinning_practice: f64,
    pub good_pinning_practice_latency: f64,
    pub pull_request: f64,
    pub pull_request_latency: f64,
}

impl ScoreReport {
    /// Folds one outcome per metric into a finished report.
    ///
    /// The net score is the mean of the six non-license scores, with
    /// unavailable outcomes counting as zero. An incompatible license
    /// zeroes the net score outright, whatever the other six say. The
    /// net latency is the total time spent across all seven metrics.
    pub fn assemble(scores: &[MetricScore]) -> crate::Result<Self> {
        let correctness = single(scores, MetricKind::Correctness)?;
        let bus_factor = single(scores, MetricKind::BusFactor)?;
        let ramp_up = single(scores, MetricKind::RampUp)?;
        let responsiveness = single(scores, MetricKind::Responsiveness)?;
        let license = single(scores, MetricKind::License)?;
        let pinning = single(scores, MetricKind::DependencyPinning)?;
        let reviewed = single(scores, MetricKind::ReviewedCode)?;

        let averaged = [&correctness, &bus_factor, &ramp_up, &responsiveness, &pinning, &reviewed];

        let license_score = license.outcome.score_or_zero();
        let net_score = if license_score <= 0.0 {
            0.0
        } else {
            averaged.iter().map(|score| score.outcome.score_or_zero()).sum::<f64>() / 6.0
        };

        let net_score_latency = license.latency_secs
            + averaged.iter().map(|score| score.latency_secs).sum::<f64>();

        let report = Self {
            net_score: round_score(net_score),
            net_score_latency: round_latency(net_score_latency),
            ramp_up: round_score(ramp_up.outcome.wire_value()),
            ramp_up_latency: round_latency(ramp_up.latency_secs),
            correctness: round_score(correctness.outcome.wire_value()),
            correctness_latency: round_latency(correctness.latency_secs),
            bus_factor: round_score(bus_factor.outcome.wire_value()),
            bus_factor_latency: round_latency(bus_factor.latency_secs),
            responsive_maintainer: round_score(responsiveness.outcome.wire_value()),
            responsive_maintainer_latency: round_latency(responsiveness.latency_secs),
            license_score: round_score(license.outcome.wire_value()),
            license_score_latency: round_latency(license.latency_secs),
            good_pinning_practice: round_score(pinning.outcome.wire_value()),
            good_pinning_practice_latency: round_latency(pinning.latency_secs),
            pull_request: round_score(reviewed.outcome.wire_value()),
            pull_request_latency: round_latency(reviewed.latency_secs),
        };

        report.validate()?;
        Ok(report)
    }

    /// Confirms every value in the report is in its legal range.
    #[expect(clippy::float_cmp, reason = "the unavailable sentinel is an exact value")]
    pub fn validate(&self) -> crate::Result<()> {
        let scores = [
            ("NetScore", self.net_score),
            ("RampUp", self.ramp_up),
            ("Correctness", self.correctness),
            ("BusFactor", self.bus_factor),
            ("ResponsiveMaintainer", self.responsive_maintainer),
            ("LicenseScore", self.license_score),
            ("GoodPinningPractice", self.good_pinning_practice),
            ("PullRequest", self.pull_request),
        ];

        for (name, value) in scores {
            if !(0.0..=1.0).contains(&value) && value != UNAVAILABLE {
                ohno::bail!("score '{name}' is out of range: {value}");
            }
        }

        let latencies = [
            ("NetScoreLatency", self.net_score_latency),
            ("RampUpLatency", self.ramp_up_latency),
            ("CorrectnessLatency", self.correctness_latency),
            ("BusFactorLatency", self.bus_factor_latency),
            ("ResponsiveMaintainerLatency", self.responsive_maintainer_latency),
            ("LicenseScoreLatency", self.license_score_latency),
            ("GoodPinningPracticeLatency", self.good_pinning_practice_latency),
            ("PullRequestLatency", self.pull_request_latency),
        ];

        for (name, value) in latencies {
            if !value.is_finite() || value < 0.0 {
                ohno::bail!("latency '{name}' is out of range: {value}");
            }
        }

        Ok(())
    }
}

fn single(scores: &[MetricScore], kind: MetricKind) -> crate::Result<MetricScore> {
    let mut matches = scores.iter().filter(|score| score.kind == kind);
    let Some(first) = matches.next() else {
        ohno::bail!("no {kind} outcome was produced");
    };

    if matches.next().is_some() {
        ohno::bail!("multiple {kind} outcomes were produced");
    }

    Ok(*first)
}

fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round_latency(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
