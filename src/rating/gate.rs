use crate::rating::report::ScoreReport;
use strum::Display;

const LOG_TARGET: &str = "      gate";

/// Verdict on whether a package is trustworthy enough to ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Admission {
    Admit,
    Reject,
}

impl Admission {
    #[must_use]
    pub const fn is_admitted(self) -> bool {
        matches!(self, Self::Admit)
    }
}

/// Applies the ingestion threshold to a finished report.
///
/// This is the only place a threshold is enforced. Metrics and reports
/// carry raw scores so that callers can apply policies of their own.
#[must_use]
pub fn decide(report: &ScoreReport, min_net_score: f64) -> Admission {
    if report.net_score < min_net_score {
        log::info!(
            target: LOG_TARGET,
            "rejecting: net score {:.2} is below the required {min_net_score:.2}",
            report.net_score
        );
        return Admission::Reject;
    }

    log::debug!(
        target: LOG_TARGET,
        "admitting: net score {:.2} meets the required {min_net_score:.2}",
        report.net_score
    );
    Admission::Admit
}
