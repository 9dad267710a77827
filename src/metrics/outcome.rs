use crate::metrics::MetricKind;

/// Result of one metric computation.
///
/// A metric that cannot fetch the facts it scores reports itself unavailable
/// instead of overloading a genuine zero. Consumers averaging outcomes treat
/// unavailable as zero; serialized reports show the -1 sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricOutcome {
    /// A genuine score in [0, 1].
    Scored(f64),

    /// The facts behind the metric could not be retrieved.
    Unavailable,
}

impl MetricOutcome {
    /// Contribution of this outcome when averaged into a net score.
    #[must_use]
    pub const fn score_or_zero(self) -> f64 {
        match self {
            Self::Scored(value) => value,
            Self::Unavailable => 0.0,
        }
    }

    /// Value written to serialized reports.
    #[must_use]
    pub const fn wire_value(self) -> f64 {
        match self {
            Self::Scored(value) => value,
            Self::Unavailable => -1.0,
        }
    }

    /// Returns `true` if the metric could not be computed.
    #[must_use]
    pub const fn is_unavailable(self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

/// A metric's outcome paired with its identity and compute latency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricScore {
    pub kind: MetricKind,
    pub outcome: MetricOutcome,

    /// Wall-clock seconds spent computing just this metric.
    pub latency_secs: f64,
}
