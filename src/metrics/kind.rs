use strum::{Display, EnumCount, EnumIter};

/// The fixed set of metrics every score report carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, EnumIter, Display)]
pub enum MetricKind {
    Correctness,
    BusFactor,
    RampUp,
    Responsiveness,
    License,
    DependencyPinning,
    ReviewedCode,
}

impl MetricKind {
    /// Key under which this metric's score appears in serialized reports.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Correctness => "Correctness",
            Self::BusFactor => "BusFactor",
            Self::RampUp => "RampUp",
            Self::Responsiveness => "ResponsiveMaintainer",
            Self::License => "LicenseScore",
            Self::DependencyPinning => "GoodPinningPractice",
            Self::ReviewedCode => "PullRequest",
        }
    }
}
