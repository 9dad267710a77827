//! Trustworthiness metrics computed from repository facts
//!
//! This module turns the facts a [`RepositorySource`](crate::source::RepositorySource)
//! serves into the seven quality signals that make up a package rating: code
//! correctness, bus factor, ramp-up effort, maintainer responsiveness, license
//! compatibility, dependency pinning, and review coverage of merged code.
//!
//! # Implementation Model
//!
//! The core abstraction is the [`Metric`] trait. Each metric is a stateless
//! unit struct whose `compute` method reads whatever facts it needs from a
//! source and produces a [`MetricOutcome`]:
//! - **Scored(f64)**: A genuine quality judgment in the range \[0, 1\].
//! - **Unavailable**: The facts needed to judge could not be fetched.
//!
//! The distinction matters downstream. A package with no tests scores 0 on
//! correctness because it earned that score, while a package behind a flaky
//! network scores `Unavailable` because nothing was learned. Metrics degrade
//! to a hard 0 only when the absence of a fact is itself the judgment, such
//! as a registry package with no source repository to inspect.
//!
//! Metrics never rank or gate. They report what they measured, and the
//! [`rating`](crate::rating) module decides what the numbers mean.

mod bus_factor;
mod correctness;
mod dependency_pinning;
mod kind;
mod license;
mod numeric;
mod outcome;
mod ramp_up;
mod responsiveness;
mod reviewed_code;

pub use bus_factor::BusFactor;
pub use correctness::Correctness;
pub use dependency_pinning::DependencyPinning;
pub use kind::MetricKind;
pub use license::License;
pub use outcome::{MetricOutcome, MetricScore};
pub use ramp_up::RampUp;
pub use responsiveness::Responsiveness;
pub use reviewed_code::ReviewedCode;

use crate::source::RepositorySource;
use core::future::Future;

/// A single quality signal computed from repository facts.
pub trait Metric: Send + Sync {
    /// The score slot this metric fills in a rating.
    fn kind(&self) -> MetricKind;

    /// Judges the repository behind `source`.
    fn compute<S: RepositorySource>(&self, source: &S) -> impl Future<Output = MetricOutcome> + Send;
}
