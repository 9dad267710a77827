//! Score assembly and the ingestion gate
//!
//! This module turns individual metric outcomes into the rating a caller
//! acts on. [`rate`] runs every metric concurrently against one repository
//! while clocking each of them, and [`ScoreReport`] folds the outcomes into
//! the flat record that gets serialized for downstream tooling.
//!
//! # Implementation Model
//!
//! A rating is a pure function of metric outcomes. The net score is the
//! mean of the six non-license scores, with unavailable outcomes counting
//! as zero so that a fetch failure reads as "nothing earned" rather than
//! poisoning the whole rating. The license metric does not participate in
//! the mean. It acts as a veto instead: an incompatible license zeroes the
//! net score no matter what the other six measured.
//!
//! Latency accounting follows the same shape. Each metric reports its own
//! wall time, and the net latency is the sum over all seven, which is the
//! total compute cost of the rating rather than the elapsed wall time of
//! the concurrent run.
//!
//! [`decide`] is the one place a threshold is enforced. Everything else in
//! the crate reports raw scores and leaves policy to the caller.

mod gate;
mod rater;
mod report;
mod timing;

pub use gate::{Admission, decide};
pub use rater::rate;
pub use report::ScoreReport;
