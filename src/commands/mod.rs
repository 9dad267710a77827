//! Command-line commands for pkg-rank
//!
//! This module implements the CLI commands that sit on top of the scoring
//! library. It handles argument parsing, configuration loading, and logging
//! setup, and routes each invocation through the shared resolve-then-rate
//! pipeline.
//!
//! # Implementation Model
//!
//! The module is organized around two commands:
//!
//! - **score**: Resolve each input URL to a repository source, compute all
//!   metrics, and emit one JSON report per package
//! - **gate**: Score a single package and compare its net score against the
//!   ingestion threshold, failing the process on rejection
//!
//! The `common` module provides the pieces both commands share: flag
//! definitions, log level handling, configuration loading with validation
//! warnings, and construction of the repository source from an input URL.

mod common;
mod gate;
mod score;

pub use gate::{GateArgs, gate_package};
pub use score::{ScoreArgs, score_packages};
