//! A tool to score the trustworthiness of open source packages before they enter a private registry.
//!
//! # Overview
//!
//! `pkg-rank` helps registry operators decide whether an open source package is safe to
//! ingest. Given the URL of a GitHub repository or an npm package, it collects signals
//! from the hosting provider, computes a set of trustworthiness metrics, and combines
//! them into a net score between 0 and 1. An ingestion gate compares that score against
//! a configurable threshold and fails with a non-zero exit code when a package falls
//! short.
//!
//! # Installation
//!
//! ```bash
//! cargo install pkg-rank
//! ```
//!
//! # Quick Start
//!
//! Score a package:
//!
//! ```bash
//! pkg-rank score https://github.com/expressjs/express
//! ```
//!
//! This prints a single-line JSON report with the net score and every individual metric.
//!
//! # Basic Usage
//!
//! ## Scoring Packages
//!
//! **Score one or more URLs:**
//! ```bash
//! pkg-rank score https://github.com/lodash/lodash https://www.npmjs.com/package/express
//! ```
//!
//! npm package URLs are resolved to their backing GitHub repository through the
//! registry's metadata. Repository URLs in `git+https`, `git+ssh`, and `ssh` remote
//! forms are accepted as well.
//!
//! **Score URLs listed in a file, one per line:**
//! ```bash
//! pkg-rank score --url-file candidates.txt
//! ```
//!
//! **Write reports to a file instead of the terminal:**
//! ```bash
//! pkg-rank score --url-file candidates.txt --out reports.ndjson
//! ```
//!
//! **Pretty-print for human review:**
//! ```bash
//! pkg-rank score --pretty https://github.com/expressjs/express
//! ```
//!
//! ## Gating Ingestion
//!
//! **Apply the ingestion threshold to a single package:**
//! ```bash
//! pkg-rank gate https://www.npmjs.com/package/left-pad
//! ```
//!
//! The command prints a one-line verdict and exits successfully only when the package's
//! net score meets the threshold (0.5 unless configured otherwise):
//!
//! ```text
//! ✗ https://www.npmjs.com/package/left-pad: net score 0.34 is below the required minimum of 0.50
//! ```
//!
//! **Override the threshold for a stricter check:**
//! ```bash
//! pkg-rank gate https://github.com/expressjs/express --min-net-score 0.8
//! ```
//!
//! # Output Format
//!
//! Each scored package produces one JSON object. Scores are rounded to two decimal
//! places and latencies, the seconds of wall clock spent computing each metric, to
//! three. A metric that could not be computed because the hosting provider was
//! unreachable is reported as `-1`.
//!
//! ```text
//! {
//!   "NetScore": 0.62,
//!   "NetScoreLatency": 4.281,
//!   "RampUp": 0.55,
//!   "RampUpLatency": 0.612,
//!   "Correctness": 0.9,
//!   "CorrectnessLatency": 1.842,
//!   "BusFactor": 0.48,
//!   "BusFactorLatency": 0.393,
//!   "ResponsiveMaintainer": 0.7,
//!   "ResponsiveMaintainerLatency": 0.871,
//!   "LicenseScore": 1.0,
//!   "LicenseScoreLatency": 0.204,
//!   "GoodPinningPractice": 0.33,
//!   "GoodPinningPracticeLatency": 0.187,
//!   "PullRequest": 0.25,
//!   "PullRequestLatency": 0.172
//! }
//! ```
//!
//! With `--out`, reports are written newline-delimited, one object per package, ready
//! for ingestion into downstream tooling.
//!
//! # Scoring System
//!
//! Seven metrics are computed concurrently, each producing a score in `[0, 1]`:
//!
//! - **RampUp**: how approachable the project is, from popularity signals and the
//!   size of its README
//! - **Correctness**: engineering hygiene, from test and CI presence, documentation,
//!   linter configuration, issue closure, and commit recency
//! - **BusFactor**: how broadly the work is spread beyond the top contributor
//! - **ResponsiveMaintainer**: how quickly maintainers respond to and close recent
//!   issues and pull requests
//! - **LicenseScore**: whether the declared license is on the compatibility allowlist,
//!   checked in the README, the `LICENSE` file, and the repository metadata
//! - **GoodPinningPractice**: the fraction of manifest dependencies pinned to an exact
//!   or patch-wildcard version
//! - **PullRequest**: the fraction of recently merged pull requests that received a
//!   code review
//!
//! The net score is the average of the six non-license metrics, with unavailable
//! metrics counting as zero. An incompatible license forces the net score to zero
//! regardless of every other signal. `NetScoreLatency` is the sum of the seven metric
//! latencies, the total compute cost of the report.
//!
//! # CI/CD Integration
//!
//! Use the gate command to block dependency additions in CI:
//!
//! ```yaml
//! name: Dependency Gate
//! on: [pull_request]
//!
//! jobs:
//!   gate:
//!     runs-on: ubuntu-latest
//!     steps:
//!       - name: Check proposed dependency
//!         run: pkg-rank gate https://www.npmjs.com/package/express --color never
//!         env:
//!           GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}
//! ```
//!
//! A rejected package fails the job; the verdict line on stderr names the score that
//! fell short.
//!
//! # Configuration
//!
//! ## Using Configuration Files
//!
//! `pkg-rank` looks for `pkgrank.toml`, `pkgrank.yml`, `pkgrank.yaml`, or
//! `pkgrank.json` in the working directory, or takes an explicit path:
//!
//! ```bash
//! pkg-rank gate --config strict.toml https://github.com/expressjs/express
//! ```
//!
//! ## Configuration Structure
//!
//! All settings are optional and default to the values shown:
//!
//! ```toml
//! # Net score below which the gate command rejects a package
//! min_net_score = 0.5
//!
//! # Timeout for individual HTTP requests, in seconds
//! http_timeout_secs = 30
//!
//! # API hosts, overridable for GitHub Enterprise or a registry mirror
//! github_api_base = "https://api.github.com/"
//! npm_registry_base = "https://registry.npmjs.org/"
//! ```
//!
//! # Troubleshooting
//!
//! ## GitHub API Rate Limiting
//!
//! Public (unauthenticated) GitHub API has strict rate limits. Solutions:
//! - Provide a GitHub token via `GITHUB_TOKEN` environment variable
//! - Tokens increase rate limit from 60 to 5000 requests/hour
//!
//! ## Scores of -1
//!
//! A `-1` in a report means the metric could not be computed:
//! - The hosting provider was unreachable or rate limited
//! - Retry with a `GITHUB_TOKEN` set, or raise `http_timeout_secs`
//!
//! ## Configuration Warnings
//!
//! Validation warnings (⚠️) indicate non-optimal config but don't prevent execution:
//! - Review thresholds outside the `[0, 1]` score range
//! - Check for a zero HTTP timeout

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use pkg_rank::Result;

mod commands;

use crate::commands::{GateArgs, ScoreArgs, gate_package, score_packages};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "pkg-rank", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: PkgRankSubcommand,
}

#[derive(Subcommand, Debug)]
enum PkgRankSubcommand {
    /// Score packages and emit one JSON report per package
    Score(Box<ScoreArgs>),
    /// Score a single package and apply the ingestion threshold
    Gate(Box<GateArgs>),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        PkgRankSubcommand::Score(score_args) => score_packages(score_args).await,
        PkgRankSubcommand::Gate(gate_args) => gate_package(gate_args).await,
    }
}
