use super::common::{ColorMode, Common, CommonArgs};
use clap::Parser;
use ohno::bail;
use owo_colors::OwoColorize;
use pkg_rank::Result;
use pkg_rank::rating::{self, Admission};
use std::io::IsTerminal;
use std::io::stdout;

#[derive(Parser, Debug)]
pub struct GateArgs {
    /// Package or repository URL to judge
    #[arg(value_name = "URL")]
    pub url: String,

    /// Net score below which the package is rejected [default: from configuration]
    #[arg(long, value_name = "SCORE")]
    pub min_net_score: Option<f64>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Score a single package and enforce the ingestion threshold.
///
/// Admission is the success path. Rejection is reported as an error so that
/// scripts and CI pipelines see a failing exit code.
pub async fn gate_package(args: &GateArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let threshold = args.min_net_score.unwrap_or(common.config.min_net_score);

    let source = common.resolve(&args.url).await?;
    let report = rating::rate(&source).await?;

    let colors_enabled =
        matches!(args.color, ColorMode::Always) || (matches!(args.color, ColorMode::Auto) && stdout().is_terminal());

    match rating::decide(&report, threshold) {
        Admission::Admit => {
            let mark = if colors_enabled { "✓".green().to_string() } else { "✓".to_owned() };
            println!(
                "{mark} {}: net score {:.2} meets the required minimum of {threshold:.2}",
                args.url, report.net_score
            );
            Ok(())
        }
        Admission::Reject => {
            let mark = if colors_enabled { "✗".red().to_string() } else { "✗".to_owned() };
            eprintln!(
                "{mark} {}: net score {:.2} is below the required minimum of {threshold:.2}",
                args.url, report.net_score
            );
            bail!("ingestion gate rejected '{}' with a net score of {:.2}", args.url, report.net_score)
        }
    }
}
