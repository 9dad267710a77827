use super::common::{Common, CommonArgs};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::{IntoAppError, bail};
use pkg_rank::Result;
use pkg_rank::rating;
use std::fs;

#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// Package or repository URLs to score
    #[arg(value_name = "URL", required_unless_present = "url_file")]
    pub urls: Vec<String>,

    /// File containing additional URLs to score, one per line
    #[arg(long, value_name = "PATH")]
    pub url_file: Option<Utf8PathBuf>,

    /// Pretty-print reports instead of emitting one line per report
    #[arg(long)]
    pub pretty: bool,

    /// Write reports to a file instead of to the terminal
    #[arg(long, value_name = "PATH")]
    pub out: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn score_packages(args: &ScoreArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let urls = gather_urls(args)?;

    let mut collected = Vec::new();
    for url in &urls {
        let source = common.resolve(url).await?;
        let report = rating::rate(&source).await?;

        let line = if args.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        }
        .into_app_err("unable to serialize score report")?;

        if args.out.is_some() {
            collected.push(line);
        } else {
            println!("{line}");
        }
    }

    if let Some(path) = &args.out {
        let mut text = collected.join("\n");
        text.push('\n');
        fs::write(path, text).into_app_err_with(|| format!("unable to write reports to {path}"))?;
    }

    Ok(())
}

fn gather_urls(args: &ScoreArgs) -> Result<Vec<String>> {
    let mut urls = args.urls.clone();

    if let Some(path) = &args.url_file {
        let text = fs::read_to_string(path).into_app_err_with(|| format!("unable to read URL file {path}"))?;
        urls.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(ToString::to_string),
        );
    }

    if urls.is_empty() {
        bail!("no URLs to score; pass them as arguments or via --url-file");
    }

    Ok(urls)
}
