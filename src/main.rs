//! Git Contribution Statistics Tool
//!
//! Reads a repository's full history and saves yearly activity charts into a
//! directory named after the repository.

use anyhow::Result;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use gitalyzer::analysis::analyze_repo_async;
use gitalyzer::cli::Cli;
use gitalyzer::plotting::{render_report_async, ChartStyle, ChartTheme};
use gitalyzer::utils::prepare_output_dir;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.repository_path.is_none() {
        println!("{}", Cli::usage());
        return ExitCode::from(1);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let exclude = cli.exclusion()?;
    let repo_path = cli
        .repository_path
        .clone()
        .ok_or_else(|| anyhow::anyhow!("missing repository path"))?;

    let report = analyze_repo_async(repo_path.clone(), exclude, cli.top).await?;

    let out_dir = prepare_output_dir(&cli.out_dir, &repo_path)?;
    let written =
        render_report_async(report.clone(), out_dir, ChartStyle::default(), ChartTheme::default())
            .await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for path in &written {
        println!("Saved {}", path.display());
    }
    match report.activity.year_span() {
        Some((first, last)) => println!(
            "Analyzed {} commits by {} contributors ({first}-{last})",
            report.commit_count, report.contributor_count
        ),
        None => println!("No commits found"),
    }
    Ok(())
}
