//! testng-report CLI - publish TestNG XML results to GitHub Actions.

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use testng_report::annotations::annotations_for_failures;
use testng_report::config::ActionConfig;
use testng_report::github::{self, StepSummary};
use testng_report::parser::{SuiteResult, parse_testng_results};
use testng_report::report::{self, render_detailed, render_summary, summary_stats};

#[derive(Parser)]
#[command(name = "testng-report")]
#[command(about = "Publish TestNG XML results as GitHub Actions reports", long_about = None)]
#[command(version)]
struct Cli {
    /// Glob pattern for TestNG result files (overrides INPUT_REPORT_PATHS)
    #[arg(long)]
    report_paths: Option<String>,

    /// Render the summary report (overrides INPUT_SUMMARY_REPORT)
    #[arg(long, value_name = "BOOL")]
    summary: Option<bool>,

    /// Render the detailed report (overrides INPUT_DETAILED_REPORT)
    #[arg(long, value_name = "BOOL")]
    detailed: Option<bool>,

    /// Treat zero matched files as an error (overrides INPUT_FAIL_IF_EMPTY)
    #[arg(long, value_name = "BOOL")]
    fail_if_empty: Option<bool>,

    /// Print the aggregated summary stats as JSON to stdout
    #[arg(long)]
    stats_json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ActionConfig::from_env();
    if let Some(report_paths) = cli.report_paths {
        config.report_paths = report_paths;
    }
    if let Some(summary) = cli.summary {
        config.summary_report = summary;
    }
    if let Some(detailed) = cli.detailed {
        config.detailed_report = detailed;
    }
    if let Some(fail_if_empty) = cli.fail_if_empty {
        config.fail_if_empty = fail_if_empty;
    }

    info!("Check name: {}", config.check_name);

    let files = find_report_files(&config.report_paths)?;
    if files.is_empty() {
        let msg = format!(
            "No TestNG report files found for pattern: {}",
            config.report_paths
        );
        if config.fail_if_empty {
            bail!(msg);
        }
        warn!("{msg}");
        return Ok(());
    }

    let mut all_suites: Vec<SuiteResult> = Vec::new();
    for file in &files {
        let xml = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read report file: {}", file.display()))?;
        let suites = parse_testng_results(&xml)
            .with_context(|| format!("Failed to parse report file: {}", file.display()))?;
        info!("Parsed {} suite(s) from {}", suites.len(), file.display());
        all_suites.extend(suites);
    }

    for annotation in annotations_for_failures(&all_suites) {
        github::emit_annotation(&annotation);
    }

    let stats = summary_stats(&all_suites);

    // Both reports go into one buffer, flushed exactly once.
    let mut sink = StepSummary::from_env();
    if config.summary_report {
        sink.add_raw(&render_summary(&stats));
    }
    if config.detailed_report {
        sink.add_raw(&render_detailed(&all_suites));
    }
    if !sink.is_empty() {
        sink.write()?;
    }

    if cli.stats_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }

    report::print_summary(&stats);

    Ok(())
}

fn find_report_files(pattern: &str) -> Result<Vec<std::path::PathBuf>> {
    let paths = glob::glob(pattern)
        .with_context(|| format!("Invalid report path pattern: {pattern}"))?;

    let mut files = Vec::new();
    for path in paths {
        let path = path.context("Failed to read a matched report path")?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
