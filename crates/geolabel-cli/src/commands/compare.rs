//! Compare command - run every provider on one label photo.

use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use geolabel_core::compare::format_usd;
use geolabel_core::{ComparisonHarness, ComparisonReport, Credentials, ProviderOutcome};

use super::{load_config, read_image};

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// Label photo
    #[arg(required = true)]
    input: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Run providers one after another
    #[arg(long)]
    sequential: bool,

    /// Per-provider timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,
}

pub async fn run(args: CompareArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if args.sequential {
        config.compare.concurrent = false;
    }
    if args.timeout.is_some() {
        config.compare.timeout_secs = args.timeout;
    }

    let credentials = Credentials::from_env();
    let image = read_image(&args.input)?;
    let harness = ComparisonHarness::from_config(&credentials, &config);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message("Comparing providers...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let report = harness.compare_all(&image).await;
    pb.finish_and_clear();
    let report = report?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &ComparisonReport) {
    for outcome in &report.results {
        print_outcome(outcome);
        println!();
    }

    let summary = report.summary();
    println!(
        "{} {} providers: {} successful, {} failed",
        style("ℹ").blue(),
        summary.total,
        style(summary.successful).green(),
        style(summary.failed).red()
    );
    println!("   Estimated cost: {}", format_usd(summary.total_cost));
}

fn print_outcome(outcome: &ProviderOutcome) {
    let marker = if outcome.success {
        style("✓").green()
    } else {
        style("✗").red()
    };
    println!(
        "{} {} ({} ms, {})",
        marker,
        style(outcome.provider).bold(),
        outcome.response_time_ms,
        outcome.format_cost()
    );

    if let Some(data) = &outcome.data {
        for line in super::format_text(data).lines() {
            println!("    {}", line);
        }
    }
    if let Some(error) = &outcome.error {
        println!("    {}", style(error).red());
    }
}
