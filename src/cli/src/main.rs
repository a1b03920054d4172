//! CLI for scan-publisher.
//!
//! Publishes scan results and summary updates from CI as labelled pull
//! requests, and merges scanner output into the summary table.

use clap::{Parser, Subcommand};
use scan_publisher::{
    AggregateReport, PublisherConfig, RunContext, RunSummary, Runner, RunnerConfig, RunnerError,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Scan Publisher - Open pull requests for vulnerability scan results.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the publisher config file. Defaults apply when it is absent.
    #[arg(long, env = "SCAN_PUBLISHER_CONFIG", default_value = "publisher.toml", global = true)]
    config: PathBuf,

    /// Repository working directory.
    #[arg(long, default_value = ".", global = true)]
    workdir: PathBuf,

    /// Print the plan without running git or gh.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Publish the updated summary file.
    Summary,

    /// Publish scan results for a repository.
    ScanResults {
        /// URL (or owner/name) of the scanned repository.
        target_url: String,
    },

    /// Merge scanner output and regenerate the summary table.
    Aggregate {
        /// Organization that owns the scanned repository.
        org: String,

        /// Scanned repository name.
        repo: String,

        /// Directory holding the results files.
        results_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(1)
        }
    }
}

/// Sets up the global tracing subscriber with compact output and a
/// `RUST_LOG` filter defaulting to "info".
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn run(args: Args) -> Result<(), RunnerError> {
    let config_path = if args.config.is_relative() {
        args.workdir.join(&args.config)
    } else {
        args.config.clone()
    };
    let publisher = PublisherConfig::load_or_default(&config_path)?;
    let config = RunnerConfig::new(args.workdir, args.dry_run, publisher, RunContext::from_env());
    let runner = Runner::new(config);

    match args.command {
        Command::Summary => print_summary(&runner.publish_summary().await?),
        Command::ScanResults { target_url } => {
            print_summary(&runner.publish_scan_results(&target_url).await?);
        }
        Command::Aggregate {
            org,
            repo,
            results_dir,
        } => {
            print_report(&runner.aggregate(&org, &repo, &results_dir)?);
        }
    }

    Ok(())
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!("  Flow: {}", summary.flow);
    println!("  Outcome: {}", summary.outcome.as_str());

    if let Some(identity) = &summary.identity {
        println!("  Identity: {identity}");
    }
    if let Some(branch) = &summary.branch {
        println!("  Branch: {branch}");
    }
    if let Some(pr) = &summary.pr {
        match pr.url() {
            Some(url) => println!("  PR: {url}"),
            None => println!("  PR: {}", pr.as_str()),
        }
    }
    if summary.is_published() {
        let attached = summary.labels.iter().filter(|l| l.attached.is_ok()).count();
        println!("  Labels attached: {attached}/{}", summary.labels.len());
    }
    if summary.has_warnings() {
        println!("  Warnings: {}", summary.warnings.len());
        for warning in &summary.warnings {
            println!("    - {warning}");
        }
    }
}

/// Prints the files written (or previewed) by an aggregation.
fn print_report(report: &AggregateReport) {
    println!("\nAggregation:");
    if !report.written {
        println!("  Mode: Dry Run (nothing written)");
    }
    println!("  Results: {}", report.results_file.display());
    println!("  Summary: {}", report.summary_file.display());
    println!("  Repositories: {}", report.repositories);
}
