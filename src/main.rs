//! `dblp-bib` - fetch DBLP publications for a group and combine them into one BibTeX file.
//!
//! ```text
//! dblp-bib
//! dblp-bib --start 2020 --end 2024
//! dblp-bib --authors team.txt --output my_publications.bib
//! ```

use anyhow::{Context, Result, bail};
use clap::Parser;
use dblp_bib::authors::load_authors;
use dblp_bib::{DblpClient, HarvestConfig, HarvestError, Harvester, RunReport, YearRange};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{Level, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dblp-bib")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fetch DBLP publications and combine them into one BibTeX file", long_about = None)]
struct Cli {
    /// Authors file, one `Name` or `Name, PID` per line
    #[arg(long, default_value = "authors.txt")]
    authors: PathBuf,

    /// Output BibTeX file (overwritten)
    #[arg(long, default_value = "publications.bib")]
    output: PathBuf,

    /// First publication year to keep (inclusive)
    #[arg(long)]
    start: Option<i32>,

    /// Last publication year to keep (inclusive)
    #[arg(long)]
    end: Option<i32>,

    /// Seconds to wait between authors
    #[arg(long, default_value_t = 3)]
    delay_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_summary(report: &RunReport) {
    let rule = "=".repeat(60);
    println!("\n{rule}\nSUMMARY\n{rule}");
    println!(
        "Authors processed: {}/{}",
        report.authors_succeeded, report.authors_attempted
    );
    println!("Total entries collected: {}", report.total_before_dedup);
    if report.duplicates_removed > 0 {
        println!("Duplicates removed: {}", report.duplicates_removed);
        println!("Unique publications: {}", report.total_after_dedup);
    } else {
        println!("Total publications: {}", report.total_after_dedup);
    }
    if !report.year_range.is_unbounded() {
        println!("Year range: {}", report.year_range);
    }
    for failure in &report.failures {
        println!("Skipped {}: {}", failure.display_name, failure.reason);
    }
    println!("Output file: {}", report.output_path.display());
    println!("{rule}\n");
}

fn run(cli: Cli) -> Result<RunReport> {
    let range = YearRange::new(cli.start, cli.end)?;

    let authors = load_authors(&cli.authors)?;
    if authors.is_empty() {
        bail!("No authors found in {}", cli.authors.display());
    }

    let config = HarvestConfig::default()
        .with_author_delay(Duration::from_secs(cli.delay_secs))
        .with_request_timeout(Duration::from_secs(cli.timeout_secs));
    let client = DblpClient::from_config(&config)?;
    let harvester = Harvester::new(client, config);

    harvester
        .run(&authors, range, &cli.output)
        .with_context(|| format!("Harvest for {} failed", cli.authors.display()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Some(HarvestError::NothingFetched { failures, .. }) =
                err.downcast_ref::<HarvestError>()
            {
                for failure in failures {
                    error!("{}: {}", failure.display_name, failure.reason);
                }
            }
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
