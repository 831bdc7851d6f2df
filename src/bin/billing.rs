use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use billing::{logging, pipeline, Collector, Config, ConfigError, Outcome, RunRequest};

/// Any kind of error which prevents a run from happening at all.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Bill customers for their purchases, and send the bills for payment processing.
#[derive(Parser)]
#[command(name = "billing")]
#[command(version)]
struct Cli {
    /// Path to the csv file of customers details
    customers: PathBuf,
    /// Path to the csv file of customers purchases history
    purchases: PathBuf,
    /// URL of Display endpoint to send customer purchases, defaults to environment variable API_URL
    #[arg(long)]
    url: Option<String>,
}

fn main() -> Result<ExitCode, Error> {
    logging::init_logging();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let request = RunRequest {
        customers: cli.customers,
        purchases: cli.purchases,
        url: cli.url,
    };

    let mut collector = Collector::new();
    let mut stdout = std::io::stdout().lock();
    let outcome = pipeline::run(&request, &config, &mut collector, &mut stdout);
    // The diagnostics are always reported, even if the run stopped early
    collector.report(&mut stdout)?;

    Ok(match outcome? {
        Outcome::Delivered => ExitCode::SUCCESS,
        Outcome::DeliveryFailed | Outcome::Aborted => ExitCode::FAILURE,
    })
}
