use clap::Parser;
use review_scraper::cli::Cli;
use review_scraper::orchestrator::{self, RunOutcome};
use review_scraper::scrapers::SiteScrapers;
use std::error::Error;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

/// Exit status used when the run is interrupted with Ctrl-C.
const INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Review scraper failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let request = args.request()?;
    let settings = args.settings();

    info!(
        company = %request.company,
        start_date = %request.range.start(),
        end_date = %request.range.end(),
        source = %request.selection,
        "review_scraper starting up"
    );

    let scrapers = SiteScrapers::http(&settings)?;

    match orchestrator::execute(&scrapers, &request).await? {
        RunOutcome::Completed(_) => Ok(ExitCode::SUCCESS),
        RunOutcome::Interrupted => Ok(ExitCode::from(INTERRUPTED)),
    }
}
