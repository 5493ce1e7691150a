//! Runs the requested sources and assembles the report.
//!
//! Sources are scraped one after another. A source that fails, whether it
//! returns an error or panics, is recorded as an `error` entry and the
//! remaining sources still run.
//!
//! [`execute`] wraps a run for the binary: it races the scrape against
//! Ctrl-C, logs a per-source summary and writes the report.

use crate::cli::ScrapeRequest;
use crate::error::{AdapterError, OutputWriteError};
use crate::models::{DateRange, Review, ScrapeReport, Source, SourceResult, SourceSelection};
use futures::FutureExt;
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use crate::outputs::json::write_report;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

/// Anything that can scrape reviews for a given source.
///
/// [`SiteScrapers`](crate::scrapers::SiteScrapers) is the production
/// implementation.
pub trait ReviewScraper {
    async fn scrape(
        &self,
        source: Source,
        company: &str,
        range: &DateRange,
    ) -> Result<Vec<Review>, AdapterError>;
}

/// Scrape every source in `selection` for `company` and build the report.
#[instrument(level = "info", skip(scraper, range, selection), fields(%selection))]
pub async fn run<S: ReviewScraper>(
    scraper: &S,
    company: &str,
    range: &DateRange,
    selection: SourceSelection,
) -> ScrapeReport {
    let mut sources = BTreeMap::new();

    for source in selection.sources() {
        info!(%source, company, "Scraping source");
        let t0 = Instant::now();
        let outcome = AssertUnwindSafe(scraper.scrape(source, company, range))
            .catch_unwind()
            .await;
        let elapsed_ms = t0.elapsed().as_millis() as u64;

        let result = match outcome {
            Ok(Ok(reviews)) => {
                info!(%source, count = reviews.len(), elapsed_ms, "Source scraped");
                SourceResult::success(reviews)
            }
            Ok(Err(e)) => {
                warn!(%source, error = %e, elapsed_ms, "Source scraping failed");
                SourceResult::failure(e.to_string())
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(%source, error = %message, elapsed_ms, "Source scraper panicked");
                SourceResult::failure(message)
            }
        };
        sources.insert(source, result);
    }

    ScrapeReport::new(company, range, sources)
}

/// How an [`execute`] call ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Every selected source ran and the report was written. Individual
    /// sources may still carry an `error` entry.
    Completed(ScrapeReport),
    /// Ctrl-C arrived before the scrape finished; nothing was written.
    Interrupted,
}

/// Run `request` through `scraper` and write the report to `request.output`.
///
/// # Errors
///
/// Only a failed report write is an error. Source failures end up in the
/// report.
pub async fn execute<S: ReviewScraper>(
    scraper: &S,
    request: &ScrapeRequest,
) -> Result<RunOutcome, OutputWriteError> {
    let start_time = Instant::now();

    let report = tokio::select! {
        report = run(scraper, &request.company, &request.range, request.selection) => report,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted; no report written");
            return Ok(RunOutcome::Interrupted);
        }
    };

    for (source, result) in &report.sources {
        match result.error() {
            Some(reason) => warn!(%source, reason, "Source failed"),
            None => info!(%source, count = result.total_reviews(), "Source summary"),
        }
    }

    write_report(&report, &request.output).await?;

    info!(
        total_reviews = report.total_reviews(),
        path = %request.output.display(),
        elapsed_secs = start_time.elapsed().as_secs_f64(),
        "Scrape complete"
    );
    Ok(RunOutcome::Completed(report))
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    format!("scraper panicked: {detail}")
}
