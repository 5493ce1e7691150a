//! # Review Scraper
//!
//! Collects product reviews for a company from G2, Capterra, and Trustpilot,
//! keeps the ones published inside a date range, and writes them to a single
//! JSON report grouped by source.
//!
//! ## Features
//!
//! - One generic scraping engine driven by per-site configuration
//! - Relative ("3 days ago") and absolute date normalization to `YYYY-MM-DD`
//! - Per-source failure isolation: one broken site never loses another's results
//! - Polite pagination with a fixed delay and hard page/review caps
//!
//! ## Architecture
//!
//! 1. **Validation**: [`cli::Cli::request`] turns raw arguments into a [`cli::ScrapeRequest`]
//! 2. **Lookup**: each [`scrapers::SiteAdapter`] resolves the company's review page
//! 3. **Pagination**: listing pages are fetched and parsed into [`models::Review`]s
//! 4. **Filtering**: [`filter::filter_by_date`] keeps reviews inside the range
//! 5. **Output**: [`outputs::json::write_report`] writes the [`models::ScrapeReport`]

pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod filter;
pub mod models;
pub mod orchestrator;
pub mod outputs;
pub mod scrapers;
pub mod utils;
