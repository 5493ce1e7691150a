//! Error taxonomy for the scraping pipeline.
//!
//! Only [`InputValidationError`] and [`OutputWriteError`] are fatal to a run.
//! Everything else is absorbed inside an adapter or recorded per source in the
//! report.

use crate::models::Source;
use thiserror::Error;

/// Rejected command-line input. Raised before any network activity.
#[derive(Debug, Error)]
pub enum InputValidationError {
    #[error("company name cannot be empty")]
    EmptyCompany,

    #[error("invalid {field} \"{value}\": please use YYYY-MM-DD format")]
    InvalidDate { field: &'static str, value: String },

    #[error("start date {start} must not be after end date {end}")]
    InvertedRange { start: String, end: String },

    #[error("source must be one of: g2, capterra, trustpilot, all (got \"{0}\")")]
    UnknownSource(String),
}

/// A single page request that failed. Stops pagination for that source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },
}

/// One review container that yielded nothing usable. Skips just that item.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("review container has no text content")]
    EmptyContainer,
}

/// Failure of a whole adapter run for one source.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("could not find company \"{company}\" on {site}")]
    CompanyNotFound { company: String, site: Source },

    #[error("company lookup on {site} failed: {error}")]
    Lookup {
        site: Source,
        #[source]
        error: FetchError,
    },

    #[error("invalid {site} locator \"{selector}\": {reason}")]
    InvalidLocator {
        site: Source,
        selector: String,
        reason: String,
    },

    #[error("invalid {site} base URL \"{url}\": {reason}")]
    InvalidBaseUrl {
        site: Source,
        url: String,
        reason: String,
    },
}

/// The report could not be persisted.
#[derive(Debug, Error)]
pub enum OutputWriteError {
    #[error("failed to write {path}: {error}")]
    Io {
        path: String,
        #[source]
        error: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
