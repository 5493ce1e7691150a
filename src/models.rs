//! Data models for scraped reviews and the aggregated report.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`Review`]: one normalized review as produced by a site adapter
//! - [`Source`] / [`SourceSelection`]: which review sites to scrape
//! - [`SourceResult`]: per-source outcome, either reviews or an error string
//! - [`ScrapeReport`]: the top-level JSON document written at the end of a run
//! - [`DateRange`]: the inclusive date window reviews are filtered against
//!
//! Field names and nesting mirror the JSON report consumed downstream, so the
//! serde derives here are the compatibility contract.

use crate::error::InputValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Placeholder title used when the title locator misses.
pub const NO_TITLE: &str = "No Title";
/// Placeholder description used when the description locator misses.
pub const NO_DESCRIPTION: &str = "No Description";
/// Reviewer name used when the reviewer locator misses.
pub const ANONYMOUS: &str = "Anonymous";

/// A review site the pipeline knows how to scrape.
///
/// The declaration order is the order sources are scraped in and the order
/// they appear in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum Source {
    #[serde(rename = "G2")]
    G2,
    #[serde(rename = "Capterra")]
    Capterra,
    #[serde(rename = "Trustpilot")]
    Trustpilot,
}

impl Source {
    /// Every source, in scrape order.
    pub const ALL: [Source; 3] = [Source::G2, Source::Capterra, Source::Trustpilot];

    /// The lowercase identifier accepted on the command line.
    pub fn id(self) -> &'static str {
        match self {
            Source::G2 => "g2",
            Source::Capterra => "capterra",
            Source::Trustpilot => "trustpilot",
        }
    }

    /// The display name used as the report key and in each review's `source`.
    pub fn name(self) -> &'static str {
        match self {
            Source::G2 => "G2",
            Source::Capterra => "Capterra",
            Source::Trustpilot => "Trustpilot",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The `--source` choice: one site, or all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSelection {
    One(Source),
    All,
}

impl SourceSelection {
    /// Expand the selection into the ordered list of sources to scrape.
    pub fn sources(self) -> Vec<Source> {
        match self {
            SourceSelection::One(source) => vec![source],
            SourceSelection::All => Source::ALL.to_vec(),
        }
    }
}

impl FromStr for SourceSelection {
    type Err = InputValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        if wanted == "all" {
            return Ok(SourceSelection::All);
        }
        Source::ALL
            .into_iter()
            .find(|source| source.id() == wanted)
            .map(SourceSelection::One)
            .ok_or_else(|| InputValidationError::UnknownSource(s.to_string()))
    }
}

impl fmt::Display for SourceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSelection::One(source) => f.write_str(source.id()),
            SourceSelection::All => f.write_str("all"),
        }
    }
}

/// A single scraped review after normalization.
///
/// `date` is canonical `YYYY-MM-DD` when the raw text could be parsed and the
/// raw text verbatim otherwise. `rating` is `None` when the site's rating
/// markup was missing or unreadable; its scale depends on the source.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Review {
    pub title: String,
    pub description: String,
    pub date: String,
    pub rating: Option<f64>,
    pub reviewer_name: String,
    pub source: Source,
    /// The resolved listing URL shared by every review from one adapter run.
    pub url: String,
}

/// Outcome of scraping one source.
///
/// Serialized untagged: the presence of `error` distinguishes a failure.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SourceResult {
    Success {
        total_reviews: usize,
        reviews: Vec<Review>,
    },
    Failure {
        error: String,
        total_reviews: usize,
    },
}

impl SourceResult {
    pub fn success(reviews: Vec<Review>) -> Self {
        SourceResult::Success {
            total_reviews: reviews.len(),
            reviews,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        SourceResult::Failure {
            error: error.into(),
            total_reviews: 0,
        }
    }

    pub fn total_reviews(&self) -> usize {
        match self {
            SourceResult::Success { total_reviews, .. }
            | SourceResult::Failure { total_reviews, .. } => *total_reviews,
        }
    }

    pub fn reviews(&self) -> &[Review] {
        match self {
            SourceResult::Success { reviews, .. } => reviews,
            SourceResult::Failure { .. } => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SourceResult::Success { .. } => None,
            SourceResult::Failure { error, .. } => Some(error),
        }
    }
}

/// The JSON document produced by one run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScrapeReport {
    pub company: String,
    /// Start of the requested range, `YYYY-MM-DD`.
    pub start_date: String,
    /// End of the requested range, `YYYY-MM-DD`.
    pub end_date: String,
    pub sources: BTreeMap<Source, SourceResult>,
}

impl ScrapeReport {
    pub fn new(company: &str, range: &DateRange, sources: BTreeMap<Source, SourceResult>) -> Self {
        Self {
            company: company.to_string(),
            start_date: range.start().format(CANONICAL_DATE_FORMAT).to_string(),
            end_date: range.end().format(CANONICAL_DATE_FORMAT).to_string(),
            sources,
        }
    }

    /// Total reviews across every source, failures counting as zero.
    pub fn total_reviews(&self) -> usize {
        self.sources.values().map(SourceResult::total_reviews).sum()
    }
}

/// The canonical date format every review date is normalized to.
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive `[start, end]` window of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InputValidationError> {
        if start > end {
            return Err(InputValidationError::InvertedRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
