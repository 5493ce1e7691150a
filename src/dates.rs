//! Free-text review date normalization.
//!
//! Review sites print dates either as relative phrases ("3 months ago") or in
//! one of several absolute formats. Everything is normalized to the canonical
//! `YYYY-MM-DD` form; text that cannot be understood is returned verbatim so
//! no review is ever dropped at this stage.
//!
//! # Relative units
//!
//! | Unit  | Duration |
//! |-------|----------|
//! | hour  | 1 hour   |
//! | day   | 1 day    |
//! | week  | 7 days   |
//! | month | 30 days  |
//! | year  | 365 days |
//!
//! Months and years are fixed-length approximations, not calendar math.

use crate::models::CANONICAL_DATE_FORMAT;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Every absolute format the normalizer understands, in the order tried.
///
/// Site adapters use a prefix of this list; `%m/%d/%Y` wins over `%d/%m/%Y`
/// for ambiguous input.
pub const ALL_DATE_FORMATS: &[&str] = &[
    "%B %d, %Y", // January 05, 2023
    "%b %d, %Y", // Jan 05, 2023
    "%Y-%m-%d",  // 2023-01-05
    "%m/%d/%Y",  // 01/05/2023
    "%d/%m/%Y",  // 05/01/2023
];

static RELATIVE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(\w+)\s*ago").expect("relative date pattern is valid"));

/// Normalize `raw` against `reference` using [`ALL_DATE_FORMATS`].
pub fn normalize(raw: &str, reference: NaiveDateTime) -> String {
    normalize_with_formats(raw, reference, ALL_DATE_FORMATS)
}

/// Normalize `raw` to `YYYY-MM-DD`, trying a relative phrase first and then
/// each of `formats` in order. Returns `raw` unchanged when nothing matches.
pub fn normalize_with_formats(raw: &str, reference: NaiveDateTime, formats: &[&str]) -> String {
    if let Some(date) = parse_relative(raw, reference) {
        return date.format(CANONICAL_DATE_FORMAT).to_string();
    }

    let trimmed = raw.trim();
    for format in formats {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.format(CANONICAL_DATE_FORMAT).to_string();
        }
    }

    debug!(raw, "Unrecognized date text; keeping it verbatim");
    raw.to_string()
}

/// Parse the date as strictly `YYYY-MM-DD`.
pub fn parse_canonical(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, CANONICAL_DATE_FORMAT).ok()
}

fn parse_relative(raw: &str, reference: NaiveDateTime) -> Option<NaiveDate> {
    let captures = RELATIVE_DATE.captures(raw)?;
    let amount: i64 = captures[1].parse().ok()?;
    let unit = captures[2].to_lowercase();

    let span = if unit.contains("month") {
        Duration::try_days(amount.checked_mul(30)?)?
    } else if unit.contains("day") {
        Duration::try_days(amount)?
    } else if unit.contains("week") {
        Duration::try_weeks(amount)?
    } else if unit.contains("year") {
        Duration::try_days(amount.checked_mul(365)?)?
    } else if unit.contains("hour") {
        Duration::try_hours(amount)?
    } else {
        return None;
    };

    reference.checked_sub_signed(span).map(|dt| dt.date())
}
