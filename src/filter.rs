//! Date-range filtering for normalized reviews.

use crate::dates::parse_canonical;
use crate::models::{DateRange, Review};
use tracing::debug;

/// Keep reviews dated inside `range` (inclusive).
///
/// Reviews whose `date` is not canonical `YYYY-MM-DD` are kept: a date the
/// normalizer could not understand is surfaced rather than silently dropped.
/// Input order is preserved.
pub fn filter_by_date(reviews: Vec<Review>, range: &DateRange) -> Vec<Review> {
    let before = reviews.len();
    let kept: Vec<Review> = reviews
        .into_iter()
        .filter(|review| match parse_canonical(&review.date) {
            Some(date) => range.contains(date),
            None => true,
        })
        .collect();
    debug!(before, after = kept.len(), "Filtered reviews by date range");
    kept
}
