//! Scrape-time limits and HTTP settings shared by every site adapter.

use std::time::Duration;

/// Browser-like User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Limits applied to each adapter run.
///
/// Defaults match what the review sites tolerate from a single polite client:
/// at most 100 reviews and 50 pages per source, a 10 second request timeout
/// and a 2 second pause between listing pages.
#[derive(Debug, Clone)]
pub struct ScrapeSettings {
    /// Stop collecting once this many reviews have been gathered from a source.
    pub max_reviews: usize,
    /// Never request more than this many listing pages from a source.
    pub max_pages: u32,
    /// Per-request timeout; a timeout counts as a failed page fetch.
    pub request_timeout: Duration,
    /// Pause between consecutive listing pages of the same source.
    pub page_delay: Duration,
    pub user_agent: String,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            max_reviews: 100,
            max_pages: 50,
            request_timeout: Duration::from_secs(10),
            page_delay: Duration::from_secs(2),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
