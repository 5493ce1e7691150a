//! Review site scrapers.
//!
//! Every site is scraped by the same generic [`SiteAdapter`]; the per-site
//! modules only provide a [`SiteConfig`] describing where things live.
//!
//! # Supported Sources
//!
//! | Source | Module | Company lookup | Pagination | Notes |
//! |--------|--------|----------------|------------|-------|
//! | G2 | [`g2`] | Product search | `/reviews?page=N` | Ratings as `"4.5/5"` |
//! | Capterra | [`capterra`] | Search | Sorted `?page=N` | Description is first long paragraph |
//! | Trustpilot | [`trustpilot`] | Slug probe, then search | `?page=N` | Deduplicates by title and date |
//!
//! # Common Patterns
//!
//! Scrapers use:
//! - Sequential page fetches with a fixed politeness delay
//! - Graceful degradation (missing fields get placeholders, failed pages end
//!   pagination, broken items are skipped)
//! - Date normalization against a single reference time per run

pub mod adapter;
pub mod capterra;
pub mod fetch;
pub mod g2;
pub mod site;
pub mod trustpilot;

pub use adapter::SiteAdapter;
pub use fetch::{HttpFetcher, PageFetcher};
pub use site::SiteConfig;

use crate::config::ScrapeSettings;
use crate::error::{AdapterError, FetchError};
use crate::models::{DateRange, Review, Source};
use crate::orchestrator::ReviewScraper;

/// One configured adapter per supported source.
#[derive(Debug)]
pub struct SiteScrapers<F> {
    g2: SiteAdapter<F>,
    capterra: SiteAdapter<F>,
    trustpilot: SiteAdapter<F>,
}

impl<F: PageFetcher> SiteScrapers<F> {
    pub fn new(g2: SiteAdapter<F>, capterra: SiteAdapter<F>, trustpilot: SiteAdapter<F>) -> Self {
        Self {
            g2,
            capterra,
            trustpilot,
        }
    }

    pub fn adapter(&self, source: Source) -> &SiteAdapter<F> {
        match source {
            Source::G2 => &self.g2,
            Source::Capterra => &self.capterra,
            Source::Trustpilot => &self.trustpilot,
        }
    }
}

impl<F: PageFetcher + Clone> SiteScrapers<F> {
    /// The three production site configurations sharing one fetcher.
    pub fn with_fetcher(fetcher: F, settings: &ScrapeSettings) -> Self {
        Self::new(
            SiteAdapter::new(g2::site(), fetcher.clone(), settings.clone()),
            SiteAdapter::new(capterra::site(), fetcher.clone(), settings.clone()),
            SiteAdapter::new(trustpilot::site(), fetcher, settings.clone()),
        )
    }
}

impl SiteScrapers<HttpFetcher> {
    /// Production scrapers backed by a real HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the HTTP client cannot be built.
    pub fn http(settings: &ScrapeSettings) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(settings)?;
        Ok(Self::with_fetcher(fetcher, settings))
    }
}

impl<F: PageFetcher> ReviewScraper for SiteScrapers<F> {
    async fn scrape(
        &self,
        source: Source,
        company: &str,
        range: &DateRange,
    ) -> Result<Vec<Review>, AdapterError> {
        self.adapter(source).fetch_reviews(company, range).await
    }
}
