//! Trustpilot company reviews.
//!
//! Trustpilot company pages live at a predictable `/review/{slug}` address, so
//! the slug is probed before falling back to search. Its markup is noisy: the
//! same review can appear on neighbouring pages and pages past the end repeat
//! the last one, which is why this site deduplicates.

use super::site::{CompanyLookup, FieldLocator, Locators, Pagination, RatingFormat, SiteConfig};
use crate::dates::ALL_DATE_FORMATS;
use crate::models::Source;

pub const BASE_URL: &str = "https://www.trustpilot.com";

pub fn site() -> SiteConfig {
    SiteConfig {
        source: Source::Trustpilot,
        base_url: BASE_URL.to_string(),
        lookup: CompanyLookup::SlugThenSearch {
            slug_path: "/review/{slug}",
            search_path: "/search?query={query}",
        },
        company_links: &[r#"a[href*="/review/"]"#],
        pagination: Pagination {
            first_page: Some(""),
            page_template: "?page={page}",
        },
        locators: Locators {
            containers: &["article[data-review-id]", r#"div[class*="review" i]"#],
            title: FieldLocator::new(&[r#"h2[class*="reviewtitle" i]"#]),
            description: FieldLocator::new(&[r#"p[class*="reviewbody" i]"#, "p"]),
            date: FieldLocator::new(&[r#"span[class*="reviewdate" i]"#, "time"]),
            rating: FieldLocator::new(&[r#"span[class*="rating" i]"#]),
            reviewer: FieldLocator::new(&[r#"span[class*="reviewer" i]"#]),
        },
        rating_format: RatingFormat::FirstInteger,
        date_formats: ALL_DATE_FORMATS,
        dedupe: true,
    }
}
