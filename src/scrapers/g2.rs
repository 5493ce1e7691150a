//! G2 product reviews.
//!
//! Companies are found through the product search page. Reviews are listed at
//! `{product}/reviews?page=N` with ratings printed as `"4.5/5"`.

use super::site::{CompanyLookup, FieldLocator, Locators, Pagination, RatingFormat, SiteConfig};
use crate::dates::ALL_DATE_FORMATS;
use crate::models::Source;

pub const BASE_URL: &str = "https://www.g2.com";

pub fn site() -> SiteConfig {
    SiteConfig {
        source: Source::G2,
        base_url: BASE_URL.to_string(),
        lookup: CompanyLookup::Search {
            path: "/products?utf8=%E2%9C%93&search={query}",
        },
        company_links: &[r#"a[data-test="product-link"]"#, r#"a[href*="/products/"]"#],
        pagination: Pagination {
            first_page: None,
            page_template: "/reviews?page={page}",
        },
        locators: Locators {
            containers: &[r#"div[data-test="review-card"]"#],
            title: FieldLocator::new(&["h3"]),
            description: FieldLocator::new(&[r#"p[data-test="review-body"]"#]),
            date: FieldLocator::new(&["time"]),
            rating: FieldLocator::new(&[r#"span[data-test="star-rating"]"#]),
            reviewer: FieldLocator::new(&[r#"div[data-test="reviewer-name"]"#]),
        },
        rating_format: RatingFormat::LeadingFraction,
        date_formats: &ALL_DATE_FORMATS[..3],
        dedupe: false,
    }
}
