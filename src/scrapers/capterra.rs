//! Capterra software reviews.
//!
//! Companies are found through the search page. The first listing page is the
//! product page itself; later pages add a most-recent sort and a page number.
//! Descriptions have no dedicated marker, so the first paragraph longer than
//! ten characters is taken.

use super::site::{CompanyLookup, FieldLocator, Locators, Pagination, RatingFormat, SiteConfig};
use crate::dates::ALL_DATE_FORMATS;
use crate::models::Source;

pub const BASE_URL: &str = "https://www.capterra.com";

pub fn site() -> SiteConfig {
    SiteConfig {
        source: Source::Capterra,
        base_url: BASE_URL.to_string(),
        lookup: CompanyLookup::Search {
            path: "/search?q={query}",
        },
        company_links: &[
            r#"a[data-test="product_result_link"]"#,
            r#"a[href*="/software/"]"#,
        ],
        pagination: Pagination {
            first_page: Some("#reviews"),
            page_template: "?reviews_filter_json=%5B%5D&sort_type=most_recent&page={page}#reviews",
        },
        locators: Locators {
            containers: &[r#"div[data-test="ReviewCard"]"#],
            title: FieldLocator::new(&["h3"]),
            description: FieldLocator::min_len(&["p"], 11),
            date: FieldLocator::new(&[r#"span[data-test="review_date"]"#]),
            rating: FieldLocator::new(&[r#"span[data-test="star_rating"]"#]),
            reviewer: FieldLocator::new(&[r#"span[data-test="reviewer_name"]"#]),
        },
        rating_format: RatingFormat::FirstInteger,
        date_formats: &ALL_DATE_FORMATS[..4],
        dedupe: false,
    }
}
