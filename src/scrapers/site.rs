//! Per-site configuration consumed by the generic [`SiteAdapter`].
//!
//! A [`SiteConfig`] captures everything that differs between review sites:
//! how a company name becomes a listing URL, how listing pages are numbered,
//! which CSS selectors locate each review field, and how ratings are written.
//! All selectors are plain CSS as understood by the `scraper` crate.
//!
//! [`SiteAdapter`]: super::adapter::SiteAdapter

use crate::models::Source;
use once_cell::sync::Lazy;
use regex::Regex;

/// How a company name is turned into the company's review listing URL.
#[derive(Debug, Clone)]
pub enum CompanyLookup {
    /// Request a keyword search page. `path` contains a `{query}` placeholder.
    Search { path: &'static str },
    /// Probe a predictable `{slug}` URL first and fall back to a search page.
    SlugThenSearch {
        slug_path: &'static str,
        search_path: &'static str,
    },
}

/// Listing page URL scheme, relative to the resolved company URL.
#[derive(Debug, Clone)]
pub struct Pagination {
    /// Suffix for page 1 when it differs from `page_template`.
    pub first_page: Option<&'static str>,
    /// Suffix for every other page; `{page}` is replaced by the page number.
    pub page_template: &'static str,
}

impl Pagination {
    pub fn page_url(&self, company_url: &str, page: u32) -> String {
        match (page, self.first_page) {
            (1, Some(first)) => format!("{company_url}{first}"),
            _ => format!(
                "{company_url}{}",
                self.page_template.replace("{page}", &page.to_string())
            ),
        }
    }
}

/// Ordered selector fallbacks for one review field.
#[derive(Debug, Clone)]
pub struct FieldLocator {
    /// Tried in order; the first element whose text is long enough wins.
    pub selectors: &'static [&'static str],
    /// Minimum text length (in characters) for a match to count.
    pub min_text_len: usize,
}

impl FieldLocator {
    pub const fn new(selectors: &'static [&'static str]) -> Self {
        Self {
            selectors,
            min_text_len: 0,
        }
    }

    pub const fn min_len(selectors: &'static [&'static str], min_text_len: usize) -> Self {
        Self {
            selectors,
            min_text_len,
        }
    }
}

/// Locators for a review listing page.
#[derive(Debug, Clone)]
pub struct Locators {
    /// Review container fallbacks; the first selector with any match is used.
    pub containers: &'static [&'static str],
    pub title: FieldLocator,
    pub description: FieldLocator,
    pub date: FieldLocator,
    pub rating: FieldLocator,
    pub reviewer: FieldLocator,
}

static FIRST_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+").expect("integer pattern is valid"));

/// How a site writes its star rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingFormat {
    /// Number before an optional `/`, e.g. `"4.5/5"` or `"4.5"`.
    LeadingFraction,
    /// First run of digits in a label, e.g. `"Rated 4 out of 5 stars"`.
    FirstInteger,
}

impl RatingFormat {
    pub fn parse(self, text: &str) -> Option<f64> {
        let value = match self {
            RatingFormat::LeadingFraction => text.split('/').next()?.trim().parse::<f64>().ok()?,
            RatingFormat::FirstInteger => FIRST_INTEGER.find(text)?.as_str().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Everything the generic adapter needs to scrape one review site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub source: Source,
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    pub lookup: CompanyLookup,
    /// Company link fallbacks on the lookup page (matched against `a[href]`).
    pub company_links: &'static [&'static str],
    pub pagination: Pagination,
    pub locators: Locators,
    pub rating_format: RatingFormat,
    /// Absolute date formats tried after relative phrases.
    pub date_formats: &'static [&'static str],
    /// Drop repeated `(title, date)` items and untitled items, and stop
    /// paginating when a page adds nothing new.
    pub dedupe: bool,
}

impl SiteConfig {
    /// Point the configuration at a different host (e.g. a local test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Search page URL for `company`.
    pub fn search_url(&self, company: &str) -> String {
        let path = match &self.lookup {
            CompanyLookup::Search { path } => path,
            CompanyLookup::SlugThenSearch { search_path, .. } => search_path,
        };
        let encoded = urlencoding::encode(company);
        format!("{}{}", self.base_url, path.replace("{query}", &encoded))
    }

    /// Direct company URL guessed from its name, for sites that support it.
    pub fn slug_url(&self, company: &str) -> Option<String> {
        match &self.lookup {
            CompanyLookup::Search { .. } => None,
            CompanyLookup::SlugThenSearch { slug_path, .. } => {
                let slug = company.trim().to_lowercase().replace(' ', "-");
                let encoded = urlencoding::encode(&slug);
                Some(format!("{}{}", self.base_url, slug_path.replace("{slug}", &encoded)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_fraction() {
        let f = RatingFormat::LeadingFraction;
        assert_eq!(f.parse("4.5/5"), Some(4.5));
        assert_eq!(f.parse("4.5"), Some(4.5));
        assert_eq!(f.parse(" 3 / 5"), Some(3.0));
        assert_eq!(f.parse("five stars"), None);
        assert_eq!(f.parse("NaN/5"), None);
    }

    #[test]
    fn test_first_integer() {
        let f = RatingFormat::FirstInteger;
        assert_eq!(f.parse("Rated 4 out of 5 stars"), Some(4.0));
        // Only the integer part of a decimal is read.
        assert_eq!(f.parse("4.5"), Some(4.0));
        assert_eq!(f.parse("no rating"), None);
    }

    #[test]
    fn test_pagination_with_distinct_first_page() {
        let p = Pagination {
            first_page: Some(""),
            page_template: "?page={page}",
        };
        assert_eq!(p.page_url("https://x.test/review/acme", 1), "https://x.test/review/acme");
        assert_eq!(
            p.page_url("https://x.test/review/acme", 3),
            "https://x.test/review/acme?page=3"
        );
    }

    #[test]
    fn test_pagination_uniform_template() {
        let p = Pagination {
            first_page: None,
            page_template: "/reviews?page={page}",
        };
        assert_eq!(p.page_url("https://x.test/p/acme", 1), "https://x.test/p/acme/reviews?page=1");
    }
}
