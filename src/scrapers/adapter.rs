//! The generic review-site adapter.
//!
//! One [`SiteAdapter`] type serves every site; the differences live in its
//! [`SiteConfig`]. A run has three phases:
//!
//! 1. **Resolve**: turn the company name into its listing URL
//! 2. **Paginate**: walk listing pages until one comes back empty, a fetch
//!    fails, the review cap is hit, or (for deduplicating sites) a page adds
//!    nothing new
//! 3. **Filter**: drop reviews dated outside the requested range
//!
//! Page and item failures never escape a run. A failed page ends pagination
//! with whatever was already collected, and a broken item is skipped.

use super::fetch::PageFetcher;
use super::site::{FieldLocator, RatingFormat, SiteConfig};
use crate::config::ScrapeSettings;
use crate::dates::normalize_with_formats;
use crate::error::{AdapterError, ExtractionError};
use crate::filter::filter_by_date;
use crate::models::{
    ANONYMOUS, CANONICAL_DATE_FORMAT, DateRange, NO_DESCRIPTION, NO_TITLE, Review,
};
use crate::utils::{element_text, truncate_for_log};
use chrono::{Local, NaiveDateTime};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Scrapes one review site through a [`PageFetcher`].
#[derive(Debug)]
pub struct SiteAdapter<F> {
    site: SiteConfig,
    fetcher: F,
    settings: ScrapeSettings,
    reference_time: Option<NaiveDateTime>,
}

/// Fields pulled out of one review container, before date normalization.
#[derive(Debug)]
struct RawReview {
    title: String,
    description: String,
    date_text: Option<String>,
    rating: Option<f64>,
    reviewer_name: String,
}

struct CompiledField {
    selectors: Vec<Selector>,
    min_text_len: usize,
}

/// Selectors parsed once per run.
struct CompiledSite {
    base: Url,
    company_links: Vec<Selector>,
    containers: Vec<Selector>,
    title: CompiledField,
    description: CompiledField,
    date: CompiledField,
    rating: CompiledField,
    rating_format: RatingFormat,
    reviewer: CompiledField,
}

struct ListingPage {
    containers: usize,
    items: Vec<Result<RawReview, ExtractionError>>,
}

impl<F: PageFetcher> SiteAdapter<F> {
    pub fn new(site: SiteConfig, fetcher: F, settings: ScrapeSettings) -> Self {
        Self {
            site,
            fetcher,
            settings,
            reference_time: None,
        }
    }

    /// Pin the "now" that relative dates ("3 days ago") are computed from.
    /// Without this, the local time at the start of each run is used.
    pub fn with_reference_time(mut self, reference_time: NaiveDateTime) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    /// Fetch every reachable review for `company` and keep those dated in `range`.
    ///
    /// # Errors
    ///
    /// - [`AdapterError::CompanyNotFound`]: no company link on the lookup page.
    /// - [`AdapterError::Lookup`]: the lookup request itself failed.
    /// - [`AdapterError::InvalidLocator`] / [`AdapterError::InvalidBaseUrl`]:
    ///   the site configuration is broken.
    ///
    /// Listing-page and item failures are not errors; they shorten the result.
    #[instrument(level = "info", skip(self, range), fields(source = %self.site.source))]
    pub async fn fetch_reviews(
        &self,
        company: &str,
        range: &DateRange,
    ) -> Result<Vec<Review>, AdapterError> {
        let compiled = self.compile()?;
        let reference = self
            .reference_time
            .unwrap_or_else(|| Local::now().naive_local());

        let company_url = self.resolve_company_url(&compiled, company).await?;
        info!(%company_url, "Found company URL");

        let collected = self.collect_reviews(&compiled, &company_url, reference).await;
        let scraped = collected.len();
        let reviews = filter_by_date(collected, range);
        info!(scraped, in_range = reviews.len(), "Finished scraping source");
        Ok(reviews)
    }

    async fn resolve_company_url(
        &self,
        compiled: &CompiledSite,
        company: &str,
    ) -> Result<String, AdapterError> {
        let source = self.site.source;

        if let Some(slug_url) = self.site.slug_url(company) {
            match self.fetcher.probe(&slug_url).await {
                Ok(Some(resolved)) => return Ok(resolved),
                Ok(None) => debug!(%slug_url, "Slug URL did not resolve; trying search"),
                Err(e) => warn!(%slug_url, error = %e, "Slug probe failed; trying search"),
            }
        }

        let search_url = self.site.search_url(company);
        let body = self
            .fetcher
            .fetch(&search_url)
            .await
            .map_err(|error| AdapterError::Lookup { site: source, error })?;

        match first_company_link(compiled, &body) {
            Some(url) => Ok(url),
            None => {
                warn!(%search_url, company, "No company link on lookup page");
                Err(AdapterError::CompanyNotFound {
                    company: company.to_string(),
                    site: source,
                })
            }
        }
    }

    async fn collect_reviews(
        &self,
        compiled: &CompiledSite,
        company_url: &str,
        reference: NaiveDateTime,
    ) -> Vec<Review> {
        let max_reviews = self.settings.max_reviews;
        let mut reviews: Vec<Review> = Vec::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut page = 1u32;

        while reviews.len() < max_reviews && page <= self.settings.max_pages {
            let page_url = self.site.pagination.page_url(company_url, page);
            let body = match self.fetcher.fetch(&page_url).await {
                Ok(body) => body,
                Err(e) => {
                    warn!(page, url = %page_url, error = %e, "Listing page fetch failed; stopping pagination");
                    break;
                }
            };

            let listing = parse_listing(compiled, &body);
            if listing.containers == 0 {
                info!(page, "No reviews found on page; stopping pagination");
                debug!(body = %truncate_for_log(&body, 300), "Empty listing page");
                break;
            }

            let mut added = 0usize;
            for (index, item) in listing.items.into_iter().enumerate() {
                if reviews.len() >= max_reviews {
                    break;
                }
                let raw = match item {
                    Ok(raw) => raw,
                    Err(e) => {
                        warn!(page, index, error = %e, "Skipping review item");
                        continue;
                    }
                };

                let review = self.build_review(raw, company_url, reference);
                if self.site.dedupe {
                    if review.title == NO_TITLE {
                        debug!(page, index, "Skipping untitled review");
                        continue;
                    }
                    if !seen.insert((review.title.clone(), review.date.clone())) {
                        debug!(page, index, title = %review.title, "Skipping duplicate review");
                        continue;
                    }
                }
                reviews.push(review);
                added += 1;
            }

            debug!(page, containers = listing.containers, added, total = reviews.len(), "Parsed listing page");

            if self.site.dedupe && added == 0 {
                info!(page, "No new reviews found; stopping pagination");
                break;
            }

            page += 1;
            if reviews.len() < max_reviews && page <= self.settings.max_pages {
                sleep(self.settings.page_delay).await;
            }
        }

        reviews
    }

    fn build_review(&self, raw: RawReview, company_url: &str, reference: NaiveDateTime) -> Review {
        let date = match raw.date_text {
            Some(text) => normalize_with_formats(&text, reference, self.site.date_formats),
            None => reference.format(CANONICAL_DATE_FORMAT).to_string(),
        };
        Review {
            title: raw.title,
            description: raw.description,
            date,
            rating: raw.rating,
            reviewer_name: raw.reviewer_name,
            source: self.site.source,
            url: company_url.to_string(),
        }
    }

    fn compile(&self) -> Result<CompiledSite, AdapterError> {
        let site = &self.site;
        let base = Url::parse(&site.base_url).map_err(|e| AdapterError::InvalidBaseUrl {
            site: site.source,
            url: site.base_url.clone(),
            reason: e.to_string(),
        })?;
        let compile_field = |field: &FieldLocator| -> Result<CompiledField, AdapterError> {
            Ok(CompiledField {
                selectors: compile_all(site, field.selectors)?,
                min_text_len: field.min_text_len,
            })
        };
        let locators = &site.locators;
        Ok(CompiledSite {
            base,
            company_links: compile_all(site, site.company_links)?,
            containers: compile_all(site, locators.containers)?,
            title: compile_field(&locators.title)?,
            description: compile_field(&locators.description)?,
            date: compile_field(&locators.date)?,
            rating: compile_field(&locators.rating)?,
            rating_format: site.rating_format,
            reviewer: compile_field(&locators.reviewer)?,
        })
    }
}

fn compile_all(site: &SiteConfig, selectors: &[&str]) -> Result<Vec<Selector>, AdapterError> {
    selectors
        .iter()
        .map(|css| {
            Selector::parse(css).map_err(|e| AdapterError::InvalidLocator {
                site: site.source,
                selector: (*css).to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// First `href` on the lookup page matched by the company link fallbacks,
/// resolved against the site's base URL.
fn first_company_link(compiled: &CompiledSite, body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    compiled.company_links.iter().find_map(|selector| {
        document
            .select(selector)
            .filter_map(|a| a.value().attr("href"))
            .find_map(|href| compiled.base.join(href).ok())
            .map(|url| url.to_string())
    })
}

fn parse_listing(compiled: &CompiledSite, body: &str) -> ListingPage {
    let document = Html::parse_document(body);
    let containers: Vec<ElementRef<'_>> = compiled
        .containers
        .iter()
        .map(|selector| document.select(selector).collect::<Vec<_>>())
        .find(|found| !found.is_empty())
        .unwrap_or_default();

    ListingPage {
        containers: containers.len(),
        items: containers
            .into_iter()
            .map(|container| extract_item(compiled, container))
            .collect(),
    }
}

fn extract_item(
    compiled: &CompiledSite,
    container: ElementRef<'_>,
) -> Result<RawReview, ExtractionError> {
    if container.text().all(|t| t.trim().is_empty()) {
        return Err(ExtractionError::EmptyContainer);
    }

    let rating = field_text(container, &compiled.rating).and_then(|text| {
        let parsed = compiled.rating_format.parse(&text);
        if parsed.is_none() {
            debug!(text = %text, "Unreadable rating");
        }
        parsed
    });

    Ok(RawReview {
        title: field_text(container, &compiled.title).unwrap_or_else(|| NO_TITLE.to_string()),
        description: field_text(container, &compiled.description)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        date_text: field_text(container, &compiled.date),
        rating,
        reviewer_name: field_text(container, &compiled.reviewer)
            .unwrap_or_else(|| ANONYMOUS.to_string()),
    })
}

fn field_text(container: ElementRef<'_>, field: &CompiledField) -> Option<String> {
    field.selectors.iter().find_map(|selector| {
        container
            .select(selector)
            .map(element_text)
            .find(|text| text.chars().count() >= field.min_text_len)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::models::Source;
    use crate::scrapers::{capterra, g2, trustpilot};
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Serves canned pages by exact URL and records every request.
    #[derive(Default)]
    struct StubFetcher {
        pages: HashMap<String, String>,
        probes: HashMap<String, String>,
        calls: RefCell<Vec<String>>,
    }

    impl StubFetcher {
        fn page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
            self.pages.insert(url.into(), body.into());
            self
        }

        fn probe_resolves(mut self, url: impl Into<String>, resolved: impl Into<String>) -> Self {
            self.probes.insert(url.into(), resolved.into());
            self
        }

        fn calls_containing(&self, needle: &str) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|call| !call.starts_with("HEAD ") && call.contains(needle))
                .count()
        }
    }

    impl PageFetcher for StubFetcher {
        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.calls.borrow_mut().push(url.to_string());
            self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
                status: 404,
                url: url.to_string(),
            })
        }

        async fn probe(&self, url: &str) -> Result<Option<String>, FetchError> {
            self.calls.borrow_mut().push(format!("HEAD {url}"));
            Ok(self.probes.get(url).cloned())
        }
    }

    const G2_BASE: &str = "https://g2.test";
    const G2_SEARCH: &str = "https://g2.test/products?utf8=%E2%9C%93&search=Acme";
    const G2_PRODUCT_LINK: &str = r#"<a data-test="product-link" href="/products/acme">Acme</a>"#;

    fn settings() -> ScrapeSettings {
        ScrapeSettings {
            page_delay: Duration::ZERO,
            ..ScrapeSettings::default()
        }
    }

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 7, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn year_2023() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap(),
        )
        .unwrap()
    }

    fn html(body: &str) -> String {
        format!("<html><body>{body}</body></html>")
    }

    fn g2_card(title: &str, date: &str) -> String {
        format!(
            r#"<div data-test="review-card">
                 <h3>{title}</h3>
                 <p data-test="review-body">Body of {title}</p>
                 <time>{date}</time>
                 <span data-test="star-rating">4.5/5</span>
                 <div data-test="reviewer-name">Jane D.</div>
               </div>"#
        )
    }

    fn g2_page(page: u32, cards: usize) -> String {
        let cards: String = (0..cards)
            .map(|i| g2_card(&format!("Review {page}-{i}"), "June 1, 2023"))
            .collect();
        html(&cards)
    }

    fn g2_listing(page: u32) -> String {
        format!("{G2_BASE}/products/acme/reviews?page={page}")
    }

    fn g2_adapter(fetcher: StubFetcher, settings: ScrapeSettings) -> SiteAdapter<StubFetcher> {
        SiteAdapter::new(g2::site().with_base_url(G2_BASE), fetcher, settings)
            .with_reference_time(reference())
    }

    #[tokio::test]
    async fn test_stops_after_first_page_without_containers() {
        let fetcher = StubFetcher::default()
            .page(G2_SEARCH, html(G2_PRODUCT_LINK))
            .page(g2_listing(1), g2_page(1, 2))
            .page(g2_listing(2), g2_page(2, 2))
            .page(g2_listing(3), g2_page(3, 2))
            .page(g2_listing(4), html("<p>No reviews yet</p>"))
            .page(g2_listing(5), g2_page(5, 2));
        let adapter = g2_adapter(fetcher, settings());

        let reviews = adapter.fetch_reviews("Acme", &year_2023()).await.unwrap();

        assert_eq!(reviews.len(), 6);
        assert_eq!(adapter.fetcher.calls_containing("/reviews?page="), 4);
        let first = &reviews[0];
        assert_eq!(first.title, "Review 1-0");
        assert_eq!(first.description, "Body of Review 1-0");
        assert_eq!(first.date, "2023-06-01");
        assert_eq!(first.rating, Some(4.5));
        assert_eq!(first.reviewer_name, "Jane D.");
        assert_eq!(first.source, Source::G2);
        assert!(reviews.iter().all(|r| r.url == "https://g2.test/products/acme"));
    }

    #[tokio::test]
    async fn test_never_returns_more_than_the_review_cap() {
        let mut fetcher = StubFetcher::default().page(G2_SEARCH, html(G2_PRODUCT_LINK));
        for page in 1..=5 {
            fetcher = fetcher.page(g2_listing(page), g2_page(page, 2));
        }
        let adapter = g2_adapter(
            fetcher,
            ScrapeSettings {
                max_reviews: 5,
                ..settings()
            },
        );

        let reviews = adapter.fetch_reviews("Acme", &year_2023()).await.unwrap();

        assert_eq!(reviews.len(), 5);
        assert_eq!(adapter.fetcher.calls_containing("/reviews?page="), 3);
    }

    #[tokio::test]
    async fn test_page_limit_bounds_pagination() {
        let mut fetcher = StubFetcher::default().page(G2_SEARCH, html(G2_PRODUCT_LINK));
        for page in 1..=3 {
            fetcher = fetcher.page(g2_listing(page), g2_page(page, 2));
        }
        let adapter = g2_adapter(
            fetcher,
            ScrapeSettings {
                max_pages: 2,
                ..settings()
            },
        );

        let reviews = adapter.fetch_reviews("Acme", &year_2023()).await.unwrap();

        assert_eq!(reviews.len(), 4);
        assert_eq!(adapter.fetcher.calls_containing("/reviews?page="), 2);
    }

    #[tokio::test]
    async fn test_failed_page_fetch_keeps_reviews_collected_so_far() {
        let fetcher = StubFetcher::default()
            .page(G2_SEARCH, html(G2_PRODUCT_LINK))
            .page(g2_listing(1), g2_page(1, 2));
        let adapter = g2_adapter(fetcher, settings());

        let reviews = adapter.fetch_reviews("Acme", &year_2023()).await.unwrap();

        assert_eq!(reviews.len(), 2);
        assert_eq!(adapter.fetcher.calls_containing("/reviews?page="), 2);
    }

    #[tokio::test]
    async fn test_filters_by_range_but_keeps_unparseable_dates() {
        let cards = [
            g2_card("In range", "June 1, 2023"),
            g2_card("Too old", "May 1, 2022"),
            g2_card("Vague", "a while back"),
            g2_card("Recent", "2 weeks ago"),
        ]
        .concat();
        let fetcher = StubFetcher::default()
            .page(G2_SEARCH, html(G2_PRODUCT_LINK))
            .page(g2_listing(1), html(&cards));
        let adapter = g2_adapter(fetcher, settings());

        let reviews = adapter.fetch_reviews("Acme", &year_2023()).await.unwrap();

        let dates: Vec<(&str, &str)> = reviews
            .iter()
            .map(|r| (r.title.as_str(), r.date.as_str()))
            .collect();
        assert_eq!(
            dates,
            vec![
                ("In range", "2023-06-01"),
                ("Vague", "a while back"),
                ("Recent", "2023-06-17"),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_fields_fall_back_and_empty_containers_are_skipped() {
        let cards = r#"
            <div data-test="review-card"><span>Just some text</span></div>
            <div data-test="review-card">   </div>
            <div data-test="review-card"><h3>Rated oddly</h3><span data-test="star-rating">n/a</span></div>
        "#;
        let fetcher = StubFetcher::default()
            .page(G2_SEARCH, html(G2_PRODUCT_LINK))
            .page(g2_listing(1), html(cards));
        let adapter = g2_adapter(fetcher, settings());

        let reviews = adapter.fetch_reviews("Acme", &year_2023()).await.unwrap();

        assert_eq!(reviews.len(), 2);
        let bare = &reviews[0];
        assert_eq!(bare.title, NO_TITLE);
        assert_eq!(bare.description, NO_DESCRIPTION);
        assert_eq!(bare.reviewer_name, ANONYMOUS);
        assert_eq!(bare.rating, None);
        // No date element: the review is dated at the reference time.
        assert_eq!(bare.date, "2023-07-01");
        assert_eq!(reviews[1].title, "Rated oddly");
        assert_eq!(reviews[1].rating, None);
    }

    #[tokio::test]
    async fn test_unresolvable_company_is_an_error_without_listing_fetches() {
        let fetcher = StubFetcher::default().page(G2_SEARCH, html("<p>No results</p>"));
        let adapter = g2_adapter(fetcher, settings());

        let result = adapter.fetch_reviews("Acme", &year_2023()).await;

        assert!(
            matches!(result, Err(AdapterError::CompanyNotFound { site: Source::G2, .. })),
            "expected CompanyNotFound, got: {result:?}"
        );
        assert_eq!(adapter.fetcher.calls_containing("/reviews?page="), 0);
    }

    #[tokio::test]
    async fn test_failed_lookup_request_is_a_lookup_error() {
        let adapter = g2_adapter(StubFetcher::default(), settings());

        let result = adapter.fetch_reviews("Acme", &year_2023()).await;

        assert!(matches!(result, Err(AdapterError::Lookup { .. })));
    }

    #[tokio::test]
    async fn test_falls_back_to_generic_product_links() {
        let fetcher = StubFetcher::default()
            .page(G2_SEARCH, html(r#"<a href="/categories/crm">CRM</a><a href="/products/acme-suite">Acme Suite</a>"#))
            .page(
                format!("{G2_BASE}/products/acme-suite/reviews?page=1"),
                g2_page(1, 1),
            );
        let adapter = g2_adapter(fetcher, settings());

        let reviews = adapter.fetch_reviews("Acme", &year_2023()).await.unwrap();

        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].url, "https://g2.test/products/acme-suite");
    }

    #[tokio::test]
    async fn test_capterra_takes_first_long_paragraph_and_integer_rating() {
        let search = "https://capterra.test/search?q=Acme";
        let product = "https://capterra.test/p/42/Acme/";
        let card = r#"
            <div data-test="ReviewCard">
              <h3>Good value</h3>
              <p>Short</p>
              <p>Pricing is fair and support answers fast.</p>
              <span data-test="review_date">06/15/2023</span>
              <span data-test="star_rating">4.5 stars</span>
              <span data-test="reviewer_name">Sam</span>
            </div>"#;
        let fetcher = StubFetcher::default()
            .page(search, html(r#"<a data-test="product_result_link" href="/p/42/Acme/">Acme</a>"#))
            .page(format!("{product}#reviews"), html(card));
        let adapter = SiteAdapter::new(
            capterra::site().with_base_url("https://capterra.test"),
            fetcher,
            settings(),
        )
        .with_reference_time(reference());

        let reviews = adapter.fetch_reviews("Acme", &year_2023()).await.unwrap();

        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].description, "Pricing is fair and support answers fast.");
        assert_eq!(reviews[0].date, "2023-06-15");
        assert_eq!(reviews[0].rating, Some(4.0));
        assert_eq!(reviews[0].url, product);
        // Page 2 is not served, so pagination ended on the fetch failure.
        assert_eq!(adapter.fetcher.calls_containing("page=2"), 1);
    }

    fn tp_article(id: u32, title: &str, date: &str) -> String {
        format!(
            r#"<article data-review-id="{id}">
                 <h2 class="styles_reviewTitle__abc">{title}</h2>
                 <p class="styles_reviewBody__def">Body {id}</p>
                 <span class="styles_reviewDate__ghi">{date}</span>
                 <span class="star-rating">Rated 4 out of 5 stars</span>
                 <span class="consumer-reviewer">Reviewer {id}</span>
               </article>"#
        )
    }

    #[tokio::test]
    async fn test_trustpilot_dedupes_and_stops_when_a_page_adds_nothing() {
        let company = "https://tp.test/review/acme";
        let page_one = html(&[
            tp_article(1, "Great support", "March 3, 2023"),
            tp_article(2, "Slow shipping", "14/03/2023"),
            r#"<article data-review-id="3"><p>Untitled rant</p></article>"#.to_string(),
            tp_article(4, "Great support", "March 3, 2023"),
        ]
        .concat());
        let page_two = html(&[
            tp_article(1, "Great support", "March 3, 2023"),
            tp_article(2, "Slow shipping", "14/03/2023"),
        ]
        .concat());
        let fetcher = StubFetcher::default()
            .probe_resolves(company, company)
            .page(company, page_one)
            .page(format!("{company}?page=2"), page_two)
            .page(format!("{company}?page=3"), html(&tp_article(9, "Never reached", "March 9, 2023")));
        let adapter = SiteAdapter::new(
            trustpilot::site().with_base_url("https://tp.test"),
            fetcher,
            settings(),
        )
        .with_reference_time(reference());

        let reviews = adapter.fetch_reviews("Acme", &year_2023()).await.unwrap();

        let titles: Vec<&str> = reviews.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Great support", "Slow shipping"]);
        assert_eq!(reviews[1].date, "2023-03-14");
        assert_eq!(reviews[0].rating, Some(4.0));
        assert_eq!(reviews[0].reviewer_name, "Reviewer 1");
        assert_eq!(adapter.fetcher.calls_containing(company), 2);
        assert_eq!(adapter.fetcher.calls_containing("/search"), 0);
    }

    #[tokio::test]
    async fn test_trustpilot_falls_back_to_search_when_slug_misses() {
        let fetcher = StubFetcher::default()
            .page(
                "https://tp.test/search?query=Acme%20Corp",
                html(r#"<a href="/review/acme.example">Acme Corp</a>"#),
            )
            .page(
                "https://tp.test/review/acme.example",
                html(&tp_article(1, "Fine", "2023-05-05")),
            )
            .page(
                "https://tp.test/review/acme.example?page=2",
                html("<main>End</main>"),
            );
        let adapter = SiteAdapter::new(
            trustpilot::site().with_base_url("https://tp.test"),
            fetcher,
            settings(),
        )
        .with_reference_time(reference());

        let reviews = adapter.fetch_reviews("Acme Corp", &year_2023()).await.unwrap();

        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].url, "https://tp.test/review/acme.example");
        assert!(
            adapter
                .fetcher
                .calls
                .borrow()
                .contains(&"HEAD https://tp.test/review/acme-corp".to_string())
        );
    }

    #[tokio::test]
    async fn test_invalid_locator_is_reported_before_any_request() {
        let mut site = g2::site().with_base_url(G2_BASE);
        site.locators.containers = &["div[[broken"];
        let adapter = SiteAdapter::new(site, StubFetcher::default(), settings());

        let result = adapter.fetch_reviews("Acme", &year_2023()).await;

        assert!(matches!(result, Err(AdapterError::InvalidLocator { .. })));
        assert!(adapter.fetcher.calls.borrow().is_empty());
    }
}
