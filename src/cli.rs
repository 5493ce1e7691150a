//! Command-line interface definitions for the review scraper.
//!
//! Arguments are parsed with `clap` and then validated into a
//! [`ScrapeRequest`] before any network activity happens. Scrape limits can
//! also be provided through `REVIEW_SCRAPER_*` environment variables.

use crate::config::{DEFAULT_USER_AGENT, ScrapeSettings};
use crate::error::InputValidationError;
use crate::models::{DateRange, SourceSelection};
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for the review scraper.
///
/// # Examples
///
/// ```sh
/// review_scraper --company "Slack" --start-date 2023-01-01 --end-date 2023-12-31 --source g2
/// review_scraper --company "Monday" --start-date 2023-06-01 --end-date 2023-12-31
/// review_scraper --company "Salesforce" --start-date 2023-01-01 --end-date 2023-06-30 \
///     --source trustpilot --output results.json
/// ```
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Scrape product reviews from G2, Capterra, and Trustpilot"
)]
pub struct Cli {
    /// Company name (e.g. "Slack", "Monday", "Salesforce")
    #[arg(long)]
    pub company: String,

    /// Start date in YYYY-MM-DD format
    #[arg(long)]
    pub start_date: String,

    /// End date in YYYY-MM-DD format
    #[arg(long)]
    pub end_date: String,

    /// Source to scrape: g2, capterra, trustpilot, or all
    #[arg(long, default_value = "all")]
    pub source: String,

    /// Output file path
    #[arg(short, long, env = "REVIEW_SCRAPER_OUTPUT", default_value = "output/reviews.json")]
    pub output: PathBuf,

    /// Maximum reviews collected per source
    #[arg(long, env = "REVIEW_SCRAPER_MAX_REVIEWS", default_value_t = 100)]
    pub max_reviews: usize,

    /// Maximum listing pages requested per source
    #[arg(long, env = "REVIEW_SCRAPER_MAX_PAGES", default_value_t = 50)]
    pub max_pages: u32,

    /// Per-request timeout in seconds
    #[arg(long, env = "REVIEW_SCRAPER_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Delay between listing pages in seconds
    #[arg(long, env = "REVIEW_SCRAPER_DELAY_SECS", default_value_t = 2)]
    pub delay_secs: u64,

    /// User-Agent header sent with every request
    #[arg(long, env = "REVIEW_SCRAPER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

/// Validated scrape input.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeRequest {
    pub company: String,
    pub range: DateRange,
    pub selection: SourceSelection,
    pub output: PathBuf,
}

impl Cli {
    /// Validate the raw arguments.
    ///
    /// # Errors
    ///
    /// Returns an [`InputValidationError`] for an empty company name, a date
    /// not in `YYYY-MM-DD` form, a start date after the end date, or an
    /// unknown source.
    pub fn request(&self) -> Result<ScrapeRequest, InputValidationError> {
        let company = self.company.trim();
        if company.is_empty() {
            return Err(InputValidationError::EmptyCompany);
        }
        let start = parse_input_date("start date", &self.start_date)?;
        let end = parse_input_date("end date", &self.end_date)?;
        let range = DateRange::new(start, end)?;
        let selection = self.source.parse::<SourceSelection>()?;

        Ok(ScrapeRequest {
            company: company.to_string(),
            range,
            selection,
            output: self.output.clone(),
        })
    }

    pub fn settings(&self) -> ScrapeSettings {
        ScrapeSettings {
            max_reviews: self.max_reviews,
            max_pages: self.max_pages,
            request_timeout: Duration::from_secs(self.timeout_secs),
            page_delay: Duration::from_secs(self.delay_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

fn parse_input_date(field: &'static str, value: &str) -> Result<NaiveDate, InputValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        InputValidationError::InvalidDate {
            field,
            value: value.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Source;

    fn parse(extra: &[&str]) -> Cli {
        let mut args = vec![
            "review_scraper",
            "--company",
            "Slack",
            "--start-date",
            "2023-01-01",
            "--end-date",
            "2023-12-31",
        ];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    #[test]
    fn test_cli_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.source, "all");
        assert_eq!(cli.output, PathBuf::from("output/reviews.json"));

        let settings = cli.settings();
        assert_eq!(settings.max_reviews, 100);
        assert_eq!(settings.page_delay, Duration::from_secs(2));
        assert_eq!(settings.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_valid_request() {
        let request = parse(&["--source", "Trustpilot", "-o", "/tmp/out.json"])
            .request()
            .unwrap();
        assert_eq!(request.company, "Slack");
        assert_eq!(request.selection, SourceSelection::One(Source::Trustpilot));
        assert_eq!(request.range.start(), NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(request.output, PathBuf::from("/tmp/out.json"));
    }

    #[test]
    fn test_company_is_trimmed_and_must_not_be_blank() {
        let mut cli = parse(&[]);
        cli.company = "  Slack ".to_string();
        assert_eq!(cli.request().unwrap().company, "Slack");

        cli.company = "   ".to_string();
        assert!(matches!(cli.request(), Err(InputValidationError::EmptyCompany)));
    }

    #[test]
    fn test_bad_date_format_is_rejected() {
        let mut cli = parse(&[]);
        cli.start_date = "01/01/2023".to_string();
        assert!(matches!(
            cli.request(),
            Err(InputValidationError::InvalidDate { field: "start date", .. })
        ));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let mut cli = parse(&[]);
        cli.start_date = "2024-01-01".to_string();
        assert!(matches!(
            cli.request(),
            Err(InputValidationError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_unknown_source_is_rejected() {
        let cli = parse(&["--source", "yelp"]);
        assert!(matches!(
            cli.request(),
            Err(InputValidationError::UnknownSource(_))
        ));
    }
}
