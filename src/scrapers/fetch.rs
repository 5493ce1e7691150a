//! HTTP access for the site adapters.
//!
//! Adapters never talk to `reqwest` directly; they go through [`PageFetcher`]
//! so pagination and extraction can be exercised against canned pages.

use crate::config::ScrapeSettings;
use crate::error::FetchError;
use reqwest::{Client, StatusCode};
use std::time::Instant;
use tracing::{debug, instrument};

/// Source of raw HTML pages.
pub trait PageFetcher {
    /// GET `url` and return the body of a successful (2xx) response.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;

    /// HEAD `url`, following redirects. Returns the final URL when the
    /// response is `200 OK` and `None` for any other status.
    async fn probe(&self, url: &str) -> Result<Option<String>, FetchError>;
}

/// [`PageFetcher`] backed by a `reqwest` client with a fixed timeout and
/// User-Agent.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying client cannot be built.
    pub fn new(settings: &ScrapeSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!(%url, status = status.as_u16(), "Non-success status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }

    #[instrument(level = "debug", skip(self))]
    async fn probe(&self, url: &str) -> Result<Option<String>, FetchError> {
        let response = self.client.head(url).send().await?;
        if response.status() == StatusCode::OK {
            Ok(Some(response.url().to_string()))
        } else {
            debug!(status = response.status().as_u16(), "Probe did not resolve");
            Ok(None)
        }
    }
}
