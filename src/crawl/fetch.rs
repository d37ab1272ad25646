// src/crawl/fetch.rs
// =============================================================================
// Fetches a single page over HTTP.
//
// One GET per call. Redirects follow reqwest's default policy. Only
// responses whose Content-Type contains "text/html" hand their body back;
// everything else is reported as skipped, even when the request worked.
//
// Note that the status code is kept for HTML pages of ANY status, so a
// 404 page with links in it is still parsed by the crawler.
// =============================================================================

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use crate::config::CrawlConfig;
use crate::error::FetchError;

/// An HTML page that came back with a non-empty body.
#[derive(Debug, Clone)]
pub struct Page {
    pub status: u16,
    pub body: String,
}

/// What a successful request produced.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// HTML with a body worth parsing
    Page(Page),
    /// Not HTML, or an HTML response with an empty body.
    /// The status is kept for logging only; nothing is recorded for it.
    Skipped { status: u16 },
}

impl FetchOutcome {
    /// The (body, status) pair the crawler works with.
    /// Both are absent unless this is an HTML page.
    pub fn into_parts(self) -> (Option<String>, Option<u16>) {
        match self {
            FetchOutcome::Page(page) => (Some(page.body), Some(page.status)),
            FetchOutcome::Skipped { .. } => (None, None),
        }
    }
}

/// A reusable HTTP fetcher. Cheap to clone (reqwest::Client is an Arc inside).
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    /// Builds the HTTP client with the configured timeout and user agent.
    pub fn new(config: &CrawlConfig) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Issues one GET and classifies the response.
    pub async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status().as_u16();
        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("text/html"))
            .unwrap_or(false);

        if !is_html {
            debug!(url, status, "skipping non-HTML response");
            return Ok(FetchOutcome::Skipped { status });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        if body.is_empty() {
            debug!(url, status, "skipping empty HTML body");
            return Ok(FetchOutcome::Skipped { status });
        }

        debug!(url, status, bytes = body.len(), "fetched page");
        Ok(FetchOutcome::Page(Page { status, body }))
    }
}
