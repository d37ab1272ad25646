// src/crawl/robots.rs
// =============================================================================
// Reads the Disallow rules from a site's robots.txt, for display only.
//
// The crawler does NOT obey these rules. They are printed before a scan so
// the user knows what the site owner asked crawlers to avoid.
// =============================================================================

use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use super::fetch::Fetcher;
use crate::error::FetchError;

/// Fetches `/robots.txt` at the root of `base_url`'s host and returns the
/// path of every `Disallow` line.
///
/// Any non-200 answer, or any network error, gives an empty list.
pub async fn fetch_disallowed(fetcher: &Fetcher, base_url: &Url) -> Vec<String> {
    let robots_url = match base_url.join("/robots.txt") {
        Ok(url) => url,
        Err(e) => {
            warn!(url = %base_url, error = %e, "cannot build robots.txt URL");
            return Vec::new();
        }
    };

    match fetch_robots_body(fetcher, robots_url.as_str()).await {
        Ok(Some(body)) => parse_disallowed(&body),
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(url = %base_url, error = %e, "error fetching robots.txt");
            Vec::new()
        }
    }
}

// Returns the body on HTTP 200, None on any other status
async fn fetch_robots_body(fetcher: &Fetcher, url: &str) -> Result<Option<String>, FetchError> {
    let response = fetcher
        .client()
        .get(url)
        .send()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;

    if response.status() != StatusCode::OK {
        debug!(url, status = response.status().as_u16(), "no robots.txt");
        return Ok(None);
    }

    let body = response
        .text()
        .await
        .map_err(|e| FetchError::from_reqwest(url, e))?;
    Ok(Some(body))
}

/// Extracts the value after the first ':' on every line starting with
/// "Disallow". Lines without a colon are ignored.
pub fn parse_disallowed(robots_txt: &str) -> Vec<String> {
    robots_txt
        .lines()
        .filter(|line| line.starts_with("Disallow"))
        .filter_map(|line| line.split_once(':'))
        .map(|(_, path)| path.trim().to_string())
        .collect()
}
