// src/config.rs
// =============================================================================
// Crawl configuration.
//
// A CrawlConfig is built once from the command line (or the interactive
// menu) and never changes while a crawl runs. Validation happens here so
// the crawler itself can assume a parseable origin with a host.
// =============================================================================

use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Default ceiling on discovered links, matching the interactive prompt.
pub const DEFAULT_MAX_LINKS: usize = 1000;
/// Default number of BFS waves. 1 = fetch only the origin page.
pub const DEFAULT_MAX_DEPTH: usize = 1;
/// Maximum fetches in flight within one wave.
pub const DEFAULT_CONCURRENCY: usize = 50;
/// Per-request timeout in seconds. Every wave must be able to finish.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const DEFAULT_USER_AGENT: &str = concat!("nlink/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub origin: Url,
    pub max_depth: usize,
    pub max_links: usize,
    pub concurrency: usize,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl CrawlConfig {
    /// Parses the origin and applies the default tuning.
    ///
    /// `max_depth = 0` or `max_links = 0` are accepted; they simply
    /// produce a crawl that fetches nothing.
    pub fn new(origin: &str, max_depth: usize, max_links: usize) -> Result<Self, ConfigError> {
        let origin_url = Url::parse(origin.trim()).map_err(|e| ConfigError::InvalidOrigin {
            url: origin.to_string(),
            reason: e.to_string(),
        })?;

        match origin_url.host_str() {
            Some(host) if !host.is_empty() => {}
            _ => return Err(ConfigError::MissingHost(origin.to_string())),
        }

        Ok(Self {
            origin: origin_url,
            max_depth,
            max_links,
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Result<Self, ConfigError> {
        if concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        self.concurrency = concurrency;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The origin exactly as the classifier compares it.
    pub fn origin_str(&self) -> &str {
        self.origin.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applies_defaults() {
        let config = CrawlConfig::new("https://example.com", 2, 50).unwrap();
        assert_eq!(config.origin_str(), "https://example.com/");
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.max_links, 50);
        assert_eq!(config.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_rejects_unparseable_origin() {
        let err = CrawlConfig::new("not a url", 1, 10).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOrigin { .. }));
    }

    #[test]
    fn test_rejects_origin_without_host() {
        let err = CrawlConfig::new("mailto:someone@example.com", 1, 10).unwrap_err();
        assert_eq!(
            err,
            ConfigError::MissingHost("mailto:someone@example.com".to_string())
        );
    }

    #[test]
    fn test_zero_budgets_are_allowed() {
        assert!(CrawlConfig::new("http://example.test/", 0, 0).is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = CrawlConfig::new("http://example.test/", 1, 10).unwrap();
        assert_eq!(
            config.with_concurrency(0).unwrap_err(),
            ConfigError::ZeroConcurrency
        );
    }

    #[test]
    fn test_builders() {
        let config = CrawlConfig::new("http://example.test/", 1, 10)
            .unwrap()
            .with_concurrency(4)
            .unwrap()
            .with_timeout(Duration::from_millis(250))
            .with_user_agent("test-agent");
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.request_timeout, Duration::from_millis(250));
        assert_eq!(config.user_agent, "test-agent");
    }
}
