// src/error.rs
// =============================================================================
// Typed errors for the library-style parts of the tool.
//
// The command handlers in main.rs use anyhow::Result and attach context.
// The modules underneath return these enums instead, so callers can tell
// a timeout from a refused connection, or a bad port list from a bad URL.
//
// Rust concepts:
// - thiserror: derive macro that implements std::error::Error and Display
// - #[from]: automatic conversion so the ? operator works across error types
// =============================================================================

use thiserror::Error;

/// A single page fetch failed before any response could be used.
///
/// These never abort a crawl. The frontier logs them and moves on.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Classifies a reqwest error for the given URL.
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database handle poisoned by a panicking writer")]
    Poisoned,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid origin URL '{url}': {reason}")]
    InvalidOrigin { url: String, reason: String },

    #[error("origin URL has no host: {0}")]
    MissingHost(String),

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PortSpecError {
    #[error("'{0}' is not a valid port number")]
    InvalidPort(String),

    #[error("no ports given")]
    Empty,
}
