// src/crawl/classify.rs
// =============================================================================
// Pure URL checks used by the crawler to decide what to follow.
//
// - is_valid_url: does the URL have an authority (a host)?
// - is_internal: does the URL live on the same host as the crawl origin?
//
// Both functions only parse strings. No DNS, no network, no state.
//
// Known limitation: hosts are compared exactly as parsed. The url crate
// lowercases hostnames and drops default ports, but "example.com" and
// "www.example.com" are still two different hosts.
// =============================================================================

use std::fmt::Write;
use url::Url;

/// Returns true if the URL parses and has a non-empty host.
///
/// Examples:
///   "https://example.com/docs"  -> true
///   "mailto:someone@example.com" -> false (no host)
///   "/relative/path"             -> false (not absolute)
pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url)
        .ok()
        .as_ref()
        .and_then(authority)
        .is_some()
}

/// Returns true if `url` has exactly the same authority as `base_url`.
///
/// The authority is userinfo + host + explicit port, so
/// "http://example.com:8080" is not internal to "http://example.com".
pub fn is_internal(base_url: &str, url: &str) -> bool {
    let base = Url::parse(base_url).ok().as_ref().and_then(authority);
    let candidate = Url::parse(url).ok().as_ref().and_then(authority);

    match (base, candidate) {
        (Some(base), Some(candidate)) => base == candidate,
        _ => false,
    }
}

// Rebuilds the "netloc" of a URL: [user[:password]@]host[:port]
fn authority(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|host| !host.is_empty())?;

    let mut netloc = String::new();
    if !url.username().is_empty() {
        netloc.push_str(url.username());
        if let Some(password) = url.password() {
            netloc.push(':');
            netloc.push_str(password);
        }
        netloc.push('@');
    }
    netloc.push_str(host);
    if let Some(port) = url.port() {
        // Writing to a String cannot fail
        let _ = write!(netloc, ":{}", port);
    }

    Some(netloc)
}
