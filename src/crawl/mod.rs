// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Submodules:
// - classify: pure checks (is the URL valid? is it on the same host?)
// - fetch: one HTTP GET, body returned only for HTML
// - extract: links found in an HTML page, resolved to absolute URLs
// - frontier: the breadth-first driver that ties the above together
// - robots: reads robots.txt Disallow rules (informational only)
//
// Features:
// - Breadth-first crawling, one depth level ("wave") at a time
// - Same-host restriction (external links are never followed)
// - Depth and link-count budgets
// - Bounded number of concurrent requests per wave
// =============================================================================

mod classify;
mod extract;
mod fetch;
mod frontier;
mod robots;

pub use classify::{is_internal, is_valid_url};
pub use extract::{extract_links, PageLinks};
pub use fetch::{FetchOutcome, Fetcher, Page};
pub use frontier::{crawl, crawl_with, CrawlReport};
pub use robots::{fetch_disallowed, parse_disallowed};
