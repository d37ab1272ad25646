// src/store/mod.rs
// =============================================================================
// Persistence for crawl results.
//
// Submodules:
// - links: SQLite table of visited URLs and their HTTP status
// - export: CSV export of that table
//
// The store is opened by whoever starts a crawl and handed to the crawler
// by reference. There is no global database handle.
// =============================================================================

mod export;
mod links;

pub use export::export_csv;
pub use links::{LinkRecord, LinkStore};
