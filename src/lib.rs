//! nlink: breadth-first internal link extraction for a single website,
//! plus a TCP port scanner and a DNS lookup helper.
//!
//! The crawler lives in [`crawl`], results are persisted through
//! [`store`], and the standalone network helpers are in [`net`].

pub mod config;
pub mod crawl;
pub mod error;
pub mod net;
pub mod store;
