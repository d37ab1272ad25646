// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things). Every tunable can also
// come from an NLINK_* environment variable (the `env = ...` attributes).
//
// Running `nlink` with no subcommand opens the interactive menu instead.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use nlink::config::{
    DEFAULT_CONCURRENCY, DEFAULT_MAX_DEPTH, DEFAULT_MAX_LINKS, DEFAULT_TIMEOUT_SECS,
};

pub const DEFAULT_DB_PATH: &str = "links.db";
pub const DEFAULT_CSV_PATH: &str = "links.csv";
pub const DEFAULT_LOG_FILE: &str = "link_extraction.log";

#[derive(Parser, Debug)]
#[command(
    name = "nlink",
    version,
    about = "Extract the internal links of a website, scan ports and resolve domains",
    long_about = "nlink crawls a single website breadth-first, lists every internal link it finds \
                  and stores each visited page's HTTP status in a SQLite database. \
                  It also ships a small TCP port scanner and a DNS lookup helper."
)]
pub struct Cli {
    /// Where to write logs ("-" for stderr)
    #[arg(long, global = true, env = "NLINK_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: String,

    /// Leave out to get the interactive menu
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website and list its internal links
    ///
    /// Example: nlink scan https://example.com --max-depth 2 --export
    Scan(ScanArgs),

    /// Scan a host for open TCP ports
    ///
    /// Example: nlink ports 192.168.1.10 --ports 22,80,443
    Ports {
        /// IP address to scan
        ip: String,

        /// Comma-separated ports, or "all" for 1-999
        #[arg(long, default_value = "all")]
        ports: String,

        /// Connect timeout per port, in milliseconds
        #[arg(long, env = "NLINK_PORT_TIMEOUT_MS", default_value_t = 1000)]
        timeout_ms: u64,

        /// Output results in JSON format instead of a list
        #[arg(long)]
        json: bool,
    },

    /// Resolve a domain name to its IP address
    Resolve {
        /// Domain without scheme, e.g. example.com
        domain: String,
    },

    /// Show information about the tool
    Info,
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Website URL to start from (e.g., https://example.com)
    pub url: String,

    /// Stop once this many internal links have been found
    #[arg(long, env = "NLINK_MAX_LINKS", default_value_t = DEFAULT_MAX_LINKS)]
    pub max_links: usize,

    /// Number of breadth-first levels to crawl
    ///
    /// Depth 1 = just the starting page
    /// Depth 2 = starting page + all pages it links to
    /// Depth 0 = fetch nothing
    #[arg(long, env = "NLINK_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Maximum requests in flight at once
    #[arg(long, env = "NLINK_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, env = "NLINK_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// SQLite database that receives each visited URL and its status
    #[arg(long, env = "NLINK_DB", default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Export stored results to CSV (default file: links.csv)
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_CSV_PATH)]
    pub export: Option<PathBuf>,

    /// Output results in JSON format instead of a numbered list
    #[arg(long)]
    pub json: bool,
}
