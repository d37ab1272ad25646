// src/net/mod.rs
// =============================================================================
// Small network utilities that live next to the crawler but share nothing
// with it:
// - ports: TCP connect scan of a single host
// - resolve: domain name -> IP address
// =============================================================================

mod ports;
mod resolve;

pub use ports::{
    scan_ports, PortSpec, PortState, DEFAULT_CONNECT_TIMEOUT, DEFAULT_SCAN_CONCURRENCY,
};
pub use resolve::resolve_host;
