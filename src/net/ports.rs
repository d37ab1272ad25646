// src/net/ports.rs
// =============================================================================
// A simple TCP connect scanner.
//
// A port is "open" if a TCP connection to it completes within the timeout,
// and "closed" otherwise (refused, filtered, timed out - all the same here).
//
// Probes run concurrently, at most `concurrency` at a time, using the same
// buffer_unordered pattern as the crawler.
// =============================================================================

use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use crate::error::PortSpecError;

/// The "all" shortcut scans ports 1 through 999.
pub const ALL_PORTS_END: u16 = 999;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_SCAN_CONCURRENCY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PortState {
    Open,
    Closed,
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortState::Open => write!(f, "Open"),
            PortState::Closed => write!(f, "Closed"),
        }
    }
}

/// Which ports to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec(Vec<u16>);

impl PortSpec {
    /// Parses "all" or a comma-separated list like "22, 80,443".
    pub fn parse(spec: &str) -> Result<Self, PortSpecError> {
        let spec = spec.trim();
        if spec.eq_ignore_ascii_case("all") {
            return Ok(Self((1..=ALL_PORTS_END).collect()));
        }

        let mut ports = Vec::new();
        for item in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match item.parse::<u16>() {
                Ok(port) if port != 0 => ports.push(port),
                _ => return Err(PortSpecError::InvalidPort(item.to_string())),
            }
        }

        if ports.is_empty() {
            return Err(PortSpecError::Empty);
        }
        Ok(Self(ports))
    }

    pub fn ports(&self) -> &[u16] {
        &self.0
    }
}

/// Probes every port in `spec` on `ip`. Results are keyed by port number.
pub async fn scan_ports(
    ip: IpAddr,
    spec: &PortSpec,
    connect_timeout: Duration,
    concurrency: usize,
) -> BTreeMap<u16, PortState> {
    stream::iter(spec.ports().iter().copied())
        .map(|port| async move { (port, probe(SocketAddr::new(ip, port), connect_timeout).await) })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await
}

async fn probe(addr: SocketAddr, connect_timeout: Duration) -> PortState {
    match timeout(connect_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(_stream)) => PortState::Open,
        Ok(Err(e)) => {
            debug!(%addr, error = %e, "port closed");
            PortState::Closed
        }
        Err(_) => {
            debug!(%addr, "connect timed out");
            PortState::Closed
        }
    }
}
