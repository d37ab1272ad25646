// src/net/resolve.rs
// =============================================================================
// Resolves a domain name to an IP address using the system resolver.
//
// IPv4 answers are preferred so the output matches what most people expect
// from "what is the IP of example.com"; an IPv6 address is returned only
// when that is all the resolver gives back.
// =============================================================================

use std::net::IpAddr;
use tokio::net::lookup_host;
use tracing::warn;

/// Returns the first address for `domain`, or None if it does not resolve.
pub async fn resolve_host(domain: &str) -> Option<IpAddr> {
    let domain = domain.trim();
    if domain.is_empty() {
        return None;
    }

    // lookup_host wants a port; it plays no part in the answer
    let addrs: Vec<IpAddr> = match lookup_host((domain, 0)).await {
        Ok(addrs) => addrs.map(|addr| addr.ip()).collect(),
        Err(e) => {
            warn!(domain, error = %e, "could not resolve domain");
            return None;
        }
    };

    addrs
        .iter()
        .copied()
        .find(IpAddr::is_ipv4)
        .or_else(|| addrs.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[tokio::test]
    async fn test_resolves_ip_literal() {
        assert_eq!(
            resolve_host("127.0.0.1").await,
            Some(IpAddr::V4(Ipv4Addr::LOCALHOST))
        );
    }

    #[tokio::test]
    async fn test_resolves_localhost() {
        assert!(resolve_host("localhost").await.is_some());
    }

    #[tokio::test]
    async fn test_empty_domain() {
        assert_eq!(resolve_host("   ").await, None);
    }

    #[tokio::test]
    async fn test_invalid_domain() {
        assert_eq!(resolve_host("no such host.invalid").await, None);
    }
}
