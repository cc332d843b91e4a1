// file: src/probe/mod.rs
// version: 1.0.0
// guid: 2e7c4a91-5b8d-4f36-9c02-8d1f6e3a7b45

//! Reachability probing for candidate endpoints
//!
//! A probe is a read-only connectivity check: it must never mutate remote
//! state, and a timeout or refused connection simply reads as unreachable.

use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Read-only connectivity check against a candidate address
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Test whether an endpoint address answers
    async fn probe(&self, address: &str) -> bool;
}

/// TCP connect probe with a bounded per-call timeout
///
/// Probes `address:port`; any error (refused, unresolvable, timed out) is
/// reported as unreachable rather than propagated.
pub struct TcpProbe {
    port: u16,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(port: u16, timeout: Duration) -> Self {
        Self { port, timeout }
    }
}

#[async_trait]
impl ReachabilityProbe for TcpProbe {
    async fn probe(&self, address: &str) -> bool {
        debug!("Probing {}:{}", address, self.port);

        match timeout(
            self.timeout,
            tokio::net::TcpStream::connect((address, self.port)),
        )
        .await
        {
            Ok(Ok(_)) => {
                debug!("{}:{} is reachable", address, self.port);
                true
            }
            Ok(Err(e)) => {
                debug!("{}:{} is unreachable: {}", address, self.port, e);
                false
            }
            Err(_) => {
                debug!(
                    "Probe of {}:{} timed out after {:?}",
                    address, self.port, self.timeout
                );
                false
            }
        }
    }
}
