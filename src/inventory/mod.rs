// file: src/inventory/mod.rs
// version: 1.0.0
// guid: 5d2a8c36-1e9f-4b74-a820-3f6c9e1d7b52

//! Cluster inventory and rollout scope resolution
//!
//! A rollout targets either one host or every host of a named cluster. The
//! scope is resolved into an ordered, deduplicated host sequence before any
//! network activity happens; an unresolvable scope aborts the rollout with no
//! side effects.

pub mod file;

pub use file::Inventory;

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a single managed hypervisor host (hostname or IP address)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostId(String);

impl HostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HostId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Target scope of a rollout: one host, or every host of a named cluster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolloutScope {
    SingleHost(HostId),
    ClusterWide(String),
}

impl fmt::Display for RolloutScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RolloutScope::SingleHost(host) => write!(f, "host {}", host),
            RolloutScope::ClusterWide(cluster) => write!(f, "cluster {}", cluster),
        }
    }
}

/// Resolves a rollout scope into an ordered, deduplicated host sequence
///
/// Resolution must yield at least one host; an unknown name or an empty
/// cluster fails with [`crate::AgentError::ScopeResolution`].
pub trait ClusterResolver: Send + Sync {
    fn resolve(&self, scope: &RolloutScope) -> Result<Vec<HostId>>;
}
