// file: src/inventory/file.rs
// version: 1.0.1
// guid: 8f4b2d17-6a3e-4c95-b081-5e9d2f7c1a64

//! YAML inventory file loading

use super::{ClusterResolver, HostId, RolloutScope};
use crate::{AgentError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// On-disk inventory format
///
/// ```yaml
/// clusters:
///   prod-east:
///     hosts:
///       - esx01.example.com
///       - esx02.example.com
/// ```
#[derive(Debug, Deserialize)]
struct InventoryFile {
    clusters: BTreeMap<String, ClusterEntry>,
}

#[derive(Debug, Deserialize)]
struct ClusterEntry {
    #[serde(default)]
    hosts: Vec<String>,
}

/// In-memory cluster inventory loaded from a YAML file
#[derive(Debug, Clone)]
pub struct Inventory {
    clusters: BTreeMap<String, Vec<HostId>>,
}

impl Inventory {
    /// Load an inventory from a YAML file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading inventory from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|e| {
            AgentError::config(format!(
                "Failed to read inventory file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse an inventory from YAML content
    ///
    /// Duplicate members within a cluster are collapsed, first occurrence
    /// wins, member order is preserved.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: InventoryFile = serde_yaml::from_str(content)?;

        let mut clusters = BTreeMap::new();
        for (name, entry) in file.clusters {
            let mut hosts: Vec<HostId> = Vec::with_capacity(entry.hosts.len());
            for raw in entry.hosts {
                let host = HostId::new(raw.trim());
                if host.as_str().is_empty() {
                    return Err(AgentError::config(format!(
                        "Cluster '{}' contains an empty host entry",
                        name
                    )));
                }
                if hosts.contains(&host) {
                    warn!("Cluster '{}' lists {} more than once", name, host);
                    continue;
                }
                hosts.push(host);
            }
            if hosts.is_empty() {
                warn!("Cluster '{}' has no hosts", name);
            }
            clusters.insert(name, hosts);
        }

        Ok(Self { clusters })
    }

    /// Names of all known clusters, in sorted order
    pub fn cluster_names(&self) -> impl Iterator<Item = &str> {
        self.clusters.keys().map(String::as_str)
    }

    /// Hosts of a single cluster, in inventory order
    pub fn cluster_hosts(&self, name: &str) -> Option<&[HostId]> {
        self.clusters.get(name).map(Vec::as_slice)
    }

    /// All hosts across all clusters, deduplicated, in cluster-then-member order
    pub fn all_hosts(&self) -> Vec<HostId> {
        let mut out = Vec::new();
        for hosts in self.clusters.values() {
            for host in hosts {
                if !out.contains(host) {
                    out.push(host.clone());
                }
            }
        }
        out
    }

    fn contains_host(&self, host: &HostId) -> bool {
        self.clusters.values().any(|hosts| hosts.contains(host))
    }
}

impl ClusterResolver for Inventory {
    fn resolve(&self, scope: &RolloutScope) -> Result<Vec<HostId>> {
        match scope {
            RolloutScope::SingleHost(host) => {
                if self.contains_host(host) {
                    Ok(vec![host.clone()])
                } else {
                    Err(AgentError::scope_resolution(format!(
                        "Host '{}' is not part of any inventory cluster",
                        host
                    )))
                }
            }
            RolloutScope::ClusterWide(name) => match self.clusters.get(name) {
                Some(hosts) if !hosts.is_empty() => Ok(hosts.clone()),
                Some(_) => Err(AgentError::scope_resolution(format!(
                    "Cluster '{}' resolves to zero hosts",
                    name
                ))),
                None => Err(AgentError::scope_resolution(format!(
                    "Cluster '{}' not found in inventory",
                    name
                ))),
            },
        }
    }
}
