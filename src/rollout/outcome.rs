// file: src/rollout/outcome.rs
// version: 1.0.0
// guid: 9c4e2b68-7f1a-4d53-8b90-2e6a5d3f7c84

//! Per-host outcomes and the aggregate rollout report

use super::candidate::ReachabilityResult;
use crate::hostconfig::ConfigVerb;
use crate::inventory::HostId;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Result of applying the surviving endpoint list to one host
///
/// Created once per host per rollout invocation, in resolution order. A
/// failed host never aborts the rollout; the failure is captured here.
#[derive(Debug, Clone, Serialize)]
pub struct HostApplyOutcome {
    /// Host the configuration was applied to
    pub host: HostId,
    /// Endpoint addresses that were applied, in order, primary first; may be
    /// empty when every candidate was filtered out
    pub applied: Vec<String>,
    /// Whether the apply call succeeded
    pub success: bool,
    /// Failure reason, present iff `success` is false
    pub reason: Option<String>,
}

impl HostApplyOutcome {
    pub fn succeeded(host: HostId, applied: Vec<String>) -> Self {
        Self {
            host,
            applied,
            success: true,
            reason: None,
        }
    }

    pub fn failed(host: HostId, applied: Vec<String>, reason: impl Into<String>) -> Self {
        Self {
            host,
            applied,
            success: false,
            reason: Some(reason.into()),
        }
    }
}

/// Aggregate report for one rollout invocation
#[derive(Debug, Clone, Serialize)]
pub struct RolloutReport {
    /// Rollout invocation id
    pub id: Uuid,
    /// Configuration verb that was rolled out
    pub verb: ConfigVerb,
    /// When the rollout started
    pub started_at: DateTime<Utc>,
    /// Probe results for every candidate, in input order
    pub probes: Vec<ReachabilityResult>,
    /// One outcome per resolved host, in resolution order
    pub outcomes: Vec<HostApplyOutcome>,
}

impl RolloutReport {
    /// Whether every host in scope was configured successfully
    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.success)
    }

    /// Number of hosts that failed to apply
    pub fn failure_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.success).count()
    }
}
