// file: src/rollout/candidate.rs
// version: 1.0.0
// guid: 3f8a5c27-9e1b-4d64-a093-7b2e6f4c8d15

//! Candidate endpoint types and validation

use crate::{AgentError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of an endpoint candidate within a rollout request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointRole {
    #[serde(rename = "primary")]
    Primary,
    #[serde(rename = "secondary")]
    Secondary,
}

impl EndpointRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointRole::Primary => "primary",
            EndpointRole::Secondary => "secondary",
        }
    }
}

/// A network address proposed as a service endpoint (NTP, DNS, syslog target)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointCandidate {
    /// Hostname or IP address of the endpoint
    pub address: String,
    /// Candidate role; at most one primary per rollout request
    pub role: EndpointRole,
}

impl EndpointCandidate {
    pub fn primary(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            role: EndpointRole::Primary,
        }
    }

    pub fn secondary(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            role: EndpointRole::Secondary,
        }
    }
}

/// Outcome of probing one candidate, recorded for reporting
///
/// Ephemeral: produced and consumed within a single rollout invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ReachabilityResult {
    pub candidate: EndpointCandidate,
    pub reachable: bool,
    pub probed_at: DateTime<Utc>,
}

/// Validate a candidate sequence before any side effect happens
///
/// Exactly one primary is required; zero or more secondaries are allowed.
pub fn validate_candidates(candidates: &[EndpointCandidate]) -> Result<()> {
    let primaries = candidates
        .iter()
        .filter(|c| c.role == EndpointRole::Primary)
        .count();

    match primaries {
        1 => Ok(()),
        0 => Err(AgentError::invalid_input(
            "Candidate set has no primary endpoint",
        )),
        n => Err(AgentError::invalid_input(format!(
            "Candidate set has {} primary endpoints, expected exactly one",
            n
        ))),
    }
}
