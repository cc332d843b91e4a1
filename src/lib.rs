// file: src/lib.rs
// version: 1.0.0
// guid: 9e2f7b41-3a6c-4d85-b190-7c4e8f2a5d63

//! # Fleet Config Agent
//!
//! Routine administration of a fleet of hypervisor hosts grouped into named
//! clusters: pushing endpoint configuration (NTP, DNS, syslog targets) with a
//! pre-flight reachability filter, plus simple per-host operations such as
//! uptime reporting, SSH service toggling, and host restarts.
//!
//! The core of the crate is [`rollout::EndpointRolloutPlanner`], which filters
//! a candidate endpoint list down to the reachable subset and applies it to
//! every host resolved from the rollout scope, collecting one outcome per host.

pub mod cli;
pub mod error;
pub mod hostconfig;
pub mod inventory;
pub mod logging;
pub mod probe;
pub mod report;
pub mod rollout;

pub use error::{AgentError, Result};

/// Version information for the agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
