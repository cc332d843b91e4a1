// file: src/rollout/mod.rs
// version: 1.0.0
// guid: 6b1d9f43-2c7a-4e58-b306-9a4f8c2e5d71

//! Endpoint rollout planning and execution
//!
//! The planner takes an ordered candidate endpoint list and a rollout scope,
//! keeps only the candidates that answer a reachability probe, and applies
//! the surviving set to every host in scope, collecting one outcome per host.

pub mod candidate;
pub mod outcome;
pub mod planner;

pub use candidate::{EndpointCandidate, EndpointRole, ReachabilityResult};
pub use outcome::{HostApplyOutcome, RolloutReport};
pub use planner::{EndpointRolloutPlanner, RolloutPlan};
