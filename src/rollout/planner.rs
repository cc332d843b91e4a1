// file: src/rollout/planner.rs
// version: 1.2.0
// guid: 4b9d2f68-1c5a-4e37-8d02-6f3a9c5e2b81

//! The endpoint rollout planner
//!
//! One invocation is a single linear pass: validate the candidate set,
//! resolve the scope, probe each candidate once in input order, then apply
//! the surviving list to each resolved host with a continue-on-error policy.
//! Only the two precondition failures (bad primary count, unresolvable
//! scope) abort the rollout, and both fire before any side effect.

use super::candidate::{
    validate_candidates, EndpointCandidate, EndpointRole, ReachabilityResult,
};
use super::outcome::{HostApplyOutcome, RolloutReport};
use crate::hostconfig::{ConfigVerb, HostConfigClient};
use crate::inventory::{ClusterResolver, HostId, RolloutScope};
use crate::probe::ReachabilityProbe;
use crate::{AgentError, Result};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Result of the read-only planning phase: probe record, surviving
/// candidates, and the resolved host sequence
#[derive(Debug)]
pub struct RolloutPlan {
    /// Probe results for every candidate, in input order
    pub probes: Vec<ReachabilityResult>,
    /// Candidates that answered the probe, primary first
    pub surviving: Vec<EndpointCandidate>,
    /// Resolved target hosts, ordered and deduplicated
    pub hosts: Vec<HostId>,
}

/// Plans and executes endpoint configuration rollouts
///
/// Holds no state across invocations; the candidate and outcome lists live
/// only for the duration of one call.
pub struct EndpointRolloutPlanner<'a> {
    probe: &'a dyn ReachabilityProbe,
    resolver: &'a dyn ClusterResolver,
    client: &'a dyn HostConfigClient,
}

impl<'a> EndpointRolloutPlanner<'a> {
    pub fn new(
        probe: &'a dyn ReachabilityProbe,
        resolver: &'a dyn ClusterResolver,
        client: &'a dyn HostConfigClient,
    ) -> Self {
        Self {
            probe,
            resolver,
            client,
        }
    }

    /// Validate, resolve, and probe without touching any host
    ///
    /// Scope resolution runs before the first probe so that an invalid scope
    /// aborts with zero network activity.
    pub async fn plan(
        &self,
        candidates: &[EndpointCandidate],
        scope: &RolloutScope,
    ) -> Result<RolloutPlan> {
        validate_candidates(candidates)?;

        let hosts = self.resolver.resolve(scope)?;
        if hosts.is_empty() {
            // Resolver contract violation; never report an empty scope as success
            return Err(AgentError::scope_resolution(format!(
                "{} resolved to zero hosts",
                scope
            )));
        }
        debug!("{} resolved to {} host(s)", scope, hosts.len());

        let mut probes = Vec::with_capacity(candidates.len());
        let mut surviving = Vec::new();
        for candidate in candidates {
            let reachable = self.probe.probe(&candidate.address).await;
            if reachable {
                surviving.push(candidate.clone());
            } else {
                warn!(
                    "Skipping unreachable {} endpoint {}",
                    candidate.role.as_str(),
                    candidate.address
                );
            }
            probes.push(ReachabilityResult {
                candidate: candidate.clone(),
                reachable,
                probed_at: Utc::now(),
            });
        }

        // Primary first, secondaries keep their relative input order
        surviving.sort_by_key(|c| match c.role {
            EndpointRole::Primary => 0,
            EndpointRole::Secondary => 1,
        });

        if surviving.is_empty() {
            warn!("No candidate endpoint is reachable; rollout will clear the configured endpoints");
        }

        Ok(RolloutPlan {
            probes,
            surviving,
            hosts,
        })
    }

    /// Filter the candidates, then apply the surviving set to every host in
    /// scope, one outcome per host in resolution order
    pub async fn plan_and_apply(
        &self,
        candidates: &[EndpointCandidate],
        scope: &RolloutScope,
        verb: ConfigVerb,
    ) -> Result<RolloutReport> {
        let started_at = Utc::now();
        let plan = self.plan(candidates, scope).await?;

        let applied: Vec<String> = plan
            .surviving
            .iter()
            .map(|c| c.address.clone())
            .collect();

        let mut outcomes = Vec::with_capacity(plan.hosts.len());
        for host in &plan.hosts {
            let result = self.client.apply(host, verb, &plan.surviving).await;
            let outcome = if result.success {
                info!("{}: {} configuration applied", host, verb);
                HostApplyOutcome::succeeded(host.clone(), applied.clone())
            } else {
                let reason = result
                    .reason
                    .unwrap_or_else(|| "apply failed with no reason".to_string());
                warn!("{}: {} configuration failed: {}", host, verb, reason);
                HostApplyOutcome::failed(host.clone(), applied.clone(), reason)
            };
            outcomes.push(outcome);
        }

        Ok(RolloutReport {
            id: Uuid::new_v4(),
            verb,
            started_at,
            probes: plan.probes,
            outcomes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hostconfig::ApplyResult;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct StaticProbe {
        reachable: HashSet<String>,
        calls: AtomicUsize,
    }

    impl StaticProbe {
        fn new(reachable: &[&str]) -> Self {
            Self {
                reachable: reachable.iter().map(|s| s.to_string()).collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ReachabilityProbe for StaticProbe {
        async fn probe(&self, address: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reachable.contains(address)
        }
    }

    struct StaticResolver {
        hosts: Vec<HostId>,
        known: bool,
    }

    impl StaticResolver {
        fn new(hosts: &[&str]) -> Self {
            Self {
                hosts: hosts.iter().map(|h| HostId::new(*h)).collect(),
                known: true,
            }
        }

        fn unknown() -> Self {
            Self {
                hosts: vec![],
                known: false,
            }
        }
    }

    impl ClusterResolver for StaticResolver {
        fn resolve(&self, scope: &RolloutScope) -> Result<Vec<HostId>> {
            if self.known {
                Ok(self.hosts.clone())
            } else {
                Err(AgentError::scope_resolution(format!("{} not found", scope)))
            }
        }
    }

    #[derive(Default)]
    struct RecordingClient {
        fail_hosts: HashSet<String>,
        // (host, applied addresses) per call, in call order
        calls: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl RecordingClient {
        fn failing_on(hosts: &[&str]) -> Self {
            Self {
                fail_hosts: hosts.iter().map(|s| s.to_string()).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn recorded(&self) -> Vec<(String, Vec<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HostConfigClient for RecordingClient {
        async fn apply(
            &self,
            host: &HostId,
            _verb: ConfigVerb,
            endpoints: &[EndpointCandidate],
        ) -> ApplyResult {
            self.calls.lock().unwrap().push((
                host.to_string(),
                endpoints.iter().map(|e| e.address.clone()).collect(),
            ));
            if self.fail_hosts.contains(host.as_str()) {
                ApplyResult::failure("simulated apply failure")
            } else {
                ApplyResult::ok()
            }
        }
    }

    fn cluster_scope() -> RolloutScope {
        RolloutScope::ClusterWide("prod-east".to_string())
    }

    #[tokio::test]
    async fn test_unreachable_secondary_is_filtered() {
        // Scenario A: both hosts get the reachable primary only
        let probe = StaticProbe::new(&["10.0.0.1"]);
        let resolver = StaticResolver::new(&["h1", "h2"]);
        let client = RecordingClient::default();
        let planner = EndpointRolloutPlanner::new(&probe, &resolver, &client);

        let candidates = vec![
            EndpointCandidate::primary("10.0.0.1"),
            EndpointCandidate::secondary("10.0.0.2"),
        ];
        let report = planner
            .plan_and_apply(&candidates, &cluster_scope(), ConfigVerb::NtpServers)
            .await
            .unwrap();

        let calls = client.recorded();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ("h1".to_string(), vec!["10.0.0.1".to_string()]));
        assert_eq!(calls[1], ("h2".to_string(), vec!["10.0.0.1".to_string()]));

        assert!(report.all_succeeded());
        assert_eq!(report.probes.len(), 2);
        assert!(report.probes[0].reachable);
        assert!(!report.probes[1].reachable);
    }

    #[tokio::test]
    async fn test_all_unreachable_applies_empty_list() {
        // Scenario B: the rollout proceeds and clears the configuration
        let probe = StaticProbe::new(&[]);
        let resolver = StaticResolver::new(&["h1"]);
        let client = RecordingClient::default();
        let planner = EndpointRolloutPlanner::new(&probe, &resolver, &client);

        let candidates = vec![EndpointCandidate::primary("bad.host")];
        let report = planner
            .plan_and_apply(&candidates, &cluster_scope(), ConfigVerb::DnsServers)
            .await
            .unwrap();

        let calls = client.recorded();
        assert_eq!(calls, vec![("h1".to_string(), vec![])]);
        assert_eq!(report.outcomes.len(), 1);
        assert!(report.outcomes[0].applied.is_empty());
        assert!(report.outcomes[0].success);
    }

    #[tokio::test]
    async fn test_unresolvable_scope_has_no_side_effects() {
        // Scenario C: resolution fails before the first probe
        let probe = StaticProbe::new(&["10.0.0.1"]);
        let resolver = StaticResolver::unknown();
        let client = RecordingClient::default();
        let planner = EndpointRolloutPlanner::new(&probe, &resolver, &client);

        let candidates = vec![EndpointCandidate::primary("10.0.0.1")];
        let scope = RolloutScope::SingleHost(HostId::new("esx1.local"));
        let err = planner
            .plan_and_apply(&candidates, &scope, ConfigVerb::NtpServers)
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::ScopeResolution(_)));
        assert_eq!(probe.call_count(), 0);
        assert!(client.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_host_failure_does_not_abort_rollout() {
        // Scenario D: h1 fails, h2 still gets its apply call
        let probe = StaticProbe::new(&["10.0.0.1"]);
        let resolver = StaticResolver::new(&["h1", "h2"]);
        let client = RecordingClient::failing_on(&["h1"]);
        let planner = EndpointRolloutPlanner::new(&probe, &resolver, &client);

        let candidates = vec![EndpointCandidate::primary("10.0.0.1")];
        let report = planner
            .plan_and_apply(&candidates, &cluster_scope(), ConfigVerb::NtpServers)
            .await
            .unwrap();

        assert_eq!(report.outcomes.len(), 2);
        assert!(!report.outcomes[0].success);
        assert!(report.outcomes[0].reason.is_some());
        assert!(report.outcomes[1].success);
        assert_eq!(report.failure_count(), 1);
    }

    #[tokio::test]
    async fn test_invalid_primary_count_has_no_side_effects() {
        let probe = StaticProbe::new(&["10.0.0.1", "10.0.0.2"]);
        let resolver = StaticResolver::new(&["h1"]);
        let client = RecordingClient::default();
        let planner = EndpointRolloutPlanner::new(&probe, &resolver, &client);

        for candidates in [
            vec![EndpointCandidate::secondary("10.0.0.2")],
            vec![
                EndpointCandidate::primary("10.0.0.1"),
                EndpointCandidate::primary("10.0.0.2"),
            ],
        ] {
            let err = planner
                .plan_and_apply(&candidates, &cluster_scope(), ConfigVerb::NtpServers)
                .await
                .unwrap_err();
            assert!(matches!(err, AgentError::InvalidInput(_)));
        }

        assert_eq!(probe.call_count(), 0);
        assert!(client.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_outcomes_follow_resolution_order() {
        let probe = StaticProbe::new(&["10.0.0.1"]);
        let resolver = StaticResolver::new(&["h3", "h1", "h2"]);
        let client = RecordingClient::default();
        let planner = EndpointRolloutPlanner::new(&probe, &resolver, &client);

        let candidates = vec![EndpointCandidate::primary("10.0.0.1")];
        let report = planner
            .plan_and_apply(&candidates, &cluster_scope(), ConfigVerb::SyslogTarget)
            .await
            .unwrap();

        let hosts: Vec<String> = report.outcomes.iter().map(|o| o.host.to_string()).collect();
        assert_eq!(hosts, vec!["h3", "h1", "h2"]);
    }

    #[tokio::test]
    async fn test_primary_is_applied_first() {
        let probe = StaticProbe::new(&["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
        let resolver = StaticResolver::new(&["h1"]);
        let client = RecordingClient::default();
        let planner = EndpointRolloutPlanner::new(&probe, &resolver, &client);

        // Primary listed last in the input; surviving order must put it first
        let candidates = vec![
            EndpointCandidate::secondary("10.0.0.2"),
            EndpointCandidate::secondary("10.0.0.3"),
            EndpointCandidate::primary("10.0.0.1"),
        ];
        let report = planner
            .plan_and_apply(&candidates, &cluster_scope(), ConfigVerb::NtpServers)
            .await
            .unwrap();

        assert_eq!(
            report.outcomes[0].applied,
            vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]
        );
        // Probe record stays in input order
        assert_eq!(report.probes[0].candidate.address, "10.0.0.2");
    }

    #[tokio::test]
    async fn test_repeat_apply_is_idempotent() {
        let probe = StaticProbe::new(&["10.0.0.1"]);
        let resolver = StaticResolver::new(&["h1"]);
        let client = RecordingClient::failing_on(&[]);
        let planner = EndpointRolloutPlanner::new(&probe, &resolver, &client);

        let candidates = vec![EndpointCandidate::primary("10.0.0.1")];
        let first = planner
            .plan_and_apply(&candidates, &cluster_scope(), ConfigVerb::NtpServers)
            .await
            .unwrap();
        let second = planner
            .plan_and_apply(&candidates, &cluster_scope(), ConfigVerb::NtpServers)
            .await
            .unwrap();

        assert_eq!(
            first.outcomes[0].success,
            second.outcomes[0].success
        );
        assert_eq!(first.outcomes[0].applied, second.outcomes[0].applied);
    }

    #[tokio::test]
    async fn test_each_candidate_probed_exactly_once() {
        let probe = StaticProbe::new(&["10.0.0.1"]);
        let resolver = StaticResolver::new(&["h1", "h2", "h3"]);
        let client = RecordingClient::default();
        let planner = EndpointRolloutPlanner::new(&probe, &resolver, &client);

        let candidates = vec![
            EndpointCandidate::primary("10.0.0.1"),
            EndpointCandidate::secondary("10.0.0.2"),
        ];
        planner
            .plan_and_apply(&candidates, &cluster_scope(), ConfigVerb::NtpServers)
            .await
            .unwrap();

        // Probe count is per candidate, independent of host count
        assert_eq!(probe.call_count(), 2);
    }
}
