// file: tests/integration_test.rs
// version: 1.1.0
// guid: 3b9f5d27-8e4a-4c16-b073-6d2a8f5c1e94

//! Integration tests for the fleet configuration agent

use assert_cmd::Command;
use async_trait::async_trait;
use fleet_config_agent::{
    hostconfig::{ApplyResult, ConfigVerb, HostConfigClient},
    inventory::{ClusterResolver, HostId, Inventory, RolloutScope},
    probe::ReachabilityProbe,
    rollout::{EndpointCandidate, EndpointRolloutPlanner},
    Result,
};
use predicates::prelude::*;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

const INVENTORY: &str = r#"
clusters:
  prod-east:
    hosts:
      - esx01.example.com
      - esx02.example.com
  prod-west:
    hosts:
      - esx11.example.com
"#;

fn write_inventory() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(INVENTORY.as_bytes()).unwrap();
    file
}

struct AlwaysReachable;

#[async_trait]
impl ReachabilityProbe for AlwaysReachable {
    async fn probe(&self, _address: &str) -> bool {
        true
    }
}

#[derive(Default)]
struct RecordingClient {
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl HostConfigClient for RecordingClient {
    async fn apply(
        &self,
        host: &HostId,
        _verb: ConfigVerb,
        _endpoints: &[EndpointCandidate],
    ) -> ApplyResult {
        self.calls.lock().unwrap().push(host.to_string());
        ApplyResult::ok()
    }
}

#[tokio::test]
async fn test_rollout_against_file_inventory() -> Result<()> {
    let inventory = Inventory::from_yaml(INVENTORY)?;
    let probe = AlwaysReachable;
    let client = RecordingClient::default();
    let planner = EndpointRolloutPlanner::new(&probe, &inventory, &client);

    let candidates = vec![
        EndpointCandidate::primary("10.0.0.1"),
        EndpointCandidate::secondary("10.0.0.2"),
    ];
    let report = planner
        .plan_and_apply(
            &candidates,
            &RolloutScope::ClusterWide("prod-east".to_string()),
            ConfigVerb::NtpServers,
        )
        .await?;

    assert!(report.all_succeeded());
    assert_eq!(
        *client.calls.lock().unwrap(),
        vec!["esx01.example.com", "esx02.example.com"]
    );
    assert_eq!(
        report.outcomes[0].applied,
        vec!["10.0.0.1".to_string(), "10.0.0.2".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn test_rollout_unknown_cluster_fails_before_probing() {
    let inventory = Inventory::from_yaml(INVENTORY).unwrap();
    let probe = AlwaysReachable;
    let client = RecordingClient::default();
    let planner = EndpointRolloutPlanner::new(&probe, &inventory, &client);

    let candidates = vec![EndpointCandidate::primary("10.0.0.1")];
    let result = planner
        .plan_and_apply(
            &candidates,
            &RolloutScope::ClusterWide("prod-north".to_string()),
            ConfigVerb::DnsServers,
        )
        .await;

    assert!(result.is_err());
    assert!(client.calls.lock().unwrap().is_empty());
}

#[test]
fn test_inventory_file_round_trip() -> Result<()> {
    let file = write_inventory();
    let inventory = Inventory::load(file.path())?;

    let hosts = inventory.resolve(&RolloutScope::ClusterWide("prod-west".to_string()))?;
    assert_eq!(hosts, vec![HostId::new("esx11.example.com")]);
    Ok(())
}

#[test]
fn test_cli_help_lists_commands() {
    Command::cargo_bin("fleet-config-agent")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("set-ntp"))
        .stdout(predicate::str::contains("list-hosts"));
}

#[test]
fn test_cli_list_hosts() {
    let file = write_inventory();

    Command::cargo_bin("fleet-config-agent")
        .unwrap()
        .args(["list-hosts", "--inventory"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("esx01.example.com"))
        .stdout(predicate::str::contains("prod-west"));
}

#[test]
fn test_cli_list_hosts_json() {
    let file = write_inventory();

    let output = Command::cargo_bin("fleet-config-agent")
        .unwrap()
        .args(["list-hosts", "--json", "--inventory"])
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["prod-east"].as_array().unwrap().len(), 2);
}

#[test]
fn test_cli_unknown_cluster_fails() {
    let file = write_inventory();

    Command::cargo_bin("fleet-config-agent")
        .unwrap()
        .args(["list-hosts", "--cluster", "prod-north", "--inventory"])
        .arg(file.path())
        .assert()
        .failure();
}

#[test]
fn test_cli_dry_run_does_not_require_hosts() {
    let file = write_inventory();

    // Candidate in TEST-NET-1; the probe fails fast and the dry run still
    // reports the plan without contacting any host.
    Command::cargo_bin("fleet-config-agent")
        .unwrap()
        .args([
            "set-ntp",
            "--primary",
            "192.0.2.1",
            "--cluster",
            "prod-east",
            "--probe-timeout",
            "1",
            "--dry-run",
            "--inventory",
        ])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"));
}

#[test]
fn test_cli_cluster_restart_requires_yes() {
    let file = write_inventory();

    Command::cargo_bin("fleet-config-agent")
        .unwrap()
        .args(["restart", "--cluster", "prod-east", "--inventory"])
        .arg(file.path())
        .assert()
        .failure();
}
