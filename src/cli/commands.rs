// file: src/cli/commands.rs
// version: 1.2.0
// guid: 9d4f1a72-6c8e-4b35-a290-3e7b5d1f8c46

//! Command implementations for the CLI

use crate::cli::args::{EndpointArgs, RolloutArgs, ScopeArgs, ServiceAction};
use crate::hostconfig::{ConfigVerb, SshConfigClient};
use crate::inventory::{ClusterResolver, Inventory, RolloutScope};
use crate::probe::TcpProbe;
use crate::report::{self, HostCommandOutcome};
use crate::rollout::{EndpointCandidate, EndpointRolloutPlanner};
use crate::{AgentError, Result};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{info, warn};

fn build_candidates(endpoints: &EndpointArgs) -> Vec<EndpointCandidate> {
    let mut candidates = vec![EndpointCandidate::primary(endpoints.primary.as_str())];
    candidates.extend(
        endpoints
            .secondary
            .iter()
            .map(|addr| EndpointCandidate::secondary(addr.as_str())),
    );
    candidates
}

/// Roll out one endpoint configuration verb to the hosts in scope
pub async fn set_endpoints_command(
    verb: ConfigVerb,
    endpoints: &EndpointArgs,
    scope_args: &ScopeArgs,
    rollout: &RolloutArgs,
    inventory_path: &str,
    username: &str,
) -> Result<()> {
    let scope = scope_args.to_scope()?;
    let candidates = build_candidates(endpoints);

    info!(
        "Rolling out {} configuration to {} ({} candidate(s))",
        verb,
        scope,
        candidates.len()
    );

    let inventory = Inventory::load(inventory_path)?;
    let probe = TcpProbe::new(
        rollout.probe_port.unwrap_or_else(|| verb.default_probe_port()),
        Duration::from_secs(rollout.probe_timeout),
    );
    let client = SshConfigClient::new(username)
        .with_command_timeout(Duration::from_secs(rollout.apply_timeout));
    let planner = EndpointRolloutPlanner::new(&probe, &inventory, &client);

    if rollout.dry_run {
        let plan = planner.plan(&candidates, &scope).await?;
        println!("DRY RUN: no host will be modified\n");
        for probe_result in &plan.probes {
            println!(
                "  {:<30} {:<10} {}",
                probe_result.candidate.address,
                probe_result.candidate.role.as_str(),
                if probe_result.reachable {
                    "reachable"
                } else {
                    "unreachable, would be skipped"
                }
            );
        }
        println!("\nWould apply {} endpoint(s) to:", plan.surviving.len());
        for host in &plan.hosts {
            println!("  {}", host);
        }
        return Ok(());
    }

    let report = planner.plan_and_apply(&candidates, &scope, verb).await?;

    if rollout.json {
        println!("{}", report::render_rollout_json(&report)?);
    } else {
        println!("{}", report::render_rollout(&report));
    }

    if !report.all_succeeded() {
        warn!(
            "{} of {} host(s) failed to apply",
            report.failure_count(),
            report.outcomes.len()
        );
    }

    Ok(())
}

/// Run one remote command on every host in scope, continue on error
async fn fleet_command(
    scope_args: &ScopeArgs,
    inventory_path: &str,
    username: &str,
    command: &str,
    title: &str,
) -> Result<()> {
    let scope = scope_args.to_scope()?;
    let inventory = Inventory::load(inventory_path)?;
    let hosts = inventory.resolve(&scope)?;

    let client = SshConfigClient::new(username);

    let mut outcomes = Vec::with_capacity(hosts.len());
    for host in &hosts {
        match client.run_command(host, command).await {
            Ok(output) => outcomes.push(HostCommandOutcome::succeeded(host.clone(), output)),
            Err(e) => {
                warn!("{}: {}", host, e);
                outcomes.push(HostCommandOutcome::failed(host.clone(), e.to_string()));
            }
        }
    }

    println!("{}", report::render_command_outcomes(title, &outcomes));
    Ok(())
}

/// Report uptime for the hosts in scope
pub async fn uptime_command(
    scope_args: &ScopeArgs,
    inventory_path: &str,
    username: &str,
) -> Result<()> {
    let title = format!("Uptime for {}", scope_args.to_scope()?);
    fleet_command(scope_args, inventory_path, username, "uptime", &title).await
}

/// Toggle the SSH service on the hosts in scope
pub async fn service_command(
    action: ServiceAction,
    scope_args: &ScopeArgs,
    inventory_path: &str,
    username: &str,
) -> Result<()> {
    let (command, label) = match action {
        ServiceAction::EnableSsh => ("vim-cmd hostsvc/enable_ssh", "Enabling SSH"),
        ServiceAction::DisableSsh => ("vim-cmd hostsvc/disable_ssh", "Disabling SSH"),
    };
    let title = format!("{} on {}", label, scope_args.to_scope()?);
    fleet_command(scope_args, inventory_path, username, command, &title).await
}

/// Restart the hosts in scope
pub async fn restart_command(
    scope_args: &ScopeArgs,
    yes: bool,
    inventory_path: &str,
    username: &str,
) -> Result<()> {
    let scope = scope_args.to_scope()?;
    if matches!(scope, RolloutScope::ClusterWide(_)) && !yes {
        return Err(AgentError::invalid_input(
            "Cluster-wide restart requires --yes",
        ));
    }

    let title = format!("Restarting {}", scope);
    fleet_command(scope_args, inventory_path, username, "reboot", &title).await
}

/// List clusters and hosts from the inventory
pub async fn list_hosts_command(
    cluster: Option<&str>,
    json_output: bool,
    inventory_path: &str,
) -> Result<()> {
    let inventory = Inventory::load(inventory_path)?;

    let mut listing: BTreeMap<String, Vec<String>> = BTreeMap::new();
    match cluster {
        Some(name) => {
            let hosts = inventory.cluster_hosts(name).ok_or_else(|| {
                AgentError::scope_resolution(format!("Cluster '{}' not found in inventory", name))
            })?;
            listing.insert(
                name.to_string(),
                hosts.iter().map(|h| h.to_string()).collect(),
            );
        }
        None => {
            for name in inventory.cluster_names() {
                let hosts = inventory.cluster_hosts(name).unwrap_or(&[]);
                listing.insert(
                    name.to_string(),
                    hosts.iter().map(|h| h.to_string()).collect(),
                );
            }
        }
    }

    if json_output {
        println!("{}", serde_json::to_string_pretty(&listing)?);
    } else {
        for (name, hosts) in &listing {
            println!("{} ({} host(s))", name, hosts.len());
            for host in hosts {
                println!("  {}", host);
            }
        }
    }

    Ok(())
}
