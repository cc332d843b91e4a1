// file: src/cli/args.rs
// version: 1.1.0
// guid: 2c6e9b47-4d1a-4f58-b293-8a5f1d7c3e62

//! Command line argument definitions

use crate::inventory::{HostId, RolloutScope};
use crate::{AgentError, Result};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fleet-config-agent")]
#[command(about = "Fleet-wide endpoint configuration for hypervisor clusters")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(
        short = 'i',
        long,
        global = true,
        default_value = "inventory.yaml",
        help = "Path to the cluster inventory file"
    )]
    pub inventory: String,

    #[arg(
        short = 'u',
        long,
        global = true,
        default_value = "root",
        help = "SSH username for host operations"
    )]
    pub username: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Roll out NTP servers with a pre-flight reachability check
    SetNtp {
        #[command(flatten)]
        endpoints: EndpointArgs,

        #[command(flatten)]
        scope: ScopeArgs,

        #[command(flatten)]
        rollout: RolloutArgs,
    },

    /// Roll out DNS servers with a pre-flight reachability check
    SetDns {
        #[command(flatten)]
        endpoints: EndpointArgs,

        #[command(flatten)]
        scope: ScopeArgs,

        #[command(flatten)]
        rollout: RolloutArgs,
    },

    /// Roll out syslog targets with a pre-flight reachability check
    SetSyslog {
        #[command(flatten)]
        endpoints: EndpointArgs,

        #[command(flatten)]
        scope: ScopeArgs,

        #[command(flatten)]
        rollout: RolloutArgs,
    },

    /// Report uptime for the hosts in scope
    Uptime {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Enable or disable the SSH service on the hosts in scope
    Service {
        #[arg(value_enum)]
        action: ServiceAction,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    /// Restart the hosts in scope
    Restart {
        #[command(flatten)]
        scope: ScopeArgs,

        #[arg(long, help = "Confirm a cluster-wide restart")]
        yes: bool,
    },

    /// List clusters and hosts from the inventory
    ListHosts {
        #[arg(short, long)]
        cluster: Option<String>,

        #[arg(short, long)]
        json: bool,
    },
}

/// Candidate endpoint arguments shared by the set-* commands
#[derive(Args)]
pub struct EndpointArgs {
    #[arg(long, help = "Primary endpoint address")]
    pub primary: String,

    #[arg(
        long = "secondary",
        help = "Secondary endpoint address (repeatable)"
    )]
    pub secondary: Vec<String>,
}

/// Rollout scope: exactly one of --host or --cluster
#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct ScopeArgs {
    #[arg(long, help = "Target a single host")]
    pub host: Option<String>,

    #[arg(long, help = "Target every host of a named cluster")]
    pub cluster: Option<String>,
}

impl ScopeArgs {
    pub fn to_scope(&self) -> Result<RolloutScope> {
        match (&self.host, &self.cluster) {
            (Some(host), None) => Ok(RolloutScope::SingleHost(HostId::new(host.as_str()))),
            (None, Some(cluster)) => Ok(RolloutScope::ClusterWide(cluster.clone())),
            // clap's arg group enforces exactly one; guard anyway
            _ => Err(AgentError::invalid_input(
                "Exactly one of --host or --cluster is required",
            )),
        }
    }
}

/// Tuning knobs shared by the set-* commands
#[derive(Args)]
pub struct RolloutArgs {
    #[arg(
        long,
        help = "TCP port for the reachability probe (defaults to the service's port)"
    )]
    pub probe_port: Option<u16>,

    #[arg(long, default_value = "5", help = "Per-probe timeout in seconds")]
    pub probe_timeout: u64,

    #[arg(long, default_value = "30", help = "Per-host apply timeout in seconds")]
    pub apply_timeout: u64,

    #[arg(long, help = "Validate, resolve, and probe without touching any host")]
    pub dry_run: bool,

    #[arg(long, help = "Emit the rollout report as JSON")]
    pub json: bool,
}

/// SSH service toggle direction
#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceAction {
    EnableSsh,
    DisableSsh,
}
