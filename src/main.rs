// file: src/main.rs
// version: 1.1.0
// guid: 6a3d8f25-1b7c-4e94-a082-5d9f2c4e7b31

//! Fleet Config Agent - Main entry point

use clap::Parser;
use fleet_config_agent::{
    cli::{
        args::{Cli, Commands},
        commands::*,
    },
    hostconfig::ConfigVerb,
    logging::logger,
    Result,
};
use tokio::signal;
use tracing::warn;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logger::init_logger(cli.verbose, cli.quiet)?;

    let shutdown_signal = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        warn!("Received Ctrl+C, aborting; hosts already configured keep their new settings");
    };

    let inventory = cli.inventory.clone();
    let username = cli.username.clone();

    let command_future = async {
        match &cli.command {
            Commands::SetNtp {
                endpoints,
                scope,
                rollout,
            } => {
                set_endpoints_command(
                    ConfigVerb::NtpServers,
                    endpoints,
                    scope,
                    rollout,
                    &inventory,
                    &username,
                )
                .await
            }
            Commands::SetDns {
                endpoints,
                scope,
                rollout,
            } => {
                set_endpoints_command(
                    ConfigVerb::DnsServers,
                    endpoints,
                    scope,
                    rollout,
                    &inventory,
                    &username,
                )
                .await
            }
            Commands::SetSyslog {
                endpoints,
                scope,
                rollout,
            } => {
                set_endpoints_command(
                    ConfigVerb::SyslogTarget,
                    endpoints,
                    scope,
                    rollout,
                    &inventory,
                    &username,
                )
                .await
            }
            Commands::Uptime { scope } => uptime_command(scope, &inventory, &username).await,
            Commands::Service { action, scope } => {
                service_command(*action, scope, &inventory, &username).await
            }
            Commands::Restart { scope, yes } => {
                restart_command(scope, *yes, &inventory, &username).await
            }
            Commands::ListHosts { cluster, json } => {
                list_hosts_command(cluster.as_deref(), *json, &inventory).await
            }
        }
    };

    tokio::select! {
        result = command_future => result,
        _ = shutdown_signal => {
            warn!("Application interrupted by user");
            std::process::exit(130); // Standard exit code for Ctrl+C
        }
    }
}
