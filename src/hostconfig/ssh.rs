// file: src/hostconfig/ssh.rs
// version: 1.1.0
// guid: 8a5c1e74-3d9b-4f28-a617-2c6e9b4d7f53

//! SSH-backed host configuration client
//!
//! Connects per call with agent key authentication and runs the hypervisor's
//! own management commands. Every remote call is bounded by a timeout; a
//! timed-out or failed call becomes a per-host failure reason, never a
//! process abort.

use super::{ApplyResult, ConfigVerb, HostConfigClient};
use crate::inventory::HostId;
use crate::rollout::candidate::EndpointCandidate;
use crate::{AgentError, Result};
use async_trait::async_trait;
use ssh2::Session;
use std::io::Read;
use std::net::TcpStream;
use std::time::Duration;
use tracing::{debug, info, warn};

const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// SSH client for remote host configuration
pub struct SshConfigClient {
    username: String,
    command_timeout: Duration,
}

impl SshConfigClient {
    /// Create a new client authenticating as the given user
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Override the per-command timeout
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Run one command on a remote host and return its stdout
    pub async fn run_command(&self, host: &HostId, command: &str) -> Result<String> {
        debug!("Running on {}: {}", host, command);

        let host_addr = host.as_str().to_string();
        let username = self.username.clone();
        let command = command.to_string();

        let task = tokio::task::spawn_blocking(move || {
            exec_blocking(&host_addr, &username, &command)
        });

        match tokio::time::timeout(self.command_timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(AgentError::ssh(format!(
                "SSH task for {} panicked: {}",
                host, e
            ))),
            Err(_) => Err(AgentError::timeout(format!(
                "Command on {} exceeded {:?}",
                host, self.command_timeout
            ))),
        }
    }
}

/// Connect, authenticate via the SSH agent, and execute one command
fn exec_blocking(host: &str, username: &str, command: &str) -> Result<String> {
    let tcp = TcpStream::connect(format!("{}:22", host))
        .map_err(|e| AgentError::ssh(format!("Failed to connect to {}: {}", host, e)))?;

    let mut session = Session::new()
        .map_err(|e| AgentError::ssh(format!("Failed to create SSH session: {}", e)))?;

    session.set_tcp_stream(tcp);
    session
        .handshake()
        .map_err(|e| AgentError::ssh(format!("SSH handshake with {} failed: {}", host, e)))?;

    session.userauth_agent(username).map_err(|_| {
        AgentError::ssh(format!(
            "SSH authentication to {} failed - no valid key found",
            host
        ))
    })?;

    if !session.authenticated() {
        return Err(AgentError::ssh(format!(
            "SSH authentication to {} failed",
            host
        )));
    }

    let mut channel = session
        .channel_session()
        .map_err(|e| AgentError::ssh(format!("Failed to create SSH channel: {}", e)))?;

    channel
        .exec(command)
        .map_err(|e| AgentError::ssh(format!("Failed to execute command: {}", e)))?;

    let mut stdout = String::new();
    let mut stderr = String::new();

    channel
        .read_to_string(&mut stdout)
        .map_err(|e| AgentError::ssh(format!("Failed to read stdout: {}", e)))?;
    channel
        .stderr()
        .read_to_string(&mut stderr)
        .map_err(|e| AgentError::ssh(format!("Failed to read stderr: {}", e)))?;

    channel
        .wait_close()
        .map_err(|e| AgentError::ssh(format!("Failed to close SSH channel: {}", e)))?;

    let exit_status = channel
        .exit_status()
        .map_err(|e| AgentError::ssh(format!("Failed to get exit status: {}", e)))?;

    if exit_status != 0 {
        return Err(AgentError::RemoteCommand {
            command: command.to_string(),
            exit_code: Some(exit_status),
            stderr: if stderr.trim().is_empty() {
                stdout
            } else {
                stderr
            },
        });
    }

    Ok(stdout)
}

#[async_trait]
impl HostConfigClient for SshConfigClient {
    async fn apply(
        &self,
        host: &HostId,
        verb: ConfigVerb,
        endpoints: &[EndpointCandidate],
    ) -> ApplyResult {
        info!(
            "Applying {} configuration to {} ({} endpoint(s))",
            verb,
            host,
            endpoints.len()
        );

        for command in verb.remote_commands(endpoints) {
            if let Err(e) = self.run_command(host, &command).await {
                warn!("Apply to {} failed: {}", host, e);
                return ApplyResult::failure(e.to_string());
            }
        }

        debug!("{} configuration applied to {}", verb, host);
        ApplyResult::ok()
    }
}
