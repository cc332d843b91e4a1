// file: src/hostconfig/mod.rs
// version: 1.0.0
// guid: 1d7f3a59-8c2e-4b61-9f04-5a8d2c6e9b37

//! Host configuration verbs and the apply-side client seam

pub mod ssh;

pub use ssh::SshConfigClient;

use crate::inventory::HostId;
use crate::rollout::candidate::EndpointCandidate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration verb a rollout pushes to each host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigVerb {
    #[serde(rename = "ntp")]
    NtpServers,
    #[serde(rename = "dns")]
    DnsServers,
    #[serde(rename = "syslog")]
    SyslogTarget,
}

impl ConfigVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigVerb::NtpServers => "ntp",
            ConfigVerb::DnsServers => "dns",
            ConfigVerb::SyslogTarget => "syslog",
        }
    }

    /// Default TCP port used by the pre-flight reachability probe
    pub fn default_probe_port(&self) -> u16 {
        match self {
            ConfigVerb::NtpServers => 123,
            ConfigVerb::DnsServers => 53,
            ConfigVerb::SyslogTarget => 514,
        }
    }

    /// Remote commands that apply this verb with the given endpoint list
    ///
    /// An empty endpoint list maps to the verb's explicit clear/disable form,
    /// so "apply nothing" is a real configuration change, not a no-op.
    pub fn remote_commands(&self, endpoints: &[EndpointCandidate]) -> Vec<String> {
        match self {
            ConfigVerb::NtpServers => {
                if endpoints.is_empty() {
                    vec!["esxcli system ntp set --enabled=false".to_string()]
                } else {
                    let mut cmd = String::from("esxcli system ntp set --enabled=true");
                    for endpoint in endpoints {
                        cmd.push_str(&format!(" --server={}", endpoint.address));
                    }
                    vec![cmd]
                }
            }
            ConfigVerb::DnsServers => {
                let mut cmds = vec!["esxcli network ip dns server remove --all".to_string()];
                for endpoint in endpoints {
                    cmds.push(format!(
                        "esxcli network ip dns server add --server={}",
                        endpoint.address
                    ));
                }
                cmds
            }
            ConfigVerb::SyslogTarget => {
                let loghost = endpoints
                    .iter()
                    .map(|e| e.address.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                vec![
                    format!("esxcli system syslog config set --loghost={}", loghost),
                    "esxcli system syslog reload".to_string(),
                ]
            }
        }
    }
}

impl std::fmt::Display for ConfigVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one apply call against one host
///
/// Failures are data, not errors: a failed host must never abort the rollout
/// to the remaining hosts.
#[derive(Debug, Clone)]
pub struct ApplyResult {
    pub success: bool,
    pub reason: Option<String>,
}

impl ApplyResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            reason: None,
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            reason: Some(reason.into()),
        }
    }
}

/// Applies a configuration verb to a single host
#[async_trait]
pub trait HostConfigClient: Send + Sync {
    async fn apply(
        &self,
        host: &HostId,
        verb: ConfigVerb,
        endpoints: &[EndpointCandidate],
    ) -> ApplyResult;
}
