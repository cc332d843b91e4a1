// file: src/report/mod.rs
// version: 1.0.0
// guid: 7e2b9d54-6a1f-4c83-b072-4d8f3a6c1e95

//! Terminal rendering of rollout reports and per-host command outcomes
//!
//! Presentation only; every decision is made from the structured outcome
//! sequence the planner returns.

use crate::inventory::HostId;
use crate::rollout::RolloutReport;
use crate::Result;
use colored::Colorize;
use serde::Serialize;

/// Per-host result of a fleet command (uptime, service toggle, restart)
#[derive(Debug, Clone, Serialize)]
pub struct HostCommandOutcome {
    pub host: HostId,
    pub success: bool,
    /// Command output for successful calls, trimmed
    pub output: Option<String>,
    /// Failure reason, present iff `success` is false
    pub reason: Option<String>,
}

impl HostCommandOutcome {
    pub fn succeeded(host: HostId, output: impl Into<String>) -> Self {
        let output = output.into();
        Self {
            host,
            success: true,
            output: if output.trim().is_empty() {
                None
            } else {
                Some(output.trim().to_string())
            },
            reason: None,
        }
    }

    pub fn failed(host: HostId, reason: impl Into<String>) -> Self {
        Self {
            host,
            success: false,
            output: None,
            reason: Some(reason.into()),
        }
    }
}

fn status_label(success: bool) -> String {
    if success {
        "OK".green().bold().to_string()
    } else {
        "FAIL".red().bold().to_string()
    }
}

/// Render a rollout report as a human-readable table
pub fn render_rollout(report: &RolloutReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Rollout {} ({} configuration)\n\n",
        report.id, report.verb
    ));

    out.push_str("Candidate endpoints:\n");
    for probe in &report.probes {
        let status = if probe.reachable {
            "reachable".green().to_string()
        } else {
            "unreachable, skipped".yellow().to_string()
        };
        out.push_str(&format!(
            "  {:<30} {:<10} {}\n",
            probe.candidate.address,
            probe.candidate.role.as_str(),
            status
        ));
    }

    out.push_str("\nPer-host results:\n");
    for outcome in &report.outcomes {
        let applied = if outcome.applied.is_empty() {
            "(cleared)".to_string()
        } else {
            outcome.applied.join(", ")
        };
        match &outcome.reason {
            Some(reason) => out.push_str(&format!(
                "  {:<30} {}  {}\n",
                outcome.host.to_string(),
                status_label(outcome.success),
                reason
            )),
            None => out.push_str(&format!(
                "  {:<30} {}  {}\n",
                outcome.host.to_string(),
                status_label(outcome.success),
                applied
            )),
        }
    }

    let failures = report.failure_count();
    out.push_str(&format!(
        "\n{} host(s), {} failure(s)\n",
        report.outcomes.len(),
        failures
    ));

    out
}

/// Render a rollout report as pretty-printed JSON
pub fn render_rollout_json(report: &RolloutReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render per-host fleet command outcomes as a table
pub fn render_command_outcomes(title: &str, outcomes: &[HostCommandOutcome]) -> String {
    let mut out = format!("{}\n\n", title);

    for outcome in outcomes {
        let detail = outcome
            .reason
            .as_deref()
            .or(outcome.output.as_deref())
            .unwrap_or("");
        out.push_str(&format!(
            "  {:<30} {}  {}\n",
            outcome.host.to_string(),
            status_label(outcome.success),
            detail
        ));
    }

    let failures = outcomes.iter().filter(|o| !o.success).count();
    out.push_str(&format!(
        "\n{} host(s), {} failure(s)\n",
        outcomes.len(),
        failures
    ));

    out
}
