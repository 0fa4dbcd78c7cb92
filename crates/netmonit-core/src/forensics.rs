//! Forensic report generation.
//!
//! Reports are derived from the traced causal chain only; nothing here
//! speculates. The chain of thought is a fixed five-step script narrated by
//! simulated agent roles, and every step of the deterministic path succeeds.

use crate::criticality::{self, Criticality};
use crate::propagation::{self, CausalChain, DiagnosisType};
use crate::recommendations;
use crate::telemetry::{resolve_device, Alert, DependencyPath, Device, Layer, NetworkConnection};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use tracing::info;

/// Simulated spacing between chain-of-thought steps
const STEP_SPACING_MS: i64 = 350;

/// Latency histogram bucket upper bounds (ms); the last bucket is open-ended
const LATENCY_BUCKETS: [(f64, &str); 4] = [
    (5.0, "<5 ms"),
    (20.0, "5-20 ms"),
    (100.0, "20-100 ms"),
    (f64::INFINITY, ">=100 ms"),
];

/// Message words that mark an alert as security-relevant
const SECURITY_INDICATORS: &[&str] = &[
    "unauthorized",
    "intrusion",
    "tls",
    "certificate",
    "firewall",
    "scan",
    "brute",
];

// ============================================================================
// Report types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentRole {
    Coordinator,
    Reliability,
    Performance,
    Security,
}

impl AgentRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coordinator => "Coordinator",
            Self::Reliability => "Reliability",
            Self::Performance => "Performance",
            Self::Security => "Security",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Running,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForensicStep {
    pub id: String,
    /// Epoch milliseconds
    pub timestamp: i64,
    pub agent: AgentRole,
    pub action: String,
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// Visualization kind of an artifact payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Otdr,
    LatencyHistogram,
    Heatmap,
    JsonLog,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Otdr => "otdr",
            Self::LatencyHistogram => "latency_histogram",
            Self::Heatmap => "heatmap",
            Self::JsonLog => "json_log",
        }
    }

    /// Whether `data` has the shape a renderer of this kind expects.
    ///
    /// Renderers call this before drawing and skip artifacts that fail.
    pub fn accepts(&self, data: &Value) -> bool {
        match self {
            Self::JsonLog => data.is_object(),
            Self::Otdr => data
                .get("points")
                .and_then(Value::as_array)
                .is_some_and(|points| {
                    points.iter().all(|p| {
                        p.get("distance").is_some_and(Value::is_number)
                            && p.get("loss").is_some_and(Value::is_number)
                    })
                }),
            Self::LatencyHistogram => data
                .get("buckets")
                .and_then(Value::as_array)
                .is_some_and(|buckets| {
                    buckets.iter().all(|b| {
                        b.get("label").is_some_and(Value::is_string)
                            && b.get("count").is_some_and(Value::is_u64)
                    })
                }),
            Self::Heatmap => {
                let Some(width) = data.get("layers").and_then(Value::as_array).map(Vec::len) else {
                    return false;
                };
                data.get("rows")
                    .and_then(Value::as_array)
                    .is_some_and(|rows| {
                        rows.iter().all(|row| {
                            row.get("device").is_some_and(Value::is_string)
                                && row
                                    .get("values")
                                    .and_then(Value::as_array)
                                    .is_some_and(|v| v.len() == width)
                        })
                    })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForensicArtifact {
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    pub title: String,
    pub description: String,
    pub data: Value,
}

impl ForensicArtifact {
    pub fn is_renderable(&self) -> bool {
        self.kind.accepts(&self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForensicReport {
    pub criticality: Criticality,
    pub root_cause: String,
    pub chain_of_thought: Vec<ForensicStep>,
    pub artifacts: Vec<ForensicArtifact>,
    pub recommendations: Vec<String>,
    pub summary: String,
}

impl ForensicReport {
    /// The causal chain embedded in the json_log artifact, if any
    pub fn causal_chain(&self) -> Option<CausalChain> {
        self.artifacts
            .iter()
            .filter(|a| a.kind == ArtifactKind::JsonLog)
            .find_map(|a| a.data.get("causalChain"))
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Artifacts whose payload passes shape validation
    pub fn renderable_artifacts(&self) -> impl Iterator<Item = &ForensicArtifact> {
        self.artifacts.iter().filter(|a| a.is_renderable())
    }
}

// ============================================================================
// Builders
// ============================================================================

fn step(
    now: i64,
    index: i64,
    agent: AgentRole,
    action: &str,
    result: Option<String>,
) -> ForensicStep {
    ForensicStep {
        id: format!("step-{}-{}", now, index),
        timestamp: now + STEP_SPACING_MS * (index - 1),
        agent,
        action: action.to_string(),
        status: StepStatus::Success,
        result,
    }
}

fn is_security_alert(alert: &Alert) -> bool {
    if alert.layer == Layer::L6 {
        return true;
    }
    let message = alert.message.to_lowercase();
    message
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|word| SECURITY_INDICATORS.contains(&word))
}

fn security_sweep(alerts: &[Alert]) -> String {
    let flagged: Vec<&str> = alerts
        .iter()
        .filter(|a| is_security_alert(a))
        .map(|a| a.id.as_str())
        .collect();
    if flagged.is_empty() {
        "No explicit security-trigger telemetry provided".to_string()
    } else {
        format!(
            "{} alert(s) carry security indicators: {}",
            flagged.len(),
            flagged.join(", ")
        )
    }
}

/// Per-device alert counts across L1-L7, for devices named by alerts
fn heatmap_artifact(alerts: &[Alert], devices: &[Device]) -> Option<ForensicArtifact> {
    let mut rows: Vec<(&str, [u64; 7])> = Vec::new();
    for alert in alerts {
        let Some(device) = resolve_device(devices, &alert.device) else {
            continue;
        };
        let index = match rows.iter().position(|(name, _)| *name == device.name) {
            Some(i) => i,
            None => {
                rows.push((device.name.as_str(), [0; 7]));
                rows.len() - 1
            }
        };
        let rank = usize::from(alert.layer.rank());
        if (1..=7).contains(&rank) {
            rows[index].1[rank - 1] += 1;
        }
    }

    if rows.is_empty() {
        return None;
    }

    let layers: Vec<String> = Layer::ALL.iter().map(|l| l.as_str().to_string()).collect();
    let rows: Vec<Value> = rows
        .into_iter()
        .map(|(device, values)| json!({ "device": device, "values": values }))
        .collect();

    Some(ForensicArtifact {
        kind: ArtifactKind::Heatmap,
        title: "Alert Density by Layer".to_string(),
        description: "Alert counts per device across L1-L7 for devices named in current alerts."
            .to_string(),
        data: json!({ "layers": layers, "rows": rows }),
    })
}

/// Latency distribution of links touching impacted devices
fn latency_artifact(chain: &CausalChain, connections: &[NetworkConnection]) -> Option<ForensicArtifact> {
    let impacted = &chain.impact.impacted_device_ids;
    let links: Vec<&NetworkConnection> = connections
        .iter()
        .filter(|c| impacted.iter().any(|id| c.touches(id)))
        .collect();

    if links.is_empty() {
        return None;
    }

    let mut counts = [0u64; LATENCY_BUCKETS.len()];
    for link in &links {
        if let Some(i) = LATENCY_BUCKETS.iter().position(|(bound, _)| link.latency < *bound) {
            counts[i] += 1;
        }
    }

    let buckets: Vec<Value> = LATENCY_BUCKETS
        .iter()
        .zip(counts)
        .map(|((_, label), count)| json!({ "label": label, "count": count }))
        .collect();

    Some(ForensicArtifact {
        kind: ArtifactKind::LatencyHistogram,
        title: "Impacted Link Latency".to_string(),
        description: format!("Latency distribution across {} link(s) touching impacted devices.", links.len()),
        data: json!({ "buckets": buckets }),
    })
}

fn workflow_list(workflows: &[String]) -> String {
    if workflows.is_empty() {
        "None detected".to_string()
    } else {
        workflows.join(", ")
    }
}

/// Unhealthy devices and links that no alert accounts for
struct UnanchoredDegradation {
    /// "Name (status)" per unhealthy device
    devices: Vec<String>,
    degraded_links: usize,
    /// Workflows whose path crosses an unhealthy device
    workflows: Vec<String>,
}

impl UnanchoredDegradation {
    fn collect(
        devices: &[Device],
        connections: &[NetworkConnection],
        dependencies: &[DependencyPath],
    ) -> Option<Self> {
        let unhealthy: Vec<&Device> = devices.iter().filter(|d| !d.status.is_healthy()).collect();
        let degraded_links = connections.iter().filter(|c| !c.status.is_healthy()).count();
        if unhealthy.is_empty() && degraded_links == 0 {
            return None;
        }

        let workflows = dependencies
            .iter()
            .filter(|w| w.path.iter().any(|id| unhealthy.iter().any(|d| &d.id == id)))
            .map(|w| w.app_name.clone())
            .collect();

        Some(Self {
            devices: unhealthy
                .iter()
                .map(|d| format!("{} ({})", d.name, d.status))
                .collect(),
            degraded_links,
            workflows,
        })
    }

    fn root_cause(&self) -> String {
        if self.devices.is_empty() {
            format!(
                "No alert anchors a root cause; {} degraded/down link(s)",
                self.degraded_links
            )
        } else {
            format!(
                "No alert anchors a root cause; {} unhealthy device(s): {}",
                self.devices.len(),
                self.devices.join(", ")
            )
        }
    }

    fn summary(&self) -> String {
        format!(
            "Degradation without a triggering alert: {} unhealthy device(s) and {} degraded/down link(s).",
            self.devices.len(),
            self.degraded_links
        )
    }
}

/// Report for a snapshot with nothing wrong in it
pub fn build_healthy_report(
    query: &str,
    devices: &[Device],
    connections: &[NetworkConnection],
) -> ForensicReport {
    let now = Utc::now();
    let millis = now.timestamp_millis();
    let healthy = devices.iter().filter(|d| d.status.is_healthy()).count();
    let degraded = connections.iter().filter(|c| !c.status.is_healthy()).count();

    info!(criticality = "low", "healthy forensic report");

    ForensicReport {
        criticality: Criticality::Low,
        root_cause: "No active root cause identified in current live telemetry.".to_string(),
        chain_of_thought: vec![
            step(
                millis,
                1,
                AgentRole::Coordinator,
                "Validate current telemetry state",
                Some(format!(
                    "{}/{} devices healthy; {} degraded/down links",
                    healthy,
                    devices.len(),
                    degraded
                )),
            ),
            step(
                millis,
                2,
                AgentRole::Reliability,
                "Check for recent high-confidence fault indicators",
                Some("No active incident pattern detected".to_string()),
            ),
        ],
        artifacts: vec![ForensicArtifact {
            kind: ArtifactKind::JsonLog,
            title: "Healthy State Verification".to_string(),
            description: "No active fault chain identified; system appears stable at analysis time."
                .to_string(),
            data: json!({
                "query": query,
                "devices": { "total": devices.len(), "healthy": healthy },
                "links": { "total": connections.len(), "degradedOrDown": degraded },
                "analyzedAt": now.to_rfc3339(),
            }),
        }],
        recommendations: vec![
            "Continue live monitoring and keep alert thresholds calibrated.".to_string(),
            "If an issue was recently fixed, monitor for 10-15 minutes to confirm no recurrence."
                .to_string(),
        ],
        summary: "System is operating normally. No active root cause found in current telemetry."
            .to_string(),
    }
}

/// Trace, grade and narrate the given alerts
pub fn build_deterministic_report(
    query: &str,
    alerts: &[Alert],
    devices: &[Device],
    connections: &[NetworkConnection],
    dependencies: &[DependencyPath],
) -> ForensicReport {
    let chain = propagation::trace(alerts, devices, connections, dependencies);
    let criticality = criticality::derive(&chain, alerts);
    let recommendations = recommendations::for_layer(&chain.primary_fault.layer);
    let millis = Utc::now().timestamp_millis();
    let unanchored = (chain.diagnosis_type == DiagnosisType::Isolated)
        .then(|| UnanchoredDegradation::collect(devices, connections, dependencies))
        .flatten();

    let root_layer_result = match &unanchored {
        Some(degradation) => format!(
            "No alert anchors a root-layer anomaly; {} unhealthy device(s)",
            degradation.devices.len()
        ),
        None => format!("{} on {}", chain.primary_fault.layer, chain.primary_fault.device),
    };

    let chain_of_thought = vec![
        step(
            millis,
            1,
            AgentRole::Coordinator,
            "Ingest active telemetry and alerts",
            Some(format!("{} alert(s), {} device(s)", alerts.len(), devices.len())),
        ),
        step(
            millis,
            2,
            AgentRole::Reliability,
            "Identify earliest plausible root-layer anomaly",
            Some(root_layer_result),
        ),
        step(
            millis,
            3,
            AgentRole::Performance,
            "Trace downstream propagation via topology graph",
            Some(format!("{} correlated hop(s)", chain.propagation.len())),
        ),
        step(
            millis,
            4,
            AgentRole::Security,
            "Check for security indicators in current evidence",
            Some(security_sweep(alerts)),
        ),
        step(
            millis,
            5,
            AgentRole::Coordinator,
            "Compile root cause and remediation protocol",
            Some(format!(
                "Criticality {}; {} remediation step(s)",
                criticality.label(),
                recommendations.len()
            )),
        ),
    ];

    let (root_cause, summary) = match &unanchored {
        Some(degradation) => (
            degradation.root_cause(),
            format!(
                "{} Workflows: {}. {}",
                degradation.summary(),
                workflow_list(&degradation.workflows),
                criticality.framing()
            ),
        ),
        None => (
            format!(
                "{} fault on {}: {}",
                chain.primary_fault.layer, chain.primary_fault.device, chain.primary_fault.reason
            ),
            format!(
                "{} Workflows: {}. Confidence {}%. {}",
                chain.summary,
                workflow_list(&chain.impact.affected_workflows),
                chain.confidence_percent(),
                criticality.framing()
            ),
        ),
    };

    let mut artifacts = Vec::with_capacity(3);
    artifacts.extend(heatmap_artifact(alerts, devices));
    artifacts.extend(latency_artifact(&chain, connections));
    artifacts.push(ForensicArtifact {
        kind: ArtifactKind::JsonLog,
        title: "Causal Intelligence (Deterministic)".to_string(),
        description: "Propagation tracer output used as the factual basis for this report."
            .to_string(),
        data: json!({ "query": query, "causalChain": chain }),
    });

    info!(
        criticality = criticality.as_str(),
        root = %chain.primary_fault.device,
        artifacts = artifacts.len(),
        "forensic report built"
    );

    ForensicReport {
        criticality,
        root_cause,
        chain_of_thought,
        artifacts,
        recommendations,
        summary,
    }
}

/// Healthy report when there are no alerts and every device is healthy,
/// deterministic report otherwise
pub fn build_report(
    query: &str,
    alerts: &[Alert],
    devices: &[Device],
    connections: &[NetworkConnection],
    dependencies: &[DependencyPath],
) -> ForensicReport {
    if alerts.is_empty() && devices.iter().all(|d| d.status.is_healthy()) {
        build_healthy_report(query, devices, connections)
    } else {
        build_deterministic_report(query, alerts, devices, connections, dependencies)
    }
}
