//! Fault propagation tracer.
//!
//! Picks the earliest, lowest-layer alert as the root, walks the directed
//! topology downstream from its device, and records every unhealthy device
//! reached as a propagation hop. The result is a [`CausalChain`].
//!
//! Degenerate inputs never fail:
//! - no alerts -> `Isolated` sentinel (confidence 1.0)
//! - root device not in the inventory -> `Ambiguous` chain (confidence 0.3)

use crate::telemetry::{
    device_name, resolve_device, Alert, DependencyPath, Device, Layer, NetworkConnection,
};
use crate::topology::TopologyGraph;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upper bound applied to every traced confidence score
pub const CONFIDENCE_CAP: f64 = 0.99;

/// Alerts closer together than this are ordered by layer instead of time
pub const SIMULTANEITY_WINDOW_MS: i64 = 1000;

/// Confidence of an ambiguous diagnosis
pub const AMBIGUOUS_CONFIDENCE: f64 = 0.3;

// Confidence points (hundredths), kept integral so threshold checks are exact
const BASE_POINTS: u32 = 50;
const PHYSICAL_ROOT_POINTS: u32 = 20;
const PROPAGATION_POINTS: u32 = 20;
const TIME_ORDER_POINTS: u32 = 10;
const CAP_POINTS: u32 = 99;

// ============================================================================
// Causal chain types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosisType {
    RootCause,
    Isolated,
    Ambiguous,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrimaryFault {
    pub device: String,
    pub layer: Layer,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropagationEdge {
    pub upstream_device: String,
    pub downstream_device: String,
    pub depth: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalysis {
    pub technical: Vec<String>,
    pub operational: Vec<String>,
    pub impacted_device_ids: Vec<String>,
    pub affected_workflows: Vec<String>,
}

/// Epoch milliseconds of the first anomaly and the last escalation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampWindow {
    pub first_anomaly: i64,
    pub last_escalation: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidencePack {
    pub triggering_alert_id: String,
    pub root_layer: Layer,
    pub affected_metrics: Vec<String>,
    pub timestamp_window: TimestampWindow,
}

impl EvidencePack {
    fn empty() -> Self {
        Self {
            triggering_alert_id: String::new(),
            root_layer: Layer::Other(String::new()),
            affected_metrics: Vec::new(),
            timestamp_window: TimestampWindow::default(),
        }
    }
}

/// Root cause plus traced downstream effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CausalChain {
    pub id: String,
    pub confidence_score: f64,
    pub confidence_reason: String,
    pub diagnosis_type: DiagnosisType,
    pub primary_fault: PrimaryFault,
    pub propagation: Vec<PropagationEdge>,
    pub impact: ImpactAnalysis,
    pub evidence: EvidencePack,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possible_causes: Option<Vec<String>>,
    pub summary: String,
}

impl CausalChain {
    /// Sentinel for a snapshot without alerts
    pub fn isolated() -> Self {
        Self {
            id: format!("clean-{}", Utc::now().timestamp_millis()),
            confidence_score: 1.0,
            confidence_reason: "No active alerts detected.".to_string(),
            diagnosis_type: DiagnosisType::Isolated,
            primary_fault: PrimaryFault {
                device: "None".to_string(),
                layer: Layer::from("None"),
                reason: "System Healthy".to_string(),
            },
            propagation: Vec::new(),
            impact: ImpactAnalysis::default(),
            evidence: EvidencePack::empty(),
            possible_causes: None,
            summary: "System is operating normally.".to_string(),
        }
    }

    /// Chain for alerts that cannot be anchored in the topology
    pub fn ambiguous(reason: impl Into<String>, alerts: &[Alert]) -> Self {
        Self {
            id: format!("ambiguous-{}", Utc::now().timestamp_millis()),
            confidence_score: AMBIGUOUS_CONFIDENCE,
            confidence_reason: "Conflicting or insufficient telemetry.".to_string(),
            diagnosis_type: DiagnosisType::Ambiguous,
            primary_fault: PrimaryFault {
                device: "Unknown".to_string(),
                layer: Layer::from("Unknown"),
                reason: "Multiple potential causes".to_string(),
            },
            propagation: Vec::new(),
            impact: ImpactAnalysis::default(),
            evidence: EvidencePack::empty(),
            possible_causes: Some(
                alerts
                    .iter()
                    .map(|a| format!("{} ({})", a.device, a.layer))
                    .collect(),
            ),
            summary: reason.into(),
        }
    }

    /// Confidence as a whole percentage
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence_score * 100.0).round() as u32
    }
}

// ============================================================================
// Tracing
// ============================================================================

/// Order alerts by time, then layer; returns (root, last)
fn select_root_and_last(alerts: &[Alert]) -> Option<(&Alert, &Alert)> {
    let mut ordered: Vec<&Alert> = alerts.iter().collect();
    ordered.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.layer.rank().cmp(&b.layer.rank()))
    });

    let first = *ordered.first()?;
    let last = *ordered.last()?;
    let window_end = first.timestamp.timestamp_millis() + SIMULTANEITY_WINDOW_MS;

    // Among alerts effectively simultaneous with the earliest one, the
    // lowest layer wins; the time-ordered sort keeps ties stable.
    let root = ordered
        .iter()
        .take_while(|a| a.timestamp.timestamp_millis() <= window_end)
        .min_by_key(|a| a.layer.rank())
        .copied()
        .unwrap_or(first);

    Some((root, last))
}

fn score_points(root: &Alert, last: &Alert, propagation_count: usize) -> u32 {
    let mut points = BASE_POINTS;
    if root.layer.is_physical() {
        points += PHYSICAL_ROOT_POINTS;
    }
    if propagation_count > 0 {
        points += PROPAGATION_POINTS;
    }
    if root.timestamp < last.timestamp {
        points += TIME_ORDER_POINTS;
    }
    points.min(CAP_POINTS)
}

fn confidence_reason(points: u32, layer: &Layer, propagation_count: usize) -> String {
    if points > 80 {
        format!(
            "High confidence: early {} anomaly precedes {} downstream symptom(s).",
            layer, propagation_count
        )
    } else if points > 60 {
        format!(
            "Medium confidence: {} fault detected but propagation pattern is partial ({} downstream symptom(s)).",
            layer, propagation_count
        )
    } else {
        format!(
            "Low confidence: {} anomaly with {} downstream symptom(s); telemetry is noisy or lacks clear causal timing.",
            layer, propagation_count
        )
    }
}

/// Trace the most probable root cause and its blast radius.
///
/// Pure apart from the time-derived chain `id`.
pub fn trace(
    alerts: &[Alert],
    devices: &[Device],
    connections: &[NetworkConnection],
    dependencies: &[DependencyPath],
) -> CausalChain {
    let Some((root_alert, last_alert)) = select_root_and_last(alerts) else {
        return CausalChain::isolated();
    };

    let Some(root_device) = resolve_device(devices, &root_alert.device) else {
        debug!(device = %root_alert.device, "root alert device not in topology");
        return CausalChain::ambiguous(
            format!(
                "Root device '{}' not found in topology; {} alert(s) could not be anchored.",
                root_alert.device,
                alerts.len()
            ),
            alerts,
        );
    };

    let graph = TopologyGraph::build(devices, connections);
    let mut propagation = Vec::new();
    let mut impacted: Vec<String> = vec![root_device.id.clone()];

    for hop in graph.bfs(&root_device.id) {
        let Some(neighbor) = devices.iter().find(|d| d.id == hop.node) else {
            continue;
        };
        if neighbor.status.is_healthy() {
            continue;
        }
        propagation.push(PropagationEdge {
            upstream_device: device_name(devices, hop.parent).to_string(),
            downstream_device: neighbor.name.clone(),
            depth: hop.depth,
        });
        if !impacted.contains(&neighbor.id) {
            impacted.push(neighbor.id.clone());
        }
    }

    let mut workflows: Vec<String> = Vec::new();
    for dep in dependencies {
        if dep.path.iter().any(|id| impacted.contains(id)) && !workflows.contains(&dep.app_name) {
            workflows.push(dep.app_name.clone());
        }
    }

    let points = score_points(root_alert, last_alert, propagation.len());
    let physical = root_alert.layer.is_physical();

    debug!(
        root = %root_device.name,
        layer = %root_alert.layer,
        hops = propagation.len(),
        confidence = points,
        "traced causal chain"
    );

    CausalChain {
        id: format!("chain-{}", Utc::now().timestamp_millis()),
        confidence_score: f64::from(points) / 100.0,
        confidence_reason: confidence_reason(points, &root_alert.layer, propagation.len()),
        diagnosis_type: DiagnosisType::RootCause,
        primary_fault: PrimaryFault {
            device: root_device.name.clone(),
            layer: root_alert.layer.clone(),
            reason: root_alert.message.clone(),
        },
        impact: ImpactAnalysis {
            technical: vec![format!("{} downstream devices correlated", propagation.len())],
            operational: vec![if physical {
                "Physical layer instability detected".to_string()
            } else {
                "Application performance degraded".to_string()
            }],
            impacted_device_ids: impacted,
            affected_workflows: workflows.clone(),
        },
        evidence: EvidencePack {
            triggering_alert_id: root_alert.id.clone(),
            root_layer: root_alert.layer.clone(),
            affected_metrics: vec![root_alert.message.clone()],
            timestamp_window: TimestampWindow {
                first_anomaly: root_alert.timestamp.timestamp_millis(),
                last_escalation: last_alert.timestamp.timestamp_millis(),
            },
        },
        possible_causes: None,
        summary: format!(
            "Identified {} root cause on {} affecting {} workflows.",
            root_alert.layer,
            root_device.name,
            workflows.len()
        ),
        propagation,
    }
}
