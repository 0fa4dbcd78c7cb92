//! Monitoring coverage snapshot.
//!
//! Summarizes how much of the network the engine can currently see: device,
//! link, alert and workflow counts plus which of the seven layers report KPIs.

use crate::telemetry::{Layer, TelemetrySnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiStatus {
    Healthy,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// One layer-level KPI reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerKpi {
    pub layer: Layer,
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub status: KpiStatus,
    pub trend: Trend,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringSnapshot {
    pub monitored_devices: usize,
    pub monitored_connections: usize,
    pub monitored_alerts: usize,
    pub monitored_workflows: usize,
    /// Sorted, deduplicated layer tags with at least one KPI
    pub monitored_layers: Vec<String>,
    /// Share of the seven layers covered, at most 1.0
    pub coverage_ratio: f64,
    pub summary: String,
}

pub fn monitoring_snapshot(snapshot: &TelemetrySnapshot, layer_kpis: &[LayerKpi]) -> MonitoringSnapshot {
    let layers: BTreeSet<String> = layer_kpis.iter().map(|k| k.layer.to_string()).collect();
    let monitored_layers: Vec<String> = layers.into_iter().collect();
    let coverage_ratio = (monitored_layers.len() as f64 / Layer::ALL.len() as f64).min(1.0);
    let coverage_percent = (coverage_ratio * 100.0).round() as u32;

    let layer_list = if monitored_layers.is_empty() {
        "none".to_string()
    } else {
        monitored_layers.join(", ")
    };

    let summary = format!(
        "Monitoring {} devices, {} links, {} active alerts, {} workflow paths. Layer coverage {}% ({}).",
        snapshot.devices.len(),
        snapshot.links().len(),
        snapshot.alerts.len(),
        snapshot.dependencies.len(),
        coverage_percent,
        layer_list
    );

    MonitoringSnapshot {
        monitored_devices: snapshot.devices.len(),
        monitored_connections: snapshot.links().len(),
        monitored_alerts: snapshot.alerts.len(),
        monitored_workflows: snapshot.dependencies.len(),
        monitored_layers,
        coverage_ratio,
        summary,
    }
}
