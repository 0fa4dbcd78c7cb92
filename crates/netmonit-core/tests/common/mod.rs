//! Shared fixtures for the integration tests.
//!
//! A three-device plant network:
//! - Switch-A (d1): healthy access switch
//! - PLC-Node-X (d2): OT controller in warning
//! - Core-Router (d3): critical core router
//!
//! Links d1 -> d2 (healthy), d1 -> d3 (degraded), d2 -> d3 (down).
//! One workflow, "SCADA Loop", spans all three devices.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use netmonit_core::telemetry::{
    Alert, DependencyPath, Device, DeviceCategory, DeviceKind, DeviceMetrics, DeviceStatus, Layer,
    LinkStatus, NetworkConnection, Severity, TelemetrySnapshot, WorkflowCriticality,
};

/// Fixed reference time for all fixture alerts
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap()
}

pub fn make_device(id: &str, name: &str, kind: DeviceKind, status: DeviceStatus) -> Device {
    Device {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        status,
        category: DeviceCategory::It,
        ip: format!("10.0.0.{}", id.trim_start_matches('d')),
        location: None,
        metrics: DeviceMetrics::default(),
    }
}

pub fn make_alert(id: &str, severity: Severity, layer: Layer, device: &str, offset_secs: i64) -> Alert {
    Alert {
        id: id.to_string(),
        severity,
        layer,
        device: device.to_string(),
        message: format!("{} anomaly on {}", id, device),
        timestamp: t0() + Duration::seconds(offset_secs),
    }
}

pub fn make_link(id: &str, source: &str, target: &str, status: LinkStatus, latency: f64) -> NetworkConnection {
    NetworkConnection {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        status,
        bandwidth: 1000.0,
        latency,
    }
}

pub fn make_workflow(name: &str, path: &[&str]) -> DependencyPath {
    DependencyPath {
        app_id: name.to_lowercase().replace(' ', "-"),
        app_name: name.to_string(),
        criticality: WorkflowCriticality::MissionCritical,
        path: path.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn plant_devices() -> Vec<Device> {
    let mut plc = make_device("d2", "PLC-Node-X", DeviceKind::Plc, DeviceStatus::Warning);
    plc.category = DeviceCategory::Ot;
    plc.location = Some("Line 3".to_string());
    plc.metrics.l1.temperature = 71.5;
    plc.metrics.l2.crc_errors = 42;
    plc.metrics.l3.packet_loss = 1.5;

    vec![
        make_device("d1", "Switch-A", DeviceKind::Switch, DeviceStatus::Healthy),
        plc,
        make_device("d3", "Core-Router", DeviceKind::Router, DeviceStatus::Critical),
    ]
}

pub fn plant_alerts() -> Vec<Alert> {
    let mut a1 = make_alert("a1", Severity::Medium, Layer::L1, "PLC-Node-X", 0);
    a1.message = "Temp above threshold".to_string();
    let mut a2 = make_alert("a2", Severity::High, Layer::L2, "Core-Router", 30);
    a2.message = "CRC errors spiking".to_string();
    let mut a3 = make_alert("a3", Severity::Critical, Layer::L3, "Core-Router", 60);
    a3.message = "Packet loss > 5%".to_string();
    vec![a1, a2, a3]
}

pub fn plant_links() -> Vec<NetworkConnection> {
    vec![
        make_link("c1", "d1", "d2", LinkStatus::Healthy, 2.0),
        make_link("c2", "d1", "d3", LinkStatus::Degraded, 50.0),
        make_link("c3", "d2", "d3", LinkStatus::Down, 999.0),
    ]
}

pub fn plant_workflows() -> Vec<DependencyPath> {
    vec![make_workflow("SCADA Loop", &["d1", "d2", "d3"])]
}

/// Full degraded plant snapshot
pub fn plant_snapshot() -> TelemetrySnapshot {
    TelemetrySnapshot::new(plant_alerts(), plant_devices())
        .with_connections(plant_links())
        .with_dependencies(plant_workflows())
}

/// Two healthy devices, one healthy link, no alerts
pub fn healthy_snapshot() -> TelemetrySnapshot {
    TelemetrySnapshot::new(
        Vec::new(),
        vec![
            make_device("d1", "Switch-A", DeviceKind::Switch, DeviceStatus::Healthy),
            make_device("d2", "PLC-Node-X", DeviceKind::Plc, DeviceStatus::Healthy),
        ],
    )
    .with_connections(vec![make_link("c1", "d1", "d2", LinkStatus::Healthy, 2.0)])
}
