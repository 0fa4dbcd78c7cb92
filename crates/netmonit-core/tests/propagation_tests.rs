//! Golden tests for the fault propagation tracer.
//!
//! Tests verify:
//! - Earliest, lowest-layer alert is the root
//! - Downstream unhealthy devices become propagation edges
//! - Confidence points and cap
//! - Isolated and ambiguous sentinels
//! - Determinism apart from the chain id

mod common;

use approx::assert_relative_eq;
use common::*;
use netmonit_core::propagation::{trace, DiagnosisType, CONFIDENCE_CAP};
use netmonit_core::telemetry::{DeviceKind, DeviceStatus, Layer, LinkStatus, Severity};

#[test]
fn test_physical_root_with_downstream_symptom_is_capped() {
    let devices = vec![
        make_device("sw", "Switch-A", DeviceKind::Switch, DeviceStatus::Healthy),
        make_device("plc", "PLC-B", DeviceKind::Plc, DeviceStatus::Warning),
    ];
    let links = vec![make_link("l1", "sw", "plc", LinkStatus::Healthy, 1.0)];
    let alerts = vec![
        make_alert("a1", Severity::High, Layer::L1, "Switch-A", 0),
        make_alert("a2", Severity::Medium, Layer::L7, "PLC-B", 9 * 60),
    ];

    let chain = trace(&alerts, &devices, &links, &[]);

    assert_eq!(chain.diagnosis_type, DiagnosisType::RootCause);
    assert_eq!(chain.primary_fault.device, "Switch-A");
    assert_eq!(chain.primary_fault.layer, Layer::L1);
    assert_eq!(chain.propagation.len(), 1);
    assert_eq!(chain.propagation[0].upstream_device, "Switch-A");
    assert_eq!(chain.propagation[0].downstream_device, "PLC-B");
    assert_eq!(chain.propagation[0].depth, 1);
    assert_relative_eq!(chain.confidence_score, 0.99);
    assert!(chain.confidence_reason.starts_with("High confidence"));
}

#[test]
fn test_plant_trace_reaches_core_router() {
    let chain = trace(&plant_alerts(), &plant_devices(), &plant_links(), &plant_workflows());

    assert_eq!(chain.primary_fault.device, "PLC-Node-X");
    assert_eq!(chain.primary_fault.reason, "Temp above threshold");
    assert_eq!(chain.impact.impacted_device_ids, vec!["d2", "d3"]);
    assert_eq!(chain.impact.affected_workflows, vec!["SCADA Loop"]);
    assert_eq!(chain.evidence.triggering_alert_id, "a1");
    assert_eq!(chain.evidence.timestamp_window.first_anomaly, t0().timestamp_millis());
    assert_eq!(
        chain.evidence.timestamp_window.last_escalation,
        (t0() + chrono::Duration::seconds(60)).timestamp_millis()
    );
    assert_eq!(chain.summary, "Identified L1 root cause on PLC-Node-X affecting 1 workflows.");
}

#[test]
fn test_near_simultaneous_alerts_order_by_layer() {
    let devices = plant_devices();
    let mut l3 = make_alert("early-l3", Severity::High, Layer::L3, "Core-Router", 0);
    l3.timestamp = t0();
    let mut l2 = make_alert("late-l2", Severity::High, Layer::L2, "Switch-A", 0);
    l2.timestamp = t0() + chrono::Duration::milliseconds(400);

    let chain = trace(&[l3, l2], &devices, &plant_links(), &[]);

    assert_eq!(chain.evidence.triggering_alert_id, "late-l2");
    assert_eq!(chain.primary_fault.device, "Switch-A");
}

#[test]
fn test_unknown_layers_rank_last_within_window() {
    let devices = plant_devices();
    let alerts = vec![
        make_alert("odd", Severity::High, Layer::from("L9"), "Core-Router", 0),
        make_alert("l7", Severity::High, Layer::L7, "Switch-A", 0),
    ];
    let chain = trace(&alerts, &devices, &[], &[]);
    assert_eq!(chain.evidence.triggering_alert_id, "l7");
}

#[test]
fn test_isolated_without_alerts() {
    let chain = trace(&[], &plant_devices(), &plant_links(), &plant_workflows());

    assert_eq!(chain.diagnosis_type, DiagnosisType::Isolated);
    assert_relative_eq!(chain.confidence_score, 1.0);
    assert_eq!(chain.primary_fault.device, "None");
    assert!(chain.summary.contains("operating normally"));
    assert!(chain.propagation.is_empty());
}

#[test]
fn test_unknown_root_device_is_ambiguous() {
    let alerts = vec![
        make_alert("a1", Severity::High, Layer::L2, "Ghost-Switch", 0),
        make_alert("a2", Severity::Low, Layer::L7, "Core-Router", 10),
    ];
    let chain = trace(&alerts, &plant_devices(), &plant_links(), &[]);

    assert_eq!(chain.diagnosis_type, DiagnosisType::Ambiguous);
    assert_relative_eq!(chain.confidence_score, 0.3);
    assert!(chain.propagation.is_empty());
    assert_eq!(
        chain.possible_causes,
        Some(vec!["Ghost-Switch (L2)".to_string(), "Core-Router (L7)".to_string()])
    );
}

#[test]
fn test_root_resolves_by_id() {
    let alerts = vec![make_alert("a1", Severity::High, Layer::L3, "d3", 0)];
    let chain = trace(&alerts, &plant_devices(), &plant_links(), &[]);
    assert_eq!(chain.primary_fault.device, "Core-Router");
    assert_eq!(chain.impact.impacted_device_ids, vec!["d3"]);
}

#[test]
fn test_cycles_terminate_and_visit_once() {
    let devices = vec![
        make_device("a", "A", DeviceKind::Switch, DeviceStatus::Warning),
        make_device("b", "B", DeviceKind::Switch, DeviceStatus::Warning),
        make_device("c", "C", DeviceKind::Switch, DeviceStatus::Critical),
    ];
    let links = vec![
        make_link("1", "a", "b", LinkStatus::Healthy, 1.0),
        make_link("2", "b", "c", LinkStatus::Healthy, 1.0),
        make_link("3", "c", "a", LinkStatus::Healthy, 1.0),
        make_link("4", "a", "b", LinkStatus::Healthy, 1.0),
    ];
    let alerts = vec![make_alert("x", Severity::High, Layer::L2, "A", 0)];

    let chain = trace(&alerts, &devices, &links, &[]);

    assert_eq!(chain.propagation.len(), 2);
    assert_eq!(chain.propagation[1].upstream_device, "B");
    assert_eq!(chain.propagation[1].downstream_device, "C");
    assert_eq!(chain.propagation[1].depth, 2);
    assert_eq!(chain.impact.impacted_device_ids, vec!["a", "b", "c"]);
}

#[test]
fn test_healthy_neighbors_are_walked_but_not_recorded() {
    let devices = vec![
        make_device("a", "A", DeviceKind::Switch, DeviceStatus::Healthy),
        make_device("b", "B", DeviceKind::Switch, DeviceStatus::Healthy),
        make_device("c", "C", DeviceKind::Plc, DeviceStatus::Offline),
    ];
    let links = vec![
        make_link("1", "a", "b", LinkStatus::Healthy, 1.0),
        make_link("2", "b", "c", LinkStatus::Healthy, 1.0),
    ];
    let alerts = vec![make_alert("x", Severity::Medium, Layer::L4, "A", 0)];

    let chain = trace(&alerts, &devices, &links, &[]);

    assert_eq!(chain.propagation.len(), 1);
    assert_eq!(chain.propagation[0].upstream_device, "B");
    assert_eq!(chain.propagation[0].depth, 2);
}

#[test]
fn test_lone_upper_layer_alert_is_low_confidence() {
    let alerts = vec![make_alert("x", Severity::Low, Layer::L7, "Switch-A", 0)];
    let chain = trace(&alerts, &plant_devices(), &[], &[]);

    assert_relative_eq!(chain.confidence_score, 0.5);
    assert!(chain.confidence_reason.starts_with("Low confidence"));
    assert_eq!(chain.impact.operational, vec!["Application performance degraded"]);
}

#[test]
fn test_confidence_never_exceeds_cap() {
    let snapshots = [
        (plant_alerts(), plant_links()),
        (plant_alerts(), Vec::new()),
        (vec![make_alert("x", Severity::High, Layer::L2, "d1", 0)], plant_links()),
    ];
    for (alerts, links) in snapshots {
        let chain = trace(&alerts, &plant_devices(), &links, &plant_workflows());
        assert!(chain.confidence_score >= 0.0);
        assert!(chain.confidence_score <= CONFIDENCE_CAP);
    }
}

#[test]
fn test_trace_is_deterministic_apart_from_id() {
    let first = trace(&plant_alerts(), &plant_devices(), &plant_links(), &plant_workflows());
    let mut second = trace(&plant_alerts(), &plant_devices(), &plant_links(), &plant_workflows());
    second.id = first.id.clone();
    assert_eq!(first, second);
}
