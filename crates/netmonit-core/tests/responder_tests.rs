//! Golden tests for the text responders.
//!
//! Tests verify:
//! - Status text for healthy and degraded snapshots, with list truncation
//! - Device lookup by name and id, with boundary-safe matching
//! - Offline knowledge base coverage
//! - Navigation answers carry live counts
//! - Smart fallback is never empty

mod common;

use common::*;
use netmonit_core::responders::device::{build_device_response, find_mentioned_device};
use netmonit_core::responders::fallback::build_smart_fallback;
use netmonit_core::responders::knowledge::{lookup, topic};
use netmonit_core::responders::navigation::build_website_assist;
use netmonit_core::responders::status::build_status_text;
use netmonit_core::responders::{LiveCounts, DEFAULT_MAX_LISTED};
use netmonit_core::telemetry::{DeviceKind, DeviceStatus, Layer, Severity, TelemetrySnapshot};

// ============================================================================
// Status
// ============================================================================

#[test]
fn test_status_single_healthy_device() {
    let snapshot = TelemetrySnapshot::new(
        Vec::new(),
        vec![make_device("d1", "Switch-A", DeviceKind::Switch, DeviceStatus::Healthy)],
    );
    let text = build_status_text(&snapshot, DEFAULT_MAX_LISTED);
    assert!(text.contains('✅'));
    assert!(text.contains("all 1 devices"));
}

#[test]
fn test_status_degraded_plant() {
    let text = build_status_text(&plant_snapshot(), DEFAULT_MAX_LISTED);

    assert!(text.contains("Network Status Report"));
    assert!(text.contains("**1 Critical alert(s)**"));
    assert!(text.contains("**1 High alert(s)**"));
    assert!(text.contains("**2 unhealthy device(s)**"));
    assert!(text.contains("PLC-Node-X"));
    assert!(text.contains("Core-Router"));
    assert!(text.contains("**2 link(s) degraded or down**"));
    assert!(text.contains("analyze root cause"));
}

#[test]
fn test_status_omits_links_when_not_reported() {
    let snapshot = TelemetrySnapshot::new(plant_alerts(), plant_devices());
    let text = build_status_text(&snapshot, DEFAULT_MAX_LISTED);
    assert!(!text.contains("link(s) degraded"));
    assert!(!text.contains("**Links:**"));
}

#[test]
fn test_status_truncates_long_lists() {
    let alerts: Vec<_> = (0..12)
        .map(|i| make_alert(&format!("a{}", i), Severity::Low, Layer::L4, "Switch-A", i))
        .collect();
    let snapshot = TelemetrySnapshot::new(alerts, plant_devices());
    let text = build_status_text(&snapshot, 5);
    assert!(text.contains("...and 7 more"));
}

#[test]
fn test_status_warning_device_without_alerts() {
    let snapshot = TelemetrySnapshot::new(
        Vec::new(),
        vec![make_device("d2", "PLC-Node-X", DeviceKind::Plc, DeviceStatus::Warning)],
    );
    let text = build_status_text(&snapshot, DEFAULT_MAX_LISTED);
    assert!(text.contains("unhealthy"));
    assert!(!text.contains("Critical conditions present"));
}

// ============================================================================
// Device
// ============================================================================

#[test]
fn test_device_response_by_name() {
    let text = build_device_response("how is plc-node-x doing?", &plant_snapshot()).unwrap();

    assert!(text.contains("### 🖥️ PLC-Node-X"));
    assert!(text.contains("| Status | ⚠️ warning |"));
    assert!(text.contains("| Location | Line 3 |"));
    assert!(text.contains("| CRC Errors | 42 |"));
    assert!(text.contains("**Active Alerts (1):**"));
    assert!(text.contains("Temp above threshold"));
    assert!(text.contains("**Degraded Links (1):**"));
    assert!(text.contains("analyze root cause"));
}

#[test]
fn test_device_response_by_id() {
    let text = build_device_response("details for d3", &plant_snapshot()).unwrap();
    assert!(text.contains("Core-Router"));
    assert!(text.contains("critical"));
}

#[test]
fn test_healthy_device_gets_no_rca_suggestion() {
    let text = build_device_response("Switch-A", &plant_snapshot()).unwrap();
    assert!(text.contains("No active alerts for this device."));
    assert!(!text.contains("analyze root cause"));
}

#[test]
fn test_device_response_none_when_unmatched() {
    assert!(build_device_response("tell me about the firewall", &plant_snapshot()).is_none());
    assert!(build_device_response("status of d12", &plant_snapshot()).is_none());
}

#[test]
fn test_device_match_ignores_runtime_context() {
    let raw = "what is up RUNTIME SYSTEM CONTEXT: Core-Router critical";
    assert!(find_mentioned_device(raw, &plant_devices()).is_none());
}

#[test]
fn test_longest_device_name_wins() {
    let devices = vec![
        make_device("d1", "PLC", DeviceKind::Plc, DeviceStatus::Healthy),
        make_device("d2", "PLC Line 2", DeviceKind::Plc, DeviceStatus::Warning),
    ];
    let found = find_mentioned_device("check plc line 2 please", &devices).unwrap();
    assert_eq!(found.id, "d2");
}

// ============================================================================
// Knowledge base
// ============================================================================

#[test]
fn test_knowledge_covers_core_terms() {
    let terms = [
        ("what is CRC?", "crc"),
        ("explain latency", "latency"),
        ("what is jitter", "jitter"),
        ("packet loss meaning", "packet loss"),
        ("the OSI model", "osi"),
        ("explain TCP", "tcp"),
        ("what is UDP", "udp"),
        ("what is a VLAN", "vlan"),
        ("Modbus basics", "modbus"),
        ("SCADA systems", "scada"),
        ("what does a PLC do", "plc"),
        ("spanning tree", "stp"),
        ("RSTP", "rstp"),
        ("QoS", "qos"),
        ("firewall", "firewall"),
        ("DNS", "dns"),
        ("SNMP polling", "snmp"),
        ("bandwidth", "bandwidth"),
        ("duplex mismatch", "duplex"),
        ("PROFINET", "profinet"),
        ("OSPF", "ospf"),
        ("BGP", "bgp"),
        ("ARP", "arp"),
        ("NAT", "nat"),
        ("OPC UA", "opc ua"),
    ];
    for (query, expected) in terms {
        assert_eq!(topic(query), Some(expected), "query: {}", query);
    }
}

#[test]
fn test_knowledge_identity_and_capabilities() {
    assert!(lookup("who are you?").unwrap().contains("NetMonit AI"));
    assert!(lookup("what can you do").unwrap().contains("Root Cause Analysis"));
    assert!(lookup("what is CRC?").unwrap().contains("CRC"));
}

#[test]
fn test_knowledge_miss() {
    assert!(lookup("tell me a joke").is_none());
    assert!(lookup("").is_none());
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn test_navigation_is_grounded_in_live_counts() {
    let text = build_website_assist("where is the heatmap?", &plant_snapshot());
    assert!(text.contains("Heatmap"));
    assert!(text.contains("3 active alert(s)"));
    assert!(text.contains("Devices: 3, links: 3."));
}

#[test]
fn test_navigation_overview_default() {
    let text = build_website_assist("how do I use this", &healthy_snapshot());
    assert!(text.contains("navigate the dashboard"));
    assert!(text.contains("0 active alert(s)"));
}

// ============================================================================
// Fallback
// ============================================================================

#[test]
fn test_fallback_healthy() {
    let text = build_smart_fallback("tell me a joke", &healthy_snapshot());
    assert!(text.contains("healthy"));
    assert!(text.contains("all 2 devices"));
}

#[test]
fn test_fallback_summarizes_degraded_state() {
    let text = build_smart_fallback("tell me a joke", &plant_snapshot());
    assert!(text.contains("3 active alert(s) (1 critical, 1 high)"));
    assert!(text.contains("2 of 3 device(s) unhealthy"));
    assert!(text.contains("Packet loss > 5%"));
}

#[test]
fn test_fallback_prefers_device_match() {
    let text = build_smart_fallback("Core-Router please", &plant_snapshot());
    assert!(text.contains("### 🖥️ Core-Router"));
}

#[test]
fn test_fallback_never_empty() {
    assert!(!build_smart_fallback("", &TelemetrySnapshot::default()).is_empty());
}

#[test]
fn test_live_counts() {
    let counts = LiveCounts::from_snapshot(&plant_snapshot());
    assert_eq!(counts.alerts, 3);
    assert_eq!(counts.critical_alerts, 1);
    assert_eq!(counts.unhealthy_devices, 2);
    assert_eq!(counts.degraded_links, 2);
    assert!(!counts.is_healthy());
}
