//! Answers about one specific device named in the query.

use super::mentions;
use crate::intent::strip_runtime_context;
use crate::telemetry::{device_name, Device, DeviceStatus, TelemetrySnapshot};

/// Device named in the query, by name first (longest wins), then by id
pub fn find_mentioned_device<'a>(query: &str, devices: &'a [Device]) -> Option<&'a Device> {
    let text = strip_runtime_context(query);
    devices
        .iter()
        .filter(|d| mentions(text, &d.name))
        .max_by_key(|d| d.name.len())
        .or_else(|| devices.iter().find(|d| mentions(text, &d.id)))
}

fn status_icon(status: DeviceStatus) -> &'static str {
    match status {
        DeviceStatus::Healthy => "✅",
        DeviceStatus::Warning => "⚠️",
        DeviceStatus::Critical => "🔴",
        DeviceStatus::Offline => "⚫",
    }
}

fn property_table(device: &Device) -> Vec<String> {
    let m = &device.metrics;
    let mut rows = vec![
        ("ID", device.id.clone()),
        ("Type", device.kind.to_string()),
        ("Status", format!("{} {}", status_icon(device.status), device.status)),
        ("Category", device.category.as_str().to_string()),
        ("IP", device.ip.clone()),
    ];
    if let Some(location) = &device.location {
        rows.push(("Location", location.clone()));
    }
    rows.push(("Temperature", format!("{:.1} °C", m.l1.temperature)));
    if let Some(rx) = m.l1.optical_rx_power {
        rows.push(("Optical RX Power", format!("{:.1} dBm", rx)));
    }
    rows.push(("CRC Errors", m.l2.crc_errors.to_string()));
    rows.push(("Link Utilization", format!("{:.1}%", m.l2.link_utilization)));
    rows.push(("Packet Loss", format!("{:.1}%", m.l3.packet_loss)));
    rows.push(("TCP Retransmissions", format!("{:.1}", m.l4.tcp_retransmissions)));
    rows.push(("Jitter", format!("{:.1} ms", m.l4.jitter)));
    rows.push(("Session Stability", format!("{:.1}%", m.l5.session_stability)));
    rows.push(("TLS Handshake Failures", format!("{:.0}/h", m.l6.tls_handshake_failures)));
    rows.push(("App Latency", format!("{:.0} ms", m.l7.app_latency)));

    let mut lines = vec!["| Property | Value |".to_string(), "|---|---|".to_string()];
    lines.extend(rows.into_iter().map(|(k, v)| format!("| {} | {} |", k, v)));
    lines
}

/// Detailed view of the device named in `query`, or `None` if no device matches
pub fn build_device_response(query: &str, snapshot: &TelemetrySnapshot) -> Option<String> {
    let device = find_mentioned_device(query, &snapshot.devices)?;

    let mut lines = vec![format!("### 🖥️ {}", device.name), String::new()];
    lines.extend(property_table(device));

    let alerts: Vec<_> = snapshot.alerts.iter().filter(|a| a.concerns(device)).collect();
    lines.push(String::new());
    if alerts.is_empty() {
        lines.push("No active alerts for this device.".to_string());
    } else {
        lines.push(format!("**Active Alerts ({}):**", alerts.len()));
        for alert in alerts {
            lines.push(format!(
                "- [{}] {}: {}",
                alert.severity.as_str().to_uppercase(),
                alert.layer,
                alert.message
            ));
        }
    }

    let degraded: Vec<_> = snapshot
        .degraded_links()
        .filter(|c| c.touches(&device.id))
        .collect();
    if !degraded.is_empty() {
        lines.push(String::new());
        lines.push(format!("**Degraded Links ({}):**", degraded.len()));
        for link in degraded {
            lines.push(format!(
                "- {} → {}: {} ({:.1} ms)",
                device_name(&snapshot.devices, &link.source),
                device_name(&snapshot.devices, &link.target),
                link.status,
                link.latency
            ));
        }
    }

    if !device.status.is_healthy() {
        lines.push(String::new());
        lines.push(format!(
            "💡 {} is {}. Ask me to **analyze root cause** to trace where the fault started.",
            device.name, device.status
        ));
    }

    Some(lines.join("\n"))
}
