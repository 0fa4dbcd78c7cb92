//! Live network status listing.

use super::LiveCounts;
use crate::telemetry::{device_name, LinkStatus, Severity, TelemetrySnapshot};

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "🔴",
        Severity::High => "🟠",
        Severity::Medium => "🟡",
        Severity::Low => "🔵",
        Severity::Info => "⚪",
    }
}

fn push_overflow(lines: &mut Vec<String>, total: usize, shown: usize) {
    if total > shown {
        lines.push(format!("- ...and {} more", total - shown));
    }
}

/// Status text for the whole snapshot.
///
/// Degraded links are only reported when the snapshot carries link state.
/// Lists are truncated to `max_items` entries.
pub fn build_status_text(snapshot: &TelemetrySnapshot, max_items: usize) -> String {
    let counts = LiveCounts::from_snapshot(snapshot);

    if counts.is_healthy() {
        return format!(
            "✅ **Network Healthy**: all {} devices are operating normally with no active alerts.",
            counts.devices
        );
    }

    let mut lines = vec!["## 📊 Network Status Report".to_string(), String::new()];

    lines.push(format!("**Active alerts:** {}", counts.alerts));
    for severity in [Severity::Critical, Severity::High, Severity::Medium, Severity::Low] {
        let n = snapshot.alerts.iter().filter(|a| a.severity == severity).count();
        if n > 0 {
            lines.push(format!("{} **{} {} alert(s)**", severity_icon(severity), n, severity.label()));
        }
    }
    for alert in snapshot.alerts.iter().take(max_items) {
        lines.push(format!(
            "- [{}] {} {}: {}",
            alert.severity.as_str().to_uppercase(),
            alert.layer,
            alert.device,
            alert.message
        ));
    }
    push_overflow(&mut lines, counts.alerts, max_items);

    lines.push(String::new());
    lines.push(format!("**{} unhealthy device(s)**", counts.unhealthy_devices));
    for device in snapshot.unhealthy_devices().take(max_items) {
        lines.push(format!(
            "- **{}** ({}): {}, ip {}",
            device.name, device.kind, device.status, device.ip
        ));
    }
    push_overflow(&mut lines, counts.unhealthy_devices, max_items);

    if let Some(connections) = &snapshot.connections {
        lines.push(String::new());
        if counts.degraded_links == 0 {
            lines.push(format!("**Links:** all {} healthy", connections.len()));
        } else {
            lines.push(format!("**{} link(s) degraded or down**", counts.degraded_links));
            for link in snapshot.degraded_links().take(max_items) {
                lines.push(format!(
                    "- {} → {}: {} ({:.1} ms)",
                    device_name(&snapshot.devices, &link.source),
                    device_name(&snapshot.devices, &link.target),
                    link.status,
                    link.latency
                ));
            }
            push_overflow(&mut lines, counts.degraded_links, max_items);
        }
    }

    let critical_condition = counts.critical_alerts > 0
        || snapshot.devices.iter().any(|d| d.status.is_severe())
        || snapshot
            .links()
            .iter()
            .any(|c| c.status == LinkStatus::Down);
    if critical_condition {
        lines.push(String::new());
        lines.push(
            "💡 Critical conditions present. Ask me to **analyze root cause** for a full forensic report."
                .to_string(),
        );
    }

    lines.join("\n")
}
