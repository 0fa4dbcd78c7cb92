//! Last-resort answer when neither the knowledge base nor a completion
//! client could answer. Always non-empty and grounded in live counts.

use super::device::build_device_response;
use super::LiveCounts;
use crate::telemetry::TelemetrySnapshot;

pub fn build_smart_fallback(query: &str, snapshot: &TelemetrySnapshot) -> String {
    if let Some(answer) = build_device_response(query, snapshot) {
        return answer;
    }

    let counts = LiveCounts::from_snapshot(snapshot);

    if counts.is_healthy() && counts.degraded_links == 0 {
        return format!(
            "I don't have an offline answer for that yet. The network looks healthy: all {} devices are reporting normally and there are no active alerts. Try asking about network status, a specific device, or a term like CRC or jitter.",
            counts.devices
        );
    }

    let mut lines = vec![
        "I don't have an offline answer for that, but here is what the live telemetry shows:".to_string(),
        String::new(),
        format!(
            "- {} active alert(s) ({} critical, {} high)",
            counts.alerts, counts.critical_alerts, counts.high_alerts
        ),
        format!("- {} of {} device(s) unhealthy", counts.unhealthy_devices, counts.devices),
        format!("- {} degraded/down link(s)", counts.degraded_links),
    ];

    if let Some(worst) = snapshot.alerts.iter().max_by_key(|a| a.severity) {
        lines.push(String::new());
        lines.push(format!(
            "Most severe alert: [{}] {} on {}: {}",
            worst.severity.as_str().to_uppercase(),
            worst.layer,
            worst.device,
            worst.message
        ));
    }

    lines.push(String::new());
    lines.push("Ask me to **analyze root cause** for a full forensic report.".to_string());
    lines.join("\n")
}
