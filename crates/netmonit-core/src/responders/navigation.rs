//! Dashboard navigation help.
//!
//! Every answer ends with the live status line so that even a static
//! "where is X" question is grounded in the current telemetry.

use super::LiveCounts;
use crate::intent::{any_match, strip_runtime_context, tokenize, Matcher};
use crate::telemetry::TelemetrySnapshot;
use Matcher::{Phrase, Prefix, Word};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    RootCause,
    DeviceDetails,
    Topology,
    ForensicCockpit,
    Guide,
    Assistant,
    Heatmap,
    Alerts,
    Overview,
}

const TOPICS: &[(Topic, &[Matcher])] = &[
    (Topic::RootCause, &[Phrase("root cause"), Word("rca")]),
    (Topic::ForensicCockpit, &[Prefix("forensic")]),
    (Topic::Heatmap, &[Word("heatmap"), Phrase("heat map"), Phrase("color grid")]),
    (
        Topic::DeviceDetails,
        &[
            Word("click"),
            Word("device"),
            Word("sensor"),
            Prefix("detail"),
            Phrase("side panel"),
            Word("info"),
        ],
    ),
    (Topic::Topology, &[Word("topology"), Phrase("3d"), Word("map")]),
    (
        Topic::Guide,
        &[Prefix("guide"), Word("tutorial"), Word("walkthrough"), Phrase("help me use")],
    ),
    (Topic::Assistant, &[Word("ai"), Word("chat"), Word("assistant")]),
    (Topic::Alerts, &[Word("alert"), Word("warning"), Word("critical")]),
];

fn topic_lines(topic: Topic, counts: &LiveCounts) -> Vec<String> {
    let lines: &[&str] = match topic {
        Topic::RootCause => &[
            "To run root cause analysis:",
            "1) Click **Root Cause Analysis** in the header. NetMonit AI reads all alerts and device data, then tells you what broke, why, and how to fix it.",
            "2) Or click **AI Root Cause** on any alert card for a per-alert analysis.",
            "3) Or use **Run Diagnostic Scan** to trigger a full scan with forensic results.",
        ],
        Topic::DeviceDetails => &[
            "To see details for any device (sensor, switch, PLC, router):",
            "1) In the 3D Topology map, click the device node. A detail panel slides in from the right.",
            "2) Or click its row in the Asset Status list below the map.",
            "",
            "The detail panel shows status, live metrics (temperature, latency, CRC errors, packet loss, jitter) and the upstream/downstream neighbors.",
        ],
        Topic::Topology => &[
            "The **3D Topology** view is the default dashboard view.",
            "Devices are laid out by zone and links are colored by health. Drag to rotate, scroll to zoom, and click any node for its detail panel.",
        ],
        Topic::ForensicCockpit => &[
            "**Forensic Cockpit** opens from the header button of the same name.",
            "It starts with a live summary of alerts, unhealthy devices and degraded links, and lets you ask follow-up questions such as \"Analyze the cable fault\".",
            "Each investigation shows the chain of thought from root cause through the propagation path.",
        ],
        Topic::Guide => &[
            "Click the book icon (📖) in the header to open the Visual Guide.",
            "It walks through running a diagnostic scan, opening device details, reading the heatmap and alerts, and using the Forensic Cockpit and AI chat.",
        ],
        Topic::Assistant => &[
            "**NetMonit AI** opens from the header button or the floating chat launcher.",
            "Ask it about terms (\"What is CRC?\"), live status (\"List critical devices\") or causes (\"Why is the network slow?\").",
        ],
        Topic::Heatmap => &[
            "The **Network Health Heatmap** is the color grid below the 3D map.",
            "Rows are devices, columns are the seven layers (L1-L7): green is healthy, yellow needs attention, red is a problem.",
            "Cell values come from live device metrics such as temperature, CRC errors, packet loss and latency.",
        ],
        Topic::Alerts => &[
            "**Active Alerts** appear in the panel on the 3D Topology view.",
            "Each alert shows severity, device, layer and message. Click **AI Root Cause** on a card for an explanation.",
        ],
        Topic::Overview => &[
            "Here's how to navigate the dashboard:",
            "",
            "📖 **Guide**: step-by-step visual walkthrough from the header.",
            "🔍 **Run Diagnostic Scan**: scans all devices and opens forensic results.",
            "👆 **Click any device**: opens a detail panel with all metrics.",
            "🤖 **Root Cause Analysis**: one-click analysis of all active issues.",
            "🔬 **Forensic Cockpit**: deep investigation with chain-of-thought analysis.",
            "💬 **NetMonit AI**: chat assistant for questions about your network.",
            "📊 **Views**: 3D Topology, Analytics, KPI Intelligence, System Logs.",
        ],
    };

    let mut out: Vec<String> = lines.iter().map(|s| s.to_string()).collect();
    out.push(String::new());
    out.push(format!(
        "{} Devices: {}, links: {}.",
        counts.status_line(),
        counts.devices,
        counts.links
    ));
    out
}

/// Navigation guidance for `query`, grounded with live counts
pub fn build_website_assist(query: &str, snapshot: &TelemetrySnapshot) -> String {
    let tokens = tokenize(strip_runtime_context(query));
    let topic = TOPICS
        .iter()
        .find(|(_, hints)| any_match(hints, &tokens))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::Overview);
    topic_lines(topic, &LiveCounts::from_snapshot(snapshot)).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_selection() {
        let pick = |q: &str| {
            let tokens = tokenize(q);
            TOPICS
                .iter()
                .find(|(_, hints)| any_match(hints, &tokens))
                .map(|(t, _)| *t)
        };
        assert_eq!(pick("how do I open forensic cockpit"), Some(Topic::ForensicCockpit));
        assert_eq!(pick("where is the heatmap?"), Some(Topic::Heatmap));
        assert_eq!(pick("how do I click a device to see details?"), Some(Topic::DeviceDetails));
        assert_eq!(pick("where is the 3d topology"), Some(Topic::Topology));
        assert_eq!(pick("navigate to import data"), None);
    }
}
