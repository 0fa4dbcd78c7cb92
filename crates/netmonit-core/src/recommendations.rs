//! Remediation playbooks keyed by root-cause layer.

use crate::telemetry::Layer;

const L1_PLAYBOOK: &[&str] = &[
    "Inspect fiber/copper plant on the affected link (connectors, bends, patching).",
    "Validate transceiver/optics levels and clean or replace optics that are out of spec.",
    "Check for environmental contributors (temperature, power) on the edge switch or port.",
];

const L2_PLAYBOOK: &[&str] = &[
    "Check for CRC error sources (duplex mismatch, bad cable, EMI, failing port).",
    "Verify VLAN and STP configuration consistency across the affected segment.",
    "Capture interface counters over time to confirm whether errors are persistent.",
];

const L3_PLAYBOOK: &[&str] = &[
    "Validate routing adjacencies and confirm there is no route churn.",
    "Check packet-loss hotspots along the path (drops, ACL and firewall counters).",
    "Confirm subnets and addressing match the intended OT zones.",
];

const L4_PLAYBOOK: &[&str] = &[
    "Inspect retransmissions and timeouts and correlate them with upstream loss or jitter.",
    "Check connection limits and timeouts on endpoints (PLC/SCADA) and intermediate hops.",
];

const SESSION_PLAYBOOK: &[&str] = &[
    "Review session resets and handshake failures; confirm certificates and time sync.",
    "Validate policy changes and recent config deployments affecting sessions.",
];

const L7_PLAYBOOK: &[&str] = &[
    "Check application/service saturation and recent deploys (SCADA runtime, DB, brokers).",
    "Validate protocol-level anomalies with endpoint logs and transaction traces.",
];

const FALLBACK_PLAYBOOK: &[&str] =
    &["Collect additional telemetry; current evidence is insufficient for confident remediation."];

/// Curated remediation steps for a root-cause layer. Never empty.
pub fn for_layer(layer: &Layer) -> Vec<String> {
    let playbook = match layer {
        Layer::L1 => L1_PLAYBOOK,
        Layer::L2 => L2_PLAYBOOK,
        Layer::L3 => L3_PLAYBOOK,
        Layer::L4 => L4_PLAYBOOK,
        Layer::L5 | Layer::L6 => SESSION_PLAYBOOK,
        Layer::L7 => L7_PLAYBOOK,
        Layer::Other(_) => FALLBACK_PLAYBOOK,
    };
    playbook.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_layer_has_steps() {
        for layer in Layer::ALL.iter() {
            assert!(!for_layer(layer).is_empty(), "{} has no playbook", layer);
        }
    }

    #[test]
    fn test_session_layers_share_playbook() {
        assert_eq!(for_layer(&Layer::L5), for_layer(&Layer::L6));
    }

    #[test]
    fn test_unknown_layer_asks_for_telemetry() {
        let steps = for_layer(&Layer::from("Unknown"));
        assert_eq!(steps.len(), 1);
        assert!(steps[0].contains("telemetry"));
    }
}
