//! Offline knowledge base for networking and industrial terms.
//!
//! Entries are checked in order; the first with a matching hint answers.
//! More specific entries sit before the general ones they overlap with
//! (Modbus before TCP, RSTP before STP), and the product entry comes last
//! so a term asked about "in NetMonit" still gets its definition.

use crate::intent::{any_match, strip_runtime_context, tokenize, Matcher};
use Matcher::{Phrase, Word};

struct Entry {
    topic: &'static str,
    hints: &'static [Matcher],
    answer: &'static str,
}

const ENTRIES: &[Entry] = &[
    Entry {
        topic: "identity",
        hints: &[Phrase("who are you"), Phrase("what are you"), Phrase("your name")],
        answer: "I'm **NetMonit AI**, the diagnostic assistant built into NetMonit. I read live alerts, device metrics and topology, trace faults from their root layer to downstream symptoms, and explain what I find in plain language.",
    },
    Entry {
        topic: "capabilities",
        hints: &[
            Phrase("what can you do"),
            Phrase("how can you help"),
            Word("capabilities"),
            Phrase("what do you do"),
        ],
        answer: "Here is what I can do:\n- **Status**: list active alerts, unhealthy devices and degraded links\n- **Device details**: name any device to see its metrics, alerts and links\n- **Root Cause Analysis**: trace a fault from its earliest layer through the topology and build a forensic report\n- **Knowledge**: explain networking and industrial terms such as CRC, jitter or Modbus\n- **Navigation**: show where things live in the dashboard",
    },
    Entry {
        topic: "crc",
        hints: &[Word("crc")],
        answer: "**CRC** (Cyclic Redundancy Check) errors indicate data integrity failures at L2. Rising CRC counts usually point to bad cabling, duplex mismatch, EMI, or failing ports and transceivers.",
    },
    Entry {
        topic: "packet loss",
        hints: &[Phrase("packet loss"), Phrase("packets lost")],
        answer: "**Packet loss** is the percentage of packets that never reach their destination. In IT/OT systems, sustained loss cascades into retransmissions, timeout storms and application-level failures.",
    },
    Entry {
        topic: "latency",
        hints: &[Word("latency"), Word("delay")],
        answer: "**Latency** is the end-to-end delay of packet delivery, usually measured in milliseconds. Persistent spikes are often symptoms of congestion, packet loss, queueing, or upstream physical/link instability.",
    },
    Entry {
        topic: "jitter",
        hints: &[Word("jitter")],
        answer: "**Jitter** is the variation in packet delay over time. High jitter can break OT and real-time traffic even when average latency looks acceptable.",
    },
    Entry {
        topic: "osi",
        hints: &[Word("osi")],
        answer: "The **OSI Model** has seven layers, from L1 Physical to L7 Application. In root-cause analysis, faults often originate in the lower layers (L1-L3) and propagate upward as L4-L7 symptoms.",
    },
    Entry {
        topic: "modbus",
        hints: &[Word("modbus")],
        answer: "**Modbus** is a simple request/response industrial protocol. Modbus TCP carries it over Ethernet on port 502; it has no built-in authentication, so it should stay inside segmented OT zones.",
    },
    Entry {
        topic: "tcp",
        hints: &[Word("tcp")],
        answer: "**TCP** (Transmission Control Protocol) is the connection-oriented L4 transport. It guarantees ordered delivery through acknowledgements and retransmissions, so rising retransmission counts are a classic sign of loss further down the stack.",
    },
    Entry {
        topic: "udp",
        hints: &[Word("udp")],
        answer: "**UDP** (User Datagram Protocol) is a connectionless L4 transport with no delivery guarantees. It is used for low-latency traffic such as streaming telemetry, DNS and many industrial discovery protocols.",
    },
    Entry {
        topic: "vlan",
        hints: &[Word("vlan")],
        answer: "A **VLAN** (Virtual LAN) splits one physical switch fabric into isolated L2 broadcast domains. VLANs are the usual first step in separating IT and OT traffic.",
    },
    Entry {
        topic: "scada",
        hints: &[Word("scada")],
        answer: "**SCADA** (Supervisory Control and Data Acquisition) systems collect data from PLCs and field devices and let operators supervise industrial processes. They are highly sensitive to latency and packet loss.",
    },
    Entry {
        topic: "plc",
        hints: &[Word("plc")],
        answer: "A **PLC** (Programmable Logic Controller) is a ruggedized computer that runs control logic for machines and processes. PLCs expect deterministic network timing and react badly to jitter.",
    },
    Entry {
        topic: "rstp",
        hints: &[Word("rstp")],
        answer: "**RSTP** (Rapid Spanning Tree Protocol, 802.1w) converges in seconds instead of the 30-50 seconds of classic STP, which makes it the usual choice for industrial ring topologies.",
    },
    Entry {
        topic: "stp",
        hints: &[Word("stp"), Phrase("spanning tree")],
        answer: "**STP** (Spanning Tree Protocol) blocks redundant L2 paths to prevent broadcast loops. A topology change triggers reconvergence, during which traffic on the affected segment can stall.",
    },
    Entry {
        topic: "qos",
        hints: &[Word("qos"), Phrase("quality of service")],
        answer: "**QoS** (Quality of Service) prioritizes traffic classes so that control and real-time traffic keeps its latency budget when links are congested.",
    },
    Entry {
        topic: "firewall",
        hints: &[Word("firewall")],
        answer: "A **Firewall** filters traffic between zones according to policy. In OT networks firewalls enforce the conduits between cells, and rising drop counters can reveal both attacks and misconfigured rules.",
    },
    Entry {
        topic: "dns",
        hints: &[Word("dns")],
        answer: "**DNS** (Domain Name System) resolves names to IP addresses. Slow or failing DNS often shows up as application timeouts even when the network path is healthy.",
    },
    Entry {
        topic: "snmp",
        hints: &[Word("snmp")],
        answer: "**SNMP** (Simple Network Management Protocol) polls counters and receives traps from network devices. It is the classic source of interface, CRC and temperature telemetry.",
    },
    Entry {
        topic: "bandwidth",
        hints: &[Word("bandwidth"), Word("throughput")],
        answer: "**Bandwidth** is the maximum capacity of a link; throughput is what is actually delivered. A large gap between the two points to loss, retransmissions or congestion.",
    },
    Entry {
        topic: "duplex",
        hints: &[Word("duplex")],
        answer: "**Duplex** describes whether a link sends and receives at the same time. A duplex mismatch (one side full, the other half) produces late collisions and steadily rising CRC errors.",
    },
    Entry {
        topic: "ethernet/ip",
        hints: &[Phrase("ethernet ip"), Word("cip")],
        answer: "**EtherNet/IP** is an industrial protocol that carries CIP (Common Industrial Protocol) over standard Ethernet and TCP/UDP. Its cyclic I/O traffic is sensitive to multicast flooding and jitter.",
    },
    Entry {
        topic: "profinet",
        hints: &[Word("profinet")],
        answer: "**PROFINET** is an industrial Ethernet standard for real-time automation. Its RT and IRT classes need tightly bounded latency, so L1/L2 instability hits it quickly.",
    },
    Entry {
        topic: "ospf",
        hints: &[Word("ospf")],
        answer: "**OSPF** (Open Shortest Path First) is a link-state interior routing protocol. Flapping adjacencies cause route churn and transient L3 packet loss.",
    },
    Entry {
        topic: "bgp",
        hints: &[Word("bgp")],
        answer: "**BGP** (Border Gateway Protocol) exchanges routes between autonomous systems. In industrial sites it usually appears at the WAN edge linking plants and data centers.",
    },
    Entry {
        topic: "arp",
        hints: &[Word("arp")],
        answer: "**ARP** (Address Resolution Protocol) maps IPv4 addresses to MAC addresses. ARP storms or spoofing can disrupt an entire L2 segment.",
    },
    Entry {
        topic: "nat",
        hints: &[Word("nat")],
        answer: "**NAT** (Network Address Translation) rewrites addresses as traffic crosses a boundary. It is often used to reach legacy OT devices with overlapping address plans.",
    },
    Entry {
        topic: "opc ua",
        hints: &[Phrase("opc ua"), Word("opcua")],
        answer: "**OPC UA** (Open Platform Communications Unified Architecture) is a secure, platform-independent industrial data exchange standard with built-in encryption and an information model.",
    },
    Entry {
        topic: "it/ot",
        hints: &[Phrase("it ot"), Phrase("ot convergence")],
        answer: "**IT/OT** convergence joins enterprise IT networks with operational technology networks. It brings visibility and analytics to the plant floor but also widens the attack surface, so segmentation matters.",
    },
    Entry {
        topic: "mac flapping",
        hints: &[Phrase("mac flapping"), Phrase("mac flap")],
        answer: "**MAC flapping** happens when a switch learns the same MAC address on different ports in quick succession. It usually points to an L2 loop or a misbehaving redundant link.",
    },
    Entry {
        topic: "retransmissions",
        hints: &[Word("retransmission")],
        answer: "**TCP retransmissions** are resent segments that were not acknowledged in time. They are a symptom, not a cause: look for loss, jitter or congestion further down the stack.",
    },
    Entry {
        topic: "netmonit",
        hints: &[Word("netmonit")],
        answer: "NetMonit is an Industrial IT/OT network observability platform. It monitors switches, routers, PLCs and sensors across all seven layers, correlates alerts over the topology, and explains the root cause of faults before they cascade into production workflows.",
    },
];

/// Offline answer for `query`, or `None` when no entry matches
pub fn lookup(query: &str) -> Option<&'static str> {
    let tokens = tokenize(strip_runtime_context(query));
    ENTRIES
        .iter()
        .find(|e| any_match(e.hints, &tokens))
        .map(|e| e.answer)
}

/// Topic name of the matching entry
pub fn topic(query: &str) -> Option<&'static str> {
    let tokens = tokenize(strip_runtime_context(query));
    ENTRIES
        .iter()
        .find(|e| any_match(e.hints, &tokens))
        .map(|e| e.topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_entries_win() {
        assert_eq!(topic("what is Modbus TCP?"), Some("modbus"));
        assert_eq!(topic("RSTP convergence"), Some("rstp"));
        assert_eq!(topic("IT/OT convergence"), Some("it/ot"));
        assert_eq!(topic("what is CRC in NetMonit?"), Some("crc"));
        assert_eq!(topic("what is NetMonit?"), Some("netmonit"));
    }

    #[test]
    fn test_topic_words_are_whole_tokens() {
        // "nat" inside "national" and "arp" inside "sharp" must not match
        assert_eq!(topic("national sharp weather"), None);
    }
}
