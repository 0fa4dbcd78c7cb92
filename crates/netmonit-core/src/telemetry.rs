//! Telemetry snapshot model.
//!
//! Alerts, devices, links and workflow dependency paths as handed over by the
//! telemetry collector. Every value here is an immutable input: the engine
//! reads a snapshot and never writes back into it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Layers
// ============================================================================

/// OSI-style layer tag attached to alerts and metrics.
///
/// Unknown tags are preserved verbatim so that sentinel values such as
/// `"None"` or `"Unknown"` round-trip through JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Layer {
    L1,
    L2,
    L3,
    L4,
    L5,
    L6,
    L7,
    Other(String),
}

impl Layer {
    pub const ALL: [Layer; 7] = [
        Layer::L1,
        Layer::L2,
        Layer::L3,
        Layer::L4,
        Layer::L5,
        Layer::L6,
        Layer::L7,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::L3 => "L3",
            Self::L4 => "L4",
            Self::L5 => "L5",
            Self::L6 => "L6",
            Self::L7 => "L7",
            Self::Other(tag) => tag,
        }
    }

    /// Sort rank used for root-cause ordering (L1 first, unknown last)
    pub fn rank(&self) -> u8 {
        match self {
            Self::L1 => 1,
            Self::L2 => 2,
            Self::L3 => 3,
            Self::L4 => 4,
            Self::L5 => 5,
            Self::L6 => 6,
            Self::L7 => 7,
            Self::Other(_) => 99,
        }
    }

    /// Physical or data-link layer
    pub fn is_physical(&self) -> bool {
        matches!(self, Self::L1 | Self::L2)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::L1 => "Physical",
            Self::L2 => "Data Link",
            Self::L3 => "Network",
            Self::L4 => "Transport",
            Self::L5 => "Session",
            Self::L6 => "Presentation",
            Self::L7 => "Application",
            Self::Other(_) => "Unknown",
        }
    }
}

/// Exact tags only; anything else is kept verbatim as `Other`
impl From<&str> for Layer {
    fn from(tag: &str) -> Self {
        match tag {
            "L1" => Self::L1,
            "L2" => Self::L2,
            "L3" => Self::L3,
            "L4" => Self::L4,
            "L5" => Self::L5,
            "L6" => Self::L6,
            "L7" => Self::L7,
            _ => Self::Other(tag.to_string()),
        }
    }
}

impl From<String> for Layer {
    fn from(tag: String) -> Self {
        Layer::from(tag.as_str())
    }
}

impl From<Layer> for String {
    fn from(layer: Layer) -> Self {
        layer.as_str().to_string()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Alerts
// ============================================================================

/// Alert severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Informational alerts never drive a diagnosis
    pub fn is_actionable(&self) -> bool {
        *self != Self::Info
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub severity: Severity,
    pub layer: Layer,
    /// Device name or id as reported by the collector
    pub device: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl Alert {
    /// Whether this alert names the given device (by name or id, case-insensitive)
    pub fn concerns(&self, device: &Device) -> bool {
        self.device.eq_ignore_ascii_case(&device.name) || self.device.eq_ignore_ascii_case(&device.id)
    }
}

// ============================================================================
// Devices
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Healthy,
    Warning,
    Critical,
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Offline => "offline",
        }
    }

    pub fn is_healthy(&self) -> bool {
        *self == Self::Healthy
    }

    /// Critical or offline
    pub fn is_severe(&self) -> bool {
        matches!(self, Self::Critical | Self::Offline)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Server,
    Switch,
    Firewall,
    Router,
    Plc,
    Sensor,
    Gateway,
    Scada,
    #[serde(other)]
    Other,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Switch => "switch",
            Self::Firewall => "firewall",
            Self::Router => "router",
            Self::Plc => "plc",
            Self::Sensor => "sensor",
            Self::Gateway => "gateway",
            Self::Scada => "scada",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeviceCategory {
    #[default]
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "OT")]
    Ot,
}

impl DeviceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::It => "IT",
            Self::Ot => "OT",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhysicalMetrics {
    /// Celsius
    pub temperature: f64,
    /// dBm, fiber links only
    pub optical_rx_power: Option<f64>,
    /// RPM
    pub fan_speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DataLinkMetrics {
    pub crc_errors: u64,
    /// Percentage
    pub link_utilization: f64,
    pub mac_flapping: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkMetrics {
    /// Percentage
    pub packet_loss: f64,
    pub routing_table_size: u64,
    pub firewall_drops: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransportMetrics {
    pub tcp_retransmissions: f64,
    /// Milliseconds
    pub jitter: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionMetrics {
    /// Resets per hour
    pub session_resets: f64,
    /// Percentage
    pub session_stability: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PresentationMetrics {
    /// Failures per hour
    pub tls_handshake_failures: f64,
    pub encryption_overhead_ms: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationMetrics {
    /// Milliseconds
    pub app_latency: f64,
    pub protocol_anomaly: Option<bool>,
}

/// Per-layer device metrics (L1-L7)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceMetrics {
    pub l1: PhysicalMetrics,
    pub l2: DataLinkMetrics,
    pub l3: NetworkMetrics,
    pub l4: TransportMetrics,
    pub l5: SessionMetrics,
    pub l6: PresentationMetrics,
    pub l7: ApplicationMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    pub status: DeviceStatus,
    #[serde(default)]
    pub category: DeviceCategory,
    #[serde(default)]
    pub ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub metrics: DeviceMetrics,
}

/// Resolve an alert's device reference: name first, then id
pub fn resolve_device<'a>(devices: &'a [Device], reference: &str) -> Option<&'a Device> {
    devices
        .iter()
        .find(|d| d.name == reference)
        .or_else(|| devices.iter().find(|d| d.id == reference))
}

/// Display name for a device id, falling back to the id itself
pub fn device_name<'a>(devices: &'a [Device], id: &'a str) -> &'a str {
    devices
        .iter()
        .find(|d| d.id == id)
        .map(|d| d.name.as_str())
        .unwrap_or(id)
}

// ============================================================================
// Links and workflows
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStatus {
    Healthy,
    Degraded,
    Down,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Down => "down",
        }
    }

    pub fn is_healthy(&self) -> bool {
        *self == Self::Healthy
    }
}

impl fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Directed link between two devices (source -> target)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConnection {
    #[serde(default)]
    pub id: String,
    pub source: String,
    pub target: String,
    pub status: LinkStatus,
    /// Mbps
    #[serde(default)]
    pub bandwidth: f64,
    /// Milliseconds
    #[serde(default)]
    pub latency: f64,
}

impl NetworkConnection {
    pub fn touches(&self, device_id: &str) -> bool {
        self.source == device_id || self.target == device_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowCriticality {
    Low,
    Medium,
    High,
    MissionCritical,
}

/// A workflow's device footprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyPath {
    pub app_id: String,
    pub app_name: String,
    pub criticality: WorkflowCriticality,
    /// Ordered device ids
    pub path: Vec<String>,
}

// ============================================================================
// Snapshot
// ============================================================================

/// Everything the engine reads for one call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub devices: Vec<Device>,
    /// `None` when the collector did not report link state at all
    #[serde(default)]
    pub connections: Option<Vec<NetworkConnection>>,
    #[serde(default)]
    pub dependencies: Vec<DependencyPath>,
    /// When the snapshot was taken; anchors the alert recency window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
}

impl TelemetrySnapshot {
    pub fn new(alerts: Vec<Alert>, devices: Vec<Device>) -> Self {
        Self {
            alerts,
            devices,
            ..Default::default()
        }
    }

    pub fn with_connections(mut self, connections: Vec<NetworkConnection>) -> Self {
        self.connections = Some(connections);
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<DependencyPath>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn captured_at(mut self, at: DateTime<Utc>) -> Self {
        self.captured_at = Some(at);
        self
    }

    /// Connections, or an empty slice when none were reported
    pub fn links(&self) -> &[NetworkConnection] {
        self.connections.as_deref().unwrap_or(&[])
    }

    pub fn unhealthy_devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(|d| !d.status.is_healthy())
    }

    pub fn degraded_links(&self) -> impl Iterator<Item = &NetworkConnection> {
        self.links().iter().filter(|c| !c.status.is_healthy())
    }

    /// Any device or link currently not healthy
    pub fn has_live_degradation(&self) -> bool {
        self.unhealthy_devices().next().is_some() || self.degraded_links().next().is_some()
    }
}
