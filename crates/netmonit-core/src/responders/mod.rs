//! Text responders, one per answer path.
//!
//! Every responder is a pure function of the query and the snapshot and
//! renders Markdown-flavored plain text.

pub mod device;
pub mod fallback;
pub mod knowledge;
pub mod navigation;
pub mod status;

use crate::telemetry::{Severity, TelemetrySnapshot};

/// Default cap on listed alerts/devices in status text
pub const DEFAULT_MAX_LISTED: usize = 25;

/// Headline counts used to ground answers in live telemetry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveCounts {
    pub alerts: usize,
    pub critical_alerts: usize,
    pub high_alerts: usize,
    pub devices: usize,
    pub unhealthy_devices: usize,
    pub links: usize,
    pub degraded_links: usize,
}

impl LiveCounts {
    pub fn from_snapshot(snapshot: &TelemetrySnapshot) -> Self {
        let by_severity = |s: Severity| snapshot.alerts.iter().filter(|a| a.severity == s).count();
        Self {
            alerts: snapshot.alerts.len(),
            critical_alerts: by_severity(Severity::Critical),
            high_alerts: by_severity(Severity::High),
            devices: snapshot.devices.len(),
            unhealthy_devices: snapshot.unhealthy_devices().count(),
            links: snapshot.links().len(),
            degraded_links: snapshot.degraded_links().count(),
        }
    }

    /// No alerts and no unhealthy devices
    pub fn is_healthy(&self) -> bool {
        self.alerts == 0 && self.unhealthy_devices == 0
    }

    /// One-line live state, always mentions alerts
    pub fn status_line(&self) -> String {
        format!(
            "Live status: {} active alert(s), {} unhealthy device(s), {} degraded/down link(s).",
            self.alerts, self.unhealthy_devices, self.degraded_links
        )
    }
}

/// Case-insensitive, boundary-safe substring search.
///
/// The match may not be glued to alphanumeric characters on either side, so
/// "d1" is found in "status of d1" but not in "d12".
pub(crate) fn mentions(haystack: &str, needle: &str) -> bool {
    let haystack = haystack.to_lowercase();
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle.as_str()).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}
