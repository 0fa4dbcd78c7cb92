//! Criticality tier for a forensic report.
//!
//! Rules are evaluated top-down, first match wins:
//! 1. extreme: physical/data-link root with confidence >= 0.8,
//!    or any critical alert with confidence >= 0.7
//! 2. high: any alert at high severity or above
//! 3. medium: confidence >= 0.5
//! 4. low
//!
//! Holding confidence fixed, raising any alert's severity never lowers the tier.

use crate::propagation::CausalChain;
use crate::telemetry::{Alert, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    Low,
    Medium,
    High,
    Extreme,
}

impl Criticality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Extreme => "extreme",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Extreme => "EXTREME",
        }
    }

    /// One-line framing appended to report summaries
    pub fn framing(&self) -> &'static str {
        match self {
            Self::Extreme => "Criticality EXTREME: immediate intervention required.",
            Self::High => "Criticality HIGH: prioritize remediation.",
            Self::Medium => "Criticality MEDIUM: schedule remediation and keep monitoring.",
            Self::Low => "Criticality LOW: monitor for recurrence.",
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Derive the report tier from a traced chain and the alerts it was traced from
pub fn derive(chain: &CausalChain, alerts: &[Alert]) -> Criticality {
    // Compare in whole points so 0.7 and 0.8 thresholds are exact
    let points = (chain.confidence_score * 100.0).round() as i64;
    let worst = alerts.iter().map(|a| a.severity).max();

    if chain.primary_fault.layer.is_physical() && points >= 80 {
        return Criticality::Extreme;
    }
    if worst == Some(Severity::Critical) && points >= 70 {
        return Criticality::Extreme;
    }
    if worst.is_some_and(|s| s >= Severity::High) {
        return Criticality::High;
    }
    if points >= 50 {
        return Criticality::Medium;
    }
    Criticality::Low
}
