//! Query orchestration.
//!
//! Routes a query to its answer path:
//! 1. greeting short-circuit
//! 2. intent classification
//! 3. status: device-specific answer, else status listing
//! 4. diagnostic: healthy report if nothing is wrong, else forensic report
//! 5. navigation help
//! 6. general knowledge: offline knowledge base, then the completion client,
//!    then the smart fallback
//!
//! Completion failures never surface: they are logged and masked by the
//! smart fallback.

use crate::config::AnalysisSettings;
use crate::forensics::{self, ForensicReport};
use crate::greetings;
use crate::intent::{classify_query, Intent, Query};
use crate::llm::{build_completion_prompt, CompletionClient};
use crate::responders::{device, fallback, knowledge, navigation, status};
use crate::telemetry::{Alert, TelemetrySnapshot};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Either chat text or a structured forensic report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum AnalysisResult {
    Text(String),
    Report(ForensicReport),
}

impl AnalysisResult {
    pub fn as_report(&self) -> Option<&ForensicReport> {
        match self {
            Self::Report(report) => Some(report),
            Self::Text(_) => None,
        }
    }

    pub fn is_report(&self) -> bool {
        matches!(self, Self::Report(_))
    }
}

/// Analyze a raw single-field query with default settings
pub fn analyze(
    query: &str,
    llm: Option<&dyn CompletionClient>,
    snapshot: &TelemetrySnapshot,
) -> AnalysisResult {
    analyze_query(&Query::parse(query), llm, snapshot, &AnalysisSettings::default())
}

/// Analyze a structured query
pub fn analyze_query(
    query: &Query,
    llm: Option<&dyn CompletionClient>,
    snapshot: &TelemetrySnapshot,
    settings: &AnalysisSettings,
) -> AnalysisResult {
    if let Some(salutation) = greetings::detect(&query.text) {
        debug!("greeting short-circuit");
        return AnalysisResult::Text(greetings::reply(salutation, snapshot));
    }

    match classify_query(query) {
        Intent::StatusCheck => AnalysisResult::Text(
            device::build_device_response(&query.text, snapshot).unwrap_or_else(|| {
                status::build_status_text(snapshot, settings.effective_max_listed_items())
            }),
        ),
        Intent::DiagnosticAnalysis => {
            AnalysisResult::Report(diagnose(&query.text, snapshot, settings))
        }
        Intent::WebsiteAssist => {
            AnalysisResult::Text(navigation::build_website_assist(&query.text, snapshot))
        }
        Intent::GeneralKnowledge => AnalysisResult::Text(answer_general(query, llm, snapshot)),
    }
}

/// Non-info alerts, narrowed to the recency window when the snapshot carries
/// a capture time. Falls back to all actionable alerts if none are recent.
/// The bool reports whether any alert was recent.
fn select_alerts(snapshot: &TelemetrySnapshot, settings: &AnalysisSettings) -> (Vec<Alert>, bool) {
    let actionable: Vec<Alert> = snapshot
        .alerts
        .iter()
        .filter(|a| a.severity.is_actionable())
        .cloned()
        .collect();

    let Some(captured_at) = snapshot.captured_at else {
        let any = !actionable.is_empty();
        return (actionable, any);
    };

    let window = Duration::seconds(settings.effective_recency_window() as i64);
    let recent: Vec<Alert> = actionable
        .iter()
        .filter(|a| captured_at - a.timestamp <= window)
        .cloned()
        .collect();

    if recent.is_empty() {
        (actionable, false)
    } else {
        (recent, true)
    }
}

fn diagnose(text: &str, snapshot: &TelemetrySnapshot, settings: &AnalysisSettings) -> ForensicReport {
    let (alerts, any_recent) = select_alerts(snapshot, settings);

    if !snapshot.has_live_degradation() && !any_recent {
        debug!("no degradation and no recent actionable alerts");
        return forensics::build_healthy_report(text, &snapshot.devices, snapshot.links());
    }

    debug!(alerts = alerts.len(), "building deterministic forensic report");
    forensics::build_deterministic_report(
        text,
        &alerts,
        &snapshot.devices,
        snapshot.links(),
        &snapshot.dependencies,
    )
}

fn answer_general(
    query: &Query,
    llm: Option<&dyn CompletionClient>,
    snapshot: &TelemetrySnapshot,
) -> String {
    if let Some(answer) = knowledge::lookup(&query.text) {
        return answer.to_string();
    }

    let Some(client) = llm else {
        return fallback::build_smart_fallback(&query.text, snapshot);
    };

    let prompt = build_completion_prompt(query, snapshot);
    match client.complete(&prompt) {
        Ok(text) if !text.trim().is_empty() => text,
        Ok(_) => {
            warn!("completion returned empty text, using smart fallback");
            fallback::build_smart_fallback(&query.text, snapshot)
        }
        Err(e) => {
            warn!(error = %e, "completion failed, using smart fallback");
            fallback::build_smart_fallback(&query.text, snapshot)
        }
    }
}
