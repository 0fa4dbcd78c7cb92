//! Terminal rendering of analysis results.
//!
//! Text answers are already Markdown and print as-is. Reports are laid out
//! as Markdown sections with the criticality tier colored when writing to a
//! terminal.

use anyhow::Result;
use netmonit_core::criticality::Criticality;
use netmonit_core::forensics::ForensicReport;
use netmonit_core::orchestrator::AnalysisResult;
use owo_colors::OwoColorize;

fn criticality_badge(criticality: Criticality, color: bool) -> String {
    let label = format!("[{}]", criticality.label());
    if !color {
        return label;
    }
    match criticality {
        Criticality::Extreme => label.bright_red().bold().to_string(),
        Criticality::High => label.red().to_string(),
        Criticality::Medium => label.yellow().to_string(),
        Criticality::Low => label.green().to_string(),
    }
}

/// Markdown view of a forensic report
pub fn render_report(report: &ForensicReport, color: bool) -> String {
    let mut lines = vec![
        format!("# Forensic Report {}", criticality_badge(report.criticality, color)),
        String::new(),
        format!("**Root cause:** {}", report.root_cause),
        String::new(),
        report.summary.clone(),
        String::new(),
        "## Chain of Thought".to_string(),
    ];

    for (i, step) in report.chain_of_thought.iter().enumerate() {
        let result = step.result.as_deref().unwrap_or("-");
        lines.push(format!("{}. **{}**: {} -> {}", i + 1, step.agent, step.action, result));
    }

    let renderable: Vec<_> = report.renderable_artifacts().collect();
    if !renderable.is_empty() {
        lines.push(String::new());
        lines.push("## Artifacts".to_string());
        for artifact in &renderable {
            lines.push(format!(
                "- `{}` {}: {}",
                artifact.kind.as_str(),
                artifact.title,
                artifact.description
            ));
        }
    }
    let skipped = report.artifacts.len() - renderable.len();
    if skipped > 0 {
        lines.push(format!("- ({} malformed artifact(s) skipped)", skipped));
    }

    lines.push(String::new());
    lines.push("## Recommendations".to_string());
    for (i, recommendation) in report.recommendations.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, recommendation));
    }

    lines.join("\n")
}

/// Render any analysis result, as JSON or for the terminal
pub fn render_result(result: &AnalysisResult, json: bool, color: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(result)?);
    }
    Ok(match result {
        AnalysisResult::Text(text) => text.clone(),
        AnalysisResult::Report(report) => render_report(report, color),
    })
}
