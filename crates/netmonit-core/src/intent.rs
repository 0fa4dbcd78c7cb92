//! Intent classification.
//!
//! Runs before any responder to pick the answer path:
//! - DiagnosticAnalysis: forensic report
//! - WebsiteAssist: dashboard navigation help
//! - StatusCheck: live status listing
//! - GeneralKnowledge: knowledge base, then the optional completion client
//!
//! Classification is an ordered rule table of token matchers. Matching is
//! done on whole tokens so that "unhealthy" never counts as "health".

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Separates user-typed text from machine-appended state in a raw query
pub const RUNTIME_CONTEXT_MARKER: &str = "RUNTIME SYSTEM CONTEXT:";

// ============================================================================
// Query input
// ============================================================================

/// Everything before the runtime context marker, trimmed
pub fn strip_runtime_context(raw: &str) -> &str {
    match raw.find(RUNTIME_CONTEXT_MARKER) {
        Some(idx) => raw[..idx].trim(),
        None => raw.trim(),
    }
}

/// A user query with optional machine-appended context kept apart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Query {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_string(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        let context = context.trim();
        self.context = (!context.is_empty()).then(|| context.to_string());
        self
    }

    /// Split a single-field query on the runtime context marker
    pub fn parse(raw: &str) -> Self {
        match raw.find(RUNTIME_CONTEXT_MARKER) {
            Some(idx) => {
                let context = raw[idx + RUNTIME_CONTEXT_MARKER.len()..].trim();
                Self {
                    text: raw[..idx].trim().to_string(),
                    context: (!context.is_empty()).then(|| context.to_string()),
                }
            }
            None => Self::new(raw),
        }
    }

    /// Re-join into the single-field form
    pub fn to_raw(&self) -> String {
        match &self.context {
            Some(context) => format!("{} {} {}", self.text, RUNTIME_CONTEXT_MARKER, context),
            None => self.text.clone(),
        }
    }

    pub fn tokens(&self) -> Vec<String> {
        tokenize(&self.text)
    }
}

impl From<&str> for Query {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

// ============================================================================
// Token matching
// ============================================================================

/// Lower-cased alphanumeric tokens
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Boundary-safe matcher over a token stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Whole token, optionally with a plural "s"
    Word(&'static str),
    /// Token starting with the stem
    Prefix(&'static str),
    /// Consecutive tokens, space separated
    Phrase(&'static str),
}

impl Matcher {
    pub fn matches(&self, tokens: &[String]) -> bool {
        match self {
            Self::Word(word) => tokens
                .iter()
                .any(|t| t.as_str() == *word || t.strip_suffix('s') == Some(*word)),
            Self::Prefix(stem) => tokens.iter().any(|t| t.starts_with(*stem)),
            Self::Phrase(phrase) => {
                let parts: Vec<&str> = phrase.split_whitespace().collect();
                !parts.is_empty()
                    && tokens
                        .windows(parts.len())
                        .any(|w| w.iter().zip(&parts).all(|(t, p)| t.as_str() == *p))
            }
        }
    }
}

/// Whether any matcher hits
pub fn any_match(matchers: &[Matcher], tokens: &[String]) -> bool {
    matchers.iter().any(|m| m.matches(tokens))
}

// ============================================================================
// Intents
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    StatusCheck,
    DiagnosticAnalysis,
    WebsiteAssist,
    GeneralKnowledge,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StatusCheck => "STATUS_CHECK",
            Self::DiagnosticAnalysis => "DIAGNOSTIC_ANALYSIS",
            Self::WebsiteAssist => "WEBSITE_ASSIST",
            Self::GeneralKnowledge => "GENERAL_KNOWLEDGE",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

use Matcher::{Phrase, Prefix, Word};

const DIAGNOSTIC_HINTS: &[Matcher] = &[
    Prefix("analyz"),
    Prefix("analys"),
    Phrase("root cause"),
    Word("rca"),
    Word("why"),
    Word("wrong"),
    Prefix("diagnos"),
    Prefix("investigat"),
    Phrase("blast radius"),
    Word("trace"),
    Prefix("propagat"),
    Prefix("troubleshoot"),
    Phrase("security scan"),
    Prefix("vulnerabilit"),
    Word("slow"),
    Word("timeout"),
    Phrase("timed out"),
    Word("failure"),
    Word("impact"),
];

const WEBSITE_HINTS: &[Matcher] = &[
    Phrase("where is"),
    Phrase("where can i find"),
    Phrase("how do i"),
    Phrase("how to"),
    Phrase("which button"),
    Phrase("which tab"),
    Word("navigate"),
    Word("dashboard"),
    Prefix("guide"),
    Word("tutorial"),
    Word("walkthrough"),
    Word("click"),
    Phrase("select a device"),
    Phrase("device details"),
    Phrase("device info"),
    Phrase("side panel"),
    Phrase("detail panel"),
    Phrase("help me use"),
    Word("heatmap"),
    Phrase("heat map"),
    Phrase("color grid"),
    Phrase("import data"),
    Phrase("system logs"),
    Phrase("kpi intelligence"),
    Phrase("3d topology"),
    Phrase("analytics view"),
    Phrase("layer view"),
];

const STATUS_HINTS: &[Matcher] = &[
    Word("status"),
    Word("alert"),
    Word("health"),
    Word("healthy"),
    Word("summary"),
    Word("overview"),
    Word("sitrep"),
    Word("problem"),
    Phrase("how is"),
    Word("criticals"),
    Phrase("show critical"),
    Phrase("are down"),
    Phrase("is down"),
    Phrase("is offline"),
];

/// Ordered rule table; first intent with a matching hint wins
const RULES: &[(Intent, &[Matcher])] = &[
    (Intent::DiagnosticAnalysis, DIAGNOSTIC_HINTS),
    (Intent::WebsiteAssist, WEBSITE_HINTS),
    (Intent::StatusCheck, STATUS_HINTS),
];

/// Classify a structured query; only `text` takes part
pub fn classify_query(query: &Query) -> Intent {
    let tokens = query.tokens();
    let intent = RULES
        .iter()
        .find(|(_, hints)| any_match(hints, &tokens))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::GeneralKnowledge);
    debug!(intent = intent.as_str(), tokens = tokens.len(), "classified query");
    intent
}

/// Classify a raw single-field query
pub fn classify(raw: &str) -> Intent {
    classify_query(&Query::parse(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        tokenize(s)
    }

    #[test]
    fn test_word_matcher_allows_plural_only() {
        assert!(Word("alert").matches(&toks("show alerts")));
        assert!(Word("health").matches(&toks("check health")));
        assert!(!Word("health").matches(&toks("3 unhealthy nodes")));
        assert!(!Word("health").matches(&toks("healthcheck")));
    }

    #[test]
    fn test_phrase_matcher_needs_adjacent_tokens() {
        assert!(Phrase("root cause").matches(&toks("find the Root-Cause now")));
        assert!(!Phrase("root cause").matches(&toks("root of the cause")));
        assert!(!Phrase("").matches(&toks("anything")));
    }

    #[test]
    fn test_prefix_matcher() {
        assert!(Prefix("diagnos").matches(&toks("diagnostic scan")));
        assert!(!Prefix("analyz").matches(&toks("analytics view")));
    }

    #[test]
    fn test_query_parse_and_rejoin() {
        let q = Query::parse("what is up RUNTIME SYSTEM CONTEXT: devices=3");
        assert_eq!(q.text, "what is up");
        assert_eq!(q.context.as_deref(), Some("devices=3"));
        assert_eq!(Query::parse(&q.to_raw()), q);

        let bare = Query::parse("  hello ");
        assert_eq!(bare.text, "hello");
        assert!(bare.context.is_none());
    }
}
