//! Optional completion collaborator.
//!
//! The engine only ever asks for `complete(prompt) -> text`, and only to
//! backstop knowledge-base misses. Output is opaque text and is never parsed.
//!
//! - [`HttpCompletionClient`]: Ollama or OpenAI-compatible HTTP backend with
//!   bounded timeouts, transient-failure retries and an optional fallback model
//! - [`QuotaGuard`]: per-minute and per-day request limits around any client
//! - [`FakeCompletionClient`]: scripted responses for tests

use crate::config::LlmConfig;
use crate::intent::Query;
use crate::propagation;
use crate::telemetry::TelemetrySnapshot;
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, warn};

/// Base delay before the first retry
const BACKOFF_BASE_MS: u64 = 700;
/// Upper bound (exclusive) of the random jitter added to each backoff
const BACKOFF_JITTER_MS: u64 = 200;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LlmError {
    #[error("Completion client is disabled in configuration")]
    Disabled,

    #[error("HTTP error: {message}")]
    Http { status: Option<u16>, message: String },

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Request quota reached ({remaining_minute}/{per_minute} left this minute, {remaining_today}/{daily} left today)")]
    QuotaExhausted {
        remaining_minute: u32,
        per_minute: u32,
        remaining_today: u32,
        daily: u32,
    },

    #[error("Completion returned an empty response")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Overload or timeout; worth retrying after a backoff
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Http {
                status: Some(status),
                ..
            } => matches!(status, 429 | 502 | 503 | 504),
            _ => false,
        }
    }
}

/// Injected completion capability
pub trait CompletionClient: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

// ============================================================================
// HTTP backend
// ============================================================================

/// Delay before retry number `attempt` (1-based)
pub fn backoff_delay(attempt: u32, jitter_ms: u64) -> Duration {
    let exponent = attempt.saturating_sub(1).min(16);
    Duration::from_millis(BACKOFF_BASE_MS * (1u64 << exponent) + jitter_ms)
}

pub struct HttpCompletionClient {
    config: LlmConfig,
    client: reqwest::blocking::Client,
}

impl HttpCompletionClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.effective_timeout()))
            .build()
            .map_err(|e| LlmError::Http {
                status: None,
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { config, client })
    }

    /// Check if endpoint is Ollama-style
    fn is_ollama_endpoint(&self) -> bool {
        self.config.endpoint.contains("11434") || self.config.endpoint.contains("ollama")
    }

    fn send_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            LlmError::Timeout(self.config.effective_timeout())
        } else {
            LlmError::Http {
                status: e.status().map(|s| s.as_u16()),
                message: format!("Request failed: {}", e),
            }
        }
    }

    fn call_ollama(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.config.endpoint.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": model,
            "prompt": prompt,
            "stream": false,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Http {
                status: Some(status.as_u16()),
                message: format!("HTTP {} from Ollama", status),
            });
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        json.get("response")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or(LlmError::EmptyResponse)
    }

    fn call_openai_compatible(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/v1/chat/completions", self.config.endpoint.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": model,
            "messages": [
                {"role": "user", "content": prompt},
            ],
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(api_key) = self.config.api_key() {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().map_err(|e| self.send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Http {
                status: Some(status.as_u16()),
                message: format!("HTTP {} from OpenAI-compatible API", status),
            });
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        json.get("choices")
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("message"))
            .and_then(|v| v.get("content"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or(LlmError::EmptyResponse)
    }

    fn call_once(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let text = if self.is_ollama_endpoint() {
            self.call_ollama(model, prompt)?
        } else {
            self.call_openai_compatible(model, prompt)?
        };
        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }

    /// Call `model`, retrying transient failures with exponential backoff
    fn call_with_retry(&self, model: &str, prompt: &str) -> Result<String, LlmError> {
        let max_attempts = self.config.effective_max_attempts();
        let mut attempt = 1;
        loop {
            match self.call_once(model, prompt) {
                Ok(text) => return Ok(text),
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    let delay = backoff_delay(attempt, rand::thread_rng().gen_range(0..BACKOFF_JITTER_MS));
                    debug!(model, attempt, delay_ms = delay.as_millis() as u64, error = %e, "transient completion failure, retrying");
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl CompletionClient for HttpCompletionClient {
    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        if !self.config.enabled {
            return Err(LlmError::Disabled);
        }

        match self.call_with_retry(&self.config.model, prompt) {
            Ok(text) => Ok(text),
            Err(e) if e.is_transient() => match self.config.fallback() {
                Some(fallback) => {
                    warn!(primary = %self.config.model, fallback, error = %e, "primary model overloaded, trying fallback");
                    self.call_with_retry(fallback, prompt)
                }
                None => Err(e),
            },
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// Quota guard
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatus {
    pub per_minute_limit: u32,
    pub daily_limit: u32,
    pub used_last_minute: u32,
    pub used_today: u32,
    pub remaining_this_minute: u32,
    pub remaining_today: u32,
}

impl QuotaStatus {
    pub fn is_exhausted(&self) -> bool {
        self.remaining_this_minute == 0 || self.remaining_today == 0
    }

    fn to_error(self) -> LlmError {
        LlmError::QuotaExhausted {
            remaining_minute: self.remaining_this_minute,
            per_minute: self.per_minute_limit,
            remaining_today: self.remaining_today,
            daily: self.daily_limit,
        }
    }
}

#[derive(Debug)]
struct QuotaState {
    day: NaiveDate,
    used_today: u32,
    recent: VecDeque<DateTime<Utc>>,
}

impl QuotaState {
    fn roll(&mut self, now: DateTime<Utc>) {
        if self.day != now.date_naive() {
            self.day = now.date_naive();
            self.used_today = 0;
        }
        let minute_ago = now - ChronoDuration::seconds(60);
        while self.recent.front().is_some_and(|t| *t < minute_ago) {
            self.recent.pop_front();
        }
    }
}

/// Rate-limits any completion client; over-limit calls never reach it
pub struct QuotaGuard<C> {
    inner: C,
    per_minute_limit: u32,
    daily_limit: u32,
    state: Mutex<QuotaState>,
}

impl<C: CompletionClient> QuotaGuard<C> {
    pub fn new(inner: C, per_minute_limit: u32, daily_limit: u32) -> Self {
        Self {
            inner,
            per_minute_limit,
            daily_limit,
            state: Mutex::new(QuotaState {
                day: Utc::now().date_naive(),
                used_today: 0,
                recent: VecDeque::new(),
            }),
        }
    }

    pub fn from_config(inner: C, config: &LlmConfig) -> Self {
        Self::new(inner, config.per_minute_limit, config.daily_limit)
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn status_of(&self, state: &QuotaState) -> QuotaStatus {
        let used_last_minute = state.recent.len() as u32;
        QuotaStatus {
            per_minute_limit: self.per_minute_limit,
            daily_limit: self.daily_limit,
            used_last_minute,
            used_today: state.used_today,
            remaining_this_minute: self.per_minute_limit.saturating_sub(used_last_minute),
            remaining_today: self.daily_limit.saturating_sub(state.used_today),
        }
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> QuotaStatus {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.roll(now);
        self.status_of(&state)
    }

    pub fn status(&self) -> QuotaStatus {
        self.status_at(Utc::now())
    }

    /// Reserve one request slot at `now`
    pub fn try_acquire_at(&self, now: DateTime<Utc>) -> Result<QuotaStatus, LlmError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.roll(now);
        let status = self.status_of(&state);
        if status.is_exhausted() {
            return Err(status.to_error());
        }
        state.recent.push_back(now);
        state.used_today += 1;
        Ok(self.status_of(&state))
    }
}

impl<C: CompletionClient> CompletionClient for QuotaGuard<C> {
    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let status = self.try_acquire_at(Utc::now())?;
        debug!(
            remaining_minute = status.remaining_this_minute,
            remaining_today = status.remaining_today,
            "completion quota reserved"
        );
        self.inner.complete(prompt)
    }
}

// ============================================================================
// Fake client
// ============================================================================

/// Scripted client for tests.
///
/// Responses are consumed in order; the last one repeats forever. With no
/// responses every call fails with `EmptyResponse`.
pub struct FakeCompletionClient {
    responses: Mutex<Vec<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeCompletionClient {
    pub fn new(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn always_ok(text: impl Into<String>) -> Self {
        Self::new(vec![Ok(text.into())])
    }

    pub fn always_error(error: LlmError) -> Self {
        Self::new(vec![Err(error)])
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl CompletionClient for FakeCompletionClient {
    fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        let mut responses = self.responses.lock().unwrap_or_else(PoisonError::into_inner);
        match responses.len() {
            0 => Err(LlmError::EmptyResponse),
            1 => responses[0].clone(),
            _ => responses.remove(0),
        }
    }
}

// ============================================================================
// Prompt
// ============================================================================

/// Prompt for a general-knowledge question the offline knowledge base missed.
///
/// Carries the deterministic causal chain so that any telemetry-related
/// answer stays consistent with the tracer.
pub fn build_completion_prompt(query: &Query, snapshot: &TelemetrySnapshot) -> String {
    let chain = propagation::trace(
        &snapshot.alerts,
        &snapshot.devices,
        snapshot.links(),
        &snapshot.dependencies,
    );
    let chain_json = serde_json::to_string_pretty(&chain).unwrap_or_else(|_| "{}".to_string());

    let alerts: Vec<serde_json::Value> = snapshot
        .alerts
        .iter()
        .map(|a| {
            serde_json::json!({
                "id": a.id,
                "severity": a.severity,
                "device": a.device,
                "layer": a.layer,
                "message": a.message,
                "timestamp": a.timestamp,
            })
        })
        .collect();
    let devices: Vec<serde_json::Value> = snapshot
        .devices
        .iter()
        .map(|d| {
            serde_json::json!({
                "name": d.name,
                "type": d.kind,
                "status": d.status,
                "ip": d.ip,
            })
        })
        .collect();
    let to_json = |v: &Vec<serde_json::Value>| serde_json::to_string_pretty(v).unwrap_or_default();

    let mut prompt = String::new();
    prompt.push_str("You are NetMonit AI, an industrial IT/OT observability intelligence engine.\n\n");
    prompt.push_str("Classify the question first:\n");
    prompt.push_str("1. GENERAL KNOWLEDGE (\"What is CRC?\", \"Explain TCP\"): answer educationally, ignore telemetry.\n");
    prompt.push_str("2. STATUS CHECK (\"What devices are down?\"): list items from RAW TELEMETRY.\n");
    prompt.push_str("3. DIAGNOSTIC ANALYSIS (\"Why is the system slow?\"): use the CAUSAL CHAIN as the factual basis; ");
    prompt.push_str("state the conclusion, explain the propagation path, cite the evidence.\n\n");

    prompt.push_str("=== CAUSAL CHAIN (deterministic) ===\n");
    prompt.push_str(&chain_json);
    prompt.push_str("\n\n=== EVIDENCE PACK ===\n");
    prompt.push_str(&format!(
        "- Triggering alert: {}\n- Root layer: {}\n- Confidence: {:.1}% ({})\n\n",
        chain.evidence.triggering_alert_id,
        chain.evidence.root_layer,
        chain.confidence_score * 100.0,
        chain.confidence_reason
    ));

    prompt.push_str("=== RAW TELEMETRY ===\nActive alerts:\n");
    prompt.push_str(&to_json(&alerts));
    prompt.push_str("\n\nDevices:\n");
    prompt.push_str(&to_json(&devices));

    if let Some(context) = &query.context {
        prompt.push_str("\n\n=== RUNTIME CONTEXT ===\n");
        prompt.push_str(context);
    }

    prompt.push_str("\n\nKeep the answer professional and concise.\n\nUSER QUESTION:\n\"");
    prompt.push_str(&query.text);
    prompt.push_str("\"\n");
    prompt
}
