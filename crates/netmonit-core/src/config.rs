//! Engine configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty or missing file
//! yields a fully usable offline configuration (completion client disabled).
//! Out-of-range values are kept as written and clamped by the `effective_*`
//! accessors.

use crate::error::{NetmonitError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const ENV_LLM_ENDPOINT: &str = "NETMONIT_LLM_ENDPOINT";
pub const ENV_LLM_MODEL: &str = "NETMONIT_LLM_MODEL";
pub const ENV_LLM_API_KEY: &str = "NETMONIT_LLM_API_KEY";

// ============================================================================
// Analysis settings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Alerts older than this, relative to the snapshot capture time, are
    /// not considered recent (seconds, valid: 60-86400)
    #[serde(default = "default_recency_window")]
    pub recency_window_secs: u64,

    /// Cap on listed alerts/devices in status text (valid: 5-200)
    #[serde(default = "default_max_listed_items")]
    pub max_listed_items: usize,
}

fn default_recency_window() -> u64 {
    600
}

fn default_max_listed_items() -> usize {
    25
}

impl AnalysisSettings {
    pub fn effective_recency_window(&self) -> u64 {
        self.recency_window_secs.clamp(60, 86_400)
    }

    pub fn effective_max_listed_items(&self) -> usize {
        self.max_listed_items.clamp(5, 200)
    }

    pub fn recency_window_was_clamped(&self) -> bool {
        self.recency_window_secs != self.effective_recency_window()
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            recency_window_secs: default_recency_window(),
            max_listed_items: default_max_listed_items(),
        }
    }
}

// ============================================================================
// Completion client settings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Tried once after the primary model exhausts transient retries
    #[serde(default)]
    pub fallback_model: String,

    /// Bearer token for OpenAI-compatible endpoints
    #[serde(default)]
    pub api_key: String,

    /// Per-request timeout (seconds, valid: 1-120)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Attempts per model on transient failures (valid: 1-5)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_per_minute_limit")]
    pub per_minute_limit: u32,

    #[serde(default = "default_daily_limit")]
    pub daily_limit: u32,
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2:3b".to_string()
}

fn default_timeout() -> u64 {
    20
}

fn default_max_attempts() -> u32 {
    3
}

fn default_per_minute_limit() -> u32 {
    15
}

fn default_daily_limit() -> u32 {
    1000
}

impl LlmConfig {
    pub fn effective_timeout(&self) -> u64 {
        self.timeout_secs.clamp(1, 120)
    }

    pub fn effective_max_attempts(&self) -> u32 {
        self.max_attempts.clamp(1, 5)
    }

    /// Fallback model, if set and different from the primary
    pub fn fallback(&self) -> Option<&str> {
        let fallback = self.fallback_model.trim();
        (!fallback.is_empty() && fallback != self.model).then_some(fallback)
    }

    pub fn api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            model: default_model(),
            fallback_model: String::new(),
            api_key: String::new(),
            timeout_secs: default_timeout(),
            max_attempts: default_max_attempts(),
            per_minute_limit: default_per_minute_limit(),
            daily_limit: default_daily_limit(),
        }
    }
}

// ============================================================================
// Root
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub analysis: AnalysisSettings,

    #[serde(default)]
    pub llm: LlmConfig,
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a TOML file; the file must exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Load from a TOML file, or defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply `NETMONIT_LLM_*` environment overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = non_empty(ENV_LLM_ENDPOINT) {
            self.llm.endpoint = endpoint;
        }
        if let Some(model) = non_empty(ENV_LLM_MODEL) {
            self.llm.model = model;
        }
        if let Some(key) = non_empty(ENV_LLM_API_KEY) {
            self.llm.api_key = key;
            self.llm.enabled = true;
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| NetmonitError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_offline() {
        let config = EngineConfig::default();
        assert!(!config.llm.enabled);
        assert_eq!(config.analysis.recency_window_secs, 600);
        assert_eq!(config.analysis.max_listed_items, 25);
        assert_eq!(config.llm.per_minute_limit, 15);
        assert_eq!(config.llm.daily_limit, 1000);
        assert!(config.llm.fallback().is_none());
        assert!(config.llm.api_key().is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = EngineConfig::from_toml_str("[llm]\nenabled = true\n").unwrap();
        assert!(config.llm.enabled);
        assert_eq!(config.llm.model, "llama3.2:3b");
        assert_eq!(config.analysis.recency_window_secs, 600);
    }

    #[test]
    fn test_clamping() {
        let config = EngineConfig::from_toml_str(
            "[analysis]\nrecency_window_secs = 5\nmax_listed_items = 1000\n[llm]\ntimeout_secs = 0\nmax_attempts = 9\n",
        )
        .unwrap();
        assert_eq!(config.analysis.effective_recency_window(), 60);
        assert!(config.analysis.recency_window_was_clamped());
        assert_eq!(config.analysis.effective_max_listed_items(), 200);
        assert_eq!(config.llm.effective_timeout(), 1);
        assert_eq!(config.llm.effective_max_attempts(), 5);
    }

    #[test]
    fn test_env_overrides_enable_llm_with_key() {
        let mut config = EngineConfig::default();
        config.apply_overrides(|key| match key {
            ENV_LLM_MODEL => Some("mistral".to_string()),
            ENV_LLM_API_KEY => Some("secret".to_string()),
            ENV_LLM_ENDPOINT => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.llm.model, "mistral");
        assert_eq!(config.llm.api_key(), Some("secret"));
        assert!(config.llm.enabled);
        assert_eq!(config.llm.endpoint, "http://localhost:11434");
    }

    #[test]
    fn test_fallback_ignores_same_model() {
        let llm = LlmConfig {
            fallback_model: "llama3.2:3b".to_string(),
            ..Default::default()
        };
        assert!(llm.fallback().is_none());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let err = EngineConfig::from_toml_str("[analysis\n").unwrap_err();
        assert_eq!(err.code(), -32011);
    }
}
