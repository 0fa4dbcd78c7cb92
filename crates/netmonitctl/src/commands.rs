//! Command execution.
//!
//! Each command returns the text to print; `main` owns stdout.

use crate::render;
use crate::snapshot;
use anyhow::{Context, Result};
use netmonit_core::config::EngineConfig;
use netmonit_core::intent::Query;
use netmonit_core::llm::{CompletionClient, HttpCompletionClient, QuotaGuard};
use netmonit_core::monitoring::monitoring_snapshot;
use netmonit_core::orchestrator::analyze_query;
use netmonit_core::propagation;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// `$XDG_CONFIG_HOME/netmonit/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("netmonit").join("config.toml"))
}

/// Load config from an explicit path (must exist) or the default path
/// (may be absent), then apply environment overrides
pub fn load_config(explicit: Option<&Path>) -> Result<EngineConfig> {
    let mut config = match explicit {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => match default_config_path() {
            Some(path) => EngineConfig::load_or_default(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => EngineConfig::default(),
        },
    };
    config.apply_env_overrides();

    if config.analysis.recency_window_was_clamped() {
        warn!(
            configured = config.analysis.recency_window_secs,
            effective = config.analysis.effective_recency_window(),
            "recency window out of range, clamped"
        );
    }
    Ok(config)
}

/// Completion client for the configured backend, if enabled
pub fn build_client(config: &EngineConfig) -> Result<Option<Box<dyn CompletionClient>>> {
    if !config.llm.enabled {
        debug!("completion client disabled, answering offline");
        return Ok(None);
    }
    let client = HttpCompletionClient::new(config.llm.clone())?;
    debug!(endpoint = %config.llm.endpoint, model = %config.llm.model, "completion client ready");
    let guarded: Box<dyn CompletionClient> = Box::new(QuotaGuard::from_config(client, &config.llm));
    Ok(Some(guarded))
}

pub fn ask(
    config: &EngineConfig,
    snapshot_path: &Path,
    words: &[String],
    context: Option<&str>,
    json: bool,
    color: bool,
) -> Result<String> {
    let file = snapshot::load(snapshot_path)?;
    let mut query = Query::new(words.join(" "));
    if let Some(context) = context {
        query = query.with_context(context);
    }

    let client = build_client(config)?;
    let result = analyze_query(&query, client.as_deref(), &file.telemetry, &config.analysis);
    render::render_result(&result, json, color)
}

pub fn trace(snapshot_path: &Path) -> Result<String> {
    let file = snapshot::load(snapshot_path)?;
    let telemetry = &file.telemetry;
    let chain = propagation::trace(
        &telemetry.alerts,
        &telemetry.devices,
        telemetry.links(),
        &telemetry.dependencies,
    );
    Ok(serde_json::to_string_pretty(&chain)?)
}

pub fn coverage(snapshot_path: &Path, json: bool) -> Result<String> {
    let file = snapshot::load(snapshot_path)?;
    let coverage = monitoring_snapshot(&file.telemetry, &file.layer_kpis);
    if json {
        Ok(serde_json::to_string_pretty(&coverage)?)
    } else {
        Ok(coverage.summary)
    }
}
