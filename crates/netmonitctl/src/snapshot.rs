//! Telemetry snapshot files.
//!
//! A snapshot file is the engine's `TelemetrySnapshot` JSON with an optional
//! `layerKpis` array alongside it for coverage reporting.

use anyhow::{Context, Result};
use netmonit_core::monitoring::LayerKpi;
use netmonit_core::telemetry::TelemetrySnapshot;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotFile {
    #[serde(flatten)]
    pub telemetry: TelemetrySnapshot,

    #[serde(default)]
    pub layer_kpis: Vec<LayerKpi>,
}

pub fn parse(content: &str) -> Result<SnapshotFile> {
    serde_json::from_str(content).context("invalid telemetry snapshot JSON")
}

pub fn load(path: &Path) -> Result<SnapshotFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let file = parse(&content).with_context(|| format!("in {}", path.display()))?;
    debug!(
        path = %path.display(),
        alerts = file.telemetry.alerts.len(),
        devices = file.telemetry.devices.len(),
        "loaded telemetry snapshot"
    );
    Ok(file)
}
