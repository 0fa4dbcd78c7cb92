//! Tests for engine configuration loading.

use netmonit_core::config::EngineConfig;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[analysis]
recency_window_secs = 900

[llm]
enabled = true
endpoint = "https://api.example.com"
model = "gpt-4o-mini"
fallback_model = "gpt-4o"
per_minute_limit = 5
"#,
    )
    .unwrap();

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.analysis.effective_recency_window(), 900);
    assert_eq!(config.analysis.max_listed_items, 25);
    assert!(config.llm.enabled);
    assert_eq!(config.llm.fallback(), Some("gpt-4o"));
    assert_eq!(config.llm.per_minute_limit, 5);
    assert_eq!(config.llm.daily_limit, 1000);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let config = EngineConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn test_missing_file_is_an_error_for_load() {
    let dir = TempDir::new().unwrap();
    let err = EngineConfig::load(&dir.path().join("absent.toml")).unwrap_err();
    assert_eq!(err.code(), -32006);
}

#[test]
fn test_round_trip_through_toml() {
    let mut config = EngineConfig::default();
    config.llm.model = "mistral:7b".to_string();
    config.analysis.max_listed_items = 10;

    let text = config.to_toml_string().unwrap();
    let back = EngineConfig::from_toml_str(&text).unwrap();
    assert_eq!(back, config);
}
