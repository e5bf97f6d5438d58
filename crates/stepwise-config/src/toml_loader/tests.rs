//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_stepwise_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, stepwise_common::ConfigError::ParseError(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[model]
model = "gemini-2.0-flash"

[agent]
max_steps = 8
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.model.model, "gemini-2.0-flash");
    assert_eq!(config.agent.max_steps, 8);
    // Defaults preserved
    assert_eq!(config.model.api_key_env, "GEMINI_API_KEY");
    assert_eq!(config.agent.tool_timeout_secs, 15);
    assert!(config.tools.weather.enabled);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, stepwise_common::ConfigError::ParseError(_)));
}

#[test]
fn load_keeps_out_of_range_values_for_caller_to_reject() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[agent]\nmax_steps = 1000\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.agent.max_steps, 1000);
}

#[test]
fn weather_aliases_can_be_overridden() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[tools.weather]
aliases = ["forecast"]
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.tools.weather.aliases, vec!["forecast".to_string()]);
    assert_eq!(config.tools.weather.base_url, "https://wttr.in");
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stepwise").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.agent.max_steps, 25);
    assert_eq!(config.model.model, "gemini-2.5-flash");
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("stepwise"));
        assert!(path_str.ends_with("config.toml"));
    }
}
