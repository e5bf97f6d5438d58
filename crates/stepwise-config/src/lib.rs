//! Stepwise configuration system.
//!
//! TOML-based configuration with full validation. Every section uses serde
//! defaults so a partial file (or no file at all) works out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stepwise_config::{config_to_json, load_config};
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{StepwiseConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;

use stepwise_common::ConfigError;

/// Load config from the platform default path, creating it if missing,
/// and validate the result.
pub fn load_config() -> Result<StepwiseConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load config from an explicit path and validate the result.
pub fn load_config_from(path: &Path) -> Result<StepwiseConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &StepwiseConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&StepwiseConfig::default());
        assert!(json.contains("\"model\""));
        assert!(json.contains("\"agent\""));
        assert!(json.contains("\"tools\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn load_config_from_missing_path_is_file_not_found() {
        let err = load_config_from(Path::new("/tmp/nonexistent_stepwise_config.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn load_config_from_rejects_out_of_range_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[agent]\nmax_steps = 0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("agent.max_steps"));
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let json = config_to_json(&StepwiseConfig::default());
        let parsed: StepwiseConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.model.model, "gemini-2.5-flash");
        assert_eq!(parsed.agent.max_steps, 25);
    }
}
