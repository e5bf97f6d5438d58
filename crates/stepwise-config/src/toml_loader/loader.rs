//! Core TOML config loading: read from path or platform default.

use crate::schema::StepwiseConfig;
use crate::validation;
use std::path::Path;
use stepwise_common::ConfigError;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields fall back to serde defaults. Validation failures are
/// logged here and left to the caller to enforce.
pub fn load_from_path(path: &Path) -> Result<StepwiseConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: StepwiseConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/stepwise/config.toml`
/// On macOS: `~/Library/Application Support/stepwise/config.toml`
///
/// If the file does not exist, a commented default is written and defaults
/// are returned.
pub fn load_default() -> Result<StepwiseConfig, ConfigError> {
    let path = default_config_path()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(StepwiseConfig::default());
    }

    load_from_path(&path)
}
