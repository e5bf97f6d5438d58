//! Full configuration validation.
//!
//! Each check pushes onto a shared error list; all problems are reported
//! together in a single `ConfigError`.

mod helpers;


use crate::schema::StepwiseConfig;
use stepwise_common::ConfigError;

use helpers::{validate_non_empty, validate_range, validate_range_f64};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &StepwiseConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_model(&mut errors, config);
    validate_agent(&mut errors, config);
    validate_tools(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_model(errors: &mut Vec<String>, config: &StepwiseConfig) {
    let model = &config.model;
    validate_non_empty(errors, "model.base_url", &model.base_url);
    validate_non_empty(errors, "model.model", &model.model);
    validate_non_empty(errors, "model.api_key_env", &model.api_key_env);
    validate_range_f64(errors, "model.temperature", model.temperature, 0.0, 2.0);
    validate_range(errors, "model.max_tokens", model.max_tokens, 64, 65536);
}

fn validate_agent(errors: &mut Vec<String>, config: &StepwiseConfig) {
    let agent = &config.agent;
    validate_range(errors, "agent.max_steps", agent.max_steps, 1, 200);
    validate_range(
        errors,
        "agent.model_timeout_secs",
        agent.model_timeout_secs,
        1,
        600,
    );
    validate_range(
        errors,
        "agent.tool_timeout_secs",
        agent.tool_timeout_secs,
        1,
        300,
    );
    if let Some(prompt) = &agent.system_prompt {
        validate_non_empty(errors, "agent.system_prompt", prompt);
    }
}

fn validate_tools(errors: &mut Vec<String>, config: &StepwiseConfig) {
    let weather = &config.tools.weather;
    if !weather.enabled {
        return;
    }
    validate_non_empty(errors, "tools.weather.base_url", &weather.base_url);
    if weather.aliases.is_empty() {
        errors.push("tools.weather.aliases must name at least one tool".to_string());
    }
    for alias in &weather.aliases {
        if alias.trim().is_empty() || alias.chars().any(char::is_whitespace) {
            errors.push(format!(
                "tools.weather.aliases entry {alias:?} must be a non-empty identifier"
            ));
        }
    }
}
