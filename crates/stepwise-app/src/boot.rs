//! Wiring config into the tool registry, model client, and session.

use std::sync::Arc;
use std::time::Duration;

use stepwise_ai::{GeminiClient, GeminiConfig, Session, ToolHandler, ToolRegistry, WeatherTool};
use stepwise_common::ConfigError;
use stepwise_config::schema::{ModelConfig, ToolsConfig};
use stepwise_config::StepwiseConfig;

use crate::cli::Args;

/// Register every enabled built-in tool under all of its configured names.
pub fn build_tool_registry(config: &ToolsConfig) -> ToolRegistry {
    let mut tools = ToolRegistry::new();

    let weather = &config.weather;
    if weather.enabled {
        let handler: Arc<dyn ToolHandler> =
            Arc::new(WeatherTool::with_endpoint(&weather.base_url, &weather.format));
        for alias in &weather.aliases {
            tools.register(alias.clone(), Arc::clone(&handler));
        }
    }

    tools
}

/// Build the Gemini client. Fails when the API key variable is unset.
pub fn build_client(config: &ModelConfig, args: &Args) -> Result<GeminiClient, ConfigError> {
    let model = args.model.as_deref().unwrap_or(&config.model);
    let gemini = GeminiConfig::from_env(&config.api_key_env)?
        .with_base_url(&config.base_url)
        .with_model(model)
        .with_max_tokens(config.max_tokens)
        .with_temperature(config.temperature);
    Ok(GeminiClient::new(gemini))
}

pub fn build_session(config: &StepwiseConfig, tools: Arc<ToolRegistry>, args: &Args) -> Session {
    let agent = &config.agent;
    let session = Session::new("gemini", tools)
        .with_max_steps(args.max_steps.unwrap_or(agent.max_steps))
        .with_model_timeout(Duration::from_secs(agent.model_timeout_secs.into()))
        .with_tool_timeout(Duration::from_secs(agent.tool_timeout_secs.into()));

    match &agent.system_prompt {
        Some(prompt) => session.with_system_prompt(prompt.clone()),
        None => session,
    }
}
