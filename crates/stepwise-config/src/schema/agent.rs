//! Orchestration loop limits.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Model steps allowed per turn before giving up (valid range: 1-200).
    pub max_steps: u32,
    /// Per model call, in seconds (valid range: 1-600).
    pub model_timeout_secs: u32,
    /// Per tool call, in seconds (valid range: 1-300).
    pub tool_timeout_secs: u32,
    /// Replaces the generated system prompt when set.
    pub system_prompt: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_steps: 25,
            model_timeout_secs: 60,
            tool_timeout_secs: 15,
            system_prompt: None,
        }
    }
}
