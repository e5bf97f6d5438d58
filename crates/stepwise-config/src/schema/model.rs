//! Language-model endpoint configuration.

use serde::{Deserialize, Serialize};

/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_MODEL_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Which model to call and how.
///
/// The API key itself never lives in the file; `api_key_env` names the
/// environment variable that holds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
    /// Completion token limit per call (valid range: 64-65536).
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_MODEL_BASE_URL.to_string(),
            model: "gemini-2.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}
