//! Gemini client struct, request building, and response parsing.

use crate::step::Step;
use crate::{AiError, Message, Role, StepResponse, TokenUsage};

use super::config::GeminiConfig;

/// Gemini API client.
///
/// Requests carry no deadline of their own; the session bounds each call
/// with its model timeout.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub(crate) fn api_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Build the chat-completions body with the step schema as the
    /// required response format.
    pub(crate) fn build_request_body(
        &self,
        messages: &[Message],
        schema: &serde_json::Value,
    ) -> serde_json::Value {
        let msgs: Vec<_> = messages
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                    Role::Tool => "developer",
                };
                serde_json::json!({ "role": role, "content": msg.content })
            })
            .collect();

        serde_json::json!({
            "model": self.config.model,
            "messages": msgs,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "step",
                    "schema": schema,
                },
            },
        })
    }

    /// Parse a chat-completions response into exactly one step.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<StepResponse, AiError> {
        let message = json["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .map(|choice| &choice["message"])
            .ok_or_else(|| AiError::ParseError("no choices in response".to_string()))?;

        let raw = match message["content"].as_str() {
            Some(content) => content.to_string(),
            None => {
                let reason = message["refusal"]
                    .as_str()
                    .unwrap_or("reply has no content");
                return Err(AiError::SchemaViolation(reason.to_string()));
            }
        };

        let step = Step::from_model_json(&raw)?;

        let usage = TokenUsage {
            input_tokens: json["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
            output_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0),
        };

        Ok(StepResponse { raw, step, usage })
    }
}
