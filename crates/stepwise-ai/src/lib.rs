//! Step-driven agent engine for Stepwise.
//!
//! Provides:
//! - The step protocol a structured-output model must follow
//!   (START / PLAN / TOOL / OBSERVE / OUTPUT)
//! - A Gemini client speaking the OpenAI-compatible endpoint
//! - A tool registry with name aliases and the built-in weather tool
//! - Session management with a bounded orchestration loop
//! - Token usage tracking

pub mod gemini;
pub mod prompt;
pub mod session;
pub mod step;
pub mod token_tracker;
pub mod tools;

use async_trait::async_trait;

pub use gemini::{GeminiClient, GeminiConfig};
pub use session::{ActivityEntry, ActivityLog, Session, Speaker, TurnOutcome, TurnReport};
pub use step::Step;
pub use token_tracker::TokenTracker;
pub use tools::{ToolError, ToolHandler, ToolRegistry, WeatherTool};

/// A model that answers a transcript with exactly one structured step.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Ask the model for the next step.
    ///
    /// `schema` is the JSON Schema the response must satisfy. Implementations
    /// return `AiError::SchemaViolation` when the reply is not a valid step.
    async fn complete(
        &self,
        messages: &[Message],
        schema: &serde_json::Value,
    ) -> Result<StepResponse, AiError>;
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn tool(content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
    /// An observation injected after a tool ran.
    Tool,
}

/// One parsed model reply.
#[derive(Debug, Clone)]
pub struct StepResponse {
    /// The literal payload the model produced, kept for future context.
    pub raw: String,
    pub step: Step,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
    #[error("Schema violation: {0}")]
    SchemaViolation(String),
}

impl From<AiError> for stepwise_common::StepwiseError {
    fn from(err: AiError) -> Self {
        stepwise_common::StepwiseError::Ai(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::tool("{}")).unwrap();
        assert_eq!(json, r#"{"role":"tool","content":"{}"}"#);
    }

    #[test]
    fn token_usage_total_saturates() {
        let usage = TokenUsage {
            input_tokens: u64::MAX,
            output_tokens: 1,
        };
        assert_eq!(usage.total_tokens(), u64::MAX);
    }

    #[test]
    fn ai_error_display() {
        assert_eq!(
            AiError::SchemaViolation("missing content".into()).to_string(),
            "Schema violation: missing content"
        );
        assert_eq!(AiError::RateLimited.to_string(), "Rate limited");
    }

    #[test]
    fn ai_error_converts_to_stepwise_error() {
        let err: stepwise_common::StepwiseError = AiError::Timeout.into();
        assert_eq!(err.to_string(), "ai error: Timeout");
    }
}
