//! AiClient trait implementation for GeminiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiClient, AiError, Message, StepResponse};

use super::client::GeminiClient;

#[async_trait]
impl AiClient for GeminiClient {
    async fn complete(
        &self,
        messages: &[Message],
        schema: &serde_json::Value,
    ) -> Result<StepResponse, AiError> {
        let body = self.build_request_body(messages, schema);

        debug!(model = %self.config.model, messages = messages.len(), "Gemini API request");

        let response = self
            .http
            .post(self.api_url())
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(json)
    }
}
