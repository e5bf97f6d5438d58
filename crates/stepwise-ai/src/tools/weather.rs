//! Weather lookup via wttr.in.

use async_trait::async_trait;
use tracing::debug;

use super::{ToolError, ToolHandler};

pub const DEFAULT_WEATHER_URL: &str = "https://wttr.in";
pub const DEFAULT_WEATHER_FORMAT: &str = "%C+%t";

/// Current conditions for a city, e.g. `The weather in Paris is Sunny +18°C`.
///
/// Lookups are not time-limited here; the session's tool timeout applies.
pub struct WeatherTool {
    base_url: String,
    format: String,
    http: reqwest::Client,
}

impl WeatherTool {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_WEATHER_URL, DEFAULT_WEATHER_FORMAT)
    }

    pub fn with_endpoint(base_url: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            format: format.into(),
            http: reqwest::Client::new(),
        }
    }

    /// `{base}/{city}?format={format}`; the format keeps its literal `%` and `+`.
    pub(crate) fn request_url(&self, city: &str) -> String {
        format!(
            "{}/{}?format={}",
            self.base_url,
            urlencoding::encode(&city.to_lowercase()),
            self.format
        )
    }
}

impl Default for WeatherTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolHandler for WeatherTool {
    fn description(&self) -> &str {
        "Takes a city name as input and returns its current weather"
    }

    async fn call(&self, input: &str) -> Result<String, ToolError> {
        let city = input.trim();
        if city.is_empty() {
            return Err(ToolError::InvalidInput(
                "a city name is required".to_string(),
            ));
        }

        let url = self.request_url(city);
        debug!(%url, "Weather request");

        let failed = |detail: String| {
            ToolError::Failed(format!(
                "Something went wrong while fetching weather for {city}: {detail}"
            ))
        };

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("HTTP {status}")));
        }

        let body = response.text().await.map_err(|e| failed(e.to_string()))?;
        Ok(format!("The weather in {city} is {}", body.trim()))
    }
}
