//! Built-in tool configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub weather: WeatherToolConfig,
}

/// The wttr.in weather lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherToolConfig {
    pub enabled: bool,
    pub base_url: String,
    /// wttr.in format string (`%C` condition, `%t` temperature).
    pub format: String,
    /// Every name the model may use to call the tool.
    pub aliases: Vec<String>,
}

impl Default for WeatherToolConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://wttr.in".to_string(),
            format: "%C+%t".to_string(),
            aliases: vec![
                "get_weather".to_string(),
                "Get_current_weather".to_string(),
                "get_current_weather".to_string(),
                "weather".to_string(),
            ],
        }
    }
}
