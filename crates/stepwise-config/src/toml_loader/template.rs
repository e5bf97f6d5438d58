//! Default TOML config template with inline documentation comments.

pub(crate) fn default_config_toml() -> &'static str {
    r#"# Stepwise Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[model]
# base_url = "https://generativelanguage.googleapis.com/v1beta/openai"
# model = "gemini-2.5-flash"
# api_key_env = "GEMINI_API_KEY"   # env var holding the API key
# temperature = 0.7                # 0.0-2.0
# max_tokens = 4096                # 64-65536

[agent]
# max_steps = 25                   # 1-200, model steps per turn
# model_timeout_secs = 60          # 1-600
# tool_timeout_secs = 15           # 1-300
# system_prompt = "..."            # replaces the generated prompt

[tools.weather]
# enabled = true
# base_url = "https://wttr.in"
# format = "%C+%t"
# aliases = ["get_weather", "Get_current_weather", "get_current_weather", "weather"]

[logging]
# level = "INFO"                   # DEBUG, INFO, WARNING, ERROR
"#
}
