use std::path::PathBuf;

use clap::Parser;

/// Stepwise: a step-by-step reasoning agent with tool calling.
#[derive(Parser, Debug)]
#[command(name = "stepwise", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Model name override.
    #[arg(long)]
    pub model: Option<String>,

    /// Maximum model steps per turn.
    #[arg(long)]
    pub max_steps: Option<u32>,

    /// Ask a single question, print the answer, and exit.
    #[arg(long, value_name = "MESSAGE")]
    pub once: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let args = Args::try_parse_from([
            "stepwise",
            "--model",
            "gemini-2.0-flash",
            "--max-steps",
            "5",
            "--once",
            "Weather in Paris?",
        ])
        .unwrap();
        assert_eq!(args.model.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(args.max_steps, Some(5));
        assert_eq!(args.once.as_deref(), Some("Weather in Paris?"));
        assert!(args.config.is_none());
    }

    #[test]
    fn rejects_non_numeric_step_cap() {
        assert!(Args::try_parse_from(["stepwise", "--max-steps", "many"]).is_err());
    }
}
