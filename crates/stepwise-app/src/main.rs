mod boot;
mod cli;
mod repl;

use std::process::ExitCode;
use std::sync::Arc;

use stepwise_config::StepwiseConfig;
use tracing_subscriber::EnvFilter;

use crate::cli::Args;

/// Load environment variables from `./.env` (KEY=VALUE lines) without
/// overriding variables that are already set.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    load_dotenv();

    let args = cli::parse();

    let loaded = match &args.config {
        Some(path) => stepwise_config::load_config_from(path),
        None => stepwise_config::load_config(),
    };

    // Initialize logging (stderr keeps the chat on stdout clean)
    let log_directive = match (&args.log_level, &loaded) {
        (Some(level), _) => format!("stepwise={level}"),
        (None, Ok(config)) => config.logging.level.directive().to_string(),
        (None, Err(_)) => "stepwise=info".to_string(),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "stepwise=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Stepwise v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        StepwiseConfig::default()
    });

    match run(&args, &config).await {
        Ok(true) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("Stepwise stopped: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Wire up the session and serve it. `Ok(false)` means a `--once` question
/// got no final answer.
async fn run(args: &Args, config: &StepwiseConfig) -> stepwise_common::Result<bool> {
    let tools = Arc::new(boot::build_tool_registry(&config.tools));
    tracing::info!("Tool registry loaded ({} names)", tools.len());

    let client = boot::build_client(&config.model, args)?;
    tracing::info!(model = client.model(), "Model client ready");

    let mut session = boot::build_session(config, tools, args);

    if let Some(message) = &args.once {
        return Ok(repl::ask(&mut session, &client, message, true).await?);
    }

    repl::run(&mut session, &client).await?;
    Ok(true)
}
