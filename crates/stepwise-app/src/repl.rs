//! Terminal chat front-end.

use std::io::Write;

use stepwise_ai::{ActivityEntry, AiClient, AiError, Session, Speaker, TurnOutcome};
use tokio::io::{AsyncBufReadExt, BufReader};

/// A line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Message(&'a str),
    Clear,
    Usage,
    ResetUsage,
    Quit,
}

impl<'a> Command<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            "/clear" => Command::Clear,
            "/usage" => Command::Usage,
            "/usage reset" => Command::ResetUsage,
            "/quit" | "/exit" => Command::Quit,
            _ => Command::Message(line),
        }
    }
}

pub fn render_entry(entry: &ActivityEntry) -> String {
    match entry.speaker {
        Speaker::User => format!("👤 You: {}", entry.text),
        Speaker::Assistant => entry.text.clone(),
    }
}

/// Submit one message and print the turn. Returns whether it ended in an answer.
pub async fn ask(
    session: &mut Session,
    client: &dyn AiClient,
    text: &str,
    echo_user: bool,
) -> Result<bool, AiError> {
    let Some(report) = session.submit(client, text).await? else {
        return Ok(false);
    };
    for entry in &report.entries {
        if entry.speaker == Speaker::User && !echo_user {
            continue;
        }
        println!("{}", render_entry(entry));
    }
    Ok(matches!(report.outcome, TurnOutcome::Output(_)))
}

/// Read messages from stdin until EOF or `/quit`. A failed turn is reported
/// and the loop goes on; terminal I/O errors end it.
pub async fn run(session: &mut Session, client: &dyn AiClient) -> stepwise_common::Result<()> {
    println!(
        "🌤️  Stepwise: ask me anything. /clear resets the chat, /usage shows tokens, /quit exits."
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match Command::parse(&line) {
            Command::Quit => break,
            Command::Clear => {
                session.reset();
                println!("🧹 Chat cleared.");
            }
            Command::Usage => println!("{}", session.tracker().summary()),
            Command::ResetUsage => {
                session.reset_usage();
                println!("🧮 Token usage reset.");
            }
            Command::Message(text) => {
                if let Err(e) = ask(session, client, text, false).await {
                    tracing::error!(session = %session.id(), "Turn failed: {e}");
                    println!("error: {e}");
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use stepwise_ai::{Message, Step, StepResponse, TokenUsage, ToolRegistry};
    use stepwise_common::StepwiseError;

    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("/clear"), Command::Clear);
        assert_eq!(Command::parse("  /usage "), Command::Usage);
        assert_eq!(Command::parse("/usage reset"), Command::ResetUsage);
        assert_eq!(Command::parse("/quit"), Command::Quit);
        assert_eq!(Command::parse("/exit"), Command::Quit);
        assert_eq!(
            Command::parse("What's the weather in Paris?"),
            Command::Message("What's the weather in Paris?")
        );
        assert_eq!(Command::parse("/unknown"), Command::Message("/unknown"));
    }

    #[test]
    fn renders_speakers() {
        assert_eq!(render_entry(&ActivityEntry::user("hi")), "👤 You: hi");
        assert_eq!(
            render_entry(&ActivityEntry::assistant("🤖 Hello!")),
            "🤖 Hello!"
        );
    }

    /// Answers every request with the same reply.
    struct FixedClient(Result<&'static str, fn() -> AiError>);

    #[async_trait]
    impl AiClient for FixedClient {
        async fn complete(
            &self,
            _messages: &[Message],
            _schema: &serde_json::Value,
        ) -> Result<StepResponse, AiError> {
            let raw = self.0.map_err(|make| make())?;
            Ok(StepResponse {
                raw: raw.to_string(),
                step: Step::from_model_json(raw)?,
                usage: TokenUsage::default(),
            })
        }
    }

    fn session() -> Session {
        Session::new("fixed", Arc::new(ToolRegistry::new()))
    }

    #[tokio::test]
    async fn ask_reports_an_answer() {
        let client = FixedClient(Ok(r#"{"step":"OUTPUT","content":"Hello!"}"#));
        let answered = ask(&mut session(), &client, "hi", true).await.unwrap();
        assert!(answered);
    }

    #[tokio::test]
    async fn ask_without_answer_is_not_an_error() {
        let client = FixedClient(Ok(r#"{"step":"PLAN","content":"thinking"}"#));
        let mut session = session().with_max_steps(2);
        assert!(!ask(&mut session, &client, "hi", true).await.unwrap());
        assert!(!ask(&mut session, &client, "   ", true).await.unwrap());
    }

    #[tokio::test]
    async fn transport_failure_becomes_a_run_error() {
        let client = FixedClient(Err(|| AiError::RateLimited));
        let err: StepwiseError = ask(&mut session(), &client, "hi", true)
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, StepwiseError::Ai(_)));
        assert_eq!(err.to_string(), "ai error: Rate limited");
    }
}
