//! The step loop: submit a user message and drive the model to OUTPUT.

use stepwise_common::new_correlation_id;
use tracing::{debug, info, info_span, warn, Instrument};

use crate::step::Step;
use crate::tools::TOOL_ERROR_MARKER;
use crate::{AiClient, AiError, Message};

use super::manager::Session;
use super::types::{ActivityEntry, TurnOutcome, TurnReport};

impl Session {
    /// Run one turn for `user_message`.
    ///
    /// Blank input is ignored and returns `Ok(None)` without calling the
    /// model. Otherwise the model is called until it emits OUTPUT, replies
    /// with an invalid step, or the step cap is hit; all three end in a
    /// `TurnReport`. Transport failures (network, HTTP status, timeout)
    /// are returned as errors.
    pub async fn submit(
        &mut self,
        client: &dyn AiClient,
        user_message: &str,
    ) -> Result<Option<TurnReport>, AiError> {
        if user_message.trim().is_empty() {
            debug!(session = %self.id, "Ignoring blank user message");
            return Ok(None);
        }

        let first_entry = self.activity.len();
        self.messages.push(Message::user(user_message));
        self.activity.push(ActivityEntry::user(user_message));

        let span = info_span!("turn", session = %self.id, turn = %new_correlation_id());
        let outcome = self.run_turn(client).instrument(span).await?;

        match &outcome {
            TurnOutcome::Output(_) => {}
            TurnOutcome::SchemaViolation(reason) => {
                warn!(session = %self.id, %reason, "Model broke the step protocol");
                self.activity.push(ActivityEntry::assistant(format!(
                    "{TOOL_ERROR_MARKER} The model returned an invalid step: {reason}"
                )));
            }
            TurnOutcome::LoopExceeded(steps) => {
                warn!(session = %self.id, steps, "No final answer within step cap");
                self.activity.push(ActivityEntry::assistant(format!(
                    "{TOOL_ERROR_MARKER} Sorry, I couldn't reach an answer within {steps} steps. \
                     Please try rephrasing your question."
                )));
            }
        }

        Ok(Some(TurnReport {
            entries: self.activity.since(first_entry).to_vec(),
            outcome,
        }))
    }

    async fn run_turn(&mut self, client: &dyn AiClient) -> Result<TurnOutcome, AiError> {
        for step_number in 1..=self.max_steps {
            let call = client.complete(&self.messages, &self.schema);
            let response = match tokio::time::timeout(self.model_timeout, call).await {
                Err(_) => {
                    warn!(step_number, timeout = ?self.model_timeout, "Model call timed out");
                    return Err(AiError::Timeout);
                }
                Ok(Err(AiError::SchemaViolation(reason))) => {
                    return Ok(TurnOutcome::SchemaViolation(reason));
                }
                Ok(result) => result?,
            };

            self.tracker.record(&self.provider, &response.usage);
            debug!(step_number, kind = response.step.kind().as_str(), "Model step");

            let raw = response.raw;
            match response.step {
                Step::Start { content } => {
                    self.messages.push(Message::assistant(raw));
                    self.activity.push(ActivityEntry::assistant(format!("🔥 {content}")));
                }
                Step::Plan { content } => {
                    self.messages.push(Message::assistant(raw));
                    self.activity.push(ActivityEntry::assistant(format!("🧠 {content}")));
                }
                Step::Tool { tool, input } => {
                    self.messages.push(Message::assistant(raw));
                    let output = self.dispatch(&tool, &input).await;
                    self.activity
                        .push(ActivityEntry::assistant(format!("🛠️ Using {tool}({input})")));
                    let observation = Step::observe(tool, input, output);
                    self.messages.push(Message::tool(observation.to_json()));
                }
                Step::Observe { .. } => {
                    return Ok(TurnOutcome::SchemaViolation(
                        "OBSERVE steps are produced by the runtime, not the model".into(),
                    ));
                }
                Step::Output { content } => {
                    self.messages.push(Message::assistant(raw));
                    self.activity.push(ActivityEntry::assistant(format!("🤖 {content}")));
                    info!(steps = step_number, "Turn complete");
                    return Ok(TurnOutcome::Output(content));
                }
            }
        }

        Ok(TurnOutcome::LoopExceeded(self.max_steps))
    }

    /// Invoke a tool within the tool timeout. Always yields output text.
    async fn dispatch(&self, tool: &str, input: &str) -> String {
        match tokio::time::timeout(self.tool_timeout, self.tools.invoke(tool, input)).await {
            Ok(output) => output,
            Err(_) => {
                warn!(%tool, timeout = ?self.tool_timeout, "Tool call timed out");
                format!(
                    "{TOOL_ERROR_MARKER} tool {tool} timed out after {:?}",
                    self.tool_timeout
                )
            }
        }
    }
}
