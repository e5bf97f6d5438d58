//! Session struct and conversation state.

use std::sync::Arc;
use std::time::Duration;

use stepwise_common::SessionId;
use tracing::debug;

use crate::prompt::build_system_prompt;
use crate::step::Step;
use crate::token_tracker::TokenTracker;
use crate::tools::ToolRegistry;
use crate::Message;

use super::types::ActivityLog;

pub const DEFAULT_MAX_STEPS: u32 = 25;

/// A conversation with one user: transcript, activity log, and loop limits.
pub struct Session {
    pub(super) id: SessionId,
    /// Transcript sent to the model; always starts with the system message.
    pub(super) messages: Vec<Message>,
    pub(super) activity: ActivityLog,
    pub(super) system_prompt: String,
    pub(super) tools: Arc<ToolRegistry>,
    /// Reply shape required from the model.
    pub(super) schema: serde_json::Value,
    pub(super) tracker: TokenTracker,
    /// Model steps allowed per turn.
    pub(super) max_steps: u32,
    pub(super) model_timeout: Duration,
    pub(super) tool_timeout: Duration,
    /// Provider name for token tracking.
    pub(super) provider: String,
}

impl Session {
    /// A fresh session whose system prompt describes `tools`.
    pub fn new(provider: impl Into<String>, tools: Arc<ToolRegistry>) -> Self {
        let system_prompt = build_system_prompt(&tools);
        Self {
            id: SessionId::new(),
            messages: vec![Message::system(system_prompt.clone())],
            activity: ActivityLog::new(),
            system_prompt,
            tools,
            schema: Step::json_schema(),
            tracker: TokenTracker::new(),
            max_steps: DEFAULT_MAX_STEPS,
            model_timeout: Duration::from_secs(60),
            tool_timeout: Duration::from_secs(15),
            provider: provider.into(),
        }
    }

    /// Replace the generated system prompt. Starts the transcript over.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self.reset();
        self
    }

    pub fn with_max_steps(mut self, max: u32) -> Self {
        self.max_steps = max.max(1);
        self
    }

    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    /// Start over: a single system message and an empty activity log.
    pub fn reset(&mut self) {
        debug!(session = %self.id, "Resetting session");
        self.messages = vec![Message::system(self.system_prompt.clone())];
        self.activity.clear();
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// The full transcript, system message first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn tracker(&self) -> &TokenTracker {
        &self.tracker
    }

    /// Zero the token counters. The transcript is untouched.
    pub fn reset_usage(&mut self) {
        self.tracker.reset();
        debug!(session = %self.id, "Token usage reset");
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}
