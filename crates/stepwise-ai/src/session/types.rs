//! Activity log and turn result types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

/// One rendered line of the conversation as the user sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub speaker: Speaker,
    pub text: String,
}

impl ActivityEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// Display-only history, derived from steps. Never sent to the model.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ActivityEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    /// Entries appended at or after `index`.
    pub fn since(&self, index: usize) -> &[ActivityEntry] {
        self.entries.get(index..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&ActivityEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The model emitted OUTPUT with this answer.
    Output(String),
    /// The model replied with something that is not a valid step.
    SchemaViolation(String),
    /// No OUTPUT within the step cap.
    LoopExceeded(u32),
}

/// What one `submit` produced, ready for rendering.
#[derive(Debug, Clone)]
pub struct TurnReport {
    /// Activity entries added during this turn, user message first.
    pub entries: Vec<ActivityEntry>,
    pub outcome: TurnOutcome,
}

impl TurnReport {
    /// The model's answer, when the turn ended with OUTPUT.
    pub fn answer(&self) -> Option<&str> {
        match &self.outcome {
            TurnOutcome::Output(answer) => Some(answer),
            _ => None,
        }
    }
}
