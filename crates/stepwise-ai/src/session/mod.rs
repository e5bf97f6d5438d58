//! Conversation session management.
//!
//! A `Session` owns the transcript sent to the model and the activity log
//! shown to the user, and runs the step loop for each submitted message.

mod chat;
mod manager;
mod types;


pub use manager::{Session, DEFAULT_MAX_STEPS};
pub use types::{ActivityEntry, ActivityLog, Speaker, TurnOutcome, TurnReport};
