//! Tools the model can call by name.
//!
//! A tool is a [`ToolHandler`]: one string argument in, one string out.
//! Handlers are bound to one or more names in a [`ToolRegistry`], which is
//! frozen behind an `Arc` once built and shared by every session.

mod registry;
mod weather;

pub use registry::{ToolRegistry, TOOL_ERROR_MARKER};
pub use weather::WeatherTool;

use async_trait::async_trait;

/// An executable capability.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// One-line description shown to the model in the system prompt.
    fn description(&self) -> &str;

    /// Run the tool. Errors are rendered into the observation, not raised.
    async fn call(&self, input: &str) -> Result<String, ToolError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    Failed(String),
}
