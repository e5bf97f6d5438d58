//! Configuration schema types for Stepwise.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod agent;
mod model;
mod system;
mod tools;

pub use agent::*;
pub use model::*;
pub use system::*;
pub use tools::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Stepwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepwiseConfig {
    pub model: ModelConfig,
    pub agent: AgentConfig,
    pub tools: ToolsConfig,
    pub logging: LoggingConfig,
}
