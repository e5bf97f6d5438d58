//! Name → handler mapping with alias support.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use super::{ToolError, ToolHandler};

/// Prefix on every tool output that reports a failure, so the model can
/// tell errors from results.
pub const TOOL_ERROR_MARKER: &str = "⚠️";

/// Maps tool names (and aliases) to handlers.
///
/// Lookups are exact and case-sensitive. Several names may share one
/// handler; re-registering a name only rebinds that name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `handler`, replacing any previous binding of `name`.
    pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn ToolHandler>) {
        let name = name.into();
        if self.tools.insert(name.clone(), handler).is_some() {
            debug!(tool = %name, "Rebinding tool name");
        }
    }

    /// Bind `alias` to whatever handler `target` is bound to.
    pub fn register_alias(
        &mut self,
        alias: impl Into<String>,
        target: &str,
    ) -> Result<(), ToolError> {
        let handler = self.resolve(target)?;
        self.register(alias, handler);
        Ok(())
    }

    /// Look up the handler bound to `name`.
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ToolHandler>, ToolError> {
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| ToolError::NotFound(name.to_string()))
    }

    /// Resolve and run a tool, always producing a displayable string.
    ///
    /// Unknown names and handler failures come back as text starting with
    /// [`TOOL_ERROR_MARKER`].
    pub async fn invoke(&self, name: &str, input: &str) -> String {
        let handler = match self.resolve(name) {
            Ok(handler) => handler,
            Err(e) => {
                warn!(tool = %name, "Model requested an unknown tool");
                return format!(
                    "{TOOL_ERROR_MARKER} {e}. Available tools: {}",
                    self.names().join(", ")
                );
            }
        };

        debug!(tool = %name, "Executing tool");
        match handler.call(input).await {
            Ok(output) if output.is_empty() => {
                format!("{TOOL_ERROR_MARKER} tool {name} returned no output")
            }
            Ok(output) => output,
            Err(e) => {
                warn!(tool = %name, error = %e, "Tool failed");
                format!("{TOOL_ERROR_MARKER} {e}")
            }
        }
    }

    /// All bound names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// `(name, description)` for every bound name, sorted by name.
    pub fn describe(&self) -> Vec<(&str, &str)> {
        self.tools
            .iter()
            .map(|(name, handler)| (name.as_str(), handler.description()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
