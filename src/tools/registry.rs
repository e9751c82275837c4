//! Process-wide tool registry, read-only after startup.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{HeraldError, Result};
use crate::types::{ToolCallRequest, ToolOutput};

use super::arguments::ToolArguments;
use super::tool::Tool;

/// Maps tool names to local handlers.
///
/// Built once during startup and then shared immutably across
/// orchestration calls; no locking is needed after that point.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. Names are unique within the registry.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(HeraldError::DuplicateTool(name));
        }
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn find(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// All registered tools, for building wire definitions.
    pub fn tools(&self) -> impl Iterator<Item = &Arc<dyn Tool>> {
        self.tools.values()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Service one tool call from a requires-action batch.
    ///
    /// Unmatched names and malformed argument blobs yield no output; both
    /// are logged rather than propagated, so a bad call never takes down
    /// the surrounding run loop.
    pub async fn invoke(&self, call: &ToolCallRequest) -> Option<ToolOutput> {
        let name = call.function.name.as_str();
        let Some(tool) = self.find(name) else {
            tracing::warn!(call_id = %call.id, tool = name, "no registered tool for call");
            return None;
        };

        let args = match ToolArguments::from_raw(&call.function.arguments) {
            Ok(args) => args,
            Err(e) => {
                tracing::warn!(call_id = %call.id, tool = name, error = %e, "failed to decode tool arguments");
                return None;
            }
        };

        tracing::debug!(call_id = %call.id, tool = name, "invoking tool");
        match tool.execute(&args).await {
            Ok(value) => Some(ToolOutput {
                tool_call_id: call.id.clone(),
                output: value.to_string(),
            }),
            Err(e) => {
                tracing::warn!(call_id = %call.id, tool = name, error = %e, "tool execution failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .finish()
    }
}
