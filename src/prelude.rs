//! Convenience re-exports for common use.

pub use crate::catalog::{PromptCatalog, PromptSpec, ToolKind};
pub use crate::config::Config;
pub use crate::error::{HeraldError, Result};
pub use crate::run::{RunDriver, RunEvent};
pub use crate::service::{AgentService, CreateAgentRequest, EventStream, RestService, ServerEvent};
pub use crate::tools::{FunctionTool, Tool, ToolArguments, ToolParameters, ToolRegistry};
pub use crate::types::{Agent, AgentThread, Role, ThreadMessage, ThreadRun, ToolOutput};
