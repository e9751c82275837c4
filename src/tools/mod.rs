//! Local tool system: registry, function tools, and per-prompt provisioning.

pub mod arguments;
pub mod builtin;
pub mod provision;
pub mod registry;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use registry::ToolRegistry;
pub use tool::{FunctionTool, Tool};
pub use types::ToolParameters;
