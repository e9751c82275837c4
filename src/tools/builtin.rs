//! Built-in function tools for the demo prompts.

use std::sync::Arc;

use crate::tools::tool::{FunctionTool, Tool};
use crate::tools::types::ToolParameters;

/// Create the `cpu_usage` tool — reports the host CPU model and load.
pub fn cpu_usage_tool() -> Arc<dyn Tool> {
    Arc::new(FunctionTool::new(
        "cpu_usage",
        "Gets the current CPU usage of the system.",
        ToolParameters::empty(),
        |_args| async move { Ok(serde_json::json!(read_cpu_usage())) },
    ))
}

fn read_cpu_usage() -> String {
    let model = std::fs::read_to_string("/proc/cpuinfo")
        .ok()
        .and_then(|info| {
            info.lines()
                .find(|line| line.starts_with("model name"))
                .and_then(|line| line.split(':').nth(1))
                .map(|name| name.trim().to_string())
        })
        .unwrap_or_else(|| "unknown cpu".to_string());

    let load = std::fs::read_to_string("/proc/loadavg")
        .ok()
        .and_then(|avg| avg.split_whitespace().next().map(str::to_string))
        .unwrap_or_else(|| "0.00".to_string());

    format!("CPU Usage: {model}, load {load}")
}

/// All built-in tools registered at process start.
pub fn all_tools() -> Vec<Arc<dyn Tool>> {
    vec![cpu_usage_tool()]
}
