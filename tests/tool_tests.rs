//! Tests for the tool system public API.

use std::sync::Arc;

use herald::error::HeraldError;
use herald::tools::tool::FunctionTool;
use herald::tools::*;
use herald::types::{ToolCallFunction, ToolCallRequest};

fn call(name: &str, arguments: &str) -> ToolCallRequest {
    ToolCallRequest {
        id: "call_abc".into(),
        kind: "function".into(),
        function: ToolCallFunction {
            name: name.into(),
            arguments: arguments.into(),
        },
    }
}

#[test]
fn parameter_builder_constructs_schema() {
    let params = ToolParameters::object()
        .string("query", "Search query", true)
        .number("limit", "Max results", false)
        .build();

    let schema = &params.schema;
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["properties"]["query"]["type"], "string");
    assert_eq!(schema["required"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn registry_round_trip() {
    let mut registry = ToolRegistry::new();
    registry
        .register(Arc::new(FunctionTool::new(
            "getCpuUsage",
            "Gets the current CPU usage of the system.",
            ToolParameters::empty(),
            |_args| async move { Ok(serde_json::json!("CPU Usage: Cortex-X4 42%")) },
        )))
        .unwrap();

    let output = registry
        .invoke(&call("getCpuUsage", ""))
        .await
        .expect("registered tool should produce output");

    assert_eq!(output.tool_call_id, "call_abc");
    let decoded: String = serde_json::from_str(&output.output).unwrap();
    assert_eq!(decoded, "CPU Usage: Cortex-X4 42%");
}

#[tokio::test]
async fn duplicate_name_is_rejected() {
    let mut registry = ToolRegistry::new();
    let make = || {
        Arc::new(FunctionTool::new(
            "getCpuUsage",
            "v1",
            ToolParameters::empty(),
            |_args| async move { Ok(serde_json::json!("v1")) },
        ))
    };
    registry.register(make()).unwrap();
    let err = registry.register(make()).unwrap_err();

    assert!(matches!(err, HeraldError::DuplicateTool(name) if name == "getCpuUsage"));
    // original descriptor still answers
    let output = registry.invoke(&call("getCpuUsage", "{}")).await.unwrap();
    assert!(output.output.contains("v1"));
}

#[tokio::test]
async fn tool_receives_decoded_arguments() {
    let mut registry = ToolRegistry::new();
    registry
        .register(Arc::new(FunctionTool::new(
            "greet",
            "Greets a person by name",
            ToolParameters::object().string("name", "Who to greet", true).build(),
            |args| async move {
                let name = args.get_str("name")?.to_string();
                Ok(serde_json::json!(format!("Hello, {name}!")))
            },
        )))
        .unwrap();

    let output = registry
        .invoke(&call("greet", r#"{"name":"Ada"}"#))
        .await
        .unwrap();
    assert!(output.output.contains("Hello, Ada!"));
}

#[tokio::test]
async fn builtin_cpu_usage_registers_and_runs() {
    let mut registry = ToolRegistry::new();
    for tool in builtin::all_tools() {
        registry.register(tool).unwrap();
    }

    let output = registry.invoke(&call("cpu_usage", "")).await.unwrap();
    let decoded: String = serde_json::from_str(&output.output).unwrap();
    assert!(decoded.starts_with("CPU Usage:"));
}
