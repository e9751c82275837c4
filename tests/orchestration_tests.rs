//! End-to-end orchestration over a mock service: stream, tool resume, images.

use std::sync::Arc;

use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use herald::run::RunDriver;
use herald::service::{AgentService, RestService};
use herald::tools::tool::FunctionTool;
use herald::tools::{ToolParameters, ToolRegistry};
use herald::transcript::{collect_images, render_messages};

fn sse(events: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (kind, data) in events {
        body.push_str(&format!("event: {kind}\ndata: {data}\n\n"));
    }
    body
}

#[tokio::test]
async fn no_tool_prompt_completes_and_renders_newest_first() {
    let server = MockServer::start().await;
    let body = sse(&[
        ("thread.run.created", r#"{"id":"run_1","status":"queued"}"#),
        (
            "thread.message.delta",
            r#"{"id":"msg_2","delta":{"content":[{"type":"text","text":{"value":"x = 1"}}]}}"#,
        ),
        ("thread.run.completed", r#"{"id":"run_1","status":"completed"}"#),
        ("done", "[DONE]"),
    ]);
    Mock::given(method("POST"))
        .and(path("/threads/t1/runs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/threads/t1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "id": "msg_1",
                    "role": "user",
                    "content": [{ "type": "text", "text": { "value": "solve 3x + 11 = 14" } }]
                },
                {
                    "id": "msg_2",
                    "role": "assistant",
                    "content": [{ "type": "text", "text": { "value": "x = 1" } }]
                }
            ]
        })))
        .mount(&server)
        .await;

    let service = RestService::new(server.uri(), "test-key");
    let registry = ToolRegistry::new();

    let mut driver = RunDriver::new(&service, &registry);
    let run_id = driver.drive("t1", "agent_1").await.unwrap();
    assert_eq!(run_id, "run_1");
    assert_eq!(driver.transcript().text_for("msg_2"), Some("x = 1"));

    let messages = service.list_messages("t1").await.unwrap();
    let rendered = render_messages(&messages);
    let reply_pos = rendered.find("Agent: x = 1").unwrap();
    let prompt_pos = rendered.find("User: solve 3x + 11 = 14").unwrap();
    assert!(reply_pos < prompt_pos);
}

#[tokio::test]
async fn requires_action_resumes_on_submission_stream() {
    let server = MockServer::start().await;
    let first = sse(&[
        ("thread.run.created", r#"{"id":"run_9","status":"queued"}"#),
        (
            "thread.run.requires_action",
            r#"{"id":"run_9","status":"requires_action","required_action":{"type":"submit_tool_outputs","submit_tool_outputs":{"tool_calls":[{"id":"call_1","type":"function","function":{"name":"cpu_usage","arguments":"{}"}}]}}}"#,
        ),
    ]);
    let second = sse(&[
        (
            "thread.message.delta",
            r#"{"id":"msg_1","delta":{"content":[{"type":"text","text":{"value":"CPU is fine"}}]}}"#,
        ),
        ("thread.run.completed", r#"{"id":"run_9","status":"completed"}"#),
        ("done", "[DONE]"),
    ]);

    Mock::given(method("POST"))
        .and(path("/threads/t1/runs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(first, "text/event-stream"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/threads/t1/runs/run_9/submit_tool_outputs"))
        .and(body_string_contains("call_1"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(second, "text/event-stream"))
        .expect(1)
        .mount(&server)
        .await;

    let service = RestService::new(server.uri(), "test-key");
    let mut registry = ToolRegistry::new();
    registry
        .register(Arc::new(FunctionTool::new(
            "cpu_usage",
            "reports cpu usage",
            ToolParameters::empty(),
            |_args| async move { Ok(serde_json::json!("CPU Usage: 10%")) },
        )))
        .unwrap();

    let mut driver = RunDriver::new(&service, &registry);
    let run_id = driver.drive("t1", "agent_1").await.unwrap();

    assert_eq!(run_id, "run_9");
    assert_eq!(driver.transcript().text_for("msg_1"), Some("CPU is fine"));
}

#[tokio::test]
async fn collect_images_downloads_then_deletes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/file_7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "file_7",
            "filename": "chart.png"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/file_7/content"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"png-bytes".to_vec()))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/files/file_7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "file_7",
            "deleted": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = RestService::new(server.uri(), "test-key");
    let messages: Vec<herald::types::ThreadMessage> = serde_json::from_value(serde_json::json!([
        {
            "id": "msg_1",
            "role": "assistant",
            "content": [
                { "type": "image_file", "image_file": { "file_id": "file_7" } },
                { "type": "text", "text": { "value": "here is your chart" } }
            ]
        }
    ]))
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let download_dir = dir.path().join("downloads");
    let saved = collect_images(&service, &messages, &download_dir).await.unwrap();

    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0], download_dir.join("chart.png"));
    assert_eq!(std::fs::read(&saved[0]).unwrap(), b"png-bytes");
}

#[tokio::test]
async fn collect_images_with_no_image_fragments_is_a_no_op() {
    let server = MockServer::start().await;
    let service = RestService::new(server.uri(), "test-key");

    let messages: Vec<herald::types::ThreadMessage> = serde_json::from_value(serde_json::json!([
        {
            "id": "msg_1",
            "role": "assistant",
            "content": [{ "type": "text", "text": { "value": "no images here" } }]
        }
    ]))
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let download_dir = dir.path().join("downloads");
    let saved = collect_images(&service, &messages, &download_dir).await.unwrap();

    assert!(saved.is_empty());
    assert!(!download_dir.exists());
}
