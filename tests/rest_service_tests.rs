//! REST client tests against a mock server.

use futures::StreamExt;
use pretty_assertions::assert_eq;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use herald::error::HeraldError;
use herald::service::{AgentService, CreateAgentRequest, RestService};
use herald::types::Role;

fn create_agent_request() -> CreateAgentRequest {
    CreateAgentRequest {
        model: "gpt-4o".into(),
        name: "agent-test".into(),
        instructions: "You are a helpful agent.".into(),
        temperature: 0.5,
        tools: Vec::new(),
        tool_resources: None,
    }
}

#[tokio::test]
async fn create_agent_sends_bearer_auth_and_decodes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/assistants"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_string_contains("gpt-4o"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "agent_1",
            "name": "agent-test",
            "model": "gpt-4o"
        })))
        .mount(&server)
        .await;

    let service = RestService::new(server.uri(), "test-key");
    let agent = service.create_agent(&create_agent_request()).await.unwrap();
    assert_eq!(agent.id, "agent_1");
}

#[tokio::test]
async fn error_status_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/threads"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream failure"))
        .mount(&server)
        .await;

    let service = RestService::new(server.uri(), "test-key");
    let err = service.create_thread().await.unwrap_err();
    assert!(matches!(err, HeraldError::Api { status: 500, .. }));
}

#[tokio::test]
async fn unauthorized_maps_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/threads/t1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .mount(&server)
        .await;

    let service = RestService::new(server.uri(), "wrong-key");
    let err = service.list_messages("t1").await.unwrap_err();
    assert!(matches!(err, HeraldError::Authentication(_)));
}

#[tokio::test]
async fn list_messages_returns_stored_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/threads/t1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "id": "msg_1",
                    "role": "user",
                    "content": [{ "type": "text", "text": { "value": "hi" } }]
                },
                {
                    "id": "msg_2",
                    "role": "assistant",
                    "content": [{ "type": "text", "text": { "value": "hello" } }]
                }
            ]
        })))
        .mount(&server)
        .await;

    let service = RestService::new(server.uri(), "test-key");
    let messages = service.list_messages("t1").await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].id, "msg_1");
    assert_eq!(messages[1].role, Role::Assistant);
}

#[tokio::test]
async fn start_run_streams_server_events() {
    let server = MockServer::start().await;
    let sse_body = concat!(
        "event: thread.run.created\n",
        "data: {\"id\":\"run_1\",\"status\":\"queued\"}\n",
        "\n",
        "event: thread.message.delta\n",
        "data: {\"id\":\"msg_1\",\"delta\":{\"content\":[{\"type\":\"text\",\"text\":{\"value\":\"hi\"}}]}}\n",
        "\n",
        "event: done\n",
        "data: [DONE]\n",
        "\n",
    );
    Mock::given(method("POST"))
        .and(path("/threads/t1/runs"))
        .and(body_string_contains("\"stream\":true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(sse_body, "text/event-stream"),
        )
        .mount(&server)
        .await;

    let service = RestService::new(server.uri(), "test-key");
    let mut stream = service.start_run("t1", "agent_1").await.unwrap();

    let mut kinds = Vec::new();
    while let Some(event) = stream.next().await {
        kinds.push(event.unwrap().kind);
    }
    assert_eq!(
        kinds,
        vec!["thread.run.created", "thread.message.delta", "done"]
    );
}

#[tokio::test]
async fn upload_file_round_trips_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "file_1",
            "filename": "data.csv",
            "purpose": "assistants"
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("data.csv");
    std::fs::write(&file_path, "a,b\n1,2\n").unwrap();

    let service = RestService::new(server.uri(), "test-key");
    let file = service.upload_file(&file_path, "assistants").await.unwrap();
    assert_eq!(file.id, "file_1");
    assert_eq!(file.filename, "data.csv");
}

#[tokio::test]
async fn get_file_content_returns_raw_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/file_1/content"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"\x89PNGfake".to_vec()))
        .mount(&server)
        .await;

    let service = RestService::new(server.uri(), "test-key");
    let bytes = service.get_file_content("file_1").await.unwrap();
    assert_eq!(bytes, b"\x89PNGfake");
}

#[tokio::test]
async fn delete_agent_succeeds_on_2xx() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/assistants/agent_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "agent_1",
            "deleted": true
        })))
        .mount(&server)
        .await;

    let service = RestService::new(server.uri(), "test-key");
    service.delete_agent("agent_1").await.unwrap();
}
