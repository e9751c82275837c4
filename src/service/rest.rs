//! REST client for the hosted agent service.

use std::path::Path;

use async_trait::async_trait;
use futures::StreamExt;
use tracing::debug;

use crate::error::{HeraldError, Result};
use crate::types::{
    Agent, AgentThread, Connection, FileInfo, ListMessagesResponse, Role, ThreadMessage,
    ThreadRun, ToolOutput,
};

use super::http::{bearer_headers, shared_client, status_to_error, SseParser};
use super::{AgentService, CreateAgentRequest, EventStream, ServerEvent};

/// Concrete [`AgentService`] backed by the service's REST API.
#[derive(Debug, Clone)]
pub struct RestService {
    endpoint: String,
    api_key: String,
}

impl RestService {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build from loaded configuration.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(config.endpoint.clone(), config.api_key.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.endpoint)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = shared_client()
            .get(self.url(path))
            .headers(bearer_headers(&self.api_key))
            .send()
            .await?;
        Self::decode_json(resp).await
    }

    async fn post_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T> {
        let resp = shared_client()
            .post(self.url(path))
            .headers(bearer_headers(&self.api_key))
            .json(body)
            .send()
            .await?;
        Self::decode_json(resp).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let resp = shared_client()
            .delete(self.url(path))
            .headers(bearer_headers(&self.api_key))
            .send()
            .await?;
        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }
        Ok(())
    }

    async fn decode_json<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        if !(200..300).contains(&status) {
            return Err(status_to_error(status, &body));
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// POST a body and turn the SSE response into an event stream.
    async fn open_stream(&self, path: &str, body: serde_json::Value) -> Result<EventStream> {
        let resp = shared_client()
            .post(self.url(path))
            .headers(bearer_headers(&self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body_text = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body_text));
        }

        let byte_stream = resp.bytes_stream();

        let stream = async_stream::stream! {
            let mut parser = SseParser::new();
            futures::pin_mut!(byte_stream);

            while let Some(chunk_result) = byte_stream.next().await {
                let chunk = match chunk_result {
                    Ok(c) => c,
                    Err(e) => {
                        yield Err(HeraldError::Network(e));
                        break;
                    }
                };

                for (kind, data) in parser.push(&String::from_utf8_lossy(&chunk)) {
                    yield Ok(ServerEvent { kind, data });
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

#[async_trait]
impl AgentService for RestService {
    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<Agent> {
        debug!(name = %request.name, model = %request.model, "create agent");
        self.post_json("/assistants", &serde_json::to_value(request)?).await
    }

    async fn delete_agent(&self, agent_id: &str) -> Result<()> {
        debug!(agent_id, "delete agent");
        self.delete(&format!("/assistants/{agent_id}")).await
    }

    async fn create_thread(&self) -> Result<AgentThread> {
        self.post_json("/threads", &serde_json::json!({})).await
    }

    async fn create_message(&self, thread_id: &str, role: Role, content: &str) -> Result<()> {
        let body = serde_json::json!({ "role": role, "content": content });
        let _: serde_json::Value = self
            .post_json(&format!("/threads/{thread_id}/messages"), &body)
            .await?;
        Ok(())
    }

    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>> {
        let page: ListMessagesResponse = self
            .get_json(&format!("/threads/{thread_id}/messages"))
            .await?;
        Ok(page.data)
    }

    async fn start_run(&self, thread_id: &str, agent_id: &str) -> Result<EventStream> {
        debug!(thread_id, agent_id, "start run");
        self.open_stream(
            &format!("/threads/{thread_id}/runs"),
            serde_json::json!({ "assistant_id": agent_id, "stream": true }),
        )
        .await
    }

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<EventStream> {
        debug!(thread_id, run_id, outputs = outputs.len(), "submit tool outputs");
        self.open_stream(
            &format!("/threads/{thread_id}/runs/{run_id}/submit_tool_outputs"),
            serde_json::json!({ "tool_outputs": outputs, "stream": true }),
        )
        .await
    }

    async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<ThreadRun> {
        self.get_json(&format!("/threads/{thread_id}/runs/{run_id}")).await
    }

    async fn upload_file(&self, path: &Path, purpose: &str) -> Result<FileInfo> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        let form = reqwest::multipart::Form::new()
            .text("purpose", purpose.to_string())
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            );

        let resp = shared_client()
            .post(self.url("/files"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;
        Self::decode_json(resp).await
    }

    async fn get_file(&self, file_id: &str) -> Result<FileInfo> {
        self.get_json(&format!("/files/{file_id}")).await
    }

    async fn get_file_content(&self, file_id: &str) -> Result<Vec<u8>> {
        let resp = shared_client()
            .get(self.url(&format!("/files/{file_id}/content")))
            .headers(bearer_headers(&self.api_key))
            .send()
            .await?;
        let status = resp.status().as_u16();
        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            return Err(status_to_error(status, &body));
        }
        Ok(resp.bytes().await?.to_vec())
    }

    async fn delete_file(&self, file_id: &str) -> Result<()> {
        debug!(file_id, "delete file");
        self.delete(&format!("/files/{file_id}")).await
    }

    async fn get_connection(&self, connection_id: &str) -> Result<Connection> {
        self.get_json(&format!("/connections/{connection_id}")).await
    }
}
