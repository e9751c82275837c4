//! Remote agent service boundary.
//!
//! The orchestration loop only sees this trait; the concrete REST client
//! lives in [`rest`]. Event streams are lazy, single-pass, and
//! non-restartable — resuming a run after tool submission always yields a
//! fresh stream.

pub mod http;
pub mod rest;

pub use rest::RestService;

use std::path::Path;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::Serialize;

use crate::error::Result;
use crate::tools::provision::{ToolDefinition, ToolResources};
use crate::types::{Agent, AgentThread, Connection, FileInfo, Role, ThreadMessage, ThreadRun, ToolOutput};

/// One raw server-sent event: discriminator plus undecoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEvent {
    /// Event discriminator, e.g. `thread.run.created`.
    pub kind: String,
    /// Raw data payload; JSON for most kinds, `[DONE]` for the terminator.
    pub data: String,
}

/// Ordered stream of run events, pulled one at a time.
pub type EventStream = BoxStream<'static, Result<ServerEvent>>;

/// Parameters for creating a remote agent.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAgentRequest {
    pub model: String,
    pub name: String,
    pub instructions: String,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_resources: Option<ToolResources>,
}

/// Operations the orchestration loop needs from the remote service.
#[async_trait]
pub trait AgentService: Send + Sync {
    async fn create_agent(&self, request: &CreateAgentRequest) -> Result<Agent>;
    async fn delete_agent(&self, agent_id: &str) -> Result<()>;

    async fn create_thread(&self) -> Result<AgentThread>;
    async fn create_message(&self, thread_id: &str, role: Role, content: &str) -> Result<()>;
    /// Thread messages, oldest-first as stored.
    async fn list_messages(&self, thread_id: &str) -> Result<Vec<ThreadMessage>>;

    /// Start a run and open its event stream.
    async fn start_run(&self, thread_id: &str, agent_id: &str) -> Result<EventStream>;
    /// Submit tool outputs for a blocked run, yielding a new event stream.
    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<EventStream>;
    async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<ThreadRun>;

    async fn upload_file(&self, path: &Path, purpose: &str) -> Result<FileInfo>;
    async fn get_file(&self, file_id: &str) -> Result<FileInfo>;
    async fn get_file_content(&self, file_id: &str) -> Result<Vec<u8>>;
    async fn delete_file(&self, file_id: &str) -> Result<()>;

    async fn get_connection(&self, connection_id: &str) -> Result<Connection>;
}
