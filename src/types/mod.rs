//! Wire types for the remote agent service.

pub mod agent;
pub mod message;
pub mod run;

pub use agent::{Agent, AgentThread, Connection, FileInfo};
pub use message::{
    DeltaContent, ImageFileRef, ListMessagesResponse, MessageContent, MessageDelta,
    MessageDeltaChunk, Role, TextValue, ThreadMessage,
};
pub use run::{
    RequiredAction, RunUsage, SubmitToolOutputs, ThreadRun, ToolCallRequest, ToolCallFunction,
    ToolOutput,
};
