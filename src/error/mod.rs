//! Error types for Herald.

use thiserror::Error;

/// Primary error type for all Herald operations.
#[derive(Error, Debug)]
pub enum HeraldError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Stream protocol error in '{event}' event: {message}")]
    StreamProtocol { event: String, message: String },

    #[error("Tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("Tool execution error: {tool_name} - {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl HeraldError {
    /// Create an API error from a status code and response body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a stream protocol error for a recognized event kind whose
    /// payload did not match the expected shape.
    pub fn stream_protocol(event: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StreamProtocol {
            event: event.into(),
            message: message.into(),
        }
    }

    /// Whether this error should halt the process (as opposed to being
    /// logged by the menu loop).
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, HeraldError>;
