//! Classification of raw server events into typed run events.

use serde::de::DeserializeOwned;

use crate::error::{HeraldError, Result};
use crate::service::ServerEvent;
use crate::types::{MessageDeltaChunk, ThreadRun};

/// Wire discriminators for the run event stream.
pub mod kind {
    pub const THREAD_RUN_CREATED: &str = "thread.run.created";
    pub const THREAD_MESSAGE_DELTA: &str = "thread.message.delta";
    pub const THREAD_RUN_REQUIRES_ACTION: &str = "thread.run.requires_action";
    pub const THREAD_RUN_COMPLETED: &str = "thread.run.completed";
    pub const ERROR: &str = "error";
    pub const DONE: &str = "done";
}

/// A classified run event with its decoded payload.
#[derive(Debug, Clone)]
pub enum RunEvent {
    RunCreated(ThreadRun),
    MessageDelta(MessageDeltaChunk),
    RequiresAction(ThreadRun),
    RunCompleted(ThreadRun),
    /// Non-fatal error report from the service; the run may still complete.
    StreamError(String),
    /// Stream terminator.
    Done,
}

/// Classify one raw event.
///
/// Unrecognized discriminators return `Ok(None)` so new server-side event
/// kinds pass through harmlessly. A recognized discriminator whose payload
/// does not decode is a [`HeraldError::StreamProtocol`] and propagates.
pub fn interpret(event: &ServerEvent) -> Result<Option<RunEvent>> {
    let interpreted = match event.kind.as_str() {
        kind::THREAD_RUN_CREATED => RunEvent::RunCreated(decode(event)?),
        kind::THREAD_MESSAGE_DELTA => RunEvent::MessageDelta(decode(event)?),
        kind::THREAD_RUN_REQUIRES_ACTION => RunEvent::RequiresAction(decode(event)?),
        kind::THREAD_RUN_COMPLETED => RunEvent::RunCompleted(decode(event)?),
        kind::ERROR => RunEvent::StreamError(event.data.clone()),
        kind::DONE => RunEvent::Done,
        _ => return Ok(None),
    };
    Ok(Some(interpreted))
}

fn decode<T: DeserializeOwned>(event: &ServerEvent) -> Result<T> {
    serde_json::from_str(&event.data)
        .map_err(|e| HeraldError::stream_protocol(&event.kind, e.to_string()))
}
