//! The run drive loop: stream consumption, tool servicing, resumption.

use std::sync::Arc;

use futures::StreamExt;
use tracing::{debug, warn};

use crate::error::{HeraldError, Result};
use crate::service::{AgentService, EventStream};
use crate::tools::ToolRegistry;
use crate::transcript::TranscriptBuffer;
use crate::types::{RequiredAction, ThreadRun, ToolOutput};

use super::events::{interpret, RunEvent};

/// Callback invoked with each streamed text fragment, for live echo.
pub type DeltaSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Drives one remote run to a terminal state.
///
/// Owns the run handle (thread id, agent id, captured run id) for the
/// duration of a single [`drive`](RunDriver::drive) call; the handle is
/// dropped when the call returns. The registry is shared and read-only.
pub struct RunDriver<'a> {
    service: &'a dyn AgentService,
    registry: &'a ToolRegistry,
    transcript: TranscriptBuffer,
    delta_sink: Option<DeltaSink>,
}

impl<'a> RunDriver<'a> {
    pub fn new(service: &'a dyn AgentService, registry: &'a ToolRegistry) -> Self {
        Self {
            service,
            registry,
            transcript: TranscriptBuffer::new(),
            delta_sink: None,
        }
    }

    /// Echo streamed text fragments as they arrive.
    pub fn with_delta_sink(mut self, sink: DeltaSink) -> Self {
        self.delta_sink = Some(sink);
        self
    }

    /// Text accumulated from streamed deltas during the last drive.
    pub fn transcript(&self) -> &TranscriptBuffer {
        &self.transcript
    }

    /// Start a run for `(thread, agent)` and consume its event stream until
    /// a terminal event or stream exhaustion.
    ///
    /// Returns the run id captured from the run-created event, or the empty
    /// string if the stream ended without one. Remote-call failures and
    /// malformed payloads of recognized event kinds propagate; unrecognized
    /// event kinds and non-fatal error events are absorbed.
    pub async fn drive(&mut self, thread_id: &str, agent_id: &str) -> Result<String> {
        let mut stream = self.service.start_run(thread_id, agent_id).await?;
        let mut run_id = String::new();

        loop {
            let Some(raw) = stream.next().await else {
                // stream exhausted without a completion event: degraded success
                debug!(%run_id, "event stream ended without completion");
                break;
            };
            let raw = raw?;

            let Some(event) = interpret(&raw)? else {
                debug!(kind = %raw.kind, "ignoring unrecognized event kind");
                continue;
            };

            match event {
                RunEvent::RunCreated(run) => {
                    // first occurrence wins
                    if run_id.is_empty() {
                        run_id = run.id;
                        debug!(%run_id, "run created");
                    }
                }
                RunEvent::MessageDelta(chunk) => {
                    if let Some(sink) = &self.delta_sink {
                        for fragment in &chunk.delta.content {
                            if let crate::types::DeltaContent::Text { text: Some(text) } = fragment
                            {
                                sink(&text.value);
                            }
                        }
                    }
                    self.transcript.apply(&chunk);
                }
                RunEvent::RequiresAction(run) => {
                    if let Some(new_stream) = self.service_required_action(thread_id, &run).await? {
                        stream = new_stream;
                    }
                }
                RunEvent::StreamError(data) => {
                    // the remote may still complete the run after an error event
                    warn!(%run_id, error = %data, "run stream reported an error");
                }
                RunEvent::RunCompleted(_) => {
                    debug!(%run_id, "run completed");
                    break;
                }
                RunEvent::Done => break,
            }
        }

        Ok(run_id)
    }

    /// Service a requires-action batch: invoke registered tools in arrival
    /// order and submit their outputs, switching to the fresh stream the
    /// submission returns.
    ///
    /// A batch where no call produced an output fails the run explicitly
    /// rather than leaving the remote side blocked forever.
    async fn service_required_action(
        &mut self,
        thread_id: &str,
        run: &ThreadRun,
    ) -> Result<Option<EventStream>> {
        let Some(action) = &run.required_action else {
            return Ok(None);
        };
        if action.kind != RequiredAction::SUBMIT_TOOL_OUTPUTS {
            debug!(kind = %action.kind, "ignoring unsupported required action");
            return Ok(None);
        }
        let calls = action
            .submit_tool_outputs
            .as_ref()
            .map(|s| s.tool_calls.as_slice())
            .unwrap_or_default();

        let mut outputs: Vec<ToolOutput> = Vec::new();
        for call in calls {
            if let Some(output) = self.registry.invoke(call).await {
                outputs.push(output);
            }
        }

        if outputs.is_empty() {
            let names: Vec<&str> = calls.iter().map(|c| c.function.name.as_str()).collect();
            return Err(HeraldError::ToolExecution {
                tool_name: names.join(", "),
                message: "requires-action batch produced no tool outputs; failing the run".into(),
            });
        }

        let stream = self
            .service
            .submit_tool_outputs(thread_id, &run.id, &outputs)
            .await?;
        Ok(Some(stream))
    }
}
