//! Transcript rendering: streamed deltas, stored messages, image side-channel.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::Result;
use crate::service::AgentService;
use crate::types::{MessageContent, MessageDeltaChunk, Role, ThreadMessage};

/// Accumulates streamed text per message id, in arrival order.
#[derive(Debug, Default)]
pub struct TranscriptBuffer {
    // first-seen order of message ids is preserved
    entries: Vec<(String, String)>,
}

impl TranscriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the text fragments of one delta chunk. Image fragments are
    /// markers only and accumulate nothing.
    pub fn apply(&mut self, chunk: &MessageDeltaChunk) {
        for fragment in &chunk.delta.content {
            if let crate::types::DeltaContent::Text { text: Some(text) } = fragment {
                self.append(&chunk.id, &text.value);
            }
        }
    }

    fn append(&mut self, message_id: &str, fragment: &str) {
        if let Some((_, buffer)) = self.entries.iter_mut().find(|(id, _)| id == message_id) {
            buffer.push_str(fragment);
        } else {
            self.entries
                .push((message_id.to_string(), fragment.to_string()));
        }
    }

    /// Accumulated text for one message.
    pub fn text_for(&self, message_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(id, _)| id == message_id)
            .map(|(_, text)| text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Render stored thread messages for the console.
///
/// Messages arrive oldest-first; the demo displays newest-first, so
/// iteration is reversed. Text fragments print their value; any other
/// fragment prints only its type tag.
pub fn render_messages(messages: &[ThreadMessage]) -> String {
    let mut out = String::new();
    out.push_str("\nMessages:\n----------------------------------------------\n");

    for message in messages.iter().rev() {
        let Some(content) = message.content.first() else {
            continue;
        };
        out.push_str(&format!("Type: {}\n", content.type_tag()));
        if let MessageContent::Text { text } = content {
            let speaker = match message.role {
                Role::User => "User",
                Role::Assistant => "Agent",
            };
            out.push_str(&format!("{speaker}: {}\n", text.value));
        }
    }

    out
}

/// Download every image file referenced by the messages, then delete the
/// remote copies. One-shot cleanup for code-interpreter prompts, not a cache.
pub async fn collect_images(
    service: &dyn AgentService,
    messages: &[ThreadMessage],
    download_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let file_ids: Vec<&str> = messages
        .iter()
        .flat_map(|m| m.content.iter())
        .filter_map(|content| match content {
            MessageContent::ImageFile { image_file } => Some(image_file.file_id.as_str()),
            _ => None,
        })
        .collect();

    if file_ids.is_empty() {
        return Ok(Vec::new());
    }

    std::fs::create_dir_all(download_dir)?;

    let mut saved = Vec::new();
    for file_id in &file_ids {
        let file = service.get_file(file_id).await?;
        let bytes = service.get_file_content(file_id).await?;
        let target = download_dir.join(&file.filename);
        std::fs::write(&target, bytes)?;
        info!(file_id, path = %target.display(), "saved image file");
        saved.push(target);
    }

    for file_id in &file_ids {
        if let Err(e) = service.delete_file(file_id).await {
            warn!(file_id, error = %e, "failed to delete remote image file");
        }
    }

    Ok(saved)
}
