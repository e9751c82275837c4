//! Thread messages and streamed message deltas.

use serde::{Deserialize, Serialize};

/// Message author role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One stored message in a thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadMessage {
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub content: Vec<MessageContent>,
}

/// A typed content fragment within a stored message.
///
/// The service may grow new fragment kinds; unknown tags decode to
/// [`MessageContent::Other`] instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageContent {
    Text { text: TextValue },
    ImageFile { image_file: ImageFileRef },
    #[serde(other)]
    Other,
}

impl MessageContent {
    /// The wire tag for this fragment kind.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::ImageFile { .. } => "image_file",
            Self::Other => "unknown",
        }
    }
}

/// Text payload of a content fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextValue {
    pub value: String,
}

/// Reference to an image file in the remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFileRef {
    pub file_id: String,
}

/// Page of thread messages, oldest-first as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListMessagesResponse {
    pub data: Vec<ThreadMessage>,
}

/// One streamed delta for a message under construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDeltaChunk {
    /// Id of the message this delta belongs to.
    pub id: String,
    pub delta: MessageDelta,
}

/// Incremental content carried by a delta chunk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDelta {
    #[serde(default)]
    pub content: Vec<DeltaContent>,
}

/// One incremental content fragment.
///
/// Text fragments carry a chunk to append; image fragments are only a
/// marker that an image is being produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeltaContent {
    Text {
        #[serde(default)]
        text: Option<TextValue>,
    },
    ImageFile,
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_decodes() {
        let json = serde_json::json!({
            "type": "text",
            "text": { "value": "hello", "annotations": [] }
        });
        let content: MessageContent = serde_json::from_value(json).unwrap();
        match content {
            MessageContent::Text { text } => assert_eq!(text.value, "hello"),
            other => panic!("unexpected content: {other:?}"),
        }
    }

    #[test]
    fn unknown_content_kind_is_lenient() {
        let json = serde_json::json!({ "type": "audio_clip", "audio": {} });
        let content: MessageContent = serde_json::from_value(json).unwrap();
        assert!(matches!(content, MessageContent::Other));
        assert_eq!(content.type_tag(), "unknown");
    }

    #[test]
    fn delta_chunk_decodes_mixed_fragments() {
        let json = serde_json::json!({
            "id": "msg_1",
            "delta": {
                "content": [
                    { "type": "text", "text": { "value": "Hel" } },
                    { "type": "image_file", "image_file": { "file_id": "file_9" } }
                ]
            }
        });
        let chunk: MessageDeltaChunk = serde_json::from_value(json).unwrap();
        assert_eq!(chunk.delta.content.len(), 2);
        assert!(matches!(chunk.delta.content[1], DeltaContent::ImageFile));
    }
}
