//! Shared HTTP client, SSE parsing, and auth utilities.

use std::sync::OnceLock;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::HeraldError;

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// Get (or create) the shared reqwest client.
pub fn shared_client() -> &'static reqwest::Client {
    SHARED_CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .pool_max_idle_per_host(10)
            .build()
            .expect("Failed to build HTTP client")
    })
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {api_key}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Map an HTTP error status to a typed error.
pub fn status_to_error(status: u16, body: &str) -> HeraldError {
    match status {
        401 | 403 => HeraldError::Authentication(body.to_string()),
        _ => HeraldError::api(status, body),
    }
}

/// Incremental parser for an SSE byte stream.
///
/// Feed decoded chunks with [`push`](SseParser::push); complete events come
/// back in arrival order. The service terminates streams with a `done`
/// event carrying `[DONE]`.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: String,
    event_kind: Option<String>,
    data_lines: Vec<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a chunk of the response body, returning any completed events.
    pub fn push(&mut self, chunk: &str) -> Vec<(String, String)> {
        self.buffer.push_str(chunk);
        let mut events = Vec::new();

        while let Some(line_end) = self.buffer.find('\n') {
            let line = self.buffer[..line_end].trim_end_matches('\r').to_string();
            self.buffer.drain(..=line_end);

            if line.is_empty() {
                if let Some(kind) = self.event_kind.take() {
                    events.push((kind, self.data_lines.join("\n")));
                }
                self.data_lines.clear();
                continue;
            }
            if line.starts_with(':') {
                continue;
            }
            if let Some(kind) = line.strip_prefix("event:") {
                self.event_kind = Some(kind.trim().to_string());
            } else if let Some(data) = line.strip_prefix("data:") {
                self.data_lines.push(data.trim_start().to_string());
            }
        }

        events
    }
}
