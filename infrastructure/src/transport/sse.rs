//! Server-sent events decoding for the streaming chat endpoint.
//!
//! The backend writes frames like:
//!
//! ```text
//! event: meta
//! data: {"conversationId": "abc"}
//!
//! event: delta
//! data: {"text": "Hello "}
//!
//! event: done
//! data: {}
//! ```
//!
//! [`SseDecoder`] accepts the body in arbitrary chunks and yields a
//! [`StreamEvent`] for every complete frame.

use guide_domain::StreamEvent;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrameData {
    #[serde(default)]
    conversation_id: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Incremental decoder for a server-sent events body.
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of the body and return the events it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        self.pending.extend(chunk.iter().filter(|&&b| b != b'\r'));

        let mut events = Vec::new();
        while let Some(end) = find_frame_end(&self.pending) {
            let frame: Vec<u8> = self.pending.drain(..end + 2).collect();
            if let Some(event) = decode_frame(&String::from_utf8_lossy(&frame)) {
                events.push(event);
            }
        }
        events
    }

    /// Decode a trailing frame that was not followed by a blank line.
    pub fn finish(&mut self) -> Option<StreamEvent> {
        let rest = std::mem::take(&mut self.pending);
        decode_frame(&String::from_utf8_lossy(&rest))
    }
}

fn find_frame_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|pair| pair == b"\n\n")
}

fn decode_frame(frame: &str) -> Option<StreamEvent> {
    let mut name = "message";
    let mut data_lines = Vec::new();

    for line in frame.lines() {
        if line.starts_with(':') {
            continue;
        }
        let (field, value) = line.split_once(':').unwrap_or((line, ""));
        let value = value.strip_prefix(' ').unwrap_or(value);
        match field {
            "event" => name = value,
            "data" => data_lines.push(value),
            _ => {}
        }
    }

    if data_lines.is_empty() && name == "message" {
        return None;
    }

    let data = data_lines.join("\n");
    let parsed: FrameData = if data.trim().is_empty() {
        FrameData::default()
    } else {
        match serde_json::from_str(&data) {
            Ok(parsed) => parsed,
            Err(e) if name == "error" => {
                debug!("Unparsed error frame data: {}", e);
                return Some(StreamEvent::Error(data));
            }
            Err(e) => {
                debug!("Skipping '{}' frame with invalid data: {}", name, e);
                return None;
            }
        }
    };

    match name {
        "meta" => Some(StreamEvent::Meta {
            conversation_id: parsed.conversation_id,
        }),
        "delta" => parsed.text.map(StreamEvent::Delta),
        "done" => Some(StreamEvent::Done),
        "error" => Some(StreamEvent::Error(
            parsed.error.unwrap_or_else(|| "Streaming failed".to_string()),
        )),
        other => {
            debug!("Skipping unknown event '{}'", other);
            None
        }
    }
}
