//! JSONL transcript of guide conversations.
//!
//! The use case reports a turn as three events (`user_message`,
//! `reply_received`, `reply_parsed`). The transcript folds them into one
//! `turn` record per question:
//!
//! ```json
//! {"type":"turn","timestamp":"...","message":"¿Qué control uso?",
//!  "request_language":"es","conversation_id":"c-1","reply":"Resumen: ...",
//!  "retries":0,"reply_language":"es","blocks":4,"suggestions":["..."]}
//! ```
//!
//! A turn that never gets a reply is written with `"complete": false` when
//! the next question starts or the logger is dropped. Any other event is
//! written on its own line. The file is opened in append mode, so reopening
//! it continues the transcript.

use guide_application::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Fields copied from each turn event, as `(payload key, record key)`.
const USER_MESSAGE_FIELDS: &[(&str, &str)] = &[
    ("message", "message"),
    ("language", "request_language"),
    ("conversation_id", "conversation_id"),
];
const REPLY_RECEIVED_FIELDS: &[(&str, &str)] = &[
    ("reply", "reply"),
    ("conversation_id", "conversation_id"),
    ("retries", "retries"),
];
const REPLY_PARSED_FIELDS: &[(&str, &str)] = &[
    ("language", "reply_language"),
    ("blocks", "blocks"),
    ("suggestions", "suggestions"),
];

struct Transcript {
    writer: BufWriter<File>,
    /// Turn waiting for its `reply_parsed` event
    open_turn: Option<Map<String, Value>>,
}

impl Transcript {
    fn write(&mut self, record: &Value) {
        let Ok(line) = serde_json::to_string(record) else {
            return;
        };
        let _ = writeln!(self.writer, "{}", line);
        let _ = self.writer.flush();
    }

    fn close_turn(&mut self, complete: bool) {
        if let Some(mut turn) = self.open_turn.take() {
            if !complete {
                turn.insert("complete".to_string(), Value::Bool(false));
            }
            self.write(&Value::Object(turn));
        }
    }
}

/// Conversation logger that writes one JSON record per turn.
pub struct JsonlConversationLogger {
    transcript: Mutex<Transcript>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open a transcript appending to `path`, creating parent directories.
    ///
    /// Returns `None` (with a warning) when the file cannot be opened; the
    /// conversation then runs without a transcript.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            transcript: Mutex::new(Transcript {
                writer: BufWriter::new(file),
                open_turn: None,
            }),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn copy_fields(turn: &mut Map<String, Value>, payload: &Value, fields: &[(&str, &str)]) {
    for (from, to) in fields {
        match payload.get(from) {
            // A reply without an id keeps the one the question was sent with
            Some(Value::Null) if turn.contains_key(*to) => {}
            Some(value) => {
                turn.insert(to.to_string(), value.clone());
            }
            None => {}
        }
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut transcript) = self.transcript.lock() else {
            return;
        };

        match event.event_type {
            "user_message" => {
                transcript.close_turn(false);
                let mut turn = Map::new();
                turn.insert("type".to_string(), Value::from("turn"));
                turn.insert("timestamp".to_string(), Value::from(now()));
                copy_fields(&mut turn, &event.payload, USER_MESSAGE_FIELDS);
                transcript.open_turn = Some(turn);
            }
            "reply_received" | "reply_parsed" => {
                let Some(turn) = transcript.open_turn.as_mut() else {
                    // Reply without a question; nothing to attach it to
                    return;
                };
                if event.event_type == "reply_received" {
                    copy_fields(turn, &event.payload, REPLY_RECEIVED_FIELDS);
                } else {
                    copy_fields(turn, &event.payload, REPLY_PARSED_FIELDS);
                    transcript.close_turn(true);
                }
            }
            other => {
                let record = serde_json::json!({
                    "type": other,
                    "timestamp": now(),
                    "data": event.payload,
                });
                transcript.write(&record);
            }
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut transcript) = self.transcript.lock() {
            transcript.close_turn(false);
            let _ = transcript.writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    fn read_lines(path: &Path) -> Vec<Value> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn log_turn(logger: &JsonlConversationLogger, message: &str, reply_id: Option<&str>) {
        logger.log(ConversationEvent::new(
            "user_message",
            json!({ "message": message, "language": "es", "conversation_id": null }),
        ));
        logger.log(ConversationEvent::new(
            "reply_received",
            json!({ "reply": "Resumen: usa un pedal", "conversation_id": reply_id, "retries": 1 }),
        ));
        logger.log(ConversationEvent::new(
            "reply_parsed",
            json!({ "language": "es", "blocks": 2, "suggestions": ["¿Y para PC?"] }),
        ));
    }

    #[test]
    fn test_turn_events_fold_into_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        log_turn(&logger, "¿Qué control uso?", Some("c-1"));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 1);
        let turn = &records[0];
        assert_eq!(turn["type"], "turn");
        assert!(turn["timestamp"].is_string());
        assert_eq!(turn["message"], "¿Qué control uso?");
        assert_eq!(turn["request_language"], "es");
        assert_eq!(turn["conversation_id"], "c-1");
        assert_eq!(turn["reply"], "Resumen: usa un pedal");
        assert_eq!(turn["retries"], 1);
        assert_eq!(turn["reply_language"], "es");
        assert_eq!(turn["blocks"], 2);
        assert_eq!(turn["suggestions"][0], "¿Y para PC?");
        assert!(turn.get("complete").is_none());
    }

    #[test]
    fn test_reply_without_id_keeps_question_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new(
            "user_message",
            json!({ "message": "hi", "language": "en", "conversation_id": "c-9" }),
        ));
        logger.log(ConversationEvent::new(
            "reply_received",
            json!({ "reply": "Hello", "conversation_id": null, "retries": 0 }),
        ));
        logger.log(ConversationEvent::new(
            "reply_parsed",
            json!({ "language": "en", "blocks": 1, "suggestions": [] }),
        ));
        drop(logger);

        assert_eq!(read_lines(&path)[0]["conversation_id"], "c-9");
    }

    #[test]
    fn test_unanswered_turn_is_marked_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new(
            "user_message",
            json!({ "message": "first", "language": "en", "conversation_id": null }),
        ));
        log_turn(&logger, "second", None);
        logger.log(ConversationEvent::new(
            "user_message",
            json!({ "message": "third", "language": "en", "conversation_id": null }),
        ));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["message"], "first");
        assert_eq!(records[0]["complete"], false);
        assert_eq!(records[1]["message"], "second");
        assert!(records[1].get("complete").is_none());
        assert_eq!(records[2]["message"], "third");
        assert_eq!(records[2]["complete"], false);
    }

    #[test]
    fn test_transcript_appends_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("transcript.jsonl");

        for message in ["one", "two"] {
            let logger = JsonlConversationLogger::open(&path).unwrap();
            log_turn(&logger, message, Some("c-1"));
        }

        let records = read_lines(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["message"], "two");
    }

    #[test]
    fn test_other_events_get_their_own_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.jsonl");
        let logger = JsonlConversationLogger::open(&path).unwrap();

        logger.log(ConversationEvent::new("session_note", json!("just a string")));
        logger.log(ConversationEvent::new("reply_parsed", json!({ "blocks": 1 })));
        drop(logger);

        let records = read_lines(&path);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], "session_note");
        assert_eq!(records[0]["data"], "just a string");
    }

    #[test]
    fn test_open_returns_none_when_path_is_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(JsonlConversationLogger::open(dir.path()).is_none());
    }
}
