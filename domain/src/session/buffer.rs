//! Accumulation of a streamed reply.

use super::entities::ChatReply;
use super::stream::StreamEvent;
use crate::language::Language;
use crate::reply::{ParseOptions, ParsedReply, parse_with};

/// Collects [`StreamEvent`]s into the reply received so far.
///
/// Parsing a partial reply is allowed; each call re-parses the whole
/// prefix from scratch, so the result for a given prefix is always the same.
#[derive(Debug, Clone, Default)]
pub struct ReplyBuffer {
    text: String,
    conversation_id: Option<String>,
    error: Option<String>,
    finished: bool,
}

impl ReplyBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Events after a terminal event are ignored.
    pub fn push(&mut self, event: StreamEvent) {
        if self.finished {
            return;
        }
        match event {
            StreamEvent::Meta { conversation_id } => {
                if conversation_id.is_some() {
                    self.conversation_id = conversation_id;
                }
            }
            StreamEvent::Delta(chunk) => self.text.push_str(&chunk),
            StreamEvent::Done => self.finished = true,
            StreamEvent::Error(message) => {
                self.error = Some(message);
                self.finished = true;
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Parse the text received so far.
    pub fn parse(&self, language: Language, options: &ParseOptions) -> ParsedReply {
        parse_with(&self.text, language, options)
    }

    /// Convert into a complete reply. Trailing whitespace left by word
    /// chunking is trimmed.
    pub fn into_reply(self) -> ChatReply {
        ChatReply::new(self.text.trim_end(), self.conversation_id)
    }
}
