//! Streaming events for incremental reply delivery.
//!
//! The backend streams a reply as server-sent events: one `meta` event with
//! the conversation id, a series of `delta` text chunks, then `done` (or
//! `error`). [`StreamEvent`] is the decoded form of those events.

/// An event in a streamed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Conversation id assigned to this turn.
    Meta { conversation_id: Option<String> },
    /// A chunk of reply text.
    Delta(String),
    /// The reply is complete.
    Done,
    /// The backend gave up mid-stream.
    Error(String),
}

impl StreamEvent {
    /// Returns the text if this is a Delta event.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Done | StreamEvent::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_text_returns_content() {
        let event = StreamEvent::Delta("hello ".to_string());
        assert_eq!(event.text(), Some("hello "));
        assert!(!event.is_terminal());
    }

    #[test]
    fn done_and_error_are_terminal() {
        assert!(StreamEvent::Done.is_terminal());
        assert!(StreamEvent::Error("oops".to_string()).is_terminal());
        assert_eq!(StreamEvent::Error("oops".to_string()).text(), None);
    }

    #[test]
    fn meta_is_not_terminal() {
        let event = StreamEvent::Meta {
            conversation_id: Some("abc".to_string()),
        };
        assert!(!event.is_terminal());
        assert_eq!(event.text(), None);
    }
}
