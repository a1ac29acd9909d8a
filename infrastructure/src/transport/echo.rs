//! Offline reply source.

use async_trait::async_trait;
use guide_application::{ReplySource, SourceError};
use guide_domain::reply::canned;
use guide_domain::{ChatReply, ChatRequest, is_greeting};
use std::sync::atomic::{AtomicU64, Ordering};

/// Reply source used when no backend is configured.
///
/// Greetings get the canned welcome panel; anything else is echoed back in
/// the request language. Conversation ids are issued locally.
#[derive(Debug, Default)]
pub struct EchoReplySource {
    next_id: AtomicU64,
}

impl EchoReplySource {
    pub fn new() -> Self {
        Self::default()
    }

    fn conversation_id(&self, request: &ChatRequest) -> String {
        match &request.conversation_id {
            Some(id) => id.clone(),
            None => format!("local-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1),
        }
    }
}

#[async_trait]
impl ReplySource for EchoReplySource {
    fn name(&self) -> &str {
        "echo"
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, SourceError> {
        let reply = if is_greeting(&request.message) {
            canned::greeting(request.language).to_string()
        } else {
            canned::echo(request.message.trim(), request.language)
        };
        Ok(ChatReply::new(reply, Some(self.conversation_id(request))))
    }
}
