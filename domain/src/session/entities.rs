//! Chat exchange entities.
//!
//! The JSON shape (`message`, `conversationId`, `language`, `reply`) matches
//! the guide backend's `/api/chat` endpoint.

use crate::language::Language;
use serde::{Deserialize, Serialize};

/// An outgoing user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    /// Opaque id issued by the backend; `None` starts a new conversation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub language: Language,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, language: Language) -> Self {
        Self {
            message: message.into(),
            conversation_id: None,
            language,
        }
    }

    pub fn with_conversation_id(mut self, id: Option<String>) -> Self {
        self.conversation_id = id;
        self
    }

    /// Same message, detached from any conversation.
    pub fn without_conversation(&self) -> Self {
        Self {
            conversation_id: None,
            ..self.clone()
        }
    }
}

/// A complete assistant reply for one turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub reply: String,
}

impl ChatReply {
    pub fn new(reply: impl Into<String>, conversation_id: Option<String>) -> Self {
        Self {
            conversation_id,
            reply: reply.into(),
        }
    }

    /// True if the reply has no visible text.
    pub fn is_blank(&self) -> bool {
        self.reply.trim().is_empty()
    }
}
