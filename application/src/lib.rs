//! Application layer for adaptive-guide
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GuideParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    reply_source::{ReplySource, SourceError, StreamHandle},
};
pub use use_cases::ask_guide::{AskGuideError, AskGuideInput, AskGuideOutput, AskGuideUseCase};
pub use use_cases::render_reply::{RenderReplyUseCase, RenderedReply};
