//! Domain layer for adaptive-guide
//!
//! This crate contains the reply parser, the language classifier and the
//! value objects shared by the other layers. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Structured replies
//!
//! The guide's model is asked to answer under fixed headings (`Summary:`,
//! `Recommendations:`, `Rationale:`, `Next questions:`, or their Spanish
//! equivalents). [`reply::parse`] turns such a reply into [`DisplayBlock`]s
//! and promotes the "next questions" bullets to clickable suggestions.
//!
//! ## Language
//!
//! Every reply is parsed against the heading vocabulary of one [`Language`].
//! [`classify`] guesses the language of a user message from lexical hints;
//! [`infer_from_content`] reads it off the headings of a received reply.

pub mod config;
pub mod core;
pub mod language;
pub mod reply;
pub mod session;
pub mod util;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::error::DomainError;
pub use language::{
    Language,
    classifier::{classify, infer_from_content},
    labels::SectionKind,
};
pub use reply::{
    DEFAULT_SUGGESTION_CAP, DisplayBlock, HeadingStyle, ParseOptions, ParsedReply,
    intent::{is_greeting, looks_like_refusal},
    parse, parse_with,
};
pub use session::{
    buffer::ReplyBuffer,
    entities::{ChatReply, ChatRequest},
    stream::StreamEvent,
};
