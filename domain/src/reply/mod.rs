//! Structured replies.
//!
//! - [`parser`] - turns a raw reply into [`DisplayBlock`]s and suggestions
//! - [`cleanup`] - removes generator artifacts before parsing
//! - [`block`] - the parser's output types
//! - [`intent`] - greeting and refusal checks
//! - [`canned`] - fixed replies for when no model answer is available

pub mod block;
pub mod canned;
pub mod cleanup;
pub mod intent;
pub mod parser;

pub use block::{DisplayBlock, HeadingStyle, ParsedReply};
pub use parser::{DEFAULT_SUGGESTION_CAP, ParseOptions, parse, parse_with};
