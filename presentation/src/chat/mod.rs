//! Interactive chat module
//!
//! Provides a line-based interactive chat with the guide.

mod repl;

pub use repl::{ChatRepl, ReplCommand, ReplInput};
