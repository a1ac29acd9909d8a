//! Presentation layer for adaptive-guide
//!
//! This crate contains CLI definitions, reply formatters
//! and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;

// Re-export commonly used types
pub use chat::{ChatRepl, ReplCommand, ReplInput};
pub use cli::commands::{Cli, Command, LanguageArg, OutputArg};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::PanelFormatter;
pub use output::formatter::OutputFormatter;
