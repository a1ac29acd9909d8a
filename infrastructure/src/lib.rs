//! Infrastructure layer for adaptive-guide
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod transport;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileBackendConfig, FileConfig, FileLanguageConfig, FileLoggingConfig,
    FileOutputConfig, FileParserConfig,
};
pub use logging::JsonlConversationLogger;
#[cfg(feature = "http")]
pub use transport::HttpReplySource;
pub use transport::{EchoReplySource, SseDecoder};
