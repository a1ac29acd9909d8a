//! Configuration file loading for adaptive-guide
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables prefixed with `GUIDE_`
//! 2. `--config <path>` specified file
//! 3. Project root: `./guide.toml` or `./.guide.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/adaptive-guide/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileBackendConfig, FileConfig, FileLanguageConfig, FileLoggingConfig, FileOutputConfig,
    FileParserConfig,
};
pub use loader::ConfigLoader;
