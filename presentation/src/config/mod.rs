//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior.

use guide_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// How replies are printed
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Panel,
            color: true,
        }
    }
}

impl OutputConfig {
    /// Effective format: a panel without colour prints as plain text.
    pub fn effective_format(&self) -> OutputFormat {
        match self.format {
            OutputFormat::Panel if !self.color => OutputFormat::Plain,
            other => other,
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Request replies over the streaming endpoint
    pub stream: bool,
}
