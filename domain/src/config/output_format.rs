//! Output format value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a rendered reply is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Coloured panel with headings and numbered suggestions (default)
    #[default]
    Panel,
    /// Same layout without colour
    Plain,
    /// JSON blocks and suggestions
    Json,
}

impl FromStr for OutputFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "panel" => Ok(OutputFormat::Panel),
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            _ => Err(DomainError::UnknownOutputFormat(s.to_string())),
        }
    }
}
