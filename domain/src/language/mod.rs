//! Reply languages and their classification.
//!
//! - [`Language`] - the two languages the guide speaks
//! - [`labels`] - the per-language section heading vocabulary
//! - [`classifier`] - lexical heuristics that pick a [`Language`] for a text

pub mod classifier;
pub mod labels;

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language of a message or reply.
///
/// `English` is the primary language, `Spanish` the secondary one. The
/// serialized form is the ISO 639-1 code used on the wire (`"en"` / `"es"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
}

impl Language {
    /// All languages, primary first.
    pub const ALL: [Language; 2] = [Language::English, Language::Spanish];

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, Language::English)
    }

    /// The other language of the pair.
    pub fn other(&self) -> Language {
        match self {
            Language::English => Language::Spanish,
            Language::Spanish => Language::English,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "es" | "spanish" | "español" | "espanol" => Ok(Language::Spanish),
            _ => Err(DomainError::UnknownLanguage(s.to_string())),
        }
    }
}
