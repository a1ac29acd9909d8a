//! Guide parameters - use case behaviour control.
//!
//! [`GuideParams`] groups the settings that the render and ask use cases
//! read. They are filled from the config file by the binary.

use guide_domain::{Language, ParseOptions};
use serde::{Deserialize, Serialize};

/// Behaviour of the render and ask use cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideParams {
    /// Language of the UI toggle; used when nothing in the text says otherwise.
    pub ui_language: Language,
    /// Detect the language of messages and replies instead of trusting the toggle.
    pub auto_detect: bool,
    /// Maximum number of suggestions per reply.
    pub suggestion_cap: usize,
    /// How many times a refusal is retried in a fresh conversation.
    pub refusal_retries: u32,
}

impl Default for GuideParams {
    fn default() -> Self {
        Self {
            ui_language: Language::default(),
            auto_detect: true,
            suggestion_cap: ParseOptions::default().suggestion_cap,
            refusal_retries: 1,
        }
    }
}

impl GuideParams {
    // ==================== Builder Methods ====================

    pub fn with_ui_language(mut self, language: Language) -> Self {
        self.ui_language = language;
        self
    }

    pub fn with_auto_detect(mut self, enabled: bool) -> Self {
        self.auto_detect = enabled;
        self
    }

    pub fn with_suggestion_cap(mut self, cap: usize) -> Self {
        self.suggestion_cap = cap;
        self
    }

    pub fn with_refusal_retries(mut self, retries: u32) -> Self {
        self.refusal_retries = retries;
        self
    }

    // ==================== Accessors ====================

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            suggestion_cap: self.suggestion_cap,
        }
    }
}
