//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod backend;
mod language;
mod logging;
mod output;
mod parser;

pub use backend::FileBackendConfig;
pub use language::FileLanguageConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use parser::FileParserConfig;

use guide_application::GuideParams;
use guide_domain::{ConfigIssue, ConfigIssueCode, Severity};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// UI language and detection
    pub language: FileLanguageConfig,
    /// Reply parser settings
    pub parser: FileParserConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Remote guide backend
    pub backend: FileBackendConfig,
    /// Transcript logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. The UI language code
    /// 2. A zero suggestion cap
    /// 3. A blank backend URL
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Enum parse validation
        issues.extend(self.language.parse_default().1);

        // 2. Suggestion cap
        if self.parser.suggestion_cap == 0 {
            issues.push(ConfigIssue {
                severity: Severity::Warning,
                code: ConfigIssueCode::ZeroSuggestionCap,
                message: "parser.suggestion_cap is 0, follow-up suggestions will never be shown"
                    .to_string(),
            });
        }

        // 3. Backend URL
        if self.backend.url.is_some() && self.backend.url().is_none() {
            issues.push(ConfigIssue {
                severity: Severity::Error,
                code: ConfigIssueCode::EmptyBackendUrl,
                message: "backend.url is set but empty; remove it to run offline".to_string(),
            });
        }

        issues
    }

    /// Build the use case parameters this configuration describes.
    pub fn guide_params(&self) -> GuideParams {
        let (language, _) = self.language.parse_default();
        GuideParams::default()
            .with_ui_language(language)
            .with_auto_detect(self.language.auto_detect)
            .with_suggestion_cap(self.parser.suggestion_cap)
            .with_refusal_retries(self.backend.refusal_retries)
    }
}
