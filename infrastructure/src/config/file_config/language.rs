//! Language configuration from TOML (`[language]` section)

use guide_domain::{ConfigIssue, ConfigIssueCode, Language, Severity};
use serde::{Deserialize, Serialize};

/// Raw language configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLanguageConfig {
    /// UI language code ("en" or "es")
    pub default: String,
    /// Detect message and reply languages from their content
    pub auto_detect: bool,
}

impl Default for FileLanguageConfig {
    fn default() -> Self {
        Self {
            default: Language::default().code().to_string(),
            auto_detect: true,
        }
    }
}

impl FileLanguageConfig {
    /// Parse `default` into a [`Language`]
    ///
    /// Accepts: "en", "english", "es", "spanish", "español"
    pub fn parse_default(&self) -> (Language, Vec<ConfigIssue>) {
        match self.default.parse::<Language>() {
            Ok(language) => (language, vec![]),
            Err(_) => {
                let issue = ConfigIssue {
                    severity: Severity::Warning,
                    code: ConfigIssueCode::InvalidEnumValue {
                        field: "language.default".to_string(),
                        value: self.default.clone(),
                        valid_values: Language::ALL.iter().map(|l| l.code().to_string()).collect(),
                    },
                    message: format!(
                        "language.default: unknown value '{}', falling back to '{}'",
                        self.default,
                        Language::default()
                    ),
                };
                (Language::default(), vec![issue])
            }
        }
    }
}
