//! Parser configuration from TOML (`[parser]` section)

use guide_domain::DEFAULT_SUGGESTION_CAP;
use serde::{Deserialize, Serialize};

/// Raw parser configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileParserConfig {
    /// Maximum number of follow-up suggestions per reply
    pub suggestion_cap: usize,
}

impl Default for FileParserConfig {
    fn default() -> Self {
        Self {
            suggestion_cap: DEFAULT_SUGGESTION_CAP,
        }
    }
}
