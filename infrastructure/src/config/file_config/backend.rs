//! Backend configuration from TOML (`[backend]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw backend configuration from TOML
///
/// Without a `url` the guide runs offline and echoes messages back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// Base URL of the guide backend (e.g. "http://localhost:8000")
    pub url: Option<String>,
    /// Use the server-sent events endpoint
    pub stream: bool,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Retries in a fresh conversation when the model refuses
    pub refusal_retries: u32,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            stream: false,
            timeout_secs: 30,
            refusal_retries: 1,
        }
    }
}

impl FileBackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured URL, if set and non-blank.
    pub fn url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
