//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Parsing and classification are total and never produce these; they come
/// from turning user or config input into domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Unknown output format: {0}")]
    UnknownOutputFormat(String),
}
