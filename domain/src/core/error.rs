//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid model role: {0} (expected style, coherence or structure)")]
    InvalidRole(String),

    #[error("Invalid activation mode: {0} (expected flow, doubt or polish)")]
    InvalidMode(String),

    #[error("Invalid severity: {0} (expected low, medium or high)")]
    InvalidSeverity(String),

    #[error("Invalid output format: {0} (expected full, verdict or json)")]
    InvalidOutputFormat(String),
}
