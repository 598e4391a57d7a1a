//! Validator error types

use rulegate_core::{CoreError, ValidationIssue};
use thiserror::Error;

/// Validator error
///
/// Validation problems themselves are returned as data in a
/// `ValidationResult`; this type covers the operations that need a typed
/// value out of a payload.
#[derive(Error, Debug)]
pub enum ValidatorError {
    /// The input failed validation
    #[error("Validation failed: {}", join_issues(.issues))]
    Invalid { issues: Vec<ValidationIssue> },

    /// The input passed validation but does not fit the typed model
    #[error("Conversion error: {0}")]
    Conversion(#[from] serde_json::Error),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] CoreError),
}

/// Result type for validator operations
pub type Result<T> = std::result::Result<T, ValidatorError>;

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().map(|i| i.to_string()).collect::<Vec<_>>().join("; ")
}
