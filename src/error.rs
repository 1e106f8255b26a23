//! Error types for Shelfmark

use thiserror::Error;

/// Main application error type.
///
/// Every variant carries a human-readable message that the presentation
/// layer surfaces verbatim. No operation is retried automatically.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Out of stock: {0}")]
    OutOfStock(String),

    #[error("Borrow limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = Vec::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                match &error.message {
                    Some(message) => messages.push(message.to_string()),
                    None => messages.push(format!("Invalid value for {}", field)),
                }
            }
        }
        AppError::Validation(messages.join("; "))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
