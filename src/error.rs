//! Error types for fieldcopy.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::template::TemplateError;
use thiserror::Error;

/// Main error type for fieldcopy operations outside the template core.
#[derive(Error, Debug)]
pub enum FieldcopyError {
    /// User provided invalid arguments, config or fixture data.
    #[error("{0}")]
    UserError(String),

    /// A template could not be rendered.
    #[error("Template rendering failed: {0}")]
    Template(#[from] TemplateError),

    /// A filter expression could not be resolved against a row.
    #[error("Cannot resolve '{expression}': {reason}")]
    Resolve { expression: String, reason: String },

    /// A file could not be copied.
    #[error("Copy failed: {0}")]
    CopyError(String),
}

impl FieldcopyError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            FieldcopyError::UserError(_) => exit_codes::USER_ERROR,
            FieldcopyError::Template(_) => exit_codes::TEMPLATE_FAILURE,
            FieldcopyError::Resolve { .. } => exit_codes::TEMPLATE_FAILURE,
            FieldcopyError::CopyError(_) => exit_codes::COPY_FAILURE,
        }
    }

    pub(crate) fn resolve(expression: &str, reason: impl Into<String>) -> Self {
        FieldcopyError::Resolve {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for fieldcopy operations.
pub type Result<T> = std::result::Result<T, FieldcopyError>;
