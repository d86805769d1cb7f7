//! Error types for building, rendering and parsing property expressions.

use thiserror::Error;

/// Errors that can occur while building, rendering or parsing an expression.
///
/// Every variant describes a caller mistake. None of them are retried, and a
/// failing builder call never touches the expression it was called on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpressionError {
    /// The accessor has no usable property name.
    #[error("Cannot resolve accessor '{raw}': {reason}")]
    UnresolvableAccessor { raw: String, reason: String },

    /// The index is negative or neither an integer nor the wildcard.
    #[error("Invalid index '{value}', expected a non-negative integer or '*'")]
    InvalidIndex { value: String },

    /// An index was appended before any field.
    #[error("An index cannot start an expression, append a field first")]
    LeadingIndex,

    /// Render was called on an expression without nodes.
    #[error("Cannot render an empty expression")]
    EmptyExpressionRender,

    /// The input string is not a well-formed path.
    #[error("Invalid expression syntax at position {position}: {message}")]
    Parse { position: usize, message: String },
}

impl ExpressionError {
    pub(crate) fn unresolvable(raw: &str, reason: &str) -> Self {
        ExpressionError::UnresolvableAccessor {
            raw: raw.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_index(value: impl ToString) -> Self {
        ExpressionError::InvalidIndex {
            value: value.to_string(),
        }
    }
}
