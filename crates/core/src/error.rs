//! Error types for roster.

use thiserror::Error;

/// Result type for roster core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the roster core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A caller passed a value outside the accepted domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A row position does not exist in the current view.
    #[error("Row index out of range: {index} (view has {count} rows)")]
    RowOutOfRange { index: usize, count: usize },

    /// No column is registered under the given key.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// A filter was applied to a column that does not support it.
    #[error("Filter {filter} cannot be applied to column '{column}' ({kind})")]
    FilterMismatch {
        column: String,
        filter: String,
        kind: String,
    },

    /// A column descriptor set failed validation.
    #[error("Invalid column set: {0}")]
    InvalidColumnSet(String),

    /// A page request with zero size.
    #[error("Invalid page: {0}")]
    InvalidPage(String),
}

impl CoreError {
    /// Create an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a filter mismatch error.
    pub fn filter_mismatch(
        column: impl Into<String>,
        filter: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self::FilterMismatch {
            column: column.into(),
            filter: filter.into(),
            kind: kind.into(),
        }
    }
}
