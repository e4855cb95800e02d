//! Index error types.

use thiserror::Error;

/// Errors raised by stores whose indexes are declared at runtime.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// The field was not declared as an index when the store was built.
    #[error("field `{field}` of `{record}` is not indexed")]
    NotIndexed {
        /// Field name.
        field: &'static str,
        /// Record type name.
        record: &'static str,
    },

    /// The index registered for a field holds a different selector type.
    #[error("index for field `{field}` has the wrong type")]
    TypeMismatch {
        /// Field name.
        field: &'static str,
    },
}

/// Result type for index operations.
pub type IndexResult<T> = Result<T, IndexError>;
