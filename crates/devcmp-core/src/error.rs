//! Error types for object validation

use crate::object::ListSide;
use thiserror::Error;

/// Result type for object validation
pub type ObjectResult<T> = Result<T, ObjectError>;

/// Errors raised when an object list cannot take part in a comparison
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ObjectError {
    /// Entry has no usable `name` key
    #[error("object at index {index} of list {side} has no name")]
    MissingName { side: ListSide, index: usize },

    /// Two entries of the same list share a name
    #[error(
        "list {side} contains '{name}' more than once (indices {first} and {duplicate})"
    )]
    DuplicateName {
        side: ListSide,
        name: String,
        first: usize,
        duplicate: usize,
    },

    /// JSON value is not an object
    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}
