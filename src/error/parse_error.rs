//! Errors raised by the parse entry points.

use crate::error::ValidationError;

/// Boxed error accepted from user-supplied transforms and default suppliers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Raised when the synchronous entry point meets a pending validation.
///
/// This is a usage error, not a validation failure: some schema in the
/// tree carries an asynchronous check and must be run with `parse_async`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("asynchronous validation encountered during synchronous parse; use parse_async")]
pub struct AsyncParseError;

/// Failure of [`SchemaLike::parse`](crate::SchemaLike::parse).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The input does not conform to the schema.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The schema must be run asynchronously.
    #[error(transparent)]
    Async(#[from] AsyncParseError),
}

impl ParseError {
    /// Returns the aggregate when this is a validation failure.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            ParseError::Invalid(errors) => Some(errors),
            ParseError::Async(_) => None,
        }
    }

    pub fn is_async(&self) -> bool {
        matches!(self, ParseError::Async(_))
    }
}
