//! Error types for validation failures.
//!
//! This module provides the issue model, the [`ValidationError`] aggregate
//! and the errors raised by the parse entry points.

mod issue;
mod parse_error;
mod validation_error;

pub use issue::{Issue, IssueKind};
pub use parse_error::{AsyncParseError, BoxError, ParseError};
pub use validation_error::ValidationError;
