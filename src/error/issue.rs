//! A single validation issue.

use std::fmt::{self, Display};

use crate::path::ValuePath;

/// The closed set of issue categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// The value has the wrong primitive type.
    InvalidType,
    /// A length or numeric lower bound was violated.
    TooSmall,
    /// A length or numeric upper bound was violated.
    TooBig,
    /// A string failed a format check (pattern, email, prefix, suffix).
    InvalidString,
    /// A string is not one of the allowed enum literals.
    InvalidEnum,
    /// The value is not an array.
    InvalidArray,
    /// The value is not an object.
    InvalidObject,
    /// A strict object received a key it does not declare.
    UnrecognizedKeys,
    /// A refinement, transform, default supplier or foreign error failed.
    Custom,
}

impl IssueKind {
    /// Returns the machine-readable code.
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::InvalidType => "invalid_type",
            IssueKind::TooSmall => "too_small",
            IssueKind::TooBig => "too_big",
            IssueKind::InvalidString => "invalid_string",
            IssueKind::InvalidEnum => "invalid_enum",
            IssueKind::InvalidArray => "invalid_array",
            IssueKind::InvalidObject => "invalid_object",
            IssueKind::UnrecognizedKeys => "unrecognized_keys",
            IssueKind::Custom => "custom",
        }
    }
}

impl Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported validation failure.
///
/// # Example
///
/// ```rust
/// use tollgate::{Issue, IssueKind, ValuePath};
///
/// let issue = Issue::new(
///     ValuePath::root().push_field("email"),
///     IssueKind::InvalidString,
///     "invalid email",
/// );
///
/// assert_eq!(issue.to_string(), "email: invalid email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Where the failing value sits.
    pub path: ValuePath,
    /// The issue category.
    pub code: IssueKind,
    /// Human-readable description.
    pub message: String,
}

impl Issue {
    pub fn new(path: ValuePath, code: IssueKind, message: impl Into<String>) -> Self {
        Self {
            path,
            code,
            message: message.into(),
        }
    }

    /// Builds an `invalid_type` issue from the expected and received type names.
    pub fn invalid_type(path: ValuePath, expected: &str, received: &str) -> Self {
        Self::new(
            path,
            IssueKind::InvalidType,
            format!("expected {}, received {}", expected, received),
        )
    }

    /// Builds a `custom` issue.
    pub fn custom(path: ValuePath, message: impl Into<String>) -> Self {
        Self::new(path, IssueKind::Custom, message)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "path": self.path.to_json(),
            "code": self.code.as_str(),
            "message": self.message,
        })
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_root() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}
