//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! constraints like minimum/maximum length, regex patterns and the fixed
//! email format.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Issue, IssueKind, ValidationError};
use crate::outcome::Outcome;
use crate::path::ValuePath;
use crate::value::Value;

use super::traits::SchemaLike;
use super::type_mismatch;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
    Email {
        message: Option<String>,
    },
    StartsWith {
        prefix: String,
        message: Option<String>,
    },
    EndsWith {
        suffix: String,
        message: Option<String>,
    },
}

/// A schema for validating string values.
///
/// Constraints are checked in the order they were added; the first one that
/// fails is reported as the single issue for the value.
///
/// # Example
///
/// ```rust
/// use tollgate::{Schema, SchemaLike};
///
/// let schema = Schema::string()
///     .min_len(3)
///     .max_len(20)
///     .pattern(r"^[a-z]+$")
///     .unwrap();
///
/// assert!(schema.safe_parse("alice").is_success());
/// assert!(schema.safe_parse("AB").is_failure());
/// ```
#[derive(Clone, Default)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
}

impl StringSchema {
    /// Creates a new string schema with no constraints.
    pub fn new() -> Self {
        Default::default()
    }

    /// Requires at least `min` characters (Unicode scalar values).
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` characters (Unicode scalar values).
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Requires exactly `len` characters.
    pub fn length(self, len: usize) -> Self {
        self.min_len(len).max_len(len)
    }

    /// Rejects the empty string.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Requires a match of the regex `pattern`.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for an invalid pattern.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tollgate::{Schema, SchemaLike};
    ///
    /// let digits = Schema::string().pattern(r"^\d+$").unwrap();
    ///
    /// assert!(digits.safe_parse("12345").is_success());
    /// assert!(digits.safe_parse("abc").is_failure());
    /// assert!(Schema::string().pattern(r"[").is_err());
    /// ```
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            message: None,
        });
        Ok(self)
    }

    /// Requires an email address.
    pub fn email(mut self) -> Self {
        self.constraints
            .push(StringConstraint::Email { message: None });
        self
    }

    pub fn starts_with(mut self, prefix: impl Into<String>) -> Self {
        self.constraints.push(StringConstraint::StartsWith {
            prefix: prefix.into(),
            message: None,
        });
        self
    }

    pub fn ends_with(mut self, suffix: impl Into<String>) -> Self {
        self.constraints.push(StringConstraint::EndsWith {
            suffix: suffix.into(),
            message: None,
        });
        self
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the type error message
    /// (used when the value is not a string).
    ///
    /// # Example
    ///
    /// ```rust
    /// use tollgate::{Schema, SchemaLike};
    ///
    /// let schema = Schema::string()
    ///     .min_len(5)
    ///     .error("username must be at least 5 characters");
    ///
    /// let errors = schema.safe_parse("hi").into_result().unwrap_err();
    /// assert_eq!(errors.first().unwrap().message, "username must be at least 5 characters");
    /// ```
    pub fn error(mut self, message: impl Into<String>) -> Self {
        let message = Some(message.into());
        match self.constraints.last_mut() {
            Some(StringConstraint::MinLength { message: m, .. })
            | Some(StringConstraint::MaxLength { message: m, .. })
            | Some(StringConstraint::Pattern { message: m, .. })
            | Some(StringConstraint::Email { message: m })
            | Some(StringConstraint::StartsWith { message: m, .. })
            | Some(StringConstraint::EndsWith { message: m, .. }) => *m = message,
            None => self.type_error_message = message,
        }
        self
    }
}

impl SchemaLike for StringSchema {
    type Output = String;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<String> {
        let s = match value {
            Value::String(s) => s,
            other => {
                return type_mismatch(
                    path,
                    IssueKind::InvalidType,
                    "string",
                    &other,
                    self.type_error_message.as_deref(),
                )
            }
        };

        match self
            .constraints
            .iter()
            .find_map(|c| check_constraint(c, &s, path))
        {
            Some(issue) => Outcome::failure(ValidationError::single(issue)),
            None => Outcome::success(s),
        }
    }

    fn into_value(output: String) -> Value {
        Value::String(output)
    }
}

/// Checks a single constraint and returns an issue if it fails.
fn check_constraint(constraint: &StringConstraint, value: &str, path: &ValuePath) -> Option<Issue> {
    let (code, message, default) = match constraint {
        StringConstraint::MinLength { min, message } => {
            let len = value.chars().count();
            if len >= *min {
                return None;
            }
            (
                IssueKind::TooSmall,
                message,
                format!("string must contain at least {} character(s), got {}", min, len),
            )
        }
        StringConstraint::MaxLength { max, message } => {
            let len = value.chars().count();
            if len <= *max {
                return None;
            }
            (
                IssueKind::TooBig,
                message,
                format!("string must contain at most {} character(s), got {}", max, len),
            )
        }
        StringConstraint::Pattern { regex, message } => {
            if regex.is_match(value) {
                return None;
            }
            (
                IssueKind::InvalidString,
                message,
                format!("string must match pattern '{}'", regex.as_str()),
            )
        }
        StringConstraint::Email { message } => {
            if email_regex().is_match(value) {
                return None;
            }
            (IssueKind::InvalidString, message, "invalid email".to_string())
        }
        StringConstraint::StartsWith { prefix, message } => {
            if value.starts_with(prefix.as_str()) {
                return None;
            }
            (
                IssueKind::InvalidString,
                message,
                format!("string must start with '{}'", prefix),
            )
        }
        StringConstraint::EndsWith { suffix, message } => {
            if value.ends_with(suffix.as_str()) {
                return None;
            }
            (
                IssueKind::InvalidString,
                message,
                format!("string must end with '{}'", suffix),
            )
        }
    };

    Some(Issue::new(
        path.clone(),
        code,
        message.clone().unwrap_or(default),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stillwater::Validation;

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_accepts_string() {
        assert_eq!(StringSchema::new().parse("hello").unwrap(), "hello");
    }

    #[test]
    fn test_rejects_non_string() {
        let errors = unwrap_failure(StringSchema::new().safe_parse(42));
        let issue = errors.first().unwrap();
        assert_eq!(issue.code, IssueKind::InvalidType);
        assert_eq!(issue.message, "expected string, received number");
    }

    #[test]
    fn test_first_failing_constraint_is_the_only_issue() {
        let schema = StringSchema::new()
            .min_len(5)
            .pattern(r"^[a-z]+$")
            .unwrap();

        let errors = unwrap_failure(schema.safe_parse("AB"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().unwrap().code, IssueKind::TooSmall);
    }

    #[test]
    fn test_unicode_length() {
        let schema = StringSchema::new().max_len(3);
        assert!(schema.safe_parse("日本語").is_success());
        assert!(schema.safe_parse("日本語!").is_failure());
    }

    #[test]
    fn test_email() {
        let schema = StringSchema::new().email();
        assert!(schema.safe_parse("ada@example.com").is_success());
        assert!(schema.safe_parse("first.last+tag@mail.example.org").is_success());

        for bad in ["ada", "ada@", "@example.com", "ada@example", "a b@example.com"] {
            let errors = unwrap_failure(schema.safe_parse(bad));
            assert_eq!(errors.first().unwrap().code, IssueKind::InvalidString, "{}", bad);
        }
    }

    #[test]
    fn test_prefix_and_suffix() {
        let schema = StringSchema::new().starts_with("sk_").ends_with("_live");
        assert!(schema.safe_parse("sk_123_live").is_success());
        assert_eq!(
            unwrap_failure(schema.safe_parse("pk_123_live")).first().unwrap().message,
            "string must start with 'sk_'"
        );
    }

    #[test]
    fn test_custom_type_error_message() {
        let schema = StringSchema::new().error("must be text");
        let errors = unwrap_failure(schema.safe_parse(true));
        assert_eq!(errors.first().unwrap().message, "must be text");
    }

    #[test]
    fn test_chaining_leaves_original_unchanged() {
        let base = StringSchema::new();
        let strict = base.clone().min_len(10);

        assert!(base.safe_parse("short").is_success());
        assert!(strict.safe_parse("short").is_failure());
    }
}
