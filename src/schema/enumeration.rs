//! Enum schema validation: a string drawn from a fixed set of literals.

use crate::error::{Issue, IssueKind, ValidationError};
use crate::outcome::Outcome;
use crate::path::ValuePath;
use crate::value::Value;

use super::traits::SchemaLike;

/// A schema accepting only strings contained in its allowed set.
///
/// # Example
///
/// ```rust
/// use tollgate::{Schema, SchemaLike};
///
/// let role = Schema::enumeration(["admin", "user"]);
///
/// assert_eq!(role.parse("admin").unwrap(), "admin");
///
/// let errors = role.safe_parse("root").into_result().unwrap_err();
/// assert_eq!(
///     errors.first().unwrap().message,
///     "invalid enum value, expected 'admin' | 'user', received 'root'"
/// );
/// ```
#[derive(Clone)]
pub struct EnumSchema {
    options: Vec<String>,
    message: Option<String>,
}

impl EnumSchema {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    /// Returns the allowed literals in declaration order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Sets a custom error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn expected(&self) -> String {
        self.options
            .iter()
            .map(|o| format!("'{}'", o))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl SchemaLike for EnumSchema {
    type Output = String;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<String> {
        let received = match value {
            Value::String(s) if self.options.contains(&s) => return Outcome::success(s),
            Value::String(s) => format!("'{}'", s),
            other => other.type_name().to_string(),
        };

        let message = self.message.clone().unwrap_or_else(|| {
            format!(
                "invalid enum value, expected {}, received {}",
                self.expected(),
                received
            )
        });
        Outcome::failure(ValidationError::single(Issue::new(
            path.clone(),
            IssueKind::InvalidEnum,
            message,
        )))
    }

    fn into_value(output: String) -> Value {
        Value::String(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_string_is_invalid_enum() {
        let schema = EnumSchema::new(["a", "b"]);
        let errors = schema.safe_parse(1).into_result().unwrap_err();
        let issue = errors.first().unwrap();

        assert_eq!(issue.code, IssueKind::InvalidEnum);
        assert_eq!(issue.message, "invalid enum value, expected 'a' | 'b', received number");
    }

    #[test]
    fn test_matching_is_exact() {
        let schema = EnumSchema::new(vec!["Red".to_string()]);
        assert!(schema.safe_parse("Red").is_success());
        assert!(schema.safe_parse("red").is_failure());
    }
}
