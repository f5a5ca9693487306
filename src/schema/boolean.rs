//! Boolean schema validation.

use crate::error::IssueKind;
use crate::outcome::Outcome;
use crate::path::ValuePath;
use crate::value::Value;

use super::traits::SchemaLike;
use super::type_mismatch;

/// A schema accepting `true` and `false`.
#[derive(Clone, Default)]
pub struct BooleanSchema {
    type_error_message: Option<String>,
}

impl BooleanSchema {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets a custom error message for non-boolean values.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl SchemaLike for BooleanSchema {
    type Output = bool;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<bool> {
        match value {
            Value::Bool(b) => Outcome::success(b),
            other => type_mismatch(
                path,
                IssueKind::InvalidType,
                "boolean",
                &other,
                self.type_error_message.as_deref(),
            ),
        }
    }

    fn into_value(output: bool) -> Value {
        Value::Bool(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean() {
        let schema = BooleanSchema::new();
        assert!(schema.parse(true).unwrap());
        assert!(!schema.parse(false).unwrap());

        let errors = schema.safe_parse("true").into_result().unwrap_err();
        assert_eq!(errors.first().unwrap().message, "expected boolean, received string");
    }
}
