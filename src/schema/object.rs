//! Object schema validation.
//!
//! This module provides [`ObjectSchema`] for validating keyed values against
//! a declared shape, with a choice of how keys outside that shape are handled.

use std::sync::Arc;

use indexmap::IndexMap;
use stillwater::Validation;

use crate::error::{Issue, IssueKind, ValidationError};
use crate::outcome::{join, Outcome, ValidationResult};
use crate::path::ValuePath;
use crate::value::Value;

use super::modifiers::OptionalSchema;
use super::traits::{DynSchema, SchemaLike, ValueValidator};
use super::type_mismatch;

/// How to handle input keys not declared in the shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    /// Drop them from the output.
    #[default]
    Strip,
    /// Report each one as an `unrecognized_keys` issue.
    Strict,
    /// Copy them into the output without validation.
    Passthrough,
}

/// A schema for validating objects.
///
/// Every declared field is validated at `path.field`, and failures from all
/// fields are accumulated. A key missing from the input is validated as
/// [`Value::Undefined`], so only fields wrapped with `optional()` (or given a
/// default) may be absent. Fields whose validated output is `Undefined` are
/// left out of the result.
///
/// # Example
///
/// ```rust
/// use tollgate::{Schema, SchemaLike, Value};
/// use serde_json::json;
///
/// let schema = Schema::object()
///     .field("name", Schema::string().min_len(1))
///     .field("age", Schema::number().int().positive())
///     .field("email", Schema::string().email().optional());
///
/// let user = schema.parse(json!({"name": "Alice", "age": 30})).unwrap();
/// assert_eq!(user["name"], Value::from("Alice"));
/// assert!(!user.contains_key("email"));
///
/// let errors = schema.safe_parse(json!({"name": "", "age": -1})).into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct ObjectSchema {
    fields: IndexMap<String, Arc<dyn ValueValidator>>,
    unknown_keys: UnknownKeys,
    type_error_message: Option<String>,
}

impl ObjectSchema {
    /// Creates a new object schema with no fields.
    pub fn new() -> Self {
        Default::default()
    }

    /// Declares a field. Redeclaring a name replaces its schema in place.
    pub fn field<S>(mut self, name: impl Into<String>, schema: S) -> Self
    where
        S: SchemaLike,
    {
        self.fields.insert(name.into(), Arc::new(schema));
        self
    }

    /// Adds every field of `other`; fields `other` shares with `self` take
    /// the schema from `other`. The unknown-key mode of `self` is kept.
    pub fn extend(mut self, other: ObjectSchema) -> Self {
        self.fields.extend(other.fields);
        self
    }

    /// Keeps only the named fields.
    pub fn pick<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let keep: Vec<K> = keys.into_iter().collect();
        self.fields
            .retain(|name, _| keep.iter().any(|k| k.as_ref() == name.as_str()));
        self
    }

    /// Removes the named fields.
    pub fn omit<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            self.fields.shift_remove(key.as_ref());
        }
        self
    }

    /// Returns the declared field names in declaration order.
    pub fn keys(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Reports unknown keys as issues.
    pub fn strict(self) -> Self {
        self.unknown_keys(UnknownKeys::Strict)
    }

    /// Copies unknown keys into the output.
    pub fn passthrough(self) -> Self {
        self.unknown_keys(UnknownKeys::Passthrough)
    }

    /// Drops unknown keys from the output (the default).
    pub fn strip(self) -> Self {
        self.unknown_keys(UnknownKeys::Strip)
    }

    pub fn unknown_keys(mut self, mode: UnknownKeys) -> Self {
        self.unknown_keys = mode;
        self
    }

    /// Makes every declared field accept absence.
    ///
    /// Fields only gain acceptance of `Undefined`; a field that rejects
    /// `Null` still does.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tollgate::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let patch = Schema::object()
    ///     .field("name", Schema::string())
    ///     .field("age", Schema::number())
    ///     .partial();
    ///
    /// assert!(patch.safe_parse(json!({})).is_success());
    /// assert!(patch.safe_parse(json!({"age": "old"})).is_failure());
    /// ```
    pub fn partial(mut self) -> Self {
        self.fields = self
            .fields
            .into_iter()
            .map(|(name, schema)| {
                let optional: Arc<dyn ValueValidator> =
                    Arc::new(OptionalSchema::new(DynSchema::new(schema)));
                (name, optional)
            })
            .collect();
        self
    }

    /// Sets a custom error message for non-object values.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.type_error_message = Some(message.into());
        self
    }
}

impl SchemaLike for ObjectSchema {
    type Output = IndexMap<String, Value>;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<Self::Output> {
        let mut input = match value {
            Value::Object(map) => map,
            other => {
                return type_mismatch(
                    path,
                    IssueKind::InvalidObject,
                    "object",
                    &other,
                    self.type_error_message.as_deref(),
                )
            }
        };

        let mut names = Vec::with_capacity(self.fields.len());
        let mut outcomes = Vec::with_capacity(self.fields.len());
        for (name, schema) in &self.fields {
            let field_value = input.shift_remove(name).unwrap_or_default();
            outcomes.push(schema.validate_value(field_value, &path.push_field(name)));
            names.push(name.clone());
        }

        // `input` now holds only the undeclared keys.
        let mut unknown_errors = ValidationError::new();
        let extra = match self.unknown_keys {
            UnknownKeys::Strip => IndexMap::new(),
            UnknownKeys::Passthrough => input,
            UnknownKeys::Strict => {
                for key in input.keys() {
                    unknown_errors.push(Issue::new(
                        path.push_field(key),
                        IssueKind::UnrecognizedKeys,
                        format!("unrecognized key '{}'", key),
                    ));
                }
                IndexMap::new()
            }
        };

        join(outcomes).map(move |results| assemble(names, results, unknown_errors, extra))
    }

    fn into_value(output: Self::Output) -> Value {
        Value::Object(output)
    }
}

/// Builds the output map in declaration order; succeeds only with zero issues.
fn assemble(
    names: Vec<String>,
    results: Vec<ValidationResult<Value>>,
    unknown_errors: ValidationError,
    extra: IndexMap<String, Value>,
) -> ValidationResult<IndexMap<String, Value>> {
    let mut errors = ValidationError::new();
    let mut output = IndexMap::with_capacity(names.len() + extra.len());

    for (name, result) in names.into_iter().zip(results) {
        match result {
            Validation::Success(Value::Undefined) => {}
            Validation::Success(value) => {
                output.insert(name, value);
            }
            Validation::Failure(field_errors) => errors.merge(field_errors),
        }
    }
    errors.merge(unknown_errors);

    if errors.has_issues() {
        return Validation::Failure(errors);
    }
    output.extend(extra);
    Validation::Success(output)
}
