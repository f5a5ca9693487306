//! Array schema validation.
//!
//! This module provides [`ArraySchema`] for validating arrays against a
//! single item schema, with optional length constraints.

use stillwater::Validation;

use crate::error::{Issue, IssueKind, ValidationError};
use crate::outcome::{join, Outcome, ValidationResult};
use crate::path::ValuePath;
use crate::value::Value;

use super::traits::SchemaLike;
use super::type_mismatch;

/// A constraint applied to array values.
#[derive(Clone)]
enum ArrayConstraint {
    MinLength { min: usize, message: Option<String> },
    MaxLength { max: usize, message: Option<String> },
}

/// A schema for validating array values.
///
/// Every item is validated at its index, and failures from all items are
/// accumulated rather than stopping at the first one. Length violations are
/// reported ahead of the item issues. The validated array is returned only
/// when no issue was found.
///
/// # Example
///
/// ```rust
/// use tollgate::{Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = Schema::array(Schema::string().min_len(1))
///     .non_empty()
///     .max_len(10);
///
/// assert_eq!(schema.parse(json!(["a", "b"])).unwrap(), vec!["a", "b"]);
/// assert!(schema.safe_parse(json!([])).is_failure());
/// ```
#[derive(Clone)]
pub struct ArraySchema<S> {
    item: S,
    constraints: Vec<ArrayConstraint>,
    type_error_message: Option<String>,
}

impl<S: SchemaLike> ArraySchema<S> {
    /// Creates a new array schema with the given item schema.
    pub fn new(item: S) -> Self {
        Self {
            item,
            constraints: Vec::new(),
            type_error_message: None,
        }
    }

    /// Returns the item schema.
    pub fn item(&self) -> &S {
        &self.item
    }

    /// Requires at least `min` items.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::MinLength { min, message: None });
        self
    }

    /// Requires at most `max` items.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(ArrayConstraint::MaxLength { max, message: None });
        self
    }

    /// Equivalent to `.min_len(1)`.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the message used when
    /// the value is not an array.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        let message = Some(message.into());
        match self.constraints.last_mut() {
            Some(ArrayConstraint::MinLength { message: m, .. })
            | Some(ArrayConstraint::MaxLength { message: m, .. }) => *m = message,
            None => self.type_error_message = message,
        }
        self
    }

    fn check_length(&self, len: usize, path: &ValuePath, errors: &mut ValidationError) {
        for constraint in &self.constraints {
            let issue = match constraint {
                ArrayConstraint::MinLength { min, message } if len < *min => Issue::new(
                    path.clone(),
                    IssueKind::TooSmall,
                    message.clone().unwrap_or_else(|| {
                        format!("array must contain at least {} item(s), got {}", min, len)
                    }),
                ),
                ArrayConstraint::MaxLength { max, message } if len > *max => Issue::new(
                    path.clone(),
                    IssueKind::TooBig,
                    message.clone().unwrap_or_else(|| {
                        format!("array must contain at most {} item(s), got {}", max, len)
                    }),
                ),
                _ => continue,
            };
            errors.push(issue);
        }
    }
}

impl<S: SchemaLike> SchemaLike for ArraySchema<S> {
    type Output = Vec<S::Output>;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<Self::Output> {
        let items = match value {
            Value::Array(items) => items,
            other => {
                return type_mismatch(
                    path,
                    IssueKind::InvalidArray,
                    "array",
                    &other,
                    self.type_error_message.as_deref(),
                )
            }
        };

        let mut errors = ValidationError::new();
        self.check_length(items.len(), path, &mut errors);

        let outcomes: Vec<_> = items
            .into_iter()
            .enumerate()
            .map(|(i, item)| self.item.validate(item, &path.push_index(i)))
            .collect();

        join(outcomes).map(move |results| collect_items(results, errors))
    }

    fn into_value(output: Self::Output) -> Value {
        Value::Array(output.into_iter().map(S::into_value).collect())
    }
}

/// Merges item results in index order; succeeds only with zero issues.
fn collect_items<T>(
    results: Vec<ValidationResult<T>>,
    mut errors: ValidationError,
) -> ValidationResult<Vec<T>> {
    let mut validated = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Validation::Success(item) => validated.push(item),
            Validation::Failure(item_errors) => errors.merge(item_errors),
        }
    }

    if errors.has_issues() {
        Validation::Failure(errors)
    } else {
        Validation::Success(validated)
    }
}
