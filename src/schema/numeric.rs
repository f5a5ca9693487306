//! Numeric schema validation.
//!
//! This module provides [`NumberSchema`] for validating numbers with
//! constraints like minimum/maximum value, integrality and sign.

use std::ops::RangeInclusive;

use crate::error::{Issue, IssueKind, ValidationError};
use crate::outcome::Outcome;
use crate::path::ValuePath;
use crate::value::Value;

use super::traits::SchemaLike;
use super::type_mismatch;

/// A constraint applied to numbers.
#[derive(Clone)]
enum NumberConstraint {
    Min {
        value: f64,
        inclusive: bool,
        message: Option<String>,
    },
    Max {
        value: f64,
        inclusive: bool,
        message: Option<String>,
    },
    Int {
        message: Option<String>,
    },
    Finite {
        message: Option<String>,
    },
}

/// A schema for validating numbers.
///
/// `NaN` is rejected as an `invalid_type` even though it is a number;
/// infinities are accepted unless [`finite`](NumberSchema::finite) or
/// [`int`](NumberSchema::int) is set.
///
/// # Example
///
/// ```rust
/// use tollgate::{Schema, SchemaLike};
///
/// let schema = Schema::number().int().range(0.0..=100.0);
///
/// assert_eq!(schema.parse(50).unwrap(), 50.0);
/// assert!(schema.safe_parse(-5).is_failure());
/// assert!(schema.safe_parse(1.5).is_failure());
/// assert!(schema.safe_parse(f64::NAN).is_failure());
/// ```
#[derive(Clone, Default)]
pub struct NumberSchema {
    constraints: Vec<NumberConstraint>,
    type_error_message: Option<String>,
}

impl NumberSchema {
    /// Creates a new number schema with no constraints.
    pub fn new() -> Self {
        Default::default()
    }

    fn bound(mut self, constraint: NumberConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Requires `n >= value`.
    pub fn min(self, value: f64) -> Self {
        self.bound(NumberConstraint::Min {
            value,
            inclusive: true,
            message: None,
        })
    }

    /// Requires `n <= value`.
    pub fn max(self, value: f64) -> Self {
        self.bound(NumberConstraint::Max {
            value,
            inclusive: true,
            message: None,
        })
    }

    /// Requires `n > value`.
    pub fn gt(self, value: f64) -> Self {
        self.bound(NumberConstraint::Min {
            value,
            inclusive: false,
            message: None,
        })
    }

    /// Requires `n < value`.
    pub fn lt(self, value: f64) -> Self {
        self.bound(NumberConstraint::Max {
            value,
            inclusive: false,
            message: None,
        })
    }

    /// Equivalent to `.min(start).max(end)`.
    pub fn range(self, range: RangeInclusive<f64>) -> Self {
        let (start, end) = range.into_inner();
        self.min(start).max(end)
    }

    pub fn positive(self) -> Self {
        self.gt(0.0)
    }

    pub fn non_negative(self) -> Self {
        self.min(0.0)
    }

    pub fn negative(self) -> Self {
        self.lt(0.0)
    }

    /// Requires an integral, finite number.
    pub fn int(self) -> Self {
        self.bound(NumberConstraint::Int { message: None })
    }

    /// Rejects infinities.
    pub fn finite(self) -> Self {
        self.bound(NumberConstraint::Finite { message: None })
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the type error message.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        let message = Some(message.into());
        match self.constraints.last_mut() {
            Some(NumberConstraint::Min { message: m, .. })
            | Some(NumberConstraint::Max { message: m, .. })
            | Some(NumberConstraint::Int { message: m })
            | Some(NumberConstraint::Finite { message: m }) => *m = message,
            None => self.type_error_message = message,
        }
        self
    }
}

impl SchemaLike for NumberSchema {
    type Output = f64;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<f64> {
        let n = match value {
            Value::Number(n) if !n.is_nan() => n,
            other => {
                return type_mismatch(
                    path,
                    IssueKind::InvalidType,
                    "number",
                    &other,
                    self.type_error_message.as_deref(),
                )
            }
        };

        match self
            .constraints
            .iter()
            .find_map(|c| check_constraint(c, n, path))
        {
            Some(issue) => Outcome::failure(ValidationError::single(issue)),
            None => Outcome::success(n),
        }
    }

    fn into_value(output: f64) -> Value {
        Value::Number(output)
    }
}

fn check_constraint(constraint: &NumberConstraint, n: f64, path: &ValuePath) -> Option<Issue> {
    let (code, message, default) = match constraint {
        NumberConstraint::Min {
            value,
            inclusive,
            message,
        } => {
            let ok = if *inclusive { n >= *value } else { n > *value };
            if ok {
                return None;
            }
            let relation = if *inclusive {
                "greater than or equal to"
            } else {
                "greater than"
            };
            (
                IssueKind::TooSmall,
                message,
                format!("number must be {} {}, got {}", relation, value, n),
            )
        }
        NumberConstraint::Max {
            value,
            inclusive,
            message,
        } => {
            let ok = if *inclusive { n <= *value } else { n < *value };
            if ok {
                return None;
            }
            let relation = if *inclusive {
                "less than or equal to"
            } else {
                "less than"
            };
            (
                IssueKind::TooBig,
                message,
                format!("number must be {} {}, got {}", relation, value, n),
            )
        }
        NumberConstraint::Int { message } => {
            if n.is_finite() && n.fract() == 0.0 {
                return None;
            }
            (
                IssueKind::InvalidType,
                message,
                format!("expected integer, received {}", n),
            )
        }
        NumberConstraint::Finite { message } => {
            if n.is_finite() {
                return None;
            }
            (
                IssueKind::InvalidType,
                message,
                "expected finite number, received infinity".to_string(),
            )
        }
    };

    Some(Issue::new(
        path.clone(),
        code,
        message.clone().unwrap_or(default),
    ))
}
