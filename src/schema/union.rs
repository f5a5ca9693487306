//! Union schema validation: the first accepting candidate wins.

use std::sync::Arc;

use futures::future::{self, BoxFuture};
use stillwater::Validation;

use crate::error::ValidationError;
use crate::outcome::{MaybeAsync, Outcome};
use crate::path::ValuePath;
use crate::value::Value;

use super::traits::{SchemaLike, ValueValidator};

const EMPTY_UNION_MESSAGE: &str = "union has no candidate schemas";

/// A schema that accepts a value if any candidate does.
///
/// Candidates are tried in declaration order at the same path. The first one
/// that succeeds immediately is the result and later candidates are not run.
/// Candidates whose validation is pending are set aside while the scan goes
/// on; if none succeeds immediately, all of them are awaited and the first
/// successful one in declaration order wins. On failure, the issues of every
/// candidate are merged in declaration order.
///
/// # Example
///
/// ```rust
/// use tollgate::{Schema, SchemaLike, Value};
///
/// let id = Schema::union(vec![Box::new(Schema::string().min_len(1))])
///     .or(Schema::number().int());
///
/// assert_eq!(id.parse("abc").unwrap(), Value::from("abc"));
/// assert_eq!(id.parse(7).unwrap(), Value::from(7));
/// assert!(id.safe_parse(1.5).is_failure());
/// ```
#[derive(Clone)]
pub struct UnionSchema {
    candidates: Vec<Arc<dyn ValueValidator>>,
}

impl UnionSchema {
    pub fn new(candidates: Vec<Box<dyn ValueValidator>>) -> Self {
        Self {
            candidates: candidates.into_iter().map(Arc::from).collect(),
        }
    }

    /// Adds a candidate after the existing ones.
    pub fn or<S: SchemaLike>(mut self, schema: S) -> Self {
        self.candidates.push(Arc::new(schema));
        self
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl SchemaLike for UnionSchema {
    type Output = Value;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<Value> {
        if self.candidates.is_empty() {
            return Outcome::failure(ValidationError::custom(path.clone(), EMPTY_UNION_MESSAGE));
        }

        let mut errors = ValidationError::new();
        let mut deferred: Vec<BoxFuture<'static, _>> = Vec::new();

        for candidate in &self.candidates {
            match candidate.validate_value(value.clone(), path) {
                MaybeAsync::Ready(Validation::Success(out)) => return Outcome::success(out),
                MaybeAsync::Ready(Validation::Failure(candidate_errors)) => {
                    errors.merge(candidate_errors)
                }
                MaybeAsync::Pending(fut) => deferred.push(fut),
            }
        }

        if deferred.is_empty() {
            return Outcome::failure(errors);
        }

        tracing::trace!(deferred = deferred.len(), "union awaiting pending candidates");
        MaybeAsync::pending(async move {
            let settled = future::join_all(deferred).await;
            for result in settled {
                match result {
                    Validation::Success(out) => return Validation::Success(out),
                    Validation::Failure(candidate_errors) => errors.merge(candidate_errors),
                }
            }
            Validation::Failure(errors)
        })
    }

    fn into_value(output: Value) -> Value {
        output
    }
}
