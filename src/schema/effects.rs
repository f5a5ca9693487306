//! Post-validation steps: refinements and transforms.
//!
//! Both wrap an inner schema and run only after it succeeds. When the inner
//! validation is pending, the step is scheduled after it resolves.

use std::sync::Arc;

use stillwater::Validation;

use crate::error::{BoxError, ValidationError};
use crate::outcome::{MaybeAsync, Outcome};
use crate::path::ValuePath;
use crate::value::Value;

use super::traits::SchemaLike;

const DEFAULT_REFINE_MESSAGE: &str = "Invalid value";

pub(crate) type Check<T> = Arc<dyn Fn(&T) -> MaybeAsync<bool> + Send + Sync>;

pub(crate) type TransformFn<T, U> =
    Arc<dyn Fn(T) -> MaybeAsync<Result<U, BoxError>> + Send + Sync>;

/// Applies a predicate to the validated value.
///
/// A failing predicate raises one `custom` issue at the current path; a
/// passing one returns the validated value unchanged.
pub struct RefineSchema<S: SchemaLike> {
    inner: Arc<S>,
    check: Check<S::Output>,
    message: String,
}

impl<S: SchemaLike> RefineSchema<S> {
    pub(crate) fn new(inner: S, check: Check<S::Output>) -> Self {
        Self {
            inner: Arc::new(inner),
            check,
            message: DEFAULT_REFINE_MESSAGE.to_string(),
        }
    }

    /// Sets the message reported when the predicate fails.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl<S: SchemaLike> Clone for RefineSchema<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            check: Arc::clone(&self.check),
            message: self.message.clone(),
        }
    }
}

impl<S: SchemaLike> SchemaLike for RefineSchema<S> {
    type Output = S::Output;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<Self::Output> {
        let check = Arc::clone(&self.check);
        let message = self.message.clone();
        let path = path.clone();

        self.inner
            .validate(value, &path)
            .and_then_success(move |validated| {
                check(&validated).map(move |passed| {
                    if passed {
                        Validation::Success(validated)
                    } else {
                        Validation::Failure(ValidationError::custom(path, message))
                    }
                })
            })
    }

    fn into_value(output: Self::Output) -> Value {
        S::into_value(output)
    }
}

/// Maps the validated value into a new output.
///
/// Errors returned by the mapping function, synchronously or after a
/// pending computation, become one `custom` issue at the current path.
pub struct TransformSchema<S: SchemaLike, U> {
    inner: Arc<S>,
    f: TransformFn<S::Output, U>,
}

impl<S: SchemaLike, U> TransformSchema<S, U> {
    pub(crate) fn new(inner: S, f: TransformFn<S::Output, U>) -> Self {
        Self {
            inner: Arc::new(inner),
            f,
        }
    }
}

impl<S: SchemaLike, U> Clone for TransformSchema<S, U> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            f: Arc::clone(&self.f),
        }
    }
}

impl<S, U> SchemaLike for TransformSchema<S, U>
where
    S: SchemaLike,
    U: Into<Value> + Send + 'static,
{
    type Output = U;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<U> {
        let f = Arc::clone(&self.f);
        let path = path.clone();

        self.inner
            .validate(value, &path)
            .and_then_success(move |validated| {
                f(validated).map(move |mapped| match mapped {
                    Ok(output) => Validation::Success(output),
                    Err(err) => Validation::Failure(ValidationError::custom(path, err.to_string())),
                })
            })
    }

    fn into_value(output: U) -> Value {
        output.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IssueKind;
    use crate::schema::Schema;

    #[test]
    fn test_refine_default_message() {
        let schema = Schema::string().refine(|s| s.contains('@'));
        let errors = schema.safe_parse("nope").into_result().unwrap_err();

        assert_eq!(errors.len(), 1);
        let issue = errors.first().unwrap();
        assert_eq!(issue.code, IssueKind::Custom);
        assert_eq!(issue.message, "Invalid value");
        assert!(issue.path.is_root());
    }

    #[test]
    fn test_refine_runs_after_inner_success_only() {
        let schema = Schema::string().refine(|_| false).message("never");
        let errors = schema.safe_parse(5).into_result().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().unwrap().code, IssueKind::InvalidType);
    }

    #[test]
    fn test_transform_changes_output_type() {
        let schema = Schema::string().transform(|s| s.len() as f64);
        assert_eq!(schema.parse("four").unwrap(), 4.0);
    }

    #[test]
    fn test_try_transform_error_becomes_custom_issue() {
        let schema = Schema::string().try_transform(|s| s.parse::<i64>().map(|n| n as f64));
        let errors = schema.safe_parse("x").into_result().unwrap_err();

        let issue = errors.first().unwrap();
        assert_eq!(issue.code, IssueKind::Custom);
        assert_eq!(issue.message, "invalid digit found in string");
    }

    struct Flag;

    impl SchemaLike for Flag {
        type Output = bool;

        fn validate(&self, _value: Value, _path: &ValuePath) -> Outcome<bool> {
            Outcome::success(true)
        }

        fn into_value(output: bool) -> Value {
            Value::Bool(output)
        }
    }

    #[test]
    fn test_effects_clone_without_clone_inner() {
        let refined = Flag.refine(|flag| *flag);
        assert!(refined.clone().parse(Value::Null).unwrap());

        let mapped = Flag.transform(|flag| if flag { "on" } else { "off" }.to_string());
        assert_eq!(mapped.clone().parse(Value::Null).unwrap(), "on");
    }
}
