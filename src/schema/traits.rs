//! Traits for schema polymorphism.
//!
//! This module provides the [`SchemaLike`] contract every schema implements,
//! the caller-facing parse entry points built on top of it, and the
//! type-erased [`ValueValidator`] used by composites to hold heterogeneous
//! children.

use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use stillwater::Validation;

use crate::error::{AsyncParseError, BoxError, ParseError, ValidationError};
use crate::outcome::{MaybeAsync, Outcome, ValidationResult};
use crate::path::ValuePath;
use crate::value::Value;

use super::effects::{RefineSchema, TransformSchema};
use super::modifiers::{DefaultSchema, NullableSchema, NullishSchema, OptionalSchema};

/// A schema: an immutable acceptance rule for untyped values.
///
/// Implementors provide [`validate`](SchemaLike::validate), the single
/// customization point, and [`into_value`](SchemaLike::into_value), which
/// erases the typed output back into a [`Value`] for composites. Everything
/// else is provided.
///
/// The `Send + Sync` bounds allow schemas to be shared across threads and
/// captured by pending validations.
///
/// # Example
///
/// ```rust
/// use tollgate::{Schema, SchemaLike};
///
/// let name = Schema::string().min_len(1);
///
/// assert_eq!(name.parse("Alice").unwrap(), "Alice");
/// assert!(name.safe_parse("").is_failure());
/// ```
pub trait SchemaLike: Send + Sync + 'static {
    /// The typed value produced by successful validation.
    type Output: Send + 'static;

    /// Validates `value` located at `path`.
    ///
    /// Returns an immediate result, or a pending one when some check in the
    /// schema tree is asynchronous.
    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<Self::Output>;

    /// Converts a validated output back into a [`Value`].
    fn into_value(output: Self::Output) -> Value
    where
        Self: Sized;

    /// Validates and erases the output type.
    fn validate_to_value(&self, value: Value, path: &ValuePath) -> Outcome<Value>
    where
        Self: Sized,
    {
        self.validate(value, path).map_success(Self::into_value)
    }

    /// Validates synchronously from the root path.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Invalid`] with every issue found, or
    /// [`ParseError::Async`] when the schema tree produced a pending
    /// validation; such schemas must be run with
    /// [`parse_async`](SchemaLike::parse_async).
    fn parse(&self, input: impl Into<Value>) -> Result<Self::Output, ParseError>
    where
        Self: Sized,
    {
        match self.validate(input.into(), &ValuePath::root()) {
            MaybeAsync::Ready(result) => result.into_result().map_err(ParseError::from),
            MaybeAsync::Pending(_) => {
                tracing::debug!("synchronous parse produced a pending validation");
                Err(AsyncParseError.into())
            }
        }
    }

    /// Validates from the root path, awaiting pending checks.
    ///
    /// Works for synchronous schemas too; their result is ready immediately.
    fn parse_async(
        &self,
        input: impl Into<Value>,
    ) -> BoxFuture<'static, Result<Self::Output, ValidationError>>
    where
        Self: Sized,
    {
        let outcome = self.validate(input.into(), &ValuePath::root());
        tracing::trace!(pending = outcome.is_pending(), "parse_async");
        outcome.into_future().map(Validation::into_result).boxed()
    }

    /// Non-failing form of [`parse`](SchemaLike::parse).
    ///
    /// The async misuse signal is reported as one `custom` issue at the root.
    fn safe_parse(&self, input: impl Into<Value>) -> ValidationResult<Self::Output>
    where
        Self: Sized,
    {
        match self.parse(input) {
            Ok(value) => Validation::Success(value),
            Err(ParseError::Invalid(errors)) => Validation::Failure(errors),
            Err(ParseError::Async(misuse)) => {
                Validation::Failure(ValidationError::custom(ValuePath::root(), misuse.to_string()))
            }
        }
    }

    /// Non-failing form of [`parse_async`](SchemaLike::parse_async).
    fn safe_parse_async(
        &self,
        input: impl Into<Value>,
    ) -> BoxFuture<'static, ValidationResult<Self::Output>>
    where
        Self: Sized,
    {
        self.parse_async(input)
            .map(|result| match result {
                Ok(value) => Validation::Success(value),
                Err(errors) => Validation::Failure(errors),
            })
            .boxed()
    }

    /// Accepts `Undefined` in addition to what this schema accepts.
    fn optional(self) -> OptionalSchema<Self>
    where
        Self: Sized,
    {
        OptionalSchema::new(self)
    }

    /// Accepts `Null` in addition to what this schema accepts.
    fn nullable(self) -> NullableSchema<Self>
    where
        Self: Sized,
    {
        NullableSchema::new(self)
    }

    /// Accepts both `Null` and `Undefined`.
    fn nullish(self) -> NullishSchema<Self>
    where
        Self: Sized,
    {
        NullishSchema::new(self)
    }

    /// Validates `value` instead of an `Undefined` input.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tollgate::{Schema, SchemaLike, Value};
    ///
    /// let role = Schema::string().default("user");
    /// assert_eq!(role.parse(Value::Undefined).unwrap(), "user");
    /// assert_eq!(role.parse("admin").unwrap(), "admin");
    /// ```
    fn default(self, value: impl Into<Value>) -> DefaultSchema<Self>
    where
        Self: Sized,
    {
        let value = value.into();
        DefaultSchema::new(
            self,
            Arc::new(move || MaybeAsync::Ready(Ok::<_, BoxError>(value.clone()))),
        )
    }

    /// Like [`default`](SchemaLike::default), invoking `supplier` on each use.
    fn default_with<F>(self, supplier: F) -> DefaultSchema<Self>
    where
        Self: Sized,
        F: Fn() -> Value + Send + Sync + 'static,
    {
        DefaultSchema::new(
            self,
            Arc::new(move || MaybeAsync::Ready(Ok::<_, BoxError>(supplier()))),
        )
    }

    /// Like [`default_with`](SchemaLike::default_with) with an asynchronous,
    /// fallible supplier. A supplier error becomes a `custom` issue.
    fn default_async<F, Fut>(self, supplier: F) -> DefaultSchema<Self>
    where
        Self: Sized,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, BoxError>> + Send + 'static,
    {
        DefaultSchema::new(self, Arc::new(move || MaybeAsync::pending(supplier())))
    }

    /// Adds a predicate on the validated value.
    ///
    /// A `false` result is reported as one `custom` issue at the current
    /// path; set its message with [`RefineSchema::message`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use tollgate::{Schema, SchemaLike};
    ///
    /// let even = Schema::number().refine(|n| n % 2.0 == 0.0).message("must be even");
    ///
    /// assert!(even.safe_parse(4).is_success());
    /// assert!(even.safe_parse(3).is_failure());
    /// ```
    fn refine<F>(self, predicate: F) -> RefineSchema<Self>
    where
        Self: Sized,
        F: Fn(&Self::Output) -> bool + Send + Sync + 'static,
    {
        RefineSchema::new(
            self,
            Arc::new(move |value: &Self::Output| MaybeAsync::Ready(predicate(value))),
        )
    }

    /// Adds an asynchronous predicate on the validated value.
    fn refine_async<F, Fut>(self, predicate: F) -> RefineSchema<Self>
    where
        Self: Sized,
        F: Fn(&Self::Output) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        RefineSchema::new(
            self,
            Arc::new(move |value: &Self::Output| MaybeAsync::pending(predicate(value))),
        )
    }

    /// Maps the validated value into a new output.
    fn transform<U, F>(self, f: F) -> TransformSchema<Self, U>
    where
        Self: Sized,
        U: Into<Value> + Send + 'static,
        F: Fn(Self::Output) -> U + Send + Sync + 'static,
    {
        TransformSchema::new(
            self,
            Arc::new(move |value: Self::Output| MaybeAsync::Ready(Ok::<U, BoxError>(f(value)))),
        )
    }

    /// Maps the validated value with a fallible function.
    ///
    /// An error is reported as one `custom` issue at the current path.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tollgate::{Schema, SchemaLike};
    ///
    /// let port = Schema::string().try_transform(|s| s.parse::<u16>().map(f64::from));
    ///
    /// assert_eq!(port.parse("8080").unwrap(), 8080.0);
    /// assert!(port.safe_parse("http").is_failure());
    /// ```
    fn try_transform<U, E, F>(self, f: F) -> TransformSchema<Self, U>
    where
        Self: Sized,
        U: Into<Value> + Send + 'static,
        E: Into<BoxError>,
        F: Fn(Self::Output) -> Result<U, E> + Send + Sync + 'static,
    {
        TransformSchema::new(
            self,
            Arc::new(move |value: Self::Output| {
                MaybeAsync::Ready(f(value).map_err(Into::<BoxError>::into))
            }),
        )
    }

    /// Maps the validated value with an asynchronous, fallible function.
    fn transform_async<U, F, Fut>(self, f: F) -> TransformSchema<Self, U>
    where
        Self: Sized,
        U: Into<Value> + Send + 'static,
        F: Fn(Self::Output) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<U, BoxError>> + Send + 'static,
    {
        TransformSchema::new(
            self,
            Arc::new(move |value: Self::Output| MaybeAsync::pending(f(value))),
        )
    }
}

/// A type-erased schema producing [`Value`] outputs.
///
/// Composites store their children as `Arc<dyn ValueValidator>` so that
/// schemas with different output types can sit side by side. Every
/// [`SchemaLike`] is a `ValueValidator`.
///
/// # Example
///
/// ```rust
/// use tollgate::{Schema, ValueValidator};
///
/// let candidates: Vec<Box<dyn ValueValidator>> = vec![
///     Box::new(Schema::string().min_len(1)),
///     Box::new(Schema::number().int()),
/// ];
/// ```
pub trait ValueValidator: Send + Sync {
    /// Validates a value and returns the output as a [`Value`].
    fn validate_value(&self, value: Value, path: &ValuePath) -> Outcome<Value>;
}

impl<S: SchemaLike> ValueValidator for S {
    fn validate_value(&self, value: Value, path: &ValuePath) -> Outcome<Value> {
        self.validate_to_value(value, path)
    }
}

/// Adapts a shared, type-erased schema back into a [`SchemaLike`].
#[derive(Clone)]
pub struct DynSchema(Arc<dyn ValueValidator>);

impl DynSchema {
    pub fn new(schema: Arc<dyn ValueValidator>) -> Self {
        Self(schema)
    }
}

impl SchemaLike for DynSchema {
    type Output = Value;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<Value> {
        self.0.validate_value(value, path)
    }

    fn into_value(output: Value) -> Value {
        output
    }
}
