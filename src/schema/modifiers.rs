//! Modifier schemas widening what an inner schema accepts.
//!
//! Each modifier owns exactly one inner schema and never re-implements its
//! traversal: it either short-circuits on the value it adds (`Undefined`,
//! `Null`) or substitutes a default, then delegates. Pendingness of the
//! inner validation passes straight through.

use std::sync::Arc;

use crate::error::{BoxError, ValidationError};
use crate::outcome::{MaybeAsync, Outcome};
use crate::path::ValuePath;
use crate::value::Value;

use super::traits::SchemaLike;

/// Output of a [`NullishSchema`]: which absent form was received, or the
/// validated value.
#[derive(Debug, Clone, PartialEq)]
pub enum Maybe<T> {
    Undefined,
    Null,
    Some(T),
}

impl<T> Maybe<T> {
    /// Collapses both absent forms into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Maybe::Some(value) => Some(value),
            Maybe::Undefined | Maybe::Null => None,
        }
    }
}

/// Accepts `Undefined`, otherwise delegates.
///
/// # Example
///
/// ```rust
/// use tollgate::{Schema, SchemaLike, Value};
///
/// let nickname = Schema::string().optional();
///
/// assert_eq!(nickname.parse(Value::Undefined).unwrap(), None);
/// assert_eq!(nickname.parse("Al").unwrap(), Some("Al".to_string()));
/// assert!(nickname.safe_parse(Value::Null).is_failure());
/// ```
pub struct OptionalSchema<S> {
    inner: Arc<S>,
}

impl<S> OptionalSchema<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S> Clone for OptionalSchema<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SchemaLike> SchemaLike for OptionalSchema<S> {
    type Output = Option<S::Output>;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<Self::Output> {
        if value.is_undefined() {
            return Outcome::success(None);
        }
        self.inner.validate(value, path).map_success(Some)
    }

    fn into_value(output: Self::Output) -> Value {
        output.map(S::into_value).unwrap_or(Value::Undefined)
    }
}

/// Accepts `Null`, otherwise delegates.
pub struct NullableSchema<S> {
    inner: Arc<S>,
}

impl<S> NullableSchema<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S> Clone for NullableSchema<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SchemaLike> SchemaLike for NullableSchema<S> {
    type Output = Option<S::Output>;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<Self::Output> {
        if value.is_null() {
            return Outcome::success(None);
        }
        self.inner.validate(value, path).map_success(Some)
    }

    fn into_value(output: Self::Output) -> Value {
        output.map(S::into_value).unwrap_or(Value::Null)
    }
}

/// Accepts both `Null` and `Undefined`, otherwise delegates.
pub struct NullishSchema<S> {
    inner: Arc<S>,
}

impl<S> NullishSchema<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S> Clone for NullishSchema<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SchemaLike> SchemaLike for NullishSchema<S> {
    type Output = Maybe<S::Output>;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<Self::Output> {
        match value {
            Value::Undefined => Outcome::success(Maybe::Undefined),
            Value::Null => Outcome::success(Maybe::Null),
            other => self.inner.validate(other, path).map_success(Maybe::Some),
        }
    }

    fn into_value(output: Self::Output) -> Value {
        match output {
            Maybe::Undefined => Value::Undefined,
            Maybe::Null => Value::Null,
            Maybe::Some(value) => S::into_value(value),
        }
    }
}

/// Produces the value substituted for an `Undefined` input.
pub(crate) type DefaultSupplier =
    Arc<dyn Fn() -> MaybeAsync<Result<Value, BoxError>> + Send + Sync>;

/// Substitutes a default for `Undefined` and validates it with the inner
/// schema; any other input is validated directly.
///
/// The default may come from a fixed value, a supplier invoked on each use,
/// or an asynchronous supplier, in which case the result is pending.
pub struct DefaultSchema<S> {
    inner: Arc<S>,
    supplier: DefaultSupplier,
}

impl<S> DefaultSchema<S> {
    pub(crate) fn new(inner: S, supplier: DefaultSupplier) -> Self {
        Self {
            inner: Arc::new(inner),
            supplier,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S> Clone for DefaultSchema<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            supplier: Arc::clone(&self.supplier),
        }
    }
}

impl<S: SchemaLike> SchemaLike for DefaultSchema<S> {
    type Output = S::Output;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<Self::Output> {
        if !value.is_undefined() {
            return self.inner.validate(value, path);
        }

        let inner = Arc::clone(&self.inner);
        let path = path.clone();
        (self.supplier)().then(move |resolved| match resolved {
            Ok(default) => inner.validate(default, &path),
            Err(err) => Outcome::failure(ValidationError::custom(
                path,
                format!("default value could not be produced: {}", err),
            )),
        })
    }

    fn into_value(output: Self::Output) -> Value {
        S::into_value(output)
    }
}
