//! Immediate-or-deferred validation results.
//!
//! Every schema returns an [`Outcome`]: either a result that is available
//! right away, or a pending computation that resolves to one. Composite
//! schemas branch on which case each child produced and only switch to the
//! awaited path when at least one child is pending.

use std::future::Future;

use futures::future::{self, BoxFuture, FutureExt};
use stillwater::Validation;

use crate::error::ValidationError;

/// Result of validating a value: the typed value or the issue aggregate.
pub type ValidationResult<T> = Validation<T, ValidationError>;

/// A value that is either available now or produced by a future.
pub enum MaybeAsync<T> {
    /// Available synchronously.
    Ready(T),
    /// Resolves later on the same logical thread of control.
    Pending(BoxFuture<'static, T>),
}

/// The result of running a schema against one input.
pub type Outcome<T> = MaybeAsync<ValidationResult<T>>;

impl<T: Send + 'static> MaybeAsync<T> {
    /// Wraps a future as a pending value.
    pub fn pending<F>(fut: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        MaybeAsync::Pending(fut.boxed())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, MaybeAsync::Pending(_))
    }

    /// Applies `f` now when ready, or after resolution when pending.
    pub fn map<U, F>(self, f: F) -> MaybeAsync<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        match self {
            MaybeAsync::Ready(value) => MaybeAsync::Ready(f(value)),
            MaybeAsync::Pending(fut) => MaybeAsync::Pending(fut.map(f).boxed()),
        }
    }

    /// Chains a continuation that may itself be pending.
    ///
    /// When `self` is ready the continuation runs immediately, so a chain of
    /// ready steps never allocates a future.
    pub fn then<U, F>(self, f: F) -> MaybeAsync<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> MaybeAsync<U> + Send + 'static,
    {
        match self {
            MaybeAsync::Ready(value) => f(value),
            MaybeAsync::Pending(fut) => {
                MaybeAsync::pending(async move { f(fut.await).into_future().await })
            }
        }
    }

    /// Converts into a future, resolving immediately when ready.
    pub fn into_future(self) -> BoxFuture<'static, T> {
        match self {
            MaybeAsync::Ready(value) => future::ready(value).boxed(),
            MaybeAsync::Pending(fut) => fut,
        }
    }
}

impl<T: Send + 'static> From<T> for MaybeAsync<T> {
    fn from(value: T) -> Self {
        MaybeAsync::Ready(value)
    }
}

impl<T: Send + 'static> MaybeAsync<ValidationResult<T>> {
    pub fn success(value: T) -> Self {
        MaybeAsync::Ready(Validation::Success(value))
    }

    pub fn failure(errors: ValidationError) -> Self {
        MaybeAsync::Ready(Validation::Failure(errors))
    }

    /// Maps the validated value, leaving failures untouched.
    pub fn map_success<U, F>(self, f: F) -> Outcome<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.map(|result| match result {
            Validation::Success(value) => Validation::Success(f(value)),
            Validation::Failure(errors) => Validation::Failure(errors),
        })
    }

    /// Runs a further validation step on success.
    pub fn and_then_success<U, F>(self, f: F) -> Outcome<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Outcome<U> + Send + 'static,
    {
        self.then(|result| match result {
            Validation::Success(value) => f(value),
            Validation::Failure(errors) => Outcome::failure(errors),
        })
    }
}

/// Collects child outcomes in order.
///
/// Stays synchronous while every child is ready. The first pending child
/// switches the whole collection to the awaited path; children are already
/// initiated at that point, so only their settlement is awaited.
pub(crate) fn join<T: Send + 'static>(children: Vec<MaybeAsync<T>>) -> MaybeAsync<Vec<T>> {
    let mut ready = Vec::with_capacity(children.len());
    let mut rest = children.into_iter();

    while let Some(child) = rest.next() {
        match child {
            MaybeAsync::Ready(value) => ready.push(value),
            MaybeAsync::Pending(fut) => {
                tracing::trace!(settled = ready.len(), "switching to awaited aggregation");
                let futures: Vec<_> = ready
                    .into_iter()
                    .map(|value| future::ready(value).boxed())
                    .chain(std::iter::once(fut))
                    .chain(rest.map(MaybeAsync::into_future))
                    .collect();
                return MaybeAsync::pending(future::join_all(futures));
            }
        }
    }

    MaybeAsync::Ready(ready)
}
