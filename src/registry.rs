//! Schema registry for named schema storage and reference resolution.
//!
//! This module provides the [`SchemaRegistry`] type that stores named schemas
//! and hands out [`RefSchema`] references to them, which is how recursive
//! structures are described.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::RwLock;

use crate::outcome::ValidationResult;
use crate::schema::{DynSchema, RefSchema, SchemaLike, SchemaMap, ValueValidator};
use crate::value::Value;

const DEFAULT_MAX_DEPTH: usize = 100;

/// A thread-safe registry of named schemas.
///
/// Cloning a registry is cheap and yields a handle to the same storage.
/// Registration takes the write lock; validation only reads.
///
/// # Example
///
/// ```rust
/// use tollgate::{Schema, SchemaRegistry};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry.register("Email", Schema::string().email()).unwrap();
/// registry
///     .register(
///         "User",
///         Schema::object()
///             .field("name", Schema::string().min_len(1))
///             .field("email", registry.reference("Email")),
///     )
///     .unwrap();
///
/// let result = registry
///     .safe_parse("User", json!({"name": "Ada", "email": "ada@example.com"}))
///     .unwrap();
/// assert!(result.is_success());
/// ```
#[derive(Clone)]
pub struct SchemaRegistry {
    schemas: Arc<SchemaMap>,
    max_depth: usize,
}

impl SchemaRegistry {
    /// Creates an empty registry with a maximum depth of 100.
    pub fn new() -> Self {
        Self {
            schemas: Arc::new(RwLock::new(HashMap::new())),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets how many references may be followed in one chain before
    /// validation fails.
    ///
    /// Only references created after this call observe the new limit.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Registers a schema under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name is taken.
    pub fn register<S>(&self, name: impl Into<String>, schema: S) -> Result<(), RegistryError>
    where
        S: SchemaLike,
    {
        let name = name.into();
        let mut schemas = self.schemas.write();

        if schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        tracing::debug!(schema = %name, "registered schema");
        schemas.insert(name, Arc::new(schema));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ValueValidator>> {
        self.schemas.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.read().contains_key(name)
    }

    /// Returns the registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Creates a reference to `name`, which need not be registered yet.
    pub fn reference(&self, name: impl Into<String>) -> RefSchema {
        RefSchema::new(name, Arc::downgrade(&self.schemas), self.max_depth)
    }

    /// Validates `input` against the schema registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SchemaNotFound`] if nothing is registered
    /// under `name`. Validation failures are reported in the returned
    /// [`ValidationResult`].
    pub fn safe_parse(
        &self,
        name: &str,
        input: impl Into<Value>,
    ) -> Result<ValidationResult<Value>, RegistryError> {
        Ok(self.lookup(name)?.safe_parse(input))
    }

    /// Asynchronous form of [`safe_parse`](SchemaRegistry::safe_parse).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SchemaNotFound`] if nothing is registered
    /// under `name`.
    pub fn safe_parse_async(
        &self,
        name: &str,
        input: impl Into<Value>,
    ) -> Result<BoxFuture<'static, ValidationResult<Value>>, RegistryError> {
        Ok(self.lookup(name)?.safe_parse_async(input))
    }

    fn lookup(&self, name: &str) -> Result<DynSchema, RegistryError> {
        self.get(name)
            .map(DynSchema::new)
            .ok_or_else(|| RegistryError::SchemaNotFound(name.to_string()))
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a schema with a name that already exists.
    #[error("schema '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to validate with a schema name that doesn't exist.
    #[error("schema '{0}' not found")]
    SchemaNotFound(String),
}
