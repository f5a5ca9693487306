//! Schema reference type for registry-based validation.
//!
//! This module provides [`RefSchema`], a named pointer into a
//! [`SchemaRegistry`](crate::SchemaRegistry). References are resolved when a
//! value is validated, so a schema may refer to itself or to schemas
//! registered later.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::error::ValidationError;
use crate::outcome::Outcome;
use crate::path::ValuePath;
use crate::value::Value;

use super::traits::{SchemaLike, ValueValidator};

pub(crate) type SchemaMap = RwLock<HashMap<String, Arc<dyn ValueValidator>>>;

/// A schema that validates with a named schema from a registry.
///
/// The reference holds a weak handle to the registry's storage, so it does
/// not keep the registry alive. Validation fails with a `custom` issue when
/// the name is not registered, when the registry has been dropped, or when
/// the chain of references followed to reach the value is longer than the
/// registry's maximum depth.
///
/// # Example
///
/// ```rust
/// use tollgate::{Schema, SchemaLike, SchemaRegistry};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry
///     .register(
///         "Node",
///         Schema::object()
///             .field("value", Schema::number())
///             .field("children", Schema::array(registry.reference("Node"))),
///     )
///     .unwrap();
///
/// let tree = json!({"value": 1, "children": [{"value": 2, "children": []}]});
/// assert!(registry.safe_parse("Node", tree).unwrap().is_success());
/// ```
#[derive(Clone)]
pub struct RefSchema {
    name: String,
    schemas: Weak<SchemaMap>,
    max_depth: usize,
}

impl RefSchema {
    pub(crate) fn new(name: impl Into<String>, schemas: Weak<SchemaMap>, max_depth: usize) -> Self {
        Self {
            name: name.into(),
            schemas,
            max_depth,
        }
    }

    /// Returns the name of the referenced schema.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self) -> Result<Arc<dyn ValueValidator>, String> {
        let schemas = self.schemas.upgrade().ok_or_else(|| {
            format!("reference to '{}' outlived its registry", self.name)
        })?;
        // The read guard is released before the resolved schema runs, so a
        // recursive reference never waits on its own lock.
        let resolved = schemas.read().get(&self.name).cloned();
        resolved.ok_or_else(|| format!("schema '{}' not found in registry", self.name))
    }
}

impl SchemaLike for RefSchema {
    type Output = Value;

    fn validate(&self, value: Value, path: &ValuePath) -> Outcome<Value> {
        // Hops are counted rather than segments: a cycle through a union or a
        // modifier resolves again at the same location.
        if path.reference_depth() >= self.max_depth {
            return Outcome::failure(ValidationError::custom(
                path.clone(),
                format!(
                    "maximum reference depth {} exceeded at path '{}'",
                    self.max_depth, path
                ),
            ));
        }

        match self.resolve() {
            Ok(schema) => schema.validate_value(value, &path.follow_reference()),
            Err(message) => Outcome::failure(ValidationError::custom(path.clone(), message)),
        }
    }

    fn into_value(output: Value) -> Value {
        output
    }
}
