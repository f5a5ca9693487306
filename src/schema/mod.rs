//! Schema definitions for validation.
//!
//! Primitive schemas (string, number, boolean, enum) check a single value and
//! report one issue on failure. Composite schemas (array, object, union)
//! validate their children at extended paths and merge every child failure
//! into one aggregate before reporting.
//!
//! # Example
//!
//! ```rust
//! use tollgate::{Schema, SchemaLike};
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .field("name", Schema::string().min_len(1))
//!     .field("tags", Schema::array(Schema::string()));
//!
//! assert!(schema.safe_parse(json!({"name": "Ada", "tags": ["math"]})).is_success());
//! ```

mod array;
mod boolean;
mod effects;
mod enumeration;
mod modifiers;
mod numeric;
mod object;
mod ref_schema;
mod string;
mod traits;
mod union;

pub use array::ArraySchema;
pub use boolean::BooleanSchema;
pub use effects::{RefineSchema, TransformSchema};
pub use enumeration::EnumSchema;
pub use modifiers::{DefaultSchema, Maybe, NullableSchema, NullishSchema, OptionalSchema};
pub use numeric::NumberSchema;
pub use object::{ObjectSchema, UnknownKeys};
pub use ref_schema::RefSchema;
pub(crate) use ref_schema::SchemaMap;
pub use string::StringSchema;
pub use traits::{DynSchema, SchemaLike, ValueValidator};
pub use union::UnionSchema;

use crate::error::{Issue, IssueKind, ValidationError};
use crate::outcome::Outcome;
use crate::path::ValuePath;
use crate::value::Value;

/// Builds the single-issue failure for a value of the wrong shape.
pub(crate) fn type_mismatch<T: Send + 'static>(
    path: &ValuePath,
    code: IssueKind,
    expected: &str,
    received: &Value,
    custom: Option<&str>,
) -> Outcome<T> {
    let message = match custom {
        Some(message) => message.to_string(),
        None => format!("expected {}, received {}", expected, received.type_name()),
    };
    Outcome::failure(ValidationError::single(Issue::new(path.clone(), code, message)))
}

/// Entry point for creating validation schemas.
///
/// Every constructor returns an immutable schema; builder methods consume the
/// schema and return a reconfigured copy.
///
/// # Example
///
/// ```rust
/// use tollgate::{Schema, SchemaLike};
///
/// let username = Schema::string().min_len(3).max_len(20);
/// let age = Schema::number().int().non_negative();
/// let role = Schema::enumeration(["admin", "user"]);
///
/// assert!(username.safe_parse("ada").is_success());
/// assert!(age.safe_parse(-1).is_failure());
/// assert!(role.safe_parse("user").is_success());
/// ```
pub struct Schema;

impl Schema {
    /// Creates a schema accepting strings.
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a schema accepting numbers other than `NaN`.
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }

    pub fn boolean() -> BooleanSchema {
        BooleanSchema::new()
    }

    /// Creates a schema accepting only the given string literals.
    pub fn enumeration<I, S>(options: I) -> EnumSchema
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnumSchema::new(options)
    }

    /// Creates a schema accepting arrays whose items all satisfy `item`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tollgate::{Schema, SchemaLike};
    /// use serde_json::json;
    ///
    /// let schema = Schema::array(Schema::number());
    ///
    /// let errors = schema.safe_parse(json!([1, "x", 3, "y"])).into_result().unwrap_err();
    /// assert_eq!(errors.len(), 2);
    /// ```
    pub fn array<S: SchemaLike>(item: S) -> ArraySchema<S> {
        ArraySchema::new(item)
    }

    /// Creates an object schema with no declared fields.
    ///
    /// Unknown keys are dropped from the output unless
    /// [`strict`](ObjectSchema::strict) or
    /// [`passthrough`](ObjectSchema::passthrough) is set.
    pub fn object() -> ObjectSchema {
        ObjectSchema::new()
    }

    /// Creates a union: the first candidate that accepts the value wins.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tollgate::{Schema, SchemaLike, Value};
    ///
    /// let id = Schema::union(vec![Box::new(Schema::string()), Box::new(Schema::number())]);
    ///
    /// assert_eq!(id.parse(5).unwrap(), Value::Number(5.0));
    /// assert_eq!(id.safe_parse(true).into_result().unwrap_err().len(), 2);
    /// ```
    pub fn union(candidates: Vec<Box<dyn ValueValidator>>) -> UnionSchema {
        UnionSchema::new(candidates)
    }
}
