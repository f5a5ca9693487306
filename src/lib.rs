//! # Tollgate
//!
//! A composable runtime validator for untyped data. A schema either turns an
//! input [`Value`] into a typed output or reports every problem it found,
//! each addressed by the path of the offending value.
//!
//! ## Overview
//!
//! Schemas are immutable and built with chained methods. Composite schemas
//! (arrays, objects, unions) keep validating after a child fails and merge
//! all child issues into one [`ValidationError`], using stillwater's
//! `Validation` type for the accumulation.
//!
//! Checks may be asynchronous (`refine_async`, `transform_async`,
//! `default_async`). Every schema returns an [`Outcome`] that is either
//! ready or pending, and composites only switch to awaiting when one of
//! their children is pending. Synchronous schemas therefore never touch an
//! executor; [`SchemaLike::parse`] reports [`ParseError::Async`] if it meets
//! a pending validation, and [`SchemaLike::parse_async`] handles both.
//!
//! ## Core Types
//!
//! - [`Schema`]: entry point for creating schemas
//! - [`SchemaLike`]: the contract every schema implements, with the parse
//!   entry points and modifiers
//! - [`Value`]: the untyped input, convertible from `serde_json::Value`
//! - [`ValuePath`]: location of a value inside the input (e.g. `users[0].email`)
//! - [`Issue`] and [`ValidationError`]: one failure, and the aggregate of all
//!   failures for a call
//! - [`SchemaRegistry`]: named schemas and references for recursive shapes
//!
//! ## Example
//!
//! ```rust
//! use tollgate::{IssueKind, Schema, SchemaLike};
//! use serde_json::json;
//!
//! let user = Schema::object()
//!     .field("name", Schema::string().min_len(1))
//!     .field("age", Schema::number().int().non_negative())
//!     .field("roles", Schema::array(Schema::enumeration(["admin", "user"])))
//!     .strict();
//!
//! assert!(user
//!     .safe_parse(json!({"name": "Ada", "age": 36, "roles": ["admin"]}))
//!     .is_success());
//!
//! let errors = user
//!     .safe_parse(json!({"name": "", "age": 1.5, "roles": ["root"], "x": 1}))
//!     .into_result()
//!     .unwrap_err();
//!
//! assert_eq!(errors.len(), 4);
//! assert_eq!(errors.with_code(IssueKind::UnrecognizedKeys).len(), 1);
//! ```

pub mod error;
pub mod outcome;
pub mod path;
pub mod registry;
pub mod schema;
pub mod value;

pub use error::{AsyncParseError, BoxError, Issue, IssueKind, ParseError, ValidationError};
pub use outcome::{MaybeAsync, Outcome, ValidationResult};
pub use path::{PathSegment, ValuePath};
pub use registry::{RegistryError, SchemaRegistry};
pub use schema::{
    ArraySchema, BooleanSchema, DefaultSchema, DynSchema, EnumSchema, Maybe, NullableSchema,
    NullishSchema, NumberSchema, ObjectSchema, OptionalSchema, RefSchema, RefineSchema, Schema,
    SchemaLike, StringSchema, TransformSchema, UnionSchema, UnknownKeys, ValueValidator,
};
pub use value::Value;
