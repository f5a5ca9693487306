//! Paths locating a value inside a nested input.
//!
//! This module provides [`ValuePath`] and [`PathSegment`]. Composite schemas
//! extend the path of their input with a field name or an element index
//! before handing a child value to its schema, so every reported issue
//! carries the exact location it refers to.

use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

/// A segment of a path: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// An object key (e.g. `user`, `email`).
    Field(String),
    /// An array index (e.g. `[0]`).
    Index(usize),
}

impl PathSegment {
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// A location inside a (possibly nested) value.
///
/// The empty path denotes the root. Extending a path returns a new one and
/// leaves the receiver untouched, so sibling branches of a composite never
/// observe each other's segments.
///
/// # Example
///
/// ```rust
/// use tollgate::ValuePath;
///
/// let path = ValuePath::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("name");
///
/// assert_eq!(path.to_string(), "users[0].name");
/// ```
///
/// A path also counts how many schema references were followed to reach it.
/// The count travels with the path into children but takes no part in
/// equality, hashing or display.
#[derive(Debug, Clone, Default)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
    references: usize,
}

impl ValuePath {
    /// Creates the root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    fn push(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self {
            segments,
            references: self.references,
        }
    }

    /// Returns the same location with one more followed reference.
    pub(crate) fn follow_reference(&self) -> Self {
        Self {
            segments: self.segments.clone(),
            references: self.references + 1,
        }
    }

    /// Number of schema references followed to reach this path.
    pub fn reference_depth(&self) -> usize {
        self.references
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the path without its last segment, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
            references: self.references,
        })
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Renders the path as a JSON array of strings and integers.
    pub fn to_json(&self) -> serde_json::Value {
        self.segments
            .iter()
            .map(|segment| match segment {
                PathSegment::Field(name) => serde_json::Value::from(name.as_str()),
                PathSegment::Index(idx) => serde_json::Value::from(*idx),
            })
            .collect()
    }
}

impl FromIterator<PathSegment> for ValuePath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
            references: 0,
        }
    }
}

impl PartialEq for ValuePath {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for ValuePath {}

impl Hash for ValuePath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
