//! The validation error aggregate.
//!
//! [`ValidationError`] accumulates issues from independent validation
//! branches. Composite schemas merge their children's aggregates in
//! declaration order and only ever raise an aggregate that has issues.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use stillwater::prelude::*;

use crate::error::issue::{Issue, IssueKind};
use crate::path::ValuePath;

/// An ordered collection of validation issues.
///
/// # Combining Errors
///
/// `ValidationError` implements `Semigroup`; combining appends the right
/// hand side's issues after the left hand side's:
///
/// ```rust
/// use tollgate::{Issue, ValidationError, ValuePath};
/// use stillwater::prelude::*;
///
/// let name = ValidationError::single(Issue::custom(ValuePath::root().push_field("name"), "required"));
/// let email = ValidationError::single(Issue::custom(ValuePath::root().push_field("email"), "invalid"));
///
/// let combined = name.combine(email);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationError {
    issues: Vec<Issue>,
}

impl ValidationError {
    /// The name exposed to collaborators inspecting the error shape.
    pub const NAME: &'static str = "ValidationError";

    /// Creates an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an aggregate holding one issue.
    pub fn single(issue: Issue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    /// Creates an aggregate holding one `custom` issue.
    pub fn custom(path: ValuePath, message: impl Into<String>) -> Self {
        Self::single(Issue::custom(path, message))
    }

    pub fn from_issues(issues: Vec<Issue>) -> Self {
        Self { issues }
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Appends every issue of `other`, preserving order.
    pub fn merge(&mut self, other: ValidationError) {
        self.issues.extend(other.issues);
    }

    /// Records a failure that is not an aggregate as one `custom` issue.
    pub fn merge_failure(&mut self, path: &ValuePath, failure: &dyn Display) {
        self.push(Issue::custom(path.clone(), failure.to_string()));
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn first(&self) -> Option<&Issue> {
        self.issues.first()
    }

    /// Returns all issues at the specified path.
    pub fn at_path(&self, path: &ValuePath) -> Vec<&Issue> {
        self.issues.iter().filter(|i| &i.path == path).collect()
    }

    /// Returns all issues of the specified kind.
    pub fn with_code(&self, code: IssueKind) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.code == code).collect()
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    /// One line per issue, joined; used as the `message` of the error shape.
    pub fn message(&self) -> String {
        self.issues
            .iter()
            .map(Issue::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Groups messages by rendered path, in first-seen order.
    ///
    /// Root issues are keyed by the empty string.
    pub fn flatten(&self) -> IndexMap<String, Vec<String>> {
        let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();
        for issue in &self.issues {
            grouped
                .entry(issue.path.to_string())
                .or_default()
                .push(issue.message.clone());
        }
        grouped
    }

    /// Renders `{ name, message, issues: [{ path, code, message }] }`.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": Self::NAME,
            "message": self.message(),
            "issues": self.issues.iter().map(Issue::to_json).collect::<Vec<_>>(),
        })
    }
}

impl Semigroup for ValidationError {
    fn combine(mut self, other: Self) -> Self {
        self.merge(other);
        self
    }
}

impl From<Issue> for ValidationError {
    fn from(issue: Issue) -> Self {
        Self::single(issue)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} issue(s):", self.len())?;
        for (i, issue) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

impl IntoIterator for ValidationError {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationError {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue_at(field: &str, message: &str) -> Issue {
        Issue::custom(ValuePath::root().push_field(field), message)
    }

    #[test]
    fn test_new_aggregate_has_no_issues() {
        let errors = ValidationError::new();
        assert!(!errors.has_issues());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_merge_appends_in_order() {
        let mut errors = ValidationError::single(issue_at("a", "1"));
        let mut nested = ValidationError::single(issue_at("b", "2"));
        nested.push(issue_at("c", "3"));

        errors.merge(nested);

        let messages: Vec<_> = errors.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_merge_failure_becomes_custom_issue() {
        let mut errors = ValidationError::new();
        let path = ValuePath::root().push_field("when");
        errors.merge_failure(&path, &"clock skew");

        let issue = errors.first().unwrap();
        assert_eq!(issue.code, IssueKind::Custom);
        assert_eq!(issue.path, path);
        assert_eq!(issue.message, "clock skew");
    }

    #[test]
    fn test_semigroup_associativity() {
        let e1 = ValidationError::single(issue_at("x", "1"));
        let e2 = ValidationError::single(issue_at("x", "2"));
        let e3 = ValidationError::single(issue_at("x", "3"));

        let left = e1.clone().combine(e2.clone()).combine(e3.clone());
        let right = e1.combine(e2.combine(e3));

        assert_eq!(left, right);
    }

    #[test]
    fn test_queries() {
        let path_a = ValuePath::root().push_field("a");
        let errors = ValidationError::from_issues(vec![
            Issue::new(path_a.clone(), IssueKind::TooSmall, "short"),
            Issue::new(path_a.clone(), IssueKind::InvalidString, "bad"),
            Issue::new(ValuePath::root(), IssueKind::TooSmall, "few"),
        ]);

        assert_eq!(errors.at_path(&path_a).len(), 2);
        assert_eq!(errors.with_code(IssueKind::TooSmall).len(), 2);
    }

    #[test]
    fn test_flatten_groups_by_path() {
        let errors = ValidationError::from_issues(vec![
            issue_at("a", "one"),
            Issue::custom(ValuePath::root(), "root"),
            issue_at("a", "two"),
        ]);

        let flat = errors.flatten();
        assert_eq!(flat["a"], vec!["one", "two"]);
        assert_eq!(flat[""], vec!["root"]);
    }

    #[test]
    fn test_error_shape() {
        let errors = ValidationError::single(Issue::invalid_type(
            ValuePath::root().push_field("users").push_index(0),
            "string",
            "number",
        ));

        assert_eq!(
            errors.to_json(),
            json!({
                "name": "ValidationError",
                "message": "users[0]: expected string, received number",
                "issues": [{
                    "path": ["users", 0],
                    "code": "invalid_type",
                    "message": "expected string, received number",
                }],
            })
        );
    }

    #[test]
    fn test_display_numbers_issues() {
        let errors =
            ValidationError::single(issue_at("name", "required")).combine(ValidationError::single(
                issue_at("email", "invalid"),
            ));
        let display = errors.to_string();

        assert!(display.contains("2 issue(s)"));
        assert!(display.contains("1. name: required"));
        assert!(display.contains("2. email: invalid"));
    }
}
