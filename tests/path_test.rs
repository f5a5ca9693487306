//! Integration tests for value paths and how issues are addressed.

use serde_json::json;
use tollgate::{PathSegment, Schema, SchemaLike, ValuePath};

#[test]
fn test_root_path() {
    let root = ValuePath::root();
    assert!(root.is_root());
    assert_eq!(root.to_string(), "");
    assert_eq!(root.to_json(), json!([]));
    assert!(root.parent().is_none());
}

#[test]
fn test_extending_does_not_mutate_parent() {
    let users = ValuePath::root().push_field("users");
    let first = users.push_index(0);
    let second = users.push_index(1);

    assert_eq!(users.len(), 1);
    assert_eq!(first.to_string(), "users[0]");
    assert_eq!(second.to_string(), "users[1]");
    assert_eq!(first.parent(), Some(users));
}

#[test]
fn test_mixed_segments_render() {
    let path = ValuePath::root()
        .push_field("users")
        .push_index(0)
        .push_field("name");

    assert_eq!(path.to_string(), "users[0].name");
    assert_eq!(path.to_json(), json!(["users", 0, "name"]));
    assert_eq!(path.last(), Some(&PathSegment::Field("name".to_string())));
}

#[test]
fn test_path_from_segments() {
    let path: ValuePath = vec![PathSegment::index(2), PathSegment::field("id")]
        .into_iter()
        .collect();
    assert_eq!(path.to_string(), "[2].id");
}

#[test]
fn test_nested_issue_paths() {
    let schema = Schema::object().field(
        "users",
        Schema::array(Schema::object().field("email", Schema::string().email())),
    );

    let errors = schema
        .safe_parse(json!({
            "users": [
                {"email": "ok@example.com"},
                {"email": "broken"}
            ]
        }))
        .into_result()
        .unwrap_err();

    assert_eq!(errors.len(), 1);
    let issue = errors.first().unwrap();
    assert_eq!(issue.path.to_json(), json!(["users", 1, "email"]));
    assert_eq!(issue.path.to_string(), "users[1].email");
}
