//! Integration tests for union schema validation.

use serde_json::json;
use tollgate::{IssueKind, Schema, SchemaLike, UnionSchema, Value, ValueValidator};

fn string_or_number() -> UnionSchema {
    Schema::union(vec![Box::new(Schema::string()), Box::new(Schema::number())])
}

#[test]
fn test_union_short_circuit() {
    assert_eq!(string_or_number().parse(5).unwrap(), Value::Number(5.0));
    assert_eq!(string_or_number().parse("five").unwrap(), Value::from("five"));
}

#[test]
fn test_union_merges_every_candidate_failure() {
    let errors = string_or_number()
        .safe_parse(true)
        .into_result()
        .unwrap_err();

    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|i| i.code == IssueKind::InvalidType));
    assert!(errors.iter().all(|i| i.path.is_root()));
}

#[test]
fn test_union_does_not_extend_path() {
    let schema = Schema::object().field("id", string_or_number());

    let errors = schema
        .safe_parse(json!({"id": null}))
        .into_result()
        .unwrap_err();
    let paths: Vec<_> = errors.iter().map(|i| i.path.to_string()).collect();
    assert_eq!(paths, vec!["id", "id"]);
}

#[test]
fn test_first_declared_candidate_wins() {
    let schema = Schema::union(vec![
        Box::new(Schema::number().transform(|n| format!("first:{}", n))),
        Box::new(Schema::number().transform(|n| format!("second:{}", n))),
    ]);

    assert_eq!(schema.parse(1).unwrap(), Value::from("first:1"));
}

#[test]
fn test_or_builder() {
    let schema = Schema::union(Vec::new())
        .or(Schema::boolean())
        .or(Schema::enumeration(["yes", "no"]));

    assert_eq!(schema.len(), 2);
    assert!(schema.safe_parse(true).is_success());
    assert!(schema.safe_parse("yes").is_success());
    assert_eq!(
        schema.safe_parse("maybe").into_result().unwrap_err().len(),
        2
    );
}

#[test]
fn test_union_of_objects() {
    let circle = Schema::object()
        .field("kind", Schema::enumeration(["circle"]))
        .field("radius", Schema::number().positive());
    let square = Schema::object()
        .field("kind", Schema::enumeration(["square"]))
        .field("side", Schema::number().positive());

    let candidates: Vec<Box<dyn ValueValidator>> = vec![Box::new(circle), Box::new(square)];
    let shape = Schema::union(candidates);

    let out = shape.parse(json!({"kind": "square", "side": 2})).unwrap();
    assert_eq!(out.to_json(), json!({"kind": "square", "side": 2}));

    let errors = shape
        .safe_parse(json!({"kind": "triangle"}))
        .into_result()
        .unwrap_err();
    // Both candidates report their enum mismatch and the missing number.
    assert_eq!(errors.len(), 4);
}

#[test]
fn test_empty_union_fails() {
    let errors = Schema::union(Vec::new())
        .safe_parse(1)
        .into_result()
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().unwrap().message, "union has no candidate schemas");
}
