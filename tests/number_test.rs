//! Integration tests for number schema validation.

use serde_json::json;
use tollgate::{IssueKind, Schema, SchemaLike, ValidationError};

fn unwrap_failure<T>(v: stillwater::Validation<T, ValidationError>) -> ValidationError
where
    T: std::fmt::Debug,
{
    v.into_result().unwrap_err()
}

#[test]
fn test_nan_is_rejected_but_infinity_accepted() {
    let schema = Schema::number();

    let errors = unwrap_failure(schema.safe_parse(f64::NAN));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().unwrap().code, IssueKind::InvalidType);

    assert_eq!(schema.parse(f64::INFINITY).unwrap(), f64::INFINITY);
    assert_eq!(schema.parse(f64::NEG_INFINITY).unwrap(), f64::NEG_INFINITY);
}

#[test]
fn test_json_numbers() {
    let schema = Schema::number();
    assert_eq!(schema.parse(json!(42)).unwrap(), 42.0);
    assert_eq!(schema.parse(json!(-0.5)).unwrap(), -0.5);
    assert!(schema.safe_parse(json!("42")).is_failure());
}

#[test]
fn test_range() {
    let schema = Schema::number().range(1.0..=5.0);

    for ok in [1.0, 3.3, 5.0] {
        assert!(schema.safe_parse(ok).is_success(), "{}", ok);
    }

    let errors = unwrap_failure(schema.safe_parse(0.5));
    assert_eq!(
        errors.first().unwrap().message,
        "number must be greater than or equal to 1, got 0.5"
    );

    let errors = unwrap_failure(schema.safe_parse(6));
    assert_eq!(
        errors.first().unwrap().message,
        "number must be less than or equal to 5, got 6"
    );
}

#[test]
fn test_exclusive_bounds() {
    let schema = Schema::number().gt(0.0).lt(1.0);

    assert!(schema.safe_parse(0.5).is_success());
    assert_eq!(
        unwrap_failure(schema.safe_parse(0)).first().unwrap().code,
        IssueKind::TooSmall
    );
    assert_eq!(
        unwrap_failure(schema.safe_parse(1)).first().unwrap().code,
        IssueKind::TooBig
    );
}

#[test]
fn test_int() {
    let schema = Schema::number().int();

    assert_eq!(schema.parse(json!(7)).unwrap(), 7.0);
    assert_eq!(schema.parse(-3.0).unwrap(), -3.0);

    let errors = unwrap_failure(schema.safe_parse(2.5));
    assert_eq!(errors.first().unwrap().code, IssueKind::InvalidType);
    assert_eq!(errors.first().unwrap().message, "expected integer, received 2.5");
}

#[test]
fn test_sign_helpers() {
    assert!(Schema::number().positive().safe_parse(0).is_failure());
    assert!(Schema::number().non_negative().safe_parse(0).is_success());
    assert!(Schema::number().negative().safe_parse(-0.1).is_success());
    assert!(Schema::number().negative().safe_parse(0).is_failure());
}

#[test]
fn test_finite() {
    let schema = Schema::number().finite();
    assert!(schema.safe_parse(1e300).is_success());
    assert!(schema.safe_parse(f64::NEG_INFINITY).is_failure());
}

#[test]
fn test_first_failing_constraint_wins() {
    let schema = Schema::number().int().min(10.0);

    let errors = unwrap_failure(schema.safe_parse(2.5));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().unwrap().message, "expected integer, received 2.5");
}

#[test]
fn test_custom_messages() {
    let schema = Schema::number()
        .error("age must be a number")
        .min(18.0)
        .error("must be an adult");

    assert_eq!(
        unwrap_failure(schema.safe_parse("x")).first().unwrap().message,
        "age must be a number"
    );
    assert_eq!(
        unwrap_failure(schema.safe_parse(12)).first().unwrap().message,
        "must be an adult"
    );
}
