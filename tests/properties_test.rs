//! Property tests over arbitrary input values.

use proptest::prelude::*;
use tollgate::{ObjectSchema, Schema, SchemaLike, Value};

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Undefined),
        Just(Value::Null),
        Just(Value::Number(f64::NAN)),
        Just(Value::Number(f64::INFINITY)),
        any::<bool>().prop_map(Value::Bool),
        any::<f64>().prop_map(Value::Number),
        (-5i64..5).prop_map(Value::from),
        "[a-z@.]{0,12}".prop_map(Value::String),
        prop_oneof![Just("x"), Just("y"), Just("a@b.io")].prop_map(Value::from),
    ];

    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-e]", inner), 0..6)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn record() -> ObjectSchema {
    Schema::object()
        .field("a", Schema::string().email().optional())
        .field("b", Schema::array(Schema::number().int()).nullable())
        .field(
            "c",
            Schema::union(vec![
                Box::new(Schema::boolean()),
                Box::new(Schema::enumeration(["x", "y"])),
            ])
            .nullish(),
        )
        .field("d", Schema::number().default(1))
}

proptest! {
    #[test]
    fn safe_parse_never_panics(input in arb_value()) {
        let _ = record().safe_parse(input.clone());
        let _ = record().strict().safe_parse(input.clone());
        let _ = record().passthrough().partial().safe_parse(input.clone());
        let _ = Schema::array(record()).safe_parse(input);
    }

    #[test]
    fn well_formed_records_are_accepted(
        a in prop_oneof![Just(Value::Undefined), Just(Value::from("a@b.io"))],
        b in prop::collection::vec(-100i64..100, 0..5),
        c in prop_oneof![Just(Value::Null), Just(Value::from("x")), Just(Value::Bool(false))],
    ) {
        let mut input = indexmap::IndexMap::new();
        input.insert("a".to_string(), a);
        input.insert("b".to_string(), Value::from(b));
        input.insert("c".to_string(), c);
        prop_assert!(record().safe_parse(Value::Object(input)).is_success());
    }

    #[test]
    fn parse_is_idempotent(input in arb_value()) {
        if let Ok(first) = record().parse(input) {
            let second = record().parse(Value::Object(first.clone()));
            prop_assert_eq!(second.ok(), Some(first));
        }
    }

    #[test]
    fn strings_pass_through_unchanged(s in ".*") {
        prop_assert_eq!(Schema::string().parse(s.clone()).ok(), Some(s));
    }

    #[test]
    fn array_reports_each_bad_item(items in prop::collection::vec(arb_value(), 0..10)) {
        let bad = items
            .iter()
            .filter(|v| !matches!(v, Value::Number(n) if !n.is_nan()))
            .count();

        match Schema::array(Schema::number()).safe_parse(Value::Array(items)).into_result() {
            Ok(_) => prop_assert_eq!(bad, 0),
            Err(errors) => prop_assert_eq!(errors.len(), bad),
        }
    }
}
