//! Integration tests for construction, reads, and copy-on-read isolation.

use optstore::prelude::*;

fn app_schema() -> Schema {
    Schema::builder()
        .option("verbose", OptionType::Bool, Value::Bool(false))
        .option("retries", OptionType::Int, Value::Int(3))
        .option(
            "hosts",
            OptionType::Seq(Box::new(OptionType::Text)),
            Value::Seq(vec![Value::Text("localhost".into())]),
        )
        .option(
            "labels",
            OptionType::Map(Box::new(OptionType::Text), Box::new(OptionType::Int)),
            Value::Map(vec![(Value::Text("weight".into()), Value::Int(10))]),
        )
        .option(
            "mode",
            OptionType::Choice(vec![
                Value::Text("plain".into()),
                Value::Text("strict".into()),
            ]),
            Value::Text("plain".into()),
        )
        .build()
        .unwrap()
}

#[test]
fn defaults_visible_after_construction() {
    let opts = OptionStore::new(app_schema()).unwrap();
    for name in opts.keys() {
        assert_eq!(opts.get(&name).unwrap(), opts.default(&name).unwrap());
        assert!(!opts.has_changed(&name).unwrap());
    }
}

#[test]
fn mutating_a_returned_sequence_does_not_leak_into_the_store() {
    let mut opts = OptionStore::new(app_schema()).unwrap();
    opts.update([(
        "hosts",
        Value::Seq(vec![Value::Text("a".into()), Value::Text("b".into())]),
    )])
    .unwrap();

    let before = opts.get("hosts").unwrap();
    let mut held = opts.get("hosts").unwrap();
    if let Value::Seq(items) = &mut held {
        items.clear();
        items.push(Value::Text("corrupted".into()));
    }

    assert_eq!(opts.get("hosts").unwrap(), before);
}

#[test]
fn mutating_a_returned_mapping_does_not_leak_into_the_store() {
    let opts = OptionStore::new(app_schema()).unwrap();
    let before = opts.get("labels").unwrap();
    let mut held = opts.get("labels").unwrap();
    if let Value::Map(entries) = &mut held {
        entries.push((Value::Text("extra".into()), Value::Int(0)));
    }
    assert_eq!(opts.get("labels").unwrap(), before);
}

#[test]
fn choice_options_reject_values_outside_the_enumeration() {
    let mut opts = OptionStore::new(app_schema()).unwrap();
    opts.update([("mode", Value::Text("strict".into()))]).unwrap();
    assert_eq!(opts.get_str("mode").unwrap(), "strict");

    let err = opts.update([("mode", Value::Text("lenient".into()))]).unwrap_err();
    assert!(matches!(err, OptionsError::IncompatibleType { .. }));
    assert_eq!(opts.get_str("mode").unwrap(), "strict");
}

#[test]
fn end_to_end_verbose_retries_example() {
    let schema = Schema::builder()
        .option("verbose", OptionType::Bool, Value::Bool(false))
        .option("retries", OptionType::Int, Value::Int(3))
        .build()
        .unwrap();
    let mut opts = OptionStore::new(schema.clone()).unwrap();

    opts.update([("verbose", Value::Bool(true))]).unwrap();
    assert!(opts.get_bool("verbose").unwrap());
    assert_eq!(opts.get_int("retries").unwrap(), 3);
    assert!(opts.has_changed("verbose").unwrap());
    assert!(!opts.has_changed("retries").unwrap());

    let fresh = OptionStore::new(schema).unwrap();
    assert_ne!(opts, fresh);
}

#[test]
fn display_is_a_declaration_ordered_dump() {
    let opts = OptionStore::new(app_schema()).unwrap();
    let dump = opts.to_string();
    let verbose_at = dump.find("verbose =").unwrap();
    let retries_at = dump.find("retries =").unwrap();
    let hosts_at = dump.find("hosts =").unwrap();
    assert!(verbose_at < retries_at);
    assert!(retries_at < hosts_at);
    assert!(dump.contains("hosts = [\"localhost\"]"));
}

#[test]
fn values_round_trip_through_serde_json() {
    let original = Value::Map(vec![
        (
            Value::Text("limits".into()),
            Value::Seq(vec![Value::Int(1), Value::Float(2.5)]),
        ),
        (Value::Text("token".into()), Value::Bytes(vec![0xde, 0xad])),
        (Value::Text("missing".into()), Value::None),
    ]);
    let json = serde_json::to_string(&original).unwrap();
    let decoded: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, original);
}
