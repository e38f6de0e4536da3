// SPDX-License-Identifier: Apache-2.0

use std::collections::{BTreeMap, HashMap};

use jsonvalue::{
    from_json, parse, to_json, ConversionError, ConversionPolicy, Converter, JsonNumber,
    JsonValue, NumKind, ToJson,
};

#[test]
fn test_host_values_to_document() {
    let mut scores = BTreeMap::new();
    scores.insert("alice", vec![Some(9.5), None]);
    scores.insert("bob", vec![Some(7.0)]);

    assert_eq!(
        to_json(&scores).to_string(),
        r#"{"alice":[9.5,null],"bob":[7.0]}"#
    );
}

#[test]
fn test_integer_widths_keep_integer_kind() {
    let kinds: Vec<Option<NumKind>> = [
        to_json(&i8::MIN),
        to_json(&u16::MAX),
        to_json(&i64::MIN),
        to_json(&usize::MAX),
        to_json(&i128::MIN),
    ]
    .iter()
    .map(|v| v.as_number().map(JsonNumber::kind))
    .collect();
    assert_eq!(
        kinds,
        [
            Some(NumKind::Int64),
            Some(NumKind::Int64),
            Some(NumKind::Int64),
            Some(NumKind::BigInt),
            Some(NumKind::BigInt)
        ]
    );
    assert_eq!(to_json(&i128::MIN).to_string(), i128::MIN.to_string());
}

#[test]
fn test_converted_values_round_trip_through_text() {
    let mut map: HashMap<String, Vec<u64>> = HashMap::new();
    map.insert("big".into(), vec![u64::MAX, 0]);
    let text = to_json(&map).to_string();
    let back: HashMap<String, Vec<u64>> = from_json(&parse(&text).unwrap()).unwrap();
    assert_eq!(back, map);
}

#[test]
fn test_policy_controls_non_finite_floats() {
    let values = [1.0f32, f32::NAN];
    assert_eq!(to_json(&values).to_string(), r#"[1.0,"NaN"]"#);

    let strict = Converter::new(ConversionPolicy::Fail);
    assert_eq!(strict.policy(), ConversionPolicy::Fail);
    match values.to_json_with(&strict) {
        Err(ConversionError::Unsupported { type_name, .. }) => assert_eq!(type_name, "f32"),
        other => panic!("expected Unsupported, got {other:?}"),
    }
}

/// A caller type with `Display` but no `ToJson` impl.
struct Celsius(f64);

impl std::fmt::Display for Celsius {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1} C", self.0)
    }
}

#[test]
fn test_display_fallback_for_foreign_types() {
    let converter = Converter::default();
    assert_eq!(converter.display_leaf(&Celsius(21.54)), JsonValue::from("21.5 C"));

    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], 8080));
    assert_eq!(converter.display_leaf(&addr), JsonValue::from("127.0.0.1:8080"));

    let path = std::path::Path::new("logs/app.log");
    assert_eq!(converter.display_leaf(&path.display()), JsonValue::from("logs/app.log"));
}

#[test]
fn test_from_json_reports_mismatch() {
    let value = parse(r#"{"a": "not a number"}"#).unwrap();
    let err = from_json::<BTreeMap<String, i32>>(&value).unwrap_err();
    assert_eq!(err.to_string(), "expected integer, found string");
}
