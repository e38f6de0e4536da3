// SPDX-License-Identifier: Apache-2.0

use jsonvalue::{parse, IndexOutOfBounds, JsonArray, JsonObject, JsonValue};

#[test]
fn test_object_order_and_uniqueness() {
    let mut obj = JsonObject::new();
    obj.add_str("foo", "first");
    obj.add_str("foo2", "second");
    obj.add_str("foo", "overwritten");

    assert_eq!(obj.len(), 2);
    let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys, ["foo", "foo2"]);
    assert_eq!(obj.get("foo").and_then(JsonValue::as_str), Some("overwritten"));
    assert_eq!(obj.to_string(), r#"{"foo":"overwritten","foo2":"second"}"#);
}

#[test]
fn test_parsed_object_keeps_document_order() {
    let value = parse(r#"{"z":1,"a":2,"m":3}"#).unwrap();
    assert_eq!(value.as_object().unwrap().keys_copy(), ["z", "a", "m"]);
    assert_eq!(value.to_string(), r#"{"z":1,"a":2,"m":3}"#);
}

#[test]
fn test_sub_array_snapshot_contract() {
    let mut backing: JsonArray = (1..=10).collect();
    let view = backing.sub_array(1..5).unwrap();
    assert_eq!(view.to_string(), "[2,3,4,5]");

    backing.remove(1);
    assert_eq!(backing.to_string(), "[1,3,4,5,6,7,8,9,10]");
    // Taken before the removal, so it still holds the old elements
    assert_eq!(view.to_string(), "[2,3,4,5]");

    // A view taken now reflects the removal
    assert_eq!(backing.sub_array(1..5).unwrap().to_string(), "[3,4,5,6]");
}

#[test]
fn test_index_based_editing() {
    let mut arr: JsonArray = ["a", "c"].into_iter().collect();
    arr.insert(1, "b").unwrap();
    assert_eq!(arr.to_string(), r#"["a","b","c"]"#);
    assert_eq!(arr.insert(5, "x"), Err(IndexOutOfBounds { index: 5, len: 3 }));
    assert_eq!(arr.remove(7), None);
    assert_eq!(arr.set(0, 1).unwrap(), JsonValue::from("a"));
    assert_eq!(arr.to_string(), r#"[1,"b","c"]"#);
}

#[test]
fn test_lookups_report_absence() {
    let value = parse(r#"{"present":null,"list":[1]}"#).unwrap();
    assert_eq!(value.get("present"), Some(&JsonValue::Null));
    assert_eq!(value.get("missing"), None);
    assert!(value.contains_key("present"));
    assert!(!value.contains_key("missing"));

    let list = value.get("list").unwrap();
    assert_eq!(list.get_index(0), Some(&JsonValue::from(1)));
    assert_eq!(list.get_index(1), None);
}

#[test]
fn test_clone_is_independent() {
    let original = parse(r#"{"inner":{"list":[1,2]}}"#).unwrap();
    let mut copy = original.get_clone();

    copy.get_mut("inner")
        .and_then(|inner| inner.get_mut("list"))
        .and_then(JsonValue::as_array_mut)
        .unwrap()
        .add(3);
    copy.as_object_mut().unwrap().add_bool("extra", true);

    assert_eq!(original.to_string(), r#"{"inner":{"list":[1,2]}}"#);
    assert_eq!(copy.to_string(), r#"{"inner":{"list":[1,2,3]},"extra":true}"#);
}

#[test]
fn test_builders_do_not_alias_inputs() {
    let mut shared = JsonArray::new();
    shared.add(1);
    let mut holder = JsonObject::new();
    holder.add("list", shared.clone());

    let mut copied = JsonArray::new();
    let item = JsonValue::from(shared.clone());
    copied.add_value(&item);
    holder.add_value("again", &item);

    shared.add(2);
    assert_eq!(holder.get("list").map(JsonValue::size), Some(1));
    assert_eq!(holder.get("again").map(JsonValue::size), Some(1));
    assert_eq!(copied.to_string(), "[[1]]");
}

#[test]
fn test_copies_are_detached() {
    let value = parse(r#"{"a":[1],"b":[2]}"#).unwrap();
    let obj = value.as_object().unwrap();

    let mut values = obj.values_copy();
    values[0].as_array_mut().unwrap().add(99);
    let mut keys = obj.keys_copy();
    keys.clear();

    assert_eq!(obj.get("a").map(JsonValue::size), Some(1));
    assert_eq!(obj.len(), 2);
}

#[test]
fn test_shared_reads_across_threads() {
    let value = std::sync::Arc::new(parse(r#"{"n":[1,2,3]}"#).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let value = std::sync::Arc::clone(&value);
            std::thread::spawn(move || value.get("n").map(JsonValue::size))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(3));
    }
}
