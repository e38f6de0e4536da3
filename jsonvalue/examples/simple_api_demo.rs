// Example demonstrating parse, lookup, edit and write

use jsonvalue::{parse, JsonArray, JsonObject, JsonValue, ParseError};

fn main() -> Result<(), ParseError> {
    let json = r#"{"name": "value", "number": 42, "price": 19.90, "tags": ["a", "b"]}"#;
    println!("Input: {}", json);

    let mut value = parse(json)?;

    if let Some(obj) = value.as_object() {
        for (key, item) in obj {
            match item {
                JsonValue::Number(n) => println!("Key: '{}' -> Number {} ({:?})", key, n, n.kind()),
                other => println!("Key: '{}' -> {} {}", key, other.type_name(), other),
            }
        }
    }

    // Edit in place
    if let Some(tags) = value.get_mut("tags").and_then(JsonValue::as_array_mut) {
        tags.add_str("c");
    }
    if let Some(obj) = value.as_object_mut() {
        obj.remove_key("number");
        obj.add_bool("edited", true);
    }

    // Build a value from scratch
    let mut point = JsonObject::new();
    point.add_i64("x", 3).add_i64("y", -4);
    let mut points = JsonArray::new();
    points.add(point.get_clone()).add(point);

    println!();
    println!("Edited:  {}", value);
    println!("Built:   {}", JsonValue::from(points));
    Ok(())
}
