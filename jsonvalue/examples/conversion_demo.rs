// Example converting Rust collections to JSON values and back

use std::collections::BTreeMap;

use jsonvalue::{from_json, to_json, ConversionPolicy, Converter, ToJson};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut inventory: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    inventory.insert("apples", vec![3, 5]);
    inventory.insert("pears", vec![]);

    let value = to_json(&inventory);
    println!("To JSON:   {}", value);

    let back: BTreeMap<String, Vec<u32>> = from_json(&value)?;
    println!("Back:      {:?}", back);

    let readings = [20.5, f64::NAN];
    println!("Degraded:  {}", to_json(&readings));
    match readings.to_json_with(&Converter::new(ConversionPolicy::Fail)) {
        Ok(v) => println!("Strict:    {}", v),
        Err(e) => println!("Strict:    {}", e),
    }
    Ok(())
}
