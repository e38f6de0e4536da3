// SPDX-License-Identifier: Apache-2.0

//! Conversion between host values and [`JsonValue`].
//!
//! [`ToJson`] maps Rust values into the value model: integers keep an
//! integer kind, floats become `Float64`, sequences become arrays and maps
//! with displayable keys become objects. [`FromJson`] goes the other way.
//!
//! Conversion into JSON is total by default. The only values with no JSON
//! form are non-finite floats; under [`ConversionPolicy::Degrade`] they turn
//! into their textual form, under [`ConversionPolicy::Fail`] they are an error.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::Display;

use indexmap::IndexMap;

use crate::array::JsonArray;
use crate::json_number::JsonNumber;
use crate::object::JsonObject;
use crate::value::JsonValue;

/// What to do with a host value that has no exact JSON form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionPolicy {
    /// Store a best-effort textual leaf instead.
    #[default]
    Degrade,
    /// Return [`ConversionError::Unsupported`].
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A host value with no JSON form, under [`ConversionPolicy::Fail`],
    /// or a JSON value outside the range of the target type.
    Unsupported {
        type_name: &'static str,
        reason: String,
    },
    /// The JSON value has the wrong variant for the target type.
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl core::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConversionError::Unsupported { type_name, reason } => {
                write!(f, "cannot convert {type_name}: {reason}")
            }
            ConversionError::Mismatch { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
        }
    }
}

impl std::error::Error for ConversionError {}

/// Carries the [`ConversionPolicy`] through a recursive conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Converter {
    policy: ConversionPolicy,
}

impl Converter {
    pub fn new(policy: ConversionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ConversionPolicy {
        self.policy
    }

    pub fn convert<T: ToJson + ?Sized>(&self, value: &T) -> Result<JsonValue, ConversionError> {
        value.to_json_with(self)
    }

    /// A float leaf, or the policy's fallback for NaN and infinities.
    pub fn float(&self, value: f64, type_name: &'static str) -> Result<JsonValue, ConversionError> {
        if let Some(number) = JsonNumber::from_f64(value) {
            return Ok(JsonValue::Number(number));
        }
        match self.policy {
            ConversionPolicy::Degrade => {
                log::debug!("Converter: non-finite {type_name} {value} stored as text");
                Ok(JsonValue::Str(value.to_string()))
            }
            ConversionPolicy::Fail => Err(ConversionError::Unsupported {
                type_name,
                reason: format!("{value} is not a finite number"),
            }),
        }
    }

    /// Best-effort leaf for a type with no [`ToJson`] impl: its `Display` text.
    pub fn display_leaf<T: Display + ?Sized>(&self, value: &T) -> JsonValue {
        JsonValue::Str(value.to_string())
    }

    fn sequence<'a, T, I>(&self, items: I) -> Result<JsonValue, ConversionError>
    where
        T: ToJson + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        items
            .into_iter()
            .map(|item| item.to_json_with(self))
            .collect::<Result<JsonArray, _>>()
            .map(JsonValue::Array)
    }

    fn mapping<'a, K, V, I>(&self, entries: I) -> Result<JsonValue, ConversionError>
    where
        K: Display + 'a,
        V: ToJson + 'a,
        I: IntoIterator<Item = (&'a K, &'a V)>,
    {
        let mut object = JsonObject::new();
        for (key, value) in entries {
            object.insert(key.to_string(), value.to_json_with(self)?);
        }
        Ok(JsonValue::Object(object))
    }
}

/// Host values that map into the value model.
pub trait ToJson {
    fn to_json_with(&self, converter: &Converter) -> Result<JsonValue, ConversionError>;

    /// Convert with the default, degrading policy.
    fn to_json(&self) -> JsonValue {
        match self.to_json_with(&Converter::default()) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("Converter: {e}, using null");
                JsonValue::Null
            }
        }
    }
}

/// Convert any [`ToJson`] value with the default policy.
pub fn to_json<T: ToJson + ?Sized>(value: &T) -> JsonValue {
    value.to_json()
}

impl ToJson for () {
    fn to_json_with(&self, _: &Converter) -> Result<JsonValue, ConversionError> {
        Ok(JsonValue::Null)
    }
}

impl ToJson for bool {
    fn to_json_with(&self, _: &Converter) -> Result<JsonValue, ConversionError> {
        Ok(JsonValue::Bool(*self))
    }
}

macro_rules! int_to_json {
    ($($t:ty),*) => {
        $(
            impl ToJson for $t {
                fn to_json_with(&self, _: &Converter) -> Result<JsonValue, ConversionError> {
                    Ok(JsonValue::Number(JsonNumber::from(*self)))
                }
            }
        )*
    };
}

int_to_json!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl ToJson for f32 {
    fn to_json_with(&self, converter: &Converter) -> Result<JsonValue, ConversionError> {
        converter.float(f64::from(*self), "f32")
    }
}

impl ToJson for f64 {
    fn to_json_with(&self, converter: &Converter) -> Result<JsonValue, ConversionError> {
        converter.float(*self, "f64")
    }
}

impl ToJson for char {
    fn to_json_with(&self, _: &Converter) -> Result<JsonValue, ConversionError> {
        Ok(JsonValue::Str(self.to_string()))
    }
}

impl ToJson for str {
    fn to_json_with(&self, _: &Converter) -> Result<JsonValue, ConversionError> {
        Ok(JsonValue::Str(self.to_owned()))
    }
}

impl ToJson for String {
    fn to_json_with(&self, _: &Converter) -> Result<JsonValue, ConversionError> {
        Ok(JsonValue::Str(self.clone()))
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json_with(&self, converter: &Converter) -> Result<JsonValue, ConversionError> {
        match self {
            Some(value) => value.to_json_with(converter),
            None => Ok(JsonValue::Null),
        }
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json_with(&self, converter: &Converter) -> Result<JsonValue, ConversionError> {
        (**self).to_json_with(converter)
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn to_json_with(&self, converter: &Converter) -> Result<JsonValue, ConversionError> {
        (**self).to_json_with(converter)
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json_with(&self, converter: &Converter) -> Result<JsonValue, ConversionError> {
        converter.sequence(self)
    }
}

impl<T: ToJson, const N: usize> ToJson for [T; N] {
    fn to_json_with(&self, converter: &Converter) -> Result<JsonValue, ConversionError> {
        converter.sequence(self)
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json_with(&self, converter: &Converter) -> Result<JsonValue, ConversionError> {
        converter.sequence(self)
    }
}

impl<T: ToJson> ToJson for VecDeque<T> {
    fn to_json_with(&self, converter: &Converter) -> Result<JsonValue, ConversionError> {
        converter.sequence(self)
    }
}

/// Member order follows the map's iteration order, which is unspecified for `HashMap`.
impl<K: Display, V: ToJson, S> ToJson for HashMap<K, V, S> {
    fn to_json_with(&self, converter: &Converter) -> Result<JsonValue, ConversionError> {
        converter.mapping(self)
    }
}

impl<K: Display, V: ToJson> ToJson for BTreeMap<K, V> {
    fn to_json_with(&self, converter: &Converter) -> Result<JsonValue, ConversionError> {
        converter.mapping(self)
    }
}

impl<K: Display, V: ToJson, S> ToJson for IndexMap<K, V, S> {
    fn to_json_with(&self, converter: &Converter) -> Result<JsonValue, ConversionError> {
        converter.mapping(self)
    }
}

impl ToJson for JsonValue {
    fn to_json_with(&self, _: &Converter) -> Result<JsonValue, ConversionError> {
        Ok(self.clone())
    }
}

impl ToJson for JsonNumber {
    fn to_json_with(&self, _: &Converter) -> Result<JsonValue, ConversionError> {
        Ok(JsonValue::Number(self.clone()))
    }
}

impl ToJson for JsonArray {
    fn to_json_with(&self, _: &Converter) -> Result<JsonValue, ConversionError> {
        Ok(JsonValue::Array(self.clone()))
    }
}

impl ToJson for JsonObject {
    fn to_json_with(&self, _: &Converter) -> Result<JsonValue, ConversionError> {
        Ok(JsonValue::Object(self.clone()))
    }
}

/// Host values that can be read back out of the value model.
pub trait FromJson: Sized {
    fn from_json(value: &JsonValue) -> Result<Self, ConversionError>;
}

/// Convert a [`JsonValue`] into `T`.
pub fn from_json<T: FromJson>(value: &JsonValue) -> Result<T, ConversionError> {
    T::from_json(value)
}

fn mismatch(expected: &'static str, found: &JsonValue) -> ConversionError {
    ConversionError::Mismatch {
        expected,
        found: found.type_name(),
    }
}

impl FromJson for JsonValue {
    fn from_json(value: &JsonValue) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

impl FromJson for bool {
    fn from_json(value: &JsonValue) -> Result<Self, ConversionError> {
        value.as_bool().ok_or_else(|| mismatch("boolean", value))
    }
}

impl FromJson for String {
    fn from_json(value: &JsonValue) -> Result<Self, ConversionError> {
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| mismatch("string", value))
    }
}

macro_rules! int_from_json {
    ($($t:ty),*) => {
        $(
            impl FromJson for $t {
                fn from_json(value: &JsonValue) -> Result<Self, ConversionError> {
                    let number = value
                        .as_number()
                        .filter(|n| n.is_integer())
                        .ok_or_else(|| mismatch("integer", value))?;
                    number.parse::<$t>().map_err(|_| ConversionError::Unsupported {
                        type_name: stringify!($t),
                        reason: format!("{number} is out of range"),
                    })
                }
            }
        )*
    };
}

int_from_json!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl FromJson for f64 {
    fn from_json(value: &JsonValue) -> Result<Self, ConversionError> {
        let number = value.as_number().ok_or_else(|| mismatch("number", value))?;
        number.as_f64().ok_or_else(|| ConversionError::Unsupported {
            type_name: "f64",
            reason: format!("{number} is out of range"),
        })
    }
}

impl FromJson for f32 {
    fn from_json(value: &JsonValue) -> Result<Self, ConversionError> {
        let wide = f64::from_json(value)?;
        let narrow = wide as f32;
        if narrow.is_finite() {
            Ok(narrow)
        } else {
            Err(ConversionError::Unsupported {
                type_name: "f32",
                reason: format!("{wide} is out of range"),
            })
        }
    }
}

impl<T: FromJson> FromJson for Option<T> {
    fn from_json(value: &JsonValue) -> Result<Self, ConversionError> {
        match value {
            JsonValue::Null => Ok(None),
            other => T::from_json(other).map(Some),
        }
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: &JsonValue) -> Result<Self, ConversionError> {
        value
            .as_array()
            .ok_or_else(|| mismatch("array", value))?
            .iter()
            .map(T::from_json)
            .collect()
    }
}

impl<T: FromJson> FromJson for BTreeMap<String, T> {
    fn from_json(value: &JsonValue) -> Result<Self, ConversionError> {
        value
            .as_object()
            .ok_or_else(|| mismatch("object", value))?
            .iter()
            .map(|(k, v)| T::from_json(v).map(|v| (k.clone(), v)))
            .collect()
    }
}

impl<T: FromJson> FromJson for HashMap<String, T> {
    fn from_json(value: &JsonValue) -> Result<Self, ConversionError> {
        value
            .as_object()
            .ok_or_else(|| mismatch("object", value))?
            .iter()
            .map(|(k, v)| T::from_json(v).map(|v| (k.clone(), v)))
            .collect()
    }
}

impl<T: FromJson> FromJson for IndexMap<String, T> {
    fn from_json(value: &JsonValue) -> Result<Self, ConversionError> {
        value
            .as_object()
            .ok_or_else(|| mismatch("object", value))?
            .iter()
            .map(|(k, v)| T::from_json(v).map(|v| (k.clone(), v)))
            .collect()
    }
}
