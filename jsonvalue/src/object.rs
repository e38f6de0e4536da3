// SPDX-License-Identifier: Apache-2.0

use indexmap::map::{IntoIter, Iter, IterMut, Keys, Values};
use indexmap::IndexMap;

use crate::value::JsonValue;

/// A JSON object: unique string keys mapped to values, in insertion order.
///
/// Re-inserting an existing key replaces its value but keeps its original
/// position. Removing a key keeps the relative order of the remaining ones.
/// Two objects are equal only if they hold the same members in the same order.
///
/// Mutation goes through `&mut self`; a finished object can be shared across
/// threads for reading, but there is no internal locking for writers.
#[derive(Debug, Clone, Default)]
pub struct JsonObject {
    members: IndexMap<String, JsonValue>,
}

impl JsonObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert or replace a member, returning the previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Option<JsonValue> {
        self.members.insert(key.into(), value.into())
    }

    /// Builder form of [`JsonObject::insert`].
    ///
    /// ```
    /// use jsonvalue::JsonObject;
    /// let mut obj = JsonObject::new();
    /// obj.add("name", "value").add("count", 3).add_null("missing");
    /// assert_eq!(obj.to_string(), r#"{"name":"value","count":3,"missing":null}"#);
    /// ```
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> &mut Self {
        self.insert(key, value);
        self
    }

    pub fn add_null(&mut self, key: impl Into<String>) -> &mut Self {
        self.add(key, JsonValue::Null)
    }

    pub fn add_bool(&mut self, key: impl Into<String>, value: bool) -> &mut Self {
        self.add(key, value)
    }

    pub fn add_i64(&mut self, key: impl Into<String>, value: i64) -> &mut Self {
        self.add(key, value)
    }

    pub fn add_u64(&mut self, key: impl Into<String>, value: u64) -> &mut Self {
        self.add(key, value)
    }

    /// Non-finite values are stored as `null`.
    pub fn add_f64(&mut self, key: impl Into<String>, value: f64) -> &mut Self {
        self.add(key, value)
    }

    pub fn add_str(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.add(key, JsonValue::Str(value.into()))
    }

    /// Store a copy of `value`; later edits to `value` do not show up here.
    pub fn add_value(&mut self, key: impl Into<String>, value: &JsonValue) -> &mut Self {
        self.add(key, value.get_clone())
    }

    /// Remove `key`, keeping the order of the other members.
    pub fn remove_key(&mut self, key: &str) -> Option<JsonValue> {
        self.members.shift_remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.members.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut JsonValue> {
        self.members.get_mut(key)
    }

    /// The member at insertion position `index`.
    pub fn get_index(&self, index: usize) -> Option<(&str, &JsonValue)> {
        self.members
            .get_index(index)
            .map(|(k, v)| (k.as_str(), v))
    }

    /// True if `key` is present, even when it maps to `null`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.members.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn iter(&self) -> Iter<'_, String, JsonValue> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, String, JsonValue> {
        self.members.iter_mut()
    }

    pub fn keys(&self) -> Keys<'_, String, JsonValue> {
        self.members.keys()
    }

    pub fn values(&self) -> Values<'_, String, JsonValue> {
        self.members.values()
    }

    /// An independent copy of the keys, in order.
    pub fn keys_copy(&self) -> Vec<String> {
        self.members.keys().cloned().collect()
    }

    /// An independent deep copy of the values, in key order.
    pub fn values_copy(&self) -> Vec<JsonValue> {
        self.members.values().cloned().collect()
    }

    /// Deep copy. Changes to the copy never show up in `self`.
    pub fn get_clone(&self) -> JsonObject {
        self.clone()
    }
}

impl PartialEq for JsonObject {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
    }
}

impl<K: Into<String>, V: Into<JsonValue>> FromIterator<(K, V)> for JsonObject {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut obj = JsonObject::new();
        obj.extend(iter);
        obj
    }
}

impl<K: Into<String>, V: Into<JsonValue>> Extend<(K, V)> for JsonObject {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for JsonObject {
    type Item = (String, JsonValue);
    type IntoIter = IntoIter<String, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonObject {
    type Item = (&'a String, &'a JsonValue);
    type IntoIter = Iter<'a, String, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl core::fmt::Display for JsonObject {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&crate::writer::object_to_string(self))
    }
}
