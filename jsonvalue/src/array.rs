// SPDX-License-Identifier: Apache-2.0

use core::ops::RangeBounds;

use crate::value::JsonValue;

/// An index past the end of a [`JsonArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

impl core::fmt::Display for IndexOutOfBounds {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "index {} out of bounds for length {}", self.index, self.len)
    }
}

impl std::error::Error for IndexOutOfBounds {}

/// A JSON array. Element order is insertion order.
///
/// Like [`JsonObject`](crate::JsonObject), mutation needs `&mut self` and
/// there is no internal locking.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonArray {
    values: Vec<JsonValue>,
}

impl JsonArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Append a value.
    pub fn add(&mut self, value: impl Into<JsonValue>) -> &mut Self {
        self.values.push(value.into());
        self
    }

    pub fn add_null(&mut self) -> &mut Self {
        self.add(JsonValue::Null)
    }

    pub fn add_bool(&mut self, value: bool) -> &mut Self {
        self.add(value)
    }

    pub fn add_i64(&mut self, value: i64) -> &mut Self {
        self.add(value)
    }

    /// Non-finite values are stored as `null`.
    pub fn add_f64(&mut self, value: f64) -> &mut Self {
        self.add(value)
    }

    pub fn add_str(&mut self, value: impl Into<String>) -> &mut Self {
        self.add(JsonValue::Str(value.into()))
    }

    pub fn add_value(&mut self, value: &JsonValue) -> &mut Self {
        self.add(value.get_clone())
    }

    /// Insert at `index`, shifting later elements right. `index == len` appends.
    pub fn insert(&mut self, index: usize, value: impl Into<JsonValue>) -> Result<(), IndexOutOfBounds> {
        if index > self.values.len() {
            return Err(IndexOutOfBounds {
                index,
                len: self.values.len(),
            });
        }
        self.values.insert(index, value.into());
        Ok(())
    }

    /// Replace the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: impl Into<JsonValue>) -> Result<JsonValue, IndexOutOfBounds> {
        let len = self.values.len();
        match self.values.get_mut(index) {
            Some(slot) => Ok(core::mem::replace(slot, value.into())),
            None => Err(IndexOutOfBounds { index, len }),
        }
    }

    /// Remove and return the element at `index`, shifting later elements left.
    pub fn remove(&mut self, index: usize) -> Option<JsonValue> {
        (index < self.values.len()).then(|| self.values.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&JsonValue> {
        self.values.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut JsonValue> {
        self.values.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> core::slice::Iter<'_, JsonValue> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, JsonValue> {
        self.values.iter_mut()
    }

    pub fn as_slice(&self) -> &[JsonValue] {
        &self.values
    }

    /// An independent deep copy of the elements.
    pub fn values_copy(&self) -> Vec<JsonValue> {
        self.values.clone()
    }

    /// A snapshot of the elements in `range`.
    ///
    /// The result is a separate array: removing or replacing elements of
    /// `self` afterwards does not change it, and changing it does not touch
    /// `self`. Returns `None` if the range is out of bounds or reversed.
    ///
    /// ```
    /// use jsonvalue::JsonArray;
    /// let mut numbers: JsonArray = (1..=10).collect();
    /// let sub = numbers.sub_array(1..5).unwrap();
    /// assert_eq!(sub.to_string(), "[2,3,4,5]");
    /// numbers.remove(1);
    /// assert_eq!(sub.to_string(), "[2,3,4,5]");
    /// ```
    pub fn sub_array(&self, range: impl RangeBounds<usize>) -> Option<JsonArray> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.values.get(bounds).map(|slice| JsonArray {
            values: slice.to_vec(),
        })
    }

    /// Deep copy. Changes to the copy never show up in `self`.
    pub fn get_clone(&self) -> JsonArray {
        self.clone()
    }

    pub fn into_vec(self) -> Vec<JsonValue> {
        self.values
    }
}

impl From<Vec<JsonValue>> for JsonArray {
    fn from(values: Vec<JsonValue>) -> Self {
        Self { values }
    }
}

impl<V: Into<JsonValue>> FromIterator<V> for JsonArray {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<V: Into<JsonValue>> Extend<V> for JsonArray {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        self.values.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for JsonArray {
    type Item = JsonValue;
    type IntoIter = std::vec::IntoIter<JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a JsonArray {
    type Item = &'a JsonValue;
    type IntoIter = core::slice::Iter<'a, JsonValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl core::fmt::Display for JsonArray {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&crate::writer::array_to_string(self))
    }
}
