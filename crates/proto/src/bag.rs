// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Property bag: the generic payload container behind every message.
//!
//! An insertion-ordered map from string keys to string- or byte-encoded
//! values. Typed accessors layer on top with lenient defaults: reading an
//! absent (or unparseable) key yields the type's zero value instead of an
//! error, and setting a nullable value to `None` removes the key rather
//! than storing a sentinel. Absence is therefore always distinguishable
//! from an explicit empty value on the wire.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A single property value.
///
/// Scalars (bool, long, int) are stored in their canonical text form;
/// byte arrays are stored raw so large activity payloads are not inflated
/// by a text encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    /// String-encoded value.
    Text(String),
    /// Raw binary value.
    Blob(Vec<u8>),
}

/// Insertion-ordered property map. Keys are unique; serialization order is
/// insertion order, so encoding is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    entries: IndexMap<String, PropertyValue>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self { entries: IndexMap::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Raw lookup. `None` means the key is not set.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    /// Raw insert: overwrites in place if present, else appends.
    pub fn set(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        // shift_remove keeps the remaining insertion order stable
        self.entries.shift_remove(key)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ---- typed accessors ----

    /// String property. Absent or binary-valued keys read as `None`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(PropertyValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Set or clear a string property. `None` removes the key.
    pub fn set_str(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(v) => self.set(key, PropertyValue::Text(v.to_string())),
            None => {
                self.remove(key);
            }
        }
    }

    /// Boolean property; absent or unparseable reads as `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        self.get_str(key).map(|s| s == "true").unwrap_or(false)
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.set(key, PropertyValue::Text(value.to_string()));
    }

    /// 64-bit integer property; absent or unparseable reads as `0`.
    pub fn get_long(&self, key: &str) -> i64 {
        self.get_str(key).and_then(|s| s.parse().ok()).unwrap_or(0)
    }

    pub fn set_long(&mut self, key: &str, value: i64) {
        self.set(key, PropertyValue::Text(value.to_string()));
    }

    /// 32-bit integer property; absent or unparseable reads as `0`.
    pub fn get_int(&self, key: &str) -> i32 {
        self.get_str(key).and_then(|s| s.parse().ok()).unwrap_or(0)
    }

    pub fn set_int(&mut self, key: &str, value: i32) {
        self.set(key, PropertyValue::Text(value.to_string()));
    }

    /// Byte-array property. Absent or text-valued keys read as `None`.
    pub fn get_bytes(&self, key: &str) -> Option<&[u8]> {
        match self.entries.get(key) {
            Some(PropertyValue::Blob(b)) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// Set or clear a byte-array property. `None` removes the key.
    pub fn set_bytes(&mut self, key: &str, value: Option<&[u8]>) {
        match value {
            Some(v) => self.set(key, PropertyValue::Blob(v.to_vec())),
            None => {
                self.remove(key);
            }
        }
    }

    /// Structured property serialized as JSON text. Absent or malformed
    /// values read as `None`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_str(key).and_then(|s| serde_json::from_str(s).ok())
    }

    /// Set or clear a structured property. `None` removes the key.
    pub fn set_json<T: Serialize>(&mut self, key: &str, value: Option<&T>) {
        match value.and_then(|v| serde_json::to_string(v).ok()) {
            Some(json) => self.set(key, PropertyValue::Text(json)),
            None => {
                self.remove(key);
            }
        }
    }
}

#[cfg(test)]
#[path = "bag_tests.rs"]
mod tests;
