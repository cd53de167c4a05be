//
//  atlassian-cloud
//  api/common/payload.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Decoded JSON payloads.
//!
//! The bindings do not model the vendor schemas. Responses are decoded into a
//! [`Payload`], which keeps the JSON as-is and offers typed, optional accessors
//! for the few fields the engine (or a caller) needs to read.
//!
//! # Example
//!
//! ```rust
//! use atlassian_cloud::api::common::Payload;
//! use serde_json::json;
//!
//! let page = Payload::from(json!({
//!     "id": "98304",
//!     "title": "Release notes",
//!     "version": {"number": 4},
//!     "_links": {"next": "/wiki/api/v2/pages?cursor=abc"}
//! }));
//!
//! assert_eq!(page.str_field("title"), Some("Release notes"));
//! assert_eq!(page.u64_at("/version/number"), Some(4));
//! assert_eq!(page.str_at("/_links/next"), Some("/wiki/api/v2/pages?cursor=abc"));
//! assert_eq!(page.id(), Some("98304".to_string()));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A decoded JSON response body.
///
/// Objects keep their fields, arrays stay ordered. Accessors return `None`
/// when a field is missing or has a different JSON type, never panic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Value);

impl Payload {
    /// Wraps an already decoded JSON value.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Decodes a JSON document from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes).map(Self)
    }

    /// Borrows the underlying JSON value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the payload, returning the underlying JSON value.
    pub fn into_value(self) -> Value {
        self.0
    }

    /// Returns a top-level field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns a nested value addressed by a JSON pointer (`/a/b/0`).
    pub fn at(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    pub fn u64_field(&self, name: &str) -> Option<u64> {
        self.field(name).and_then(Value::as_u64)
    }

    pub fn bool_field(&self, name: &str) -> Option<bool> {
        self.field(name).and_then(Value::as_bool)
    }

    pub fn array_field(&self, name: &str) -> Option<&[Value]> {
        self.field(name).and_then(Value::as_array).map(Vec::as_slice)
    }

    pub fn object_field(&self, name: &str) -> Option<&Map<String, Value>> {
        self.field(name).and_then(Value::as_object)
    }

    pub fn str_at(&self, pointer: &str) -> Option<&str> {
        self.at(pointer).and_then(Value::as_str)
    }

    pub fn u64_at(&self, pointer: &str) -> Option<u64> {
        self.at(pointer).and_then(Value::as_u64)
    }

    /// Returns the `id` field as a string.
    ///
    /// Atlassian APIs return identifiers either as JSON strings or numbers
    /// depending on the endpoint and `serialize-ids-as-strings`.
    pub fn id(&self) -> Option<String> {
        match self.field("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Returns the elements of an array field as individual payloads.
    ///
    /// A missing or non-array field yields an empty list.
    pub fn items(&self, name: &str) -> Vec<Payload> {
        self.array_field(name)
            .map(|values| values.iter().cloned().map(Payload).collect())
            .unwrap_or_default()
    }

    /// Returns an object field as its own payload.
    pub fn child(&self, name: &str) -> Option<Payload> {
        self.field(name).filter(|v| v.is_object()).cloned().map(Payload)
    }

    /// Renders the payload as indented JSON with sorted keys.
    pub fn pretty(&self) -> String {
        serde_json::to_string_pretty(&self.0).unwrap_or_else(|_| self.0.to_string())
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<Payload> for Value {
    fn from(payload: Payload) -> Self {
        payload.0
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_accessors_reject_wrong_types() {
        let payload = Payload::from(json!({"total": "97", "startAt": 0, "isLast": true}));
        assert_eq!(payload.u64_field("total"), None);
        assert_eq!(payload.u64_field("startAt"), Some(0));
        assert_eq!(payload.bool_field("isLast"), Some(true));
        assert_eq!(payload.str_field("missing"), None);
    }

    #[test]
    fn test_items_keeps_order() {
        let payload = Payload::from(json!({"values": [{"id": 1}, {"id": 2}, {"id": 3}]}));
        let ids: Vec<_> = payload.items("values").iter().filter_map(Payload::id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(payload.items("dashboards").is_empty());
    }

    #[test]
    fn test_child_requires_object() {
        let payload = Payload::from(json!({"page": {"results": []}, "size": 3}));
        assert!(payload.child("page").is_some());
        assert!(payload.child("size").is_none());
    }
}
