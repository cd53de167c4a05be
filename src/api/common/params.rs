//
//  atlassian-cloud
//  api/common/params.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Query parameters for API calls.
//!
//! Parameters are collected as JSON values so optional arguments can be passed
//! straight through: a `None` becomes `null` and is dropped before the request
//! is sent.

use serde::Serialize;
use serde_json::{Map, Value};

use super::ApiError;

/// An ordered set of query parameters.
///
/// # Example
///
/// ```rust
/// use atlassian_cloud::api::common::Params;
///
/// let params = Params::new()
///     .with("accountId", "5b10ac8d82e05b22cc7d4ef5")
///     .with("expand", None::<String>)
///     .with("includeFavourites", false);
///
/// assert_eq!(
///     params.to_query(),
///     vec![
///         ("accountId".to_string(), "5b10ac8d82e05b22cc7d4ef5".to_string()),
///         ("includeFavourites".to_string(), "false".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds parameters from any serializable struct.
    ///
    /// The struct must serialize to a JSON object; field names are used as-is,
    /// so rename them with serde attributes to match the API.
    pub fn from_serializable<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(ApiError::Serialization(serde::ser::Error::custom(format!(
                "query parameters must serialize to an object, got {}",
                other
            )))),
        }
    }

    /// Adds a parameter, builder style.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets or replaces a parameter.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a parameter as an unsigned integer, treating `null` as absent.
    pub fn u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(Value::as_u64)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Value::is_null)
    }

    /// Renders the parameters as query pairs.
    ///
    /// - `null` values are dropped
    /// - arrays become one pair per element (`id=1&id=2`)
    /// - strings are sent verbatim, other scalars in their JSON form
    /// - nested objects are sent as compact JSON
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (key, value) in &self.0 {
            match value {
                Value::Null => {}
                Value::Array(items) => {
                    for item in items.iter().filter(|v| !v.is_null()) {
                        pairs.push((key.clone(), scalar_to_string(item)));
                    }
                }
                other => pairs.push((key.clone(), scalar_to_string(other))),
            }
        }
        pairs
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Drops top-level `null` fields from a request body.
///
/// Non-object bodies are returned unchanged.
pub fn strip_nulls(body: Value) -> Value {
    match body {
        Value::Object(map) => Value::Object(map.into_iter().filter(|(_, v)| !v.is_null()).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    #[serde(rename_all = "kebab-case")]
    struct PageQuery {
        title: Option<String>,
        body_format: &'static str,
        id: Vec<u64>,
    }

    #[test]
    fn test_from_serializable_renames_and_strips() {
        let params = Params::from_serializable(&PageQuery {
            title: None,
            body_format: "storage",
            id: vec![1, 2],
        })
        .unwrap();
        assert_eq!(
            params.to_query(),
            vec![
                ("body-format".to_string(), "storage".to_string()),
                ("id".to_string(), "1".to_string()),
                ("id".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_u64_ignores_null() {
        let params = Params::new().with("startAt", None::<u64>).with("maxResults", 50);
        assert_eq!(params.u64("startAt"), None);
        assert_eq!(params.u64("maxResults"), Some(50));
    }

    #[test]
    fn test_is_empty_with_only_nulls() {
        assert!(Params::new().with("expand", None::<String>).is_empty());
        assert!(!Params::new().with("expand", "groups").is_empty());
    }

    #[test]
    fn test_strip_nulls_top_level_only() {
        let body = strip_nulls(json!({"name": "Filter", "jql": null, "owner": {"id": null}}));
        assert_eq!(body, json!({"name": "Filter", "owner": {"id": null}}));
        assert_eq!(strip_nulls(json!([1, null])), json!([1, null]));
    }
}
