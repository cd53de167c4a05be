//
//  atlassian-cloud
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Response interpretation.
//!
//! Every response is classified against the status code the operation
//! expects. Unexpected statuses are not errors: they are logged with the full
//! request/response context and reported as [`Outcome::Absent`]. Callers must
//! check for absence.

use std::collections::BTreeMap;

use tracing::{error, warn};

use crate::api::common::Payload;
use crate::api::transport::{RawResponse, RequestDescriptor};

/// The status code and body an operation expects on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectation {
    /// Expected HTTP status
    pub status: u16,
    /// Whether a JSON body should be decoded
    pub body: bool,
}

impl Default for Expectation {
    /// `200 OK` with a JSON body.
    fn default() -> Self {
        Self {
            status: 200,
            body: true,
        }
    }
}

impl Expectation {
    /// Expects `status`; a `204` never carries a body.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: status != 204,
        }
    }
}

/// Diagnostic record for a response with an unexpected status.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub method: String,
    pub url: String,
    pub request_body: Option<String>,
}

impl Failure {
    /// Extracts a human-readable message from the error body.
    ///
    /// Atlassian APIs report errors in a few shapes:
    ///
    /// - Jira: `{"errorMessages": ["..."], "errors": {"field": "..."}}`
    /// - Transient outages: `{"errorMessage": "..."}`
    /// - Confluence: `{"message": "..."}` or `{"errors": [{"title": "..."}]}`
    ///
    /// Falls back to the raw body with the status code.
    pub fn message(&self) -> String {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&self.body) {
            if let Some(message) = json
                .get("errorMessages")
                .and_then(|m| m.as_array())
                .and_then(|arr| arr.first())
                .and_then(|m| m.as_str())
            {
                return message.to_string();
            }

            if let Some(message) = json
                .get("errors")
                .and_then(|e| e.as_object())
                .and_then(|errors| errors.values().next())
                .and_then(|m| m.as_str())
            {
                return message.to_string();
            }

            if let Some(message) = json
                .get("errors")
                .and_then(|e| e.as_array())
                .and_then(|arr| arr.first())
                .and_then(|e| e.get("title"))
                .and_then(|m| m.as_str())
            {
                return message.to_string();
            }

            for key in ["errorMessage", "message"] {
                if let Some(message) = json.get(key).and_then(|m| m.as_str()) {
                    return message.to_string();
                }
            }
        }

        format!("API error ({}): {}", self.status, self.body)
    }
}

/// The result of interpreting one response.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Expected status, JSON body decoded.
    Decoded(Payload),
    /// Expected status, no body expected.
    Accepted,
    /// Unexpected status; the diagnostic has been logged.
    Absent(Failure),
    /// Expected status but the body could not be decoded; the raw response
    /// is handed back unchanged.
    Raw(RawResponse),
}

impl Outcome {
    /// Returns the decoded payload, if any.
    pub fn into_payload(self) -> Option<Payload> {
        match self {
            Self::Decoded(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Self::Decoded(payload) => Some(payload),
            _ => None,
        }
    }

    /// Returns `true` when the status matched the expectation.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Decoded(_) | Self::Accepted)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent(_))
    }
}

/// Classifies `response` against `expect`.
///
/// - matching status, body expected: decode JSON into [`Outcome::Decoded`]
/// - matching status, no body expected: [`Outcome::Accepted`], nothing decoded
/// - any other status: log and return [`Outcome::Absent`]
/// - undecodable body: log and return [`Outcome::Raw`]
pub fn interpret(response: RawResponse, request: &RequestDescriptor, expect: Expectation) -> Outcome {
    if response.status != expect.status {
        let failure = Failure {
            status: response.status,
            headers: response.headers.clone(),
            body: response.text().into_owned(),
            method: request.method.to_string(),
            url: request.url.clone(),
            request_body: request.body_text(),
        };
        warn!(
            status = failure.status,
            headers = ?failure.headers,
            content = %failure.body,
            method = %failure.method,
            url = %failure.url,
            request_body = failure.request_body.as_deref().unwrap_or(""),
            "API error"
        );
        return Outcome::Absent(failure);
    }

    if !expect.body || expect.status == 204 {
        return Outcome::Accepted;
    }

    match Payload::from_slice(&response.body) {
        Ok(payload) => Outcome::Decoded(payload),
        Err(e) => {
            error!(error = %e, url = %request.url, "Could not decode response body");
            Outcome::Raw(response)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;
    use serde_json::json;

    fn request() -> RequestDescriptor {
        RequestDescriptor {
            method: Method::PUT,
            url: "https://example.atlassian.net/rest/api/3/filter/10000/owner".to_string(),
            query: Vec::new(),
            body: Some(json!({"accountId": "abc"})),
            headers: BTreeMap::new(),
        }
    }

    #[test]
    fn test_decodes_expected_status() {
        let outcome = interpret(
            RawResponse::new(200, r#"{"id": "10000"}"#),
            &request(),
            Expectation::default(),
        );
        assert_eq!(outcome.into_payload().and_then(|p| p.id()), Some("10000".to_string()));
    }

    #[test]
    fn test_no_content_never_decodes() {
        let outcome = interpret(RawResponse::new(204, "not json"), &request(), Expectation::status(204));
        assert_eq!(outcome, Outcome::Accepted);

        let outcome = interpret(
            RawResponse::new(200, "not json"),
            &request(),
            Expectation { status: 200, body: false },
        );
        assert_eq!(outcome, Outcome::Accepted);
    }

    #[test]
    fn test_mismatch_is_absent_with_request_echo() {
        let outcome = interpret(
            RawResponse::new(400, r#"{"errorMessages": ["bad"]}"#),
            &request(),
            Expectation::status(204),
        );
        match outcome {
            Outcome::Absent(failure) => {
                assert_eq!(failure.status, 400);
                assert_eq!(failure.method, "PUT");
                assert_eq!(failure.request_body.as_deref(), Some(r#"{"accountId":"abc"}"#));
                assert!(failure.body.contains("bad"));
            }
            other => panic!("expected Absent, got {:?}", other),
        }
    }

    #[test]
    fn test_failure_message_shapes() {
        let failure = |status: u16, body: &str| Failure {
            status,
            headers: BTreeMap::new(),
            body: body.to_string(),
            method: "GET".to_string(),
            url: "https://example.atlassian.net/rest/api/3/filter/1".to_string(),
            request_body: None,
        };

        assert_eq!(
            failure(404, r#"{"errorMessages": ["The filter does not exist."], "errors": {}}"#).message(),
            "The filter does not exist."
        );
        assert_eq!(
            failure(400, r#"{"errorMessages": [], "errors": {"jql": "Bad JQL"}}"#).message(),
            "Bad JQL"
        );
        assert_eq!(
            failure(400, r#"{"errors": [{"status": 400, "title": "Invalid title"}]}"#).message(),
            "Invalid title"
        );
        assert_eq!(
            failure(401, r#"{"errorMessage": "Site temporarily unavailable"}"#).message(),
            "Site temporarily unavailable"
        );
        assert_eq!(failure(502, "Bad Gateway").message(), "API error (502): Bad Gateway");
    }

    #[test]
    fn test_undecodable_body_returns_raw() {
        let outcome = interpret(RawResponse::new(200, "<html>"), &request(), Expectation::default());
        assert!(matches!(outcome, Outcome::Raw(ref raw) if raw.status == 200));
        assert!(!outcome.is_absent());
    }
}
