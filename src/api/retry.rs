//
//  atlassian-cloud
//  api/retry.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Retry policy for transient site outages.
//!
//! Atlassian Cloud sites that are waking up or being migrated answer with a
//! `401` or `404` whose body is exactly
//! `{"errorMessage": "Site temporarily unavailable"}`. Calls that opt into
//! retrying are repeated after a fixed backoff while that signature persists.
//! Every other failure goes straight to the response interpreter.

use std::time::Duration;

use serde_json::{json, Value};

use crate::api::transport::RawResponse;

/// Message carried by the transient "site unavailable" response.
pub const SITE_UNAVAILABLE_MESSAGE: &str = "Site temporarily unavailable";

/// Returns the exact body of a transient "site unavailable" response.
pub fn site_unavailable_marker() -> Value {
    json!({ "errorMessage": SITE_UNAVAILABLE_MESSAGE })
}

/// Bounded, fixed-backoff retry policy.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use atlassian_cloud::api::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts, 5);
/// assert_eq!(policy.backoff, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, the first one included
    pub max_attempts: u32,
    /// Pause between attempts
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Same attempt budget, different backoff.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns `true` if `response` carries the transient signature.
    pub fn is_transient(&self, response: &RawResponse) -> bool {
        matches!(response.status, 401 | 404)
            && serde_json::from_slice::<Value>(&response.body)
                .map(|body| body == site_unavailable_marker())
                .unwrap_or(false)
    }

    /// Decides whether attempt number `attempt` (1-based) should be repeated.
    pub fn should_retry(&self, attempt: u32, response: &RawResponse) -> bool {
        attempt < self.max_attempts && self.is_transient(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable(status: u16) -> RawResponse {
        RawResponse::new(status, r#"{"errorMessage":"Site temporarily unavailable"}"#)
    }

    #[test]
    fn test_signature_requires_status_and_exact_body() {
        let policy = RetryPolicy::default();
        assert!(policy.is_transient(&unavailable(401)));
        assert!(policy.is_transient(&unavailable(404)));
        assert!(!policy.is_transient(&unavailable(500)));
        assert!(!policy.is_transient(&RawResponse::new(
            404,
            r#"{"errorMessage":"Site temporarily unavailable","extra":1}"#
        )));
        assert!(!policy.is_transient(&RawResponse::new(401, "Unauthorized")));
    }

    #[test]
    fn test_attempt_budget() {
        let policy = RetryPolicy::default();
        assert!(policy.should_retry(4, &unavailable(401)));
        assert!(!policy.should_retry(5, &unavailable(401)));
    }
}
