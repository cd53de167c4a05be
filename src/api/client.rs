//
//  atlassian-cloud
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Connector for Atlassian Cloud REST APIs
//!
//! This module provides the connector every Jira and Confluence operation goes
//! through. It owns the connection context and turns a logical [`Call`] into
//! one (or, with retrying, a few) HTTP exchanges.
//!
//! ## Features
//!
//! - Base URL normalization and re-configuration
//! - Per-API endpoint-version table (`rest/api/3/`, `wiki/api/v2/`, ...)
//! - Basic authentication with replaceable credentials
//! - Null stripping for query parameters and request bodies
//! - Opt-in retry on transient "site unavailable" responses
//! - Fail-soft response interpretation (see [`Outcome`])

use std::collections::{BTreeMap, HashMap};

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::common::{
    strip_nulls, ApiError, CursorPagination, EndpointVersion, OffsetPagination, PageStrategy,
    Paginator, Params, Payload,
};
use crate::api::response::{interpret, Expectation, Outcome};
use crate::api::retry::RetryPolicy;
use crate::api::transport::{HttpTransport, RequestDescriptor, Transport};
use crate::auth::Credentials;

/// Maps endpoint versions to URL path prefixes for one API.
///
/// # Example
///
/// ```rust
/// use atlassian_cloud::api::EndpointTable;
/// use atlassian_cloud::api::common::EndpointVersion;
///
/// let table = EndpointTable::new(3)
///     .with(3, "rest/api/3/")
///     .with(2, "rest/api/2/")
///     .with("agile", "rest/agile/1.0/");
///
/// assert_eq!(table.resolve(None).unwrap(), "rest/api/3/");
/// assert_eq!(table.resolve(Some(&EndpointVersion::from("agile"))).unwrap(), "rest/agile/1.0/");
/// assert!(table.resolve(Some(&EndpointVersion::from(1))).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointTable {
    prefixes: HashMap<EndpointVersion, String>,
    default_version: EndpointVersion,
}

impl EndpointTable {
    /// Creates an empty table with the version used when a call names none.
    pub fn new(default_version: impl Into<EndpointVersion>) -> Self {
        Self {
            prefixes: HashMap::new(),
            default_version: default_version.into(),
        }
    }

    /// Registers a prefix. A missing trailing `/` is added.
    pub fn with(mut self, version: impl Into<EndpointVersion>, prefix: &str) -> Self {
        let prefix = prefix.trim_start_matches('/');
        let prefix = if prefix.ends_with('/') {
            prefix.to_string()
        } else {
            format!("{}/", prefix)
        };
        self.prefixes.insert(version.into(), prefix);
        self
    }

    pub fn default_version(&self) -> &EndpointVersion {
        &self.default_version
    }

    /// Resolves `version`, or the default version when `None`.
    pub fn resolve(&self, version: Option<&EndpointVersion>) -> Result<&str, ApiError> {
        let version = version.unwrap_or(&self.default_version);
        self.prefixes
            .get(version)
            .map(String::as_str)
            .ok_or_else(|| ApiError::UnknownEndpointVersion(version.clone()))
    }
}

/// One logical API call, before it is resolved against a connector.
///
/// # Example
///
/// ```rust
/// use atlassian_cloud::api::{Call, common::Params};
/// use serde_json::json;
///
/// let call = Call::put("filter/10000/owner")
///     .json(json!({"accountId": "5b10ac8d82e05b22cc7d4ef5"}))
///     .expect(204);
///
/// let listing = Call::get("board")
///     .params(Params::new().with("maxResults", 50))
///     .version("agile");
/// # let _ = (call, listing);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// HTTP method
    pub method: Method,
    /// Path below the endpoint prefix (e.g. `filter/search`)
    pub path: String,
    /// Query parameters
    pub params: Params,
    /// Optional JSON body
    pub body: Option<Value>,
    /// Endpoint version; the table default when `None`
    pub version: Option<EndpointVersion>,
    /// Expected status and body
    pub expect: Expectation,
    /// Whether transient "site unavailable" responses are retried
    pub retry: bool,
}

impl Call {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Params::new(),
            body: None,
            version: None,
            expect: Expectation::default(),
            retry: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn version(mut self, version: impl Into<EndpointVersion>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Expects `status` instead of `200`. A `204` implies no body.
    pub fn expect(mut self, status: u16) -> Self {
        self.expect = Expectation::status(status);
        self
    }

    /// Treats a matching status as success without decoding the body.
    pub fn no_body(mut self) -> Self {
        self.expect.body = false;
        self
    }

    /// Retries transient "site unavailable" responses.
    pub fn retrying(mut self) -> Self {
        self.retry = true;
        self
    }
}

/// The shared request engine for one Atlassian API.
///
/// A connector holds the connection context: the site URL, the credentials,
/// the endpoint table and the retry policy. It is generic over the
/// [`Transport`] so tests can script responses.
///
/// # Creating a Connector
///
/// ```rust,no_run
/// use atlassian_cloud::api::{Call, Connector};
/// use atlassian_cloud::api::jira;
/// use atlassian_cloud::auth::Credentials;
///
/// # async fn example() -> anyhow::Result<()> {
/// let connector = Connector::new(
///     Credentials::new("me@example.com", "api-token"),
///     jira::endpoint_table(),
/// )?
/// .with_base_url("https://example.atlassian.net/");
///
/// if let Some(user) = connector.fetch(&Call::get("myself")).await? {
///     println!("{}", user.str_field("displayName").unwrap_or_default());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Connector<T = HttpTransport> {
    transport: T,
    base_url: Option<String>,
    credentials: Credentials,
    endpoints: EndpointTable,
    retry: RetryPolicy,
}

impl Connector<HttpTransport> {
    /// Creates a connector using the `reqwest` transport.
    pub fn new(credentials: Credentials, endpoints: EndpointTable) -> Result<Self, ApiError> {
        Ok(Self::with_transport(HttpTransport::new()?, credentials, endpoints))
    }
}

impl<T: Transport> Connector<T> {
    /// Creates a connector over a custom transport, without a base URL.
    pub fn with_transport(transport: T, credentials: Credentials, endpoints: EndpointTable) -> Self {
        Self {
            transport,
            base_url: None,
            credentials,
            endpoints,
            retry: RetryPolicy::default(),
        }
    }

    /// Sets the site URL, builder style.
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.configure_base(url);
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sets the site URL, stripping one trailing `/`.
    ///
    /// An empty URL leaves the connector unconfigured.
    pub fn configure_base(&mut self, url: &str) {
        let url = url.strip_suffix('/').unwrap_or(url);
        self.base_url = (!url.is_empty()).then(|| url.to_string());
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Replaces the credentials used by subsequent calls.
    pub fn reauthenticate(&mut self, username: &str, secret: &str) {
        self.credentials = Credentials::new(username, secret);
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn endpoints(&self) -> &EndpointTable {
        &self.endpoints
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolves `call` into a request.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotConfigured`] when no base URL is set
    /// - [`ApiError::UnknownEndpointVersion`] when the version has no prefix
    pub fn build_request(&self, call: &Call) -> Result<RequestDescriptor, ApiError> {
        let base = self.base_url.as_deref().ok_or(ApiError::NotConfigured)?;
        let prefix = self.endpoints.resolve(call.version.as_ref())?;

        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if call.method != Method::GET {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        Ok(RequestDescriptor {
            method: call.method.clone(),
            url: format!("{}/{}{}", base, prefix, call.path.trim_start_matches('/')),
            query: call.params.to_query(),
            body: call.body.clone().map(strip_nulls),
            headers,
        })
    }

    /// Sends `call` and interprets the response.
    ///
    /// Only configuration and transport failures are errors. Unexpected
    /// statuses come back as [`Outcome::Absent`].
    pub async fn execute(&self, call: &Call) -> Result<Outcome, ApiError> {
        let mut attempt = 1;
        loop {
            let request = self.build_request(call)?;
            debug!(method = %request.method, url = %request.url, attempt, "Sending request");

            let response = self.transport.send(&request, &self.credentials).await?;
            if call.retry && self.retry.should_retry(attempt, &response) {
                info!(
                    status = response.status,
                    attempt,
                    backoff = ?self.retry.backoff,
                    url = %request.url,
                    "Site temporarily unavailable, retrying"
                );
                tokio::time::sleep(self.retry.backoff).await;
                attempt += 1;
                continue;
            }

            return Ok(interpret(response, &request, call.expect));
        }
    }

    /// Sends `call` and returns the decoded payload, or `None` on a fail-soft failure.
    pub async fn fetch(&self, call: &Call) -> Result<Option<Payload>, ApiError> {
        Ok(self.execute(call).await?.into_payload())
    }

    /// Sends `call` and returns whether the expected status came back.
    pub async fn submit(&self, call: &Call) -> Result<bool, ApiError> {
        Ok(self.execute(call).await?.is_success())
    }

    /// Lists with any pagination strategy.
    pub fn paginate<S: PageStrategy>(&self, call: Call, strategy: S) -> Paginator<'_, T, S> {
        Paginator::new(self, call, strategy)
    }

    /// Lists with `startAt`/`maxResults`/`total` pagination.
    pub fn paginate_offset(&self, call: Call, results_key: &str) -> Paginator<'_, T, OffsetPagination> {
        self.paginate(call, OffsetPagination::new(results_key))
    }

    /// Lists with `_links.next` cursor pagination.
    pub fn paginate_cursor(&self, call: Call, results_key: &str) -> Paginator<'_, T, CursorPagination> {
        self.paginate(call, CursorPagination::new(results_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{json_response, ScriptedTransport};
    use crate::api::transport::RawResponse;
    use serde_json::json;
    use std::time::Duration;

    fn table() -> EndpointTable {
        EndpointTable::new(3)
            .with(3, "rest/api/3/")
            .with(2, "rest/api/2/")
            .with("agile", "rest/agile/1.0/")
    }

    fn connector(responses: Vec<RawResponse>) -> Connector<ScriptedTransport> {
        Connector::with_transport(
            ScriptedTransport::new(responses),
            Credentials::new("me@example.com", "token"),
            table(),
        )
        .with_base_url("https://example.atlassian.net/")
        .with_retry_policy(RetryPolicy::default().with_backoff(Duration::ZERO))
    }

    fn unavailable() -> RawResponse {
        RawResponse::new(401, r#"{"errorMessage": "Site temporarily unavailable"}"#)
    }

    #[test]
    fn test_configure_base_strips_one_slash() {
        let mut connector = connector(Vec::new());
        assert_eq!(connector.base_url(), Some("https://example.atlassian.net"));

        connector.configure_base("https://example.atlassian.net");
        assert_eq!(connector.base_url(), Some("https://example.atlassian.net"));

        connector.configure_base("https://other.atlassian.net/");
        connector.configure_base(&connector.base_url().unwrap().to_string());
        assert_eq!(connector.base_url(), Some("https://other.atlassian.net"));
    }

    #[test]
    fn test_build_request_headers_and_nulls() {
        let connector = connector(Vec::new());
        let call = Call::put("filter/10000")
            .params(Params::new().with("expand", None::<String>).with("overrideSharePermissions", false))
            .json(json!({"name": "Open bugs", "jql": null}));
        let request = connector.build_request(&call).unwrap();

        assert_eq!(request.url, "https://example.atlassian.net/rest/api/3/filter/10000");
        assert_eq!(
            request.query,
            vec![("overrideSharePermissions".to_string(), "false".to_string())]
        );
        assert_eq!(request.body, Some(json!({"name": "Open bugs"})));
        assert_eq!(request.headers.get("Accept").map(String::as_str), Some("application/json"));
        assert_eq!(
            request.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );

        let request = connector.build_request(&Call::get("myself")).unwrap();
        assert!(!request.headers.contains_key("Content-Type"));
    }

    #[test]
    fn test_named_version_prefix() {
        let connector = connector(Vec::new());
        let request = connector.build_request(&Call::get("board").version("agile")).unwrap();
        assert_eq!(request.url, "https://example.atlassian.net/rest/agile/1.0/board");
    }

    #[tokio::test]
    async fn test_unconfigured_fails_before_sending() {
        let connector = Connector::with_transport(
            ScriptedTransport::new(vec![json_response(200, json!({}))]),
            Credentials::new("me@example.com", "token"),
            table(),
        );
        let err = connector.execute(&Call::get("myself")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotConfigured));
        assert!(connector.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_version_fails_before_sending() {
        let connector = connector(vec![json_response(200, json!({}))]);
        let err = connector
            .execute(&Call::get("myself").version(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::UnknownEndpointVersion(EndpointVersion::Numbered(1))));
        assert!(connector.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_five_attempts() {
        let connector = connector((0..6).map(|_| unavailable()).collect());
        let outcome = connector.execute(&Call::get("user").retrying()).await.unwrap();

        assert!(outcome.is_absent());
        assert_eq!(connector.transport().requests().len(), 5);
    }

    #[tokio::test]
    async fn test_retry_returns_fifth_success() {
        let mut responses: Vec<_> = (0..4).map(|_| unavailable()).collect();
        responses.push(json_response(200, json!({"accountId": "abc"})));
        let connector = connector(responses);

        let user = connector.fetch(&Call::get("user").retrying()).await.unwrap();
        assert_eq!(user.and_then(|u| u.str_field("accountId").map(str::to_string)), Some("abc".to_string()));
        assert_eq!(connector.transport().requests().len(), 5);
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let connector = connector(vec![
            json_response(500, json!({"errorMessage": "Site temporarily unavailable"})),
            json_response(200, json!({})),
        ]);
        let outcome = connector.execute(&Call::get("user").retrying()).await.unwrap();

        assert!(outcome.is_absent());
        assert_eq!(connector.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_transient_signature_without_opt_in_is_not_retried() {
        let connector = connector(vec![unavailable(), json_response(200, json!({}))]);
        assert!(connector.execute(&Call::get("filter/my")).await.unwrap().is_absent());
        assert_eq!(connector.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_reauthenticate_applies_to_next_call() {
        let mut connector = connector(vec![json_response(200, json!({}))]);
        connector.reauthenticate("other@example.com", "new-token");
        connector.fetch(&Call::get("myself")).await.unwrap();

        assert_eq!(
            connector.transport().usernames(),
            vec!["other@example.com".to_string()]
        );
    }
}
