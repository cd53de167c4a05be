//
//  atlassian-cloud
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Transport Adapter
//!
//! The connector never talks to the network directly. It hands a fully built
//! [`RequestDescriptor`] and the current [`Credentials`] to a [`Transport`],
//! which performs exactly one HTTP exchange and returns the raw status,
//! headers and body.
//!
//! [`HttpTransport`] is the production implementation on top of `reqwest`.
//! Tests substitute their own implementation to script responses.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;

use crate::api::common::ApiError;
use crate::auth::Credentials;

/// Default request timeout for [`HttpTransport`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A fully resolved outbound request.
///
/// Built fresh for every attempt by the connector and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including the endpoint prefix
    pub url: String,
    /// Query parameters, nulls already removed
    pub query: Vec<(String, String)>,
    /// JSON body, nulls already removed
    pub body: Option<Value>,
    /// Request headers
    pub headers: BTreeMap<String, String>,
}

impl RequestDescriptor {
    /// Returns the body as compact JSON text, for diagnostics.
    pub fn body_text(&self) -> Option<String> {
        self.body.as_ref().map(Value::to_string)
    }
}

/// The raw result of one HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers (lower-case names)
    pub headers: BTreeMap<String, String>,
    /// Undecoded body bytes
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Creates a response with no headers.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Performs single HTTP exchanges on behalf of the connector.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` with Basic authentication from `credentials`.
    ///
    /// Only transport-level failures are errors; any HTTP status, including
    /// 4xx and 5xx, is returned as a [`RawResponse`].
    async fn send(
        &self,
        request: &RequestDescriptor,
        credentials: &Credentials,
    ) -> Result<RawResponse, ApiError>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Creates a transport with the default timeout.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a transport with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("atl/{}", crate::VERSION))
                .timeout(timeout)
                .build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        request: &RequestDescriptor,
        credentials: &Credentials,
    ) -> Result<RawResponse, ApiError> {
        let mut builder = self
            .http
            .request(request.method.clone(), &request.url)
            .query(&request.query);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }
        builder = credentials.apply_to_request(builder);

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
