//
//  atlassian-cloud
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for Jira and Confluence
//!
//! This module provides shared types used by both the Jira Cloud and Confluence
//! Cloud bindings. It includes the error taxonomy, the decoded payload type,
//! query parameter handling, and the pagination machinery.
//!
//! # Overview
//!
//! - [`ApiError`] - Errors that must reach the caller (configuration, transport,
//!   protocol violations)
//! - [`EndpointVersion`] - Key into a per-API endpoint table
//! - [`Payload`] - Decoded JSON with typed optional-field accessors
//! - [`Params`] - Query parameters with null stripping
//! - Pagination types (re-exported from the [`pagination`] submodule)
//!
//! # Error Tiers
//!
//! Not every failure is an [`ApiError`]. An unexpected status code is logged and
//! surfaced as [`Outcome::Absent`](crate::api::Outcome::Absent) instead, so
//! callers can tell "nothing came back" apart from "the call could not be made".
//!
//! ```rust
//! use atlassian_cloud::api::common::ApiError;
//!
//! fn describe(err: &ApiError) -> &'static str {
//!     if err.is_configuration() {
//!         "fix the client setup"
//!     } else {
//!         "runtime failure"
//!     }
//! }
//!
//! assert_eq!(describe(&ApiError::NotConfigured), "fix the client setup");
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

mod pagination;
mod params;
mod payload;

pub use pagination::*;
pub use params::*;
pub use payload::*;

/// Errors raised by the request engine.
///
/// # Variants
///
/// | Variant | Tier | Raised when |
/// |---------|------|-------------|
/// | `NotConfigured` | configuration | a call runs before a base URL is set |
/// | `UnknownEndpointVersion` | configuration | the version is not in the endpoint table |
/// | `MissingIdentifier` | configuration | a required "name or id" argument is empty |
/// | `CursorNotFound` | protocol violation | a continuation link carries no `cursor` |
/// | `Transport` | transport | the HTTP request could not be completed |
/// | `Serialization` | transport | a request body could not be encoded |
///
/// Configuration errors are raised before any network attempt and are never
/// retried.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No base URL has been configured for the connector.
    #[error("No site URL configured. Set one at construction or with configure_base()")]
    NotConfigured,

    /// The requested endpoint version has no entry in the endpoint table.
    #[error("Unknown endpoint version: {0}")]
    UnknownEndpointVersion(EndpointVersion),

    /// A required identifier (one of several mutually exclusive ones) was not supplied.
    #[error("Missing identifier: {0}")]
    MissingIdentifier(&'static str),

    /// A cursor-paginated response carried a continuation link without a cursor.
    #[error("Cursor not found in continuation link: {link}")]
    CursorNotFound {
        /// The offending continuation link
        link: String,
    },

    /// A network-level error occurred during the request.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A request body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns `true` for errors caused by how the client was set up or called.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::NotConfigured | Self::UnknownEndpointVersion(_) | Self::MissingIdentifier(_)
        )
    }
}

/// Identifies one generation of an API inside an endpoint table.
///
/// Atlassian products serve several API generations side by side, some
/// numbered (`rest/api/3/`) and some named (`rest/agile/1.0/`).
///
/// # Example
///
/// ```rust
/// use atlassian_cloud::api::common::EndpointVersion;
///
/// assert_eq!(EndpointVersion::from(3), EndpointVersion::Numbered(3));
/// assert_eq!(EndpointVersion::from("agile"), EndpointVersion::Named("agile".to_string()));
/// assert_eq!("2".parse::<EndpointVersion>().unwrap(), EndpointVersion::Numbered(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EndpointVersion {
    /// A numbered API version such as `3`
    Numbered(u32),
    /// A named API family such as `agile`
    Named(String),
}

impl From<u32> for EndpointVersion {
    fn from(version: u32) -> Self {
        Self::Numbered(version)
    }
}

impl From<&str> for EndpointVersion {
    fn from(version: &str) -> Self {
        match version.parse::<u32>() {
            Ok(number) => Self::Numbered(number),
            Err(_) => Self::Named(version.to_string()),
        }
    }
}

impl From<String> for EndpointVersion {
    fn from(version: String) -> Self {
        Self::from(version.as_str())
    }
}

impl FromStr for EndpointVersion {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for EndpointVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numbered(number) => write!(f, "{}", number),
            Self::Named(name) => f.write_str(name),
        }
    }
}
