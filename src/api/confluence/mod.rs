//
//  atlassian-cloud
//  api/confluence/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Confluence Cloud REST API operations.
//!
//! [`ConfluenceApi`] wraps a [`Connector`] configured with the Confluence
//! endpoint table. Most operations use the v2 API; moving content, listing
//! descendants and label lookups only exist in the v1 API.
//!
//! # Module Organization
//!
//! - [`pages`] - page listing, reading, writing and sorting
//! - [`content`] - v1 content moves and descendants
//! - [`labels`] - label lookup and labelled pages
//! - [`spaces`] - space listing
//!
//! # Endpoint Versions
//!
//! | Version | Prefix |
//! |---------|--------|
//! | `2` (default) | `wiki/api/v2/` |
//! | `1` | `wiki/rest/api/` |
//!
//! # Notes
//!
//! - Listings use cursor pagination with at most 250 items per page
//! - Query parameter names are kebab-case (`body-format`, `get-draft`)

pub mod content;
pub mod labels;
pub mod pages;
pub mod spaces;

pub use content::MovePosition;
pub use labels::LabelRef;
pub use pages::{BodyFormat, NewPage, PageBody, PageFetch, PageMove, PageQuery, PageUpdate, PageVersion, SortOrder};

use crate::api::client::{Connector, EndpointTable};
use crate::api::common::ApiError;
use crate::api::transport::{HttpTransport, Transport};
use crate::auth::Credentials;

/// Results key used by Confluence listings.
pub(crate) const RESULTS: &str = "results";

/// Version of the legacy v1 API.
pub(crate) const V1: u32 = 1;

/// Returns the Confluence endpoint table.
pub fn endpoint_table() -> EndpointTable {
    EndpointTable::new(2)
        .with(2, "wiki/api/v2/")
        .with(V1, "wiki/rest/api/")
}

/// Client for the Confluence Cloud REST APIs.
pub struct ConfluenceApi<T = HttpTransport> {
    connector: Connector<T>,
}

impl ConfluenceApi<HttpTransport> {
    /// Creates a Confluence client. Without `base_url`, call
    /// [`configure_base`](Self::configure_base) before the first operation.
    pub fn new(username: &str, token: &str, base_url: Option<&str>) -> Result<Self, ApiError> {
        let mut connector = Connector::new(Credentials::new(username, token), endpoint_table())?;
        if let Some(url) = base_url {
            connector.configure_base(url);
        }
        Ok(Self { connector })
    }
}

impl<T: Transport> ConfluenceApi<T> {
    /// Wraps an existing connector, which should use [`endpoint_table`].
    pub fn from_connector(connector: Connector<T>) -> Self {
        Self { connector }
    }

    pub fn connector(&self) -> &Connector<T> {
        &self.connector
    }

    pub fn connector_mut(&mut self) -> &mut Connector<T> {
        &mut self.connector
    }

    pub fn configure_base(&mut self, url: &str) {
        self.connector.configure_base(url);
    }

    pub fn reauthenticate(&mut self, username: &str, token: &str) {
        self.connector.reauthenticate(username, token);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use super::*;
    use crate::api::retry::RetryPolicy;
    use crate::api::testing::ScriptedTransport;
    use crate::api::transport::RawResponse;

    pub(crate) fn confluence(responses: Vec<RawResponse>) -> ConfluenceApi<ScriptedTransport> {
        ConfluenceApi::from_connector(
            Connector::with_transport(
                ScriptedTransport::new(responses),
                Credentials::new("me@example.com", "token"),
                endpoint_table(),
            )
            .with_base_url("https://example.atlassian.net/")
            .with_retry_policy(RetryPolicy::default().with_backoff(Duration::ZERO)),
        )
    }
}
