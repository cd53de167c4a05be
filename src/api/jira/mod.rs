//
//  atlassian-cloud
//  api/jira/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jira Cloud REST API operations.
//!
//! [`JiraApi`] wraps a [`Connector`] configured with the Jira endpoint table
//! and exposes named operations grouped by resource:
//!
//! - [`users`] - user lookup
//! - [`filters`] - saved JQL filters
//! - [`dashboards`] - dashboards
//! - [`groups`] - group membership
//! - [`agile`] - boards and sprints (Jira Software)
//!
//! # Endpoint Versions
//!
//! | Version | Prefix |
//! |---------|--------|
//! | `3` (default) | `rest/api/3/` |
//! | `2` | `rest/api/2/` |
//! | `"agile"` | `rest/agile/1.0/` |
//!
//! # Example
//!
//! ```rust,no_run
//! use atlassian_cloud::api::jira::JiraApi;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let jira = JiraApi::new("me@example.com", "api-token", Some("https://example.atlassian.net"))?;
//!
//! if let Some(filters) = jira.my_filters(None, true).await? {
//!     println!("{}", filters.pretty());
//! }
//! # Ok(())
//! # }
//! ```

pub mod agile;
pub mod dashboards;
pub mod filters;
pub mod groups;
pub mod users;

pub use dashboards::{DashboardSearch, DashboardUpdate};
pub use filters::{FilterSearch, FilterUpdate};
pub use groups::GroupRef;

use crate::api::client::{Connector, EndpointTable};
use crate::api::common::ApiError;
use crate::api::transport::{HttpTransport, Transport};
use crate::auth::Credentials;

/// Results key used by most Jira listings.
pub(crate) const VALUES: &str = "values";

/// Returns the Jira endpoint table.
pub fn endpoint_table() -> EndpointTable {
    EndpointTable::new(3)
        .with(3, "rest/api/3/")
        .with(2, "rest/api/2/")
        .with("agile", "rest/agile/1.0/")
}

/// Client for the Jira Cloud REST APIs.
pub struct JiraApi<T = HttpTransport> {
    connector: Connector<T>,
}

impl JiraApi<HttpTransport> {
    /// Creates a Jira client. Without `base_url`, call
    /// [`configure_base`](Self::configure_base) before the first operation.
    pub fn new(username: &str, token: &str, base_url: Option<&str>) -> Result<Self, ApiError> {
        let mut connector = Connector::new(Credentials::new(username, token), endpoint_table())?;
        if let Some(url) = base_url {
            connector.configure_base(url);
        }
        Ok(Self { connector })
    }
}

impl<T: Transport> JiraApi<T> {
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

    /// Points the client at another site.
    pub fn configure_base(&mut self, url: &str) {
        self.connector.configure_base(url);
    }

    /// Replaces the credentials used by subsequent calls.
    pub fn reauthenticate(&mut self, username: &str, token: &str) {
        self.connector.reauthenticate(username, token);
    }
}
