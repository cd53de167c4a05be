//
//  atlassian-cloud
//  api/jira/filters.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jira filter operations.
//!
//! Filters are saved JQL searches. They can be listed, searched, read,
//! updated and handed over to another owner.
//!
//! # Example
//!
//! ```rust,no_run
//! use atlassian_cloud::api::jira::{FilterSearch, JiraApi};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let jira = JiraApi::new("me@example.com", "api-token", Some("https://example.atlassian.net"))?;
//!
//! let search = FilterSearch {
//!     filter_name: Some("sprint".into()),
//!     expand: Some("owner,jql".into()),
//!     ..Default::default()
//! };
//! let filters = jira.search_filters(&search)?.collect_all().await?;
//!
//! for filter in &filters {
//!     let id = filter.id().unwrap_or_default();
//!     jira.set_filter_owner(&id, "5b10ac8d82e05b22cc7d4ef5").await?;
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{JiraApi, VALUES};
use crate::api::client::Call;
use crate::api::common::{ApiError, OffsetPagination, Paginator, Params, Payload};
use crate::api::transport::Transport;

/// Query for [`JiraApi::search_filters`].
///
/// All criteria are optional; unset ones are not sent. `max_results` caps the
/// number of filters produced, not just the page size.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSearch {
    /// Case-insensitive substring of the filter name.
    pub filter_name: Option<String>,
    /// Owner account id.
    pub account_id: Option<String>,
    /// Name of a group the filter is shared with.
    pub groupname: Option<String>,
    pub group_id: Option<String>,
    pub project_id: Option<String>,
    /// `description`, `favourite_count`, `id`, `is_favourite`, `name` or
    /// `owner`, optionally prefixed with `-` for descending order.
    pub order_by: Option<String>,
    /// Comma-separated list of extra fields (`description`, `jql`, `owner`, ...).
    pub expand: Option<String>,
    /// Return filters regardless of share permissions (admins only).
    pub override_share_permissions: bool,
    pub start_at: Option<u64>,
    pub max_results: Option<u64>,
}

/// New content for a filter, as sent by [`JiraApi::update_filter`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterUpdate {
    pub name: String,
    pub jql: Option<String>,
    pub description: Option<String>,
    pub favourite: Option<bool>,
    /// Raw share permission objects, passed through unchanged.
    pub share_permissions: Option<Vec<Value>>,
    pub edit_permissions: Option<Vec<Value>>,
}

impl<T: Transport> JiraApi<T> {
    /// Returns the filters owned by the authenticated user.
    ///
    /// # Parameters
    ///
    /// * `expand` - Comma-separated list of extra fields, e.g. `owner,jql`
    /// * `include_favourites` - Also return filters the user marked as favourite
    ///
    /// # Returns
    ///
    /// The JSON array of filters as one payload, unpaginated.
    pub async fn my_filters(
        &self,
        expand: Option<&str>,
        include_favourites: bool,
    ) -> Result<Option<Payload>, ApiError> {
        let call = Call::get("filter/my").params(
            Params::new()
                .with("expand", expand)
                .with("includeFavourites", include_favourites),
        );
        self.connector.fetch(&call).await
    }

    /// Searches filters, page by page.
    pub fn search_filters(
        &self,
        search: &FilterSearch,
    ) -> Result<Paginator<'_, T, OffsetPagination>, ApiError> {
        let call = Call::get("filter/search").params(Params::from_serializable(search)?);
        Ok(self.connector.paginate_offset(call, VALUES))
    }

    /// Returns one filter.
    pub async fn filter(&self, id: &str) -> Result<Option<Payload>, ApiError> {
        self.connector.fetch(&Call::get(format!("filter/{}", id))).await
    }

    /// Replaces a filter's name, JQL, description and permissions.
    ///
    /// Unset fields of `update` are left out of the request body.
    ///
    /// # Parameters
    ///
    /// * `id` - Filter id
    /// * `update` - New content for the filter
    /// * `expand` - Extra fields to include in the returned filter
    /// * `override_share_permissions` - Let an admin change permissions of a
    ///   filter they do not own
    ///
    /// # Returns
    ///
    /// The updated filter, or `None` when Jira did not answer `200 OK`.
    ///
    /// # Errors
    ///
    /// Transport failures, and [`ApiError::Serialization`] when `update`
    /// cannot be encoded.
    pub async fn update_filter(
        &self,
        id: &str,
        update: &FilterUpdate,
        expand: Option<&str>,
        override_share_permissions: bool,
    ) -> Result<Option<Payload>, ApiError> {
        let call = Call::put(format!("filter/{}", id))
            .params(
                Params::new()
                    .with("expand", expand)
                    .with("overrideSharePermissions", override_share_permissions),
            )
            .json(serde_json::to_value(update)?);
        self.connector.fetch(&call).await
    }

    /// Makes `account_id` the owner of a filter.
    ///
    /// Returns `true` once Jira acknowledges the change with `204 No Content`.
    pub async fn set_filter_owner(&self, id: &str, account_id: &str) -> Result<bool, ApiError> {
        let call = Call::put(format!("filter/{}/owner", id))
            .json(json!({ "accountId": account_id }))
            .expect(204);
        self.connector.submit(&call).await
    }
}
