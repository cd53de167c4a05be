//
//  atlassian-cloud
//  api/jira/dashboards.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jira dashboard operations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{JiraApi, VALUES};
use crate::api::client::Call;
use crate::api::common::{ApiError, OffsetPagination, Paginator, Params, Payload};
use crate::api::transport::Transport;

/// Query for [`JiraApi::search_dashboards`].
///
/// Defaults to active dashboards only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSearch {
    pub dashboard_name: Option<String>,
    pub account_id: Option<String>,
    pub groupname: Option<String>,
    pub group_id: Option<String>,
    pub project_id: Option<String>,
    pub order_by: Option<String>,
    /// `active`, `archived` or `deleted`
    pub status: Option<String>,
    pub expand: Option<String>,
    pub start_at: Option<u64>,
    pub max_results: Option<u64>,
}

impl Default for DashboardSearch {
    fn default() -> Self {
        Self {
            dashboard_name: None,
            account_id: None,
            groupname: None,
            group_id: None,
            project_id: None,
            order_by: None,
            status: Some("active".to_string()),
            expand: None,
            start_at: None,
            max_results: None,
        }
    }
}

/// New content for a dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUpdate {
    pub name: String,
    pub description: Option<String>,
    pub share_permissions: Option<Vec<Value>>,
    pub edit_permissions: Option<Vec<Value>>,
}

impl<T: Transport> JiraApi<T> {
    /// Lists all dashboards visible to the user.
    ///
    /// # Parameters
    ///
    /// * `filter` - `favourite` or `my`; `None` lists every visible dashboard
    /// * `start_at` - Offset of the first dashboard
    /// * `max_results` - Page size, also the cap on the number of dashboards
    ///
    /// # Returns
    ///
    /// A [`Paginator`] over the `dashboards` array of each page. Nothing is
    /// requested until the first item is pulled.
    pub fn dashboards(
        &self,
        filter: Option<&str>,
        start_at: Option<u64>,
        max_results: Option<u64>,
    ) -> Paginator<'_, T, OffsetPagination> {
        let call = Call::get("dashboard").params(
            Params::new()
                .with("filter", filter)
                .with("startAt", start_at)
                .with("maxResults", max_results),
        );
        self.connector.paginate_offset(call, "dashboards")
    }

    /// Searches dashboards, page by page.
    pub fn search_dashboards(
        &self,
        search: &DashboardSearch,
    ) -> Result<Paginator<'_, T, OffsetPagination>, ApiError> {
        let call = Call::get("dashboard/search").params(Params::from_serializable(search)?);
        Ok(self.connector.paginate_offset(call, VALUES))
    }

    /// Replaces a dashboard's name, description and permissions.
    ///
    /// # Returns
    ///
    /// The updated dashboard, or `None` when Jira rejected the update (the
    /// response has been logged).
    ///
    /// # Errors
    ///
    /// Transport failures, and [`ApiError::Serialization`] when `update`
    /// cannot be encoded.
    pub async fn update_dashboard(
        &self,
        id: &str,
        update: &DashboardUpdate,
    ) -> Result<Option<Payload>, ApiError> {
        let call = Call::put(format!("dashboard/{}", id)).json(serde_json::to_value(update)?);
        self.connector.fetch(&call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::jira::test_support::jira;
    use crate::api::testing::json_response;
    use serde_json::json;

    #[tokio::test]
    async fn test_dashboards_read_dashboards_key_and_honor_cap() {
        let jira = jira(vec![
            json_response(
                200,
                json!({"startAt": 0, "maxResults": 2, "total": 10, "dashboards": [{"id": "1"}, {"id": "2"}]}),
            ),
            json_response(
                200,
                json!({"startAt": 2, "maxResults": 1, "total": 10, "dashboards": [{"id": "3"}]}),
            ),
        ]);

        let dashboards = jira.dashboards(Some("my"), None, Some(3)).collect_all().await.unwrap();
        assert_eq!(dashboards.len(), 3);

        let transport = jira.connector().transport();
        assert_eq!(transport.requests().len(), 2);
        assert_eq!(transport.query_value(0, "filter").as_deref(), Some("my"));
        assert_eq!(transport.query_value(1, "startAt").as_deref(), Some("2"));
        assert_eq!(transport.query_value(1, "maxResults").as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn test_search_dashboards_defaults_to_active() {
        let jira = jira(vec![json_response(
            200,
            json!({"startAt": 0, "maxResults": 50, "total": 0, "values": []}),
        )]);

        let found = jira
            .search_dashboards(&DashboardSearch::default())
            .unwrap()
            .collect_all()
            .await
            .unwrap();
        assert!(found.is_empty());
        assert_eq!(
            jira.connector().transport().query_value(0, "status").as_deref(),
            Some("active")
        );
    }

    #[tokio::test]
    async fn test_update_dashboard_puts_without_nulls() {
        let jira = jira(vec![json_response(200, json!({"id": "10100"}))]);
        let update = DashboardUpdate {
            name: "Team board".into(),
            share_permissions: Some(vec![json!({"type": "global"})]),
            ..Default::default()
        };

        assert!(jira.update_dashboard("10100", &update).await.unwrap().is_some());
        let request = &jira.connector().transport().requests()[0];
        assert_eq!(request.url, "https://example.atlassian.net/rest/api/3/dashboard/10100");
        assert_eq!(
            request.body,
            Some(json!({"name": "Team board", "sharePermissions": [{"type": "global"}]}))
        );
    }
}
