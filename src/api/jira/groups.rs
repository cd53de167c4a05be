//
//  atlassian-cloud
//  api/jira/groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jira group membership.
//!
//! Groups are addressed either by name or by id. Jira accepts both, but
//! recommends the id since group names can change.
//!
//! # Example
//!
//! ```rust,no_run
//! use atlassian_cloud::api::jira::{GroupRef, JiraApi};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let jira = JiraApi::new("me@example.com", "api-token", Some("https://example.atlassian.net"))?;
//! let group = GroupRef::name("jira-software-users");
//!
//! let mut members = jira.group_members(&group, false, None, None)?;
//! while let Some(member) = members.next().await? {
//!     println!("{}", member.str_field("displayName").unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;

use serde_json::json;

use super::{JiraApi, VALUES};
use crate::api::client::Call;
use crate::api::common::{ApiError, OffsetPagination, Paginator, Params, Payload};
use crate::api::transport::Transport;

/// A group, by name or by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupRef {
    Name(String),
    Id(String),
}

impl GroupRef {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Query parameters identifying the group.
    ///
    /// # Errors
    ///
    /// [`ApiError::MissingIdentifier`] when the name or id is blank.
    pub fn to_params(&self) -> Result<Params, ApiError> {
        match self {
            Self::Name(name) if !name.trim().is_empty() => Ok(Params::new().with("groupname", name.as_str())),
            Self::Id(id) if !id.trim().is_empty() => Ok(Params::new().with("groupId", id.as_str())),
            _ => Err(ApiError::MissingIdentifier("groupname or groupId")),
        }
    }
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{}", name),
            Self::Id(id) => write!(f, "id:{}", id),
        }
    }
}

impl<T: Transport> JiraApi<T> {
    /// Lists the members of a group, page by page.
    ///
    /// Each page is retried while the site reports itself temporarily
    /// unavailable.
    ///
    /// # Parameters
    ///
    /// * `group` - The group, by name or id
    /// * `include_inactive` - Also list deactivated accounts
    /// * `start_at` - Offset of the first member
    /// * `max_results` - Page size, also the cap on the number of members
    ///
    /// # Errors
    ///
    /// [`ApiError::MissingIdentifier`] when the group name or id is blank.
    pub fn group_members(
        &self,
        group: &GroupRef,
        include_inactive: bool,
        start_at: Option<u64>,
        max_results: Option<u64>,
    ) -> Result<Paginator<'_, T, OffsetPagination>, ApiError> {
        let params = group
            .to_params()?
            .with("includeInactiveUsers", include_inactive)
            .with("startAt", start_at)
            .with("maxResults", max_results);
        let call = Call::get("group/member").params(params).retrying();
        Ok(self.connector.paginate_offset(call, VALUES))
    }

    /// Adds a user to a group.
    ///
    /// # Returns
    ///
    /// The group on `201 Created`, otherwise `None`.
    ///
    /// # Errors
    ///
    /// [`ApiError::MissingIdentifier`] when the group name or id is blank.
    pub async fn add_user_to_group(
        &self,
        group: &GroupRef,
        account_id: &str,
    ) -> Result<Option<Payload>, ApiError> {
        let call = Call::post("group/user")
            .params(group.to_params()?)
            .json(json!({ "accountId": account_id }))
            .expect(201)
            .retrying();
        self.connector.fetch(&call).await
    }

    /// Removes a user from a group.
    ///
    /// Returns `true` when Jira answers `200 OK`.
    pub async fn remove_user_from_group(&self, group: &GroupRef, account_id: &str) -> Result<bool, ApiError> {
        let call = Call::delete("group/user")
            .params(group.to_params()?.with("accountId", account_id))
            .no_body()
            .retrying();
        self.connector.submit(&call).await
    }

    /// Finds groups whose names contain `query`.
    pub async fn find_groups(&self, query: &str, max_results: Option<u64>) -> Result<Option<Payload>, ApiError> {
        let call = Call::get("groups/picker")
            .params(Params::new().with("query", query).with("maxResults", max_results));
        self.connector.fetch(&call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::jira::test_support::jira;
    use crate::api::testing::json_response;
    use crate::api::transport::RawResponse;

    #[test]
    fn test_blank_identifier_is_rejected() {
        assert!(matches!(
            GroupRef::name("  ").to_params(),
            Err(ApiError::MissingIdentifier(_))
        ));
        assert!(matches!(GroupRef::id("").to_params(), Err(ApiError::MissingIdentifier(_))));
        assert_eq!(
            GroupRef::id("276f955c").to_params().unwrap().to_query(),
            vec![("groupId".to_string(), "276f955c".to_string())]
        );
    }

    #[test]
    fn test_group_members_fails_before_sending_without_identifier() {
        let jira = jira(vec![json_response(200, json!({}))]);
        assert!(jira.group_members(&GroupRef::name(""), false, None, None).is_err());
        assert!(jira.connector().transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_group_members_retries_and_pages() {
        let jira = jira(vec![
            RawResponse::new(401, r#"{"errorMessage": "Site temporarily unavailable"}"#),
            json_response(
                200,
                json!({"startAt": 0, "maxResults": 1, "total": 2, "values": [{"accountId": "a"}]}),
            ),
            json_response(
                200,
                json!({"startAt": 1, "maxResults": 1, "total": 2, "values": [{"accountId": "b"}]}),
            ),
        ]);

        let members = jira
            .group_members(&GroupRef::name("admins"), true, None, None)
            .unwrap()
            .collect_all()
            .await
            .unwrap();

        assert_eq!(members.len(), 2);
        let transport = jira.connector().transport();
        assert_eq!(transport.requests().len(), 3);
        assert_eq!(transport.query_value(0, "groupname").as_deref(), Some("admins"));
        assert_eq!(transport.query_value(0, "includeInactiveUsers").as_deref(), Some("true"));
    }

    #[tokio::test]
    async fn test_add_and_remove_membership() {
        let jira = jira(vec![
            json_response(201, json!({"name": "admins"})),
            RawResponse::new(200, ""),
        ]);
        let group = GroupRef::name("admins");

        let added = jira.add_user_to_group(&group, "abc").await.unwrap();
        assert_eq!(added.unwrap().str_field("name"), Some("admins"));
        assert!(jira.remove_user_from_group(&group, "abc").await.unwrap());

        let requests = jira.connector().transport().requests();
        assert_eq!(requests[0].method, reqwest::Method::POST);
        assert_eq!(requests[0].body, Some(json!({"accountId": "abc"})));
        assert_eq!(requests[1].method, reqwest::Method::DELETE);
        assert_eq!(jira.connector().transport().query_value(1, "accountId").as_deref(), Some("abc"));
    }
}
