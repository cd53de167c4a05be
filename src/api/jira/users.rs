//
//  atlassian-cloud
//  api/jira/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jira user lookup.

use super::JiraApi;
use crate::api::client::Call;
use crate::api::common::{ApiError, Params, Payload};
use crate::api::transport::Transport;

impl<T: Transport> JiraApi<T> {
    /// Returns a user by account id.
    ///
    /// `expand` is a comma-separated list of `groups` and `applicationRoles`.
    /// Retries while the site reports itself temporarily unavailable.
    pub async fn user(&self, account_id: &str, expand: Option<&str>) -> Result<Option<Payload>, ApiError> {
        let call = Call::get("user")
            .params(Params::new().with("accountId", account_id).with("expand", expand))
            .retrying();
        self.connector.fetch(&call).await
    }

    /// Returns the user the client is authenticated as.
    pub async fn myself(&self) -> Result<Option<Payload>, ApiError> {
        self.connector.fetch(&Call::get("myself").retrying()).await
    }
}
