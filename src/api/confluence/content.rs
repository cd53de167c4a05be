//
//  atlassian-cloud
//  api/confluence/content.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Content operations of the v1 API.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ConfluenceApi, V1};
use crate::api::client::Call;
use crate::api::common::{ApiError, Params, Payload};
use crate::api::transport::Transport;

/// Where a page is moved relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovePosition {
    /// Sibling directly before the target
    Before,
    /// Sibling directly after the target
    After,
    /// Last child of the target
    Append,
}

impl MovePosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Before => "before",
            Self::After => "after",
            Self::Append => "append",
        }
    }
}

impl fmt::Display for MovePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: Transport> ConfluenceApi<T> {
    /// Moves a page relative to a target page.
    ///
    /// Goes through the v1 REST API, which has no v2 counterpart.
    ///
    /// # Parameters
    ///
    /// * `page_id` - The page being moved
    /// * `position` - Where to put it relative to the target
    /// * `target_id` - The page it is placed against
    ///
    /// # Returns
    ///
    /// `{"pageId": ...}` on success, `None` when Confluence refused the move.
    pub async fn move_content(
        &self,
        page_id: &str,
        position: MovePosition,
        target_id: &str,
    ) -> Result<Option<Payload>, ApiError> {
        let call = Call::put(format!("content/{}/move/{}/{}", page_id, position, target_id)).version(V1);
        self.connector.fetch(&call).await
    }

    /// Returns the descendants of a piece of content, grouped by type.
    ///
    /// `expand` names the groups to include (`attachment`, `comment`, `page`).
    pub async fn content_descendants(&self, id: &str, expand: &[&str]) -> Result<Option<Payload>, ApiError> {
        let expand = (!expand.is_empty()).then(|| expand.join(","));
        let call = Call::get(format!("content/{}/descendant", id))
            .version(V1)
            .params(Params::new().with("expand", expand));
        self.connector.fetch(&call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::confluence::test_support::confluence;
    use crate::api::testing::json_response;
    use serde_json::json;

    #[tokio::test]
    async fn test_move_content_uses_v1_path() {
        let confluence = confluence(vec![json_response(200, json!({"pageId": "42"}))]);
        let moved = confluence.move_content("42", MovePosition::After, "41").await.unwrap();

        assert_eq!(moved.unwrap().str_field("pageId"), Some("42"));
        let request = &confluence.connector().transport().requests()[0];
        assert_eq!(request.method, reqwest::Method::PUT);
        assert_eq!(
            request.url,
            "https://example.atlassian.net/wiki/rest/api/content/42/move/after/41"
        );
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn test_descendants_join_expand() {
        let confluence = confluence(vec![
            json_response(200, json!({"page": {"results": []}})),
            json_response(200, json!({})),
        ]);
        confluence.content_descendants("42", &["page", "attachment"]).await.unwrap();
        confluence.content_descendants("42", &[]).await.unwrap();

        let transport = confluence.connector().transport();
        assert_eq!(transport.query_value(0, "expand").as_deref(), Some("page,attachment"));
        assert!(transport.requests()[1].query.is_empty());
    }
}
