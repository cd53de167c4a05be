//
//  atlassian-cloud
//  api/confluence/pages.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Confluence page operations.
//!
//! Pages are listed with cursor pagination, read and written through the v2
//! API, and reordered with the v1 move endpoint.
//!
//! # Page Bodies
//!
//! A page body is sent in one of two representations:
//!
//! - **storage**: XHTML-based storage format, passed as a string
//! - **atlas_doc_format**: Atlassian Document Format, passed as JSON and sent
//!   as a serialized string
//!
//! # Example
//!
//! ```rust,no_run
//! use atlassian_cloud::api::confluence::{ConfluenceApi, NewPage, PageBody, PageUpdate};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let confluence = ConfluenceApi::new("me@example.com", "api-token", Some("https://example.atlassian.net"))?;
//!
//! let page = NewPage {
//!     title: Some("Release 1.4".into()),
//!     body: Some(PageBody::Storage("<p>Draft</p>".into())),
//!     ..NewPage::in_space("65538")
//! };
//! if let Some(created) = confluence.create_page(&page).await? {
//!     let id = created.id().unwrap_or_default();
//!
//!     // Without a version, the current version number + 1 is used
//!     let update = PageUpdate {
//!         title: "Release 1.4".into(),
//!         body: Some(PageBody::Storage("<p>Final</p>".into())),
//!         ..Default::default()
//!     };
//!     confluence.update_page(&id, &update).await?;
//! }
//! # Ok(())
//! # }
//! ```

use std::cmp::Ordering;
use std::fmt;

use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use super::{ConfluenceApi, MovePosition, RESULTS};
use crate::api::client::Call;
use crate::api::common::{ApiError, CursorPagination, Paginator, Params, Payload};
use crate::api::transport::Transport;

/// Body representation requested from or sent to Confluence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFormat {
    #[default]
    Storage,
    AtlasDocFormat,
}

impl BodyFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Storage => "storage",
            Self::AtlasDocFormat => "atlas_doc_format",
        }
    }
}

impl fmt::Display for BodyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page content in one of the supported representations.
#[derive(Debug, Clone, PartialEq)]
pub enum PageBody {
    /// Storage format markup
    Storage(String),
    /// Atlassian Document Format document
    AtlasDoc(Value),
}

impl PageBody {
    pub fn format(&self) -> BodyFormat {
        match self {
            Self::Storage(_) => BodyFormat::Storage,
            Self::AtlasDoc(_) => BodyFormat::AtlasDocFormat,
        }
    }

    /// Wraps the content the way the pages endpoint expects it.
    ///
    /// ```rust
    /// use atlassian_cloud::api::confluence::PageBody;
    /// use serde_json::json;
    ///
    /// assert_eq!(
    ///     PageBody::Storage("<p>Hi</p>".into()).to_json(),
    ///     json!({"storage": {"representation": "storage", "value": "<p>Hi</p>"}})
    /// );
    /// ```
    pub fn to_json(&self) -> Value {
        let value = match self {
            Self::Storage(markup) => Value::String(markup.clone()),
            Self::AtlasDoc(document) => Value::String(document.to_string()),
        };
        let format = self.format().as_str();
        json!({ format: { "representation": format, "value": value } })
    }
}

/// Query for [`ConfluenceApi::pages`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PageQuery {
    /// Restrict to these page ids
    pub id: Option<Vec<String>>,
    pub title: Option<String>,
    /// `current`, `archived`, `deleted` or `trashed`
    pub status: Option<String>,
    pub body_format: BodyFormat,
    /// Page size and cap on the number of pages produced
    pub limit: Option<u64>,
    /// `id`, `title`, `created-date`, `modified-date`, optionally prefixed with `-`
    pub sort: Option<String>,
    pub serialize_ids_as_strings: bool,
}

/// Options for [`ConfluenceApi::page`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PageFetch {
    /// Historical version to return instead of the current one
    pub version: Option<u64>,
    pub get_draft: bool,
    pub body_format: BodyFormat,
    pub serialize_ids_as_strings: bool,
}

/// A new page, as sent by [`ConfluenceApi::create_page`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewPage {
    pub space_id: String,
    pub title: Option<String>,
    pub parent_id: Option<String>,
    pub body: Option<PageBody>,
    /// `current` publishes the page, `draft` keeps it as a draft
    pub status: String,
    /// Visible only to the creator
    pub private: bool,
    /// Create a live doc instead of a page
    pub embedded: bool,
    pub serialize_ids_as_strings: bool,
}

impl NewPage {
    /// A published, empty page in `space_id`.
    pub fn in_space(space_id: impl Into<String>) -> Self {
        Self {
            space_id: space_id.into(),
            title: None,
            parent_id: None,
            body: None,
            status: "current".to_string(),
            private: false,
            embedded: false,
            serialize_ids_as_strings: false,
        }
    }
}

/// Version information sent with a page update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVersion {
    pub number: u64,
    pub message: String,
    pub minor_edit: bool,
}

/// New content for an existing page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageUpdate {
    pub title: String,
    pub parent_id: Option<String>,
    pub body: Option<PageBody>,
    pub status: String,
    /// `None` uses the current version number + 1
    pub version: Option<PageVersion>,
    pub serialize_ids_as_strings: bool,
}

impl Default for PageUpdate {
    fn default() -> Self {
        Self {
            title: String::new(),
            parent_id: None,
            body: None,
            status: "current".to_string(),
            version: None,
            serialize_ids_as_strings: false,
        }
    }
}

/// How [`ConfluenceApi::sort_pages`] orders sibling pages.
pub enum SortOrder {
    /// Alphabetically by title
    Asc,
    /// Reverse alphabetically by title
    Desc,
    /// By a comparator over the child page payloads
    Custom(Box<dyn Fn(&Payload, &Payload) -> Ordering + Send + Sync>),
}

impl SortOrder {
    /// Wraps a comparator.
    pub fn by<F>(compare: F) -> Self
    where
        F: Fn(&Payload, &Payload) -> Ordering + Send + Sync + 'static,
    {
        Self::Custom(Box::new(compare))
    }

    fn position(&self) -> MovePosition {
        match self {
            Self::Desc => MovePosition::Before,
            _ => MovePosition::After,
        }
    }
}

impl fmt::Debug for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("Asc"),
            Self::Desc => f.write_str("Desc"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One move performed while sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMove {
    pub page_id: String,
    pub page_title: String,
    pub position: MovePosition,
    pub target_id: String,
    pub target_title: String,
    /// Response of the move, `None` when it failed
    pub result: Option<Payload>,
}

fn title_of(page: &Payload) -> String {
    page.str_field("title").unwrap_or_default().to_string()
}

impl<T: Transport> ConfluenceApi<T> {
    /// Lists pages, page by page.
    pub fn pages(&self, query: &PageQuery) -> Result<Paginator<'_, T, CursorPagination>, ApiError> {
        let call = Call::get("pages").params(Params::from_serializable(query)?);
        Ok(self.connector.paginate_cursor(call, RESULTS))
    }

    /// Lists the direct children of a page.
    ///
    /// # Parameters
    ///
    /// * `id` - Parent page id
    /// * `sort` - Sort field, e.g. `title` or `-modified-date`
    /// * `limit` - Page size, also the cap on the number of children
    /// * `serialize_ids_as_strings` - Return numeric ids as JSON strings
    pub fn page_children(
        &self,
        id: &str,
        sort: Option<&str>,
        limit: Option<u64>,
        serialize_ids_as_strings: bool,
    ) -> Paginator<'_, T, CursorPagination> {
        let call = Call::get(format!("pages/{}/children", id)).params(
            Params::new()
                .with("sort", sort)
                .with("limit", limit)
                .with("serialize-ids-as-strings", serialize_ids_as_strings),
        );
        self.connector.paginate_cursor(call, RESULTS)
    }

    /// Returns one page.
    pub async fn page(&self, id: &str, fetch: &PageFetch) -> Result<Option<Payload>, ApiError> {
        let call = Call::get(format!("pages/{}", id)).params(Params::from_serializable(fetch)?);
        self.connector.fetch(&call).await
    }

    /// Creates a page.
    ///
    /// The body is wrapped in its representation (see [`PageBody::to_json`]).
    /// `private`, `embedded` and `serialize_ids_as_strings` travel as query
    /// parameters, everything else in the request body.
    ///
    /// # Returns
    ///
    /// The created page, or `None` when Confluence did not answer `200 OK`.
    pub async fn create_page(&self, page: &NewPage) -> Result<Option<Payload>, ApiError> {
        let mut body = Map::new();
        body.insert("spaceId".into(), json!(page.space_id));
        body.insert("status".into(), json!(page.status));
        body.insert("title".into(), json!(page.title));
        body.insert("parentId".into(), json!(page.parent_id));
        if let Some(content) = &page.body {
            body.insert("body".into(), content.to_json());
        }

        let call = Call::post("pages")
            .params(
                Params::new()
                    .with("private", page.private)
                    .with("embedded", page.embedded)
                    .with("serialize-ids-as-strings", page.serialize_ids_as_strings),
            )
            .json(Value::Object(body));
        self.connector.fetch(&call).await
    }

    /// Updates a page.
    ///
    /// Without an explicit version the current page is fetched first and its
    /// version number + 1 is sent.
    ///
    /// # Returns
    ///
    /// The updated page. `None` when the update was rejected, or when the
    /// current page could not be read and nothing was sent.
    ///
    /// # Errors
    ///
    /// Transport failures, and [`ApiError::Serialization`] when the version
    /// cannot be encoded.
    pub async fn update_page(&self, id: &str, update: &PageUpdate) -> Result<Option<Payload>, ApiError> {
        let version = match &update.version {
            Some(version) => version.clone(),
            None => {
                let Some(current) = self.page(id, &PageFetch::default()).await? else {
                    return Ok(None);
                };
                let Some(number) = current.u64_at("/version/number") else {
                    warn!(page = id, "Current page has no version number, update skipped");
                    return Ok(None);
                };
                PageVersion {
                    number: number + 1,
                    ..Default::default()
                }
            }
        };

        let mut body = Map::new();
        body.insert("id".into(), json!(id));
        body.insert("status".into(), json!(update.status));
        body.insert("title".into(), json!(update.title));
        body.insert("parentId".into(), json!(update.parent_id));
        if let Some(content) = &update.body {
            body.insert("body".into(), content.to_json());
        }
        body.insert("version".into(), serde_json::to_value(&version)?);

        let call = Call::put(format!("pages/{}", id))
            .params(Params::new().with("serialize-ids-as-strings", update.serialize_ids_as_strings))
            .json(Value::Object(body));
        self.connector.fetch(&call).await
    }

    /// Reorders the children of `parent_id`.
    ///
    /// Children are listed by title. Each page is then moved after its
    /// predecessor (before it, for [`SortOrder::Desc`]), so the final order
    /// matches the listing. With `recursive`, every child's children are
    /// sorted the same way. Returns one [`PageMove`] per move, in order.
    pub fn sort_pages<'a>(
        &'a self,
        parent_id: &'a str,
        order: &'a SortOrder,
        recursive: bool,
    ) -> BoxFuture<'a, Result<Vec<PageMove>, ApiError>> {
        async move {
            let mut children = self
                .page_children(parent_id, Some("title"), None, false)
                .collect_all()
                .await?;
            if let SortOrder::Custom(compare) = order {
                children.sort_by(|a, b| compare(a, b));
            }
            let children: Vec<(String, Payload)> = children
                .into_iter()
                .filter_map(|child| match child.id().filter(|id| !id.is_empty()) {
                    Some(id) => Some((id, child)),
                    None => {
                        warn!(parent = parent_id, title = %title_of(&child), "Skipping child page without an id");
                        None
                    }
                })
                .collect();
            debug!(parent = parent_id, children = children.len(), ?order, "Sorting pages");

            let position = order.position();
            let mut moves = Vec::new();
            for (index, (target_id, target)) in children.iter().enumerate() {
                if let Some((page_id, page)) = children.get(index + 1) {
                    let result = self.move_content(page_id, position, target_id).await?;
                    moves.push(PageMove {
                        page_id: page_id.clone(),
                        page_title: title_of(page),
                        position,
                        target_id: target_id.clone(),
                        target_title: title_of(target),
                        result,
                    });
                }
                if recursive {
                    moves.extend(self.sort_pages(target_id, order, true).await?);
                }
            }
            Ok(moves)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::confluence::test_support::confluence;
    use crate::api::testing::json_response;
    use crate::api::transport::RawResponse;

    fn children(pages: &[(&str, &str)]) -> RawResponse {
        let results: Vec<_> = pages.iter().map(|(id, title)| json!({"id": id, "title": title})).collect();
        json_response(200, json!({"results": results, "_links": {}}))
    }

    #[test]
    fn test_atlas_doc_body_is_serialized() {
        let body = PageBody::AtlasDoc(json!({"type": "doc", "version": 1, "content": []}));
        let wrapped = body.to_json();
        assert_eq!(wrapped["atlas_doc_format"]["representation"], "atlas_doc_format");
        let value = wrapped["atlas_doc_format"]["value"].as_str().unwrap();
        assert_eq!(serde_json::from_str::<Value>(value).unwrap()["type"], "doc");
    }

    #[tokio::test]
    async fn test_pages_query_uses_kebab_case_and_repeats_ids() {
        let confluence = confluence(vec![json_response(200, json!({"results": [{"id": "1"}], "_links": {}}))]);
        let query = PageQuery {
            id: Some(vec!["1".into(), "2".into()]),
            ..Default::default()
        };

        assert_eq!(confluence.pages(&query).unwrap().collect_all().await.unwrap().len(), 1);

        let request = &confluence.connector().transport().requests()[0];
        let ids: Vec<_> = request.query.iter().filter(|(k, _)| k == "id").map(|(_, v)| v.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        let transport = confluence.connector().transport();
        assert_eq!(transport.query_value(0, "body-format").as_deref(), Some("storage"));
        assert_eq!(transport.query_value(0, "limit").as_deref(), Some("25"));
    }

    #[tokio::test]
    async fn test_create_page_wraps_storage_body() {
        let confluence = confluence(vec![json_response(200, json!({"id": "99"}))]);
        let page = NewPage {
            title: Some("Notes".into()),
            body: Some(PageBody::Storage("<p>x</p>".into())),
            ..NewPage::in_space("65538")
        };

        let created = confluence.create_page(&page).await.unwrap();
        assert_eq!(created.and_then(|p| p.id()).as_deref(), Some("99"));

        let request = &confluence.connector().transport().requests()[0];
        assert_eq!(
            request.body,
            Some(json!({
                "spaceId": "65538",
                "status": "current",
                "title": "Notes",
                "body": {"storage": {"representation": "storage", "value": "<p>x</p>"}}
            }))
        );
        assert_eq!(confluence.connector().transport().query_value(0, "private").as_deref(), Some("false"));
    }

    #[tokio::test]
    async fn test_update_page_bumps_current_version() {
        let confluence = confluence(vec![
            json_response(200, json!({"id": "7", "version": {"number": 4}})),
            json_response(200, json!({"id": "7", "version": {"number": 5}})),
        ]);
        let update = PageUpdate {
            title: "Renamed".into(),
            ..Default::default()
        };

        let updated = confluence.update_page("7", &update).await.unwrap().unwrap();
        assert_eq!(updated.u64_at("/version/number"), Some(5));

        let requests = confluence.connector().transport().requests();
        assert_eq!(requests[0].method, reqwest::Method::GET);
        assert_eq!(requests[1].method, reqwest::Method::PUT);
        assert_eq!(
            requests[1].body.as_ref().unwrap()["version"],
            json!({"number": 5, "message": "", "minorEdit": false})
        );
    }

    #[tokio::test]
    async fn test_update_page_skips_put_when_page_is_missing() {
        let confluence = confluence(vec![json_response(404, json!({"message": "not found"}))]);
        let update = PageUpdate {
            title: "Renamed".into(),
            ..Default::default()
        };

        assert!(confluence.update_page("7", &update).await.unwrap().is_none());
        assert_eq!(confluence.connector().transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_sort_ascending_moves_after_predecessor() {
        let confluence = confluence(vec![
            children(&[("1", "Alpha"), ("2", "Beta"), ("3", "Gamma")]),
            json_response(200, json!({"pageId": "2"})),
            json_response(200, json!({"pageId": "3"})),
        ]);

        let moves = confluence.sort_pages("100", &SortOrder::Asc, false).await.unwrap();
        let summary: Vec<_> = moves
            .iter()
            .map(|m| (m.page_id.as_str(), m.position, m.target_id.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![("2", MovePosition::After, "1"), ("3", MovePosition::After, "2")]
        );

        let requests = confluence.connector().transport().requests();
        assert_eq!(
            requests[0].url,
            "https://example.atlassian.net/wiki/api/v2/pages/100/children"
        );
        assert_eq!(
            requests[2].url,
            "https://example.atlassian.net/wiki/rest/api/content/3/move/after/2"
        );
    }

    #[tokio::test]
    async fn test_sort_descending_moves_before() {
        let confluence = confluence(vec![
            children(&[("1", "Alpha"), ("2", "Beta")]),
            json_response(200, json!({"pageId": "2"})),
        ]);

        let moves = confluence.sort_pages("100", &SortOrder::Desc, false).await.unwrap();
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].position, MovePosition::Before);
        assert_eq!(moves[0].target_title, "Alpha");
    }

    #[tokio::test]
    async fn test_sort_skips_children_without_id() {
        let confluence = confluence(vec![
            json_response(
                200,
                json!({"results": [{"id": "1", "title": "A"}, {"title": "B"}, {"id": "3", "title": "C"}], "_links": {}}),
            ),
            json_response(200, json!({"pageId": "3"})),
            children(&[]),
            children(&[]),
        ]);

        let moves = confluence.sort_pages("100", &SortOrder::Asc, true).await.unwrap();
        assert_eq!(moves.len(), 1);
        assert_eq!((moves[0].page_id.as_str(), moves[0].target_id.as_str()), ("3", "1"));

        let urls: Vec<_> = confluence
            .connector()
            .transport()
            .requests()
            .iter()
            .map(|r| r.url.clone())
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://example.atlassian.net/wiki/api/v2/pages/100/children",
                "https://example.atlassian.net/wiki/rest/api/content/3/move/after/1",
                "https://example.atlassian.net/wiki/api/v2/pages/1/children",
                "https://example.atlassian.net/wiki/api/v2/pages/3/children",
            ]
        );
    }

    #[tokio::test]
    async fn test_write_operations_send_id_serialization_flag() {
        let confluence = confluence(vec![
            json_response(200, json!({"id": "99"})),
            json_response(200, json!({"id": "99", "version": {"number": 2}})),
        ]);
        let page = NewPage {
            serialize_ids_as_strings: true,
            ..NewPage::in_space("65538")
        };
        confluence.create_page(&page).await.unwrap();
        let update = PageUpdate {
            title: "Notes".into(),
            version: Some(PageVersion {
                number: 2,
                ..Default::default()
            }),
            ..Default::default()
        };
        confluence.update_page("99", &update).await.unwrap();

        let transport = confluence.connector().transport();
        assert_eq!(transport.query_value(0, "serialize-ids-as-strings").as_deref(), Some("true"));
        assert_eq!(transport.query_value(1, "serialize-ids-as-strings").as_deref(), Some("false"));
    }

    #[tokio::test]
    async fn test_children_send_id_serialization_flag() {
        let confluence = confluence(vec![children(&[("1", "A")])]);
        let pages = confluence
            .page_children("100", None, Some(5), true)
            .collect_all()
            .await
            .unwrap();

        assert_eq!(pages.len(), 1);
        let transport = confluence.connector().transport();
        assert_eq!(transport.query_value(0, "serialize-ids-as-strings").as_deref(), Some("true"));
        assert_eq!(transport.query_value(0, "limit").as_deref(), Some("5"));
    }

    #[tokio::test]
    async fn test_sort_custom_and_recursive() {
        let confluence = confluence(vec![
            children(&[("1", "a"), ("2", "bbb")]),
            // "bbb" sorts first by length descending, so "a" moves after it
            json_response(200, json!({"pageId": "1"})),
            children(&[]),
            children(&[("10", "x"), ("11", "y")]),
            json_response(200, json!({"pageId": "11"})),
        ]);
        let order = SortOrder::by(|a, b| {
            let len = |p: &Payload| p.str_field("title").map(str::len).unwrap_or(0);
            len(b).cmp(&len(a))
        });

        let moves = confluence.sort_pages("100", &order, true).await.unwrap();
        let summary: Vec<_> = moves
            .iter()
            .map(|m| (m.page_id.as_str(), m.target_id.as_str()))
            .collect();
        assert_eq!(summary, vec![("1", "2"), ("11", "10")]);

        let requests = confluence.connector().transport().requests();
        assert_eq!(requests[2].url, "https://example.atlassian.net/wiki/api/v2/pages/2/children");
        assert_eq!(requests[3].url, "https://example.atlassian.net/wiki/api/v2/pages/1/children");
    }
}
