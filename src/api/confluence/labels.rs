//
//  atlassian-cloud
//  api/confluence/labels.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Confluence labels.
//!
//! The v2 API addresses labels by id only. Names are resolved through the v1
//! `label` endpoint first.

use tracing::warn;

use super::{BodyFormat, ConfluenceApi, RESULTS, V1};
use crate::api::client::Call;
use crate::api::common::{ApiError, CursorPagination, Paginator, Params, Payload};
use crate::api::transport::Transport;

/// A label, by name or by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelRef {
    Name(String),
    Id(String),
}

impl<T: Transport> ConfluenceApi<T> {
    /// Returns a label and the content it is attached to.
    ///
    /// `content_type` restricts the associated content to `page`,
    /// `blogpost`, `attachment` or `page_template`. `start` and `limit` page
    /// through that content.
    pub async fn label_information(
        &self,
        name: &str,
        content_type: Option<&str>,
        start: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Option<Payload>, ApiError> {
        let call = Call::get("label").version(V1).params(
            Params::new()
                .with("name", name)
                .with("type", content_type)
                .with("start", start)
                .with("limit", limit),
        );
        self.connector.fetch(&call).await
    }

    /// Lists the pages carrying a label.
    ///
    /// A label name is resolved to its id first through
    /// [`label_information`](Self::label_information).
    ///
    /// # Parameters
    ///
    /// * `label` - The label, by name or id
    /// * `body_format` - Representation of the page bodies
    /// * `limit` - Page size, also the cap on the number of pages
    /// * `sort` - Sort field, optionally prefixed with `-`
    /// * `serialize_ids_as_strings` - Return numeric ids as JSON strings
    ///
    /// # Returns
    ///
    /// A [`Paginator`] over the pages, or `None` when the name could not be
    /// resolved and nothing was listed.
    ///
    /// # Errors
    ///
    /// [`ApiError::MissingIdentifier`] when the name or id is blank.
    pub async fn label_pages(
        &self,
        label: &LabelRef,
        body_format: BodyFormat,
        limit: Option<u64>,
        sort: Option<&str>,
        serialize_ids_as_strings: bool,
    ) -> Result<Option<Paginator<'_, T, CursorPagination>>, ApiError> {
        let id = match label {
            LabelRef::Id(id) if !id.trim().is_empty() => id.clone(),
            LabelRef::Name(name) if !name.trim().is_empty() => {
                let info = self.label_information(name, Some("page"), None, None).await?;
                match info.and_then(|info| info.child("label")).and_then(|label| label.id()) {
                    Some(id) => id,
                    None => {
                        warn!(label = %name, "Label not found");
                        return Ok(None);
                    }
                }
            }
            _ => return Err(ApiError::MissingIdentifier("label name or id")),
        };

        let call = Call::get(format!("labels/{}/pages", id)).params(
            Params::new()
                .with("body-format", body_format.as_str())
                .with("limit", limit)
                .with("sort", sort)
                .with("serialize-ids-as-strings", serialize_ids_as_strings),
        );
        Ok(Some(self.connector.paginate_cursor(call, RESULTS)))
    }
}
