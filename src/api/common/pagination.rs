//
//  atlassian-cloud
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination for Jira and Confluence listings
//!
//! The two products page their listings differently, and this module hides
//! that difference behind one pull-based [`Paginator`].
//!
//! # Overview
//!
//! | Strategy | Product | Protocol |
//! |----------|---------|----------|
//! | [`OffsetPagination`] | Jira | `startAt` / `maxResults` / `total` |
//! | [`CursorPagination`] | Confluence v2 | `_links.next` carrying a `cursor` |
//!
//! **Jira** reports the offset of the page, the page size it actually used and
//! the total number of results. The next page starts at
//! `startAt + maxResults` and the listing ends once that reaches `total`.
//!
//! **Confluence** returns an opaque continuation link. Its `cursor` query
//! parameter is replayed on the next request until no link is returned.
//!
//! In both protocols the caller's page size doubles as a cap on the number of
//! items produced: the last request is shrunk so the cap is never exceeded.
//!
//! # Example
//!
//! ```rust,no_run
//! use atlassian_cloud::api::jira::{FilterSearch, JiraApi};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let jira = JiraApi::new("me@example.com", "api-token", Some("https://example.atlassian.net"))?;
//!
//! let mut filters = jira.search_filters(&FilterSearch::default())?;
//! while let Some(filter) = filters.next().await? {
//!     println!("{}", filter.str_field("name").unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Failure Behavior
//!
//! A page that does not come back as decoded JSON ends the listing silently;
//! the diagnostic has already been logged by the response interpreter. A
//! continuation link without a cursor is a protocol violation and is returned
//! as [`ApiError::CursorNotFound`].

use std::collections::VecDeque;

use futures::stream::{self, Stream};
use tracing::{debug, error};

use super::{ApiError, Params, Payload};
use crate::api::client::{Call, Connector};
use crate::api::response::Outcome;
use crate::api::transport::Transport;

/// Page size requested from Confluence when the caller does not give one.
pub const DEFAULT_CURSOR_PAGE_SIZE: u64 = 25;

/// Largest page size Confluence accepts.
pub const MAX_CURSOR_PAGE_SIZE: u64 = 250;

/// One pagination protocol.
///
/// A strategy never performs I/O. The [`Paginator`] asks it to prepare the
/// first request, hands it every fetched page, and asks it whether (and how)
/// to request the next one.
pub trait PageStrategy: Send {
    /// Adjusts the parameters of the first request and records the caller's cap.
    fn start(&mut self, params: &mut Params);

    /// Consumes a fetched page, returning its items in order.
    fn absorb(&mut self, page: &Payload) -> Vec<Payload>;

    /// Prepares the parameters for the next request.
    ///
    /// Returns `Ok(false)` when the listing is complete.
    fn advance(&mut self, params: &mut Params) -> Result<bool, ApiError>;
}

/// Offset pagination as used by the Jira REST APIs.
///
/// Reads `startAt` and `maxResults` from the request parameters; `maxResults`
/// is also the cap on the number of items produced.
#[derive(Debug, Clone)]
pub struct OffsetPagination {
    results_key: String,
    subobject: Option<String>,
    start: u64,
    cap: Option<u64>,
    page_size: u64,
    total: u64,
    next_offset: Option<u64>,
}

impl OffsetPagination {
    /// Creates a strategy reading items from the `results_key` array.
    pub fn new(results_key: impl Into<String>) -> Self {
        Self {
            results_key: results_key.into(),
            subobject: None,
            start: 0,
            cap: None,
            page_size: 0,
            total: 0,
            next_offset: None,
        }
    }

    /// Reads the listing from a nested object instead of the top level.
    ///
    /// Metadata (`startAt`, `maxResults`, `total`) is read from the nested
    /// object when present there, otherwise from the top level.
    pub fn nested(mut self, subobject: impl Into<String>) -> Self {
        self.subobject = Some(subobject.into());
        self
    }
}

impl PageStrategy for OffsetPagination {
    fn start(&mut self, params: &mut Params) {
        self.start = params.u64("startAt").unwrap_or(0);
        self.cap = params.u64("maxResults");
    }

    fn absorb(&mut self, page: &Payload) -> Vec<Payload> {
        let container = match &self.subobject {
            Some(name) => page.child(name),
            None => Some(page.clone()),
        };
        let Some(container) = container else {
            self.next_offset = None;
            return Vec::new();
        };

        let meta = |key: &str| container.u64_field(key).or_else(|| page.u64_field(key));
        self.next_offset = match (meta("startAt"), meta("maxResults"), meta("total")) {
            (Some(start_at), Some(max_results), Some(total)) if max_results > 0 => {
                self.page_size = max_results;
                self.total = total;
                Some(start_at.saturating_add(max_results))
            }
            _ => None,
        };

        container.items(&self.results_key)
    }

    fn advance(&mut self, params: &mut Params) -> Result<bool, ApiError> {
        let Some(next) = self.next_offset.take() else {
            return Ok(false);
        };
        if next >= self.total {
            return Ok(false);
        }

        match self.cap {
            Some(cap) => {
                let end = self.start.saturating_add(cap);
                if next >= end {
                    return Ok(false);
                }
                params.set("startAt", next);
                if next.saturating_add(self.page_size) > end {
                    params.set("maxResults", end - next);
                }
            }
            None => params.set("startAt", next),
        }
        Ok(true)
    }
}

/// Cursor pagination as used by the Confluence v2 REST API.
///
/// Reads `limit` from the request parameters. The page size is normalized to
/// [`DEFAULT_CURSOR_PAGE_SIZE`] when unset and clamped to
/// [`MAX_CURSOR_PAGE_SIZE`]; the caller's original `limit` is the cap.
#[derive(Debug, Clone)]
pub struct CursorPagination {
    results_key: String,
    cap: Option<u64>,
    total_count: u64,
    next_link: Option<String>,
}

impl CursorPagination {
    pub fn new(results_key: impl Into<String>) -> Self {
        Self {
            results_key: results_key.into(),
            cap: None,
            total_count: 0,
            next_link: None,
        }
    }
}

impl PageStrategy for CursorPagination {
    fn start(&mut self, params: &mut Params) {
        self.cap = params.u64("limit");
        let page_size = match self.cap {
            None => DEFAULT_CURSOR_PAGE_SIZE,
            Some(limit) => limit.min(MAX_CURSOR_PAGE_SIZE),
        };
        params.set("limit", page_size);
    }

    fn absorb(&mut self, page: &Payload) -> Vec<Payload> {
        let items = page.items(&self.results_key);
        self.total_count += items.len() as u64;
        self.next_link = page.str_at("/_links/next").map(str::to_string);
        items
    }

    fn advance(&mut self, params: &mut Params) -> Result<bool, ApiError> {
        let Some(link) = self.next_link.take() else {
            return Ok(false);
        };
        if matches!(self.cap, Some(cap) if self.total_count >= cap) {
            return Ok(false);
        }

        let Some(cursor) = extract_cursor(&link) else {
            error!(link = %link, "Cursor not found in continuation link");
            return Err(ApiError::CursorNotFound { link });
        };
        params.set("cursor", cursor);

        if let Some(cap) = self.cap {
            let requested = params.u64("limit").unwrap_or(DEFAULT_CURSOR_PAGE_SIZE);
            if self.total_count.saturating_add(requested) > cap {
                params.set("limit", cap - self.total_count);
            }
        }
        Ok(true)
    }
}

/// Extracts the `cursor` query parameter from a continuation link.
///
/// Works for absolute and site-relative links. An empty cursor counts as missing.
///
/// # Example
///
/// ```rust
/// use atlassian_cloud::api::common::extract_cursor;
///
/// assert_eq!(
///     extract_cursor("/wiki/api/v2/pages?limit=25&cursor=eyJpZCI6MTJ9").as_deref(),
///     Some("eyJpZCI6MTJ9")
/// );
/// assert_eq!(extract_cursor("/wiki/api/v2/pages?limit=25"), None);
/// ```
pub fn extract_cursor(link: &str) -> Option<String> {
    let (_, query) = link.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == "cursor" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PagerState {
    Pending,
    Yielding,
    Exhausted,
    Failed,
}

/// A lazily fetched listing.
///
/// Items are produced one at a time with [`next`](Self::next). A page is only
/// requested once every item of the previous page has been handed out, and
/// pages are never fetched ahead or concurrently. A paginator cannot be
/// restarted; build a new one to list again.
pub struct Paginator<'c, T, S> {
    connector: &'c Connector<T>,
    call: Call,
    strategy: S,
    buffer: VecDeque<Payload>,
    state: PagerState,
}

impl<'c, T: Transport, S: PageStrategy> Paginator<'c, T, S> {
    pub fn new(connector: &'c Connector<T>, call: Call, strategy: S) -> Self {
        Self {
            connector,
            call,
            strategy,
            buffer: VecDeque::new(),
            state: PagerState::Pending,
        }
    }

    /// Returns the next item, fetching another page when needed.
    ///
    /// `Ok(None)` marks the end of the listing, including a listing cut
    /// short by a failed page.
    pub async fn next(&mut self) -> Result<Option<Payload>, ApiError> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }

            match self.state {
                PagerState::Exhausted | PagerState::Failed => return Ok(None),
                PagerState::Pending => self.strategy.start(&mut self.call.params),
                PagerState::Yielding => match self.strategy.advance(&mut self.call.params) {
                    Ok(true) => {}
                    Ok(false) => {
                        self.state = PagerState::Exhausted;
                        return Ok(None);
                    }
                    Err(e) => {
                        self.state = PagerState::Failed;
                        return Err(e);
                    }
                },
            }

            match self.connector.execute(&self.call).await {
                Ok(Outcome::Decoded(page)) => {
                    self.buffer.extend(self.strategy.absorb(&page));
                    self.state = PagerState::Yielding;
                }
                Ok(_) => {
                    debug!(path = %self.call.path, "Listing ended by a failed page");
                    self.state = PagerState::Exhausted;
                    return Ok(None);
                }
                Err(e) => {
                    self.state = PagerState::Failed;
                    return Err(e);
                }
            }
        }
    }

    /// Returns `true` once the listing has ended, normally or not.
    pub fn is_finished(&self) -> bool {
        self.buffer.is_empty()
            && matches!(self.state, PagerState::Exhausted | PagerState::Failed)
    }

    /// Drains the listing into a vector.
    pub async fn collect_all(mut self) -> Result<Vec<Payload>, ApiError> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    /// Turns the paginator into a [`Stream`] of items.
    pub fn into_stream(self) -> impl Stream<Item = Result<Payload, ApiError>> + 'c
    where
        T: 'c,
        S: 'c,
    {
        stream::try_unfold(self, |mut pager| async move {
            let item = pager.next().await?;
            Ok::<_, ApiError>(item.map(|item| (item, pager)))
        })
    }
}
