//
//  atlassian-cloud
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the shared request engine for Atlassian Cloud REST
//! APIs and the Jira and Confluence operation catalogs built on top of it.
//!
//! ## Supported Products
//!
//! - **Jira Cloud**: `rest/api/3/`, `rest/api/2/` and the agile API
//! - **Confluence Cloud**: `wiki/api/v2/` and the v1 `wiki/rest/api/`
//!
//! ## Architecture
//!
//! - [`transport`]: one HTTP exchange, behind the [`Transport`] trait
//! - [`client`]: the [`Connector`] that builds requests from [`Call`]s
//! - [`response`]: classification of responses into [`Outcome`]s
//! - [`retry`]: retrying transient "site unavailable" responses
//! - [`common`]: errors, payloads, parameters and pagination
//! - [`jira`] and [`confluence`]: named operations
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atlassian_cloud::api::confluence::{ConfluenceApi, PageQuery};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let confluence = ConfluenceApi::new(
//!     "me@example.com",
//!     "api-token",
//!     Some("https://example.atlassian.net"),
//! )?;
//!
//! let query = PageQuery { title: Some("Release notes".into()), ..Default::default() };
//! for page in confluence.pages(&query)?.collect_all().await? {
//!     println!("{}: {}", page.id().unwrap_or_default(), page.str_field("title").unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Only configuration mistakes, transport failures and pagination protocol
//! violations are returned as [`ApiError`]. A response with an unexpected
//! status is logged and the operation returns `Ok(None)` (or `Ok(false)`).

pub mod client;
pub mod common;
pub mod confluence;
pub mod jira;
pub mod response;
pub mod retry;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{Call, Connector, EndpointTable};
pub use common::{ApiError, Params, Payload};
pub use response::{Expectation, Failure, Outcome};
pub use retry::RetryPolicy;
pub use transport::{HttpTransport, RawResponse, RequestDescriptor, Transport};
