//
//  atlassian-cloud
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Atlassian Cloud Library
//!
//! A client library and command-line tool for the Jira Cloud and Confluence
//! Cloud REST APIs.
//!
//! ## Overview
//!
//! Both products share one request engine: site URL and credential handling,
//! endpoint-version prefixes, retrying of transient outages, response
//! interpretation and the two pagination protocols. Named operations such as
//! "search filters" or "create page" are thin mappings on top of it.
//!
//! ## Features
//!
//! - **Jira**: users, filters, dashboards, groups, boards and sprints
//! - **Confluence**: pages, page trees and sorting, labels, spaces
//! - **Pagination**: offset (Jira) and cursor (Confluence) listings behind one
//!   pull-based [`Paginator`](api::common::Paginator)
//! - **Fail-soft responses**: unexpected statuses are logged and surface as
//!   `None`, never as panics
//! - **Secure token storage** in the system keyring for the `atl` binary
//!
//! ## Module Structure
//!
//! - [`api`]: request engine and operation catalogs
//! - [`auth`]: credentials and keyring storage
//! - [`config`]: configuration file management
//! - [`interactive`]: prompts for missing configuration
//! - [`logging`]: tracing subscriber setup with an optional log file
//! - [`output`]: table and JSON output for the CLI
//! - [`cli`]: command-line interface definitions using clap
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use atlassian_cloud::api::jira::JiraApi;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let jira = JiraApi::new("me@example.com", "api-token", Some("https://example.atlassian.net"))?;
//!
//! let mut boards = jira.boards(None, None, Some(20));
//! while let Some(board) = boards.next().await? {
//!     println!("{}", board.str_field("name").unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// Request engine and Jira/Confluence operations.
pub mod api;

/// Credentials and secure token storage.
pub mod auth;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/atl/config.toml`
/// - macOS: `~/Library/Application Support/atl/config.toml`
/// - Windows: `%APPDATA%\atl\config.toml`
pub mod config;

/// Interactive terminal prompts.
pub mod interactive;

/// Logging setup.
pub mod logging;

/// Output formatting for tables and JSON.
pub mod output;

/// Re-export of the main CLI struct for convenient access.
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and configuration paths.
pub const APP_NAME: &str = "atl";

/// Application version constant, derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use atlassian_cloud::VERSION;
///
/// println!("atl version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Timestamp format used by Atlassian APIs (`2026-01-12T09:30:00.000000Z`).
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Formats a UTC timestamp with [`DATE_FORMAT`].
///
/// # Example
///
/// ```rust
/// use atlassian_cloud::{format_timestamp, parse_timestamp};
///
/// let ts = parse_timestamp("2026-01-12T09:30:00.250000Z").unwrap();
/// assert_eq!(format_timestamp(&ts), "2026-01-12T09:30:00.250000Z");
/// ```
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(DATE_FORMAT).to_string()
}

/// Parses a timestamp in [`DATE_FORMAT`].
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, DATE_FORMAT).map(|naive| naive.and_utc())
}

/// Exit codes for the CLI.
///
/// Standardized exit codes following Unix conventions, allowing scripts
/// to programmatically detect the outcome of CLI operations.
///
/// # Example
///
/// ```rust,no_run
/// use atlassian_cloud::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::CONFIG_ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Missing site URL, credentials or an unknown endpoint version.
    ///
    /// Run `atl config init` or `atl auth login`.
    pub const CONFIG_ERROR: i32 = 3;

    /// The requested resource does not exist or is not visible to the user.
    pub const NOT_FOUND: i32 = 8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_timestamp_format_has_microseconds() {
        let ts = parse_timestamp("2025-11-03T14:05:09.123456Z").unwrap();
        assert_eq!(ts.year(), 2025);
        assert_eq!(ts.second(), 9);
        assert_eq!(ts.nanosecond(), 123_456_000);
        assert_eq!(format_timestamp(&ts), "2025-11-03T14:05:09.123456Z");
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert!(parse_timestamp("2025-11-03 14:05:09").is_err());
    }
}
