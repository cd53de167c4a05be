//
//  atlassian-cloud
//  logging.rs
//
//  Created by Ngonidzashe Mangudya on 2026/02/03.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Tracing subscriber setup for the `atl` binary.
//!
//! Log output goes to stderr, filtered by the `ATL_DEBUG` environment
//! variable (an [`EnvFilter`] directive, `warn` when unset). Optionally every
//! event is also appended to a dated log file: with the stem `logs/atl`,
//! events of 12 January 2026 go to `logs/atl.2026-01-12.log`.
//!
//! ```bash
//! ATL_DEBUG=atlassian_cloud=debug atl --log-file /tmp/atl jira user 5b10ac8d82e05b22cc7d4ef5
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "ATL_DEBUG";

/// Marker line written to the log file at the start of every run.
pub const NEW_ENTRY_MARKER: &str = "NewLogEntry";

/// Returns the log file for `stem` on `date`: `<stem>.YYYY-MM-DD.log`.
///
/// # Example
///
/// ```rust
/// use std::path::Path;
/// use chrono::NaiveDate;
/// use atlassian_cloud::logging::log_file_path;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// assert_eq!(
///     log_file_path(Path::new("logs/atl"), date),
///     Path::new("logs/atl.2026-01-12.log")
/// );
/// ```
pub fn log_file_path(stem: &Path, date: NaiveDate) -> PathBuf {
    let mut name = stem.as_os_str().to_os_string();
    name.push(format!(".{}.log", date.format("%Y-%m-%d")));
    PathBuf::from(name)
}

/// Opens today's log file for appending and writes the run marker.
pub fn open_log_file(stem: &Path) -> Result<(File, PathBuf)> {
    let now = Local::now();
    let path = log_file_path(stem, now.date_naive());
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    writeln!(file, "{} {}", NEW_ENTRY_MARKER, now.to_rfc3339())?;
    Ok((file, path))
}

/// Installs the global subscriber.
///
/// Returns the log file path when a file sink was installed.
pub fn init(file_stem: Option<&Path>) -> Result<Option<PathBuf>> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, path) = match file_stem {
        Some(stem) => {
            let (file, path) = open_log_file(stem)?;
            let layer = fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            (Some(layer), Some(path))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .with(filter)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_file_name_keeps_stem_extension() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(
            log_file_path(Path::new("/var/log/atl.run"), date),
            Path::new("/var/log/atl.run.2025-12-31.log")
        );
    }

    #[test]
    fn test_open_log_file_appends_marker() {
        let dir = TempDir::new().unwrap();
        let stem = dir.path().join("nested").join("atl");

        let (_, path) = open_log_file(&stem).unwrap();
        let (_, again) = open_log_file(&stem).unwrap();
        assert_eq!(path, again);

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches(NEW_ENTRY_MARKER).count(), 2);
        assert!(path.starts_with(dir.path()));
    }
}
