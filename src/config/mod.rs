//
//  atlassian-cloud
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loads and saves the `atl` configuration, a small TOML file holding the
//! site to talk to and where to log. API tokens are never written here; they
//! live in the system keyring (see [`KeyringStore`](crate::auth::KeyringStore)).
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/atl/config.toml`
//! - **macOS**: `~/Library/Application Support/atl/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\atl\config.toml`
//!
//! The `--config` option (or `ATL_CONFIG`) points `atl` at another file.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [site]
//! base_url = "https://example.atlassian.net"
//! username = "me@example.com"
//!
//! [logging]
//! file = "/var/log/atl/atl"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atlassian_cloud::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut config = Config::load()?;
//! if config.get("site.base_url").is_none() {
//!     config.set("site.base_url", "https://example.atlassian.net".to_string());
//!     config.save()?;
//! }
//! # Ok(())
//! # }
//! ```

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::interactive::{prompt_input, prompt_input_optional};

/// Keys understood by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &["site.base_url", "site.username", "logging.file"];

/// The `atl` configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// The Atlassian site and account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site URL, e.g. `https://example.atlassian.net`
    #[serde(default)]
    pub base_url: Option<String>,
    /// Account e-mail address
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log file stem; events go to `<file>.YYYY-MM-DD.log`
    #[serde(default)]
    pub file: Option<String>,
}

impl Config {
    /// Loads the configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        match read_config_file(path)? {
            Some(content) => toml::from_str(&content)
                .with_context(|| format!("Invalid config file: {}", path.display())),
            None => Ok(Self::default()),
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the default configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "site.base_url" => self.site.base_url.clone(),
            "site.username" => self.site.username.clone(),
            "logging.file" => self.logging.file.clone(),
            _ => None,
        }
    }

    /// Sets `key`. Returns `false` for unknown keys. An empty value unsets the key.
    pub fn set(&mut self, key: &str, value: String) -> bool {
        let value = (!value.trim().is_empty()).then_some(value);
        match key {
            "site.base_url" => self.site.base_url = value,
            "site.username" => self.site.username = value,
            "logging.file" => self.logging.file = value,
            _ => return false,
        }
        true
    }

    /// Asks for the site URL and username when they are not set.
    ///
    /// Returns `true` if anything was filled in.
    pub fn prompt_missing(&mut self) -> Result<bool> {
        let mut changed = false;
        if self.site.base_url.is_none() {
            let url = prompt_input("Atlassian site URL (https://<name>.atlassian.net)")?;
            changed |= self.set("site.base_url", url);
        }
        if self.site.username.is_none() {
            let username = prompt_input("Account e-mail address")?;
            changed |= self.set("site.username", username);
        }
        if changed && self.logging.file.is_none() {
            if let Some(file) = prompt_input_optional("Log file stem (leave empty for none)")? {
                self.logging.file = Some(file);
            }
        }
        Ok(changed)
    }
}
