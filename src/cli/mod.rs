//
//  atlassian-cloud
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod api;
mod auth;
mod config;
mod confluence;
mod jira;

pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use config::ConfigCommand;
pub use confluence::ConfluenceCommand;
pub use jira::JiraCommand;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::api::confluence::{self as confluence_api, ConfluenceApi};
use crate::api::jira::{self as jira_api, JiraApi};
use crate::api::{ApiError, Connector, EndpointTable, Payload};
use crate::auth::{Credentials, KeyringStore};
use crate::config::Config;
use crate::exit_codes;
use crate::interactive::{can_prompt, prompt_password};
use crate::output::OutputWriter;

/// atl - Work with Jira and Confluence Cloud from the command line
#[derive(Parser, Debug)]
#[command(
    name = "atl",
    version,
    about = "Work with Jira and Confluence Cloud from the command line",
    long_about = "atl talks to the Jira Cloud and Confluence Cloud REST APIs.\n\n\
                  It lists filters, dashboards, groups and boards, and reads, sorts and \
                  inspects Confluence pages.",
    propagate_version = true,
    after_help = "Use 'atl <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Atlassian site URL, e.g. https://example.atlassian.net
    #[arg(long, global = true, env = "ATL_BASE_URL")]
    pub base_url: Option<String>,

    /// Account e-mail address
    #[arg(long, short = 'u', global = true, env = "ATL_USERNAME")]
    pub username: Option<String>,

    /// API token (otherwise read from the system keyring)
    #[arg(long, global = true, env = "ATL_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Configuration file
    #[arg(long, global = true, env = "ATL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long, global = true, env = "ATL_NO_PROMPT")]
    pub no_prompt: bool,

    /// Also log to <FILE>.YYYY-MM-DD.log
    #[arg(long, global = true, env = "ATL_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store, remove or check the API token
    Auth(AuthCommand),

    /// Jira users, filters, dashboards, groups and boards
    #[command(visible_alias = "j")]
    Jira(JiraCommand),

    /// Confluence pages
    #[command(visible_alias = "c")]
    Confluence(ConfluenceCommand),

    /// Make API requests
    Api(ApiCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// Print version information
    Version,
}

/// Errors with a dedicated exit code.
#[derive(Error, Debug)]
pub enum CliError {
    /// Site, username or token missing
    #[error("{0}")]
    Config(String),

    /// The API did not return the requested resource
    #[error("{0}")]
    NotFound(String),
}

/// Maps an error to the process exit code.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    if let Some(cli) = error.downcast_ref::<CliError>() {
        return match cli {
            CliError::Config(_) => exit_codes::CONFIG_ERROR,
            CliError::NotFound(_) => exit_codes::NOT_FOUND,
        };
    }
    match error.downcast_ref::<ApiError>() {
        Some(api) if api.is_configuration() => exit_codes::CONFIG_ERROR,
        _ => exit_codes::ERROR,
    }
}

/// Turns a fail-soft `None` into a not-found error.
pub(crate) fn found(payload: Option<Payload>, what: impl std::fmt::Display) -> Result<Payload> {
    payload.ok_or_else(|| {
        CliError::NotFound(format!("{} not found or not accessible", what)).into()
    })
}

/// Where the API token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Flag,
    Keyring,
    Prompt,
}

/// Site, account and token resolved for one invocation.
#[derive(Debug, Clone)]
pub struct Session {
    pub base_url: String,
    pub username: String,
    pub token: String,
    pub token_source: TokenSource,
}

impl Session {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.token)
    }

    pub fn connector(&self, endpoints: EndpointTable) -> Result<Connector> {
        Ok(Connector::new(self.credentials(), endpoints)?.with_base_url(&self.base_url))
    }

    pub fn jira(&self) -> Result<JiraApi> {
        Ok(JiraApi::from_connector(self.connector(jira_api::endpoint_table())?))
    }

    pub fn confluence(&self) -> Result<ConfluenceApi> {
        Ok(ConfluenceApi::from_connector(
            self.connector(confluence_api::endpoint_table())?,
        ))
    }
}

impl GlobalOptions {
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path()?)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to(&self.config_path()?)
    }

    /// Whether prompting is allowed and possible.
    pub fn interactive(&self) -> bool {
        !self.no_prompt && can_prompt()
    }

    pub fn output(&self) -> OutputWriter {
        OutputWriter::from_flag(self.json)
    }

    /// Log file stem from `--log-file` or the configuration.
    pub fn log_file(&self, config: Option<&Config>) -> Option<PathBuf> {
        self.log_file
            .clone()
            .or_else(|| config.and_then(|c| c.logging.file.clone()).map(PathBuf::from))
    }

    /// Resolves the site and username, asking for missing values when allowed.
    pub fn site(&self) -> Result<(String, String)> {
        let mut config = self.load_config()?;
        let mut base_url = self.base_url.clone().or_else(|| config.site.base_url.clone());
        let mut username = self.username.clone().or_else(|| config.site.username.clone());

        if (base_url.is_none() || username.is_none()) && self.interactive() {
            if self.base_url.is_some() {
                config.site.base_url = self.base_url.clone();
            }
            if self.username.is_some() {
                config.site.username = self.username.clone();
            }
            if config.prompt_missing()? {
                self.save_config(&config)?;
            }
            base_url = base_url.or_else(|| config.site.base_url.clone());
            username = username.or_else(|| config.site.username.clone());
        }

        let base_url = base_url.ok_or_else(|| {
            CliError::Config("No site URL configured. Use --base-url or 'atl config init'.".into())
        })?;
        let username = username.ok_or_else(|| {
            CliError::Config("No username configured. Use --username or 'atl config init'.".into())
        })?;
        Ok((base_url.trim_end_matches('/').to_string(), username))
    }

    /// Resolves site, username and token.
    ///
    /// The token comes from `--token`/`ATL_API_TOKEN`, then the keyring, then
    /// a prompt.
    pub fn session(&self) -> Result<Session> {
        let (base_url, username) = self.site()?;

        let (token, token_source) = match &self.token {
            Some(token) => (token.clone(), TokenSource::Flag),
            None => match KeyringStore::new().get(&base_url)? {
                Some(token) => (token, TokenSource::Keyring),
                None if self.interactive() => (prompt_password("API token")?, TokenSource::Prompt),
                None => {
                    return Err(CliError::Config(format!(
                        "Not authenticated with {}. Run 'atl auth login' or pass --token.",
                        base_url
                    ))
                    .into())
                }
            },
        };

        Ok(Session {
            base_url,
            username,
            token,
            token_source,
        })
    }
}

/// Splits `items` out of an array payload; any other payload is one item.
pub(crate) fn as_items(payload: Payload) -> Vec<Payload> {
    match payload.into_value() {
        serde_json::Value::Array(values) => values.into_iter().map(Payload::new).collect(),
        other => vec![Payload::new(other)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&CliError::Config("x".into()).into()), exit_codes::CONFIG_ERROR);
        assert_eq!(exit_code(&CliError::NotFound("x".into()).into()), exit_codes::NOT_FOUND);
        assert_eq!(exit_code(&ApiError::NotConfigured.into()), exit_codes::CONFIG_ERROR);
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), exit_codes::ERROR);
    }

    #[test]
    fn test_site_prefers_flags_over_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.set("site.base_url", "https://config.atlassian.net".into());
        config.set("site.username", "config@example.com".into());
        config.save_to(&path).unwrap();

        let global = GlobalOptions {
            base_url: Some("https://flag.atlassian.net/".into()),
            config: Some(path),
            no_prompt: true,
            ..Default::default()
        };
        let (base_url, username) = global.site().unwrap();
        assert_eq!(base_url, "https://flag.atlassian.net");
        assert_eq!(username, "config@example.com");
    }

    #[test]
    fn test_missing_site_is_config_error() {
        let dir = TempDir::new().unwrap();
        let global = GlobalOptions {
            config: Some(dir.path().join("config.toml")),
            no_prompt: true,
            ..Default::default()
        };
        let err = global.session().unwrap_err();
        assert_eq!(exit_code(&err), exit_codes::CONFIG_ERROR);
    }

    #[test]
    fn test_flag_token_skips_keyring() {
        let dir = TempDir::new().unwrap();
        let global = GlobalOptions {
            base_url: Some("https://example.atlassian.net".into()),
            username: Some("me@example.com".into()),
            token: Some("secret".into()),
            config: Some(dir.path().join("config.toml")),
            no_prompt: true,
            ..Default::default()
        };
        let session = global.session().unwrap();
        assert_eq!(session.token_source, TokenSource::Flag);
        assert_eq!(session.credentials().secret(), "secret");
    }

    #[test]
    fn test_as_items() {
        assert_eq!(as_items(Payload::new(json!([{"id": 1}, {"id": 2}]))).len(), 2);
        assert_eq!(as_items(Payload::new(json!({"id": 1}))).len(), 1);
    }
}
