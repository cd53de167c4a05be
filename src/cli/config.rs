//
//  atlassian-cloud
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Reads and writes the site URL, account e-mail and log file stem kept in
//! the configuration file. Keys use dotted names, see [`CONFIG_KEYS`].

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, CONFIG_KEYS};

use super::{CliError, GlobalOptions};

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get(GetArgs),

    /// Set a configuration value
    Set(SetArgs),

    /// Unset a configuration value
    Unset(GetArgs),

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Ask for the site URL and account e-mail
    Init,

    /// Show configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Configuration key
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Configuration key
    pub key: String,

    /// Configuration value
    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => get(args, global),
            ConfigSubcommand::Set(args) => set(&args.key, &args.value, global),
            ConfigSubcommand::Unset(args) => set(&args.key, "", global),
            ConfigSubcommand::List => list(global),
            ConfigSubcommand::Init => init(global),
            ConfigSubcommand::Path => {
                println!("{}", global.config_path()?.display());
                Ok(())
            }
        }
    }
}

fn check_key(key: &str) -> Result<()> {
    if !CONFIG_KEYS.contains(&key) {
        bail!(
            "Unknown configuration key: {}. Valid keys: {}",
            key,
            CONFIG_KEYS.join(", ")
        );
    }
    Ok(())
}

fn get(args: &GetArgs, global: &GlobalOptions) -> Result<()> {
    check_key(&args.key)?;
    match global.load_config()?.get(&args.key) {
        Some(value) => {
            println!("{}", value);
            Ok(())
        }
        None => Err(CliError::NotFound(format!("{} is not set", args.key)).into()),
    }
}

fn set(key: &str, value: &str, global: &GlobalOptions) -> Result<()> {
    check_key(key)?;
    let mut config = global.load_config()?;
    let value = if key == "site.base_url" {
        value.trim().trim_end_matches('/').to_string()
    } else {
        value.to_string()
    };
    config.set(key, value);
    global.save_config(&config)
}

fn list(global: &GlobalOptions) -> Result<()> {
    let config = global.load_config()?;
    let color = global.output().color_enabled();

    for key in CONFIG_KEYS {
        let value = config.get(key).unwrap_or_default();
        if color {
            println!("{}={}", style(key).cyan(), value);
        } else {
            println!("{}={}", key, value);
        }
    }
    Ok(())
}

fn init(global: &GlobalOptions) -> Result<()> {
    if !global.interactive() {
        return Err(CliError::Config(
            "'atl config init' needs a terminal. Use 'atl config set' instead.".into(),
        )
        .into());
    }

    let mut config = global.load_config()?;
    let mut fresh = Config {
        logging: config.logging.clone(),
        ..Default::default()
    };
    fresh.prompt_missing()?;
    config.site = fresh.site;
    config.logging = fresh.logging;
    global.save_config(&config)?;

    global.output().write_success(&format!(
        "Configuration written to {}",
        global.config_path()?.display()
    ));
    Ok(())
}
