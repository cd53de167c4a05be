//
//  atlassian-cloud
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! API tokens are stored in the system keyring, keyed by site URL. The site
//! and account e-mail live in the configuration file.

use std::io::Read;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use crate::api::confluence::V1;
use crate::api::Call;
use crate::auth::KeyringStore;
use crate::interactive::{prompt_confirm, prompt_password};
use crate::output::print_field;

use super::{CliError, GlobalOptions, Session, TokenSource};

const TOKEN_PAGE: &str = "https://id.atlassian.com/manage-profile/security/api-tokens";

/// Authenticate with an Atlassian site.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Verify an API token and store it in the keyring
    Login(LoginArgs),

    /// Remove the stored API token
    Logout,

    /// View authentication status
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Read the token from standard input
    #[arg(long)]
    pub with_token: bool,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Display the (masked) token
    #[arg(long)]
    pub show_token: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global).await,
            AuthSubcommand::Logout => logout(global),
            AuthSubcommand::Status(args) => status(args, global).await,
        }
    }
}

/// Checks the credentials against the site. Returns the account's display
/// name, or `None` when neither Jira nor Confluence accepts them.
async fn verify_account(session: &Session) -> Result<Option<String>> {
    let display_name = |account: crate::api::Payload| {
        account
            .str_field("displayName")
            .unwrap_or(session.username.as_str())
            .to_string()
    };

    if let Some(account) = session.jira()?.myself().await? {
        return Ok(Some(display_name(account)));
    }

    let confluence = session.confluence()?;
    let current = confluence
        .connector()
        .fetch(&Call::get("user/current").version(V1))
        .await?;
    Ok(current.map(display_name))
}

async fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let keyring = KeyringStore::new();
    let (base_url, username) = global.site()?;

    if global.token.is_none() && !args.with_token && global.interactive() {
        if let Some(existing) = keyring.get(&base_url)? {
            let session = Session {
                base_url: base_url.clone(),
                username: username.clone(),
                token: existing,
                token_source: TokenSource::Keyring,
            };
            if let Some(name) = verify_account(&session).await? {
                println!("Already logged in to {} as {}", base_url, name);
                if !prompt_confirm("Re-authenticate?", false)? {
                    return Ok(());
                }
            }
        }
    }

    let (token, token_source) = if args.with_token {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        (buffer.trim().to_string(), TokenSource::Flag)
    } else if let Some(token) = &global.token {
        (token.clone(), TokenSource::Flag)
    } else if global.interactive() {
        println!("Create an API token at {}", TOKEN_PAGE);
        (prompt_password("API token")?, TokenSource::Prompt)
    } else {
        return Err(CliError::Config("No token given. Pass --token or --with-token.".into()).into());
    };

    if token.is_empty() {
        bail!("Token is empty");
    }

    let session = Session {
        base_url,
        username,
        token,
        token_source,
    };

    let Some(name) = verify_account(&session).await? else {
        bail!(
            "{} rejected the credentials for {}. Check the e-mail address and token.",
            session.base_url,
            session.username
        );
    };

    keyring.store(&session.base_url, &session.token)?;

    let mut config = global.load_config()?;
    if config.site.base_url.as_deref() != Some(session.base_url.as_str())
        || config.site.username.as_deref() != Some(session.username.as_str())
    {
        config.site.base_url = Some(session.base_url.clone());
        config.site.username = Some(session.username.clone());
        global.save_config(&config)?;
    }

    global
        .output()
        .write_success(&format!("Logged in to {} as {}", session.base_url, name));
    Ok(())
}

fn logout(global: &GlobalOptions) -> Result<()> {
    let (base_url, _) = global.site()?;
    KeyringStore::new().delete(&base_url)?;
    global.output().write_success(&format!("Logged out of {}", base_url));
    Ok(())
}

async fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let session = global.session()?;
    let output = global.output();
    let color = output.color_enabled();

    let account = verify_account(&session).await?;

    println!("{}", session.base_url);
    print_field("  Account", &session.username, color);
    print_field(
        "  Token from",
        match session.token_source {
            TokenSource::Flag => "--token / ATL_API_TOKEN",
            TokenSource::Keyring => "keyring",
            TokenSource::Prompt => "prompt",
        },
        color,
    );
    if args.show_token {
        print_field("  Token", &mask_token(&session.token), color);
    }

    match account {
        Some(name) => {
            print_field("  Logged in as", &name, color);
            Ok(())
        }
        None => {
            output.write_error("Credentials were rejected");
            Err(CliError::Config(format!(
                "Not authenticated with {}. Run 'atl auth login'.",
                session.base_url
            ))
            .into())
        }
    }
}

/// Masks a token for display (shows first and last 4 characters).
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
