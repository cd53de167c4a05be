//
//  atlassian-cloud
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Interactive Prompts Module
//!
//! Thin wrappers around `dialoguer` used when `atl` has to ask for missing
//! configuration or an API token.
//!
//! # Example
//!
//! ```no_run
//! use atlassian_cloud::interactive::{prompt_confirm, prompt_input, prompt_password};
//!
//! # fn example() -> anyhow::Result<()> {
//! let username = prompt_input("Account e-mail address")?;
//! let token = prompt_password("API token")?;
//!
//! if prompt_confirm("Store the token in the system keyring?", true)? {
//!     println!("Storing token for {} ({} characters)", username, token.len());
//! }
//! # Ok(())
//! # }
//! ```

use std::io::IsTerminal;

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input, Password};

/// Returns `true` when stdin is a terminal and prompting is possible.
pub fn can_prompt() -> bool {
    std::io::stdin().is_terminal()
}

fn ensure_terminal(message: &str) -> Result<()> {
    if !can_prompt() {
        bail!("Cannot prompt for '{}': stdin is not a terminal", message);
    }
    Ok(())
}

/// Asks for a non-empty line of text.
pub fn prompt_input(message: &str) -> Result<String> {
    ensure_terminal(message)?;
    let input: String = Input::new().with_prompt(message).interact_text()?;
    Ok(input)
}

/// Asks for a line of text; an empty answer is `None`.
pub fn prompt_input_optional(message: &str) -> Result<Option<String>> {
    ensure_terminal(message)?;
    let input: String = Input::new()
        .with_prompt(message)
        .allow_empty(true)
        .interact_text()?;

    Ok((!input.is_empty()).then_some(input))
}

/// Asks for a secret without echoing it.
pub fn prompt_password(message: &str) -> Result<String> {
    ensure_terminal(message)?;
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

pub fn prompt_confirm(message: &str, default: bool) -> Result<bool> {
    ensure_terminal(message)?;
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}
