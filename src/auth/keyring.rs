//
//  atlassian-cloud
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Secure Token Storage
//!
//! API tokens are stored in the platform's native keyring instead of the
//! configuration file:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! Entries use the service name `atlassian-cloud` and are keyed by site URL,
//! so one machine can hold tokens for several Atlassian sites.
//!
//! ```rust,no_run
//! use atlassian_cloud::auth::KeyringStore;
//!
//! fn example() -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!     store.store("https://example.atlassian.net", "api-token")?;
//!
//!     if let Some(token) = store.get("https://example.atlassian.net")? {
//!         println!("token has {} characters", token.len());
//!     }
//!
//!     store.delete("https://example.atlassian.net")?;
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use keyring::Entry;

/// The service name used to identify this application in the system keyring.
const SERVICE_NAME: &str = "atlassian-cloud";

/// API token storage in the system keyring.
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Stores `token` for `site`, replacing any existing entry.
    pub fn store(&self, site: &str, token: &str) -> Result<()> {
        let entry = Entry::new(&self.service, site)?;
        entry
            .set_password(token)
            .with_context(|| format!("Failed to store API token for {}", site))?;
        Ok(())
    }

    /// Returns the token for `site`, or `None` when nothing is stored.
    pub fn get(&self, site: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, site)?;
        match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Removes the token for `site`. Deleting a missing entry succeeds.
    pub fn delete(&self, site: &str) -> Result<()> {
        let entry = Entry::new(&self.service, site)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already deleted
            Err(e) => Err(e.into()),
        }
    }
}
