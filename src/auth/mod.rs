//
//  atlassian-cloud
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Atlassian Cloud REST APIs authenticate scripts with HTTP Basic
//! authentication: the account e-mail address as the username and an API
//! token as the password.
//!
//! ## Module Structure
//!
//! - [`Credentials`]: username + API token attached to every request
//! - [`KeyringStore`]: secure storage for API tokens in the system keyring
//!
//! ## Example
//!
//! ```rust
//! use atlassian_cloud::auth::Credentials;
//!
//! let credentials = Credentials::new("me@example.com", "api-token");
//! assert_eq!(credentials.username(), "me@example.com");
//!
//! // The secret never shows up in debug output
//! assert!(!format!("{:?}", credentials).contains("api-token"));
//! ```

mod keyring;

pub use keyring::*;

use std::fmt;

use reqwest::RequestBuilder;

/// Username and API token for Basic authentication.
///
/// Replaced as a whole (see
/// [`Connector::reauthenticate`](crate::api::Connector::reauthenticate)),
/// never mutated field by field.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    secret: String,
}

impl Credentials {
    /// Creates credentials from a username and an API token or password.
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Adds the Basic `Authorization` header to `request`.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.username, Some(&self.secret))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}
