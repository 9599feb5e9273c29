//! Credential strategies for Zendesk authentication.
//!
//! Zendesk accepts HTTP Basic authentication in two forms:
//!
//! - API token: username `"<email>/token"`, password is the token
//! - Account password: username is the email, password is the password
//!
//! [`Credentials`] captures which form is in use and turns it into a
//! [`RequestSigner`] that the transport applies to every outgoing request.
//!
//! # Security
//!
//! Secrets are never logged. The `Debug` implementation redacts them.

use std::fmt;
use std::sync::Arc;

use reqwest::RequestBuilder;

use crate::client::validate_subdomain;
use crate::error::ZendeskError;

/// A request-decorating function applied to every outgoing request.
pub type RequestSigner = Arc<dyn Fn(RequestBuilder) -> RequestBuilder + Send + Sync>;

/// Account credentials, in one of the two supported authentication modes.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Email plus API token.
    Token {
        /// Account subdomain (the `acme` in `acme.zendesk.com`).
        subdomain: String,
        /// Email of the agent the token belongs to.
        email: String,
        /// API token.
        token: String,
    },
    /// Email plus account password.
    Password {
        /// Account subdomain.
        subdomain: String,
        /// Account email.
        email: String,
        /// Account password.
        password: String,
    },
}

/// Username and password pair sent in the `Authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    /// The Basic auth username.
    pub username: String,
    /// The Basic auth password.
    pub password: String,
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Credentials {
    /// Creates token credentials.
    pub fn token(
        subdomain: impl Into<String>,
        email: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Credentials::Token {
            subdomain: subdomain.into(),
            email: email.into(),
            token: token.into(),
        }
    }

    /// Creates password credentials.
    pub fn password(
        subdomain: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Credentials::Password {
            subdomain: subdomain.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// The account subdomain these credentials address.
    pub fn subdomain(&self) -> &str {
        match self {
            Credentials::Token { subdomain, .. } | Credentials::Password { subdomain, .. } => {
                subdomain
            }
        }
    }

    /// The account email.
    pub fn email(&self) -> &str {
        match self {
            Credentials::Token { email, .. } | Credentials::Password { email, .. } => email,
        }
    }

    /// Checks that every required part is present, in the order
    /// subdomain, email, secret.
    ///
    /// # Errors
    ///
    /// Returns the configuration error naming the first missing part.
    pub fn validate(&self) -> Result<(), ZendeskError> {
        validate_subdomain(self.subdomain())?;
        if self.email().trim().is_empty() {
            return Err(ZendeskError::EmailNotSet);
        }
        match self {
            Credentials::Token { token, .. } if token.trim().is_empty() => {
                Err(ZendeskError::NoSecretProvided)
            }
            Credentials::Password { password, .. } if password.trim().is_empty() => {
                Err(ZendeskError::NoSecretProvided)
            }
            _ => Ok(()),
        }
    }

    /// Returns the Basic auth pair for this authentication mode.
    pub fn basic_auth(&self) -> BasicAuth {
        match self {
            Credentials::Token { email, token, .. } => BasicAuth {
                username: format!("{}/token", email),
                password: token.clone(),
            },
            Credentials::Password {
                email, password, ..
            } => BasicAuth {
                username: email.clone(),
                password: password.clone(),
            },
        }
    }

    /// Builds the signing function that attaches Basic auth to a request.
    pub fn signer(&self) -> RequestSigner {
        let BasicAuth { username, password } = self.basic_auth();
        Arc::new(move |req: RequestBuilder| req.basic_auth(&username, Some(&password)))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self {
            Credentials::Token { .. } => "Token",
            Credentials::Password { .. } => "Password",
        };
        f.debug_struct(mode)
            .field("subdomain", &self.subdomain())
            .field("email", &self.email())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
