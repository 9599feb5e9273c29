//! Configuration loading from environment variables.
//!
//! Builds [`Credentials`] from the process environment. Checks run in a
//! fixed order (subdomain, email, secret) and the first failure is returned
//! as its own error variant so callers can tell what is misconfigured.

use std::env;

use crate::auth::Credentials;
use crate::error::ZendeskError;

/// Account subdomain, e.g. `acme` for `acme.zendesk.com`.
pub const ENV_DOMAIN: &str = "ZENDESK_DOMAIN";

/// Email of the authenticating agent.
pub const ENV_EMAIL: &str = "ZENDESK_EMAIL";

/// API token for token authentication.
pub const ENV_TOKEN: &str = "ZENDESK_TOKEN";

/// Account password for password authentication.
pub const ENV_PASSWORD: &str = "ZENDESK_PASSWORD";

impl Credentials {
    /// Loads credentials from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ZENDESK_DOMAIN`: account subdomain (required)
    /// - `ZENDESK_EMAIL`: account email (required)
    /// - `ZENDESK_TOKEN` or `ZENDESK_PASSWORD`: exactly one is required
    ///
    /// # Errors
    ///
    /// `DomainNotSet`, `EmailNotSet`, `NoSecretProvided` or
    /// `ConflictingSecrets`, checked in that order.
    ///
    /// # Example
    ///
    /// ```ignore
    /// dotenvy::dotenv().ok();
    /// let credentials = Credentials::from_env()?;
    /// ```
    pub fn from_env() -> Result<Self, ZendeskError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads token credentials from the environment, ignoring
    /// `ZENDESK_PASSWORD` entirely.
    ///
    /// # Errors
    ///
    /// `DomainNotSet`, `EmailNotSet` or `TokenNotSet`.
    pub fn from_env_token_only() -> Result<Self, ZendeskError> {
        Self::token_from_lookup(|name| env::var(name).ok())
    }

    /// Loads credentials through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ZendeskError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (subdomain, email) = required_identity(&lookup)?;
        let token = non_blank(&lookup, ENV_TOKEN);
        let password = non_blank(&lookup, ENV_PASSWORD);

        match (token, password) {
            (Some(token), None) => Ok(Credentials::token(subdomain, email, token)),
            (None, Some(password)) => Ok(Credentials::password(subdomain, email, password)),
            (None, None) => Err(ZendeskError::NoSecretProvided),
            (Some(_), Some(_)) => Err(ZendeskError::ConflictingSecrets),
        }
    }

    /// Token-only variant of [`Credentials::from_lookup`].
    pub fn token_from_lookup<F>(lookup: F) -> Result<Self, ZendeskError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (subdomain, email) = required_identity(&lookup)?;
        let token = non_blank(&lookup, ENV_TOKEN).ok_or(ZendeskError::TokenNotSet)?;
        Ok(Credentials::token(subdomain, email, token))
    }
}

fn required_identity<F>(lookup: &F) -> Result<(String, String), ZendeskError>
where
    F: Fn(&str) -> Option<String>,
{
    let subdomain = non_blank(lookup, ENV_DOMAIN).ok_or(ZendeskError::DomainNotSet)?;
    let email = non_blank(lookup, ENV_EMAIL).ok_or(ZendeskError::EmailNotSet)?;
    Ok((subdomain, email))
}

/// Gets a variable, returning `None` if it is missing or blank.
fn non_blank<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|value| !value.trim().is_empty())
}
