//! Zendesk API client.
//!
//! [`Client`] binds an account subdomain to an [`HttpClient`], turns
//! relative API paths into absolute URLs and hands out resource accessors.
//! It holds no per-request state, so one client can be cloned and shared
//! freely between tasks.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::Credentials;
use crate::context::Context;
use crate::error::ZendeskError;
use crate::params::QueryParams;
use crate::transport::{HttpClient, ReqwestTransport, Transport};
use crate::users::Users;

/// Host that account subdomains live under.
pub const PROVIDER_HOST: &str = "zendesk.com";

/// Client for one Zendesk account.
///
/// # Example
///
/// ```ignore
/// let client = Client::from_token("acme", "agent@acme.com", "api-token")?;
///
/// let users = client.users().list().await?;
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    /// Account subdomain, e.g. `acme` for `acme.zendesk.com`.
    subdomain: String,

    /// Signed JSON transport (cloning is cheap).
    http: HttpClient,
}

impl Client {
    /// Creates a client that signs requests with `credentials`.
    ///
    /// # Errors
    ///
    /// Returns the configuration error for the first missing part of the
    /// credentials, or `ZendeskError::HttpClient` if the HTTP client fails
    /// to initialize.
    pub fn new(credentials: Credentials) -> Result<Self, ZendeskError> {
        credentials.validate()?;
        let transport = ReqwestTransport::new(credentials.signer())?;
        Self::with_transport(credentials.subdomain(), Arc::new(transport))
    }

    /// Creates a client on top of any transport.
    ///
    /// The transport is responsible for signing requests.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::DomainNotSet` for a blank subdomain and
    /// `ZendeskError::InvalidSubdomain` for one containing whitespace.
    pub fn with_transport(
        subdomain: impl Into<String>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ZendeskError> {
        let subdomain = subdomain.into();
        validate_subdomain(&subdomain)?;
        Ok(Self {
            subdomain,
            http: HttpClient::new(transport),
        })
    }

    /// Creates a client from `ZENDESK_DOMAIN`, `ZENDESK_EMAIL` and one of
    /// `ZENDESK_TOKEN` / `ZENDESK_PASSWORD`.
    ///
    /// # Errors
    ///
    /// See [`Credentials::from_env`].
    pub fn from_env() -> Result<Self, ZendeskError> {
        Self::new(Credentials::from_env()?)
    }

    /// Creates a client from `ZENDESK_DOMAIN`, `ZENDESK_EMAIL` and
    /// `ZENDESK_TOKEN`.
    ///
    /// # Errors
    ///
    /// See [`Credentials::from_env_token_only`].
    pub fn from_env_token_only() -> Result<Self, ZendeskError> {
        Self::new(Credentials::from_env_token_only()?)
    }

    /// Creates a client authenticating with an API token.
    ///
    /// # Errors
    ///
    /// See [`Client::new`].
    pub fn from_token(
        subdomain: impl Into<String>,
        email: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ZendeskError> {
        Self::new(Credentials::token(subdomain, email, token))
    }

    /// Creates a client authenticating with the account password.
    ///
    /// # Errors
    ///
    /// See [`Client::new`].
    pub fn from_password(
        subdomain: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ZendeskError> {
        Self::new(Credentials::password(subdomain, email, password))
    }

    /// The account subdomain.
    pub fn subdomain(&self) -> &str {
        &self.subdomain
    }

    /// Returns the absolute URL for an API path such as `/api/v2/users.json`.
    ///
    /// Plain formatting; the result is not validated.
    pub fn to_full_url(&self, path: &str) -> String {
        format!("https://{}.{}{}", self.subdomain, PROVIDER_HOST, path)
    }

    /// Accessor for the users API, with a background context.
    pub fn users(&self) -> Users {
        Users::new(self.clone(), Context::background())
    }

    /// Sends a GET request to an API path.
    pub async fn get<T>(
        &self,
        ctx: &Context,
        path: &str,
        query: Option<QueryParams>,
    ) -> Result<T, ZendeskError>
    where
        T: DeserializeOwned,
    {
        self.http.get(ctx, &self.to_full_url(path), query).await
    }

    /// Sends a POST request to an API path.
    pub async fn post<B, T>(&self, ctx: &Context, path: &str, body: &B) -> Result<T, ZendeskError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.http.post(ctx, &self.to_full_url(path), body).await
    }

    /// Sends a PUT request to an API path.
    pub async fn put<B, T>(&self, ctx: &Context, path: &str, body: &B) -> Result<T, ZendeskError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.http.put(ctx, &self.to_full_url(path), body).await
    }

    /// Sends a DELETE request to an API path.
    pub async fn delete<T>(&self, ctx: &Context, path: &str) -> Result<T, ZendeskError>
    where
        T: DeserializeOwned,
    {
        self.http.delete(ctx, &self.to_full_url(path)).await
    }
}

/// Checks that `subdomain` can be used as a host label.
pub(crate) fn validate_subdomain(subdomain: &str) -> Result<(), ZendeskError> {
    if subdomain.trim().is_empty() {
        return Err(ZendeskError::DomainNotSet);
    }
    if subdomain.chars().any(char::is_whitespace) {
        return Err(ZendeskError::InvalidSubdomain {
            subdomain: subdomain.to_string(),
        });
    }
    Ok(())
}
