//! HTTP transport for the Zendesk API.
//!
//! Two layers live here:
//!
//! - [`Transport`] performs one raw round trip and returns the response
//!   body. [`ReqwestTransport`] is the production implementation and signs
//!   every request with a [`RequestSigner`]. Tests inject their own.
//! - [`HttpClient`] wraps a transport with verb methods, JSON encoding and
//!   decoding, and cancellation through a [`Context`].
//!
//! Neither layer knows anything about Zendesk resources, retries failed
//! requests, or interprets status codes beyond success/failure.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::auth::RequestSigner;
use crate::context::Context;
use crate::error::ZendeskError;
use crate::params::QueryParams;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A single outgoing request, fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute target URL, without query string.
    pub url: String,
    /// Query parameters appended to the URL.
    pub query: Option<QueryParams>,
    /// JSON request body.
    pub body: Option<serde_json::Value>,
}

impl TransportRequest {
    /// Creates a request with no query and no body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: None,
            body: None,
        }
    }

    /// Attaches query parameters.
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = Some(query);
        self
    }

    /// Attaches a JSON body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The URL with the query string applied.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::InvalidUrl` if `url` does not parse.
    pub fn full_url(&self) -> Result<Url, ZendeskError> {
        let mut url = Url::parse(&self.url).map_err(|source| ZendeskError::InvalidUrl {
            url: self.url.clone(),
            source,
        })?;
        if let Some(query) = self.query.as_ref().filter(|q| !q.is_empty()) {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }
}

/// A generic HTTP capability: one request in, one response body out.
///
/// Implementations must be safe to share between tasks and must not keep
/// per-call mutable state.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs the round trip and returns the raw body of a 2xx response.
    ///
    /// # Errors
    ///
    /// Connection failures and non-2xx statuses.
    async fn send(&self, request: TransportRequest) -> Result<Vec<u8>, ZendeskError>;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// Applied to every request.
    /// SECURITY: the signer captures credentials, never log it.
    signer: RequestSigner,
}

impl ReqwestTransport {
    /// Creates a transport with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(signer: RequestSigner) -> Result<Self, ZendeskError> {
        Self::with_timeout(signer, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns `ZendeskError::HttpClient` if the HTTP client fails to initialize.
    pub fn with_timeout(signer: RequestSigner, timeout: Duration) -> Result<Self, ZendeskError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ZendeskError::HttpClient)?;
        Ok(Self::from_client(http, signer))
    }

    /// Wraps an already configured `reqwest::Client`.
    pub fn from_client(http: Client, signer: RequestSigner) -> Self {
        Self { http, signer }
    }
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("http", &self.http)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<Vec<u8>, ZendeskError> {
        let url = request.full_url()?;

        tracing::debug!(
            method = %request.method,
            url = %url,
            "Making Zendesk API request"
        );

        let mut req = (self.signer)(self.http.request(request.method, url))
            .header(ACCEPT, "application/json");
        if let Some(body) = &request.body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(ZendeskError::Http)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.map_err(ZendeskError::Http)?;
            return Err(ZendeskError::HttpStatus { status, body });
        }

        let body = response.bytes().await.map_err(ZendeskError::Http)?;

        tracing::trace!(status = %status, bytes = body.len(), "Zendesk API response");

        Ok(body.to_vec())
    }
}

/// Verb-based JSON client over any [`Transport`].
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct HttpClient {
    transport: Arc<dyn Transport>,
}

impl HttpClient {
    /// Wraps a transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Sends a GET request and decodes the response.
    pub async fn get<T>(
        &self,
        ctx: &Context,
        url: &str,
        query: Option<QueryParams>,
    ) -> Result<T, ZendeskError>
    where
        T: DeserializeOwned,
    {
        let mut request = TransportRequest::new(Method::GET, url);
        request.query = query;
        self.execute(ctx, request).await
    }

    /// Sends a POST request with a JSON body and decodes the response.
    pub async fn post<B, T>(&self, ctx: &Context, url: &str, body: &B) -> Result<T, ZendeskError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = TransportRequest::new(Method::POST, url).with_body(serde_json::to_value(body)?);
        self.execute(ctx, request).await
    }

    /// Sends a PUT request with a JSON body and decodes the response.
    pub async fn put<B, T>(&self, ctx: &Context, url: &str, body: &B) -> Result<T, ZendeskError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = TransportRequest::new(Method::PUT, url).with_body(serde_json::to_value(body)?);
        self.execute(ctx, request).await
    }

    /// Sends a DELETE request and decodes the response.
    pub async fn delete<T>(&self, ctx: &Context, url: &str) -> Result<T, ZendeskError>
    where
        T: DeserializeOwned,
    {
        self.execute(ctx, TransportRequest::new(Method::DELETE, url))
            .await
    }

    /// Runs one request, abandoning it if `ctx` finishes first.
    async fn execute<T>(&self, ctx: &Context, request: TransportRequest) -> Result<T, ZendeskError>
    where
        T: DeserializeOwned,
    {
        if let Some(err) = ctx.err() {
            return Err(err);
        }

        let body = tokio::select! {
            biased;
            err = ctx.done() => return Err(err),
            body = self.transport.send(request) => body?,
        };

        Ok(serde_json::from_slice(&body)?)
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient").finish_non_exhaustive()
    }
}
