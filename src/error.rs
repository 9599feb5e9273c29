//! Error types for the Zendesk client.
//!
//! This module defines `ZendeskError`, the single error type returned by
//! every operation in the crate.
//!
//! # Categories
//!
//! - Configuration errors are raised while building a client, before any
//!   network attempt. Each missing setting has its own variant.
//! - Transport errors come straight from the HTTP layer. The client never
//!   retries them or reinterprets status codes.
//! - Context errors report that the caller's cancellation token fired or
//!   its deadline passed while a request was in flight.
//! - `NotImplemented` is returned by operations the client deliberately
//!   does not support yet.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for all Zendesk client operations.
#[derive(Error, Debug)]
pub enum ZendeskError {
    /// The account subdomain is missing or blank.
    #[error("ZENDESK_DOMAIN not set")]
    DomainNotSet,

    /// The account subdomain contains whitespace.
    #[error("invalid ZENDESK_DOMAIN {subdomain:?}: must not contain whitespace")]
    InvalidSubdomain {
        /// The rejected subdomain.
        subdomain: String,
    },

    /// The account email is missing or blank.
    #[error("ZENDESK_EMAIL not set")]
    EmailNotSet,

    /// Neither an API token nor a password was supplied.
    #[error("neither ZENDESK_TOKEN nor ZENDESK_PASSWORD set")]
    NoSecretProvided,

    /// The API token is missing in token-only mode.
    #[error("ZENDESK_TOKEN not set")]
    TokenNotSet,

    /// Both an API token and a password were supplied.
    #[error("both ZENDESK_TOKEN and ZENDESK_PASSWORD set - provide exactly one")]
    ConflictingSecrets,

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP response returned a non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: StatusCode,
        /// The raw response body.
        body: String,
    },

    /// The target URL could not be parsed.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
        /// The underlying parse failure.
        #[source]
        source: url::ParseError,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The caller cancelled the request.
    #[error("request cancelled")]
    Cancelled,

    /// The caller's deadline passed before the response arrived.
    #[error("request deadline exceeded")]
    DeadlineExceeded,

    /// The operation is not supported by this client yet.
    #[error("feature not yet implemented")]
    NotImplemented,
}

impl ZendeskError {
    /// Returns true for errors raised while building a client.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ZendeskError::DomainNotSet
                | ZendeskError::InvalidSubdomain { .. }
                | ZendeskError::EmailNotSet
                | ZendeskError::NoSecretProvided
                | ZendeskError::TokenNotSet
                | ZendeskError::ConflictingSecrets
        )
    }

    /// Returns true if this is the not-implemented sentinel.
    #[must_use]
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, ZendeskError::NotImplemented)
    }

    /// Returns true if the request was abandoned because of its context.
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ZendeskError::Cancelled | ZendeskError::DeadlineExceeded)
    }

    /// Returns the HTTP status code carried by this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ZendeskError::HttpStatus { status, .. } => Some(*status),
            ZendeskError::Http(e) => e.status(),
            _ => None,
        }
    }
}
