//! # Zendesk
//!
//! A typed async client for the Zendesk REST API.
//!
//! ## Features
//!
//! - **Authentication**: API token or account password, via HTTP Basic
//! - **Users**: list, show, search, create, delete, relation counts
//! - **Cancellation**: every call runs under a [`Context`] carrying a
//!   cancellation token and an optional deadline
//! - **Injectable transport**: swap the HTTP layer for tests or custom stacks
//! - **Security**: credentials are never logged or printed by `Debug`
//!
//! ## Architecture
//!
//! - [`auth`] - Credential strategies and request signing
//! - [`config`] - Loading credentials from environment variables
//! - [`transport`] - Raw HTTP transport and the JSON verb client
//! - [`client`] - Account-bound API client and URL construction
//! - [`users`] - The users resource accessor
//! - [`envelope`] - Response envelope unwrapping
//! - [`context`] - Cancellation and deadline context
//! - [`models`] - Data models for API payloads
//! - [`error`] - The crate's error type
//!
//! ## Configuration
//!
//! [`Client::from_env`] reads:
//!
//! - `ZENDESK_DOMAIN`: account subdomain (`acme` for `acme.zendesk.com`)
//! - `ZENDESK_EMAIL`: email of the authenticating user
//! - `ZENDESK_TOKEN` or `ZENDESK_PASSWORD`: exactly one of the two
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//! use zendesk::{Client, Context};
//!
//! async fn example() -> Result<(), zendesk::ZendeskError> {
//!     let client = Client::from_env()?;
//!
//!     let ctx = Context::background().with_timeout(Duration::from_secs(10));
//!     let users = client.users().with_context(ctx);
//!
//!     for user in users.list().await? {
//!         println!("{}: {}", user.id.unwrap_or_default(), user.display_name());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod envelope;
pub mod error;
pub mod models;
pub mod params;
pub mod transport;
pub mod users;

#[cfg(test)]
mod test_support;

pub use auth::Credentials;
pub use client::Client;
pub use context::Context;
pub use error::ZendeskError;
pub use params::QueryParams;
pub use users::Users;
