//! zendesk-users - list the users of a Zendesk account.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `ZENDESK_DOMAIN`: account subdomain
//! - `ZENDESK_EMAIL`: email of the authenticating user
//! - `ZENDESK_TOKEN` or `ZENDESK_PASSWORD`
//!
//! # Usage
//!
//! ```bash
//! ZENDESK_DOMAIN=acme ZENDESK_EMAIL=agent@acme.com ZENDESK_TOKEN=xxx ./zendesk-users
//! ```

use std::time::Duration;

use anyhow::{Context as _, Result};
use tracing_subscriber::{fmt, EnvFilter};

use zendesk::{Client, Context};

/// Upper bound on the whole listing call.
const LIST_TIMEOUT_SECS: u64 = 60;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zendesk=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = Client::from_env().context("Failed to load configuration")?;

    tracing::debug!(subdomain = client.subdomain(), "Client initialized");

    let ctx = Context::background().with_timeout(Duration::from_secs(LIST_TIMEOUT_SECS));
    let users = client
        .users()
        .with_context(ctx)
        .list()
        .await
        .context("Failed to list users")?;

    tracing::info!("found {} users", users.len());

    for user in &users {
        println!(
            "{}\t{}\t{}",
            user.id.map(|id| id.to_string()).unwrap_or_default(),
            user.display_name(),
            user.email.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
