//! Data models for the Zendesk API.
//!
//! Only the user entity and the types it embeds or returns are modeled.

mod attachment;
mod job_status;
mod user;

pub use attachment::*;
pub use job_status::*;
pub use user::*;
