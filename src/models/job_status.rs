//! Background job status, returned by bulk endpoints.

use serde::{Deserialize, Serialize};

/// Progress of a background job such as a bulk user import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    /// Job ID.
    #[serde(default)]
    pub id: Option<String>,

    /// API URL to poll for progress.
    #[serde(default)]
    pub url: Option<String>,

    /// Total number of tasks.
    #[serde(default)]
    pub total: Option<u64>,

    /// Number of tasks finished.
    #[serde(default)]
    pub progress: Option<u64>,

    /// `queued`, `working`, `failed`, `completed` or `killed`.
    #[serde(default)]
    pub status: Option<String>,

    /// Status message.
    #[serde(default)]
    pub message: Option<String>,

    /// Per-task results once the job completes.
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}
