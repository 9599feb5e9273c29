//! Attachment models, used for user photos.

use serde::{Deserialize, Serialize};

/// A file stored by Zendesk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique attachment ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Original file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    /// Full URL where the file can be downloaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,

    /// MIME type, e.g. `image/png`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Size in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Whether the file is shown inline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,

    /// Generated thumbnails.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub thumbnails: Vec<Attachment>,
}
