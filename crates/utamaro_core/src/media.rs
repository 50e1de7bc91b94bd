//! Media references attached to rules and drafts.

use serde::{Deserialize, Serialize};

/// Kind of media a rule posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image (feed photo).
    Image,
    /// Video (submitted as a reel, or a video story).
    Video,
}

/// A reference to media stored outside the orchestrator.
///
/// The `file_id` points back into the external media store so the URL can be
/// refreshed to a fresh download link right before publishing. A refresh
/// failure is non-fatal; the last known `url` is used instead.
///
/// # Examples
///
/// ```
/// use utamaro_core::{MediaKind, MediaRef};
///
/// let media = MediaRef {
///     url: "https://drive.google.com/uc?id=abc123&export=download".to_string(),
///     kind: MediaKind::Image,
///     file_id: Some("abc123".to_string()),
/// };
/// assert_eq!(media.kind, MediaKind::Image);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Last known direct URL for the media.
    pub url: String,
    /// Image or video.
    #[serde(default = "default_kind", rename = "media_type")]
    pub kind: MediaKind,
    /// Identifier in the external media store, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
}

fn default_kind() -> MediaKind {
    MediaKind::Image
}
