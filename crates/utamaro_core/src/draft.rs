//! Post drafts handed to the platform publishers.

use crate::MediaRef;
use serde::{Deserialize, Serialize};

/// The material one platform publisher submits for one attempt.
///
/// A story draft carries media only; the platform ignores captions on
/// stories, so none is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    /// Post text or caption. Empty for story drafts.
    pub text: String,
    /// Media to attach, if any. A text-only post omits media entirely.
    pub media: Option<MediaRef>,
    /// Submit as a story rather than a feed post.
    pub story: bool,
}

impl PostDraft {
    /// A regular feed post.
    pub fn feed(text: impl Into<String>, media: Option<MediaRef>) -> Self {
        Self {
            text: text.into(),
            media,
            story: false,
        }
    }

    /// A media-only story post.
    pub fn story(media: MediaRef) -> Self {
        Self {
            text: String::new(),
            media: Some(media),
            story: true,
        }
    }
}
