//! Generated content artifacts and the keys that correlate them.

use crate::SplitContent;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Correlates one rule firing (or manual action) to its generated content and
/// publish attempts.
///
/// Scheduled keys embed the rule id plus the fired minute, so two firings of
/// the same rule on different days (or a re-created rule) never collide.
///
/// # Examples
///
/// ```
/// use utamaro_core::TriggerKey;
/// use chrono::NaiveDate;
///
/// let minute = NaiveDate::from_ymd_opt(2024, 4, 1)
///     .unwrap()
///     .and_hms_opt(9, 0, 0)
///     .unwrap();
/// let key = TriggerKey::scheduled(1717000000000, minute);
/// assert_eq!(key.as_str(), "auto-1717000000000-202404010900");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub struct TriggerKey(String);

impl TriggerKey {
    /// Key for an automated rule firing at the given minute.
    pub fn scheduled(rule_id: i64, minute: NaiveDateTime) -> Self {
        Self(format!("auto-{rule_id}-{}", minute.format("%Y%m%d%H%M")))
    }

    /// Key for a manually initiated action.
    pub fn manual(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The result of generation and splitting for one trigger key.
///
/// Both channel texts are always populated once generation succeeds; when the
/// splitter found no markers, both carry the full raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentArtifact {
    /// Key correlating this artifact to its firing.
    pub key: TriggerKey,
    /// Text destined for the Google Business Profile post.
    pub google_text: String,
    /// Caption destined for the Instagram post.
    pub instagram_text: String,
}

impl ContentArtifact {
    /// Build an artifact from split content.
    pub fn new(key: TriggerKey, content: SplitContent) -> Self {
        Self {
            key,
            google_text: content.google,
            instagram_text: content.instagram,
        }
    }
}
