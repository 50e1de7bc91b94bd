//! Request types carried across the trait seams.

use serde::{Deserialize, Serialize};
use utamaro_core::TargetAudience;

/// One content generation request.
///
/// # Examples
///
/// ```
/// use utamaro_interface::GenerationRequest;
/// use utamaro_core::TargetAudience;
///
/// let request = GenerationRequest {
///     prompt: "テーマ: 春メニュー".to_string(),
///     audience: TargetAudience::General,
///     keywords: vec!["炭酸スパ".to_string()],
/// };
/// assert!(request.prompt.contains("春メニュー"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Free-text prompt seed, typically `テーマ: {topic}`.
    pub prompt: String,
    /// Persona the text should speak to.
    pub audience: TargetAudience,
    /// Currently active keyword set to weave into the text.
    pub keywords: Vec<String>,
}

impl GenerationRequest {
    /// Request for a scheduled rule's topic.
    pub fn for_topic(
        topic: &str,
        audience: TargetAudience,
        keywords: Vec<String>,
    ) -> Self {
        Self {
            prompt: format!("テーマ: {topic}"),
            audience,
            keywords,
        }
    }
}
