//! Trait definitions for the orchestrator's collaborators.

use crate::GenerationRequest;
use async_trait::async_trait;
use utamaro_error::{GenerationError, UtamaroResult};

/// The content generation seam.
///
/// One outbound call per request; a failure is surfaced immediately and is
/// fatal to the rule firing that requested it. Implementations apply no
/// retry policy of their own.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate raw text for the request.
    ///
    /// The returned text may carry the per-channel section markers the
    /// splitter understands.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Model identifier (e.g., "gemini-2.5-flash").
    fn model_name(&self) -> &str;
}

/// The media resolver seam.
///
/// Supplies a fresh direct URL for a stored media file right before a
/// publish. Callers treat a failure as non-fatal and fall back to the last
/// known URL.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Resolve a fresh download URL for the given file id.
    async fn fresh_url(&self, file_id: &str) -> UtamaroResult<String>;
}

/// The settings store seam.
///
/// The orchestrator reads configuration and rules as snapshots out-of-band;
/// the only write it ever performs is recording a discovered platform
/// identifier, and callers guard that write by value comparison so it stays
/// idempotent.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Persist the discovered Instagram business account id.
    async fn record_instagram_business_id(&self, id: &str) -> UtamaroResult<()>;
}
