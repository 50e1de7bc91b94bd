//! Trait seams between the Utamaro orchestrator and its external
//! collaborators.
//!
//! The orchestrator consumes the content generator, the media resolver, and
//! the settings store exclusively through these narrow interfaces, so tests
//! can substitute mocks and production can wire real clients.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ContentGenerator, MediaResolver, SettingsStore};
pub use types::GenerationRequest;
