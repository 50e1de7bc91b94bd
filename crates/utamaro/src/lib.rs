//! Utamaro - Scheduled Multi-Platform Publish Orchestrator
//!
//! Utamaro turns time-based posting rules into published social content. A
//! 60-second scheduler loop matches rules against the wall clock; each due
//! rule generates Japanese salon copy with Gemini, splits it into
//! per-channel sections, and publishes concurrently to Google Business
//! Profile and Instagram through one generic create→poll→publish state
//! machine.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use utamaro::{
//!     AppConfig, DriveMediaResolver, GeminiClient, GoogleBusinessAdapter,
//!     GoogleCredentials, InstagramAdapter, Orchestrator, Publisher,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_file("utamaro.toml")?;
//!     config.validate()?;
//!
//!     let gemini = GeminiClient::with_model(&config.gemini.api_key, &config.gemini.model)?;
//!     let instagram = InstagramAdapter::new(
//!         &config.instagram.access_token,
//!         config.instagram.business_id.clone().unwrap_or_default(),
//!     );
//!     let google = GoogleBusinessAdapter::new(
//!         GoogleCredentials {
//!             client_id: config.google.client_id.clone(),
//!             client_secret: config.google.client_secret.clone(),
//!             refresh_token: config.google.refresh_token.clone(),
//!         },
//!         &config.google.location_id,
//!         &config.google.action_url,
//!     );
//!
//!     let (orchestrator, mut notifications) = Orchestrator::new(
//!         Arc::new(gemini),
//!         Arc::new(DriveMediaResolver::new()),
//!         Publisher::new(Box::new(google) as _),
//!         Publisher::new(Box::new(instagram) as _),
//!         config.rules.clone(),
//!         config.generation.keywords.clone(),
//!     );
//!     tokio::spawn(async move {
//!         while let Some(n) = notifications.recv().await {
//!             println!("[{}] {}", n.severity, n.message);
//!         }
//!     });
//!     orchestrator.run().await;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Utamaro is organized as a workspace with focused crates:
//!
//! - `utamaro_core` - Data types plus the rule matcher and content splitter
//! - `utamaro_interface` - Trait seams for the orchestrator's collaborators
//! - `utamaro_error` - Error types
//! - `utamaro_gemini` - Gemini REST client and prompt assembly
//! - `utamaro_social` - Platform publishers and the publish state machine
//! - `utamaro_scheduler` - The scheduler loop and configuration
//!
//! This crate (`utamaro`) re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use utamaro_core::{
    matcher, splitter, Cadence, ClockMinute, ContentArtifact, MediaKind, MediaRef, Notification,
    Platform, PostDraft, PostingRule, PublishAttempt, PublishState, Severity, SplitContent,
    TargetAudience, TriggerKey,
};
pub use utamaro_error::{
    ConfigError, GenerationError, GenerationErrorKind, PublishError, PublishErrorKind,
    PublishResult, UtamaroError, UtamaroErrorKind, UtamaroResult, ValidationError,
};
pub use utamaro_gemini::{build_prompt, GeminiClient};
pub use utamaro_interface::{ContentGenerator, GenerationRequest, MediaResolver, SettingsStore};
pub use utamaro_scheduler::{
    record_discovered_business_id, AppConfig, ChannelStatus, FiringStatus, GeminiSettings,
    GenerationSettings, GoogleSettings, InstagramSettings, Orchestrator, RuleSet, StatusBoard,
};
pub use utamaro_social::{
    BoxedAdapter, Container, ContainerStatus, DriveMediaResolver, GoogleBusinessAdapter,
    GoogleCredentials, InstagramAdapter, PlatformAdapter, PollPolicy, Publisher,
};
