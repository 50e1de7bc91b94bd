//! Scheduler loop and publish orchestration.
//!
//! The [`Orchestrator`] owns the recurring timer: each tick it matches the
//! rule snapshot against the wall clock, and for every due rule spawns an
//! independent task that generates content, splits it, and publishes to both
//! platforms concurrently. Per-platform status lands on the [`StatusBoard`];
//! operator-facing progress goes out over the notification channel.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod orchestrator;
mod status;

pub use config::{
    AppConfig, GeminiSettings, GenerationSettings, GoogleSettings, InstagramSettings, RuleSet,
};
pub use orchestrator::{record_discovered_business_id, Orchestrator};
pub use status::{ChannelStatus, FiringStatus, StatusBoard};
