//! Core data types for the Utamaro publish orchestrator.
//!
//! This crate provides the foundation data types shared across the workspace,
//! plus the two pure functions at the heart of the scheduler: the rule
//! matcher and the content splitter. Nothing here performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod attempt;
mod audience;
mod draft;
pub mod matcher;
mod media;
mod notification;
mod rule;
pub mod splitter;

pub use artifact::{ContentArtifact, TriggerKey};
pub use attempt::{Platform, PublishAttempt, PublishState};
pub use audience::TargetAudience;
pub use draft::PostDraft;
pub use media::{MediaKind, MediaRef};
pub use notification::{Notification, Severity};
pub use rule::{Cadence, ClockMinute, PostingRule};
pub use splitter::SplitContent;
