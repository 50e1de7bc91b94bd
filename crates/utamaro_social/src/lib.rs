//! Platform publishers for Utamaro.
//!
//! One generic create→poll→publish state machine ([`Publisher`]) drives both
//! destinations; the per-platform wire formats, validation ceilings, and
//! status mappings live behind the [`PlatformAdapter`] trait.
//!
//! # Architecture
//!
//! - **publisher**: the state machine — pre-flight validation, container
//!   create, bounded status polling, commit
//! - **adapter**: the trait each platform implements
//! - **instagram**: Facebook Graph API v19.0 adapter (feed, reel, story)
//! - **google**: Google Business Profile local-posts adapter
//! - **drive**: fresh-URL media resolver for Drive-hosted media
//!
//! Publishers hold no cross-call state; every attempt is independent, and an
//! error in one platform's attempt never touches the other's.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod drive;
mod google;
mod instagram;
mod publisher;

pub use adapter::{BoxedAdapter, Container, ContainerStatus, PlatformAdapter, PollPolicy};
pub use drive::DriveMediaResolver;
pub use google::{GoogleBusinessAdapter, GoogleCredentials};
pub use instagram::InstagramAdapter;
pub use publisher::Publisher;
