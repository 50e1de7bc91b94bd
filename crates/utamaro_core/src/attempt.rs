//! Per-platform publish attempt records.

use crate::TriggerKey;
use serde::{Deserialize, Serialize};

/// A publishing destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Google Business Profile local posts.
    #[display("google")]
    GoogleBusiness,
    /// Instagram business account via the Graph API.
    #[display("instagram")]
    Instagram,
}

/// States of the create→poll→publish machine.
///
/// `Published` is the only success terminal; `Failed` and `TimedOut` are the
/// error terminals, reachable from `ContainerRequested` or `Processing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum PublishState {
    /// Nothing submitted yet.
    Idle,
    /// Container-create request submitted.
    ContainerRequested,
    /// Platform is processing the container asynchronously.
    Processing,
    /// Platform finished processing; ready to commit.
    Finished,
    /// Commit succeeded.
    Published,
    /// Platform rejected a request or reported a processing error.
    Failed,
    /// Polling ceiling exhausted without a terminal platform state.
    TimedOut,
}

impl PublishState {
    /// Whether this state ends the attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PublishState::Published | PublishState::Failed | PublishState::TimedOut
        )
    }
}

/// Execution record for one (trigger key, platform) publish.
///
/// Attempts live in memory for the current process only; there is no outbox
/// or retry-on-restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishAttempt {
    /// The destination platform.
    pub platform: Platform,
    /// Key correlating the attempt to its artifact.
    pub key: TriggerKey,
    /// Current state of the machine.
    pub state: PublishState,
    /// Platform-assigned container or post id once known.
    pub external_id: Option<String>,
    /// Error message, present only in the error terminals.
    pub last_error: Option<String>,
}

impl PublishAttempt {
    /// Start a fresh attempt in `Idle`.
    pub fn new(platform: Platform, key: TriggerKey) -> Self {
        Self {
            platform,
            key,
            state: PublishState::Idle,
            external_id: None,
            last_error: None,
        }
    }

    /// Whether the attempt reached the success terminal.
    pub fn succeeded(&self) -> bool {
        self.state == PublishState::Published
    }
}
