//! Shared per-firing publish status.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use utamaro_core::{PublishState, TriggerKey};

/// Coarse per-platform status shown to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStatus {
    /// The attempt is in flight.
    Posting,
    /// The attempt reached the published state.
    Success,
    /// The attempt ended in failure or timeout.
    Error,
}

impl From<PublishState> for ChannelStatus {
    fn from(state: PublishState) -> Self {
        match state {
            PublishState::Published => ChannelStatus::Success,
            PublishState::Failed | PublishState::TimedOut => ChannelStatus::Error,
            _ => ChannelStatus::Posting,
        }
    }
}

/// The two platform channels of one firing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiringStatus {
    /// Google Business Profile channel, if this firing targets it.
    pub google: Option<ChannelStatus>,
    /// Instagram channel, if this firing targets it.
    pub instagram: Option<ChannelStatus>,
}

/// Concurrent map from trigger key to channel statuses.
///
/// Firing tasks write here as their attempts advance; readers take cheap
/// snapshots. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct StatusBoard {
    inner: Arc<RwLock<HashMap<TriggerKey, FiringStatus>>>,
}

impl StatusBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the Google channel status for a firing.
    pub async fn set_google(&self, key: &TriggerKey, status: ChannelStatus) {
        let mut map = self.inner.write().await;
        map.entry(key.clone()).or_default().google = Some(status);
    }

    /// Set the Instagram channel status for a firing.
    pub async fn set_instagram(&self, key: &TriggerKey, status: ChannelStatus) {
        let mut map = self.inner.write().await;
        map.entry(key.clone()).or_default().instagram = Some(status);
    }

    /// Read one firing's status.
    pub async fn get(&self, key: &TriggerKey) -> Option<FiringStatus> {
        self.inner.read().await.get(key).copied()
    }

    /// Snapshot the whole board.
    pub async fn snapshot(&self) -> HashMap<TriggerKey, FiringStatus> {
        self.inner.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channels_update_independently() {
        let board = StatusBoard::new();
        let key = TriggerKey::manual("status-test");

        board.set_google(&key, ChannelStatus::Posting).await;
        board.set_instagram(&key, ChannelStatus::Posting).await;
        board.set_google(&key, ChannelStatus::Success).await;

        let status = board.get(&key).await.unwrap();
        assert_eq!(status.google, Some(ChannelStatus::Success));
        assert_eq!(status.instagram, Some(ChannelStatus::Posting));
    }

    #[test]
    fn terminal_states_map_to_operator_statuses() {
        assert_eq!(
            ChannelStatus::from(PublishState::Published),
            ChannelStatus::Success
        );
        assert_eq!(
            ChannelStatus::from(PublishState::Failed),
            ChannelStatus::Error
        );
        assert_eq!(
            ChannelStatus::from(PublishState::TimedOut),
            ChannelStatus::Error
        );
        assert_eq!(
            ChannelStatus::from(PublishState::Processing),
            ChannelStatus::Posting
        );
    }
}
