//! The per-platform adapter seam of the publish state machine.

use async_trait::async_trait;
use std::time::Duration;
use utamaro_core::{Platform, PostDraft};
use utamaro_error::PublishResult;

/// A platform-side staging object for not-yet-published content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Platform-assigned container identifier.
    pub id: String,
}

/// Outcome of one status poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerStatus {
    /// Processing finished; the container can be committed.
    Ready,
    /// Still processing; poll again.
    InProgress,
    /// The platform reported an internal processing failure.
    Error(String),
}

/// Polling policy for the processing phase.
///
/// The reference ceiling is 20 polls at 2-second intervals, a hard 40-second
/// cap per attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Fixed delay before each status poll.
    pub interval: Duration,
    /// Maximum number of polls before the attempt times out.
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 20,
        }
    }
}

/// Wire-format mapping for one publishing destination.
///
/// Implementations are stateless services: the [`Publisher`] drives the
/// state machine and calls these hooks in order. Platforms without an
/// asynchronous processing phase report [`ContainerStatus::Ready`] on the
/// first poll and acknowledge `commit` without a further network call.
///
/// [`Publisher`]: crate::Publisher
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    /// Which platform this adapter submits to.
    fn platform(&self) -> Platform;

    /// Upstream text-length ceiling in characters.
    fn text_limit(&self) -> usize;

    /// Platform-specific pre-flight checks beyond the length ceiling.
    ///
    /// Runs before any network call; a failure here is never submitted
    /// upstream.
    fn validate(&self, draft: &PostDraft) -> PublishResult<()> {
        let _ = draft;
        Ok(())
    }

    /// Submit the container-create request.
    async fn create_container(&self, draft: &PostDraft) -> PublishResult<Container>;

    /// Poll the container's processing status once.
    async fn container_status(&self, container: &Container) -> PublishResult<ContainerStatus>;

    /// Issue the publish/commit call; returns the published post id.
    async fn commit(&self, container: &Container) -> PublishResult<String>;
}

#[async_trait]
impl<A: PlatformAdapter + ?Sized> PlatformAdapter for Box<A> {
    fn platform(&self) -> Platform {
        (**self).platform()
    }

    fn text_limit(&self) -> usize {
        (**self).text_limit()
    }

    fn validate(&self, draft: &PostDraft) -> PublishResult<()> {
        (**self).validate(draft)
    }

    async fn create_container(&self, draft: &PostDraft) -> PublishResult<Container> {
        (**self).create_container(draft).await
    }

    async fn container_status(&self, container: &Container) -> PublishResult<ContainerStatus> {
        (**self).container_status(container).await
    }

    async fn commit(&self, container: &Container) -> PublishResult<String> {
        (**self).commit(container).await
    }
}

/// A publisher over a type-erased adapter, the form the orchestrator holds.
pub type BoxedAdapter = Box<dyn PlatformAdapter>;
