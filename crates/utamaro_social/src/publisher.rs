//! The generic create→poll→publish state machine.

use crate::{Container, ContainerStatus, PlatformAdapter, PollPolicy};
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use utamaro_core::{PostDraft, PublishAttempt, PublishState, TriggerKey};
use utamaro_error::{PublishError, PublishErrorKind};

/// Drives one platform's publish flow for one attempt at a time.
///
/// The machine walks `Idle → ContainerRequested → Processing → Finished →
/// Published`, with `Failed` and `TimedOut` as the error terminals. Every
/// outcome is recorded on the returned [`PublishAttempt`]; nothing is
/// persisted and nothing is retried. Callers must not invoke `publish`
/// concurrently for the same (key, platform) pair.
pub struct Publisher<A> {
    adapter: A,
    poll: PollPolicy,
}

impl<A: PlatformAdapter> Publisher<A> {
    /// Wrap an adapter with the default 20×2 s polling policy.
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            poll: PollPolicy::default(),
        }
    }

    /// Override the polling policy.
    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// The wrapped adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Execute the full publish flow for one draft.
    ///
    /// Always returns an attempt in a terminal state; errors are captured on
    /// `last_error` rather than propagated, so the caller can report each
    /// platform independently.
    #[instrument(skip(self, draft), fields(platform = %self.adapter.platform(), key = %key))]
    pub async fn publish(&self, key: TriggerKey, draft: &PostDraft) -> PublishAttempt {
        let mut attempt = PublishAttempt::new(self.adapter.platform(), key);

        if let Err(e) = self.preflight(draft) {
            warn!(error = %e, "Pre-flight validation failed, nothing submitted");
            fail(&mut attempt, PublishState::Failed, &e);
            return attempt;
        }

        attempt.state = PublishState::ContainerRequested;
        debug!("Submitting container create");
        let container = match self.adapter.create_container(draft).await {
            Ok(container) => container,
            Err(e) => {
                warn!(error = %e, "Container create rejected");
                fail(&mut attempt, PublishState::Failed, &e);
                return attempt;
            }
        };
        attempt.external_id = Some(container.id.clone());

        attempt.state = PublishState::Processing;
        if let Err(e) = self.await_processing(&container).await {
            let terminal = if e.is_timeout() {
                PublishState::TimedOut
            } else {
                PublishState::Failed
            };
            warn!(error = %e, "Processing did not finish");
            fail(&mut attempt, terminal, &e);
            return attempt;
        }

        attempt.state = PublishState::Finished;
        debug!(container = %container.id, "Container ready, committing");
        match self.adapter.commit(&container).await {
            Ok(post_id) => {
                attempt.external_id = Some(post_id);
                attempt.state = PublishState::Published;
                info!("Publish succeeded");
            }
            Err(e) => {
                warn!(error = %e, "Commit rejected");
                fail(&mut attempt, PublishState::Failed, &e);
            }
        }
        attempt
    }

    fn preflight(&self, draft: &PostDraft) -> Result<(), PublishError> {
        let count = draft.text.chars().count();
        let limit = self.adapter.text_limit();
        if count > limit {
            return Err(PublishError::new(PublishErrorKind::Validation(format!(
                "text is {count} characters, the {} ceiling is {limit}",
                self.adapter.platform()
            ))));
        }
        self.adapter.validate(draft)
    }

    /// Poll until the container is ready, errors out, or the ceiling is hit.
    async fn await_processing(&self, container: &Container) -> Result<(), PublishError> {
        for _ in 0..self.poll.max_attempts {
            sleep(self.poll.interval).await;
            match self.adapter.container_status(container).await? {
                ContainerStatus::Ready => return Ok(()),
                ContainerStatus::InProgress => continue,
                ContainerStatus::Error(message) => {
                    return Err(PublishError::new(PublishErrorKind::Processing(message)));
                }
            }
        }
        Err(PublishError::new(PublishErrorKind::Timeout {
            attempts: self.poll.max_attempts,
        }))
    }
}

fn fail(attempt: &mut PublishAttempt, state: PublishState, err: &PublishError) {
    attempt.state = state;
    attempt.last_error = Some(err.kind().to_string());
}
