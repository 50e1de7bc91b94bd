//! Tests for the generic create→poll→publish state machine.
//!
//! All tests run on tokio's paused clock, so the 2-second poll interval
//! advances without wall-clock sleeps.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use utamaro_core::{Platform, PostDraft, PublishState, TriggerKey};
use utamaro_error::{PublishError, PublishErrorKind, PublishResult};
use utamaro_social::{Container, ContainerStatus, PlatformAdapter, Publisher};

/// Scripted adapter behavior.
enum Script {
    /// Create succeeds; each poll reports in-progress forever.
    NeverFinishes,
    /// Create succeeds; ready after N polls; commit succeeds.
    FinishesAfter(u32),
    /// Create is rejected.
    CreateFails,
    /// Create succeeds; the platform reports a processing error on the
    /// first poll.
    ProcessingFails,
    /// Everything succeeds but the commit is rejected.
    CommitFails,
}

struct MockAdapter {
    script: Script,
    limit: usize,
    create_calls: AtomicU32,
    poll_calls: AtomicU32,
    commit_calls: AtomicU32,
}

impl MockAdapter {
    fn new(script: Script) -> Self {
        Self::with_limit(script, 2200)
    }

    fn with_limit(script: Script, limit: usize) -> Self {
        Self {
            script,
            limit,
            create_calls: AtomicU32::new(0),
            poll_calls: AtomicU32::new(0),
            commit_calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl PlatformAdapter for MockAdapter {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn text_limit(&self) -> usize {
        self.limit
    }

    async fn create_container(&self, _draft: &PostDraft) -> PublishResult<Container> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::CreateFails => Err(PublishError::new(PublishErrorKind::Request(
                "The caption is malformed (code 100)".to_string(),
            ))),
            _ => Ok(Container {
                id: "container-1".to_string(),
            }),
        }
    }

    async fn container_status(&self, _container: &Container) -> PublishResult<ContainerStatus> {
        let polls = self.poll_calls.fetch_add(1, Ordering::SeqCst) + 1;
        match self.script {
            Script::NeverFinishes => Ok(ContainerStatus::InProgress),
            Script::FinishesAfter(n) if polls >= n => Ok(ContainerStatus::Ready),
            Script::FinishesAfter(_) => Ok(ContainerStatus::InProgress),
            Script::ProcessingFails => {
                Ok(ContainerStatus::Error("media could not be decoded".to_string()))
            }
            _ => Ok(ContainerStatus::Ready),
        }
    }

    async fn commit(&self, container: &Container) -> PublishResult<String> {
        self.commit_calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::CommitFails => Err(PublishError::new(PublishErrorKind::Request(
                "publish returned HTTP 400".to_string(),
            ))),
            _ => Ok(format!("post-for-{}", container.id)),
        }
    }
}

fn key() -> TriggerKey {
    TriggerKey::manual("manual-test")
}

#[tokio::test(start_paused = true)]
async fn successful_flow_ends_published_with_post_id() {
    let publisher = Publisher::new(MockAdapter::new(Script::FinishesAfter(3)));
    let attempt = publisher.publish(key(), &PostDraft::feed("hello", None)).await;

    assert_eq!(attempt.state, PublishState::Published);
    assert_eq!(attempt.external_id.as_deref(), Some("post-for-container-1"));
    assert!(attempt.last_error.is_none());
    assert!(attempt.succeeded());
    assert_eq!(publisher.adapter().create_calls.load(Ordering::SeqCst), 1);
    assert_eq!(publisher.adapter().poll_calls.load(Ordering::SeqCst), 3);
    assert_eq!(publisher.adapter().commit_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn oversized_text_never_reaches_the_network() {
    let publisher = Publisher::new(MockAdapter::new(Script::FinishesAfter(1)));
    let oversized = "あ".repeat(2201);
    let attempt = publisher.publish(key(), &PostDraft::feed(oversized, None)).await;

    assert_eq!(attempt.state, PublishState::Failed);
    let message = attempt.last_error.unwrap();
    assert!(message.contains("Validation"), "got: {message}");
    assert!(message.contains("2200"), "got: {message}");
    assert_eq!(publisher.adapter().create_calls.load(Ordering::SeqCst), 0);
    assert_eq!(publisher.adapter().poll_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn summary_over_the_local_post_ceiling_is_rejected() {
    // The Google Business Profile summary ceiling is 1500 characters.
    let publisher = Publisher::new(MockAdapter::with_limit(Script::FinishesAfter(1), 1500));
    let oversized = "あ".repeat(1501);
    let attempt = publisher.publish(key(), &PostDraft::feed(oversized, None)).await;

    assert_eq!(attempt.state, PublishState::Failed);
    let message = attempt.last_error.unwrap();
    assert!(message.contains("Validation"), "got: {message}");
    assert!(message.contains("1500"), "got: {message}");
    assert_eq!(publisher.adapter().create_calls.load(Ordering::SeqCst), 0);

    let at_limit = "a".repeat(1500);
    let attempt = publisher.publish(key(), &PostDraft::feed(at_limit, None)).await;
    assert_eq!(attempt.state, PublishState::Published);
}

#[tokio::test(start_paused = true)]
async fn text_at_the_ceiling_is_submitted() {
    let publisher = Publisher::new(MockAdapter::new(Script::FinishesAfter(1)));
    let at_limit = "a".repeat(2200);
    let attempt = publisher.publish(key(), &PostDraft::feed(at_limit, None)).await;
    assert_eq!(attempt.state, PublishState::Published);
}

#[tokio::test(start_paused = true)]
async fn stuck_processing_times_out_after_exactly_twenty_polls() {
    let publisher = Publisher::new(MockAdapter::new(Script::NeverFinishes));
    let started = tokio::time::Instant::now();
    let attempt = publisher.publish(key(), &PostDraft::feed("hello", None)).await;

    assert_eq!(attempt.state, PublishState::TimedOut);
    assert_eq!(publisher.adapter().poll_calls.load(Ordering::SeqCst), 20);
    assert_eq!(publisher.adapter().commit_calls.load(Ordering::SeqCst), 0);
    assert!(attempt.last_error.unwrap().contains("20"));
    // 20 polls at 2 seconds each on the paused clock.
    assert_eq!(started.elapsed().as_secs(), 40);
}

#[tokio::test(start_paused = true)]
async fn rejected_container_fails_without_polling() {
    let publisher = Publisher::new(MockAdapter::new(Script::CreateFails));
    let attempt = publisher.publish(key(), &PostDraft::feed("hello", None)).await;

    assert_eq!(attempt.state, PublishState::Failed);
    assert!(attempt
        .last_error
        .unwrap()
        .contains("The caption is malformed (code 100)"));
    assert_eq!(publisher.adapter().poll_calls.load(Ordering::SeqCst), 0);
    assert_eq!(publisher.adapter().commit_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn processing_error_fails_without_commit() {
    let publisher = Publisher::new(MockAdapter::new(Script::ProcessingFails));
    let attempt = publisher.publish(key(), &PostDraft::feed("hello", None)).await;

    assert_eq!(attempt.state, PublishState::Failed);
    assert!(attempt.last_error.unwrap().contains("media could not be decoded"));
    assert_eq!(publisher.adapter().commit_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn rejected_commit_keeps_container_id_and_fails() {
    let publisher = Publisher::new(MockAdapter::new(Script::CommitFails));
    let attempt = publisher.publish(key(), &PostDraft::feed("hello", None)).await;

    assert_eq!(attempt.state, PublishState::Failed);
    assert_eq!(attempt.external_id.as_deref(), Some("container-1"));
    assert!(attempt.last_error.unwrap().contains("HTTP 400"));
}
