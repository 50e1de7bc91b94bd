//! The scheduler loop and rule-firing pipeline.

use crate::config::RuleSet;
use crate::status::{ChannelStatus, StatusBoard};
use chrono::{Local, NaiveDateTime};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, instrument, warn};
use utamaro_core::{
    matcher, splitter, ContentArtifact, MediaRef, Notification, PostDraft, PostingRule,
    TargetAudience, TriggerKey,
};
use utamaro_interface::{ContentGenerator, GenerationRequest, MediaResolver, SettingsStore};
use utamaro_social::{BoxedAdapter, Publisher};

/// Capacity of the notification channel.
const NOTIFICATION_BUFFER: usize = 32;

/// Owns the recurring timer and fires due rules.
///
/// Each tick takes a snapshot of the rule set, matches it against the wall
/// clock, and spawns one independent task per due rule. A per-rule minute
/// stamp suppresses duplicate firings when two ticks land inside the same
/// minute. Firing tasks never touch each other; a failure in one is reported
/// and contained.
pub struct Orchestrator {
    generator: Arc<dyn ContentGenerator>,
    resolver: Arc<dyn MediaResolver>,
    google: Publisher<BoxedAdapter>,
    instagram: Publisher<BoxedAdapter>,
    rules: RwLock<RuleSet>,
    keywords: Vec<String>,
    notifications: mpsc::Sender<Notification>,
    status: StatusBoard,
    last_fired: Mutex<HashMap<(bool, i64), String>>,
}

impl Orchestrator {
    /// Build an orchestrator and the receiving end of its notification
    /// stream.
    pub fn new(
        generator: Arc<dyn ContentGenerator>,
        resolver: Arc<dyn MediaResolver>,
        google: Publisher<BoxedAdapter>,
        instagram: Publisher<BoxedAdapter>,
        rules: RuleSet,
        keywords: Vec<String>,
    ) -> (Arc<Self>, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(NOTIFICATION_BUFFER);
        let orchestrator = Arc::new(Self {
            generator,
            resolver,
            google,
            instagram,
            rules: RwLock::new(rules),
            keywords,
            notifications: tx,
            status: StatusBoard::new(),
            last_fired: Mutex::new(HashMap::new()),
        });
        (orchestrator, rx)
    }

    /// The shared status board.
    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    /// Swap in a new rule snapshot; takes effect on the next tick.
    pub async fn replace_rules(&self, rules: RuleSet) {
        *self.rules.write().await = rules;
    }

    /// Run the 60-second scheduler loop until the task is aborted.
    pub async fn run(self: Arc<Self>) {
        let mut ticker = interval(Duration::from_secs(60));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(model = self.generator.model_name(), "Scheduler started");
        loop {
            ticker.tick().await;
            let now = Local::now().naive_local();
            self.tick(now).await;
        }
    }

    /// Evaluate one tick at the given wall-clock time.
    ///
    /// Spawns one task per due rule and returns their handles; the loop
    /// ignores them, tests join them.
    #[instrument(skip(self), fields(now = %now.format("%Y-%m-%dT%H:%M")))]
    pub async fn tick(self: &Arc<Self>, now: NaiveDateTime) -> Vec<JoinHandle<()>> {
        let snapshot = self.rules.read().await.clone();
        let mut handles = Vec::new();

        for rule in matcher::due_rules(&snapshot.posting, now) {
            if !self.should_fire(false, rule.id, now) {
                continue;
            }
            if !rule.auto_publishes() {
                self.notify(Notification::info(format!(
                    "テーマ未設定のため自動投稿をスキップしました (ルール {})",
                    rule.id
                )))
                .await;
                continue;
            }
            let rule = rule.clone();
            let this = Arc::clone(self);
            handles.push(tokio::spawn(async move {
                this.fire_rule(rule, now).await;
            }));
        }

        for rule in matcher::due_rules(&snapshot.stories, now) {
            if !self.should_fire(true, rule.id, now) {
                continue;
            }
            let rule = rule.clone();
            let this = Arc::clone(self);
            handles.push(tokio::spawn(async move {
                this.fire_story(rule, now).await;
            }));
        }

        handles
    }

    /// Whether the rule may fire at this minute.
    ///
    /// Records the minute stamp as a side effect, so a second tick inside
    /// the same minute sees it and skips.
    fn should_fire(&self, story: bool, rule_id: i64, now: NaiveDateTime) -> bool {
        let stamp = now.format("%Y-%m-%dT%H:%M").to_string();
        let mut fired = self
            .last_fired
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match fired.get(&(story, rule_id)) {
            Some(last) if *last == stamp => false,
            _ => {
                fired.insert((story, rule_id), stamp);
                true
            }
        }
    }

    /// Generate content for a feed rule and publish it to both platforms.
    #[instrument(skip(self, rule), fields(rule = rule.id))]
    async fn fire_rule(self: Arc<Self>, rule: PostingRule, now: NaiveDateTime) {
        let topic = rule.topic.as_deref().unwrap_or_default().trim().to_string();
        self.notify(Notification::info(format!("自動投稿開始: {topic}")))
            .await;

        let key = TriggerKey::scheduled(rule.id, now);
        let media = self.refreshed_media(rule.media.clone()).await;

        let request = GenerationRequest::for_topic(
            &topic,
            TargetAudience::from_id(&rule.target_audience),
            self.keywords.clone(),
        );
        let raw = match self.generator.generate(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Content generation failed, nothing published");
                self.notify(Notification::error(format!("自動投稿失敗: {e}")))
                    .await;
                return;
            }
        };

        let artifact = ContentArtifact::new(key.clone(), splitter::split(&raw));

        self.status.set_google(&key, ChannelStatus::Posting).await;
        self.status
            .set_instagram(&key, ChannelStatus::Posting)
            .await;

        let google_draft = PostDraft::feed(artifact.google_text.clone(), media.clone());
        let instagram_draft = PostDraft::feed(artifact.instagram_text.clone(), media);
        let (google_attempt, instagram_attempt) = tokio::join!(
            self.google.publish(key.clone(), &google_draft),
            self.instagram.publish(key.clone(), &instagram_draft),
        );

        self.status
            .set_google(&key, google_attempt.state.into())
            .await;
        self.status
            .set_instagram(&key, instagram_attempt.state.into())
            .await;

        if let Some(error) = &google_attempt.last_error {
            self.notify(Notification::error(format!("Google投稿失敗: {error}")))
                .await;
        }
        if let Some(error) = &instagram_attempt.last_error {
            self.notify(Notification::error(format!(
                "Instagram投稿失敗: {error}"
            )))
            .await;
        }
        if google_attempt.succeeded() && instagram_attempt.succeeded() {
            self.notify(Notification::success(format!("自動投稿完了: {topic}")))
                .await;
        }
    }

    /// Publish a media-only Instagram story; no generation step.
    #[instrument(skip(self, rule), fields(rule = rule.id))]
    async fn fire_story(self: Arc<Self>, rule: PostingRule, now: NaiveDateTime) {
        let Some(media) = self.refreshed_media(rule.media.clone()).await else {
            warn!("Story rule has no media, nothing published");
            self.notify(Notification::error(format!(
                "ストーリー自動投稿失敗: メディア未設定 (ルール {})",
                rule.id
            )))
            .await;
            return;
        };

        let key = TriggerKey::scheduled(rule.id, now);
        self.notify(Notification::info("ストーリー自動投稿開始".to_string()))
            .await;
        self.status
            .set_instagram(&key, ChannelStatus::Posting)
            .await;

        let draft = PostDraft::story(media);
        let attempt = self.instagram.publish(key.clone(), &draft).await;
        self.status.set_instagram(&key, attempt.state.into()).await;

        match &attempt.last_error {
            Some(error) => {
                self.notify(Notification::error(format!(
                    "ストーリー自動投稿失敗: {error}"
                )))
                .await;
            }
            None => {
                self.notify(Notification::success("ストーリー自動投稿完了".to_string()))
                    .await;
            }
        }
    }

    /// Refresh the media URL right before publishing.
    ///
    /// A resolver failure is non-fatal; the stored URL is used as-is.
    async fn refreshed_media(&self, media: Option<MediaRef>) -> Option<MediaRef> {
        let mut media = media?;
        if let Some(file_id) = &media.file_id {
            match self.resolver.fresh_url(file_id).await {
                Ok(url) => media.url = url,
                Err(e) => {
                    warn!(error = %e, "Media URL refresh failed, falling back to stored URL");
                }
            }
        }
        Some(media)
    }

    async fn notify(&self, notification: Notification) {
        // A dropped receiver only means nobody is listening.
        let _ = self.notifications.send(notification).await;
    }
}

/// Persist a discovered Instagram business account id if it differs from the
/// configured one.
///
/// Returns whether a write happened. Guarding by value comparison keeps the
/// startup path idempotent across restarts.
pub async fn record_discovered_business_id(
    store: &dyn SettingsStore,
    configured: Option<&str>,
    discovered: &str,
) -> utamaro_error::UtamaroResult<bool> {
    if configured == Some(discovered) {
        return Ok(false);
    }
    store.record_instagram_business_id(discovered).await?;
    info!(business_id = discovered, "Recorded discovered Instagram business id");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use utamaro_error::UtamaroResult;

    struct CountingStore {
        writes: AtomicU32,
    }

    #[async_trait]
    impl SettingsStore for CountingStore {
        async fn record_instagram_business_id(&self, _id: &str) -> UtamaroResult<()> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn discovery_writes_only_on_change() {
        let store = CountingStore {
            writes: AtomicU32::new(0),
        };

        assert!(record_discovered_business_id(&store, None, "17841400000000001")
            .await
            .unwrap());
        assert!(record_discovered_business_id(
            &store,
            Some("stale-id"),
            "17841400000000001"
        )
        .await
        .unwrap());
        assert!(!record_discovered_business_id(
            &store,
            Some("17841400000000001"),
            "17841400000000001"
        )
        .await
        .unwrap());

        assert_eq!(store.writes.load(Ordering::SeqCst), 2);
    }
}
