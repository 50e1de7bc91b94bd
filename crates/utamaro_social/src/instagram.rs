//! Instagram adapter for the Facebook Graph API.
//!
//! Containers are created against `/{business}/media` with form-encoded
//! fields, polled via the `status_code` field, and committed with
//! `media_publish`. Video feed posts submit as reels; story rules submit
//! with `media_type=STORIES` and no caption.

use crate::{Container, ContainerStatus, PlatformAdapter};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;
use utamaro_core::{MediaKind, Platform, PostDraft};
use utamaro_error::{PublishError, PublishErrorKind, PublishResult};

const DEFAULT_BASE_URL: &str = "https://graph.facebook.com/v19.0";

/// Caption ceiling enforced before any request is issued.
pub const CAPTION_LIMIT: usize = 2200;

#[derive(Debug, Deserialize)]
struct GraphObjectResponse {
    id: Option<String>,
    error: Option<GraphErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
    message: Option<String>,
    code: Option<i64>,
}

impl GraphErrorBody {
    fn describe(&self) -> String {
        format!(
            "{} (code {})",
            self.message.as_deref().unwrap_or("unknown"),
            self.code.map_or_else(|| "-".to_string(), |c| c.to_string())
        )
    }
}

#[derive(Debug, Deserialize)]
struct ContainerStatusResponse {
    status_code: Option<String>,
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountsResponse {
    #[serde(default)]
    data: Vec<AccountEntry>,
}

#[derive(Debug, Deserialize)]
struct AccountEntry {
    instagram_business_account: Option<BusinessAccount>,
}

#[derive(Debug, Deserialize)]
struct BusinessAccount {
    id: String,
}

/// Adapter submitting to an Instagram business account.
#[derive(Debug, Clone)]
pub struct InstagramAdapter {
    client: reqwest::Client,
    access_token: String,
    business_id: String,
    base_url: String,
}

impl InstagramAdapter {
    /// Create an adapter for the given token and business account id.
    pub fn new(access_token: impl Into<String>, business_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.into(),
            business_id: business_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the Graph API base URL (integration tests point this at a
    /// local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Look up the business account id attached to the token's first page.
    ///
    /// Returns `None` when the token has no page with a linked business
    /// account. Callers persist a discovered id only when it differs from
    /// the configured one.
    #[instrument(skip(self))]
    pub async fn discover_business_id(&self) -> PublishResult<Option<String>> {
        let url = format!(
            "{}/me/accounts?access_token={}&fields=instagram_business_account",
            self.base_url, self.access_token
        );
        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Business account lookup failed: {}", e);
            PublishError::new(PublishErrorKind::Request(e.to_string()))
        })?;
        let accounts: AccountsResponse = response.json().await.map_err(|e| {
            PublishError::new(PublishErrorKind::Request(format!(
                "failed to decode accounts response: {e}"
            )))
        })?;

        Ok(accounts
            .data
            .into_iter()
            .next()
            .and_then(|entry| entry.instagram_business_account)
            .map(|account| account.id))
    }

    /// Form fields for the container-create call.
    ///
    /// A draft without media submits text-only: the media field is omitted
    /// entirely, never sent as an empty value.
    fn container_params(&self, draft: &PostDraft) -> Vec<(&'static str, String)> {
        let mut params = vec![("access_token", self.access_token.clone())];

        if draft.story {
            params.push(("media_type", "STORIES".to_string()));
        } else {
            params.push(("caption", draft.text.clone()));
        }

        if let Some(media) = &draft.media {
            match media.kind {
                MediaKind::Video => {
                    if !draft.story {
                        params.push(("media_type", "REELS".to_string()));
                    }
                    params.push(("video_url", media.url.clone()));
                }
                MediaKind::Image => params.push(("image_url", media.url.clone())),
            }
        }

        params
    }
}

#[async_trait]
impl PlatformAdapter for InstagramAdapter {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn text_limit(&self) -> usize {
        CAPTION_LIMIT
    }

    fn validate(&self, draft: &PostDraft) -> PublishResult<()> {
        if self.access_token.is_empty() || self.business_id.is_empty() {
            return Err(PublishError::new(PublishErrorKind::Validation(
                "Instagram access token or business account id is not configured".to_string(),
            )));
        }
        if draft.story && draft.media.is_none() {
            return Err(PublishError::new(PublishErrorKind::Validation(
                "a story post requires media".to_string(),
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, draft), fields(story = draft.story))]
    async fn create_container(&self, draft: &PostDraft) -> PublishResult<Container> {
        let url = format!("{}/{}/media", self.base_url, self.business_id);
        let response = self
            .client
            .post(&url)
            .form(&self.container_params(draft))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Container create request failed: {}", e);
                PublishError::new(PublishErrorKind::Request(e.to_string()))
            })?;

        let body: GraphObjectResponse = response.json().await.map_err(|e| {
            PublishError::new(PublishErrorKind::Request(format!(
                "failed to decode container response: {e}"
            )))
        })?;

        if let Some(error) = &body.error {
            return Err(PublishError::new(PublishErrorKind::Request(
                error.describe(),
            )));
        }
        match body.id {
            Some(id) => Ok(Container { id }),
            None => Err(PublishError::new(PublishErrorKind::Request(
                "container response carried no id".to_string(),
            ))),
        }
    }

    #[instrument(skip(self), fields(container = %container.id))]
    async fn container_status(&self, container: &Container) -> PublishResult<ContainerStatus> {
        let url = format!(
            "{}/{}?access_token={}&fields=status_code,status",
            self.base_url, container.id, self.access_token
        );
        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Status poll failed: {}", e);
            PublishError::new(PublishErrorKind::Request(e.to_string()))
        })?;
        let body: ContainerStatusResponse = response.json().await.map_err(|e| {
            PublishError::new(PublishErrorKind::Request(format!(
                "failed to decode status response: {e}"
            )))
        })?;

        Ok(match body.status_code.as_deref() {
            Some("FINISHED") => ContainerStatus::Ready,
            Some("ERROR") => ContainerStatus::Error(
                body.status.unwrap_or_else(|| "processing failed".to_string()),
            ),
            _ => ContainerStatus::InProgress,
        })
    }

    #[instrument(skip(self), fields(container = %container.id))]
    async fn commit(&self, container: &Container) -> PublishResult<String> {
        let url = format!(
            "{}/{}/media_publish?creation_id={}&access_token={}",
            self.base_url, self.business_id, container.id, self.access_token
        );
        let response = self.client.post(&url).send().await.map_err(|e| {
            tracing::error!("Publish request failed: {}", e);
            PublishError::new(PublishErrorKind::Request(e.to_string()))
        })?;

        let status = response.status();
        let body: GraphObjectResponse = response.json().await.map_err(|e| {
            PublishError::new(PublishErrorKind::Request(format!(
                "failed to decode publish response: {e}"
            )))
        })?;

        if let Some(error) = &body.error {
            return Err(PublishError::new(PublishErrorKind::Request(
                error.describe(),
            )));
        }
        if !status.is_success() {
            return Err(PublishError::new(PublishErrorKind::Request(format!(
                "publish returned HTTP {}",
                status.as_u16()
            ))));
        }
        Ok(body.id.unwrap_or_else(|| container.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use utamaro_core::MediaRef;

    fn adapter() -> InstagramAdapter {
        InstagramAdapter::new("token", "17890000000000000")
    }

    fn image() -> MediaRef {
        MediaRef {
            url: "https://example.com/photo.png".to_string(),
            kind: MediaKind::Image,
            file_id: None,
        }
    }

    fn video() -> MediaRef {
        MediaRef {
            url: "https://example.com/clip.mp4".to_string(),
            kind: MediaKind::Video,
            file_id: None,
        }
    }

    fn field<'a>(params: &'a [(&'static str, String)], name: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn image_feed_post_uses_image_url() {
        let params = adapter().container_params(&PostDraft::feed("こんにちは", Some(image())));
        assert_eq!(field(&params, "caption"), Some("こんにちは"));
        assert_eq!(field(&params, "image_url"), Some("https://example.com/photo.png"));
        assert!(field(&params, "video_url").is_none());
        assert!(field(&params, "media_type").is_none());
    }

    #[test]
    fn video_feed_post_submits_as_reel() {
        let params = adapter().container_params(&PostDraft::feed("caption", Some(video())));
        assert_eq!(field(&params, "media_type"), Some("REELS"));
        assert_eq!(field(&params, "video_url"), Some("https://example.com/clip.mp4"));
        assert!(field(&params, "image_url").is_none());
    }

    #[test]
    fn text_only_post_omits_media_fields_entirely() {
        let params = adapter().container_params(&PostDraft::feed("text only", None));
        assert!(field(&params, "image_url").is_none());
        assert!(field(&params, "video_url").is_none());
        assert!(field(&params, "media_type").is_none());
    }

    #[test]
    fn story_post_has_no_caption() {
        let params = adapter().container_params(&PostDraft::story(image()));
        assert_eq!(field(&params, "media_type"), Some("STORIES"));
        assert!(field(&params, "caption").is_none());
        assert_eq!(field(&params, "image_url"), Some("https://example.com/photo.png"));
    }

    #[test]
    fn video_story_keeps_stories_media_type() {
        let params = adapter().container_params(&PostDraft::story(video()));
        assert_eq!(field(&params, "media_type"), Some("STORIES"));
        assert_eq!(field(&params, "video_url"), Some("https://example.com/clip.mp4"));
    }

    #[test]
    fn missing_credentials_fail_validation() {
        let adapter = InstagramAdapter::new("", "");
        let err = adapter
            .validate(&PostDraft::feed("text", None))
            .unwrap_err();
        assert!(matches!(err.kind(), PublishErrorKind::Validation(_)));
    }

    #[test]
    fn story_without_media_fails_validation() {
        let draft = PostDraft {
            text: String::new(),
            media: None,
            story: true,
        };
        assert!(adapter().validate(&draft).is_err());
    }
}
