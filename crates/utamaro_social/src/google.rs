//! Google Business Profile adapter.
//!
//! A local post goes live in a single `localPosts` create call, so this
//! adapter has no asynchronous processing phase: the container step performs
//! the create, the first status poll reports ready, and the commit step is a
//! local acknowledgement. Each attempt exchanges the stored refresh token
//! for a fresh access token first.

use crate::{Container, ContainerStatus, PlatformAdapter};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;
use utamaro_core::{Platform, PostDraft};
use utamaro_error::{PublishError, PublishErrorKind, PublishResult};

const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_API_BASE: &str = "https://business.googleapis.com/v1";

/// Summary ceiling enforced before any request is issued.
pub const SUMMARY_LIMIT: usize = 1500;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LocalPostResponse {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// OAuth client credentials for the refresh-token exchange.
#[derive(Debug, Clone)]
pub struct GoogleCredentials {
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
}

/// Adapter posting to one Google Business Profile location.
#[derive(Debug, Clone)]
pub struct GoogleBusinessAdapter {
    client: reqwest::Client,
    credentials: GoogleCredentials,
    location_id: String,
    action_url: String,
    token_url: String,
    api_base: String,
}

impl GoogleBusinessAdapter {
    /// Create an adapter for the given location.
    ///
    /// `action_url` becomes the booking call-to-action attached to every
    /// post.
    pub fn new(
        credentials: GoogleCredentials,
        location_id: impl Into<String>,
        action_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            location_id: location_id.into(),
            action_url: action_url.into(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Override the OAuth token endpoint (for tests).
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Override the Business Profile API base (for tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Exchange the refresh token for a fresh access token.
    #[instrument(skip(self))]
    async fn fresh_access_token(&self) -> PublishResult<String> {
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("refresh_token", self.credentials.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];
        let response = self
            .client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Token refresh request failed: {}", e);
                PublishError::new(PublishErrorKind::Credential(e.to_string()))
            })?;

        let status = response.status();
        let body: TokenResponse = response.json().await.map_err(|e| {
            PublishError::new(PublishErrorKind::Credential(format!(
                "failed to decode token response: {e}"
            )))
        })?;

        if !status.is_success() {
            let detail = body
                .error_description
                .or(body.error)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            tracing::error!("Token refresh rejected: {}", detail);
            return Err(PublishError::new(PublishErrorKind::Credential(detail)));
        }
        body.access_token.ok_or_else(|| {
            PublishError::new(PublishErrorKind::Credential(
                "token response carried no access token".to_string(),
            ))
        })
    }

    /// JSON body for the local-post create call.
    fn local_post_payload(&self, draft: &PostDraft) -> serde_json::Value {
        let media = match &draft.media {
            Some(media) => json!([{ "mediaFormat": "PHOTO", "sourceUrl": media.url }]),
            None => json!([]),
        };
        json!({
            "languageCode": "ja",
            "summary": draft.text,
            "topicType": "STANDARD",
            "callToAction": {
                "actionType": "BOOK",
                "url": self.action_url,
            },
            "media": media,
        })
    }
}

#[async_trait]
impl PlatformAdapter for GoogleBusinessAdapter {
    fn platform(&self) -> Platform {
        Platform::GoogleBusiness
    }

    fn text_limit(&self) -> usize {
        SUMMARY_LIMIT
    }

    fn validate(&self, _draft: &PostDraft) -> PublishResult<()> {
        if self.location_id.is_empty() {
            return Err(PublishError::new(PublishErrorKind::Validation(
                "Google Business Profile location id is not configured".to_string(),
            )));
        }
        if self.credentials.refresh_token.is_empty() {
            return Err(PublishError::new(PublishErrorKind::Validation(
                "Google refresh token is not configured".to_string(),
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, draft), fields(location = %self.location_id))]
    async fn create_container(&self, draft: &PostDraft) -> PublishResult<Container> {
        let token = self.fresh_access_token().await?;
        let url = format!(
            "{}/locations/{}/localPosts",
            self.api_base, self.location_id
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&self.local_post_payload(draft))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Local post request failed: {}", e);
                PublishError::new(PublishErrorKind::Request(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let envelope: ApiErrorEnvelope = response.json().await.unwrap_or(ApiErrorEnvelope {
                error: None,
            });
            let detail = envelope
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(PublishError::new(PublishErrorKind::Request(detail)));
        }

        let body: LocalPostResponse = response.json().await.map_err(|e| {
            PublishError::new(PublishErrorKind::Request(format!(
                "failed to decode local post response: {e}"
            )))
        })?;
        Ok(Container {
            id: body
                .name
                .unwrap_or_else(|| format!("locations/{}/localPosts", self.location_id)),
        })
    }

    async fn container_status(&self, _container: &Container) -> PublishResult<ContainerStatus> {
        // Local posts go live on create; there is nothing to poll.
        Ok(ContainerStatus::Ready)
    }

    async fn commit(&self, container: &Container) -> PublishResult<String> {
        Ok(container.id.clone())
    }
}
