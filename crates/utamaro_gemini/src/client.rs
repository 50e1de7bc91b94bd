//! Client for the Gemini `generateContent` REST endpoint.

use crate::prompt::build_prompt;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utamaro_error::{GenerationError, GenerationErrorKind};
use utamaro_interface::{ContentGenerator, GenerationRequest};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Serialize)]
struct GenerateContentBody {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Client for the Gemini generation endpoint.
///
/// Issues exactly one request per [`GenerationRequest`] and maps every
/// failure mode into a typed [`GenerationError`]. The rule firing that asked
/// for the text treats any error here as fatal.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for the default model.
    ///
    /// # Errors
    /// Returns an error if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GenerationError> {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Create a client for a specific model.
    pub fn with_model(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::MissingApiKey));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the endpoint base URL (integration tests point this at a
    /// local server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

/// Pull the first candidate's text out of the response envelope.
fn extract_text(response: GenerateContentResponse) -> Result<String, GenerationError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| GenerationError::new(GenerationErrorKind::EmptyResponse))
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let prompt = build_prompt(request, chrono::Local::now().date_naive());
        let body = GenerateContentBody {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        tracing::debug!("Sending generation request");
        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Generation request failed: {}", e);
                GenerationError::new(GenerationErrorKind::Request(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Generation endpoint returned error");
            return Err(GenerationError::new(GenerationErrorKind::Http {
                status_code: status.as_u16(),
                message,
            }));
        }

        let envelope: GenerateContentResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to decode generation response: {}", e);
            GenerationError::new(GenerationErrorKind::Decode(e.to_string()))
        })?;

        let text = extract_text(envelope)?;
        tracing::debug!(chars = text.chars().count(), "Generation succeeded");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
