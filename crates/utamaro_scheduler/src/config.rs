//! Configuration for the scheduler binary.

use serde::{Deserialize, Serialize};
use std::path::Path;
use utamaro_core::PostingRule;
use utamaro_error::{ConfigError, UtamaroResult};

/// Gemini generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiSettings {
    /// API key. May be left empty in the file and supplied via the
    /// `GEMINI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

/// Instagram Graph API settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstagramSettings {
    /// Long-lived page access token.
    #[serde(default)]
    pub access_token: String,
    /// Business account id. Discovered and written back when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_id: Option<String>,
}

/// Google Business Profile settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoogleSettings {
    /// OAuth client id.
    #[serde(default)]
    pub client_id: String,
    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: String,
    /// Long-lived refresh token.
    #[serde(default)]
    pub refresh_token: String,
    /// Location id the posts target.
    #[serde(default)]
    pub location_id: String,
    /// Booking call-to-action URL attached to every post.
    #[serde(default)]
    pub action_url: String,
}

/// Prompt context settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Currently active keyword set woven into every prompt.
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// The rule snapshot the scheduler evaluates each tick.
///
/// Story rules carry media only and skip the generation step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSet {
    /// Regular feed-post rules (generation + dual-platform publish).
    #[serde(default)]
    pub posting: Vec<PostingRule>,
    /// Story rules (media-only Instagram stories).
    #[serde(default)]
    pub stories: Vec<PostingRule>,
}

/// Top-level configuration, loaded from a TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini generation settings.
    #[serde(default)]
    pub gemini: GeminiSettings,
    /// Instagram settings.
    #[serde(default)]
    pub instagram: InstagramSettings,
    /// Google Business Profile settings.
    #[serde(default)]
    pub google: GoogleSettings,
    /// Prompt context settings.
    #[serde(default)]
    pub generation: GenerationSettings,
    /// Scheduled rules.
    #[serde(default)]
    pub rules: RuleSet,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> UtamaroResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)).into())
    }

    /// Fill empty secret fields from the environment.
    ///
    /// Keeps credentials out of the config file when the operator prefers
    /// `.env` delivery.
    pub fn hydrate_from_env(&mut self) {
        fill(&mut self.gemini.api_key, "GEMINI_API_KEY");
        fill(&mut self.instagram.access_token, "INSTAGRAM_ACCESS_TOKEN");
        fill(&mut self.google.client_id, "GOOGLE_CLIENT_ID");
        fill(&mut self.google.client_secret, "GOOGLE_CLIENT_SECRET");
        fill(&mut self.google.refresh_token, "GOOGLE_REFRESH_TOKEN");
        fill(&mut self.google.location_id, "GBP_LOCATION_ID");
    }

    /// Check that every field the publish paths need is present.
    pub fn validate(&self) -> UtamaroResult<()> {
        required("gemini.api_key", &self.gemini.api_key)?;
        required("instagram.access_token", &self.instagram.access_token)?;
        required("google.client_id", &self.google.client_id)?;
        required("google.client_secret", &self.google.client_secret)?;
        required("google.refresh_token", &self.google.refresh_token)?;
        required("google.location_id", &self.google.location_id)?;
        Ok(())
    }
}

fn fill(field: &mut String, var: &str) {
    if field.is_empty() {
        if let Ok(value) = std::env::var(var) {
            *field = value;
        }
    }
}

fn required(name: &str, value: &str) -> UtamaroResult<()> {
    if value.trim().is_empty() {
        return Err(ConfigError::new(format!("missing required field '{name}'")).into());
    }
    Ok(())
}
