//! Utamaro binary: load config, wire the collaborators, run the scheduler.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use utamaro::{
    record_discovered_business_id, AppConfig, BoxedAdapter, ConfigError, DriveMediaResolver,
    GeminiClient, GoogleBusinessAdapter, GoogleCredentials, InstagramAdapter, Orchestrator,
    Publisher, SettingsStore, Severity, UtamaroResult,
};

/// Settings store backed by the TOML config file itself.
///
/// The only write the orchestrator side ever performs is recording a
/// discovered Instagram business id, so a full read-modify-write of the
/// config file is fine here.
struct TomlSettingsStore {
    path: PathBuf,
}

#[async_trait]
impl SettingsStore for TomlSettingsStore {
    async fn record_instagram_business_id(&self, id: &str) -> UtamaroResult<()> {
        let mut config = AppConfig::from_file(&self.path)?;
        config.instagram.business_id = Some(id.to_string());
        let rendered = toml::to_string_pretty(&config)
            .map_err(|e| ConfigError::new(format!("Failed to render config: {e}")))?;
        std::fs::write(&self.path, rendered)
            .map_err(|e| ConfigError::new(format!("Failed to write config file: {e}")))?;
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "utamaro.toml".to_string()),
    );
    let mut config = AppConfig::from_file(&config_path)?;
    config.hydrate_from_env();
    config.validate()?;
    info!(path = %config_path.display(), "Configuration loaded");

    // Discover the Instagram business id when the config lacks one (or has
    // a stale one) and write it back.
    let discovery = InstagramAdapter::new(&config.instagram.access_token, "");
    match discovery.discover_business_id().await {
        Ok(Some(discovered)) => {
            let store = TomlSettingsStore {
                path: config_path.clone(),
            };
            match record_discovered_business_id(
                &store,
                config.instagram.business_id.as_deref(),
                &discovered,
            )
            .await
            {
                Ok(true) => {
                    config.instagram.business_id = Some(discovered);
                }
                Ok(false) => {}
                Err(e) => warn!(error = %e, "Could not persist discovered business id"),
            }
        }
        Ok(None) => warn!("Token has no linked Instagram business account"),
        Err(e) => warn!(error = %e, "Business account discovery failed, using configured id"),
    }

    let gemini = GeminiClient::with_model(&config.gemini.api_key, &config.gemini.model)?;
    let instagram = InstagramAdapter::new(
        &config.instagram.access_token,
        config.instagram.business_id.clone().unwrap_or_default(),
    );
    let google = GoogleBusinessAdapter::new(
        GoogleCredentials {
            client_id: config.google.client_id.clone(),
            client_secret: config.google.client_secret.clone(),
            refresh_token: config.google.refresh_token.clone(),
        },
        &config.google.location_id,
        &config.google.action_url,
    );

    let (orchestrator, mut notifications) = Orchestrator::new(
        Arc::new(gemini),
        Arc::new(DriveMediaResolver::new()),
        Publisher::new(Box::new(google) as BoxedAdapter),
        Publisher::new(Box::new(instagram) as BoxedAdapter),
        config.rules.clone(),
        config.generation.keywords.clone(),
    );

    tokio::spawn(async move {
        while let Some(notification) = notifications.recv().await {
            match notification.severity {
                Severity::Error => error!("{}", notification.message),
                Severity::Info | Severity::Success => info!("{}", notification.message),
            }
        }
    });

    orchestrator.run().await;
    Ok(())
}
