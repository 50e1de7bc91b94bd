//! Media resolver for Drive-hosted files.

use async_trait::async_trait;
use utamaro_error::UtamaroResult;
use utamaro_interface::MediaResolver;

/// Resolves a stored file id to a fresh direct-download URL.
///
/// Stored media URLs expire; rebuilding the download link from the file id
/// right before publishing keeps the platform's fetch from hitting a stale
/// link. Resolution is a pure URL construction, so it cannot fail in
/// practice, but callers still treat any failure as non-fatal.
#[derive(Debug, Clone, Default)]
pub struct DriveMediaResolver;

impl DriveMediaResolver {
    /// Create a resolver.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MediaResolver for DriveMediaResolver {
    async fn fresh_url(&self, file_id: &str) -> UtamaroResult<String> {
        Ok(format!(
            "https://drive.google.com/uc?id={file_id}&export=download"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builds_download_url_from_file_id() {
        let resolver = DriveMediaResolver::new();
        let url = resolver.fresh_url("abc123").await.unwrap();
        assert_eq!(url, "https://drive.google.com/uc?id=abc123&export=download");
    }
}
