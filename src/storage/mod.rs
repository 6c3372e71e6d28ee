//! Object storage client
//!
//! Uploads document copies to a Supabase-style storage HTTP API and returns
//! their public URLs.

use reqwest::Client;

use crate::config::StorageConfig;
use crate::{Error, Result};

/// Object storage client
#[derive(Clone)]
pub struct StorageClient {
    client: Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl StorageClient {
    /// Create a new storage client
    #[must_use]
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
            bucket: config.bucket.clone(),
        }
    }

    /// Upload bytes to the bucket and return the object's public URL
    ///
    /// # Errors
    ///
    /// Returns error if the upload fails
    pub async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        let encoded = encode_path(path);
        let url = format!(
            "{}/storage/v1/object/{}/{encoded}",
            self.base_url, self.bucket
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.service_key))
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| Error::Storage(format!("upload request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Storage(format!("upload error {status}: {body}")));
        }

        tracing::debug!(path, "object uploaded");
        Ok(self.public_url(path))
    }

    /// Public URL for an object path in the bucket
    #[must_use]
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            encode_path(path)
        )
    }
}

/// Percent-encode each segment of an object path, preserving separators
fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> StorageClient {
        StorageClient::new(&crate::config::StorageConfig {
            url: "https://storage.example.com/".to_string(),
            service_key: "key".to_string(),
            bucket: "telegram-bot".to_string(),
        })
    }

    #[test]
    fn test_public_url_shape() {
        let client = test_client();
        assert_eq!(
            client.public_url("42/1700000000000-report.pdf"),
            "https://storage.example.com/storage/v1/object/public/telegram-bot/42/1700000000000-report.pdf"
        );
    }

    #[test]
    fn test_path_segments_are_encoded() {
        let client = test_client();
        let url = client.public_url("42/1700000000000-quarterly report.pdf");
        assert!(url.ends_with("/42/1700000000000-quarterly%20report.pdf"));
    }
}
