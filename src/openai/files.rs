//! File store uploads and vector store indexing

use super::{API_BASE, OpenAiClient};
use crate::{Error, Result};

/// Response from the file upload API
#[derive(serde::Deserialize)]
struct FileResponse {
    id: String,
}

impl OpenAiClient {
    /// Upload document bytes to the provider's file store
    ///
    /// Files are uploaded with `purpose=assistants` so they can be attached
    /// to a vector store for retrieval.
    ///
    /// # Errors
    ///
    /// Returns error if the upload fails
    pub async fn upload_file(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<String> {
        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes)
                    .file_name(filename.to_string())
                    .mime_str(mime_type)
                    .map_err(|e| Error::Model(e.to_string()))?,
            )
            .text("purpose", "assistants");

        let response = self
            .client
            .post(format!("{API_BASE}/files"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Model(format!("file upload failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Model(format!("file upload error {status}: {body}")));
        }

        let result: FileResponse = response
            .json()
            .await
            .map_err(|e| Error::Model(format!("file upload parse error: {e}")))?;

        tracing::debug!(file_id = %result.id, filename, "file uploaded to provider store");
        Ok(result.id)
    }

    /// Attach an uploaded file to a vector store for retrieval
    ///
    /// # Errors
    ///
    /// Returns error if indexing fails
    pub async fn add_file_to_vector_store(&self, store_id: &str, file_id: &str) -> Result<()> {
        #[derive(serde::Serialize)]
        struct VectorStoreFileRequest<'a> {
            file_id: &'a str,
        }

        let response = self
            .client
            .post(format!("{API_BASE}/vector_stores/{store_id}/files"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&VectorStoreFileRequest { file_id })
            .send()
            .await
            .map_err(|e| Error::Model(format!("vector store indexing failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Model(format!(
                "vector store indexing error {status}: {body}"
            )));
        }

        tracing::debug!(store_id, file_id, "file indexed for retrieval");
        Ok(())
    }
}
