//! OpenAI API client
//!
//! Chat via the Responses API, audio transcription and synthesis, and the
//! file store used for document retrieval.

mod audio;
mod files;
pub mod responses;

use reqwest::Client;

use crate::config::{Config, ModelConfig};

/// `OpenAI` API base URL
pub(crate) const API_BASE: &str = "https://api.openai.com/v1";

/// `OpenAI` API client
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    models: ModelConfig,
}

impl OpenAiClient {
    /// Create a new client from the gateway configuration
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.openai_api_key.clone(),
            models: config.models.clone(),
        }
    }
}
