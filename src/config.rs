//! Configuration management for Herald gateway
//!
//! One immutable [`Config`] is built from the environment at startup and
//! passed explicitly into every collaborator constructor. Required settings
//! fail fast before any event is handled.

use crate::{Error, Result};

/// Default chat model identifier
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Default transcription model identifier
const DEFAULT_STT_MODEL: &str = "gpt-4o-mini-transcribe";

/// Default speech synthesis model identifier
const DEFAULT_TTS_MODEL: &str = "gpt-4o-mini-tts";

/// Default speech synthesis voice
const DEFAULT_TTS_VOICE: &str = "alloy";

/// Default object storage bucket
const DEFAULT_STORAGE_BUCKET: &str = "telegram-bot";

/// Herald gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token
    pub telegram_token: String,

    /// Shared secret expected in the webhook's
    /// `x-telegram-bot-api-secret-token` header. Secret check is disabled
    /// when unset.
    pub webhook_secret: Option<String>,

    /// `OpenAI` API key
    pub openai_api_key: String,

    /// Model configuration
    pub models: ModelConfig,

    /// Vector store identifier for document retrieval. Retrieval tooling and
    /// document indexing are disabled when unset.
    pub vector_store_id: Option<String>,

    /// Object storage configuration
    pub storage: StorageConfig,
}

/// Model identifiers for chat, transcription, and speech
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Chat completion model
    pub chat: String,

    /// Speech-to-text model
    pub stt: String,

    /// Text-to-speech model
    pub tts: String,

    /// Text-to-speech voice identifier
    pub tts_voice: String,
}

/// Object storage settings (Supabase-style storage API)
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage service base URL
    pub url: String,

    /// Service key for authenticated uploads
    pub service_key: String,

    /// Bucket for uploaded documents
    pub bucket: String,
}

impl Config {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns error if any required setting is absent or empty
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary settings lookup
    ///
    /// # Errors
    ///
    /// Returns error if any required setting is absent or empty
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("missing required setting: {key}")))
        };
        let optional = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Ok(Self {
            telegram_token: required("TELEGRAM_BOT_TOKEN")?,
            webhook_secret: optional("TELEGRAM_WEBHOOK_SECRET"),
            openai_api_key: required("OPENAI_API_KEY")?,
            models: ModelConfig {
                chat: optional("OPENAI_CHAT_MODEL")
                    .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
                stt: optional("OPENAI_STT_MODEL")
                    .unwrap_or_else(|| DEFAULT_STT_MODEL.to_string()),
                tts: optional("OPENAI_TTS_MODEL")
                    .unwrap_or_else(|| DEFAULT_TTS_MODEL.to_string()),
                tts_voice: optional("OPENAI_TTS_VOICE")
                    .unwrap_or_else(|| DEFAULT_TTS_VOICE.to_string()),
            },
            vector_store_id: optional("OPENAI_VECTOR_STORE_ID"),
            storage: StorageConfig {
                url: required("STORAGE_URL")?,
                service_key: required("STORAGE_SERVICE_KEY")?,
                bucket: optional("STORAGE_BUCKET")
                    .unwrap_or_else(|| DEFAULT_STORAGE_BUCKET.to_string()),
            },
        })
    }
}
