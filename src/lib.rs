//! Herald Gateway - Telegram webhook gateway for AI chat
//!
//! This library provides the core functionality for the Herald gateway:
//! - Webhook intake and per-event dispatch
//! - Telegram Bot API channel adapter
//! - OpenAI chat, transcription, synthesis, and file store clients
//! - Conversation history persistence
//! - Document ingestion into object storage and retrieval indexing
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 Telegram Bot API                     │
//! │        webhook updates  │  outbound sends           │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                 Herald Gateway                       │
//! │   Dispatch  │  History  │  Storage  │  Prompting    │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                  OpenAI API                          │
//! │   Responses  │  STT  │  TTS  │  Files / Retrieval   │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod channels;
pub mod config;
pub mod db;
pub mod error;
pub mod openai;
pub mod prompt;
pub mod storage;

pub use channels::TelegramChannel;
pub use config::Config;
pub use db::{DbConn, DbPool};
pub use error::{Error, Result};
pub use openai::OpenAiClient;
pub use storage::StorageClient;
