//! Telegram channel adapter
//!
//! Receives updates via webhook and sends replies via the Bot API

mod api;
pub mod types;

use reqwest::Client;

pub use types::TelegramFile;

/// Telegram channel adapter
#[derive(Clone)]
pub struct TelegramChannel {
    token: String,
    client: Client,
}

impl TelegramChannel {
    /// Create a new Telegram channel adapter
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token,
            client: Client::new(),
        }
    }
}
