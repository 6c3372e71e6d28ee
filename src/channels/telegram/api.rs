//! Raw Telegram Bot API calls

use super::types::{
    API_BASE, FILE_BASE, GetFileRequest, SendChatActionRequest, SendMessageRequest,
    SetWebhookRequest, TelegramFile, TelegramResponse,
};
use crate::{Error, Result};

impl super::TelegramChannel {
    /// Send a text message to a chat
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let url = format!("{API_BASE}{}/sendMessage", self.token);

        let request = SendMessageRequest {
            chat_id,
            text: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Channel(format!("Telegram sendMessage error: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Channel(format!(
                "Telegram sendMessage error: {status} - {body}"
            )));
        }

        tracing::debug!(chat_id, "Telegram message sent");
        Ok(())
    }

    /// Send audio bytes as a voice message
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    pub async fn send_voice(&self, chat_id: i64, audio: Vec<u8>, filename: &str) -> Result<()> {
        let url = format!("{API_BASE}{}/sendVoice", self.token);

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name(filename.to_string())
            .mime_str("audio/mpeg")
            .map_err(|e| Error::Channel(format!("Telegram sendVoice part error: {e}")))?;

        let form = reqwest::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .part("voice", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Channel(format!("Telegram sendVoice error: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Channel(format!(
                "Telegram sendVoice error: {status} - {body}"
            )));
        }

        tracing::debug!(chat_id, "Telegram voice message sent");
        Ok(())
    }

    /// Send a chat action (typing indicator, etc.)
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    pub async fn send_chat_action(&self, chat_id: i64, action: &str) -> Result<()> {
        let url = format!("{API_BASE}{}/sendChatAction", self.token);

        let request = SendChatActionRequest {
            chat_id,
            action: action.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Channel(format!("Telegram sendChatAction error: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Channel(format!(
                "Telegram sendChatAction error: {status} - {body}"
            )));
        }

        Ok(())
    }

    /// Resolve a `file_id` to file metadata via getFile
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the response is malformed
    pub async fn get_file(&self, file_id: &str) -> Result<TelegramFile> {
        let url = format!("{API_BASE}{}/getFile", self.token);

        let request = GetFileRequest {
            file_id: file_id.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Channel(format!("Telegram getFile error: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| Error::Channel(format!("Telegram getFile response read error: {e}")))?;

        let parsed: TelegramResponse<TelegramFile> = serde_json::from_str(&body)
            .map_err(|e| Error::Channel(format!("Telegram getFile parse error: {e}")))?;

        parsed.result.ok_or_else(|| {
            Error::Channel(format!(
                "Telegram getFile error: {}",
                parsed.description.unwrap_or_default()
            ))
        })
    }

    /// Build the download URL for a resolved file path
    #[must_use]
    pub fn file_url(&self, file_path: &str) -> String {
        format!("{FILE_BASE}{}/{file_path}", self.token)
    }

    /// Download raw bytes from a file URL
    ///
    /// # Errors
    ///
    /// Returns error if the download fails
    pub async fn download(&self, file_url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(file_url)
            .send()
            .await
            .map_err(|e| Error::Channel(format!("Telegram file download error: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Channel(format!(
                "Telegram file download error: {}",
                response.status()
            )));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| Error::Channel(format!("Telegram file download read error: {e}")))?;

        Ok(data.to_vec())
    }

    /// Set webhook URL for receiving updates
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails
    pub async fn set_webhook(&self, url: &str, secret_token: Option<&str>) -> Result<()> {
        let api_url = format!("{API_BASE}{}/setWebhook", self.token);

        let request = SetWebhookRequest {
            url: url.to_string(),
            allowed_updates: Some(vec!["message".to_string()]),
            secret_token: secret_token.map(String::from),
        };

        let response = self
            .client
            .post(&api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Channel(format!("Telegram setWebhook error: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Channel(format!(
                "Telegram setWebhook error: {status} - {body}"
            )));
        }

        tracing::info!(url, "Telegram webhook set");
        Ok(())
    }
}
