//! Audio transcription and speech synthesis

use super::{API_BASE, OpenAiClient};
use crate::{Error, Result};

/// Response from the transcription API
#[derive(serde::Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl OpenAiClient {
    /// Transcribe audio to text
    ///
    /// # Arguments
    ///
    /// * `audio` - raw audio bytes as downloaded from the platform
    /// * `mime_type` - declared mime type; defaults to `audio/ogg`
    ///
    /// # Errors
    ///
    /// Returns error if transcription fails
    pub async fn transcribe(&self, audio: Vec<u8>, mime_type: Option<&str>) -> Result<String> {
        tracing::debug!(audio_bytes = audio.len(), "starting transcription");

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio)
                    .file_name("voice.ogg")
                    .mime_str(mime_type.unwrap_or("audio/ogg"))
                    .map_err(|e| Error::Stt(e.to_string()))?,
            )
            .text("model", self.models.stt.clone());

        let response = self
            .client
            .post(format!("{API_BASE}/audio/transcriptions"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Stt(format!("transcription request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "transcription API error");
            return Err(Error::Stt(format!("transcription API error {status}: {body}")));
        }

        let result: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| Error::Stt(format!("transcription parse error: {e}")))?;

        tracing::info!(transcript = %result.text, "transcription complete");
        Ok(result.text)
    }

    /// Synthesize speech from text
    ///
    /// # Returns
    ///
    /// Audio bytes (MP3 format)
    ///
    /// # Errors
    ///
    /// Returns error if synthesis fails
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        #[derive(serde::Serialize)]
        struct SpeechRequest<'a> {
            model: &'a str,
            input: &'a str,
            voice: &'a str,
            response_format: &'a str,
        }

        let request = SpeechRequest {
            model: &self.models.tts,
            input: text,
            voice: &self.models.tts_voice,
            response_format: "mp3",
        };

        let response = self
            .client
            .post(format!("{API_BASE}/audio/speech"))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Tts(format!("speech request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Tts(format!("speech API error {status}: {body}")));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| Error::Tts(format!("speech read error: {e}")))?;

        Ok(audio.to_vec())
    }
}
