//! Event dispatch for Telegram updates
//!
//! Classifies one inbound message into exactly one handling path and drives
//! the corresponding workflow to completion. Failures are isolated per
//! event: anything that goes wrong past classification is logged and
//! converted into a single generic notice to the chat.

use chrono::{DateTime, Utc};

use super::types::{TelegramDocument, TelegramMessage, TelegramPhotoSize, TelegramVoice};
use crate::api::ApiState;
use crate::db::ChatRole;
use crate::openai::responses::Tool;
use crate::prompt;
use crate::{Error, Result};

/// History window fed to the model, in records
const HISTORY_LIMIT: usize = 20;

/// Prompt substituted for a photo-only message
const IMAGE_PROMPT: &str = "Describe the image.";

/// Reply used when the model produced no usable text
const EMPTY_REPLY_NOTICE: &str = "Could not get a response from the model.";

/// Notice sent when transcription fails, before the error is re-raised
const TRANSCRIPTION_FAILED_NOTICE: &str =
    "Could not transcribe the voice message. Try sending the audio as mp3, wav, or m4a.";

/// Notice for content the gateway does not handle
const UNSUPPORTED_NOTICE: &str = "I only understand text, voice messages, photos, and documents.";

/// Generic notice for any internal failure
const FAILURE_NOTICE: &str = "Something went wrong. Please try again.";

/// One classified inbound event
///
/// Variants are checked in a fixed, mutually exclusive order; the first
/// match wins.
#[derive(Debug)]
enum InboundEvent<'a> {
    Text(&'a str),
    Voice(&'a TelegramVoice),
    Photo(&'a TelegramPhotoSize),
    Document(&'a TelegramDocument),
    Unsupported,
}

/// Classify a message into its handling path
fn classify(message: &TelegramMessage) -> InboundEvent<'_> {
    if let Some(text) = message.text.as_deref()
        && !text.is_empty()
    {
        return InboundEvent::Text(text);
    }
    if let Some(voice) = &message.voice {
        return InboundEvent::Voice(voice);
    }
    if let Some(photos) = &message.photo
        && !photos.is_empty()
    {
        return InboundEvent::Photo(largest_photo(photos));
    }
    if let Some(document) = &message.document {
        return InboundEvent::Document(document);
    }
    InboundEvent::Unsupported
}

/// Pick the photo with the largest reported size; ties keep the first
fn largest_photo(photos: &[TelegramPhotoSize]) -> &TelegramPhotoSize {
    photos[1..].iter().fold(&photos[0], |best, photo| {
        if photo.file_size.unwrap_or(0) > best.file_size.unwrap_or(0) {
            photo
        } else {
            best
        }
    })
}

/// Object storage key for an ingested document
fn storage_key(chat_id: i64, now: DateTime<Utc>, file_name: &str) -> String {
    format!("{chat_id}/{}-{file_name}", now.timestamp_millis())
}

/// Dispatch one inbound message
///
/// Never fails: any error from the handling paths is logged with a
/// structured failure record and converted into a best-effort generic
/// notice to the chat.
pub(crate) async fn dispatch(state: &ApiState, update_id: i64, message: &TelegramMessage) {
    let chat_id = message.chat.id;

    if let Err(e) = route(state, message).await {
        tracing::error!(
            update_id,
            chat_id,
            message_id = message.message_id,
            error = %e,
            "message processing failed"
        );

        if let Err(send_err) = state.telegram.send_message(chat_id, FAILURE_NOTICE).await {
            tracing::error!(chat_id, error = %send_err, "failed to send failure notice");
        }
    }
}

/// Route a classified message to its workflow
async fn route(state: &ApiState, message: &TelegramMessage) -> Result<()> {
    let chat_id = message.chat.id;

    match classify(message) {
        InboundEvent::Text(text) => produce_reply(state, chat_id, text, None, false).await,
        InboundEvent::Voice(voice) => handle_voice(state, chat_id, voice).await,
        InboundEvent::Photo(photo) => {
            let image_url = resolve_file_url(state, &photo.file_id).await?;
            produce_reply(state, chat_id, IMAGE_PROMPT, Some(&image_url), false).await
        }
        InboundEvent::Document(document) => ingest_document(state, chat_id, document).await,
        InboundEvent::Unsupported => state.telegram.send_message(chat_id, UNSUPPORTED_NOTICE).await,
    }
}

/// Resolve a remote file reference to its download URL
///
/// A reference without a resolvable path is fatal for the event.
async fn resolve_file_url(state: &ApiState, file_id: &str) -> Result<String> {
    let file = state.telegram.get_file(file_id).await?;

    let file_path = file.file_path.ok_or_else(|| {
        Error::Channel(format!("file {file_id} has no resolvable path"))
    })?;

    Ok(state.telegram.file_url(&file_path))
}

/// Voice path: download, transcribe, reply with text and voice
///
/// Transcription failure sends a format-guidance notice and re-raises, so
/// the dispatcher's catch-all still emits the generic failure notice.
async fn handle_voice(state: &ApiState, chat_id: i64, voice: &TelegramVoice) -> Result<()> {
    let file_url = resolve_file_url(state, &voice.file_id).await?;
    let audio = state.telegram.download(&file_url).await?;

    let transcript = match state
        .openai
        .transcribe(audio, voice.mime_type.as_deref())
        .await
    {
        Ok(text) => text,
        Err(e) => {
            state
                .telegram
                .send_message(chat_id, TRANSCRIPTION_FAILED_NOTICE)
                .await?;
            return Err(e);
        }
    };

    produce_reply(state, chat_id, &transcript, None, true).await
}

/// Reply workflow: persist the prompt, call the model with bounded history,
/// persist and send the reply, optionally as synthesized speech
async fn produce_reply(
    state: &ApiState,
    chat_id: i64,
    prompt_text: &str,
    image_url: Option<&str>,
    wants_voice: bool,
) -> Result<()> {
    state.history.append(chat_id, ChatRole::User, prompt_text)?;

    let history = state.history.load_recent(chat_id, HISTORY_LIMIT)?;
    let input = prompt::build_model_input(&history, prompt_text, image_url);

    // Best-effort typing indicator; not the event's outbound reply
    if let Err(e) = state.telegram.send_chat_action(chat_id, "typing").await {
        tracing::debug!(chat_id, error = %e, "typing indicator failed");
    }

    let tools: Vec<Tool> = state.vector_store_id.as_ref().map_or_else(Vec::new, |id| {
        vec![Tool::FileSearch {
            vector_store_ids: vec![id.clone()],
        }]
    });

    let output = state.openai.create_response(&input, &tools).await?;

    let trimmed = output.trim();
    let reply = if trimmed.is_empty() {
        EMPTY_REPLY_NOTICE
    } else {
        trimmed
    };

    state.history.append(chat_id, ChatRole::Assistant, reply)?;
    state.telegram.send_message(chat_id, reply).await?;

    if wants_voice {
        let audio = state.openai.synthesize(reply).await?;
        state.telegram.send_voice(chat_id, audio, "response.mp3").await?;
    }

    Ok(())
}

/// Document path: store a copy, register it with the provider's file store,
/// index it for retrieval when a vector store is configured
///
/// Does not touch conversation history and does not invoke the chat model;
/// the document reaches future replies only through the retrieval tool.
async fn ingest_document(
    state: &ApiState,
    chat_id: i64,
    document: &TelegramDocument,
) -> Result<()> {
    let file_url = resolve_file_url(state, &document.file_id).await?;
    let bytes = state.telegram.download(&file_url).await?;

    let file_name = document.file_name.as_deref().unwrap_or("document.bin");
    let content_type = document
        .mime_type
        .as_deref()
        .unwrap_or("application/octet-stream");

    let key = storage_key(chat_id, Utc::now(), file_name);
    let public_url = state
        .storage
        .upload(&key, bytes.clone(), content_type)
        .await?;

    let file_id = state.openai.upload_file(bytes, file_name, content_type).await?;

    if let Some(store_id) = &state.vector_store_id {
        state.openai.add_file_to_vector_store(store_id, &file_id).await?;
    }

    tracing::info!(chat_id, file_name, "document ingested");

    state
        .telegram
        .send_message(
            chat_id,
            &format!("Document saved: {public_url}\nYou can now ask questions about its contents."),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::webhooks::telegram::types::TelegramChat;

    fn message(chat_id: i64) -> TelegramMessage {
        TelegramMessage {
            message_id: 1,
            chat: TelegramChat {
                id: chat_id,
                chat_type: "private".to_string(),
            },
            text: None,
            voice: None,
            photo: None,
            document: None,
        }
    }

    fn photo(file_id: &str, file_size: Option<i64>) -> TelegramPhotoSize {
        TelegramPhotoSize {
            file_id: file_id.to_string(),
            file_size,
        }
    }

    #[test]
    fn test_classify_text_wins_over_everything() {
        let mut msg = message(1);
        msg.text = Some("hello".to_string());
        msg.voice = Some(TelegramVoice {
            file_id: "v1".to_string(),
            mime_type: None,
            duration: None,
        });
        msg.photo = Some(vec![photo("p1", Some(10))]);
        msg.document = Some(TelegramDocument {
            file_id: "d1".to_string(),
            file_name: None,
            mime_type: None,
        });

        assert!(matches!(classify(&msg), InboundEvent::Text("hello")));
    }

    #[test]
    fn test_classify_voice_wins_over_photo_and_document() {
        let mut msg = message(1);
        msg.voice = Some(TelegramVoice {
            file_id: "v1".to_string(),
            mime_type: None,
            duration: None,
        });
        msg.photo = Some(vec![photo("p1", Some(10))]);
        msg.document = Some(TelegramDocument {
            file_id: "d1".to_string(),
            file_name: None,
            mime_type: None,
        });

        assert!(matches!(classify(&msg), InboundEvent::Voice(_)));
    }

    #[test]
    fn test_classify_empty_text_falls_through() {
        let mut msg = message(1);
        msg.text = Some(String::new());

        assert!(matches!(classify(&msg), InboundEvent::Unsupported));
    }

    #[test]
    fn test_classify_empty_photo_list_falls_through_to_document() {
        let mut msg = message(1);
        msg.photo = Some(vec![]);
        msg.document = Some(TelegramDocument {
            file_id: "d1".to_string(),
            file_name: None,
            mime_type: None,
        });

        assert!(matches!(classify(&msg), InboundEvent::Document(_)));
    }

    #[test]
    fn test_classify_nothing_is_unsupported() {
        assert!(matches!(classify(&message(1)), InboundEvent::Unsupported));
    }

    #[test]
    fn test_largest_photo_picks_max_size() {
        let photos = vec![
            photo("a", Some(10)),
            photo("b", Some(30)),
            photo("c", Some(20)),
        ];

        assert_eq!(largest_photo(&photos).file_id, "b");
    }

    #[test]
    fn test_largest_photo_tie_keeps_first() {
        let photos = vec![
            photo("a", Some(25)),
            photo("b", Some(25)),
            photo("c", Some(25)),
        ];

        assert_eq!(largest_photo(&photos).file_id, "a");
    }

    #[test]
    fn test_largest_photo_missing_size_counts_as_zero() {
        let photos = vec![photo("a", None), photo("b", Some(1)), photo("c", None)];

        assert_eq!(largest_photo(&photos).file_id, "b");
    }

    #[test]
    fn test_storage_key_shape() {
        let now = DateTime::parse_from_rfc3339("2026-02-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(
            storage_key(42, now, "report.pdf"),
            format!("42/{}-report.pdf", now.timestamp_millis())
        );
    }
}
