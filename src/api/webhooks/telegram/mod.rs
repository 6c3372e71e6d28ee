//! Telegram webhook handler

mod process;
pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;

use self::types::TelegramUpdate;
use crate::api::ApiState;

/// Telegram webhook response
#[derive(Serialize)]
pub struct WebhookResponse {
    pub ok: bool,
}

/// Handle an incoming Telegram update
///
/// Validates the shared secret header when one is configured, then drives
/// the update through the dispatcher. Internal failures never surface here:
/// the dispatcher converts them into a user-visible notice, and this handler
/// acknowledges unconditionally so Telegram does not redeliver the update.
pub async fn handle_update(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(update): Json<TelegramUpdate>,
) -> (StatusCode, Json<WebhookResponse>) {
    if let Some(expected) = state.webhook_secret.as_deref() {
        let provided = headers
            .get("x-telegram-bot-api-secret-token")
            .and_then(|v| v.to_str().ok());

        if provided != Some(expected) {
            tracing::warn!("Telegram webhook secret mismatch");
            return (
                StatusCode::UNAUTHORIZED,
                Json(WebhookResponse { ok: false }),
            );
        }
    }

    tracing::debug!(update_id = update.update_id, "received Telegram update");

    let Some(message) = update.message else {
        return (StatusCode::OK, Json(WebhookResponse { ok: true }));
    };

    process::dispatch(&state, update.update_id, &message).await;

    (StatusCode::OK, Json(WebhookResponse { ok: true }))
}
