//! Inbound webhook routes

pub mod telegram;

use std::sync::Arc;

use axum::{routing::post, Router};

use super::ApiState;

/// Build the webhooks router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/telegram", post(telegram::handle_update))
        .with_state(state)
}
