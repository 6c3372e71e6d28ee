//! HTTP API server for Herald gateway

pub mod health;
pub mod webhooks;

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::channels::TelegramChannel;
use crate::config::Config;
use crate::db::{DbPool, HistoryRepo};
use crate::openai::OpenAiClient;
use crate::storage::StorageClient;
use crate::Result;

/// Shared state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub db: DbPool,
    pub history: HistoryRepo,
    pub telegram: TelegramChannel,
    pub openai: OpenAiClient,
    pub storage: StorageClient,
    /// Expected webhook secret token; check disabled when `None`
    pub webhook_secret: Option<String>,
    /// Vector store for document retrieval; tooling disabled when `None`
    pub vector_store_id: Option<String>,
}

impl ApiState {
    /// Build API state from configuration and an initialized database
    #[must_use]
    pub fn new(db: DbPool, config: &Config) -> Self {
        Self {
            history: HistoryRepo::new(db.clone()),
            db,
            telegram: TelegramChannel::new(config.telegram_token.clone()),
            openai: OpenAiClient::new(config),
            storage: StorageClient::new(&config.storage),
            webhook_secret: config.webhook_secret.clone(),
            vector_store_id: config.vector_store_id.clone(),
        }
    }
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    port: u16,
}

impl ApiServer {
    /// Create a new API server
    #[must_use]
    pub const fn new(state: Arc<ApiState>, port: u16) -> Self {
        Self { state, port }
    }

    /// Build the router with all routes
    #[must_use]
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .nest("/api/webhooks", webhooks::router(self.state.clone()))
            .merge(health::router())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the API server
    ///
    /// # Errors
    ///
    /// Returns error if server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(port = self.port, "API server listening");

        axum::serve(listener, self.router())
            .await
            .map_err(|e| crate::Error::Config(format!("API server error: {e}")))?;

        Ok(())
    }
}
