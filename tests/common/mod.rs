//! Shared test utilities

use herald_gateway::{Config, DbPool, db};

/// Set up an in-memory test database
#[must_use]
pub fn setup_test_db() -> DbPool {
    db::init_memory().expect("failed to init test db")
}

/// Build a configuration from fixed test settings
#[must_use]
pub fn test_config(webhook_secret: Option<&str>) -> Config {
    Config::from_lookup(|key| match key {
        "TELEGRAM_BOT_TOKEN" => Some("123:test-token".to_string()),
        "OPENAI_API_KEY" => Some("sk-test".to_string()),
        "STORAGE_URL" => Some("https://storage.test.invalid".to_string()),
        "STORAGE_SERVICE_KEY" => Some("service-key".to_string()),
        "TELEGRAM_WEBHOOK_SECRET" => webhook_secret.map(String::from),
        _ => None,
    })
    .expect("failed to build test config")
}
