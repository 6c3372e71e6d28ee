//! Conversation history repository
//!
//! Append-only, partitioned by chat. Records are never updated or deleted.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::DbPool;
use crate::{Error, Result};

/// A persisted conversation turn
#[derive(Debug, Clone)]
pub struct MessageRecord {
    pub id: String,
    pub chat_id: i64,
    pub role: ChatRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Role of a persisted conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

impl ChatRole {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Self::User),
            "assistant" => Some(Self::Assistant),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

/// Conversation history repository
#[derive(Clone)]
pub struct HistoryRepo {
    pool: DbPool,
}

impl HistoryRepo {
    /// Create a new history repository
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Append a message to a chat's history
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn append(&self, chat_id: i64, role: ChatRole, content: &str) -> Result<MessageRecord> {
        let conn = self
            .pool
            .get()
            .map_err(|e| Error::Database(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO messages (id, chat_id, role, content, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![&id, chat_id, role.as_str(), content, now.to_rfc3339()],
        )
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(MessageRecord {
            id,
            chat_id,
            role,
            content: content.to_string(),
            created_at: now,
        })
    }

    /// Get the most recent messages for a chat, oldest first
    ///
    /// The store is queried newest-first to apply the limit; the result is
    /// reversed before return so callers always see chronological order.
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn load_recent(&self, chat_id: i64, limit: usize) -> Result<Vec<MessageRecord>> {
        let conn = self
            .pool
            .get()
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT id, chat_id, role, content, created_at
                 FROM messages WHERE chat_id = ?1
                 ORDER BY created_at DESC LIMIT ?2",
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        #[allow(clippy::cast_possible_wrap)]
        let records = stmt
            .query_map(rusqlite::params![chat_id, limit as i64], |row| {
                Ok(MessageRecord {
                    id: row.get(0)?,
                    chat_id: row.get(1)?,
                    role: ChatRole::from_str(&row.get::<_, String>(2)?)
                        .unwrap_or(ChatRole::User),
                    content: row.get(3)?,
                    created_at: parse_datetime(&row.get::<_, String>(4)?),
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?
            .filter_map(std::result::Result::ok)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();

        Ok(records)
    }

    /// Count messages in a chat
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn message_count(&self, chat_id: i64) -> Result<usize> {
        let conn = self
            .pool
            .get()
            .map_err(|e| Error::Database(e.to_string()))?;

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM messages WHERE chat_id = ?1",
                [chat_id],
                |row| row.get(0),
            )
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(usize::try_from(count).unwrap_or(0))
    }
}

fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}
