//! Message Repository Implementation
//!
//! PostgreSQL implementation of the MessageRepository trait. The direct /
//! group split is stored as a discriminant column plus a context reference
//! and reconstructed into the tagged MessageContext on read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::{ContentType, Message, MessageContext, MessageRepository};
use crate::shared::error::AppError;

/// Database row representation matching the messages table schema.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    context_type: String,
    context_id: i64,
    receiver_id: Option<i64>,
    sender_id: i64,
    content_type: String,
    text: String,
    is_read: bool,
    sent_at: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self) -> Message {
        let context = match self.context_type.as_str() {
            "group" => MessageContext::Group {
                group_id: self.context_id,
            },
            _ => MessageContext::Direct {
                chat_id: self.context_id,
                receiver_id: self.receiver_id.unwrap_or_default(),
            },
        };

        Message {
            id: self.id,
            content_type: ContentType::from_str(&self.content_type),
            text: self.text,
            sender_id: self.sender_id,
            context,
            is_read: self.is_read,
            sent_at: self.sent_at,
        }
    }
}

const MESSAGE_COLUMNS: &str = "id, context_type, context_id, receiver_id, sender_id, \
                               content_type, text, is_read, sent_at";

/// PostgreSQL message repository implementation.
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    /// Find a message by its internal ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_message()))
    }

    /// Create a new message.
    async fn create(&self, message: &Message) -> Result<Message, AppError> {
        let receiver_id = match message.context {
            MessageContext::Direct { receiver_id, .. } => Some(receiver_id),
            MessageContext::Group { .. } => None,
        };

        let row = sqlx::query_as::<_, MessageRow>(&format!(
            r#"
            INSERT INTO messages
                (id, context_type, context_id, receiver_id, sender_id, content_type, text, is_read, sent_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(message.id)
        .bind(message.context.kind())
        .bind(message.context.context_id())
        .bind(receiver_id)
        .bind(message.sender_id)
        .bind(message.content_type.as_str())
        .bind(&message.text)
        .bind(message.is_read)
        .bind(message.sent_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_message())
    }

    /// Delete a message row.
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Message with id {} not found",
                id
            )));
        }

        Ok(())
    }

    /// Bulk-delete messages by ID.
    async fn delete_many(&self, ids: &[i64]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM messages WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete every message owned by the given group.
    async fn delete_by_group(&self, group_id: i64) -> Result<u64, AppError> {
        let result =
            sqlx::query("DELETE FROM messages WHERE context_type = 'group' AND context_id = $1")
                .bind(group_id)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected())
    }
}
