//! Chat Repository Implementation
//!
//! PostgreSQL implementation of the ChatRepository trait. The message
//! reference list lives in a BIGINT[] column maintained with
//! array_append/array_remove.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::entities::{Chat, ChatRepository};
use crate::shared::error::AppError;

/// Database row representation matching the chats table schema.
#[derive(Debug, sqlx::FromRow)]
struct ChatRow {
    id: i64,
    user1_id: i64,
    user2_id: i64,
    message_ids: Vec<i64>,
}

impl ChatRow {
    fn into_chat(self) -> Chat {
        Chat {
            id: self.id,
            user1_id: self.user1_id,
            user2_id: self.user2_id,
            message_ids: self.message_ids,
        }
    }
}

/// PostgreSQL chat repository implementation.
#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    /// Create a new PgChatRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatRepository for PgChatRepository {
    /// Find a chat by its internal ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Chat>, AppError> {
        let row = sqlx::query_as::<_, ChatRow>(
            "SELECT id, user1_id, user2_id, message_ids FROM chats WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_chat()))
    }

    /// Find the chat for an unordered participant pair.
    async fn find_by_pair(&self, a: i64, b: i64) -> Result<Option<Chat>, AppError> {
        let row = sqlx::query_as::<_, ChatRow>(
            r#"
            SELECT id, user1_id, user2_id, message_ids
            FROM chats
            WHERE LEAST(user1_id, user2_id) = LEAST($1, $2)
              AND GREATEST(user1_id, user2_id) = GREATEST($1, $2)
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_chat()))
    }

    /// Create a new chat. The unique index on the normalized pair rejects
    /// a second chat for the same two users.
    async fn create(&self, chat: &Chat) -> Result<Chat, AppError> {
        let row = sqlx::query_as::<_, ChatRow>(
            r#"
            INSERT INTO chats (id, user1_id, user2_id, message_ids)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user1_id, user2_id, message_ids
            "#,
        )
        .bind(chat.id)
        .bind(chat.user1_id)
        .bind(chat.user2_id)
        .bind(&chat.message_ids)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("A chat between these users already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_chat())
    }

    /// Delete a chat row.
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM chats WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Chat with id {} not found", id)));
        }

        Ok(())
    }

    /// Append a message reference to the owned list.
    async fn push_message(&self, chat_id: i64, message_id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE chats SET message_ids = array_append(message_ids, $2) WHERE id = $1",
        )
        .bind(chat_id)
        .bind(message_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Chat with id {} not found",
                chat_id
            )));
        }

        Ok(())
    }

    /// Remove a message reference from the owned list if present.
    async fn remove_message_ref(&self, chat_id: i64, message_id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE chats SET message_ids = array_remove(message_ids, $2) WHERE id = $1")
            .bind(chat_id)
            .bind(message_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
