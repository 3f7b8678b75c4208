//! Chat entity and repository trait.
//!
//! Maps to the `chats` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A one-to-one conversation between two users.
///
/// Maps to the `chats` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - user1_id: BIGINT NOT NULL
/// - user2_id: BIGINT NOT NULL
/// - message_ids: BIGINT[] NOT NULL DEFAULT '{}'
///
/// The participant pair is unordered: a unique index on the normalized pair
/// guarantees at most one chat per pair of users. The chat exclusively owns
/// its message-reference list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// First participant
    pub user1_id: i64,

    /// Second participant
    pub user2_id: i64,

    /// Messages owned by this chat, oldest first
    pub message_ids: Vec<i64>,
}

impl Chat {
    /// Normalize an unordered participant pair for uniqueness checks.
    pub fn normalized_pair(a: i64, b: i64) -> (i64, i64) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Check whether a user is one of the two participants.
    pub fn has_participant(&self, user_id: i64) -> bool {
        self.user1_id == user_id || self.user2_id == user_id
    }

    /// The participant on the other side of the conversation.
    pub fn other_participant(&self, user_id: i64) -> i64 {
        if self.user1_id == user_id {
            self.user2_id
        } else {
            self.user1_id
        }
    }

    /// Check whether the chat owns the given message.
    pub fn owns_message(&self, message_id: i64) -> bool {
        self.message_ids.contains(&message_id)
    }
}

/// Repository trait for Chat data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatRepository: Send + Sync {
    /// Find a chat by its Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Chat>, AppError>;

    /// Find the chat for an unordered participant pair.
    async fn find_by_pair(&self, a: i64, b: i64) -> Result<Option<Chat>, AppError>;

    /// Create a new chat.
    async fn create(&self, chat: &Chat) -> Result<Chat, AppError>;

    /// Delete a chat by ID.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Append a message reference to the chat's owned list.
    async fn push_message(&self, chat_id: i64, message_id: i64) -> Result<(), AppError>;

    /// Remove a message reference from the chat's owned list if present.
    async fn remove_message_ref(&self, chat_id: i64, message_id: i64) -> Result<(), AppError>;
}
