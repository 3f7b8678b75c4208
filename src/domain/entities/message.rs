//! Message entity and repository trait.
//!
//! Maps to the `messages` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Payload kinds a message can carry, matching the VARCHAR constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Plain text
    #[default]
    Text,
    /// An audio clip
    Audio,
    /// A video clip
    Video,
    /// A voice recording
    Voice,
}

impl ContentType {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "audio" => Self::Audio,
            "video" => Self::Video,
            "voice" => Self::Voice,
            _ => Self::Text,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Voice => "voice",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Owning context of a message.
///
/// Direct messages live in a chat and address the other participant;
/// group messages live in a group, which is also their receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MessageContext {
    /// A message in a one-to-one chat
    Direct { chat_id: i64, receiver_id: i64 },
    /// A message in a group
    Group { group_id: i64 },
}

impl MessageContext {
    /// The owning chat or group ID.
    pub fn context_id(&self) -> i64 {
        match self {
            Self::Direct { chat_id, .. } => *chat_id,
            Self::Group { group_id } => *group_id,
        }
    }

    /// Discriminant string used by the store.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Direct { .. } => "chat",
            Self::Group { .. } => "group",
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Direct { .. })
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group { .. })
    }
}

/// A message sent into a chat or group.
///
/// Maps to the `messages` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - context_type: VARCHAR(8) NOT NULL ('chat' or 'group')
/// - context_id: BIGINT NOT NULL
/// - receiver_id: BIGINT NULL (direct messages only)
/// - sender_id: BIGINT NOT NULL
/// - content_type: VARCHAR(8) NOT NULL
/// - text: TEXT NOT NULL
/// - is_read: BOOLEAN NOT NULL DEFAULT FALSE
/// - sent_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// Immutable once sent except for the read flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Kind of payload
    pub content_type: ContentType,

    /// Text payload
    pub text: String,

    /// Author user ID
    pub sender_id: i64,

    /// Owning chat or group
    pub context: MessageContext,

    /// Whether the receiver has read the message
    pub is_read: bool,

    /// Timestamp when the message was sent
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// Check whether the given user authored this message.
    pub fn is_from(&self, user_id: i64) -> bool {
        self.sender_id == user_id
    }
}

/// Repository trait for Message data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Find a message by its Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Message>, AppError>;

    /// Create a new message.
    async fn create(&self, message: &Message) -> Result<Message, AppError>;

    /// Delete a message by ID.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Bulk-delete messages by ID, returning how many rows went away.
    async fn delete_many(&self, ids: &[i64]) -> Result<u64, AppError>;

    /// Delete every message whose context is the given group, returning
    /// how many rows went away.
    async fn delete_by_group(&self, group_id: i64) -> Result<u64, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_str() {
        assert_eq!(ContentType::from_str("text"), ContentType::Text);
        assert_eq!(ContentType::from_str("AUDIO"), ContentType::Audio);
        assert_eq!(ContentType::from_str("video"), ContentType::Video);
        assert_eq!(ContentType::from_str("voice"), ContentType::Voice);
        assert_eq!(ContentType::from_str("unknown"), ContentType::Text);
    }

    #[test]
    fn test_content_type_as_str_roundtrip() {
        for ct in [
            ContentType::Text,
            ContentType::Audio,
            ContentType::Video,
            ContentType::Voice,
        ] {
            assert_eq!(ContentType::from_str(ct.as_str()), ct);
        }
    }

    #[test]
    fn test_context_id_and_kind() {
        let direct = MessageContext::Direct {
            chat_id: 7,
            receiver_id: 2,
        };
        let group = MessageContext::Group { group_id: 9 };

        assert_eq!(direct.context_id(), 7);
        assert_eq!(direct.kind(), "chat");
        assert!(direct.is_direct());
        assert!(!direct.is_group());

        assert_eq!(group.context_id(), 9);
        assert_eq!(group.kind(), "group");
        assert!(group.is_group());
    }

    #[test]
    fn test_is_from() {
        let message = Message {
            id: 1,
            content_type: ContentType::Text,
            text: "hi".into(),
            sender_id: 42,
            context: MessageContext::Group { group_id: 9 },
            is_read: false,
            sent_at: Utc::now(),
        };

        assert!(message.is_from(42));
        assert!(!message.is_from(43));
    }
}
