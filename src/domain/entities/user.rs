//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a user account.
///
/// Maps to the `users` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - first_name: VARCHAR(64) NOT NULL
/// - last_name: VARCHAR(64) NOT NULL
/// - email: VARCHAR(255) NOT NULL UNIQUE
/// - password_hash: VARCHAR(255) NOT NULL
/// - avatar_url: TEXT NULL
/// - chat_ids: BIGINT[] NOT NULL DEFAULT '{}'
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Email address (unique)
    pub email: String,

    /// Argon2 password hash (salt embedded in the PHC string)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// URL to the user's avatar image
    pub avatar_url: Option<String>,

    /// Chats this user participates in. Non-owning back-references,
    /// maintained by the chat cascade on creation and deletion.
    pub chat_ids: Vec<i64>,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check whether the user holds a back-reference to the given chat.
    pub fn participates_in(&self, chat_id: i64) -> bool {
        self.chat_ids.contains(&chat_id)
    }
}

impl Default for User {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            password_hash: String::new(),
            avatar_url: None,
            chat_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// List all users.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Create a new user in the database.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Update an existing user.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Delete a user by ID.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Check if an email address is already registered.
    async fn email_exists(&self, email: &str) -> Result<bool, AppError>;

    /// Add a chat back-reference. Idempotent: a reference already present
    /// is left alone.
    async fn add_chat_ref(&self, user_id: i64, chat_id: i64) -> Result<(), AppError>;

    /// Remove a chat back-reference if present.
    async fn remove_chat_ref(&self, user_id: i64, chat_id: i64) -> Result<(), AppError>;
}
