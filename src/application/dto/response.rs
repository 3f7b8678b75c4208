//! Response DTOs
//!
//! Data structures for API response bodies. Successful mutations carry a
//! `message` field; reads return the entity body. Sensitive fields
//! (password hashes) never appear in a response.

use serde::Serialize;

use crate::domain::entities::User;

/// Generic success acknowledgment
#[derive(Debug, Serialize)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User profile response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub chats: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            avatar: user.avatar_url,
            chats: user.chat_ids.iter().map(|id| id.to_string()).collect(),
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// Abbreviated user info embedded in the sign-in response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}

/// Sign-in response
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: UserSummary,
}

/// Avatar read response
#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub avatar: Option<String>,
}
