//! Request DTOs
//!
//! Data structures for API request bodies, together with the declared
//! body shapes the handlers check before deserializing.

use serde::Deserialize;
use validator::Validate;

use crate::shared::params::Shape;

/// Declared shape for `POST /auth/signin`
pub const SIGN_IN_SHAPE: &[(&str, Shape)] = &[
    ("email", Shape::String),
    ("password", Shape::String),
];

/// Sign-in request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[validate(email(message = "Please fill a valid email address"))]
    pub email: String,

    pub password: String,
}

/// Declared shape for `POST /api/users`
pub const SIGN_UP_SHAPE: &[(&str, Shape)] = &[
    ("firstName", Shape::String),
    ("lastName", Shape::String),
    ("email", Shape::String),
    ("password", Shape::String),
    ("avatar", Shape::Optional),
];

/// Signup request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 64, message = "Name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 64, message = "Name is required"))]
    pub last_name: String,

    #[validate(email(message = "Please fill a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least six characters"))]
    pub password: String,
}

/// Update user request; all fields optional
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Name is required"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Name is required"))]
    pub last_name: Option<String>,

    pub avatar: Option<String>,
}

/// Declared shape for `POST /api/users/{user_id}/avatar`
pub const SET_AVATAR_SHAPE: &[(&str, Shape)] = &[("avatar", Shape::String)];

/// Avatar replacement request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetAvatarRequest {
    pub avatar: String,
}

/// Declared shape for `POST /api/chats`
pub const SEND_TO_USER_SHAPE: &[(&str, Shape)] = &[
    ("contentType", Shape::String),
    ("text", Shape::String),
    ("receiverId", Shape::String),
];

/// First-message request, creating the chat when absent
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendToUserRequest {
    pub content_type: String,
    pub text: String,
    pub receiver_id: String,
}

/// Declared shape for `POST /api/chats/{chat_id}/messages` and
/// `POST /api/groups/{group_id}/messages`
pub const SEND_MESSAGE_SHAPE: &[(&str, Shape)] = &[
    ("contentType", Shape::String),
    ("text", Shape::String),
];

/// Message send request into an existing chat or group
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content_type: String,
    pub text: String,
}

/// Declared shape for `POST /api/groups`
pub const CREATE_GROUP_SHAPE: &[(&str, Shape)] = &[("name", Shape::String)];

/// Create group request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
}

/// Declared shape for `POST/DELETE /api/groups/{group_id}/members`
pub const TARGET_USERS_SHAPE: &[(&str, Shape)] = &[("targetUsers", Shape::Array)];

/// Bulk membership change request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetUsersRequest {
    pub target_users: Vec<String>,
}

/// Declared shape for `POST/DELETE /api/groups/{group_id}/admins`
pub const TARGET_USER_SHAPE: &[(&str, Shape)] = &[("targetUserId", Shape::String)];

/// Single-target administrator change request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetUserRequest {
    pub target_user_id: String,
}
