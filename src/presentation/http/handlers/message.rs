//! Message Handlers
//!
//! Group message sending and message deletion for both contexts. Direct
//! sends live in the chat handlers; deletion always runs through the
//! sender-only gate and the detach cascade.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::Value;

use crate::application::dto::request::{SendMessageRequest, SEND_MESSAGE_SHAPE};
use crate::application::dto::response::Ack;
use crate::application::services::{
    MessageDraft, MessageError, MessageService, MessageServiceImpl,
};
use crate::domain::entities::ContentType;
use crate::infrastructure::repositories::{
    PgChatRepository, PgGroupRepository, PgMessageRepository, PgUserRepository,
};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::params::has_params;
use crate::shared::snowflake;
use crate::startup::AppState;

type Service =
    MessageServiceImpl<PgUserRepository, PgChatRepository, PgGroupRepository, PgMessageRepository>;

fn message_service(state: &AppState) -> Service {
    MessageServiceImpl::new(
        Arc::new(PgUserRepository::new(state.db.clone())),
        Arc::new(PgChatRepository::new(state.db.clone())),
        Arc::new(PgGroupRepository::new(state.db.clone())),
        Arc::new(PgMessageRepository::new(state.db.clone())),
        state.snowflake.clone(),
    )
}

fn map_message_error(e: MessageError) -> AppError {
    match e {
        MessageError::MessageNotFound => AppError::NotFound("Message not found".into()),
        MessageError::GroupNotFound => AppError::NotFound("Group not found".into()),
        MessageError::NotMember => {
            AppError::Forbidden("Not authorized, user not member of group".into())
        }
        MessageError::Forbidden => {
            AppError::Forbidden("Only the sender can delete a message".into())
        }
        e => AppError::Internal(e.to_string()),
    }
}

fn parse_id(raw: &str, what: &str) -> Result<i64, AppError> {
    snowflake::from_string(raw).map_err(|_| AppError::BadRequest(format!("Invalid {} ID", what)))
}

/// Send a message into a group
pub async fn send_to_group(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(group_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Ack>, AppError> {
    let group_id = parse_id(&group_id, "group")?;

    if !has_params(&body, SEND_MESSAGE_SHAPE) {
        return Err(AppError::missing_parameters());
    }
    let body: SendMessageRequest =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    message_service(&state)
        .send_to_group(
            group_id,
            auth.user_id,
            MessageDraft {
                content_type: ContentType::from_str(&body.content_type),
                text: body.text,
            },
        )
        .await
        .map_err(map_message_error)?;

    Ok(Json(Ack::new("Message sent to group")))
}

/// Delete a direct message from a chat
pub async fn delete_chat_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((chat_id, message_id)): Path<(String, String)>,
) -> Result<Json<Ack>, AppError> {
    let chat_id = parse_id(&chat_id, "chat")?;
    let message_id = parse_id(&message_id, "message")?;

    message_service(&state)
        .delete_chat_message(chat_id, message_id, auth.user_id)
        .await
        .map_err(map_message_error)?;

    Ok(Json(Ack::new("Message deleted successfully")))
}

/// Delete a group message
pub async fn delete_group_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path((group_id, message_id)): Path<(String, String)>,
) -> Result<Json<Ack>, AppError> {
    let group_id = parse_id(&group_id, "group")?;
    let message_id = parse_id(&message_id, "message")?;

    message_service(&state)
        .delete_group_message(group_id, message_id, auth.user_id)
        .await
        .map_err(map_message_error)?;

    Ok(Json(Ack::new("Message deleted successfully")))
}
