//! Chat Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::Value;

use crate::application::dto::request::{
    SendMessageRequest, SendToUserRequest, SEND_MESSAGE_SHAPE, SEND_TO_USER_SHAPE,
};
use crate::application::dto::response::Ack;
use crate::application::services::{
    ChatError, ChatService, ChatServiceImpl, MessageDraft,
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
    ChatServiceImpl<PgUserRepository, PgChatRepository, PgGroupRepository, PgMessageRepository>;

fn chat_service(state: &AppState) -> Service {
    ChatServiceImpl::new(
        Arc::new(PgUserRepository::new(state.db.clone())),
        Arc::new(PgChatRepository::new(state.db.clone())),
        Arc::new(PgGroupRepository::new(state.db.clone())),
        Arc::new(PgMessageRepository::new(state.db.clone())),
        state.snowflake.clone(),
    )
}

fn map_chat_error(e: ChatError) -> AppError {
    match e {
        ChatError::ChatNotFound => AppError::NotFound("Chat not found".into()),
        ChatError::UserNotFound => AppError::BadRequest("User(s) do not exist".into()),
        ChatError::Forbidden => {
            AppError::Forbidden("User doesn't have the rights to perform this action".into())
        }
        e => AppError::Internal(e.to_string()),
    }
}

fn parse_id(raw: &str, what: &str) -> Result<i64, AppError> {
    snowflake::from_string(raw).map_err(|_| AppError::BadRequest(format!("Invalid {} ID", what)))
}

/// Send a direct message, creating the chat for the pair when absent
pub async fn send_to_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> Result<Json<Ack>, AppError> {
    if !has_params(&body, SEND_TO_USER_SHAPE) {
        return Err(AppError::missing_parameters());
    }
    let body: SendToUserRequest =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    let receiver_id = parse_id(&body.receiver_id, "user")?;

    chat_service(&state)
        .send_to_user(
            auth.user_id,
            receiver_id,
            MessageDraft {
                content_type: ContentType::from_str(&body.content_type),
                text: body.text,
            },
        )
        .await
        .map_err(map_chat_error)?;

    Ok(Json(Ack::new("Message sent successfully")))
}

/// Send a message into an existing chat
pub async fn send_to_chat(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(chat_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Ack>, AppError> {
    let chat_id = parse_id(&chat_id, "chat")?;

    if !has_params(&body, SEND_MESSAGE_SHAPE) {
        return Err(AppError::missing_parameters());
    }
    let body: SendMessageRequest =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    chat_service(&state)
        .send_to_chat(
            chat_id,
            auth.user_id,
            MessageDraft {
                content_type: ContentType::from_str(&body.content_type),
                text: body.text,
            },
        )
        .await
        .map_err(map_chat_error)?;

    Ok(Json(Ack::new("Message sent successfully")))
}

/// Delete a chat, cascading to both participants and all owned messages
pub async fn delete_chat(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(chat_id): Path<String>,
) -> Result<Json<Ack>, AppError> {
    let chat_id = parse_id(&chat_id, "chat")?;

    chat_service(&state)
        .delete_chat(chat_id, auth.user_id)
        .await
        .map_err(map_chat_error)?;

    Ok(Json(Ack::new("Chat deleted successfully")))
}
