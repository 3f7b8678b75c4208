//! User Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::Value;
use validator::Validate;

use crate::application::dto::request::{
    SetAvatarRequest, SignUpRequest, UpdateUserRequest, SET_AVATAR_SHAPE, SIGN_UP_SHAPE,
};
use crate::application::dto::response::{Ack, AvatarResponse, UserResponse};
use crate::application::services::{
    SignUpDto, UpdateProfileDto, UserError, UserService, UserServiceImpl,
};
use crate::domain::services::AccessControl;
use crate::infrastructure::repositories::PgUserRepository;
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::params::has_params;
use crate::shared::validation::validation_error;
use crate::shared::snowflake;
use crate::startup::AppState;

fn user_service(state: &AppState) -> UserServiceImpl<PgUserRepository> {
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    UserServiceImpl::new(user_repo, state.snowflake.clone())
}

fn map_user_error(e: UserError) -> AppError {
    match e {
        UserError::NotFound => AppError::NotFound("User not found".into()),
        UserError::EmailExists => AppError::Conflict("Email already exists".into()),
        e => AppError::Internal(e.to_string()),
    }
}

fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    snowflake::from_string(raw).map_err(|_| AppError::BadRequest("Invalid user ID".into()))
}

/// Create a new account
pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Ack>, AppError> {
    if !has_params(&body, SIGN_UP_SHAPE) {
        return Err(AppError::missing_parameters());
    }
    let body: SignUpRequest =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    body.validate().map_err(validation_error)?;

    user_service(&state)
        .sign_up(SignUpDto {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            password: body.password,
        })
        .await
        .map_err(map_user_error)?;

    Ok(Json(Ack::new("Successfully signed up")))
}

/// List all users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = user_service(&state)
        .list_users()
        .await
        .map_err(map_user_error)?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = parse_user_id(&user_id)?;

    let user = user_service(&state)
        .get_user(user_id)
        .await
        .map_err(map_user_error)?;

    Ok(Json(UserResponse::from(user)))
}

/// Update the caller's own profile
pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = parse_user_id(&user_id)?;

    if !AccessControl::is_self(auth.user_id, user_id) {
        return Err(AppError::Forbidden("User is not authorized".into()));
    }

    let body: UpdateUserRequest =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    body.validate().map_err(validation_error)?;

    let user = user_service(&state)
        .update_profile(
            user_id,
            UpdateProfileDto {
                first_name: body.first_name,
                last_name: body.last_name,
                avatar_url: body.avatar,
            },
        )
        .await
        .map_err(map_user_error)?;

    Ok(Json(UserResponse::from(user)))
}

/// Delete the caller's own account, returning the deleted profile
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user_id = parse_user_id(&user_id)?;

    if !AccessControl::is_self(auth.user_id, user_id) {
        return Err(AppError::Forbidden("User is not authorized".into()));
    }

    let user = user_service(&state)
        .delete_user(user_id)
        .await
        .map_err(map_user_error)?;

    Ok(Json(UserResponse::from(user)))
}

/// Get a user's avatar URL
pub async fn get_avatar(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<AvatarResponse>, AppError> {
    let user_id = parse_user_id(&user_id)?;

    let avatar = user_service(&state)
        .get_avatar(user_id)
        .await
        .map_err(map_user_error)?;

    Ok(Json(AvatarResponse { avatar }))
}

/// Replace the caller's own avatar
pub async fn set_avatar(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Ack>, AppError> {
    let user_id = parse_user_id(&user_id)?;

    if !AccessControl::is_self(auth.user_id, user_id) {
        return Err(AppError::Forbidden("User is not authorized".into()));
    }

    if !has_params(&body, SET_AVATAR_SHAPE) {
        return Err(AppError::missing_parameters());
    }
    let body: SetAvatarRequest =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;

    user_service(&state)
        .set_avatar(user_id, body.avatar)
        .await
        .map_err(map_user_error)?;

    Ok(Json(Ack::new("Avatar updated successfully")))
}
