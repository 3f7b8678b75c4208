//! Group Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::Value;
use validator::Validate;

use crate::application::dto::request::{
    CreateGroupRequest, TargetUserRequest, TargetUsersRequest, CREATE_GROUP_SHAPE,
    TARGET_USERS_SHAPE, TARGET_USER_SHAPE,
};
use crate::application::dto::response::Ack;
use crate::application::services::{GroupError, GroupService, GroupServiceImpl};
use crate::infrastructure::repositories::{
    PgChatRepository, PgGroupRepository, PgMessageRepository, PgUserRepository,
};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::params::has_params;
use crate::shared::snowflake;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

type Service =
    GroupServiceImpl<PgUserRepository, PgChatRepository, PgGroupRepository, PgMessageRepository>;

fn group_service(state: &AppState) -> Service {
    GroupServiceImpl::new(
        Arc::new(PgUserRepository::new(state.db.clone())),
        Arc::new(PgChatRepository::new(state.db.clone())),
        Arc::new(PgGroupRepository::new(state.db.clone())),
        Arc::new(PgMessageRepository::new(state.db.clone())),
        state.snowflake.clone(),
    )
}

fn map_group_error(e: GroupError) -> AppError {
    match e {
        GroupError::NotFound => AppError::NotFound("Group not found".into()),
        GroupError::NotMember => {
            AppError::Forbidden("Not authorized, user not member of group".into())
        }
        GroupError::NotAdministrator => {
            AppError::Forbidden("Not authorized, user doesn't have necessary rights".into())
        }
        GroupError::Store(msg) => AppError::BadRequest(msg),
        e => AppError::Internal(e.to_string()),
    }
}

fn parse_group_id(raw: &str) -> Result<i64, AppError> {
    snowflake::from_string(raw).map_err(|_| AppError::BadRequest("Invalid group ID".into()))
}

fn parse_targets(ids: &[String]) -> Result<Vec<i64>, AppError> {
    ids.iter()
        .map(|id| snowflake::from_string(id))
        .collect::<Result<_, _>>()
        .map_err(|_| AppError::BadRequest("Invalid user ID".into()))
}

/// Create a group; the caller becomes its sole member and administrator
pub async fn create_group(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Json(body): Json<Value>,
) -> Result<Json<Ack>, AppError> {
    if !has_params(&body, CREATE_GROUP_SHAPE) {
        return Err(AppError::missing_parameters());
    }
    let body: CreateGroupRequest =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    body.validate().map_err(validation_error)?;

    group_service(&state)
        .create_group(auth.user_id, body.name)
        .await
        .map_err(map_group_error)?;

    Ok(Json(Ack::new("Group created successfully")))
}

/// Delete a group, cascading to all owned messages
pub async fn delete_group(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(group_id): Path<String>,
) -> Result<Json<Ack>, AppError> {
    let group_id = parse_group_id(&group_id)?;

    group_service(&state)
        .delete_group(group_id, auth.user_id)
        .await
        .map_err(map_group_error)?;

    Ok(Json(Ack::new("Group deleted successfully")))
}

/// Add users to the member list
pub async fn add_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(group_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Ack>, AppError> {
    let group_id = parse_group_id(&group_id)?;

    if !has_params(&body, TARGET_USERS_SHAPE) {
        return Err(AppError::missing_parameters());
    }
    let body: TargetUsersRequest =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let targets = parse_targets(&body.target_users)?;

    let group = group_service(&state)
        .add_members(group_id, auth.user_id, &targets)
        .await
        .map_err(map_group_error)?;

    Ok(Json(Ack::new(format!(
        "Successfully added to \"{}\"",
        group.name
    ))))
}

/// Remove users from the member list
pub async fn remove_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(group_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Ack>, AppError> {
    let group_id = parse_group_id(&group_id)?;

    if !has_params(&body, TARGET_USERS_SHAPE) {
        return Err(AppError::missing_parameters());
    }
    let body: TargetUsersRequest =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let targets = parse_targets(&body.target_users)?;

    let group = group_service(&state)
        .remove_members(group_id, auth.user_id, &targets)
        .await
        .map_err(map_group_error)?;

    Ok(Json(Ack::new(format!(
        "User removed from \"{}\" successfully",
        group.name
    ))))
}

/// Promote a user to administrator
pub async fn add_administrator(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(group_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Ack>, AppError> {
    let group_id = parse_group_id(&group_id)?;

    if !has_params(&body, TARGET_USER_SHAPE) {
        return Err(AppError::missing_parameters());
    }
    let body: TargetUserRequest =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let target_id = snowflake::from_string(&body.target_user_id)
        .map_err(|_| AppError::BadRequest("Invalid user ID".into()))?;

    group_service(&state)
        .add_administrator(group_id, auth.user_id, target_id)
        .await
        .map_err(map_group_error)?;

    Ok(Json(Ack::new("Group administrator set successfully")))
}

/// Demote an administrator
pub async fn remove_administrator(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(group_id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Ack>, AppError> {
    let group_id = parse_group_id(&group_id)?;

    if !has_params(&body, TARGET_USER_SHAPE) {
        return Err(AppError::missing_parameters());
    }
    let body: TargetUserRequest =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    let target_id = snowflake::from_string(&body.target_user_id)
        .map_err(|_| AppError::BadRequest("Invalid user ID".into()))?;

    group_service(&state)
        .remove_administrator(group_id, auth.user_id, target_id)
        .await
        .map_err(map_group_error)?;

    Ok(Json(Ack::new(
        "User successfully removed from administrators",
    )))
}
