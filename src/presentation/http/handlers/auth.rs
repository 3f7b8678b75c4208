//! Authentication Handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::Value;
use validator::Validate;

use crate::application::dto::request::{SignInRequest, SIGN_IN_SHAPE};
use crate::application::dto::response::{Ack, SignInResponse, UserSummary};
use crate::application::services::{AuthError, AuthService, AuthServiceImpl};
use crate::infrastructure::repositories::PgUserRepository;
use crate::shared::error::AppError;
use crate::shared::params::has_params;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Sign in with credentials
pub async fn sign_in(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<SignInResponse>, AppError> {
    if !has_params(&body, SIGN_IN_SHAPE) {
        return Err(AppError::missing_parameters());
    }
    let body: SignInRequest =
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
    body.validate().map_err(validation_error)?;

    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let auth_service = AuthServiceImpl::new(user_repo, state.settings.jwt.clone());

    let (user, token) = auth_service
        .sign_in(&body.email, &body.password)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials => {
                AppError::Unauthorized("Email and password don't match".into())
            }
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(SignInResponse {
        token,
        user: UserSummary::from(user),
    }))
}

/// Sign out
///
/// Tokens are short-lived and not tracked server-side; signing out is an
/// acknowledgment and expiry is the actual invalidation mechanism.
pub async fn sign_out() -> Json<Ack> {
    Json(Ack::new("Signed out"))
}
