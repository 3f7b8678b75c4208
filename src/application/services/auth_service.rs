//! Authentication Service
//!
//! Credential verification and JWT access token issuance. Token validation
//! for inbound requests happens in the auth middleware.

use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHash, PasswordVerifier},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::config::JwtSettings;
use crate::domain::entities::{User, UserRepository};

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate with credentials, returning the user and a signed
    /// access token.
    async fn sign_in(&self, email: &str, password: &str) -> Result<(User, String), AuthError>;
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// JWT ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// AuthService implementation
pub struct AuthServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    jwt_settings: JwtSettings,
}

impl<U> AuthServiceImpl<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, jwt_settings: JwtSettings) -> Self {
        Self {
            user_repo,
            jwt_settings,
        }
    }

    /// Verify a password against its hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate a signed access token for the user
    fn issue_token(&self, user_id: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let expiry = now + Duration::minutes(self.jwt_settings.access_token_expiry_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: expiry.timestamp(),
            iat: now.timestamp(),
            jti: Some(uuid::Uuid::new_v4().to_string()),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_settings.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))
    }
}

#[async_trait]
impl<U> AuthService for AuthServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn sign_in(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        // Find user by email
        let user = self
            .user_repo
            .find_by_email(email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        // Verify password
        if !self.verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(user.id)?;

        Ok((user, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MockUserRepository;
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
    use mockall::predicate::eq;

    fn hash(password: &str) -> String {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .unwrap()
            .to_string()
    }

    fn settings() -> JwtSettings {
        JwtSettings {
            secret: "a-test-secret-of-at-least-32-chars!!".into(),
            access_token_expiry_minutes: 15,
        }
    }

    #[tokio::test]
    async fn test_sign_in_with_valid_credentials() {
        let mut user_repo = MockUserRepository::new();
        let password_hash = hash("correct horse");

        user_repo
            .expect_find_by_email()
            .with(eq("ada@example.com"))
            .returning(move |_| {
                Ok(Some(User {
                    id: 42,
                    email: "ada@example.com".into(),
                    password_hash: password_hash.clone(),
                    ..Default::default()
                }))
            });

        let service = AuthServiceImpl::new(Arc::new(user_repo), settings());

        let (user, token) = service.sign_in("ada@example.com", "correct horse").await.unwrap();
        assert_eq!(user.id, 42);
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_rejects_wrong_password() {
        let mut user_repo = MockUserRepository::new();
        let password_hash = hash("correct horse");

        user_repo.expect_find_by_email().returning(move |_| {
            Ok(Some(User {
                id: 42,
                password_hash: password_hash.clone(),
                ..Default::default()
            }))
        });

        let service = AuthServiceImpl::new(Arc::new(user_repo), settings());

        let result = service.sign_in("ada@example.com", "wrong").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_sign_in_rejects_unknown_email() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_email().returning(|_| Ok(None));

        let service = AuthServiceImpl::new(Arc::new(user_repo), settings());

        let result = service.sign_in("nobody@example.com", "whatever").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }
}
