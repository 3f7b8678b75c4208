//! User Service
//!
//! Handles signup and user profile management.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::Utc;

use crate::domain::entities::{User, UserRepository};
use crate::shared::snowflake::SnowflakeGenerator;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a new account
    async fn sign_up(&self, request: SignUpDto) -> Result<User, UserError>;

    /// List all users
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Get a user by ID
    async fn get_user(&self, user_id: i64) -> Result<User, UserError>;

    /// Update profile fields
    async fn update_profile(&self, user_id: i64, update: UpdateProfileDto)
        -> Result<User, UserError>;

    /// Delete an account, returning the deleted profile
    async fn delete_user(&self, user_id: i64) -> Result<User, UserError>;

    /// Get a user's avatar URL
    async fn get_avatar(&self, user_id: i64) -> Result<Option<String>, UserError>;

    /// Replace a user's avatar URL
    async fn set_avatar(&self, user_id: i64, avatar_url: String) -> Result<(), UserError>;
}

/// Signup request
#[derive(Debug, Clone)]
pub struct SignUpDto {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Profile update request
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// User service errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("Email already exists")]
    EmailExists,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// UserService implementation
pub struct UserServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<U> UserServiceImpl<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            user_repo,
            id_generator,
        }
    }

    /// Hash a password using Argon2id
    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::Internal(format!("Password hashing failed: {}", e)))
    }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn sign_up(&self, request: SignUpDto) -> Result<User, UserError> {
        // Check if email already exists
        if self
            .user_repo
            .email_exists(&request.email)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
        {
            return Err(UserError::EmailExists);
        }

        let password_hash = self.hash_password(&request.password)?;

        let now = Utc::now();
        let user = User {
            id: self.id_generator.generate(),
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            password_hash,
            avatar_url: None,
            chat_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.user_repo
            .create(&user)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.user_repo
            .list()
            .await
            .map_err(|e| UserError::Internal(e.to_string()))
    }

    async fn get_user(&self, user_id: i64) -> Result<User, UserError> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
            .ok_or(UserError::NotFound)
    }

    async fn update_profile(
        &self,
        user_id: i64,
        update: UpdateProfileDto,
    ) -> Result<User, UserError> {
        let mut user = self.get_user(user_id).await?;

        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name;
        }
        if let Some(avatar_url) = update.avatar_url {
            user.avatar_url = Some(avatar_url);
        }

        self.user_repo
            .update(&user)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))
    }

    async fn delete_user(&self, user_id: i64) -> Result<User, UserError> {
        let user = self.get_user(user_id).await?;

        // Deleting a user does not cascade: chats the user participated in
        // keep their rows until a participant deletes them explicitly.
        self.user_repo
            .delete(user_id)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?;

        Ok(user)
    }

    async fn get_avatar(&self, user_id: i64) -> Result<Option<String>, UserError> {
        Ok(self.get_user(user_id).await?.avatar_url)
    }

    async fn set_avatar(&self, user_id: i64, avatar_url: String) -> Result<(), UserError> {
        let mut user = self.get_user(user_id).await?;
        user.avatar_url = Some(avatar_url);

        self.user_repo
            .update(&user)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::MockUserRepository;
    use mockall::predicate::eq;

    fn id_generator() -> Arc<SnowflakeGenerator> {
        Arc::new(SnowflakeGenerator::new(1, 0))
    }

    #[tokio::test]
    async fn test_sign_up_hashes_password() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_email_exists().returning(|_| Ok(false));
        user_repo
            .expect_create()
            .withf(|user: &User| {
                // The stored hash must be a PHC string, never the raw password.
                user.password_hash.starts_with("$argon2") && user.password_hash != "hunter2"
            })
            .returning(|user| Ok(user.clone()));

        let service = UserServiceImpl::new(Arc::new(user_repo), id_generator());

        let user = service
            .sign_up(SignUpDto {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap();

        assert!(user.chat_ids.is_empty());
    }

    #[tokio::test]
    async fn test_sign_up_rejects_duplicate_email() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_email_exists()
            .with(eq("ada@example.com"))
            .returning(|_| Ok(true));
        user_repo.expect_create().times(0);

        let service = UserServiceImpl::new(Arc::new(user_repo), id_generator());

        let result = service
            .sign_up(SignUpDto {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "ada@example.com".into(),
                password: "hunter2".into(),
            })
            .await;

        assert!(matches!(result, Err(UserError::EmailExists)));
    }

    #[tokio::test]
    async fn test_update_profile_applies_partial_fields() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_id().with(eq(42)).returning(|_| {
            Ok(Some(User {
                id: 42,
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                ..Default::default()
            }))
        });
        user_repo
            .expect_update()
            .withf(|user: &User| user.first_name == "Augusta" && user.last_name == "Lovelace")
            .returning(|user| Ok(user.clone()));

        let service = UserServiceImpl::new(Arc::new(user_repo), id_generator());

        let updated = service
            .update_profile(
                42,
                UpdateProfileDto {
                    first_name: Some("Augusta".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.first_name, "Augusta");
    }

    #[tokio::test]
    async fn test_delete_user_returns_deleted_profile() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_id().with(eq(42)).returning(|_| {
            Ok(Some(User {
                id: 42,
                ..Default::default()
            }))
        });
        user_repo.expect_delete().with(eq(42)).returning(|_| Ok(()));

        let service = UserServiceImpl::new(Arc::new(user_repo), id_generator());

        let deleted = service.delete_user(42).await.unwrap();
        assert_eq!(deleted.id, 42);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserServiceImpl::new(Arc::new(user_repo), id_generator());

        assert!(matches!(service.get_user(7).await, Err(UserError::NotFound)));
    }
}
