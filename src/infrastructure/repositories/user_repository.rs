//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Maps between the database schema and domain User entity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::{User, UserRepository};
use crate::shared::error::AppError;

/// Database row representation matching the users table schema.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    avatar_url: Option<String>,
    chat_ids: Vec<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    /// Convert database row to domain User entity.
    fn into_user(self) -> User {
        User {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
            avatar_url: self.avatar_url,
            chat_ids: self.chat_ids,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

const USER_COLUMNS: &str = "id, first_name, last_name, email, password_hash, avatar_url, \
                            chat_ids, created_at, updated_at";

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    /// Find a user by their internal ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    /// List all users, oldest account first.
    async fn list(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_user()).collect())
    }

    /// Create a new user in the database.
    async fn create(&self, user: &User) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, first_name, last_name, email, password_hash, avatar_url, chat_ids)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.avatar_url)
        .bind(&user.chat_ids)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("User with this email already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_user())
    }

    /// Update an existing user's profile fields.
    async fn update(&self, user: &User) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET first_name = $2,
                last_name = $3,
                avatar_url = $4,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.avatar_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", user.id)))?;

        Ok(row.into_user())
    }

    /// Delete a user (hard delete).
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }

        Ok(())
    }

    /// Check if an email address is already registered.
    async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Add a chat back-reference. No-op when the reference already exists.
    async fn add_chat_ref(&self, user_id: i64, chat_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE users
            SET chat_ids = array_append(chat_ids, $2)
            WHERE id = $1 AND NOT ($2 = ANY(chat_ids))
            "#,
        )
        .bind(user_id)
        .bind(chat_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Remove a chat back-reference if present.
    async fn remove_chat_ref(&self, user_id: i64, chat_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE users
            SET chat_ids = array_remove(chat_ids, $2)
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .bind(chat_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
