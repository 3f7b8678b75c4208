//! Group Repository Implementation
//!
//! PostgreSQL implementation of the GroupRepository trait. Membership,
//! administrator, and message lists live in BIGINT[] columns; the
//! `groups_admin_bounds` CHECK constraint keeps the administrator set
//! within [1, 3], so bound violations surface here as store errors with
//! the constraint message passed through.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::{Group, GroupRepository};
use crate::shared::error::AppError;

/// Database row representation matching the groups table schema.
#[derive(Debug, sqlx::FromRow)]
struct GroupRow {
    id: i64,
    name: String,
    creator_id: i64,
    admin_ids: Vec<i64>,
    member_ids: Vec<i64>,
    message_ids: Vec<i64>,
    created_at: DateTime<Utc>,
}

impl GroupRow {
    fn into_group(self) -> Group {
        Group {
            id: self.id,
            name: self.name,
            creator_id: self.creator_id,
            admin_ids: self.admin_ids,
            member_ids: self.member_ids,
            message_ids: self.message_ids,
            created_at: self.created_at,
        }
    }
}

const GROUP_COLUMNS: &str =
    "id, name, creator_id, admin_ids, member_ids, message_ids, created_at";

/// Map constraint violations to pass-through store errors.
fn map_group_error(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
            AppError::BadRequest(db_err.message().to_string())
        }
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("A group with this name already exists".to_string())
        }
        _ => AppError::Database(e),
    }
}

/// PostgreSQL group repository implementation.
#[derive(Clone)]
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    /// Create a new PgGroupRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    /// Find a group by its internal ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, AppError> {
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            "SELECT {GROUP_COLUMNS} FROM groups WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_group()))
    }

    /// Create a new group.
    async fn create(&self, group: &Group) -> Result<Group, AppError> {
        let row = sqlx::query_as::<_, GroupRow>(&format!(
            r#"
            INSERT INTO groups (id, name, creator_id, admin_ids, member_ids, message_ids)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {GROUP_COLUMNS}
            "#
        ))
        .bind(group.id)
        .bind(&group.name)
        .bind(group.creator_id)
        .bind(&group.admin_ids)
        .bind(&group.member_ids)
        .bind(&group.message_ids)
        .fetch_one(&self.pool)
        .await
        .map_err(map_group_error)?;

        Ok(row.into_group())
    }

    /// Delete a group row.
    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Group with id {} not found", id)));
        }

        Ok(())
    }

    /// Add users to the member list, skipping those already present.
    async fn add_members(&self, group_id: i64, user_ids: &[i64]) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE groups
            SET member_ids = COALESCE(
                (SELECT array_agg(DISTINCT x) FROM unnest(member_ids || $2::bigint[]) AS x),
                '{}'
            )
            WHERE id = $1
            "#,
        )
        .bind(group_id)
        .bind(user_ids)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Group with id {} not found",
                group_id
            )));
        }

        Ok(())
    }

    /// Remove users from the member list.
    async fn remove_members(&self, group_id: i64, user_ids: &[i64]) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE groups
            SET member_ids = COALESCE(
                (SELECT array_agg(x) FROM unnest(member_ids) AS x
                 WHERE NOT (x = ANY($2::bigint[]))),
                '{}'
            )
            WHERE id = $1
            "#,
        )
        .bind(group_id)
        .bind(user_ids)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Group with id {} not found",
                group_id
            )));
        }

        Ok(())
    }

    /// Promote a user to administrator. The CHECK constraint rejects a
    /// fourth administrator.
    async fn add_administrator(&self, group_id: i64, user_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE groups
            SET admin_ids = array_append(admin_ids, $2)
            WHERE id = $1 AND NOT ($2 = ANY(admin_ids))
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_group_error)?;

        Ok(())
    }

    /// Demote an administrator. The CHECK constraint rejects removing the
    /// last one.
    async fn remove_administrator(&self, group_id: i64, user_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE groups
            SET admin_ids = array_remove(admin_ids, $2)
            WHERE id = $1
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_group_error)?;

        Ok(())
    }

    /// Append a message reference to the owned list.
    async fn push_message(&self, group_id: i64, message_id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE groups SET message_ids = array_append(message_ids, $2) WHERE id = $1",
        )
        .bind(group_id)
        .bind(message_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Group with id {} not found",
                group_id
            )));
        }

        Ok(())
    }

    /// Remove a message reference from the owned list if present.
    async fn remove_message_ref(&self, group_id: i64, message_id: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE groups SET message_ids = array_remove(message_ids, $2) WHERE id = $1")
            .bind(group_id)
            .bind(message_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
