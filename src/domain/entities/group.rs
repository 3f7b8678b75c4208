//! Group entity and repository trait.
//!
//! Maps to the `groups` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Lower bound on the administrator set, enforced by the store.
pub const MIN_ADMINISTRATORS: usize = 1;

/// Upper bound on the administrator set, enforced by the store.
pub const MAX_ADMINISTRATORS: usize = 3;

/// A group conversation with members and a bounded administrator set.
///
/// Maps to the `groups` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - name: VARCHAR(100) NOT NULL
/// - creator_id: BIGINT NOT NULL
/// - admin_ids: BIGINT[] NOT NULL, CHECK cardinality in [1,3]
/// - member_ids: BIGINT[] NOT NULL DEFAULT '{}'
/// - message_ids: BIGINT[] NOT NULL DEFAULT '{}'
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// A unique index on (creator_id, name) prevents a creator from reusing a
/// group name. The group exclusively owns its message-reference list and
/// its membership lists. Administrators are not required to appear in the
/// member list; the store does not enforce that containment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Snowflake ID (primary key)
    pub id: i64,

    /// Group name
    pub name: String,

    /// User who created the group
    pub creator_id: i64,

    /// Administrators (1-3, store-enforced)
    pub admin_ids: Vec<i64>,

    /// Members
    pub member_ids: Vec<i64>,

    /// Messages owned by this group, oldest first
    pub message_ids: Vec<i64>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Check whether a user appears in the member list.
    pub fn is_member(&self, user_id: i64) -> bool {
        self.member_ids.contains(&user_id)
    }

    /// Check whether a user appears in the administrator list.
    pub fn is_administrator(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }

    /// Check whether the group owns the given message.
    pub fn owns_message(&self, message_id: i64) -> bool {
        self.message_ids.contains(&message_id)
    }
}

impl Default for Group {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            creator_id: 0,
            admin_ids: Vec::new(),
            member_ids: Vec::new(),
            message_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Repository trait for Group data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find a group by its Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Group>, AppError>;

    /// Create a new group. The store rejects administrator sets outside
    /// [MIN_ADMINISTRATORS, MAX_ADMINISTRATORS].
    async fn create(&self, group: &Group) -> Result<Group, AppError>;

    /// Delete a group by ID.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Add users to the member list. Users already present are left alone.
    async fn add_members(&self, group_id: i64, user_ids: &[i64]) -> Result<(), AppError>;

    /// Remove users from the member list.
    async fn remove_members(&self, group_id: i64, user_ids: &[i64]) -> Result<(), AppError>;

    /// Add a user to the administrator list. The store rejects the update
    /// when it would exceed the administrator bound.
    async fn add_administrator(&self, group_id: i64, user_id: i64) -> Result<(), AppError>;

    /// Remove a user from the administrator list. The store rejects the
    /// update when it would leave the group without administrators.
    async fn remove_administrator(&self, group_id: i64, user_id: i64) -> Result<(), AppError>;

    /// Append a message reference to the group's owned list.
    async fn push_message(&self, group_id: i64, message_id: i64) -> Result<(), AppError>;

    /// Remove a message reference from the group's owned list if present.
    async fn remove_message_ref(&self, group_id: i64, message_id: i64) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_group() -> Group {
        Group {
            id: 500,
            name: "book club".to_string(),
            creator_id: 1,
            admin_ids: vec![1],
            member_ids: vec![1, 2, 3],
            message_ids: vec![90],
            ..Default::default()
        }
    }

    #[test]
    fn test_is_member() {
        let group = create_test_group();
        assert!(group.is_member(1));
        assert!(group.is_member(3));
        assert!(!group.is_member(4));
    }

    #[test]
    fn test_is_administrator() {
        let group = create_test_group();
        assert!(group.is_administrator(1));
        assert!(!group.is_administrator(2));
    }

    #[test]
    fn test_owns_message() {
        let group = create_test_group();
        assert!(group.owns_message(90));
        assert!(!group.owns_message(91));
    }

    #[test]
    fn test_administrator_bounds() {
        assert_eq!(MIN_ADMINISTRATORS, 1);
        assert_eq!(MAX_ADMINISTRATORS, 3);
    }
}
