//! Group Service
//!
//! Handles group lifecycle and membership management. Mutations are gated
//! on group membership and, for most operations, on the administrator flag
//! computed by the membership check.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::cascade::CascadeEngine;
use crate::domain::entities::{
    ChatRepository, Group, GroupRepository, MessageRepository, UserRepository,
};
use crate::domain::services::AccessControl;
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// Group service trait
#[async_trait]
pub trait GroupService: Send + Sync {
    /// Create a group; the creator becomes its sole member and sole
    /// administrator.
    async fn create_group(&self, creator_id: i64, name: String) -> Result<Group, GroupError>;

    /// Delete a group with its cascade. Administrators only.
    async fn delete_group(&self, group_id: i64, caller_id: i64) -> Result<(), GroupError>;

    /// Add users to the member list. Administrators only.
    async fn add_members(
        &self,
        group_id: i64,
        caller_id: i64,
        targets: &[i64],
    ) -> Result<Group, GroupError>;

    /// Remove users from the member list. Administrators only.
    async fn remove_members(
        &self,
        group_id: i64,
        caller_id: i64,
        targets: &[i64],
    ) -> Result<Group, GroupError>;

    /// Promote a user to administrator. Administrators only; the store
    /// rejects a fourth administrator.
    async fn add_administrator(
        &self,
        group_id: i64,
        caller_id: i64,
        target_id: i64,
    ) -> Result<(), GroupError>;

    /// Demote an administrator. Administrators only; the store rejects
    /// removing the last one.
    async fn remove_administrator(
        &self,
        group_id: i64,
        caller_id: i64,
        target_id: i64,
    ) -> Result<(), GroupError>;
}

/// Group service errors
#[derive(Debug, thiserror::Error)]
pub enum GroupError {
    #[error("Group not found")]
    NotFound,

    #[error("Not a member of this group")]
    NotMember,

    #[error("Administrator rights required")]
    NotAdministrator,

    /// Store constraint violation, message passed through verbatim.
    #[error("{0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GroupError {
    /// Map a repository error, keeping constraint messages intact.
    fn from_store(e: AppError) -> Self {
        match e {
            AppError::BadRequest(msg) | AppError::Conflict(msg) => GroupError::Store(msg),
            e => GroupError::Internal(e.to_string()),
        }
    }
}

/// GroupService implementation
pub struct GroupServiceImpl<U, C, G, M>
where
    U: UserRepository,
    C: ChatRepository,
    G: GroupRepository,
    M: MessageRepository,
{
    group_repo: Arc<G>,
    cascade: CascadeEngine<U, C, G, M>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<U, C, G, M> GroupServiceImpl<U, C, G, M>
where
    U: UserRepository,
    C: ChatRepository,
    G: GroupRepository,
    M: MessageRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        chat_repo: Arc<C>,
        group_repo: Arc<G>,
        message_repo: Arc<M>,
        id_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        let cascade = CascadeEngine::new(user_repo, chat_repo, group_repo.clone(), message_repo);

        Self {
            group_repo,
            cascade,
            id_generator,
        }
    }

    /// Load a group and require the caller to be one of its administrators.
    async fn load_for_admin(&self, group_id: i64, caller_id: i64) -> Result<Group, GroupError> {
        let group = self
            .group_repo
            .find_by_id(group_id)
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))?
            .ok_or(GroupError::NotFound)?;

        let membership =
            AccessControl::membership(&group, caller_id).ok_or(GroupError::NotMember)?;

        if !membership.require_admin() {
            return Err(GroupError::NotAdministrator);
        }

        Ok(group)
    }
}

#[async_trait]
impl<U, C, G, M> GroupService for GroupServiceImpl<U, C, G, M>
where
    U: UserRepository + 'static,
    C: ChatRepository + 'static,
    G: GroupRepository + 'static,
    M: MessageRepository + 'static,
{
    async fn create_group(&self, creator_id: i64, name: String) -> Result<Group, GroupError> {
        let group = Group {
            id: self.id_generator.generate(),
            name,
            creator_id,
            admin_ids: vec![creator_id],
            member_ids: vec![creator_id],
            message_ids: Vec::new(),
            created_at: Utc::now(),
        };

        self.group_repo
            .create(&group)
            .await
            .map_err(GroupError::from_store)
    }

    async fn delete_group(&self, group_id: i64, caller_id: i64) -> Result<(), GroupError> {
        let group = self.load_for_admin(group_id, caller_id).await?;

        // Cascade first, then drop the group row itself.
        self.cascade
            .group_deleted(&group)
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))?;

        self.group_repo
            .delete(group.id)
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))
    }

    async fn add_members(
        &self,
        group_id: i64,
        caller_id: i64,
        targets: &[i64],
    ) -> Result<Group, GroupError> {
        let group = self.load_for_admin(group_id, caller_id).await?;

        self.group_repo
            .add_members(group.id, targets)
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))?;

        Ok(group)
    }

    async fn remove_members(
        &self,
        group_id: i64,
        caller_id: i64,
        targets: &[i64],
    ) -> Result<Group, GroupError> {
        let group = self.load_for_admin(group_id, caller_id).await?;

        self.group_repo
            .remove_members(group.id, targets)
            .await
            .map_err(|e| GroupError::Internal(e.to_string()))?;

        Ok(group)
    }

    async fn add_administrator(
        &self,
        group_id: i64,
        caller_id: i64,
        target_id: i64,
    ) -> Result<(), GroupError> {
        let group = self.load_for_admin(group_id, caller_id).await?;

        self.group_repo
            .add_administrator(group.id, target_id)
            .await
            .map_err(GroupError::from_store)
    }

    async fn remove_administrator(
        &self,
        group_id: i64,
        caller_id: i64,
        target_id: i64,
    ) -> Result<(), GroupError> {
        let group = self.load_for_admin(group_id, caller_id).await?;

        self.group_repo
            .remove_administrator(group.id, target_id)
            .await
            .map_err(GroupError::from_store)
    }
}
