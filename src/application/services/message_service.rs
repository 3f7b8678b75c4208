//! Message Service
//!
//! Handles group message sending and message deletion for both contexts.
//! Deletion is sender-only and runs the detach cascade before the row is
//! removed.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::cascade::CascadeEngine;
use super::chat_service::MessageDraft;
use crate::domain::entities::{
    ChatRepository, GroupRepository, Message, MessageContext, MessageRepository, UserRepository,
};
use crate::domain::services::AccessControl;
use crate::shared::snowflake::SnowflakeGenerator;

/// Message service trait
#[async_trait]
pub trait MessageService: Send + Sync {
    /// Send a message into a group. Members only.
    async fn send_to_group(
        &self,
        group_id: i64,
        sender_id: i64,
        draft: MessageDraft,
    ) -> Result<Message, MessageError>;

    /// Delete a direct message from a chat. Sender only.
    async fn delete_chat_message(
        &self,
        chat_id: i64,
        message_id: i64,
        caller_id: i64,
    ) -> Result<(), MessageError>;

    /// Delete a group message. Members only, and sender only.
    async fn delete_group_message(
        &self,
        group_id: i64,
        message_id: i64,
        caller_id: i64,
    ) -> Result<(), MessageError>;
}

/// Message service errors
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    #[error("Message not found")]
    MessageNotFound,

    #[error("Group not found")]
    GroupNotFound,

    #[error("Not a member of this group")]
    NotMember,

    #[error("Only the sender can delete a message")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// MessageService implementation
pub struct MessageServiceImpl<U, C, G, M>
where
    U: UserRepository,
    C: ChatRepository,
    G: GroupRepository,
    M: MessageRepository,
{
    group_repo: Arc<G>,
    message_repo: Arc<M>,
    cascade: CascadeEngine<U, C, G, M>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<U, C, G, M> MessageServiceImpl<U, C, G, M>
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
        let cascade = CascadeEngine::new(
            user_repo,
            chat_repo,
            group_repo.clone(),
            message_repo.clone(),
        );

        Self {
            group_repo,
            message_repo,
            cascade,
            id_generator,
        }
    }

    /// Load a message, requiring the caller to be its sender. The detach
    /// cascade and the row deletion run only after both checks pass.
    async fn delete_as_sender(
        &self,
        message: Message,
        caller_id: i64,
    ) -> Result<(), MessageError> {
        if !AccessControl::is_sender(&message, caller_id) {
            return Err(MessageError::Forbidden);
        }

        self.cascade
            .message_deleted(&message)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        self.message_repo
            .delete(message.id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))
    }

    async fn find_message(&self, message_id: i64) -> Result<Message, MessageError> {
        self.message_repo
            .find_by_id(message_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?
            .ok_or(MessageError::MessageNotFound)
    }
}

#[async_trait]
impl<U, C, G, M> MessageService for MessageServiceImpl<U, C, G, M>
where
    U: UserRepository + 'static,
    C: ChatRepository + 'static,
    G: GroupRepository + 'static,
    M: MessageRepository + 'static,
{
    async fn send_to_group(
        &self,
        group_id: i64,
        sender_id: i64,
        draft: MessageDraft,
    ) -> Result<Message, MessageError> {
        let group = self
            .group_repo
            .find_by_id(group_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?
            .ok_or(MessageError::GroupNotFound)?;

        if AccessControl::membership(&group, sender_id).is_none() {
            return Err(MessageError::NotMember);
        }

        let message = Message {
            id: self.id_generator.generate(),
            content_type: draft.content_type,
            text: draft.text,
            sender_id,
            context: MessageContext::Group { group_id: group.id },
            is_read: false,
            sent_at: Utc::now(),
        };

        let created = self
            .message_repo
            .create(&message)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        self.group_repo
            .push_message(group.id, created.id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?;

        Ok(created)
    }

    async fn delete_chat_message(
        &self,
        chat_id: i64,
        message_id: i64,
        caller_id: i64,
    ) -> Result<(), MessageError> {
        let message = self.find_message(message_id).await?;

        // The message must actually live in the addressed chat.
        match message.context {
            MessageContext::Direct { chat_id: ctx, .. } if ctx == chat_id => {}
            _ => return Err(MessageError::MessageNotFound),
        }

        self.delete_as_sender(message, caller_id).await
    }

    async fn delete_group_message(
        &self,
        group_id: i64,
        message_id: i64,
        caller_id: i64,
    ) -> Result<(), MessageError> {
        let group = self
            .group_repo
            .find_by_id(group_id)
            .await
            .map_err(|e| MessageError::Internal(e.to_string()))?
            .ok_or(MessageError::GroupNotFound)?;

        if AccessControl::membership(&group, caller_id).is_none() {
            return Err(MessageError::NotMember);
        }

        let message = self.find_message(message_id).await?;

        match message.context {
            MessageContext::Group { group_id: ctx } if ctx == group.id => {}
            _ => return Err(MessageError::MessageNotFound),
        }

        self.delete_as_sender(message, caller_id).await
    }
}
