//! Referential-Integrity Cascade Engine
//!
//! Explicit, ordered cleanup invoked by the services before a deletion is
//! acknowledged. Each rule removes dangling references exactly one hop out;
//! rules never re-trigger each other (deleting a chat bulk-deletes its
//! messages directly instead of running the per-message rule N times).
//!
//! The steps of a cascade are NOT wrapped in a cross-document transaction:
//! each store operation is individually atomic, and a failure part-way
//! leaves later steps unexecuted. The error surfaces to the caller and the
//! deletion is not acknowledged.

use std::sync::Arc;

use crate::domain::entities::{
    Chat, ChatRepository, Group, GroupRepository, Message, MessageContext, MessageRepository,
    UserRepository,
};
use crate::shared::error::AppError;

/// Enacts cascade rules when an entity is deleted.
pub struct CascadeEngine<U, C, G, M>
where
    U: UserRepository,
    C: ChatRepository,
    G: GroupRepository,
    M: MessageRepository,
{
    user_repo: Arc<U>,
    chat_repo: Arc<C>,
    group_repo: Arc<G>,
    message_repo: Arc<M>,
}

impl<U, C, G, M> CascadeEngine<U, C, G, M>
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
    ) -> Self {
        Self {
            user_repo,
            chat_repo,
            group_repo,
            message_repo,
        }
    }

    /// Chat deletion: detach the chat from both participants' reference
    /// sets, then bulk-delete every owned message. Runs before the chat
    /// row itself is removed.
    pub async fn chat_deleted(&self, chat: &Chat) -> Result<(), AppError> {
        self.user_repo.remove_chat_ref(chat.user1_id, chat.id).await?;
        self.user_repo.remove_chat_ref(chat.user2_id, chat.id).await?;

        let removed = self.message_repo.delete_many(&chat.message_ids).await?;
        tracing::debug!(chat_id = chat.id, removed, "chat cascade complete");

        Ok(())
    }

    /// Group deletion: bulk-delete every message owned by the group.
    /// Member and administrator lists go down with the group row itself.
    pub async fn group_deleted(&self, group: &Group) -> Result<(), AppError> {
        let removed = self.message_repo.delete_by_group(group.id).await?;
        tracing::debug!(group_id = group.id, removed, "group cascade complete");

        Ok(())
    }

    /// Message deletion: detach the message from its owning chat or group.
    /// Runs before the message row itself is removed.
    pub async fn message_deleted(&self, message: &Message) -> Result<(), AppError> {
        match message.context {
            MessageContext::Direct { chat_id, .. } => {
                self.chat_repo.remove_message_ref(chat_id, message.id).await
            }
            MessageContext::Group { group_id } => {
                self.group_repo.remove_message_ref(group_id, message.id).await
            }
        }
    }
}
