//! Chat Service
//!
//! Handles one-to-one conversations: lazy chat creation on first message,
//! sending into an existing chat, and chat deletion with cascade.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::cascade::CascadeEngine;
use crate::domain::entities::{
    Chat, ChatRepository, ContentType, GroupRepository, Message, MessageContext,
    MessageRepository, UserRepository,
};
use crate::domain::services::AccessControl;
use crate::shared::snowflake::SnowflakeGenerator;

/// Chat service trait
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Send a direct message to another user, creating the chat for the
    /// pair if it does not exist yet.
    async fn send_to_user(
        &self,
        sender_id: i64,
        receiver_id: i64,
        draft: MessageDraft,
    ) -> Result<Message, ChatError>;

    /// Append a message to an existing chat.
    async fn send_to_chat(
        &self,
        chat_id: i64,
        sender_id: i64,
        draft: MessageDraft,
    ) -> Result<Message, ChatError>;

    /// Delete a chat with its full cascade. Participants only.
    async fn delete_chat(&self, chat_id: i64, caller_id: i64) -> Result<(), ChatError>;
}

/// An unsent message payload
#[derive(Debug, Clone)]
pub struct MessageDraft {
    pub content_type: ContentType,
    pub text: String,
}

/// Chat service errors
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Chat not found")]
    ChatNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Permission denied")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// ChatService implementation
pub struct ChatServiceImpl<U, C, G, M>
where
    U: UserRepository,
    C: ChatRepository,
    G: GroupRepository,
    M: MessageRepository,
{
    user_repo: Arc<U>,
    chat_repo: Arc<C>,
    message_repo: Arc<M>,
    cascade: CascadeEngine<U, C, G, M>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<U, C, G, M> ChatServiceImpl<U, C, G, M>
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
            user_repo.clone(),
            chat_repo.clone(),
            group_repo,
            message_repo.clone(),
        );

        Self {
            user_repo,
            chat_repo,
            message_repo,
            cascade,
            id_generator,
        }
    }

    /// Find the chat for a participant pair, creating it (and both users'
    /// back-references) when absent.
    async fn find_or_create_chat(
        &self,
        sender_id: i64,
        receiver_id: i64,
    ) -> Result<Chat, ChatError> {
        if let Some(chat) = self
            .chat_repo
            .find_by_pair(sender_id, receiver_id)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))?
        {
            return Ok(chat);
        }

        let chat = Chat {
            id: self.id_generator.generate(),
            user1_id: sender_id,
            user2_id: receiver_id,
            message_ids: Vec::new(),
        };

        let created = self
            .chat_repo
            .create(&chat)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))?;

        self.user_repo
            .add_chat_ref(sender_id, created.id)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))?;
        self.user_repo
            .add_chat_ref(receiver_id, created.id)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))?;

        Ok(created)
    }

    /// Persist a message into a chat and append it to the owned list.
    async fn append_message(
        &self,
        chat: &Chat,
        sender_id: i64,
        receiver_id: i64,
        draft: MessageDraft,
    ) -> Result<Message, ChatError> {
        let message = Message {
            id: self.id_generator.generate(),
            content_type: draft.content_type,
            text: draft.text,
            sender_id,
            context: MessageContext::Direct {
                chat_id: chat.id,
                receiver_id,
            },
            is_read: false,
            sent_at: Utc::now(),
        };

        let created = self
            .message_repo
            .create(&message)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))?;

        self.chat_repo
            .push_message(chat.id, created.id)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))?;

        Ok(created)
    }
}

#[async_trait]
impl<U, C, G, M> ChatService for ChatServiceImpl<U, C, G, M>
where
    U: UserRepository + 'static,
    C: ChatRepository + 'static,
    G: GroupRepository + 'static,
    M: MessageRepository + 'static,
{
    async fn send_to_user(
        &self,
        sender_id: i64,
        receiver_id: i64,
        draft: MessageDraft,
    ) -> Result<Message, ChatError> {
        // Both endpoints of the conversation must exist.
        let sender = self
            .user_repo
            .find_by_id(sender_id)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))?;
        let receiver = self
            .user_repo
            .find_by_id(receiver_id)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))?;

        if sender.is_none() || receiver.is_none() {
            return Err(ChatError::UserNotFound);
        }

        let chat = self.find_or_create_chat(sender_id, receiver_id).await?;

        self.append_message(&chat, sender_id, receiver_id, draft).await
    }

    async fn send_to_chat(
        &self,
        chat_id: i64,
        sender_id: i64,
        draft: MessageDraft,
    ) -> Result<Message, ChatError> {
        let chat = self
            .chat_repo
            .find_by_id(chat_id)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))?
            .ok_or(ChatError::ChatNotFound)?;

        if !AccessControl::chat_participant(&chat, sender_id) {
            return Err(ChatError::Forbidden);
        }

        let receiver_id = chat.other_participant(sender_id);

        self.append_message(&chat, sender_id, receiver_id, draft).await
    }

    async fn delete_chat(&self, chat_id: i64, caller_id: i64) -> Result<(), ChatError> {
        let chat = self
            .chat_repo
            .find_by_id(chat_id)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))?
            .ok_or(ChatError::ChatNotFound)?;

        if !AccessControl::chat_participant(&chat, caller_id) {
            return Err(ChatError::Forbidden);
        }

        // Cascade first, then drop the chat row itself.
        self.cascade
            .chat_deleted(&chat)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))?;

        self.chat_repo
            .delete(chat.id)
            .await
            .map_err(|e| ChatError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        MockChatRepository, MockGroupRepository, MockMessageRepository, MockUserRepository, User,
    };
    use mockall::predicate::eq;

    type TestService = ChatServiceImpl<
        MockUserRepository,
        MockChatRepository,
        MockGroupRepository,
        MockMessageRepository,
    >;

    fn service(
        user_repo: MockUserRepository,
        chat_repo: MockChatRepository,
        message_repo: MockMessageRepository,
    ) -> TestService {
        ChatServiceImpl::new(
            Arc::new(user_repo),
            Arc::new(chat_repo),
            Arc::new(MockGroupRepository::new()),
            Arc::new(message_repo),
            Arc::new(SnowflakeGenerator::new(1, 0)),
        )
    }

    fn draft() -> MessageDraft {
        MessageDraft {
            content_type: ContentType::Text,
            text: "hello".into(),
        }
    }

    fn existing_user(id: i64) -> Option<User> {
        Some(User {
            id,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_first_message_creates_chat_and_back_references() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(|id| Ok(existing_user(id)));
        user_repo
            .expect_add_chat_ref()
            .with(eq(1), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));
        user_repo
            .expect_add_chat_ref()
            .with(eq(2), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));

        let mut chat_repo = MockChatRepository::new();
        chat_repo
            .expect_find_by_pair()
            .with(eq(1), eq(2))
            .returning(|_, _| Ok(None));
        chat_repo
            .expect_create()
            .withf(|chat: &Chat| chat.user1_id == 1 && chat.user2_id == 2)
            .times(1)
            .returning(|chat| Ok(chat.clone()));
        chat_repo
            .expect_push_message()
            .times(1)
            .returning(|_, _| Ok(()));

        let mut message_repo = MockMessageRepository::new();
        message_repo
            .expect_create()
            .withf(|message: &Message| {
                message.sender_id == 1 && !message.is_read && message.context.is_direct()
            })
            .times(1)
            .returning(|message| Ok(message.clone()));

        let service = service(user_repo, chat_repo, message_repo);

        let message = service.send_to_user(1, 2, draft()).await.unwrap();
        assert!(matches!(
            message.context,
            MessageContext::Direct { receiver_id: 2, .. }
        ));
    }

    #[tokio::test]
    async fn test_second_message_reuses_existing_chat() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(|id| Ok(existing_user(id)));
        // No new back-references when the chat already exists.
        user_repo.expect_add_chat_ref().times(0);

        let mut chat_repo = MockChatRepository::new();
        chat_repo.expect_find_by_pair().returning(|_, _| {
            Ok(Some(Chat {
                id: 100,
                user1_id: 1,
                user2_id: 2,
                message_ids: vec![10],
            }))
        });
        chat_repo.expect_create().times(0);
        chat_repo
            .expect_push_message()
            .with(eq(100), mockall::predicate::always())
            .times(1)
            .returning(|_, _| Ok(()));

        let mut message_repo = MockMessageRepository::new();
        message_repo
            .expect_create()
            .returning(|message| Ok(message.clone()));

        let service = service(user_repo, chat_repo, message_repo);

        service.send_to_user(1, 2, draft()).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_to_missing_user_fails() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(|id| Ok(if id == 1 { existing_user(1) } else { None }));

        let service = service(user_repo, MockChatRepository::new(), MockMessageRepository::new());

        let result = service.send_to_user(1, 9, draft()).await;
        assert!(matches!(result, Err(ChatError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_send_to_chat_addresses_other_participant() {
        let mut chat_repo = MockChatRepository::new();
        chat_repo.expect_find_by_id().with(eq(100)).returning(|_| {
            Ok(Some(Chat {
                id: 100,
                user1_id: 1,
                user2_id: 2,
                message_ids: vec![],
            }))
        });
        chat_repo
            .expect_push_message()
            .times(1)
            .returning(|_, _| Ok(()));

        let mut message_repo = MockMessageRepository::new();
        message_repo
            .expect_create()
            .withf(|message: &Message| {
                matches!(
                    message.context,
                    MessageContext::Direct {
                        chat_id: 100,
                        receiver_id: 1,
                    }
                )
            })
            .returning(|message| Ok(message.clone()));

        let service = service(MockUserRepository::new(), chat_repo, message_repo);

        service.send_to_chat(100, 2, draft()).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_to_chat_rejects_outsider() {
        let mut chat_repo = MockChatRepository::new();
        chat_repo.expect_find_by_id().returning(|_| {
            Ok(Some(Chat {
                id: 100,
                user1_id: 1,
                user2_id: 2,
                message_ids: vec![],
            }))
        });

        let service = service(
            MockUserRepository::new(),
            chat_repo,
            MockMessageRepository::new(),
        );

        let result = service.send_to_chat(100, 3, draft()).await;
        assert!(matches!(result, Err(ChatError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete_chat_cascades_then_deletes() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_remove_chat_ref()
            .times(2)
            .returning(|_, _| Ok(()));

        let mut chat_repo = MockChatRepository::new();
        chat_repo.expect_find_by_id().with(eq(100)).returning(|_| {
            Ok(Some(Chat {
                id: 100,
                user1_id: 1,
                user2_id: 2,
                message_ids: vec![10, 11],
            }))
        });
        chat_repo
            .expect_delete()
            .with(eq(100))
            .times(1)
            .returning(|_| Ok(()));

        let mut message_repo = MockMessageRepository::new();
        message_repo
            .expect_delete_many()
            .withf(|ids| ids.to_vec() == vec![10, 11])
            .times(1)
            .returning(|_| Ok(2));

        let service = service(user_repo, chat_repo, message_repo);

        service.delete_chat(100, 1).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_chat_rejects_outsider() {
        let mut chat_repo = MockChatRepository::new();
        chat_repo.expect_find_by_id().returning(|_| {
            Ok(Some(Chat {
                id: 100,
                user1_id: 1,
                user2_id: 2,
                message_ids: vec![],
            }))
        });
        chat_repo.expect_delete().times(0);

        let service = service(
            MockUserRepository::new(),
            chat_repo,
            MockMessageRepository::new(),
        );

        let result = service.delete_chat(100, 3).await;
        assert!(matches!(result, Err(ChatError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete_missing_chat_fails() {
        let mut chat_repo = MockChatRepository::new();
        chat_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = service(
            MockUserRepository::new(),
            chat_repo,
            MockMessageRepository::new(),
        );

        let result = service.delete_chat(100, 1).await;
        assert!(matches!(result, Err(ChatError::ChatNotFound)));
    }
}
