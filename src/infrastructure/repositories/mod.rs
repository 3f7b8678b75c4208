//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.
//!
//! Each repository handles data access for a specific entity type:
//!
//! - **PgUserRepository** - accounts and chat back-references
//! - **PgChatRepository** - one-to-one chats and their message lists
//! - **PgGroupRepository** - groups, membership, and administrator bounds
//! - **PgMessageRepository** - direct and group messages

pub mod chat_repository;
pub mod group_repository;
pub mod message_repository;
pub mod user_repository;

pub use chat_repository::PgChatRepository;
pub use group_repository::PgGroupRepository;
pub use message_repository::PgMessageRepository;
pub use user_repository::PgUserRepository;
