//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **AuthService**: Credential verification and token issuance
//! - **UserService**: Signup and profile management
//! - **ChatService**: One-to-one conversations with lazy chat creation
//! - **GroupService**: Group lifecycle and membership management
//! - **MessageService**: Group sends and sender-only message deletion
//! - **CascadeEngine**: Referential-integrity cleanup on deletions

pub mod auth_service;
pub mod cascade;
pub mod chat_service;
pub mod group_service;
pub mod message_service;
pub mod user_service;

// Re-export auth service types
pub use auth_service::{AuthError, AuthService, AuthServiceImpl, Claims};

// Re-export user service types
pub use user_service::{SignUpDto, UpdateProfileDto, UserError, UserService, UserServiceImpl};

// Re-export chat service types
pub use chat_service::{ChatError, ChatService, ChatServiceImpl, MessageDraft};

// Re-export group service types
pub use group_service::{GroupError, GroupService, GroupServiceImpl};

// Re-export message service types
pub use message_service::{MessageError, MessageService, MessageServiceImpl};

// Re-export the cascade engine
pub use cascade::CascadeEngine;
