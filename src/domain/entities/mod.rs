//! # Domain Entities
//!
//! Core domain entities representing the main business objects of the
//! messaging backend. All entities map directly to their corresponding
//! database tables.
//!
//! - **User**: account with credentials, profile fields, and chat
//!   back-references
//! - **Chat**: a one-to-one conversation owning its message list
//! - **Group**: a group conversation owning membership lists and messages
//! - **Message**: a direct or group message, tagged by its owning context
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access
//! operations. These traits are implemented in the infrastructure layer,
//! following the dependency inversion principle.

mod chat;
mod group;
mod message;
mod user;

pub use chat::{Chat, ChatRepository};
pub use group::{Group, GroupRepository, MAX_ADMINISTRATORS, MIN_ADMINISTRATORS};
pub use message::{ContentType, Message, MessageContext, MessageRepository};
pub use user::{User, UserRepository};

#[cfg(test)]
pub use chat::MockChatRepository;
#[cfg(test)]
pub use group::MockGroupRepository;
#[cfg(test)]
pub use message::MockMessageRepository;
#[cfg(test)]
pub use user::MockUserRepository;
