//! Authorization predicates.
//!
//! Pure checks over already-loaded entities plus the caller's resolved
//! identity. None of these authenticate: identity is established upstream
//! by the auth middleware and passed in as a parameter.

use crate::domain::entities::{Chat, Group, Message};

/// Result of a successful group membership check.
///
/// Carries the administrator flag computed in the same pass, so
/// administrator-gated operations need no second lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub is_admin: bool,
}

impl Membership {
    /// Gate for administrator-only operations.
    pub fn require_admin(&self) -> bool {
        self.is_admin
    }
}

/// Domain service for authorization decisions.
pub struct AccessControl;

impl AccessControl {
    /// Profile mutations are allowed only on the caller's own account.
    pub fn is_self(caller_id: i64, target_user_id: i64) -> bool {
        caller_id == target_user_id
    }

    /// Chat operations are restricted to the two participants.
    pub fn chat_participant(chat: &Chat, caller_id: i64) -> bool {
        chat.has_participant(caller_id)
    }

    /// Group membership gate. `None` means the caller is not a member.
    pub fn membership(group: &Group, caller_id: i64) -> Option<Membership> {
        if !group.is_member(caller_id) {
            return None;
        }

        Some(Membership {
            is_admin: group.is_administrator(caller_id),
        })
    }

    /// Only the original sender may delete a message.
    pub fn is_sender(message: &Message, caller_id: i64) -> bool {
        message.is_from(caller_id)
    }
}
