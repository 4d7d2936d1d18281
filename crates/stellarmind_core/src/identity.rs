//! Session identity.

use serde::{Deserialize, Serialize};

/// Identity of the user owning a session.
///
/// Anonymous identities belong to guests; their quota is always the guest table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct SessionIdentity {
    /// Stable user identifier used to scope stored documents
    user_id: String,
    /// True for guest sessions
    guest: bool,
}

impl SessionIdentity {
    /// Identity for a guest.
    pub fn anonymous(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            guest: true,
        }
    }

    /// Identity for a signed-in user.
    pub fn registered(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            guest: false,
        }
    }

    /// Whether this session is a guest session.
    pub fn is_guest(&self) -> bool {
        self.guest
    }
}
