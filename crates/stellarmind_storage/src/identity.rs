//! Identity providers.

use async_trait::async_trait;
use stellarmind_core::SessionIdentity;
use stellarmind_error::StellarmindResult;
use stellarmind_interface::IdentityProvider;
use tracing::info;

/// Signs every session in as a guest with a random id.
///
/// The id is chosen once, so repeated calls return the same identity.
#[derive(Debug, Clone)]
pub struct AnonymousIdentityProvider {
    identity: SessionIdentity,
}

impl Default for AnonymousIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AnonymousIdentityProvider {
    /// Provider with a fresh random guest id.
    pub fn new() -> Self {
        let user_id = uuid::Uuid::new_v4().to_string();
        info!(user_id = %user_id, "Signed in anonymously");
        Self {
            identity: SessionIdentity::anonymous(user_id),
        }
    }
}

#[async_trait]
impl IdentityProvider for AnonymousIdentityProvider {
    async fn current_identity(&self) -> StellarmindResult<SessionIdentity> {
        Ok(self.identity.clone())
    }
}

/// Always returns the identity it was built with.
#[derive(Debug, Clone)]
pub struct StaticIdentityProvider {
    identity: SessionIdentity,
}

impl StaticIdentityProvider {
    /// Provider for `identity`.
    pub fn new(identity: SessionIdentity) -> Self {
        Self { identity }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn current_identity(&self) -> StellarmindResult<SessionIdentity> {
        Ok(self.identity.clone())
    }
}
