//! Per-session state shared by all feature handlers.

use crate::{InFlight, StellarmindConfig};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use stellarmind_client::gemini::GeminiEndpoints;
use stellarmind_client::{HttpTransport, ReqwestTransport, RetryingClient};
use stellarmind_core::SessionIdentity;
use stellarmind_error::StellarmindResult;
use stellarmind_interface::{CollectionPath, DocumentPath, DocumentStore, IdentityProvider};
use stellarmind_quota::{FeatureKey, QuotaState, QuotaTracker, Remaining, Tier};
use tracing::{info, instrument};

/// Collection of chat messages.
pub const MESSAGES: &str = "messages";
/// Collection recording generated images.
pub const IMAGE_GENERATIONS: &str = "imageGenerations";
/// Collection recording research queries.
pub const DEEP_RESEARCH_QUERIES: &str = "deepResearchQueries";
/// Collection holding the canvas document.
pub const CREATIVE_CANVAS: &str = "creativeCanvas";

/// Everything a feature handler needs for one signed-in (or guest) user.
///
/// The quota tracker sits behind a synchronous mutex that is only held for
/// the duration of a single read-modify-write, never across an await.
pub struct SessionContext {
    app_id: String,
    identity: SessionIdentity,
    quota: Mutex<QuotaTracker>,
    store: Arc<dyn DocumentStore>,
    client: RetryingClient,
    endpoints: GeminiEndpoints,
    in_flight: InFlight,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("app_id", &self.app_id)
            .field("identity", &self.identity)
            .field("tier", &self.tier())
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl SessionContext {
    /// Session for `identity` sending through `transport`.
    ///
    /// Guests start on the guest tier, everyone else on Basic until a plan is
    /// applied with [`SessionContext::apply_plan`].
    pub fn new(
        config: &StellarmindConfig,
        identity: SessionIdentity,
        store: Arc<dyn DocumentStore>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let endpoints = GeminiEndpoints::from_config(&config.client);
        Self::with_endpoints(config, identity, store, transport, endpoints)
    }

    /// Session with explicit endpoints.
    pub fn with_endpoints(
        config: &StellarmindConfig,
        identity: SessionIdentity,
        store: Arc<dyn DocumentStore>,
        transport: Arc<dyn HttpTransport>,
        endpoints: GeminiEndpoints,
    ) -> Self {
        let tier = Tier::for_session(identity.is_guest(), None);
        info!(user_id = %identity.user_id(), %tier, "Session started");
        Self {
            app_id: config.app_id.clone(),
            quota: Mutex::new(QuotaTracker::new(tier, config.limits.clone())),
            identity,
            store,
            client: RetryingClient::new(transport, config.client.retry_policy()),
            endpoints,
            in_flight: InFlight::default(),
        }
    }

    /// Session for the provider's current identity over HTTPS.
    #[instrument(skip_all)]
    pub async fn connect(
        config: &StellarmindConfig,
        identity: &dyn IdentityProvider,
        store: Arc<dyn DocumentStore>,
    ) -> StellarmindResult<Self> {
        let identity = identity.current_identity().await?;
        Ok(Self::new(
            config,
            identity,
            store,
            Arc::new(ReqwestTransport::new()),
        ))
    }

    fn quota(&self) -> MutexGuard<'_, QuotaTracker> {
        self.quota.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Application namespace for stored documents.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Session owner.
    pub fn identity(&self) -> &SessionIdentity {
        &self.identity
    }

    /// Current tier.
    pub fn tier(&self) -> Tier {
        self.quota().tier()
    }

    /// Switch tiers, discarding consumed quota.
    pub fn change_tier(&self, tier: Tier) -> QuotaState {
        self.quota().on_tier_change(tier).clone()
    }

    /// Switch to the tier named by a stored plan.
    ///
    /// Guests stay on the guest tier; unknown or missing plans mean Basic.
    pub fn apply_plan(&self, plan: Option<&str>) -> QuotaState {
        self.change_tier(Tier::for_session(self.identity.is_guest(), plan))
    }

    /// Consume one use of `key` if any are left.
    pub fn try_consume(&self, key: FeatureKey) -> bool {
        self.quota().try_consume(key)
    }

    /// Uses left for `key`.
    pub fn remaining(&self, key: FeatureKey) -> Remaining {
        self.quota().remaining(key)
    }

    /// Copy of the current quota state.
    pub fn quota_snapshot(&self) -> QuotaState {
        self.quota().snapshot()
    }

    /// Document store.
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Retrying client.
    pub fn client(&self) -> &RetryingClient {
        &self.client
    }

    /// Backend endpoints.
    pub fn endpoints(&self) -> &GeminiEndpoints {
        &self.endpoints
    }

    /// In-flight markers.
    pub fn in_flight(&self) -> &InFlight {
        &self.in_flight
    }

    /// `artifacts/{app_id}/users/{user_id}/{name}`.
    pub fn collection(&self, name: &str) -> StellarmindResult<CollectionPath> {
        CollectionPath::new(format!(
            "artifacts/{}/users/{}/{}",
            self.app_id,
            self.identity.user_id(),
            name
        ))
    }

    /// Document `id` of the user's collection `name`.
    pub fn document(&self, name: &str, id: &str) -> StellarmindResult<DocumentPath> {
        self.collection(name)?.doc(id)
    }
}
