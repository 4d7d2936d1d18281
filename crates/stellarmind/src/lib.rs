//! StellarMind - quota-metered AI assistant core
//!
//! StellarMind gates generative-AI features behind per-tier usage quotas and
//! talks to the backend through a client with bounded exponential-backoff
//! retry.
//!
//! # Features
//!
//! - **Usage quotas**: Guest, Basic, Pro and Ultimate tiers with per-feature limits
//! - **Retrying client**: 404 fails fast, other failures back off `1s, 2s, ...`
//! - **Metered actions**: one outstanding request per feature, quota checked before sending
//! - **Handlers**: chat, image generation, code generation, creative canvas, deep research
//! - **Pluggable persistence**: `DocumentStore` and `IdentityProvider` traits
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stellarmind::{
//!     AnonymousIdentityProvider, InMemoryDocumentStore, SessionContext, StellarmindConfig,
//!     features,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     stellarmind::init_telemetry()?;
//!     let config = StellarmindConfig::load()?;
//!     let ctx = SessionContext::connect(
//!         &config,
//!         &AnonymousIdentityProvider::new(),
//!         Arc::new(InMemoryDocumentStore::new()),
//!     )
//!     .await?;
//!
//!     let outcome = features::generate_code(&ctx, "debounce a function", None).await;
//!     println!("{:?}", outcome);
//!     stellarmind::shutdown_telemetry();
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `stellarmind_error` - Error types
//! - `stellarmind_core` - Chat messages, session identity, telemetry
//! - `stellarmind_quota` - Tiers, limit tables and the quota tracker
//! - `stellarmind_client` - Retrying request client and backend envelopes
//! - `stellarmind_interface` - Document store and identity traits
//! - `stellarmind_storage` - In-memory store and identity providers
//! - `stellarmind_session` - Session context, metered actions, feature handlers
//!
//! This crate (`stellarmind`) re-exports everything for convenience.

pub use stellarmind_client::*;
pub use stellarmind_core::*;
pub use stellarmind_error::*;
pub use stellarmind_interface::*;
pub use stellarmind_quota::*;
pub use stellarmind_session::*;
pub use stellarmind_storage::*;
