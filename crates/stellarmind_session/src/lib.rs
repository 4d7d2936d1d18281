//! Session layer of the StellarMind assistant core.
//!
//! A [`SessionContext`] ties together one user's identity, quota tracker,
//! document store and retrying client. Every AI feature is a
//! [`MeteredFeature`] executed by [`run_metered`], which enforces the
//! one-request-per-feature rule and the usage quota before anything is sent.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use stellarmind_session::{SessionContext, StellarmindConfig, features};
//! use stellarmind_storage::{AnonymousIdentityProvider, InMemoryDocumentStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StellarmindConfig::load()?;
//! let ctx = SessionContext::connect(
//!     &config,
//!     &AnonymousIdentityProvider::new(),
//!     Arc::new(InMemoryDocumentStore::new()),
//! )
//! .await?;
//!
//! let outcome = features::send_message(&ctx, "Hello!", None).await;
//! match outcome.output() {
//!     Some(reply) => println!("{}", reply),
//!     None => println!("{}", outcome.message().unwrap_or_default()),
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod context;
pub mod features;
mod in_flight;
mod metered;
mod outcome;

pub use config::StellarmindConfig;
pub use context::{
    CREATIVE_CANVAS, DEEP_RESEARCH_QUERIES, IMAGE_GENERATIONS, MESSAGES, SessionContext,
};
pub use in_flight::{InFlight, InFlightGuard};
pub use metered::{MeteredFeature, run_metered};
pub use outcome::ActionOutcome;
