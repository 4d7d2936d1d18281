//! Core data types for the StellarMind assistant core.
//!
//! This crate provides the foundation data types shared by the quota tracker,
//! the request client and the session layer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod identity;
mod message;
mod sender;
mod telemetry;

pub use identity::SessionIdentity;
pub use message::{AI_USER_ID, ChatMessage, ChatMessageBuilder};
pub use sender::Sender;
pub use telemetry::{init_telemetry, shutdown_telemetry};
