//! Retrying request client for the generative-AI backend.
//!
//! [`RetryingClient`] performs one logical request with bounded exponential
//! backoff: 2xx responses return immediately, 404 fails immediately, and any
//! other failure is retried after `initial_delay * 2^attempt` until the attempt
//! budget runs out. Single attempts go through the [`HttpTransport`] trait;
//! [`ReqwestTransport`] is the production implementation.
//!
//! The [`gemini`] module holds the request/response envelopes of the text and
//! image endpoints.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
pub mod gemini;
mod request;
mod response;
mod retry;
mod transport;

pub use client::RetryingClient;
pub use config::ClientConfig;
pub use request::{OutboundRequest, OutboundRequestBuilder};
pub use response::TransportResponse;
pub use retry::RetryPolicy;
pub use transport::{HttpTransport, ReqwestTransport};

/// Re-exported so callers can construct cancellation tokens without a direct dependency.
pub use tokio_util::sync::CancellationToken;
