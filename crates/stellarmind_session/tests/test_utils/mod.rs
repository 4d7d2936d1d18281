//! Test utilities for the session layer.
//!
//! This module provides a session harness backed by the in-memory document
//! store. The scripted transport is shared with the client crate's tests.

#[path = "../../../stellarmind_client/tests/test_utils/mock_transport.rs"]
pub mod mock_transport;

#[allow(unused_imports)]
pub use mock_transport::{MockReply, MockTransport};

use std::sync::Arc;
use stellarmind_client::gemini::GeminiEndpoints;
use stellarmind_core::SessionIdentity;
use stellarmind_session::{SessionContext, StellarmindConfig};
use stellarmind_storage::InMemoryDocumentStore;

/// A session wired to a mock transport and an in-memory store.
#[allow(dead_code)]
pub struct Harness {
    pub ctx: SessionContext,
    pub store: InMemoryDocumentStore,
    pub transport: MockTransport,
}

/// Endpoints pointing at a fake host.
pub fn test_endpoints() -> GeminiEndpoints {
    GeminiEndpoints::new(
        "https://ai.example.test/v1beta",
        "text-model",
        "image-model",
        "sk-test",
    )
}

/// Session for `identity` using `config`.
pub fn harness_with(
    config: &StellarmindConfig,
    identity: SessionIdentity,
    transport: MockTransport,
) -> Harness {
    let store = InMemoryDocumentStore::new();
    let ctx = SessionContext::with_endpoints(
        config,
        identity,
        Arc::new(store.clone()),
        Arc::new(transport.clone()),
        test_endpoints(),
    );
    Harness {
        ctx,
        store,
        transport,
    }
}

/// Guest session with the default configuration.
#[allow(dead_code)]
pub fn guest(transport: MockTransport) -> Harness {
    harness_with(
        &StellarmindConfig::default(),
        SessionIdentity::anonymous("guest-1"),
        transport,
    )
}

/// Signed-in session with the default configuration.
#[allow(dead_code)]
pub fn registered(transport: MockTransport) -> Harness {
    harness_with(
        &StellarmindConfig::default(),
        SessionIdentity::registered("user-1"),
        transport,
    )
}

/// Request body text sent in the `n`th call.
#[allow(dead_code)]
pub fn sent_prompt(transport: &MockTransport, n: usize) -> String {
    transport.requests()[n]
        .body()
        .as_ref()
        .and_then(|body| body.pointer("/contents/0/parts/0/text"))
        .and_then(|text| text.as_str())
        .unwrap_or_default()
        .to_string()
}
