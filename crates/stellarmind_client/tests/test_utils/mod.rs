//! Test utilities for the request client.
//!
//! This module provides a scripted transport and request helpers.

pub mod mock_transport;

#[allow(unused_imports)]
pub use mock_transport::{MockReply, MockTransport};

use stellarmind_client::OutboundRequest;

/// JSON POST against a fake endpoint carrying an API key.
#[allow(dead_code)]
pub fn test_request() -> OutboundRequest {
    OutboundRequest::post_json(
        "https://ai.example.test/v1beta/models/test-model:generateContent?key=sk-test",
        serde_json::json!({"contents": []}),
    )
}
