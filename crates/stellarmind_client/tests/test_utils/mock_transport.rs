//! Scripted transport for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stellarmind_client::{HttpTransport, OutboundRequest, TransportResponse};
use stellarmind_error::{RequestError, RequestErrorKind};
use tokio::time::Instant;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// JSON response with the given status
    Json(u16, serde_json::Value),
    /// Response with an explicit content type and raw body
    Raw {
        status: u16,
        content_type: Option<String>,
        body: String,
    },
    /// Failure to obtain any response
    Network(String),
    /// Wait, then answer with the inner reply
    Delayed(Duration, Box<MockReply>),
}

impl MockReply {
    /// 200 response wrapping `text` in a `generateContent` envelope.
    #[allow(dead_code)]
    pub fn text(text: &str) -> Self {
        MockReply::Json(
            200,
            serde_json::json!({
                "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
            }),
        )
    }

    /// Error response with a JSON `error.message`.
    #[allow(dead_code)]
    pub fn error(status: u16, message: &str) -> Self {
        MockReply::Json(
            status,
            serde_json::json!({"error": {"code": status, "message": message}}),
        )
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}

/// Transport replaying a fixed script.
///
/// Once the script runs out, the last reply repeats.
#[derive(Clone)]
pub struct MockTransport {
    script: Arc<Vec<MockReply>>,
    calls: Arc<Mutex<Vec<(Instant, OutboundRequest)>>>,
}

impl MockTransport {
    /// Transport answering every call with `reply`.
    pub fn always(reply: MockReply) -> Self {
        Self::sequence(vec![reply])
    }

    /// Transport answering calls in order from `replies`.
    pub fn sequence(replies: Vec<MockReply>) -> Self {
        assert!(!replies.is_empty(), "script needs at least one reply");
        Self {
            script: Arc::new(replies),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of attempts made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Instants at which each attempt started.
    #[allow(dead_code)]
    pub fn call_instants(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(at, _)| *at).collect()
    }

    /// Requests received so far.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<OutboundRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, request)| request.clone())
            .collect()
    }

    fn next_reply(&self, request: &OutboundRequest) -> MockReply {
        let mut calls = self.calls.lock().unwrap();
        let index = calls.len().min(self.script.len() - 1);
        calls.push((Instant::now(), request.clone()));
        self.script[index].clone()
    }
}

async fn play(reply: MockReply) -> Result<TransportResponse, RequestError> {
    let mut reply = reply;
    loop {
        match reply {
            MockReply::Delayed(wait, inner) => {
                tokio::time::sleep(wait).await;
                reply = *inner;
            }
            MockReply::Json(status, value) => {
                return Ok(TransportResponse::new(
                    status,
                    reason(status),
                    Some("application/json; charset=UTF-8".to_string()),
                    value.to_string(),
                ));
            }
            MockReply::Raw {
                status,
                content_type,
                body,
            } => {
                return Ok(TransportResponse::new(status, reason(status), content_type, body));
            }
            MockReply::Network(message) => {
                return Err(RequestError::new(RequestErrorKind::Network(message)));
            }
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, RequestError> {
        let reply = self.next_reply(request);
        play(reply).await
    }
}
