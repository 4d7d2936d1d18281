//! Single-attempt HTTP transport.

use crate::{OutboundRequest, TransportResponse};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use stellarmind_error::{RequestError, RequestErrorKind};
use tracing::{debug, instrument};

/// Performs exactly one HTTP exchange.
///
/// Any HTTP status is a successful exchange at this level; only failures to
/// obtain a response (connection refused, reset, body read errors) are errors,
/// and they should use [`RequestErrorKind::Network`] so the client retries them.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` once.
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, RequestError>;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Transport with a default client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport reusing an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn network_error(err: reqwest::Error) -> RequestError {
    let kind = if err.is_builder() {
        RequestErrorKind::InvalidRequest(err.without_url().to_string())
    } else {
        RequestErrorKind::Network(err.without_url().to_string())
    };
    RequestError::new(kind)
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method(), url = %request.redacted_url()))]
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, RequestError> {
        let mut builder = self
            .client
            .request(request.method().clone(), request.url().as_str());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(network_error)?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(network_error)?;

        debug!(status = status.as_u16(), bytes = body.len(), "Received response");

        Ok(TransportResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            content_type,
            body.to_vec(),
        ))
    }
}
