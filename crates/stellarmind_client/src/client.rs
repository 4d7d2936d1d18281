//! Retrying request client.

use crate::{HttpTransport, OutboundRequest, RetryPolicy, TransportResponse};
use std::sync::Arc;
use stellarmind_error::{RequestError, RequestErrorKind, RetryableError};
use tokio_retry2::{Retry, RetryError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// Performs logical requests with bounded exponential-backoff retry.
///
/// Outcomes per attempt:
/// - 2xx: returned immediately
/// - 404: fails immediately with [`RequestErrorKind::NotFound`], never retried
/// - other statuses and network failures: retried while attempts remain, then
///   surfaced as the last observed error
///
/// Backoff waits are asynchronous timers, so other tasks keep running while a
/// request is waiting to be retried.
#[derive(Clone)]
pub struct RetryingClient {
    transport: Arc<dyn HttpTransport>,
    policy: RetryPolicy,
}

impl std::fmt::Debug for RetryingClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryingClient")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RetryingClient {
    /// Client sending through `transport` with `policy`.
    pub fn new(transport: Arc<dyn HttpTransport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Default policy used by [`RetryingClient::fetch_with_retry`].
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Perform `request` with the client's default policy.
    ///
    /// When `cancel` fires, the request stops at once (including during a
    /// backoff wait) and fails with [`RequestErrorKind::Cancelled`].
    pub async fn fetch_with_retry(
        &self,
        request: &OutboundRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<TransportResponse, RequestError> {
        self.fetch_with_policy(request, &self.policy, cancel).await
    }

    /// Perform `request` with an explicit policy.
    #[instrument(
        skip(self, request, policy, cancel),
        fields(url = %request.redacted_url(), max_attempts = policy.max_attempts())
    )]
    pub async fn fetch_with_policy(
        &self,
        request: &OutboundRequest,
        policy: &RetryPolicy,
        cancel: Option<&CancellationToken>,
    ) -> Result<TransportResponse, RequestError> {
        let target = request.redacted_url();
        let target = target.as_str();
        let mut attempt = 0u32;

        let retry = Retry::spawn(policy.backoff_delays(), || {
            attempt += 1;
            let current = attempt;
            async move { self.attempt(request, policy, current, target).await }
        });

        let result = match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    warn!("Request cancelled by caller");
                    Err(RequestError::new(RequestErrorKind::Cancelled))
                }
                result = retry => result,
            },
            None => retry.await,
        };

        result.inspect_err(|e| {
            if e.is_retryable() {
                warn!(error = %e, "Retry budget exhausted");
            }
        })
    }

    async fn attempt(
        &self,
        request: &OutboundRequest,
        policy: &RetryPolicy,
        attempt: u32,
        target: &str,
    ) -> Result<TransportResponse, RetryError<RequestError>> {
        debug!(attempt, "Sending request");

        let sent = match policy.attempt_timeout() {
            Some(limit) => match tokio::time::timeout(*limit, self.transport.send(request)).await {
                Ok(result) => result,
                Err(_) => Err(RequestError::new(RequestErrorKind::Network(format!(
                    "attempt timed out after {} ms",
                    limit.as_millis()
                )))),
            },
            None => self.transport.send(request).await,
        };

        let error = match sent {
            Ok(response) if response.is_success() => {
                debug!(attempt, status = response.status(), "Request succeeded");
                return Ok(response);
            }
            Ok(response) if response.status() == 404 => {
                RequestError::new(RequestErrorKind::NotFound {
                    target: target.to_string(),
                })
            }
            Ok(response) => RequestError::new(RequestErrorKind::Status {
                status: response.status(),
                status_text: response.status_text().to_string(),
                message: response.error_message(),
            }),
            Err(e) => e,
        };

        if error.is_retryable() {
            warn!(attempt, error = %error, "Transient failure, will retry if attempts remain");
            Err(RetryError::Transient {
                err: error,
                retry_after: None,
            })
        } else {
            warn!(attempt, error = %error, "Permanent failure, not retrying");
            Err(RetryError::Permanent(error))
        }
    }
}
