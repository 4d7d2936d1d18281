//! Tests for bounded exponential-backoff retry.
//!
//! All tests run on a paused clock, so backoff waits complete instantly while
//! the recorded instants still reflect the virtual time that passed.

mod test_utils;

use std::sync::Arc;
use std::time::Duration;
use stellarmind_client::{CancellationToken, RetryPolicy, RetryingClient};
use stellarmind_error::{RequestErrorKind, RetryableError};
use test_utils::{MockReply, MockTransport, test_request};
use tokio::time::Instant;

fn client(transport: &MockTransport, policy: RetryPolicy) -> RetryingClient {
    RetryingClient::new(Arc::new(transport.clone()), policy)
}

fn gaps(instants: &[Instant]) -> Vec<Duration> {
    instants.windows(2).map(|w| w[1] - w[0]).collect()
}

fn assert_close(actual: Duration, expected: Duration) {
    assert!(
        actual >= expected && actual < expected + Duration::from_millis(10),
        "expected ~{:?}, waited {:?}",
        expected,
        actual
    );
}

#[tokio::test(start_paused = true)]
async fn test_success_on_first_attempt() -> anyhow::Result<()> {
    let transport = MockTransport::always(MockReply::text("hello"));
    let client = client(&transport, RetryPolicy::default());

    let response = client.fetch_with_retry(&test_request(), None).await?;

    assert_eq!(response.status(), 200);
    assert_eq!(transport.call_count(), 1);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_fails_twice_then_succeeds_with_doubling_waits() -> anyhow::Result<()> {
    let transport = MockTransport::sequence(vec![
        MockReply::error(503, "Model is overloaded"),
        MockReply::error(503, "Model is overloaded"),
        MockReply::text("finally"),
    ]);
    let client = client(&transport, RetryPolicy::default());

    let response = client.fetch_with_retry(&test_request(), None).await?;

    assert_eq!(response.status(), 200);
    assert_eq!(transport.call_count(), 3);
    let waits = gaps(&transport.call_instants());
    assert_eq!(waits.len(), 2);
    assert_close(waits[0], Duration::from_millis(1000));
    assert_close(waits[1], Duration::from_millis(2000));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_not_found_is_never_retried() {
    let transport = MockTransport::always(MockReply::error(404, "no such model"));
    let client = client(&transport, RetryPolicy::default());
    let started = Instant::now();

    let err = client
        .fetch_with_retry(&test_request(), None)
        .await
        .expect_err("404 should fail");

    assert_eq!(transport.call_count(), 1);
    assert!(started.elapsed() < Duration::from_millis(10));
    assert!(!err.is_retryable());
    match err.kind() {
        RequestErrorKind::NotFound { target } => {
            assert!(target.contains("generateContent"));
            assert!(!target.contains("sk-test"), "key leaked: {}", target);
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
    assert!(err.kind().to_string().starts_with("Resource not found at"));
}

#[tokio::test(start_paused = true)]
async fn test_persistent_server_error_exhausts_attempts() {
    let transport = MockTransport::always(MockReply::error(500, "backend exploded"));
    let client = client(&transport, RetryPolicy::default());

    let err = client
        .fetch_with_retry(&test_request(), None)
        .await
        .expect_err("500 should fail after retries");

    assert_eq!(transport.call_count(), 3);
    assert_eq!(err.kind().status(), Some(500));
    let message = err.kind().to_string();
    assert_eq!(message, "API error: 500 Internal Server Error - backend exploded");
}

#[tokio::test(start_paused = true)]
async fn test_error_without_message_reports_unknown_error() {
    let transport = MockTransport::always(MockReply::Raw {
        status: 502,
        content_type: Some("text/html".to_string()),
        body: "<html>Bad gateway</html>".to_string(),
    });
    let client = client(&transport, RetryPolicy::new(2, Duration::from_millis(10)));

    let err = client
        .fetch_with_retry(&test_request(), None)
        .await
        .expect_err("502 should fail");

    assert_eq!(transport.call_count(), 2);
    assert_eq!(err.kind().to_string(), "API error: 502 Bad Gateway - Unknown error");
}

#[tokio::test(start_paused = true)]
async fn test_network_failure_is_retried() -> anyhow::Result<()> {
    let transport = MockTransport::sequence(vec![
        MockReply::Network("connection reset".to_string()),
        MockReply::text("recovered"),
    ]);
    let client = client(&transport, RetryPolicy::default());

    let response = client.fetch_with_retry(&test_request(), None).await?;

    assert_eq!(response.status(), 200);
    assert_eq!(transport.call_count(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_last_error_is_reported() {
    let transport = MockTransport::sequence(vec![
        MockReply::error(503, "overloaded"),
        MockReply::error(429, "slow down"),
        MockReply::Network("connection refused".to_string()),
    ]);
    let client = client(&transport, RetryPolicy::default());

    let err = client
        .fetch_with_retry(&test_request(), None)
        .await
        .expect_err("all attempts fail");

    assert_eq!(transport.call_count(), 3);
    assert!(matches!(err.kind(), RequestErrorKind::Network(m) if m == "connection refused"));
}

#[tokio::test(start_paused = true)]
async fn test_not_found_after_transient_failure_stops_retrying() {
    let transport = MockTransport::sequence(vec![
        MockReply::error(500, "flaky"),
        MockReply::error(404, "gone"),
        MockReply::text("never reached"),
    ]);
    let client = client(&transport, RetryPolicy::default());

    let err = client
        .fetch_with_retry(&test_request(), None)
        .await
        .expect_err("404 is terminal");

    assert_eq!(transport.call_count(), 2);
    assert!(matches!(err.kind(), RequestErrorKind::NotFound { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_zero_attempts_behaves_as_one() {
    let policy = RetryPolicy::new(0, Duration::from_millis(1000));
    assert_eq!(*policy.max_attempts(), 1);
    assert_eq!(policy.backoff_delays().count(), 0);

    let transport = MockTransport::always(MockReply::error(500, "down"));
    let client = client(&transport, policy);

    let result = client.fetch_with_retry(&test_request(), None).await;

    assert!(result.is_err());
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_backoff_stops_immediately() {
    let transport = MockTransport::always(MockReply::error(500, "down"));
    let client = client(&transport, RetryPolicy::default());
    let token = CancellationToken::new();
    let request = test_request();
    let started = Instant::now();

    let (result, ()) = tokio::join!(client.fetch_with_retry(&request, Some(&token)), async {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        token.cancel();
    });

    let err = result.expect_err("cancelled request fails");
    assert!(matches!(err.kind(), RequestErrorKind::Cancelled));
    assert!(!err.is_retryable());
    // Attempt two ran at 1s; attempt three would have run at 3s.
    assert_eq!(transport.call_count(), 2);
    assert_close(started.elapsed(), Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn test_already_cancelled_token_sends_nothing() {
    let transport = MockTransport::always(MockReply::text("unused"));
    let client = client(&transport, RetryPolicy::default());
    let token = CancellationToken::new();
    token.cancel();

    let err = client
        .fetch_with_retry(&test_request(), Some(&token))
        .await
        .expect_err("cancelled");

    assert!(matches!(err.kind(), RequestErrorKind::Cancelled));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_slow_attempt_times_out_and_is_retried() -> anyhow::Result<()> {
    let transport = MockTransport::sequence(vec![
        MockReply::Delayed(Duration::from_secs(60), Box::new(MockReply::text("too late"))),
        MockReply::text("on time"),
    ]);
    let policy = RetryPolicy::default().with_attempt_timeout(Duration::from_secs(5));
    let client = client(&transport, policy);

    let response = client.fetch_with_retry(&test_request(), None).await?;

    assert_eq!(response.status(), 200);
    assert!(response.text().contains("on time"));
    assert_eq!(transport.call_count(), 2);
    let waits = gaps(&transport.call_instants());
    assert_close(waits[0], Duration::from_millis(6000));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_independent_requests_interleave() -> anyhow::Result<()> {
    let slow = MockTransport::sequence(vec![
        MockReply::error(503, "busy"),
        MockReply::text("slow done"),
    ]);
    let fast = MockTransport::always(MockReply::text("fast done"));
    let slow_client = client(&slow, RetryPolicy::default());
    let fast_client = client(&fast, RetryPolicy::default());
    let request = test_request();
    let started = Instant::now();

    let (slow_result, fast_elapsed) = tokio::join!(
        slow_client.fetch_with_retry(&request, None),
        async {
            fast_client.fetch_with_retry(&request, None).await?;
            Ok::<_, stellarmind_error::RequestError>(started.elapsed())
        }
    );

    slow_result?;
    assert!(fast_elapsed? < Duration::from_millis(10));
    Ok(())
}
