use std::sync::atomic::{AtomicU32, Ordering};

use super::*;

/// Endpoint that fails a fixed number of times before acknowledging.
struct FlakyEndpoint {
    failures: u32,
    calls: AtomicU32,
    error: fn(String) -> RelayError,
}

impl FlakyEndpoint {
    fn new(failures: u32, error: fn(String) -> RelayError) -> Self {
        Self {
            failures,
            calls: AtomicU32::new(0),
            error,
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TabEndpoint for FlakyEndpoint {
    fn describe(&self) -> &'static str {
        "test endpoint"
    }

    async fn deliver(&self, _message: &RelayMessage) -> Result<Ack, RelayError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err((self.error)("not yet".into()))
        } else {
            Ok(Ack::received())
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_first_attempt_success_sends_once() {
    let endpoint = FlakyEndpoint::new(0, RelayError::NotReady);
    send(&endpoint, &RelayMessage::Ping).await.unwrap();
    assert_eq!(endpoint.calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_retries_after_not_ready() {
    let endpoint = FlakyEndpoint::new(2, RelayError::NotReady);
    send(&endpoint, &RelayMessage::Ping).await.unwrap();
    assert_eq!(endpoint.calls(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_exhaustion_reports_attempts_and_last_cause() {
    let endpoint = FlakyEndpoint::new(10, RelayError::Transport);
    let err = send(&endpoint, &RelayMessage::Ping).await.unwrap_err();
    assert_eq!(endpoint.calls(), 3);
    match err {
        RelayError::DeliveryFailure { attempts, last } => {
            assert_eq!(attempts, MAX_ATTEMPTS);
            assert!(last.contains("not yet"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_non_retryable_fails_fast() {
    let endpoint = FlakyEndpoint::new(10, RelayError::NoSuchTab);
    let err = send(&endpoint, &RelayMessage::Ping).await.unwrap_err();
    assert_eq!(endpoint.calls(), 1);
    assert!(matches!(err, RelayError::NoSuchTab(_)));
}

#[tokio::test(start_paused = true)]
async fn test_missing_send_control_is_not_redelivered() {
    // A submission that already typed the prompt must not be retried:
    // redelivery would insert the prompt again.
    let endpoint = FlakyEndpoint::new(10, RelayError::ElementNotFound);
    let err = send(&endpoint, &RelayMessage::Ping).await.unwrap_err();
    assert_eq!(endpoint.calls(), 1);
    assert!(matches!(err, RelayError::ElementNotFound(_)));
}

#[tokio::test(start_paused = true)]
async fn test_rejected_ack_is_retried() {
    struct Rejecting(AtomicU32);

    #[async_trait]
    impl TabEndpoint for Rejecting {
        fn describe(&self) -> &'static str {
            "rejecting endpoint"
        }

        async fn deliver(&self, _message: &RelayMessage) -> Result<Ack, RelayError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Ack::rejected())
        }
    }

    let endpoint = Rejecting(AtomicU32::new(0));
    let err = send(&endpoint, &RelayMessage::Ping).await.unwrap_err();
    assert_eq!(endpoint.0.load(Ordering::SeqCst), 3);
    assert!(matches!(err, RelayError::DeliveryFailure { .. }));
}
