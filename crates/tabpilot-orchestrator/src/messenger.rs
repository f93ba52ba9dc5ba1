//! Reliable delivery to a tab endpoint.
//!
//! A delivery is acknowledged or it did not happen. Retryable failures
//! (endpoint not ready, transport hiccup) get a fixed number of
//! attempts with a flat backoff; everything else fails fast.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use tabpilot_protocols::{Ack, RelayError, RelayMessage};

pub const MAX_ATTEMPTS: u32 = 3;
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

/// One deliverable side of the relay.
#[async_trait]
pub trait TabEndpoint: Send + Sync {
    /// Role label for logs and errors.
    fn describe(&self) -> &'static str;

    /// Deliver one message and wait for its acknowledgement.
    async fn deliver(&self, message: &RelayMessage) -> Result<Ack, RelayError>;
}

/// Deliver with the standard retry policy.
pub async fn send(endpoint: &dyn TabEndpoint, message: &RelayMessage) -> Result<(), RelayError> {
    send_with(endpoint, message, MAX_ATTEMPTS, RETRY_DELAY).await
}

/// Deliver with an explicit attempt budget.
///
/// A rejected ack counts as the endpoint not being ready yet. The
/// terminal error names the attempt count and the last cause.
pub async fn send_with(
    endpoint: &dyn TabEndpoint,
    message: &RelayMessage,
    max_attempts: u32,
    retry_delay: Duration,
) -> Result<(), RelayError> {
    let mut last = String::new();

    for attempt in 1..=max_attempts {
        match endpoint.deliver(message).await {
            Ok(ack) if ack.received => {
                debug!(
                    "{} <- {} (attempt {})",
                    endpoint.describe(),
                    message.action(),
                    attempt
                );
                return Ok(());
            }
            Ok(_) => {
                last = format!("{} rejected the message", endpoint.describe());
            }
            Err(err) if err.is_retryable() => {
                last = err.to_string();
            }
            Err(err) => return Err(err),
        }

        if attempt < max_attempts {
            warn!(
                "{} <- {} attempt {}/{} failed: {}",
                endpoint.describe(),
                message.action(),
                attempt,
                max_attempts,
                last
            );
            tokio::time::sleep(retry_delay).await;
        }
    }

    Err(RelayError::DeliveryFailure {
        attempts: max_attempts,
        last,
    })
}

#[cfg(test)]
#[path = "messenger_tests.rs"]
mod tests;
