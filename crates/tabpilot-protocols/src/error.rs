//! Relay error taxonomy.

use thiserror::Error;

/// Errors surfaced by cross-tab message delivery and relay handling.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The target tab exists but its endpoint is not ready to take
    /// messages yet (page still loading). Retryable.
    #[error("tab endpoint not ready: {0}")]
    NotReady(String),

    /// All delivery attempts were exhausted.
    #[error("delivery failed after {attempts} attempts: {last}")]
    DeliveryFailure { attempts: u32, last: String },

    /// No tab is registered for the requested role.
    #[error("no tab registered for {0}")]
    NoSuchTab(String),

    /// A control the delivery depends on is missing from the page.
    /// Not retryable: redelivery re-runs the DOM side effects.
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// Underlying transport failed mid-exchange.
    #[error("transport error: {0}")]
    Transport(String),

    /// Message could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RelayError {
    /// Whether another delivery attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RelayError::NotReady(_) | RelayError::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_ready_is_retryable() {
        assert!(RelayError::NotReady("loading".into()).is_retryable());
        assert!(RelayError::Transport("socket".into()).is_retryable());
    }

    #[test]
    fn test_terminal_errors_are_not_retryable() {
        assert!(
            !RelayError::DeliveryFailure {
                attempts: 3,
                last: "no listener".into()
            }
            .is_retryable()
        );
        assert!(!RelayError::NoSuchTab("assistant".into()).is_retryable());
        assert!(!RelayError::ElementNotFound("send control".into()).is_retryable());
    }

    #[test]
    fn test_delivery_failure_display_names_attempts() {
        let err = RelayError::DeliveryFailure {
            attempts: 3,
            last: "no listener".into(),
        };
        let text = err.to_string();
        assert!(text.contains("3 attempts"));
        assert!(text.contains("no listener"));
    }
}
