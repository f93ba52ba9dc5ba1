//! Flow errors.

use thiserror::Error;

use tabpilot_cdp::CdpError;

/// Errors raised while driving the textbook page.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A control the flow depends on never appeared or enabled.
    /// Fatal to the session: the automation flag is cleared.
    #[error("bounded wait timed out: {0}")]
    BoundedWaitTimeout(String),

    /// Underlying CDP failure.
    #[error("CDP error: {0}")]
    Cdp(#[from] CdpError),

    /// The orchestrator side went away mid-question.
    #[error("relay channel closed")]
    RelayClosed,
}
