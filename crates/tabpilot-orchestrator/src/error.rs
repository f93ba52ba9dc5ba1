//! Orchestrator errors.

use thiserror::Error;

use tabpilot_cdp::CdpError;
use tabpilot_protocols::RelayError;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error("CDP error: {0}")]
    Cdp(#[from] CdpError),
}
