//! Provider adapter errors.

use thiserror::Error;

use tabpilot_cdp::CdpError;

/// Errors raised while driving a provider's chat UI.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The chat input surface is missing. Usually means the provider
    /// changed their markup or the page has not finished loading.
    #[error("{0} input field not found")]
    InputNotFound(&'static str),

    /// No send control candidate matched an enabled element.
    #[error("{0} send button not found")]
    SendButtonNotFound(&'static str),

    /// Underlying CDP failure.
    #[error("CDP error: {0}")]
    Cdp(#[from] CdpError),
}
