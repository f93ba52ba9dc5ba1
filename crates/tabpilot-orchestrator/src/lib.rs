//! Cross-tab orchestration.
//!
//! The orchestrator owns the relay between the two page endpoints: it
//! takes questions from the textbook side, delivers them to the
//! assistant side with retries, routes extracted replies back, and
//! handles focus when both tabs share a window.

pub mod endpoints;
pub mod error;
pub mod messenger;
pub mod orchestrator;

pub use endpoints::{AssistantEndpoint, TextbookEndpoint};
pub use error::OrchestratorError;
pub use messenger::{MAX_ATTEMPTS, RETRY_DELAY, TabEndpoint, send, send_with};
pub use orchestrator::{Orchestrator, TargetActivator};
