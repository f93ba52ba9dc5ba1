//! # tabpilot Protocols
//!
//! Shared data model and message contracts for the tabpilot workspace.
//! Contains only types and their serialization - no I/O.
//!
//! ## Core Types
//!
//! - [`QuestionPayload`] - A question extracted from the textbook page
//! - [`AnswerPayload`] - The assistant's parsed structured reply
//! - [`CorrectionContext`] - One-step lookback after an incorrect answer
//! - [`RelayMessage`] - The tagged cross-tab message protocol
//! - [`ProviderKind`] - Which AI chat backend is driven

pub mod answer;
pub mod error;
pub mod message;
pub mod provider;
pub mod question;

pub use answer::{AnswerPayload, AnswerValue};
pub use error::RelayError;
pub use message::{Ack, RelayMessage};
pub use provider::ProviderKind;
pub use question::{CorrectionContext, QuestionKind, QuestionOptions, QuestionPayload};
