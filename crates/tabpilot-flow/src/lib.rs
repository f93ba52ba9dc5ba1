//! Question Flow Controller.
//!
//! Walks the textbook platform's per-question flow: detect the page
//! phase, extract the question, wait out the randomized delay, hand
//! the question to the orchestrator, apply the returned answer, pass
//! the confidence gate, harvest corrections and advance.

pub mod apply;
pub mod controller;
pub mod delay;
pub mod error;
pub mod extract;
pub mod grade;
pub mod selectors;

pub use controller::{FlowConfig, FlowController, FlowHandle};
pub use delay::{DelayOutcome, SkipSignal, pick_delay};
pub use error::FlowError;
