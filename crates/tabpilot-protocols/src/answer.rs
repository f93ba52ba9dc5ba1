//! Answer payload types.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "answer_tests.rs"]
mod tests;

/// The `answer` field of a reply: a single string or an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    One(String),
    Many(Vec<String>),
}

impl AnswerValue {
    /// True when there is no usable answer text at all.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::One(s) => s.trim().is_empty(),
            AnswerValue::Many(v) => v.iter().all(|s| s.trim().is_empty()),
        }
    }

    /// Candidate answers in order. A single string yields one candidate.
    pub fn candidates(&self) -> Vec<&str> {
        match self {
            AnswerValue::One(s) => vec![s.as_str()],
            AnswerValue::Many(v) => v.iter().map(|s| s.as_str()).collect(),
        }
    }

    /// Flattened display form, list items joined with ", ".
    pub fn display(&self) -> String {
        match self {
            AnswerValue::One(s) => s.clone(),
            AnswerValue::Many(v) => v.join(", "),
        }
    }
}

/// The assistant's structured reply.
///
/// Parsed from a strict JSON object carrying `answer` and
/// `explanation`. Parsing succeeds only when `answer` is non-empty;
/// the explanation is advisory and may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub answer: AnswerValue,
    #[serde(default)]
    pub explanation: String,
}

impl AnswerPayload {
    /// Parse a raw JSON object string into a payload.
    ///
    /// Returns `None` for invalid JSON, a missing `answer` key, or an
    /// empty answer value - callers treat all three as "keep waiting".
    pub fn from_json_str(raw: &str) -> Option<Self> {
        let parsed: AnswerPayload = serde_json::from_str(raw).ok()?;
        if parsed.answer.is_empty() {
            return None;
        }
        Some(parsed)
    }
}
