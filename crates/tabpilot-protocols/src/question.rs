//! Question payload types.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "question_tests.rs"]
mod tests;

/// The question types the textbook platform renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
    MultipleSelect,
    FillInTheBlank,
    Matching,
}

impl QuestionKind {
    /// Human-readable label used when composing prompts.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "multiple choice",
            QuestionKind::TrueFalse => "true/false",
            QuestionKind::MultipleSelect => "multiple select",
            QuestionKind::FillInTheBlank => "fill in the blank",
            QuestionKind::Matching => "matching",
        }
    }

    /// Whether more than one answer may be selected.
    pub fn multi_answer(&self) -> bool {
        matches!(
            self,
            QuestionKind::MultipleSelect | QuestionKind::FillInTheBlank | QuestionKind::Matching
        )
    }
}

/// Options attached to a question, shaped by its kind.
///
/// Choice kinds carry a flat ordered list; matching carries paired
/// prompt/choice lists; fill-in-the-blank carries no options at all
/// (the payload field is absent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionOptions {
    Choices(Vec<String>),
    Matching {
        prompts: Vec<String>,
        choices: Vec<String>,
    },
}

/// Lookback context captured when the platform marks a submitted
/// answer incorrect. Single slot: overwritten or cleared each cycle,
/// never a history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionContext {
    pub question: String,
    pub correct_answer: String,
}

/// One question instance extracted from the textbook page.
///
/// Immutable once sent; consumed exactly once by the active provider
/// adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionPayload {
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<QuestionOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_correction: Option<CorrectionContext>,
}

impl QuestionPayload {
    /// Create a payload with no options and no correction context.
    pub fn new(kind: QuestionKind, question: impl Into<String>) -> Self {
        Self {
            kind,
            question: question.into(),
            options: None,
            previous_correction: None,
        }
    }

    /// Attach a flat option list (choice kinds).
    pub fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.options = Some(QuestionOptions::Choices(choices));
        self
    }

    /// Attach paired prompt/choice lists (matching).
    pub fn with_matching(mut self, prompts: Vec<String>, choices: Vec<String>) -> Self {
        self.options = Some(QuestionOptions::Matching { prompts, choices });
        self
    }

    /// Attach the previous-question correction context.
    pub fn with_correction(mut self, correction: CorrectionContext) -> Self {
        self.previous_correction = Some(correction);
        self
    }

    /// The flat option list, if this question carries one.
    pub fn choices(&self) -> Option<&[String]> {
        match &self.options {
            Some(QuestionOptions::Choices(c)) => Some(c),
            _ => None,
        }
    }
}
