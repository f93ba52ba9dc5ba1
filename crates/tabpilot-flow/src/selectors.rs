//! Selector tables for the textbook platform's question UI.
//!
//! Kept as data in one place so markup drift is a constant change.

/// Container present while a gradeable question is on screen.
pub const QUESTION_CONTAINER: &str = "div.question-container";

/// Question prompt text inside the container.
pub const PROMPT: &str = "div.question-container .question-prompt";

/// Per-type marker classes, checked inside the question container.
pub const MARKER_MULTIPLE_CHOICE: &str = ".choice-single";
pub const MARKER_MULTIPLE_ANSWER: &str = ".choice-multiple";
pub const MARKER_TRUE_FALSE: &str = ".choice-boolean";
pub const MARKER_FILL_IN_BLANK: &str = ".blank-entry-question";
pub const MARKER_MATCHING: &str = ".matching-question";

/// Answer option rows for the choice-style types.
pub const OPTION_LABELS: &str = "div.question-container .answer-option label";
pub const OPTION_INPUTS: &str = "div.question-container .answer-option input";

/// Inline text inputs for fill-in-the-blank prompts.
pub const BLANK_INPUTS: &str = "div.question-container input.blank-entry";

/// Screen-reader and decoration spans stripped from prompt text.
pub const DECORATION_SPANS: &str = "span.sr-only, span.decoration";

/// Matching-question rows.
pub const MATCHING_PROMPTS: &str = "div.question-container .pair-prompt";
pub const MATCHING_CHOICES: &str = "div.question-container .pair-choice";

/// Topic overview screen: the continue button that opens the first
/// question.
pub const TOPIC_CONTINUE: &str = "button.topic-continue";

/// Forced-learning interruption screen and its three-step path back
/// to the questions.
pub const FORCED_LEARNING: &str = "div.reading-interruption";
pub const OPEN_READING: &str = "button.open-reading";
pub const READING_CONTINUE: &str = "button.reading-continue";
pub const TO_QUESTIONS: &str = "button.to-questions";

/// Confidence gate shown after answering, before grading.
pub const CONFIDENCE_CONFIRM: &str = "button.confidence-confirm";

/// Grading feedback.
pub const INCORRECT_MARKER: &str = "div.feedback-incorrect";
pub const REVEALED_ANSWER: &str = "div.feedback-incorrect .correct-answer-text";

/// Advances to the next question after grading.
pub const NEXT_QUESTION: &str = "button.next-question";
