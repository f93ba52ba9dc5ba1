//! Confidence gate, grading feedback, and correction capture.

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use tabpilot_cdp::{CdpError, PageSession};
use tabpilot_protocols::{CorrectionContext, QuestionPayload};
use tracing::{debug, info};

use crate::error::FlowError;
use crate::selectors;

/// Bounded wait applied to every post-answer control.
pub const GATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Wait for the confidence control to enable and click it.
///
/// The control only enables once the platform registers a selection,
/// so a timeout here means the answer never landed.
pub async fn pass_confidence_gate(session: &PageSession) -> Result<(), FlowError> {
    session
        .wait_for_enabled(selectors::CONFIDENCE_CONFIRM, GATE_TIMEOUT)
        .await
        .map_err(|_| FlowError::BoundedWaitTimeout("confidence control never enabled".into()))?;
    session.click_selector(selectors::CONFIDENCE_CONFIRM).await?;
    debug!("confidence gate passed");
    Ok(())
}

/// Check the grading feedback; on an incorrect mark, capture the
/// revealed correct answer as context for the next question.
pub async fn capture_correction(
    session: &PageSession,
    question: &QuestionPayload,
) -> Result<Option<CorrectionContext>, CdpError> {
    if !session.exists(selectors::INCORRECT_MARKER).await? {
        return Ok(None);
    }
    let Some(revealed) = session.text_of(selectors::REVEALED_ANSWER).await? else {
        debug!("incorrect mark without a revealed answer");
        return Ok(None);
    };
    let correct_answer = normalize_revealed(&revealed);
    info!("marked incorrect; revealed answer: {}", correct_answer);
    Ok(Some(CorrectionContext {
        question: question.question.clone(),
        correct_answer,
    }))
}

/// Wait for the next-question control and click it.
pub async fn advance(session: &PageSession) -> Result<(), FlowError> {
    session
        .wait_for_enabled(selectors::NEXT_QUESTION, GATE_TIMEOUT)
        .await
        .map_err(|_| FlowError::BoundedWaitTimeout("next-question control never enabled".into()))?;
    session.click_selector(selectors::NEXT_QUESTION).await?;
    Ok(())
}

/// Normalize the platform's revealed-answer text.
///
/// Strips the per-blank "Field N:" prefix and keeps only the first of
/// several accepted alternatives joined with " or ".
pub fn normalize_revealed(raw: &str) -> String {
    static FIELD_PREFIX: OnceLock<Regex> = OnceLock::new();
    let re = FIELD_PREFIX.get_or_init(|| Regex::new(r"^Field \d+:\s*").unwrap());

    let stripped = re.replace(raw.trim(), "");
    match stripped.find(" or ") {
        Some(pos) => stripped[..pos].trim().to_string(),
        None => stripped.trim().to_string(),
    }
}

#[cfg(test)]
#[path = "grade_tests.rs"]
mod tests;
