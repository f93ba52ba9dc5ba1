//! Applying an assistant answer to the on-screen question.

use tabpilot_cdp::{CdpError, PageSession, js};
use tabpilot_protocols::AnswerValue;
use tracing::{debug, warn};

use crate::selectors;

/// Whether an on-screen option text matches an answer candidate.
///
/// Three rules, in order: exact equality; equality after stripping a
/// trailing period from both sides; the option being the candidate
/// with a period appended. The asymmetric last rule covers assistants
/// that drop the period the platform renders.
pub fn matches(option: &str, candidate: &str) -> bool {
    if option == candidate {
        return true;
    }
    if strip_trailing_period(option) == strip_trailing_period(candidate) {
        return true;
    }
    option.len() == candidate.len() + 1 && option.starts_with(candidate) && option.ends_with('.')
}

fn strip_trailing_period(s: &str) -> &str {
    s.strip_suffix('.').unwrap_or(s)
}

/// Option indices to select for an answer.
///
/// Each candidate picks the first matching option; single-answer kinds
/// stop at the first hit. Candidates with no matching option are
/// dropped, and duplicate hits collapse.
pub fn selection_indices(options: &[String], answer: &AnswerValue, multi: bool) -> Vec<usize> {
    let mut indices = Vec::new();
    for candidate in answer.candidates() {
        if let Some(idx) = options.iter().position(|opt| matches(opt, candidate)) {
            if !indices.contains(&idx) {
                indices.push(idx);
            }
            if !multi {
                break;
            }
        } else {
            warn!("no option matched candidate {:?}", candidate);
        }
    }
    indices
}

/// Alert text shown for matching questions, which are never
/// auto-applied.
pub fn matching_alert(answer: &AnswerValue) -> String {
    let mut text = String::from("Matching questions must be applied manually. Suggested pairing:\n");
    for (i, candidate) in answer.candidates().iter().enumerate() {
        text.push_str(&format!("{} -> {}\n", i + 1, candidate));
    }
    text
}

/// Click the option inputs at the given indices.
///
/// Already-checked inputs are left alone, so re-applying the same
/// answer never toggles a selection off.
pub async fn select_options(session: &PageSession, indices: &[usize]) -> Result<(), CdpError> {
    if indices.is_empty() {
        return Err(CdpError::ElementNotFound("matching answer option".into()));
    }
    let wanted = serde_json::to_string(indices).unwrap_or_else(|_| "[]".into());
    let clicked = session
        .evaluate_bool(&format!(
            r#"(() => {{
  const inputs = Array.from(document.querySelectorAll({inputs}));
  let any = false;
  for (const i of {wanted}) {{
    const input = inputs[i];
    if (!input) continue;
    if (!input.checked) input.click();
    any = true;
  }}
  return any;
}})()"#,
            inputs = js::quote(selectors::OPTION_INPUTS),
            wanted = wanted,
        ))
        .await?;
    if !clicked {
        return Err(CdpError::ElementNotFound(selectors::OPTION_INPUTS.into()));
    }
    debug!("selected options {:?}", indices);
    Ok(())
}

/// Fill the blank inputs in document order from the answer values.
///
/// Extra values beyond the number of blanks are ignored; each filled
/// input gets an input event so the platform registers the change.
pub async fn fill_blanks(session: &PageSession, values: &[&str]) -> Result<usize, CdpError> {
    let encoded = serde_json::to_string(values).unwrap_or_else(|_| "[]".into());
    let filled = session
        .evaluate(&format!(
            r#"(() => {{
  const blanks = Array.from(document.querySelectorAll({blanks}));
  const values = {encoded};
  let filled = 0;
  for (let i = 0; i < blanks.length && i < values.length; i++) {{
    blanks[i].value = values[i];
    blanks[i].dispatchEvent(new Event('input', {{bubbles: true}}));
    filled++;
  }}
  return filled;
}})()"#,
            blanks = js::quote(selectors::BLANK_INPUTS),
            encoded = encoded,
        ))
        .await?;
    let filled = filled.as_u64().unwrap_or(0) as usize;
    if filled == 0 {
        return Err(CdpError::ElementNotFound(selectors::BLANK_INPUTS.into()));
    }
    debug!("filled {} blanks", filled);
    Ok(filled)
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod tests;
