//! Question extraction from the textbook page.
//!
//! One page-side pass classifies the question by its marker class and
//! returns a raw snapshot; the payload shaping stays on this side so
//! it can be tested without a browser.

use serde::Deserialize;
use tabpilot_cdp::{CdpError, PageSession, js};
use tabpilot_protocols::{QuestionKind, QuestionPayload};
use tracing::debug;

use crate::selectors;

/// Raw snapshot returned by the extraction script.
#[derive(Debug, Deserialize)]
pub struct RawQuestion {
    pub kind: QuestionKind,
    pub question: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub prompts: Option<Vec<String>>,
    #[serde(default)]
    pub choices: Option<Vec<String>>,
}

/// Shape a raw snapshot into the relay payload.
///
/// Fill-in-the-blank carries no options; matching carries both lists.
/// A snapshot with an empty prompt is discarded.
pub fn into_payload(raw: RawQuestion) -> Option<QuestionPayload> {
    if raw.question.trim().is_empty() {
        return None;
    }
    let payload = QuestionPayload::new(raw.kind, raw.question.trim());
    let payload = match raw.kind {
        QuestionKind::Matching => {
            payload.with_matching(raw.prompts.unwrap_or_default(), raw.choices.unwrap_or_default())
        }
        QuestionKind::FillInTheBlank => payload,
        _ => payload.with_choices(raw.options.unwrap_or_default()),
    };
    Some(payload)
}

/// Extract the on-screen question, or `None` when no gradeable
/// question is showing.
pub async fn extract_question(session: &PageSession) -> Result<Option<QuestionPayload>, CdpError> {
    let value = session.evaluate(&extraction_script()).await?;
    let Some(raw_json) = value.as_str() else {
        return Ok(None);
    };

    let raw: RawQuestion = match serde_json::from_str(raw_json) {
        Ok(raw) => raw,
        Err(err) => {
            debug!("unparseable question snapshot: {}", err);
            return Ok(None);
        }
    };

    Ok(into_payload(raw))
}

/// Ordered text of the current choice options, used when applying an
/// answer by index.
pub async fn option_texts(session: &PageSession) -> Result<Vec<String>, CdpError> {
    let value = session
        .evaluate(&format!(
            "JSON.stringify(Array.from(document.querySelectorAll({})).map(el => el.textContent.trim()))",
            js::quote(selectors::OPTION_LABELS)
        ))
        .await?;
    let Some(raw) = value.as_str() else {
        return Ok(Vec::new());
    };
    Ok(serde_json::from_str(raw).unwrap_or_default())
}

/// Build the single-pass extraction script.
///
/// Classification order matters: the matching and blank markers are
/// checked before the choice markers because a matching question also
/// renders generic option rows.
fn extraction_script() -> String {
    format!(
        r#"(() => {{
  const container = document.querySelector({container});
  if (!container) return null;
  let kind = null;
  if (container.querySelector({m_matching})) kind = 'matching';
  else if (container.querySelector({m_blank})) kind = 'fill_in_the_blank';
  else if (container.querySelector({m_tf})) kind = 'true_false';
  else if (container.querySelector({m_multi})) kind = 'multiple_select';
  else if (container.querySelector({m_single})) kind = 'multiple_choice';
  if (!kind) return null;
  const promptEl = document.querySelector({prompt});
  if (!promptEl) return null;
  const clone = promptEl.cloneNode(true);
  clone.querySelectorAll({decorations}).forEach(el => el.remove());
  clone.querySelectorAll('input').forEach(el => el.replaceWith(document.createTextNode(' _____ ')));
  const question = clone.textContent.replace(/\s+/g, ' ').trim();
  const texts = sel => Array.from(document.querySelectorAll(sel)).map(el => el.textContent.trim());
  const out = {{ kind, question }};
  if (kind === 'matching') {{
    out.prompts = texts({matching_prompts});
    out.choices = texts({matching_choices});
  }} else if (kind !== 'fill_in_the_blank') {{
    out.options = texts({option_labels});
  }}
  return JSON.stringify(out);
}})()"#,
        container = js::quote(selectors::QUESTION_CONTAINER),
        m_matching = js::quote(selectors::MARKER_MATCHING),
        m_blank = js::quote(selectors::MARKER_FILL_IN_BLANK),
        m_tf = js::quote(selectors::MARKER_TRUE_FALSE),
        m_multi = js::quote(selectors::MARKER_MULTIPLE_ANSWER),
        m_single = js::quote(selectors::MARKER_MULTIPLE_CHOICE),
        prompt = js::quote(selectors::PROMPT),
        decorations = js::quote(selectors::DECORATION_SPANS),
        matching_prompts = js::quote(selectors::MATCHING_PROMPTS),
        matching_choices = js::quote(selectors::MATCHING_CHOICES),
        option_labels = js::quote(selectors::OPTION_LABELS),
    )
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
