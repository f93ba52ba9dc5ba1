//! Reply text extraction.
//!
//! Assistant replies arrive as streamed DOM text in several rendering
//! idioms: a fenced code block, a styled code element, or plain prose
//! with a JSON object buried in it. These helpers pull a parseable
//! candidate out of whatever showed up.

use regex::Regex;
use std::sync::OnceLock;

use tabpilot_protocols::AnswerPayload;

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;

/// Zero-width characters some chat UIs sprinkle into rendered text.
const ZERO_WIDTH: [char; 4] = ['\u{200B}', '\u{200C}', '\u{200D}', '\u{FEFF}'];

fn fence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").unwrap())
}

/// Strip zero-width characters and collapse internal newlines.
pub fn normalize(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !ZERO_WIDTH.contains(c)).collect();
    let mut out = String::with_capacity(stripped.len());
    let mut last_was_newline = false;
    for ch in stripped.chars() {
        if ch == '\n' || ch == '\r' {
            if !last_was_newline {
                out.push(' ');
                last_was_newline = true;
            }
        } else {
            out.push(ch);
            last_was_newline = false;
        }
    }
    out.trim().to_string()
}

/// The body of the first fenced code block that looks like JSON.
pub fn fenced_block(text: &str) -> Option<String> {
    fence_re()
        .captures(text)
        .map(|cap| cap[1].trim().to_string())
}

/// Best-effort brace-to-brace slice: first `{` through last `}`.
///
/// Deliberately naive - prose containing an earlier brace pair will
/// mis-slice, and we accept the first match as the original does.
pub fn brace_slice(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

/// Normalize a candidate and parse it as an answer payload.
pub fn parse_candidate(raw: &str) -> Option<(String, AnswerPayload)> {
    let normalized = normalize(raw);
    let payload = AnswerPayload::from_json_str(&normalized)?;
    Some((normalized, payload))
}

/// Extract an answer from a reply element's rendered content.
///
/// `code` is the text of a code-styled child if one exists; `text` is
/// the element's full text. Direct JSON parses are accepted at any
/// time; the brace-slice fallback only runs once `allow_fallback` is
/// set (after the streaming grace window), so a half-streamed object
/// is not sliced into a truncated fragment.
pub fn extract_reply(
    code: Option<&str>,
    text: &str,
    allow_fallback: bool,
) -> Option<(String, AnswerPayload)> {
    if let Some(code) = code {
        if let Some(found) = parse_candidate(code) {
            return Some(found);
        }
    }

    if let Some(fenced) = fenced_block(text) {
        if let Some(found) = parse_candidate(&fenced) {
            return Some(found);
        }
    }

    if let Some(found) = parse_candidate(text) {
        return Some(found);
    }

    if allow_fallback {
        if let Some(slice) = brace_slice(text) {
            return parse_candidate(slice);
        }
    }

    None
}
