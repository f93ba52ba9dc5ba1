//! Gemini adapter.

use tabpilot_protocols::ProviderKind;

use crate::{ProviderAdapter, ProviderSelectors};

/// Gemini renders a Quill rich-text editor and wraps replies in
/// custom elements rather than plain divs.
static SELECTORS: ProviderSelectors = ProviderSelectors {
    input: &[
        "div.ql-editor[contenteditable='true']",
        "rich-textarea div[contenteditable='true']",
    ],
    send_buttons: &[
        "button.send-button",
        "button[aria-label='Send message']",
        "button[mattooltip='Submit']",
    ],
    replies: &["message-content", "div.model-response-text"],
    code_block: "pre code, code-block code",
};

pub struct GeminiAdapter;

impl ProviderAdapter for GeminiAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn selectors(&self) -> &'static ProviderSelectors {
        &SELECTORS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_selectors() {
        assert_eq!(GeminiAdapter.kind(), ProviderKind::Gemini);
        assert!(GeminiAdapter.selectors().replies.contains(&"message-content"));
    }
}
