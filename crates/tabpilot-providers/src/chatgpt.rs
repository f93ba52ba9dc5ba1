//! ChatGPT adapter.

use tabpilot_protocols::ProviderKind;

use crate::{ProviderAdapter, ProviderSelectors};

/// ChatGPT's composer is a contenteditable div; the send control has
/// cycled through several test ids over time, hence the candidates.
static SELECTORS: ProviderSelectors = ProviderSelectors {
    input: &["#prompt-textarea", "div[contenteditable='true'].ProseMirror"],
    send_buttons: &[
        "button[data-testid='send-button']",
        "button[data-testid='composer-send-button']",
        "button[aria-label='Send prompt']",
        "form button[type='submit']",
    ],
    replies: &[
        "div[data-message-author-role='assistant']",
        "div.agent-turn div.markdown",
    ],
    code_block: "pre code",
};

pub struct ChatGptAdapter;

impl ProviderAdapter for ChatGptAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::ChatGpt
    }

    fn selectors(&self) -> &'static ProviderSelectors {
        &SELECTORS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_lists_are_ordered_and_nonempty() {
        assert!(!SELECTORS.input.is_empty());
        assert!(!SELECTORS.send_buttons.is_empty());
        assert!(!SELECTORS.replies.is_empty());
        assert_eq!(SELECTORS.input[0], "#prompt-textarea");
    }

    #[test]
    fn test_kind() {
        assert_eq!(ChatGptAdapter.kind(), ProviderKind::ChatGpt);
    }
}
