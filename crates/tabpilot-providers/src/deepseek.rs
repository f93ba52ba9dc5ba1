//! DeepSeek adapter.

use tabpilot_protocols::ProviderKind;

use crate::{ProviderAdapter, ProviderSelectors};

/// DeepSeek keeps a plain textarea; its send control is an icon button
/// with unstable class names, so the role-based candidates come first.
static SELECTORS: ProviderSelectors = ProviderSelectors {
    input: &["#chat-input", "textarea[placeholder*='Message']"],
    send_buttons: &[
        "div[role='button'][aria-disabled='false']:has(svg)",
        "button[aria-label='Send']",
        "div.send-button",
    ],
    replies: &["div.ds-markdown", "div.markdown-body"],
    code_block: "pre code",
};

pub struct DeepseekAdapter;

impl ProviderAdapter for DeepseekAdapter {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Deepseek
    }

    fn selectors(&self) -> &'static ProviderSelectors {
        &SELECTORS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter_for;

    #[test]
    fn test_adapter_for_dispatch() {
        for kind in ProviderKind::all() {
            assert_eq!(adapter_for(kind).kind(), kind);
        }
    }
}
