//! Provider adapters for the three supported AI chat backends.
//!
//! Each adapter is a capability set behind one trait: compose a
//! prompt, drive the provider's input/send UI, and observe the DOM
//! until a structured reply settles. The UIs differ only in selector
//! data; the control flow is shared.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use tabpilot_cdp::{CdpError, PageSession, js};
use tabpilot_protocols::{ProviderKind, QuestionPayload, RelayMessage};

pub mod chatgpt;
pub mod deepseek;
pub mod error;
pub mod extract;
pub mod gemini;
pub mod observe;
pub mod prompt;

pub use error::ProviderError;
pub use observe::{ObservationConfig, ObservationHandle};

/// Selector candidates for one provider's chat UI.
///
/// Ordered lists tried in sequence; kept as data so a markup change is
/// a one-line fix, not an orchestration change.
pub struct ProviderSelectors {
    /// Text-entry surface candidates.
    pub input: &'static [&'static str],
    /// Send control candidates; first enabled match wins.
    pub send_buttons: &'static [&'static str],
    /// Reply container candidates.
    pub replies: &'static [&'static str],
    /// Code-styled block inside a reply element.
    pub code_block: &'static str,
}

/// A driveable AI chat backend.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn selectors(&self) -> &'static ProviderSelectors;

    /// Build the instruction text for a question.
    fn compose_prompt(&self, question: &QuestionPayload) -> String {
        prompt::compose(question)
    }

    /// Type the prompt into the chat input and activate send.
    async fn submit(&self, session: &PageSession, text: &str) -> Result<(), ProviderError> {
        submit_prompt(session, self.kind(), self.selectors(), text).await
    }

    /// Start a single-shot reply observation cycle.
    ///
    /// The previous cycle's page-side observer is torn down before the
    /// new one registers. On success the normalized JSON string is
    /// emitted on `events` wrapped in this provider's response message.
    fn observe_reply(
        &self,
        session: Arc<PageSession>,
        events: mpsc::UnboundedSender<RelayMessage>,
    ) -> ObservationHandle {
        observe::start(
            session,
            self.kind(),
            self.selectors(),
            events,
            ObservationConfig::default(),
        )
    }
}

/// Adapter instance for a provider kind.
pub fn adapter_for(kind: ProviderKind) -> Arc<dyn ProviderAdapter> {
    match kind {
        ProviderKind::ChatGpt => Arc::new(chatgpt::ChatGptAdapter),
        ProviderKind::Gemini => Arc::new(gemini::GeminiAdapter),
        ProviderKind::Deepseek => Arc::new(deepseek::DeepseekAdapter),
    }
}

/// Shared submission path: locate input, inject text, fire the input
/// notification, settle, then click the first enabled send candidate.
pub(crate) async fn submit_prompt(
    session: &PageSession,
    kind: ProviderKind,
    selectors: &ProviderSelectors,
    text: &str,
) -> Result<(), ProviderError> {
    let mut input = None;
    for candidate in selectors.input {
        if session.exists(candidate).await? {
            input = Some(*candidate);
            break;
        }
    }
    let input = input.ok_or(ProviderError::InputNotFound(kind.display_name()))?;

    session.focus_selector(input).await?;

    // Select whatever a previous attempt left behind so the insert
    // replaces it instead of appending.
    session
        .evaluate(&format!(
            "(() => {{ const el = document.querySelector({}); \
             if (el.select) {{ el.select(); }} else {{ \
               const range = document.createRange(); range.selectNodeContents(el); \
               const sel = window.getSelection(); \
               sel.removeAllRanges(); sel.addRange(range); }} \
             return true; }})()",
            js::quote(input)
        ))
        .await?;

    session.insert_text(text).await?;

    // Frameworks watch for an input event, not the raw value change.
    session
        .evaluate(&format!(
            "(() => {{ const el = document.querySelector({}); \
             el.dispatchEvent(new Event('input', {{bubbles: true}})); return true; }})()",
            js::quote(input)
        ))
        .await?;

    // Let the UI register the text and enable its send control.
    tokio::time::sleep(std::time::Duration::from_millis(400)).await;

    for candidate in selectors.send_buttons {
        if is_enabled(session, candidate).await? {
            session.click_selector(candidate).await?;
            debug!("{}: prompt sent via {}", kind, candidate);
            return Ok(());
        }
    }

    Err(ProviderError::SendButtonNotFound(kind.display_name()))
}

async fn is_enabled(session: &PageSession, selector: &str) -> Result<bool, CdpError> {
    session
        .evaluate_bool(&format!(
            "(() => {{ const el = document.querySelector({}); \
             return !!el && !el.disabled && el.getAttribute('aria-disabled') !== 'true'; }})()",
            js::quote(selector)
        ))
        .await
}
