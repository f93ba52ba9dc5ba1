//! Tab registry: which target hosts the textbook page and which hosts
//! the assistant page.
//!
//! Slots are filled by URL-pattern matching and updated reactively
//! from target discovery events. A slot is invalidated when its target
//! closes or navigates away from the matching URL.

use tabpilot_protocols::ProviderKind;
use tracing::debug;

use crate::protocol::TargetInfo;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

/// Role a tracked tab plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabRole {
    Textbook,
    Assistant,
}

impl std::fmt::Display for TabRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TabRole::Textbook => f.write_str("textbook"),
            TabRole::Assistant => f.write_str("assistant"),
        }
    }
}

/// A tracked tab.
#[derive(Debug, Clone, PartialEq)]
pub struct TabRef {
    pub target_id: String,
    pub window_id: Option<i64>,
    pub role: TabRole,
    /// Which backend the assistant tab hosts. None for the textbook.
    pub provider: Option<ProviderKind>,
}

/// Registry snapshot handed to the orchestrator.
#[derive(Debug, Clone)]
pub struct ResolvedTabs {
    pub textbook: Option<TabRef>,
    pub assistant: Option<TabRef>,
    /// True only when both window IDs are known and equal. Focusing is
    /// only worth doing when the tabs fight over one window.
    pub same_window: bool,
}

/// Process-wide tab-identity state.
///
/// Mutated only from registry update calls; the browser serializes
/// event delivery so last-writer-wins is safe here.
pub struct TabRegistry {
    website_url: String,
    provider: ProviderKind,
    textbook: Option<TabRef>,
    assistant: Option<TabRef>,
}

impl TabRegistry {
    pub fn new(website_url: impl Into<String>, provider: ProviderKind) -> Self {
        Self {
            website_url: website_url.into(),
            provider,
            textbook: None,
            assistant: None,
        }
    }

    /// The provider whose tab this registry looks for.
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Swap the textbook subdomain pattern (settings change).
    pub fn set_website_url(&mut self, website_url: impl Into<String>) {
        self.website_url = website_url.into();
        self.textbook = None;
    }

    /// Which role a URL would be registered under.
    pub fn classify(&self, url: &str) -> Option<TabRole> {
        if !self.website_url.is_empty() && url.contains(&self.website_url) {
            return Some(TabRole::Textbook);
        }
        if self.provider.matches_url(url) {
            return Some(TabRole::Assistant);
        }
        None
    }

    /// Full rescan: first match per role wins.
    pub fn resolve(&mut self, targets: &[TargetInfo]) {
        self.textbook = None;
        self.assistant = None;
        for target in targets.iter().filter(|t| t.is_page()) {
            self.observe(target);
        }
        debug!(
            "Registry resolved: textbook={:?} assistant={:?}",
            self.textbook.as_ref().map(|t| &t.target_id),
            self.assistant.as_ref().map(|t| &t.target_id)
        );
    }

    /// Incremental update for a created or navigated target.
    pub fn observe(&mut self, target: &TargetInfo) {
        if !target.is_page() {
            return;
        }

        // A tracked tab that navigated away loses its slot.
        let role = self.classify(&target.url);
        if self.tracked_role(&target.target_id) != role {
            self.remove(&target.target_id);
        }

        match role {
            Some(TabRole::Textbook) if self.textbook.is_none() => {
                self.textbook = Some(TabRef {
                    target_id: target.target_id.clone(),
                    window_id: None,
                    role: TabRole::Textbook,
                    provider: None,
                });
            }
            Some(TabRole::Assistant) if self.assistant.is_none() => {
                self.assistant = Some(TabRef {
                    target_id: target.target_id.clone(),
                    window_id: None,
                    role: TabRole::Assistant,
                    provider: Some(self.provider),
                });
            }
            _ => {}
        }
    }

    /// A target closed; clear its slot if tracked.
    pub fn remove(&mut self, target_id: &str) {
        if self
            .textbook
            .as_ref()
            .is_some_and(|t| t.target_id == target_id)
        {
            debug!("Textbook tab {} gone", target_id);
            self.textbook = None;
        }
        if self
            .assistant
            .as_ref()
            .is_some_and(|t| t.target_id == target_id)
        {
            debug!("Assistant tab {} gone", target_id);
            self.assistant = None;
        }
    }

    /// Record the browser window hosting a tracked tab.
    pub fn set_window_id(&mut self, target_id: &str, window_id: i64) {
        for slot in [&mut self.textbook, &mut self.assistant] {
            if let Some(tab) = slot {
                if tab.target_id == target_id {
                    tab.window_id = Some(window_id);
                }
            }
        }
    }

    pub fn textbook(&self) -> Option<&TabRef> {
        self.textbook.as_ref()
    }

    pub fn assistant(&self) -> Option<&TabRef> {
        self.assistant.as_ref()
    }

    /// Snapshot for the orchestrator.
    pub fn snapshot(&self) -> ResolvedTabs {
        let same_window = match (&self.textbook, &self.assistant) {
            (Some(t), Some(a)) => match (t.window_id, a.window_id) {
                (Some(tw), Some(aw)) => tw == aw,
                _ => false,
            },
            _ => false,
        };
        ResolvedTabs {
            textbook: self.textbook.clone(),
            assistant: self.assistant.clone(),
            same_window,
        }
    }

    fn tracked_role(&self, target_id: &str) -> Option<TabRole> {
        if self
            .textbook
            .as_ref()
            .is_some_and(|t| t.target_id == target_id)
        {
            return Some(TabRole::Textbook);
        }
        if self
            .assistant
            .as_ref()
            .is_some_and(|t| t.target_id == target_id)
        {
            return Some(TabRole::Assistant);
        }
        None
    }
}
