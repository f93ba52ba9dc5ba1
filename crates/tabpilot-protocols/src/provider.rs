//! Provider identity.

use serde::{Deserialize, Serialize};

use crate::message::RelayMessage;

/// The three interchangeable AI chat backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[serde(rename = "chatgpt")]
    ChatGpt,
    Gemini,
    Deepseek,
}

impl ProviderKind {
    /// Name shown to the user in alerts and logs.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProviderKind::ChatGpt => "ChatGPT",
            ProviderKind::Gemini => "Gemini",
            ProviderKind::Deepseek => "DeepSeek",
        }
    }

    /// Chat page URL for this provider.
    pub fn chat_url(&self) -> &'static str {
        match self {
            ProviderKind::ChatGpt => "https://chatgpt.com/",
            ProviderKind::Gemini => "https://gemini.google.com/app",
            ProviderKind::Deepseek => "https://chat.deepseek.com/",
        }
    }

    /// Whether a tab URL belongs to this provider's chat UI.
    pub fn matches_url(&self, url: &str) -> bool {
        let hosts: &[&str] = match self {
            ProviderKind::ChatGpt => &["chatgpt.com", "chat.openai.com"],
            ProviderKind::Gemini => &["gemini.google.com"],
            ProviderKind::Deepseek => &["chat.deepseek.com"],
        };
        hosts.iter().any(|h| {
            url.strip_prefix("https://")
                .or_else(|| url.strip_prefix("http://"))
                .map(|rest| rest.starts_with(h) || rest.starts_with(&format!("www.{h}")))
                .unwrap_or(false)
        })
    }

    /// Wrap a raw reply string in this provider's response message.
    pub fn response_message(&self, response: String) -> RelayMessage {
        match self {
            ProviderKind::ChatGpt => RelayMessage::ChatGptResponse { response },
            ProviderKind::Gemini => RelayMessage::GeminiResponse { response },
            ProviderKind::Deepseek => RelayMessage::DeepseekResponse { response },
        }
    }

    /// All providers, in default-selection order.
    pub fn all() -> [ProviderKind; 3] {
        [
            ProviderKind::ChatGpt,
            ProviderKind::Gemini,
            ProviderKind::Deepseek,
        ]
    }
}

impl Default for ProviderKind {
    fn default() -> Self {
        ProviderKind::ChatGpt
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chatgpt" | "gpt" => Ok(ProviderKind::ChatGpt),
            "gemini" => Ok(ProviderKind::Gemini),
            "deepseek" => Ok(ProviderKind::Deepseek),
            other => Err(format!("unknown provider: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_url() {
        assert!(ProviderKind::ChatGpt.matches_url("https://chatgpt.com/c/abc"));
        assert!(ProviderKind::ChatGpt.matches_url("https://chat.openai.com/"));
        assert!(ProviderKind::Gemini.matches_url("https://gemini.google.com/app"));
        assert!(ProviderKind::Deepseek.matches_url("https://chat.deepseek.com/"));
        assert!(!ProviderKind::Gemini.matches_url("https://chatgpt.com/"));
        assert!(!ProviderKind::ChatGpt.matches_url("about:blank"));
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&ProviderKind::ChatGpt).unwrap(),
            "\"chatgpt\""
        );
        assert_eq!(
            serde_json::from_str::<ProviderKind>("\"deepseek\"").unwrap(),
            ProviderKind::Deepseek
        );
    }

    #[test]
    fn test_default_is_first_provider() {
        assert_eq!(ProviderKind::default(), ProviderKind::all()[0]);
    }
}
