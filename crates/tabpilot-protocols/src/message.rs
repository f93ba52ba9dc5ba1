//! The tagged cross-tab message protocol.
//!
//! Every message is a tagged object and every delivery expects an
//! acknowledgement carrying `received`. The action names mirror the
//! original wire contract between the two page endpoints and the
//! coordinating process.

use serde::{Deserialize, Serialize};

use crate::question::QuestionPayload;

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

/// A cross-tab relay message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum RelayMessage {
    /// Textbook page -> orchestrator: a question is ready to relay.
    #[serde(rename = "sendQuestionToChatGPT")]
    SendQuestion { question: QuestionPayload },

    /// Orchestrator -> assistant page: submit this question.
    ReceiveQuestion { question: QuestionPayload },

    /// Assistant page -> orchestrator: ChatGPT produced a reply.
    #[serde(rename = "chatGPTResponse")]
    ChatGptResponse { response: String },

    /// Assistant page -> orchestrator: Gemini produced a reply.
    GeminiResponse { response: String },

    /// Assistant page -> orchestrator: DeepSeek produced a reply.
    DeepseekResponse { response: String },

    /// Orchestrator -> textbook page: apply this reply.
    #[serde(rename = "processChatGPTResponse")]
    ProcessResponse { response: String },

    /// Show an alert on the textbook tab.
    AlertMessage { message: String },

    /// A page endpoint finished initializing.
    ContentScriptReady { url: String },

    /// Open the settings surface.
    OpenSettings,

    /// Settings changed the target subdomain.
    #[serde(rename_all = "camelCase")]
    UpdateWebsiteUrl { website_url: String },

    /// Liveness probe.
    Ping,
}

impl RelayMessage {
    /// Short action name for logging.
    pub fn action(&self) -> &'static str {
        match self {
            RelayMessage::SendQuestion { .. } => "sendQuestionToChatGPT",
            RelayMessage::ReceiveQuestion { .. } => "receiveQuestion",
            RelayMessage::ChatGptResponse { .. } => "chatGPTResponse",
            RelayMessage::GeminiResponse { .. } => "geminiResponse",
            RelayMessage::DeepseekResponse { .. } => "deepseekResponse",
            RelayMessage::ProcessResponse { .. } => "processChatGPTResponse",
            RelayMessage::AlertMessage { .. } => "alertMessage",
            RelayMessage::ContentScriptReady { .. } => "contentScriptReady",
            RelayMessage::OpenSettings => "openSettings",
            RelayMessage::UpdateWebsiteUrl { .. } => "updateWebsiteUrl",
            RelayMessage::Ping => "ping",
        }
    }

    /// The raw reply carried by any of the three provider response
    /// variants.
    pub fn provider_response(&self) -> Option<&str> {
        match self {
            RelayMessage::ChatGptResponse { response }
            | RelayMessage::GeminiResponse { response }
            | RelayMessage::DeepseekResponse { response } => Some(response),
            _ => None,
        }
    }
}

/// Delivery acknowledgement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub received: bool,
}

impl Ack {
    pub fn received() -> Self {
        Self { received: true }
    }

    pub fn rejected() -> Self {
        Self { received: false }
    }
}
