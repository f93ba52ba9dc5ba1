//! The two concrete tab endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use tabpilot_cdp::{CdpError, PageSession};
use tabpilot_protocols::{Ack, AnswerPayload, RelayError, RelayMessage};
use tabpilot_providers::{ObservationHandle, ProviderAdapter, ProviderError};

use crate::messenger::TabEndpoint;

fn transport(err: CdpError) -> RelayError {
    RelayError::Transport(err.to_string())
}

/// The assistant chat tab: takes questions, emits provider responses
/// on the shared event channel once a reply settles.
pub struct AssistantEndpoint {
    session: Arc<PageSession>,
    adapter: Arc<dyn ProviderAdapter>,
    events: mpsc::UnboundedSender<RelayMessage>,
    /// At most one observation cycle lives at a time; starting a new
    /// one cancels its predecessor.
    observation: Mutex<Option<ObservationHandle>>,
}

impl AssistantEndpoint {
    pub fn new(
        session: Arc<PageSession>,
        adapter: Arc<dyn ProviderAdapter>,
        events: mpsc::UnboundedSender<RelayMessage>,
    ) -> Self {
        Self {
            session,
            adapter,
            events,
            observation: Mutex::new(None),
        }
    }

    /// Cancel the in-progress observation cycle, if any.
    pub fn cancel_observation(&self) {
        if let Some(handle) = self.observation.lock().take() {
            handle.cancel();
        }
    }
}

#[async_trait]
impl TabEndpoint for AssistantEndpoint {
    fn describe(&self) -> &'static str {
        "assistant tab"
    }

    async fn deliver(&self, message: &RelayMessage) -> Result<Ack, RelayError> {
        if !self.session.is_ready().await.map_err(transport)? {
            return Err(RelayError::NotReady("assistant page still loading".into()));
        }

        match message {
            RelayMessage::ReceiveQuestion { question } => {
                let prompt = self.adapter.compose_prompt(question);

                self.cancel_observation();

                match self.adapter.submit(&self.session, &prompt).await {
                    Ok(()) => {}
                    Err(ProviderError::InputNotFound(provider)) => {
                        // Usually the chat UI still rendering; worth a retry.
                        return Err(RelayError::NotReady(format!(
                            "{} input not found",
                            provider
                        )));
                    }
                    Err(ProviderError::SendButtonNotFound(provider)) => {
                        // The prompt is already in the input; a retry
                        // would resubmit it. Fail fast and alert.
                        return Err(RelayError::ElementNotFound(format!(
                            "{} send control",
                            provider
                        )));
                    }
                    Err(ProviderError::Cdp(err)) => return Err(transport(err)),
                }

                let handle = self
                    .adapter
                    .observe_reply(self.session.clone(), self.events.clone());
                *self.observation.lock() = Some(handle);

                info!("question submitted to {}", self.adapter.kind());
                Ok(Ack::received())
            }
            RelayMessage::Ping => Ok(Ack::received()),
            other => {
                warn!("assistant tab ignoring {}", other.action());
                Ok(Ack::received())
            }
        }
    }
}

/// The textbook tab: receives extracted answers and alerts.
pub struct TextbookEndpoint {
    session: Arc<PageSession>,
    answers: mpsc::UnboundedSender<AnswerPayload>,
}

impl TextbookEndpoint {
    pub fn new(session: Arc<PageSession>, answers: mpsc::UnboundedSender<AnswerPayload>) -> Self {
        Self { session, answers }
    }
}

#[async_trait]
impl TabEndpoint for TextbookEndpoint {
    fn describe(&self) -> &'static str {
        "textbook tab"
    }

    async fn deliver(&self, message: &RelayMessage) -> Result<Ack, RelayError> {
        if !self.session.is_ready().await.map_err(transport)? {
            return Err(RelayError::NotReady("textbook page still loading".into()));
        }

        match message {
            RelayMessage::ProcessResponse { response } => {
                match AnswerPayload::from_json_str(response) {
                    Some(answer) => {
                        debug!("answer routed to flow: {}", answer.answer.display());
                        // A closed flow just drops the answer.
                        let _ = self.answers.send(answer);
                    }
                    None => {
                        // Observation only emits parseable replies, so
                        // this is unexpected; retrying cannot fix it.
                        warn!("unusable response payload: {}", response);
                    }
                }
                Ok(Ack::received())
            }
            RelayMessage::AlertMessage { message } => {
                self.session.alert(message).await.map_err(transport)?;
                Ok(Ack::received())
            }
            RelayMessage::Ping => Ok(Ack::received()),
            other => {
                warn!("textbook tab ignoring {}", other.action());
                Ok(Ack::received())
            }
        }
    }
}
