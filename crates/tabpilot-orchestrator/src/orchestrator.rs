//! The relay coordinator.
//!
//! Consumes the shared event channel: questions from the flow side,
//! provider responses from observation cycles, and alerts. One
//! question is in flight at a time; a reentrant question while one is
//! being relayed is a no-op.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use tabpilot_cdp::{CdpClient, CdpError, TabRegistry};
use tabpilot_protocols::{ProviderKind, QuestionPayload, RelayMessage};

use crate::error::OrchestratorError;
use crate::messenger::{self, TabEndpoint};

/// Brings a target's tab to the front.
///
/// Split from the CDP client so coordination logic tests without a
/// browser.
#[async_trait]
pub trait TargetActivator: Send + Sync {
    async fn activate(&self, target_id: &str) -> Result<(), CdpError>;
}

#[async_trait]
impl TargetActivator for CdpClient {
    async fn activate(&self, target_id: &str) -> Result<(), CdpError> {
        self.activate_target(target_id).await
    }
}

/// Settle time after raising a tab before driving it.
const FOCUS_SETTLE: Duration = Duration::from_millis(300);

/// How long the assistant tab keeps focus after a submission before
/// the textbook tab is raised again.
const REFOCUS_AFTER: Duration = Duration::from_millis(500);

pub struct Orchestrator {
    registry: Arc<Mutex<TabRegistry>>,
    activator: Arc<dyn TargetActivator>,
    textbook: Arc<dyn TabEndpoint>,
    assistant: Arc<dyn TabEndpoint>,
    provider: ProviderKind,
    in_flight: AtomicBool,
}

impl Orchestrator {
    pub fn new(
        registry: Arc<Mutex<TabRegistry>>,
        activator: Arc<dyn TargetActivator>,
        textbook: Arc<dyn TabEndpoint>,
        assistant: Arc<dyn TabEndpoint>,
        provider: ProviderKind,
    ) -> Self {
        Self {
            registry,
            activator,
            textbook,
            assistant,
            provider,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Drain the event channel until it closes.
    pub async fn run(self: Arc<Self>, mut events: mpsc::UnboundedReceiver<RelayMessage>) {
        info!("orchestrator running ({})", self.provider);

        while let Some(message) = events.recv().await {
            match message {
                RelayMessage::SendQuestion { question } => {
                    self.handle_question(question).await;
                }
                RelayMessage::ChatGptResponse { response }
                | RelayMessage::GeminiResponse { response }
                | RelayMessage::DeepseekResponse { response } => {
                    self.handle_response(response).await;
                }
                RelayMessage::AlertMessage { message } => {
                    if let Err(err) = messenger::send(
                        &*self.textbook,
                        &RelayMessage::AlertMessage { message },
                    )
                    .await
                    {
                        warn!("alert delivery failed: {}", err);
                    }
                }
                RelayMessage::ContentScriptReady { url } => {
                    debug!("endpoint ready: {}", url);
                }
                other => {
                    debug!("ignoring {}", other.action());
                }
            }
        }

        info!("event channel closed; orchestrator stopping");
    }

    /// Relay one question to the assistant tab.
    ///
    /// The in-flight guard makes a question arriving mid-relay a
    /// no-op, and it clears on every exit path.
    pub async fn handle_question(&self, question: QuestionPayload) {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("question dropped: relay already in flight");
            return;
        }

        if let Err(err) = self.relay_question(question).await {
            warn!("question relay failed: {}", err);
            self.alert_textbook(&format!(
                "Could not deliver the question to {}: {}",
                self.provider.display_name(),
                err
            ))
            .await;
        }

        self.in_flight.store(false, Ordering::SeqCst);
    }

    async fn relay_question(&self, question: QuestionPayload) -> Result<(), OrchestratorError> {
        let snapshot = self.registry.lock().snapshot();

        let Some(assistant) = snapshot.assistant else {
            // Exactly one alert, nothing sent anywhere else.
            info!("no {} tab open; aborting relay", self.provider);
            self.alert_textbook(&format!(
                "No {} tab is open. Open {} in another tab and keep it loaded.",
                self.provider.display_name(),
                self.provider.chat_url()
            ))
            .await;
            return Ok(());
        };

        // Focus gymnastics only matter when the tabs share a window;
        // separate windows stay where the user put them.
        if snapshot.same_window {
            self.activator.activate(&assistant.target_id).await?;
            tokio::time::sleep(FOCUS_SETTLE).await;
        }

        messenger::send(
            &*self.assistant,
            &RelayMessage::ReceiveQuestion { question },
        )
        .await?;

        if snapshot.same_window {
            tokio::time::sleep(REFOCUS_AFTER).await;
            if let Some(textbook) = snapshot.textbook {
                if let Err(err) = self.activator.activate(&textbook.target_id).await {
                    warn!("could not refocus textbook tab: {}", err);
                }
            }
        }

        Ok(())
    }

    /// Route an extracted reply back to the textbook tab.
    pub async fn handle_response(&self, response: String) {
        let snapshot = self.registry.lock().snapshot();

        if snapshot.textbook.is_none() {
            warn!("reply ready but no textbook tab is registered");
            return;
        }

        if snapshot.same_window {
            if let Some(textbook) = &snapshot.textbook {
                if let Err(err) = self.activator.activate(&textbook.target_id).await {
                    warn!("could not raise textbook tab: {}", err);
                }
            }
        }

        if let Err(err) = messenger::send(
            &*self.textbook,
            &RelayMessage::ProcessResponse { response },
        )
        .await
        {
            warn!("response delivery failed: {}", err);
        }
    }

    async fn alert_textbook(&self, message: &str) {
        if let Err(err) = messenger::send(
            &*self.textbook,
            &RelayMessage::AlertMessage {
                message: message.to_string(),
            },
        )
        .await
        {
            warn!("alert delivery failed: {}", err);
        }
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
