//! CDP page session for interacting with a single tab.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::SinkExt;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, trace};

use crate::client::{PendingRequest, WsSink};
use crate::error::CdpError;
use crate::js;
use crate::protocol::{CdpRequest, CdpResponse};

/// A session attached to a single page/target.
pub struct PageSession {
    /// Target ID.
    target_id: String,
    /// Session ID for this target.
    session_id: String,
    /// WebSocket sender (shared with client).
    ws_tx: Arc<tokio::sync::Mutex<WsSink>>,
    /// Pending requests (shared with client).
    pending: Arc<Mutex<HashMap<u64, PendingRequest>>>,
    /// Request ID counter (shared with client).
    request_id: Arc<AtomicU64>,
    /// Event receiver.
    #[allow(dead_code)]
    event_rx: mpsc::UnboundedReceiver<CdpResponse>,
}

impl PageSession {
    /// Create a new page session.
    pub(crate) fn new(
        target_id: String,
        session_id: String,
        ws_tx: Arc<tokio::sync::Mutex<WsSink>>,
        pending: Arc<Mutex<HashMap<u64, PendingRequest>>>,
        request_id: Arc<AtomicU64>,
        event_rx: mpsc::UnboundedReceiver<CdpResponse>,
    ) -> Self {
        Self {
            target_id,
            session_id,
            ws_tx,
            pending,
            request_id,
            event_rx,
        }
    }

    /// Get target ID.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Get session ID.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: Some(self.session_id.clone()),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP session send: {}", json);

        let (tx, rx) = tokio::sync::oneshot::channel();
        self.pending.lock().insert(id, PendingRequest { tx });

        {
            let mut ws = self.ws_tx.lock().await;
            ws.send(Message::Text(json.into())).await?;
        }

        match tokio::time::timeout(std::time::Duration::from_secs(30), rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }

    /// Enable required CDP domains.
    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    // ========================================================================
    // JavaScript Execution
    // ========================================================================

    /// Evaluate JavaScript expression.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            let text = exception["text"].as_str().unwrap_or("Unknown error");
            return Err(CdpError::JavaScript(text.to_string()));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Evaluate an expression expecting a boolean result.
    pub async fn evaluate_bool(&self, expression: &str) -> Result<bool, CdpError> {
        Ok(self.evaluate(expression).await?.as_bool().unwrap_or(false))
    }

    /// Evaluate an expression expecting a string result.
    pub async fn evaluate_string(&self, expression: &str) -> Result<String, CdpError> {
        Ok(self
            .evaluate(expression)
            .await?
            .as_str()
            .unwrap_or_default()
            .to_string())
    }

    // ========================================================================
    // Page State
    // ========================================================================

    /// Get current URL.
    pub async fn get_url(&self) -> Result<String, CdpError> {
        self.evaluate_string("window.location.href").await
    }

    /// Whether the document currently has input focus.
    pub async fn has_focus(&self) -> Result<bool, CdpError> {
        self.evaluate_bool("document.hasFocus()").await
    }

    /// Whether the page is loaded enough to drive.
    pub async fn is_ready(&self) -> Result<bool, CdpError> {
        let state = self.evaluate_string("document.readyState").await?;
        Ok(state == "complete" || state == "interactive")
    }

    /// Show a blocking alert dialog on the page.
    pub async fn alert(&self, message: &str) -> Result<(), CdpError> {
        // awaitPromise is off: alert() blocks the page until dismissed
        // and we must not block with it.
        self.call(
            "Runtime.evaluate",
            Some(json!({
                "expression": format!("setTimeout(() => alert({}), 0); true", js::quote(message)),
                "returnByValue": true,
            })),
        )
        .await?;
        Ok(())
    }

    // ========================================================================
    // DOM Operations
    // ========================================================================

    /// Whether a selector currently matches an element.
    pub async fn exists(&self, selector: &str) -> Result<bool, CdpError> {
        self.evaluate_bool(&format!(
            "!!document.querySelector({})",
            js::quote(selector)
        ))
        .await
    }

    /// Trimmed text content of the first match, or None.
    pub async fn text_of(&self, selector: &str) -> Result<Option<String>, CdpError> {
        let value = self
            .evaluate(&format!(
                "(() => {{ const el = document.querySelector({}); return el ? el.textContent.trim() : null; }})()",
                js::quote(selector)
            ))
            .await?;
        Ok(value.as_str().map(|s| s.to_string()))
    }

    /// Click the first element matching the selector.
    pub async fn click_selector(&self, selector: &str) -> Result<(), CdpError> {
        let clicked = self
            .evaluate_bool(&format!(
                "(() => {{ const el = document.querySelector({}); if (!el) return false; el.click(); return true; }})()",
                js::quote(selector)
            ))
            .await?;
        if !clicked {
            return Err(CdpError::ElementNotFound(selector.to_string()));
        }
        debug!("Clicked {}", selector);
        Ok(())
    }

    /// Focus the first element matching the selector.
    pub async fn focus_selector(&self, selector: &str) -> Result<(), CdpError> {
        let focused = self
            .evaluate_bool(&format!(
                "(() => {{ const el = document.querySelector({}); if (!el) return false; el.focus(); return true; }})()",
                js::quote(selector)
            ))
            .await?;
        if !focused {
            return Err(CdpError::ElementNotFound(selector.to_string()));
        }
        Ok(())
    }

    /// Insert text at the current focus point, as a user paste would.
    pub async fn insert_text(&self, text: &str) -> Result<(), CdpError> {
        self.call("Input.insertText", Some(json!({"text": text})))
            .await?;
        debug!("Inserted {} characters", text.len());
        Ok(())
    }

    // ========================================================================
    // Wait Operations
    // ========================================================================

    /// Wait for a selector to appear, polling every 100ms.
    pub async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: std::time::Duration,
    ) -> Result<(), CdpError> {
        let start = std::time::Instant::now();

        loop {
            if self.exists(selector).await? {
                return Ok(());
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout(format!(
                    "Waiting for selector '{}' timed out",
                    selector
                )));
            }

            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
    }

    /// Wait for a selector to match an enabled (non-disabled) element.
    pub async fn wait_for_enabled(
        &self,
        selector: &str,
        timeout: std::time::Duration,
    ) -> Result<(), CdpError> {
        let start = std::time::Instant::now();
        let expr = format!(
            "(() => {{ const el = document.querySelector({}); return !!el && !el.disabled && el.getAttribute('aria-disabled') !== 'true'; }})()",
            js::quote(selector)
        );

        loop {
            if self.evaluate_bool(&expr).await? {
                return Ok(());
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout(format!(
                    "Waiting for '{}' to enable timed out",
                    selector
                )));
            }

            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        }
    }
}
