//! Reply observation cycle.
//!
//! AI replies stream into the page with no completion signal. The
//! cycle installs a page-side MutationObserver that bumps a revision
//! counter, then polls an idempotent "is the answer ready" predicate:
//! rescan the newest reply element, try to extract a parseable JSON
//! answer, and stop on the first success or the hard timeout.
//!
//! Single-shot by design: one cycle per submission, and starting a new
//! one tears down the previous page-side observer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use tabpilot_cdp::PageSession;
use tabpilot_protocols::{ProviderKind, RelayMessage};

use crate::{ProviderSelectors, extract};

/// Timing knobs for an observation cycle.
#[derive(Debug, Clone, Copy)]
pub struct ObservationConfig {
    /// Streamed partial text is not brace-sliced before this elapses.
    pub grace: Duration,
    /// Give up entirely after this. Not reported to the user.
    pub hard_timeout: Duration,
    /// Predicate poll interval.
    pub poll_interval: Duration,
    /// Run the predicate every Nth tick even without a mutation.
    pub fallback_every: u32,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(30),
            hard_timeout: Duration::from_secs(180),
            poll_interval: Duration::from_millis(500),
            fallback_every: 4,
        }
    }
}

/// Handle to a running observation cycle.
pub struct ObservationHandle {
    cancelled: Arc<AtomicBool>,
    task: tokio::task::JoinHandle<()>,
}

impl ObservationHandle {
    /// Stop the cycle. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// One scan of the newest reply element.
#[derive(Debug, Deserialize)]
struct ScanResult {
    count: u64,
    rev: u64,
    code: Option<String>,
    text: String,
}

/// Start observing for a reply on the assistant page.
pub fn start(
    session: Arc<PageSession>,
    kind: ProviderKind,
    selectors: &'static ProviderSelectors,
    events: mpsc::UnboundedSender<RelayMessage>,
    config: ObservationConfig,
) -> ObservationHandle {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = cancelled.clone();

    let task = tokio::spawn(async move {
        if let Err(e) = run_cycle(&session, kind, selectors, &events, config, &flag).await {
            warn!("{}: observation cycle failed: {}", kind, e);
        }
    });

    ObservationHandle { cancelled, task }
}

async fn run_cycle(
    session: &PageSession,
    kind: ProviderKind,
    selectors: &ProviderSelectors,
    events: &mpsc::UnboundedSender<RelayMessage>,
    config: ObservationConfig,
    cancelled: &AtomicBool,
) -> Result<(), tabpilot_cdp::CdpError> {
    install_observer(session).await?;

    // Pre-existing replies are the baseline; only newer ones count.
    let baseline = scan(session, selectors).await?.count;
    debug!("{}: observing replies (baseline {})", kind, baseline);

    let started = std::time::Instant::now();
    let mut last_rev = 0u64;
    let mut tick = 0u32;

    loop {
        tokio::time::sleep(config.poll_interval).await;
        tick = tick.wrapping_add(1);

        if cancelled.load(Ordering::SeqCst) {
            debug!("{}: observation cancelled", kind);
            return Ok(());
        }

        if started.elapsed() >= config.hard_timeout {
            // Abandoned silently; the user retries manually.
            warn!("{}: no parseable reply within {:?}", kind, config.hard_timeout);
            return Ok(());
        }

        let result = match scan(session, selectors).await {
            Ok(r) => r,
            Err(e) => {
                // Transient during provider-side navigation; keep trying
                // until the hard timeout decides.
                debug!("{}: scan failed, retrying: {}", kind, e);
                continue;
            }
        };

        let mutated = result.rev != last_rev;
        last_rev = result.rev;
        if !mutated && tick % config.fallback_every != 0 {
            continue;
        }

        if result.count <= baseline {
            continue;
        }

        let allow_fallback = started.elapsed() >= config.grace;
        if let Some((normalized, payload)) =
            extract::extract_reply(result.code.as_deref(), &result.text, allow_fallback)
        {
            info!(
                "{}: reply extracted after {:?} (answer: {})",
                kind,
                started.elapsed(),
                payload.answer.display()
            );
            let _ = events.send(kind.response_message(normalized));
            teardown_observer(session).await;
            return Ok(());
        }
    }
}

/// Install the page-side mutation observer, disconnecting any prior one.
async fn install_observer(session: &PageSession) -> Result<(), tabpilot_cdp::CdpError> {
    session
        .evaluate(
            "(() => { \
               if (window.__tabpilotObserver) { window.__tabpilotObserver.disconnect(); } \
               window.__tabpilotRev = 0; \
               window.__tabpilotObserver = new MutationObserver(() => { window.__tabpilotRev++; }); \
               window.__tabpilotObserver.observe(document.body, \
                 {childList: true, subtree: true, characterData: true}); \
               return true; \
             })()",
        )
        .await?;
    Ok(())
}

async fn teardown_observer(session: &PageSession) {
    let _ = session
        .evaluate(
            "(() => { \
               if (window.__tabpilotObserver) { \
                 window.__tabpilotObserver.disconnect(); \
                 window.__tabpilotObserver = null; \
               } \
               return true; \
             })()",
        )
        .await;
}

/// Rescan the newest reply element.
async fn scan(
    session: &PageSession,
    selectors: &ProviderSelectors,
) -> Result<ScanResult, tabpilot_cdp::CdpError> {
    let candidates = serde_json::to_string(selectors.replies)
        .unwrap_or_else(|_| "[]".to_string());
    let code_sel = tabpilot_cdp::js::quote(selectors.code_block);

    let expr = format!(
        "(() => {{ \
           const candidates = {candidates}; \
           const sel = candidates.find(s => document.querySelectorAll(s).length > 0) || candidates[0]; \
           const nodes = document.querySelectorAll(sel); \
           const last = nodes.length ? nodes[nodes.length - 1] : null; \
           const codeEl = last ? last.querySelector({code_sel}) : null; \
           return JSON.stringify({{ \
             count: nodes.length, \
             rev: window.__tabpilotRev || 0, \
             code: codeEl ? codeEl.textContent : null, \
             text: last ? last.textContent : '' \
           }}); \
         }})()"
    );

    let raw = session.evaluate_string(&expr).await?;
    serde_json::from_str(&raw).map_err(tabpilot_cdp::CdpError::from)
}
