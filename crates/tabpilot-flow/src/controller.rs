//! The per-question automation loop.
//!
//! One controller drives one textbook tab. Each cycle: detect the
//! page phase, extract the question, wait out the randomized delay,
//! relay the question, apply the returned answer, pass the confidence
//! gate, capture any correction, advance. The loop runs until the
//! automation flag clears or a bounded wait expires.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use tabpilot_cdp::{CdpError, PageSession};
use tabpilot_protocols::{AnswerPayload, CorrectionContext, QuestionKind, QuestionPayload, RelayMessage};

use crate::delay::{DelayOutcome, SkipSignal, pick_delay};
use crate::error::FlowError;
use crate::{apply, extract, grade, selectors};

/// Delay bounds for a controller, in seconds.
#[derive(Debug, Clone, Copy)]
pub struct FlowConfig {
    pub min_delay: u64,
    pub max_delay: u64,
}

/// External control surface for a running flow.
#[derive(Clone)]
pub struct FlowHandle {
    running: Arc<AtomicBool>,
    skip: SkipSignal,
}

impl FlowHandle {
    /// Request the loop stop at its next checkpoint.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// End the current pre-answer countdown early.
    pub fn skip_delay(&self) {
        self.skip.skip();
    }
}

pub struct FlowController {
    session: Arc<PageSession>,
    outbound: mpsc::UnboundedSender<RelayMessage>,
    answers: mpsc::UnboundedReceiver<AnswerPayload>,
    running: Arc<AtomicBool>,
    skip: SkipSignal,
    /// Correction from the previous question; one slot, overwritten or
    /// cleared after every graded answer.
    correction: Option<CorrectionContext>,
    config: FlowConfig,
}

impl FlowController {
    pub fn new(
        session: Arc<PageSession>,
        outbound: mpsc::UnboundedSender<RelayMessage>,
        answers: mpsc::UnboundedReceiver<AnswerPayload>,
        config: FlowConfig,
    ) -> (Self, FlowHandle) {
        let running = Arc::new(AtomicBool::new(true));
        let skip = SkipSignal::new();
        let handle = FlowHandle {
            running: running.clone(),
            skip: skip.clone(),
        };
        let controller = Self {
            session,
            outbound,
            answers,
            running,
            skip,
            correction: None,
            config,
        };
        (controller, handle)
    }

    /// Run until stopped or a bounded wait gives out.
    pub async fn run(mut self) {
        info!(
            "question flow started (delay {}..{}s)",
            self.config.min_delay, self.config.max_delay
        );

        while self.running.load(Ordering::SeqCst) {
            match self.step().await {
                Ok(()) => {}
                Err(FlowError::BoundedWaitTimeout(what)) => {
                    // Fatal and silent: diagnostics only, no page alert.
                    error!("automation halted: {}", what);
                    self.running.store(false, Ordering::SeqCst);
                }
                Err(FlowError::RelayClosed) => {
                    error!("relay channel closed; stopping flow");
                    self.running.store(false, Ordering::SeqCst);
                }
                Err(FlowError::Cdp(err)) => {
                    warn!("page interaction failed, retrying: {}", err);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                }
            }
        }

        info!("question flow stopped");
    }

    /// One pass through the phase machine.
    async fn step(&mut self) -> Result<(), FlowError> {
        if self.session.exists(selectors::TOPIC_CONTINUE).await? {
            debug!("topic overview; continuing");
            self.session.click_selector(selectors::TOPIC_CONTINUE).await?;
            tokio::time::sleep(Duration::from_millis(1500)).await;
            return Ok(());
        }

        if self.session.exists(selectors::FORCED_LEARNING).await? {
            return self.clear_forced_learning().await;
        }

        let Some(question) = extract::extract_question(&self.session).await? else {
            tokio::time::sleep(Duration::from_secs(1)).await;
            return Ok(());
        };

        let secs = pick_delay(self.config.min_delay, self.config.max_delay);
        if secs > 0 {
            match self.skip.countdown(secs).await {
                DelayOutcome::Elapsed => debug!("delay elapsed"),
                DelayOutcome::Skipped => debug!("delay skipped by user"),
            }
        }
        if !self.running.load(Ordering::SeqCst) {
            return Ok(());
        }

        let question = match self.correction.take() {
            Some(correction) => question.with_correction(correction),
            None => question,
        };

        // Drop any stale answer left over from an abandoned cycle.
        while self.answers.try_recv().is_ok() {}

        self.outbound
            .send(RelayMessage::SendQuestion {
                question: question.clone(),
            })
            .map_err(|_| FlowError::RelayClosed)?;
        info!("question relayed: {}", question.question);

        let Some(answer) = self.await_answer().await? else {
            return Ok(());
        };

        if !self.apply_answer(&question, &answer).await? {
            return Ok(());
        }

        tokio::time::sleep(Duration::from_millis(800)).await;
        grade::pass_confidence_gate(&self.session).await?;
        tokio::time::sleep(Duration::from_secs(1)).await;

        self.correction = grade::capture_correction(&self.session, &question).await?;

        grade::advance(&self.session).await?;
        tokio::time::sleep(Duration::from_millis(1500)).await;
        Ok(())
    }

    /// The three-click path out of a forced-learning interruption.
    /// Every wait is bounded; a stall here halts the session.
    async fn clear_forced_learning(&self) -> Result<(), FlowError> {
        info!("forced learning screen; stepping through");
        for (selector, what) in [
            (selectors::OPEN_READING, "open-reading control"),
            (selectors::READING_CONTINUE, "reading continue control"),
            (selectors::TO_QUESTIONS, "back-to-questions control"),
        ] {
            self.session
                .wait_for_enabled(selector, grade::GATE_TIMEOUT)
                .await
                .map_err(|_| FlowError::BoundedWaitTimeout(format!("{} never enabled", what)))?;
            self.session.click_selector(selector).await?;
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
        Ok(())
    }

    /// Wait for the relayed answer, checking the stop flag each second.
    async fn await_answer(&mut self) -> Result<Option<AnswerPayload>, FlowError> {
        loop {
            tokio::select! {
                answer = self.answers.recv() => {
                    return answer.map(Some).ok_or(FlowError::RelayClosed);
                }
                _ = tokio::time::sleep(Duration::from_secs(1)) => {
                    if !self.running.load(Ordering::SeqCst) {
                        return Ok(None);
                    }
                }
            }
        }
    }

    /// Apply the answer to the page. Returns false when the cycle
    /// should not proceed to grading (manual matching, or the answer
    /// could not be applied).
    async fn apply_answer(
        &mut self,
        question: &QuestionPayload,
        answer: &AnswerPayload,
    ) -> Result<bool, FlowError> {
        match question.kind {
            QuestionKind::Matching => {
                self.session.alert(&apply::matching_alert(&answer.answer)).await?;
                info!("matching question; waiting for manual entry");
                self.wait_for_question_change(&question.question).await?;
                Ok(false)
            }
            QuestionKind::FillInTheBlank => {
                match apply::fill_blanks(&self.session, &answer.answer.candidates()).await {
                    Ok(filled) => {
                        debug!("filled {} blanks", filled);
                        Ok(true)
                    }
                    Err(CdpError::ElementNotFound(_)) => {
                        self.abort_application("Could not find the blank inputs to fill.")
                            .await?;
                        Ok(false)
                    }
                    Err(err) => Err(err.into()),
                }
            }
            _ => {
                let options = extract::option_texts(&self.session).await?;
                let indices = apply::selection_indices(
                    &options,
                    &answer.answer,
                    question.kind.multi_answer(),
                );
                if indices.is_empty() {
                    self.abort_application(&format!(
                        "The assistant's answer \"{}\" did not match any option.",
                        answer.answer.display()
                    ))
                    .await?;
                    return Ok(false);
                }
                match apply::select_options(&self.session, &indices).await {
                    Ok(()) => Ok(true),
                    Err(CdpError::ElementNotFound(_)) => {
                        self.abort_application("Could not find the answer options to select.")
                            .await?;
                        Ok(false)
                    }
                    Err(err) => Err(err.into()),
                }
            }
        }
    }

    /// Alert the user and park until they move the page along.
    async fn abort_application(&mut self, message: &str) -> Result<(), FlowError> {
        warn!("answer application aborted: {}", message);
        self.session.alert(message).await?;
        let current = extract::extract_question(&self.session)
            .await?
            .map(|q| q.question);
        if let Some(current) = current {
            self.wait_for_question_change(&current).await?;
        }
        Ok(())
    }

    /// Poll until the on-screen question differs from `current`, the
    /// page leaves the question phase, or the flow stops.
    async fn wait_for_question_change(&self, current: &str) -> Result<(), FlowError> {
        loop {
            tokio::time::sleep(Duration::from_secs(2)).await;
            if !self.running.load(Ordering::SeqCst) {
                return Ok(());
            }
            match extract::extract_question(&self.session).await? {
                Some(question) if question.question == current => {}
                _ => return Ok(()),
            }
        }
    }
}
