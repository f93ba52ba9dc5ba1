//! Randomized, skippable pre-answer delay.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::Notify;
use tracing::info;

/// Pick a delay in seconds from the inclusive `[min, max]` range.
///
/// A min above max is clamped down to max. `(0, 0)` always yields 0,
/// which is how turbo mode suppresses the wait.
pub fn pick_delay(min: u64, max: u64) -> u64 {
    let min = min.min(max);
    if min == max {
        return min;
    }
    rand::thread_rng().gen_range(min..=max)
}

/// Outcome of a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayOutcome {
    Elapsed,
    Skipped,
}

/// Cloneable skip trigger for an in-progress countdown.
///
/// Skipping converges with natural expiry: both paths release the
/// same await exactly once, so the caller cannot double-fire.
#[derive(Clone, Default)]
pub struct SkipSignal {
    notify: Arc<Notify>,
}

impl SkipSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the current countdown end immediately.
    pub fn skip(&self) {
        self.notify.notify_one();
    }

    /// Count down `secs` seconds, logging each remaining second, until
    /// expiry or a skip, whichever comes first.
    pub async fn countdown(&self, secs: u64) -> DelayOutcome {
        // A skip left over from an earlier cycle is stale; drop it so
        // a stray keypress between questions cannot skip this one.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        if notified.as_mut().enable() {
            notified.set(self.notify.notified());
            notified.as_mut().enable();
        }

        for remaining in (1..=secs).rev() {
            info!("answering in {}s", remaining);
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(1)) => {}
                _ = notified.as_mut() => {
                    info!("delay skipped");
                    return DelayOutcome::Skipped;
                }
            }
        }
        DelayOutcome::Elapsed
    }
}

#[cfg(test)]
#[path = "delay_tests.rs"]
mod tests;
