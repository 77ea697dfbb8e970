/// Visibility reconciliation: hide every wanted region once it shows up
///
/// YouTube renders its sections asynchronously, so a single sweep is not
/// enough. A session sweeps the descriptor list, and as long as some
/// descriptor is not settled it asks to be polled again, until either every
/// wanted element is hidden or the timeout expires.
///
/// Session states:
/// - Pending → (incomplete pass) → Pending
/// - Pending → (complete pass) → Done(AllHidden)
/// - Pending → (timeout reached) → Done(TimedOut)
///
/// Done is terminal.

use crate::descriptor::TargetDescriptor;
use crate::dom::PageDom;
use core::time::Duration;

pub const RECONCILE_TIMEOUT: Duration = Duration::from_secs(10);
pub const RETRY_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconcileConfig {
    pub timeout: Duration,
    pub retry_delay: Duration,
}

impl ReconcileConfig {
    pub fn timeout_ms(&self) -> f64 {
        self.timeout.as_secs_f64() * 1000.0
    }

    pub fn retry_delay_ms(&self) -> u32 {
        u32::try_from(self.retry_delay.as_millis()).unwrap_or(u32::MAX)
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        ReconcileConfig {
            timeout: RECONCILE_TIMEOUT,
            retry_delay: RETRY_DELAY,
        }
    }
}

/// Why a session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    AllHidden,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Pending,
    Done(Completion),
}

/// Result of one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Schedule another pass after the back-off delay
    Retry,
    Done(Completion),
}

/// One reconciliation run over a snapshot of the descriptors
#[derive(Debug, Clone)]
pub struct ReconcileSession {
    descriptors: Vec<TargetDescriptor>,
    config: ReconcileConfig,
    started_at: Option<f64>,
    state: SessionState,
}

impl ReconcileSession {
    pub fn new(descriptors: Vec<TargetDescriptor>) -> ReconcileSession {
        ReconcileSession::with_config(descriptors, ReconcileConfig::default())
    }

    pub fn with_config(
        descriptors: Vec<TargetDescriptor>,
        config: ReconcileConfig,
    ) -> ReconcileSession {
        ReconcileSession {
            descriptors,
            config,
            started_at: None,
            state: SessionState::Pending,
        }
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn descriptors(&self) -> &[TargetDescriptor] {
        &self.descriptors
    }

    /// Run one pass at timestamp `now` (milliseconds, monotonic).
    ///
    /// The first call seeds the session start. A descriptor that is not
    /// wanted hidden counts as unsettled exactly like a missing element,
    /// so such sessions keep polling until the timeout.
    pub fn reconcile(&mut self, dom: &impl PageDom, now: f64) -> PassOutcome {
        if let SessionState::Done(completion) = self.state {
            return PassOutcome::Done(completion);
        }

        let start = *self.started_at.get_or_insert(now);
        if now - start >= self.config.timeout_ms() {
            log::debug!("Giving up after {} ms", now - start);
            return self.finish(Completion::TimedOut);
        }

        let mut retry = false;
        for descriptor in &self.descriptors {
            let selector = descriptor.selector;
            if descriptor.desired_hidden && dom.is_available(selector) {
                if !dom.is_hidden(selector) {
                    log::debug!("Hide {} with selector : {}", descriptor.id.as_str(), selector);
                    dom.hide(selector);
                }
            } else {
                log::debug!("Retry for element with selector : {}", selector);
                retry = true;
            }
        }

        if retry {
            log::debug!("Waiting for some elements. Retrying later.");
            PassOutcome::Retry
        } else {
            self.finish(Completion::AllHidden)
        }
    }

    fn finish(&mut self, completion: Completion) -> PassOutcome {
        self.state = SessionState::Done(completion);
        PassOutcome::Done(completion)
    }
}
