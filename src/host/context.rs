use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::core::ViewId;

/// Host transition context handed to a run.
///
/// The host owns the container view and the final say over cancellation: the orchestrator reads
/// [`TransitionContext::was_cancelled`] at finalization instead of tracking it separately.
pub trait TransitionContext {
    /// Container view both screens are placed into for the duration of the run.
    fn container(&self) -> ViewId;

    /// Interactive progress changed.
    fn update_interactive(&mut self, _percent: f64) {}

    /// Interactive run is being committed.
    fn finish_interactive(&mut self) {}

    /// Interactive run is being rolled back. Afterwards [`Self::was_cancelled`] must return `true`.
    fn cancel_interactive(&mut self);

    /// Whether the run ended up cancelled.
    fn was_cancelled(&self) -> bool;

    /// Report the final outcome to the host.
    fn complete_transition(&mut self, success: bool);

    /// Remove the presented screen from presentation after a cancelled presentation.
    fn dismiss_presented(&mut self) {}
}

/// Everything a [`RecordingContext`] observed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContextLog {
    /// Progress values forwarded during interaction.
    pub updates: Vec<f64>,
    /// Number of `finish_interactive` calls.
    pub finishes: usize,
    /// Number of `cancel_interactive` calls.
    pub cancels: usize,
    /// Every `complete_transition` report, in order.
    pub completions: Vec<bool>,
    /// Number of `dismiss_presented` calls.
    pub dismissals: usize,
}

/// A plain [`TransitionContext`] that records what the orchestrator reported.
///
/// The log is shared, so callers keep a handle after moving the context into a run.
#[derive(Clone, Debug)]
pub struct RecordingContext {
    container: ViewId,
    cancelled: bool,
    log: Rc<RefCell<ContextLog>>,
}

impl RecordingContext {
    /// Create a context around `container`.
    pub fn new(container: ViewId) -> Self {
        Self {
            container,
            cancelled: false,
            log: Rc::default(),
        }
    }

    /// Mark the run as cancelled by the host, independent of any interaction.
    pub fn cancelled_by_host(mut self) -> Self {
        self.cancelled = true;
        self
    }

    /// Shared handle on the recorded log.
    pub fn log(&self) -> Rc<RefCell<ContextLog>> {
        Rc::clone(&self.log)
    }
}

impl TransitionContext for RecordingContext {
    fn container(&self) -> ViewId {
        self.container
    }

    fn update_interactive(&mut self, percent: f64) {
        self.log.borrow_mut().updates.push(percent);
    }

    fn finish_interactive(&mut self) {
        self.log.borrow_mut().finishes += 1;
    }

    fn cancel_interactive(&mut self) {
        self.cancelled = true;
        self.log.borrow_mut().cancels += 1;
    }

    fn was_cancelled(&self) -> bool {
        self.cancelled
    }

    fn complete_transition(&mut self, success: bool) {
        self.log.borrow_mut().completions.push(success);
    }

    fn dismiss_presented(&mut self) {
        self.log.borrow_mut().dismissals += 1;
    }
}
