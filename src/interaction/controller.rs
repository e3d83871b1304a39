//! Gesture-driven control of an orchestrator.

use crate::foundation::core::{Point, Size, Vec2};
use crate::foundation::error::SegueResult;
use crate::host::view::ViewHost;
use crate::orchestrator::orchestrator::OrchestratorHandle;

/// Progress below or at which a released gesture rolls back.
pub const DEFAULT_ROLLBACK: f64 = 0.3333;

/// Recognizer state of a continuous gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl GesturePhase {
    /// Return `true` for the phases that end a gesture.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }
}

/// One gesture update, in the coordinate space of the view the gesture is attached to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    pub phase: GesturePhase,
    /// Current touch location.
    pub location: Point,
    /// Translation since the gesture began.
    pub translation: Vec2,
    /// Velocity in points per second.
    pub velocity: Vec2,
    /// Size of the view the gesture is attached to.
    pub bounds: Size,
}

impl GestureSample {
    pub fn new(phase: GesturePhase, bounds: Size) -> Self {
        Self {
            phase,
            location: Point::ZERO,
            translation: Vec2::ZERO,
            velocity: Vec2::ZERO,
            bounds,
        }
    }

    pub fn at(mut self, location: Point) -> Self {
        self.location = location;
        self
    }

    pub fn moved(mut self, translation: Vec2) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }
}

/// Turns gesture samples into transition progress for one axis and direction.
pub trait InteractionStrategy {
    /// Capture whatever the percent computation needs (typically the distance left to travel).
    fn on_gesture_begin(&mut self, sample: &GestureSample, for_presentation: bool);

    /// Raw progress for `sample`; the controller clamps it to `[0, 1]`.
    fn compute_percent(&self, sample: &GestureSample, for_presentation: bool) -> f64;

    /// Whether a gesture may start an interactive presentation.
    fn should_begin_presentation(&self, sample: &GestureSample) -> bool;

    /// Whether a gesture may start an interactive dismissal.
    fn should_begin_dismissal(&self, sample: &GestureSample) -> bool;
}

/// Host action starting the run: "perform segue" for presentations, "dismiss" for dismissals.
///
/// The trigger is expected to call
/// [`TransitionOrchestrator::begin_transition`](crate::TransitionOrchestrator::begin_transition)
/// on the controlled orchestrator. It runs while the controller holds no borrow of it.
pub type TransitionTrigger = Box<dyn FnMut(&mut dyn ViewHost) -> SegueResult<()>>;

/// Drives an orchestrator from a continuous gesture.
pub struct InteractionController {
    orchestrator: OrchestratorHandle,
    trigger: TransitionTrigger,
    strategy: Box<dyn InteractionStrategy>,
    for_presentation: bool,
    rollback_threshold: f64,
    percent: f64,
    tracking: bool,
}

impl InteractionController {
    /// Controller that presents through `orchestrator` when a gesture begins.
    pub fn for_presentation(
        orchestrator: OrchestratorHandle,
        trigger: TransitionTrigger,
        strategy: impl InteractionStrategy + 'static,
    ) -> Self {
        Self::new(orchestrator, trigger, Box::new(strategy), true)
    }

    /// Controller that dismisses through `orchestrator`, the one that presented the screen.
    pub fn for_dismissal(
        orchestrator: OrchestratorHandle,
        trigger: TransitionTrigger,
        strategy: impl InteractionStrategy + 'static,
    ) -> Self {
        Self::new(orchestrator, trigger, Box::new(strategy), false)
    }

    fn new(
        orchestrator: OrchestratorHandle,
        trigger: TransitionTrigger,
        strategy: Box<dyn InteractionStrategy>,
        for_presentation: bool,
    ) -> Self {
        Self {
            orchestrator,
            trigger,
            strategy,
            for_presentation,
            rollback_threshold: DEFAULT_ROLLBACK,
            percent: 0.0,
            tracking: false,
        }
    }

    /// Override the rollback threshold; values are clamped to `[0, 1]`.
    pub fn rollback_threshold(mut self, threshold: f64) -> Self {
        self.rollback_threshold = if threshold.is_finite() {
            threshold.clamp(0.0, 1.0)
        } else {
            DEFAULT_ROLLBACK
        };
        self
    }

    pub fn threshold(&self) -> f64 {
        self.rollback_threshold
    }

    pub fn is_for_presentation(&self) -> bool {
        self.for_presentation
    }

    /// Last progress forwarded to the orchestrator.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Return `true` between a handled `Began` and the gesture's end.
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// Gesture recognition gate.
    pub fn should_begin(&self, sample: &GestureSample) -> bool {
        if self.for_presentation {
            self.strategy.should_begin_presentation(sample)
        } else {
            self.strategy.should_begin_dismissal(sample)
        }
    }

    fn percent_for(&self, sample: &GestureSample) -> f64 {
        let raw = self.strategy.compute_percent(sample, self.for_presentation);
        if raw.is_finite() {
            raw.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Feed one gesture sample.
    pub fn handle(&mut self, host: &mut dyn ViewHost, sample: GestureSample) -> SegueResult<()> {
        match sample.phase {
            GesturePhase::Possible => Ok(()),
            GesturePhase::Began => {
                self.orchestrator.borrow_mut().set_interactive(true);
                self.strategy
                    .on_gesture_begin(&sample, self.for_presentation);
                self.percent = 0.0;
                self.tracking = true;
                tracing::debug!(presentation = self.for_presentation, "interactive gesture began");
                if let Err(err) = (self.trigger)(host) {
                    self.tracking = false;
                    self.orchestrator.borrow_mut().set_interactive(false);
                    return Err(err);
                }
                Ok(())
            }
            GesturePhase::Changed => {
                if !self.tracking {
                    return Ok(());
                }
                self.percent = self.percent_for(&sample);
                self.orchestrator.borrow_mut().update(host, self.percent)
            }
            GesturePhase::Ended | GesturePhase::Cancelled | GesturePhase::Failed => {
                if !self.tracking {
                    return Ok(());
                }
                self.tracking = false;
                self.percent = self.percent_for(&sample);
                let mut orchestrator = self.orchestrator.borrow_mut();
                orchestrator.set_interactive(false);
                let commit = self.percent > self.rollback_threshold;
                tracing::debug!(
                    percent = self.percent,
                    threshold = self.rollback_threshold,
                    commit,
                    "interactive gesture released"
                );
                if commit {
                    orchestrator.finish(host)
                } else {
                    orchestrator.cancel(host)
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/controller.rs"]
mod tests;
