//! Relative timing windows.
//!
//! Every behaviour owns a window `[start, start + duration]` expressed as a fraction of the whole
//! transition. Animations scheduled by the behaviour use a second window, relative to the
//! behaviour's own window. [`BehaviourTiming::resolve`] composes the two into one window of the
//! transition, optionally mirrored for dismissals, and [`RelativeWindow::to_absolute`] turns that
//! into a `(delay, duration)` pair in seconds.

use crate::animation::curve::{AnimationCurve, SpringParams};
use crate::foundation::error::{SegueError, SegueResult};

/// A `[start, start + duration]` window inside `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RelativeWindow {
    /// Window start as a fraction of the enclosing span.
    pub start: f64,
    /// Window length as a fraction of the enclosing span.
    pub duration: f64,
}

impl RelativeWindow {
    /// The whole enclosing span.
    pub const FULL: Self = Self {
        start: 0.0,
        duration: 1.0,
    };

    /// Create a window without clamping.
    pub fn new(start: f64, duration: f64) -> Self {
        Self { start, duration }
    }

    /// Clamp `start` into `[0, 1]` and `duration` so the window never extends past `1`.
    ///
    /// Non-finite values collapse to the empty window at `0`.
    pub fn clamped(self) -> Self {
        let start = clamp_unit(self.start);
        let duration = clamp_unit(self.duration).min(1.0 - start);
        Self { start, duration }
    }

    /// End of the window.
    pub fn end(self) -> f64 {
        self.start + self.duration
    }

    /// Scale this window by a total transition duration in seconds.
    pub fn to_absolute(self, total_secs: f64) -> AbsoluteWindow {
        let total = if total_secs.is_finite() {
            total_secs.max(0.0)
        } else {
            0.0
        };
        AbsoluteWindow {
            delay: self.start * total,
            duration: self.duration * total,
        }
    }
}

impl Default for RelativeWindow {
    fn default() -> Self {
        Self::FULL
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

/// A `(delay, duration)` pair in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AbsoluteWindow {
    /// Delay from the start of the transition, in seconds.
    pub delay: f64,
    /// Length of the animation, in seconds.
    pub duration: f64,
}

impl AbsoluteWindow {
    /// Create a window in seconds.
    pub fn new(delay: f64, duration: f64) -> Self {
        Self { delay, duration }
    }

    /// Time at which the animation finishes.
    pub fn end(self) -> f64 {
        self.delay + self.duration
    }
}

/// Timing attributes every behaviour carries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BehaviourTiming {
    /// Behaviour window relative to the whole transition.
    pub window: RelativeWindow,
    /// Mirror the window around the timeline midpoint when dismissing.
    pub reverse_on_dismissal: bool,
    /// Easing curve used for the behaviour's animations.
    pub curve: AnimationCurve,
    /// Optional spring passed through instead of the curve.
    pub spring: Option<SpringParams>,
}

impl Default for BehaviourTiming {
    fn default() -> Self {
        Self {
            window: RelativeWindow::FULL,
            reverse_on_dismissal: false,
            curve: AnimationCurve::EaseInOut,
            spring: None,
        }
    }
}

impl BehaviourTiming {
    /// Validate user-provided timing values.
    pub fn validate(&self) -> SegueResult<()> {
        let RelativeWindow { start, duration } = self.window;
        if !start.is_finite() || !(0.0..=1.0).contains(&start) {
            return Err(SegueError::validation(
                "relative_start must be finite and within [0, 1]",
            ));
        }
        if !duration.is_finite() || !(0.0..=1.0).contains(&duration) {
            return Err(SegueError::validation(
                "relative_duration must be finite and within [0, 1]",
            ));
        }
        if let Some(spring) = self.spring
            && (!spring.damping.is_finite()
                || spring.damping <= 0.0
                || !spring.initial_velocity.is_finite())
        {
            return Err(SegueError::validation(
                "spring damping must be > 0 and spring values finite",
            ));
        }
        Ok(())
    }

    /// Compose an animation-local window with this behaviour's window.
    ///
    /// The result never starts before nor ends after the behaviour window. When
    /// `reverse_on_dismissal` is set and the run is a dismissal, the forward window is mirrored so
    /// that a fade-in over `[0, 0.25]` plays as a fade-out over `[0.75, 1]`.
    pub fn resolve(&self, local: RelativeWindow, presenting: bool) -> RelativeWindow {
        let b = self.window.clamped();
        let a = local.clamped();

        let forward_start = b.start + a.start * b.duration;
        let forward_duration = (b.duration * a.duration).min(b.duration);
        let forward_finish = b.end() * a.end();

        if self.reverse_on_dismissal && !presenting {
            RelativeWindow {
                start: 1.0 - forward_finish,
                duration: forward_duration.min(1.0 - forward_start),
            }
        } else {
            RelativeWindow {
                start: forward_start,
                duration: forward_duration,
            }
        }
    }

    /// [`Self::resolve`] followed by [`RelativeWindow::to_absolute`].
    pub fn schedule(
        &self,
        local: RelativeWindow,
        presenting: bool,
        total_secs: f64,
    ) -> AbsoluteWindow {
        self.resolve(local, presenting).to_absolute(total_secs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timing.rs"]
mod tests;
