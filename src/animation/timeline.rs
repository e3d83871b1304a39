//! The shared transition timeline.
//!
//! Behaviours register property changes against one [`Timeline`] per run. The timeline then plays
//! in one of two modes:
//!
//! - **timed**: the host advances wall-clock time with [`Timeline::advance`]; each entry
//!   interpolates inside its own `(delay, duration)` window and completes when its window ends;
//! - **interactive**: the host scrubs progress directly with [`Timeline::scrub`]; nothing
//!   completes until [`Timeline::settle`] turns the scrub into a run-to-completion towards the
//!   committed or the rolled-back end.
//!
//! Completion is reported per behaviour slot, as [`CompletionToken`]s queued for the orchestrator
//! to drain. Every slot signals exactly once, including slots with no entries.

use std::collections::VecDeque;

use crate::animation::curve::{AnimationCurve, SpringParams};
use crate::animation::timing::AbsoluteWindow;
use crate::foundation::core::{Affine, RunId, ViewId, lerp_affine};
use crate::host::view::ViewHost;

/// Target value of one animated view property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimatedProperty {
    /// View opacity.
    Alpha(f64),
    /// View paint-time transform.
    Transform(Affine),
}

impl AnimatedProperty {
    fn kind(self) -> PropertyKind {
        match self {
            Self::Alpha(_) => PropertyKind::Alpha,
            Self::Transform(_) => PropertyKind::Transform,
        }
    }

    fn lerp(self, to: Self, t: f64) -> Self {
        match (self, to) {
            (Self::Alpha(a), Self::Alpha(b)) => Self::Alpha(a + (b - a) * t),
            (Self::Transform(a), Self::Transform(b)) => Self::Transform(lerp_affine(a, b, t)),
            // Mixed kinds never share a track.
            _ => to,
        }
    }

    fn read(kind: PropertyKind, host: &dyn ViewHost, view: ViewId) -> Option<Self> {
        match kind {
            PropertyKind::Alpha => host.alpha(view).map(Self::Alpha),
            PropertyKind::Transform => host.transform(view).map(Self::Transform),
        }
    }

    fn write(self, host: &mut dyn ViewHost, view: ViewId) {
        match self {
            Self::Alpha(a) => host.set_alpha(view, a),
            Self::Transform(t) => host.set_transform(view, t),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PropertyKind {
    Alpha,
    Transform,
}

/// One view property change, animated from its value at registration time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropertyChange {
    /// View to animate.
    pub view: ViewId,
    /// Value at the end of the animation.
    pub target: AnimatedProperty,
}

impl PropertyChange {
    /// Animate the opacity of `view` to `alpha`.
    pub fn alpha(view: ViewId, alpha: f64) -> Self {
        Self {
            view,
            target: AnimatedProperty::Alpha(alpha),
        }
    }

    /// Animate the transform of `view` to `transform`.
    pub fn transform(view: ViewId, transform: Affine) -> Self {
        Self {
            view,
            target: AnimatedProperty::Transform(transform),
        }
    }
}

/// Completion message posted when every animation of one behaviour slot has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CompletionToken {
    /// Run the slot belongs to.
    pub run: RunId,
    /// Index of the behaviour within the run.
    pub slot: usize,
}

/// How a run is played back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackMode {
    /// Wall-clock playback driven by [`Timeline::advance`].
    Timed,
    /// Progress driven by [`Timeline::scrub`] until [`Timeline::settle`].
    Interactive,
}

/// Which end of the timeline won.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimelineOutcome {
    /// Played to the end.
    Committed,
    /// Rolled back to the start.
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Playback {
    Pending,
    Timed {
        elapsed: f64,
    },
    Scrubbing {
        progress: f64,
    },
    Settling {
        from: f64,
        to: f64,
        elapsed: f64,
        duration: f64,
    },
    Settled {
        outcome: TimelineOutcome,
    },
}

#[derive(Clone, Copy, Debug)]
struct Track {
    view: ViewId,
    from: AnimatedProperty,
    to: AnimatedProperty,
}

#[derive(Clone, Debug)]
struct Entry {
    slot: usize,
    window: AbsoluteWindow,
    curve: AnimationCurve,
    spring: Option<SpringParams>,
    tracks: Vec<Track>,
    done: bool,
}

impl Entry {
    fn local_progress(&self, time: f64) -> f64 {
        if self.window.duration <= 0.0 {
            return if time >= self.window.delay { 1.0 } else { 0.0 };
        }
        ((time - self.window.delay) / self.window.duration).clamp(0.0, 1.0)
    }

    fn eased(&self, t: f64) -> f64 {
        match self.spring {
            Some(spring) => spring.apply(t),
            None => self.curve.apply(t),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct SlotState {
    pending: usize,
    signalled: bool,
}

/// Shared animation timeline of one transition run.
#[derive(Debug)]
pub struct Timeline {
    run: RunId,
    total: f64,
    entries: Vec<Entry>,
    slots: Vec<SlotState>,
    playback: Playback,
    events: VecDeque<CompletionToken>,
}

impl Timeline {
    /// Create an empty timeline for `run`, `total_secs` long.
    pub fn new(run: RunId, total_secs: f64) -> Self {
        let total = if total_secs.is_finite() {
            total_secs.max(0.0)
        } else {
            0.0
        };
        Self {
            run,
            total,
            entries: Vec::new(),
            slots: Vec::new(),
            playback: Playback::Pending,
            events: VecDeque::new(),
        }
    }

    /// Total duration in seconds.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Run this timeline belongs to.
    pub fn run(&self) -> RunId {
        self.run
    }

    /// Declare a behaviour slot. Slots with no entries still signal completion once.
    pub fn open_slot(&mut self, slot: usize) {
        if self.slots.len() <= slot {
            self.slots.resize(slot + 1, SlotState::default());
        }
    }

    /// Number of registered entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Absolute windows registered for `slot`, in registration order.
    pub fn windows_for(&self, slot: usize) -> Vec<AbsoluteWindow> {
        self.entries
            .iter()
            .filter(|e| e.slot == slot)
            .map(|e| e.window)
            .collect()
    }

    /// Register an animation of `changes` inside `window`.
    ///
    /// Start values are read from the host now, or taken from the end value of an earlier entry on
    /// the same property that finishes before this one starts. Changes on unknown views are
    /// dropped.
    pub fn add(
        &mut self,
        host: &dyn ViewHost,
        slot: usize,
        window: AbsoluteWindow,
        curve: AnimationCurve,
        spring: Option<SpringParams>,
        changes: impl IntoIterator<Item = PropertyChange>,
    ) {
        if !matches!(self.playback, Playback::Pending) {
            tracing::warn!(slot, "ignoring animation registered after playback started");
            return;
        }
        self.open_slot(slot);

        let window = AbsoluteWindow {
            delay: window.delay.max(0.0),
            duration: window.duration.max(0.0),
        };
        let mut tracks = Vec::new();
        for change in changes {
            let kind = change.target.kind();
            let Some(from) = self
                .chained_start(change.view, kind, window.delay)
                .or_else(|| AnimatedProperty::read(kind, host, change.view))
            else {
                tracing::debug!(view = ?change.view, "dropping change on unknown view");
                continue;
            };
            tracks.push(Track {
                view: change.view,
                from,
                to: change.target,
            });
        }

        self.slots[slot].pending += 1;
        self.entries.push(Entry {
            slot,
            window,
            curve,
            spring,
            tracks,
            done: false,
        });
    }

    fn chained_start(
        &self,
        view: ViewId,
        kind: PropertyKind,
        delay: f64,
    ) -> Option<AnimatedProperty> {
        self.entries
            .iter()
            .filter(|e| e.window.end() <= delay)
            .flat_map(|e| e.tracks.iter().map(move |t| (e.window.end(), t)))
            .filter(|(_, t)| t.view == view && t.to.kind() == kind)
            .max_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, t)| t.to)
    }

    /// Start playback. Timed runs complete zero-length entries (and empty slots) immediately.
    pub fn start(&mut self, mode: PlaybackMode, host: &mut dyn ViewHost) {
        if !matches!(self.playback, Playback::Pending) {
            return;
        }
        match mode {
            PlaybackMode::Timed => {
                self.playback = Playback::Timed { elapsed: 0.0 };
                self.step_timed(0.0, host);
            }
            PlaybackMode::Interactive => {
                self.playback = Playback::Scrubbing { progress: 0.0 };
            }
        }
    }

    /// Advance timed playback, or an in-flight settle, by `dt` seconds.
    pub fn advance(&mut self, dt: f64, host: &mut dyn ViewHost) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        match self.playback {
            Playback::Timed { elapsed } => self.step_timed(elapsed + dt, host),
            Playback::Settling {
                from,
                to,
                elapsed,
                duration,
            } => {
                let elapsed = elapsed + dt;
                if elapsed >= duration {
                    self.finish_settle(to, host);
                } else {
                    let progress = from + (to - from) * (elapsed / duration);
                    self.apply_at(progress * self.total, host);
                    self.playback = Playback::Settling {
                        from,
                        to,
                        elapsed,
                        duration,
                    };
                }
            }
            Playback::Pending | Playback::Scrubbing { .. } | Playback::Settled { .. } => {}
        }
    }

    /// Scrub an interactive timeline to `progress` in `[0, 1]`. Never completes anything.
    pub fn scrub(&mut self, progress: f64, host: &mut dyn ViewHost) -> bool {
        let Playback::Scrubbing { .. } = self.playback else {
            return false;
        };
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.playback = Playback::Scrubbing { progress };
        self.apply_at(progress * self.total, host);
        true
    }

    /// Turn an interactive scrub into a run-to-completion towards the end (`commit`) or back to
    /// the start. The remaining fraction of the total duration is used for the settle animation.
    pub fn settle(&mut self, commit: bool, host: &mut dyn ViewHost) -> bool {
        let Playback::Scrubbing { progress } = self.playback else {
            return false;
        };
        let to = if commit { 1.0 } else { 0.0 };
        let duration = self.total * (to - progress).abs();
        if duration <= 0.0 {
            self.finish_settle(to, host);
        } else {
            self.playback = Playback::Settling {
                from: progress,
                to,
                elapsed: 0.0,
                duration,
            };
        }
        true
    }

    /// Current progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        match self.playback {
            Playback::Pending => 0.0,
            Playback::Timed { elapsed } => {
                if self.total <= 0.0 {
                    1.0
                } else {
                    (elapsed / self.total).min(1.0)
                }
            }
            Playback::Scrubbing { progress } => progress,
            Playback::Settling {
                from,
                to,
                elapsed,
                duration,
            } => from + (to - from) * (elapsed / duration).min(1.0),
            Playback::Settled { outcome } => match outcome {
                TimelineOutcome::Committed => 1.0,
                TimelineOutcome::Cancelled => 0.0,
            },
        }
    }

    /// Which end won, once that is decided.
    ///
    /// Timed playback always commits; interactive playback is undecided until [`Self::settle`].
    pub fn outcome(&self) -> Option<TimelineOutcome> {
        match self.playback {
            Playback::Timed { .. } => Some(TimelineOutcome::Committed),
            Playback::Settling { to, .. } => Some(if to >= 1.0 {
                TimelineOutcome::Committed
            } else {
                TimelineOutcome::Cancelled
            }),
            Playback::Settled { outcome } => Some(outcome),
            Playback::Pending | Playback::Scrubbing { .. } => None,
        }
    }

    /// Return `true` while scrubbing is allowed.
    pub fn is_scrubbing(&self) -> bool {
        matches!(self.playback, Playback::Scrubbing { .. })
    }

    /// Pop the next queued completion.
    pub fn next_completion(&mut self) -> Option<CompletionToken> {
        self.events.pop_front()
    }

    fn step_timed(&mut self, elapsed: f64, host: &mut dyn ViewHost) {
        self.playback = Playback::Timed { elapsed };
        self.apply_at(elapsed, host);
        let mut finished = Vec::new();
        for entry in self.entries.iter_mut().filter(|e| !e.done) {
            if entry.window.end() <= elapsed {
                entry.done = true;
                finished.push(entry.slot);
            }
        }
        for slot in finished {
            if let Some(state) = self.slots.get_mut(slot) {
                state.pending = state.pending.saturating_sub(1);
            }
        }
        self.signal_ready_slots();
    }

    fn finish_settle(&mut self, to: f64, host: &mut dyn ViewHost) {
        let outcome = if to >= 1.0 {
            TimelineOutcome::Committed
        } else {
            TimelineOutcome::Cancelled
        };
        self.apply_final(outcome, host);
        for entry in &mut self.entries {
            entry.done = true;
        }
        for state in &mut self.slots {
            state.pending = 0;
        }
        self.playback = Playback::Settled { outcome };
        self.signal_ready_slots();
    }

    fn signal_ready_slots(&mut self) {
        for (slot, state) in self.slots.iter_mut().enumerate() {
            if state.pending == 0 && !state.signalled {
                state.signalled = true;
                self.events.push_back(CompletionToken {
                    run: self.run,
                    slot,
                });
            }
        }
    }

    /// Apply every property at absolute `time`.
    ///
    /// Per view property, the latest entry that has started wins; before any entry started, the
    /// earliest entry's start value holds.
    fn apply_at(&self, time: f64, host: &mut dyn ViewHost) {
        let mut order: Vec<&Entry> = self.entries.iter().collect();
        order.sort_by(|a, b| a.window.delay.total_cmp(&b.window.delay));

        let mut resolved: Vec<(ViewId, PropertyKind, AnimatedProperty)> = Vec::new();
        for entry in order {
            let started = time >= entry.window.delay;
            let progress = entry.local_progress(time);
            let t = entry.eased(progress);
            for track in &entry.tracks {
                let kind = track.to.kind();
                let value = if !started {
                    track.from
                } else if progress >= 1.0 {
                    track.to
                } else {
                    track.from.lerp(track.to, t)
                };
                match resolved
                    .iter_mut()
                    .find(|(v, k, _)| *v == track.view && *k == kind)
                {
                    // Entries are sorted by delay, so an unstarted entry never overrides.
                    Some(existing) if started => existing.2 = value,
                    Some(_) => {}
                    None => resolved.push((track.view, kind, value)),
                }
            }
        }
        for (view, _, value) in resolved {
            value.write(host, view);
        }
    }

    fn apply_final(&self, outcome: TimelineOutcome, host: &mut dyn ViewHost) {
        match outcome {
            TimelineOutcome::Committed => self.apply_at(f64::INFINITY, host),
            TimelineOutcome::Cancelled => self.apply_at(f64::NEG_INFINITY, host),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
