//! The transition state machine.
//!
//! A [`TransitionOrchestrator`] runs one transition at a time:
//! `Idle -> Resolving -> Animating -> Finalizing -> Idle`. It resolves the behaviours both screens
//! declare for its transition identifier, pairs them, places the screens in the host container,
//! plays the shared [`Timeline`] and finalizes exactly once when every behaviour slot reported
//! completion.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::animation::timeline::{CompletionToken, PlaybackMode, Timeline, TimelineOutcome};
use crate::behaviour::behaviour::{BehaviourHandle, RunInfo};
use crate::behaviour::collection::behaviours_for;
use crate::behaviour::linker::{link, unlinked_destinations};
use crate::foundation::core::{RunId, TransitionDirection, ViewId};
use crate::foundation::error::{SegueError, SegueResult};
use crate::host::context::TransitionContext;
use crate::host::view::ViewHost;
use crate::screen::{LifecycleEvent, ScreenRef, dispatch_lifecycle};

/// Shared handle on an orchestrator, as held by routers and interaction controllers.
pub type OrchestratorHandle = Rc<RefCell<TransitionOrchestrator>>;

/// Default transition duration in seconds.
pub const DEFAULT_DURATION: f64 = 0.5;

/// Static configuration of one transition.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionConfig {
    /// Selects the behaviour collections taking part.
    pub transition_identifier: String,
    /// Segue this transition is attached to, for routing.
    pub segue_identifier: String,
    /// Total duration in seconds.
    pub duration: f64,
}

impl TransitionConfig {
    pub fn new(transition_identifier: impl Into<String>) -> Self {
        Self {
            transition_identifier: transition_identifier.into(),
            segue_identifier: String::new(),
            duration: DEFAULT_DURATION,
        }
    }

    pub fn segue(mut self, segue_identifier: impl Into<String>) -> Self {
        self.segue_identifier = segue_identifier.into();
        self
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.duration = secs;
        self
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::new("")
    }
}

/// Everything a run needs from the host.
///
/// `source` is always the presenting-side screen and `destination` the presented-side screen,
/// whatever the direction.
pub struct TransitionRequest {
    pub direction: TransitionDirection,
    pub source: ScreenRef,
    pub destination: ScreenRef,
    pub context: Box<dyn TransitionContext>,
}

impl TransitionRequest {
    pub fn present(
        source: ScreenRef,
        destination: ScreenRef,
        context: impl TransitionContext + 'static,
    ) -> Self {
        Self {
            direction: TransitionDirection::Present,
            source,
            destination,
            context: Box::new(context),
        }
    }

    pub fn dismiss(
        source: ScreenRef,
        destination: ScreenRef,
        context: impl TransitionContext + 'static,
    ) -> Self {
        Self {
            direction: TransitionDirection::Dismiss,
            source,
            destination,
            context: Box::new(context),
        }
    }
}

impl fmt::Debug for TransitionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRequest")
            .field("direction", &self.direction)
            .field("source_root", &self.source.root_view())
            .field("destination_root", &self.destination.root_view())
            .finish()
    }
}

/// Orchestrator state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Resolving,
    Animating,
    Finalizing,
}

/// How the last run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionOutcome {
    pub run: RunId,
    pub direction: TransitionDirection,
    pub cancelled: bool,
    /// Value passed to every behaviour's completion.
    pub presented: bool,
    /// Number of behaviours that took part.
    pub behaviours: usize,
}

struct ActiveRun {
    id: RunId,
    direction: TransitionDirection,
    interactive: bool,
    source: ScreenRef,
    destination: ScreenRef,
    context: Box<dyn TransitionContext>,
    behaviours: Vec<BehaviourHandle>,
    completed: Vec<bool>,
    completed_count: usize,
    timeline: Timeline,
}

impl ActiveRun {
    /// Screen being left and screen being revealed.
    fn from_to(&self) -> (&ScreenRef, &ScreenRef) {
        if self.direction.is_presenting() {
            (&self.source, &self.destination)
        } else {
            (&self.destination, &self.source)
        }
    }

    fn is_complete(&self) -> bool {
        self.completed_count == self.behaviours.len() && self.timeline.outcome().is_some()
    }
}

/// Drives behaviour-based transitions between two screens.
pub struct TransitionOrchestrator {
    config: TransitionConfig,
    is_interactive: bool,
    phase: Phase,
    run: Option<ActiveRun>,
    source_anchor: Option<ViewId>,
    last_run: RunId,
    last_outcome: Option<TransitionOutcome>,
}

impl TransitionOrchestrator {
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            config,
            is_interactive: false,
            phase: Phase::Idle,
            run: None,
            source_anchor: None,
            last_run: RunId::default(),
            last_outcome: None,
        }
    }

    /// Wrap into a shared handle.
    pub fn into_handle(self) -> OrchestratorHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    pub fn transition_identifier(&self) -> &str {
        &self.config.transition_identifier
    }

    pub fn segue_identifier(&self) -> &str {
        &self.config.segue_identifier
    }

    /// Whether the next run is driven interactively.
    pub fn is_interactive(&self) -> bool {
        self.is_interactive
    }

    /// Request interactive (or timed) playback for the next run. A run already in flight keeps the
    /// mode it started with.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.is_interactive = interactive;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Return `true` between `begin_transition` and finalization.
    pub fn is_running(&self) -> bool {
        self.run.is_some()
    }

    /// Original parent of the source root, captured when the last presentation began.
    pub fn source_anchor(&self) -> Option<ViewId> {
        self.source_anchor
    }

    /// Outcome of the last finalized run.
    pub fn last_outcome(&self) -> Option<TransitionOutcome> {
        self.last_outcome
    }

    /// Progress of the running timeline in `[0, 1]`.
    pub fn progress(&self) -> Option<f64> {
        self.run.as_ref().map(|r| r.timeline.progress())
    }

    /// Behaviour slots that reported completion in the running run.
    pub fn completed_count(&self) -> usize {
        self.run.as_ref().map_or(0, |r| r.completed_count)
    }

    /// Behaviours of the running run, sources first.
    pub fn running_behaviours(&self) -> &[BehaviourHandle] {
        self.run.as_ref().map_or(&[], |r| r.behaviours.as_slice())
    }

    /// Start a run.
    ///
    /// Fails with [`SegueError::RunInProgress`] while an earlier run has not finalized. Timed runs
    /// whose behaviours have nothing to animate finalize before this returns.
    #[tracing::instrument(
        skip_all,
        fields(transition = %self.config.transition_identifier, direction = ?request.direction)
    )]
    pub fn begin_transition(
        &mut self,
        host: &mut dyn ViewHost,
        request: TransitionRequest,
    ) -> SegueResult<()> {
        if self.run.is_some() {
            return Err(SegueError::run_in_progress(
                self.config.transition_identifier.clone(),
            ));
        }
        self.phase = Phase::Resolving;

        let TransitionRequest {
            direction,
            source,
            destination,
            context,
        } = request;
        let transition = self.config.transition_identifier.clone();
        let presenting = direction.is_presenting();
        let interactive = self.is_interactive;

        let (from, to) = if presenting {
            (&source, &destination)
        } else {
            (&destination, &source)
        };
        dispatch_lifecycle(from.as_ref(), LifecycleEvent::WillDisappear, &transition);
        dispatch_lifecycle(to.as_ref(), LifecycleEvent::WillAppear, &transition);

        let mut seen = Vec::new();
        let source_behaviours = first_occurrences(
            behaviours_for(source.behaviour_collections(), &transition),
            &mut seen,
            "source",
        );
        let destination_behaviours = first_occurrences(
            behaviours_for(destination.behaviour_collections(), &transition),
            &mut seen,
            "destination",
        );
        tracing::debug!(
            source = source_behaviours.len(),
            destination = destination_behaviours.len(),
            "resolved behaviours"
        );
        let behaviours: Vec<BehaviourHandle> = source_behaviours
            .iter()
            .chain(destination_behaviours.iter())
            .cloned()
            .collect();

        let id = self.last_run.next();
        self.last_run = id;
        let run_info = RunInfo {
            is_presenting: presenting,
            is_interactive: interactive,
            transition_duration: self.config.duration,
        };
        for (slot, behaviour) in behaviours.iter().enumerate() {
            behaviour
                .borrow_mut()
                .configure(run_info, CompletionToken { run: id, slot });
        }

        let container = context.container();
        let source_root = source.root_view();
        let destination_root = destination.root_view();
        if presenting {
            self.source_anchor = host.parent(source_root).filter(|p| *p != container);
        }
        host.add_child(container, source_root);
        host.add_child(container, destination_root);
        tracing::debug!(
            ?container,
            below = ?source_root,
            above = ?destination_root,
            "placed screens"
        );

        if presenting {
            host.set_hidden(destination_root, true);
        }
        let links = link(&source_behaviours, &destination_behaviours);
        for l in &links {
            let paired = l.destination.as_ref().map(|d| d.borrow());
            l.source
                .borrow_mut()
                .run_setup(host, container, paired.as_deref());
        }
        for d in unlinked_destinations(&links, &destination_behaviours) {
            d.borrow_mut().run_setup(host, container, None);
        }
        if presenting {
            host.set_hidden(destination_root, false);
        }

        let mut timeline = Timeline::new(id, self.config.duration);
        for (slot, behaviour) in behaviours.iter().enumerate() {
            timeline.open_slot(slot);
            behaviour.borrow_mut().run_registration(&*host, &mut timeline);
        }
        tracing::debug!(
            behaviours = behaviours.len(),
            entries = timeline.entry_count(),
            interactive,
            "registered animations"
        );

        let mode = if interactive {
            PlaybackMode::Interactive
        } else {
            PlaybackMode::Timed
        };
        timeline.start(mode, host);
        self.run = Some(ActiveRun {
            id,
            direction,
            interactive,
            source,
            destination,
            context,
            completed: vec![false; behaviours.len()],
            completed_count: 0,
            behaviours,
            timeline,
        });
        self.phase = Phase::Animating;
        self.pump(host);
        Ok(())
    }

    /// Host frame tick: advance timed playback (or an interactive settle) by `dt` seconds.
    pub fn advance(&mut self, host: &mut dyn ViewHost, dt: f64) {
        if let Some(run) = self.run.as_mut() {
            run.timeline.advance(dt, host);
            self.pump(host);
        }
    }

    /// Scrub an interactive run to `percent`.
    pub fn update(&mut self, host: &mut dyn ViewHost, percent: f64) -> SegueResult<()> {
        let run = self.interactive_run("update")?;
        let percent = if percent.is_finite() {
            percent.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if !run.timeline.scrub(percent, host) {
            return Err(SegueError::not_interactive("update after finish or cancel"));
        }
        run.context.update_interactive(percent);
        Ok(())
    }

    /// Commit an interactive run: play the rest of the timeline forward.
    pub fn finish(&mut self, host: &mut dyn ViewHost) -> SegueResult<()> {
        self.settle(host, true)
    }

    /// Roll an interactive run back: play the timeline back to its start.
    pub fn cancel(&mut self, host: &mut dyn ViewHost) -> SegueResult<()> {
        self.settle(host, false)
    }

    fn settle(&mut self, host: &mut dyn ViewHost, commit: bool) -> SegueResult<()> {
        let op = if commit { "finish" } else { "cancel" };
        let run = self.interactive_run(op)?;
        if !run.timeline.is_scrubbing() {
            return Err(SegueError::not_interactive(format!(
                "{op} after the run was already settled"
            )));
        }
        if commit {
            run.context.finish_interactive();
        } else {
            run.context.cancel_interactive();
        }
        run.timeline.settle(commit, host);
        tracing::debug!(commit, "settling interactive run");
        self.pump(host);
        Ok(())
    }

    fn interactive_run(&mut self, op: &str) -> SegueResult<&mut ActiveRun> {
        let transition = &self.config.transition_identifier;
        match self.run.as_mut() {
            None => Err(SegueError::no_active_run(format!(
                "{op} on '{transition}' with no run in flight"
            ))),
            Some(run) if !run.interactive => Err(SegueError::not_interactive(format!(
                "{op} on timed run of '{transition}'"
            ))),
            Some(run) => Ok(run),
        }
    }

    /// Record that the behaviour slot named by `token` finished animating.
    ///
    /// Tokens from other runs, repeated slots and anything arriving after finalization are
    /// ignored.
    pub fn behaviour_did_complete(&mut self, host: &mut dyn ViewHost, token: CompletionToken) {
        let Some(run) = self.run.as_mut() else {
            tracing::trace!(?token, "completion with no run in flight");
            return;
        };
        if token.run != run.id {
            tracing::warn!(?token, current = ?run.id, "ignoring completion from another run");
            return;
        }
        let Some(done) = run.completed.get_mut(token.slot) else {
            tracing::warn!(?token, "ignoring completion for unknown slot");
            return;
        };
        if *done {
            tracing::warn!(?token, "ignoring duplicate completion");
            return;
        }
        *done = true;
        run.completed_count += 1;
        tracing::trace!(
            slot = token.slot,
            completed = run.completed_count,
            total = run.behaviours.len(),
            "behaviour completed"
        );
        if run.is_complete() {
            self.finalize(host);
        }
    }

    /// Deliver queued completions, then finalize if nothing is left to wait for.
    fn pump(&mut self, host: &mut dyn ViewHost) {
        while let Some(token) = self
            .run
            .as_mut()
            .and_then(|r| r.timeline.next_completion())
        {
            self.behaviour_did_complete(host, token);
        }
        if self.run.as_ref().is_some_and(ActiveRun::is_complete) {
            self.finalize(host);
        }
    }

    #[tracing::instrument(skip_all, fields(transition = %self.config.transition_identifier))]
    fn finalize(&mut self, host: &mut dyn ViewHost) {
        let Some(mut run) = self.run.take() else {
            return;
        };
        self.phase = Phase::Finalizing;

        let cancelled = run.context.was_cancelled();
        if cancelled != (run.timeline.outcome() == Some(TimelineOutcome::Cancelled)) {
            tracing::debug!(cancelled, "host cancellation differs from the timeline outcome");
        }
        let presented = run.direction.presented(cancelled);
        let container = run.context.container();
        for behaviour in &run.behaviours {
            behaviour
                .borrow_mut()
                .run_complete(host, container, presented);
        }

        let source_root = run.source.root_view();
        match (run.direction, cancelled) {
            (TransitionDirection::Present, true) => {
                run.context.dismiss_presented();
                host.remove_from_parent(run.destination.root_view());
                self.reattach_source(host, source_root);
                run.context.complete_transition(false);
            }
            (TransitionDirection::Present, false) => run.context.complete_transition(true),
            (TransitionDirection::Dismiss, false) => {
                self.reattach_source(host, source_root);
                run.context.complete_transition(true);
            }
            (TransitionDirection::Dismiss, true) => run.context.complete_transition(false),
        }

        let transition = &self.config.transition_identifier;
        let (from, to) = run.from_to();
        let (leaving, staying) = if cancelled { (to, from) } else { (from, to) };
        dispatch_lifecycle(leaving.as_ref(), LifecycleEvent::DidDisappear, transition);
        dispatch_lifecycle(staying.as_ref(), LifecycleEvent::DidAppear, transition);

        let outcome = TransitionOutcome {
            run: run.id,
            direction: run.direction,
            cancelled,
            presented,
            behaviours: run.behaviours.len(),
        };
        tracing::debug!(?outcome, "transition finalized");
        self.last_outcome = Some(outcome);
        self.phase = Phase::Idle;
    }

    fn reattach_source(&self, host: &mut dyn ViewHost, source_root: ViewId) {
        match self.source_anchor {
            Some(anchor) => host.add_child(anchor, source_root),
            None => tracing::debug!(
                ?source_root,
                "no source anchor captured; leaving root in place"
            ),
        }
    }
}

impl fmt::Debug for TransitionOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionOrchestrator")
            .field("config", &self.config)
            .field("is_interactive", &self.is_interactive)
            .field("phase", &self.phase)
            .field("run", &self.run.as_ref().map(|r| r.id))
            .field("source_anchor", &self.source_anchor)
            .field("last_outcome", &self.last_outcome)
            .finish()
    }
}

/// Keep the first occurrence of every handle, across both screens.
///
/// A handle listed twice would be configured, set up and completed twice in one run.
fn first_occurrences(
    behaviours: Vec<BehaviourHandle>,
    seen: &mut Vec<BehaviourHandle>,
    side: &'static str,
) -> Vec<BehaviourHandle> {
    let mut kept = Vec::with_capacity(behaviours.len());
    for b in behaviours {
        if seen.iter().any(|s| Rc::ptr_eq(s, &b)) {
            tracing::warn!(
                side,
                identifier = %b.borrow().behaviour_identifier(),
                "behaviour listed more than once; keeping the first occurrence"
            );
            continue;
        }
        seen.push(Rc::clone(&b));
        kept.push(b);
    }
    kept
}

#[cfg(test)]
#[path = "../../tests/unit/orchestrator/orchestrator.rs"]
mod tests;
