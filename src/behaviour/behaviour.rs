use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::animation::curve::{AnimationCurve, SpringParams};
use crate::animation::timeline::{CompletionToken, PropertyChange, Timeline};
use crate::animation::timing::{AbsoluteWindow, BehaviourTiming, RelativeWindow};
use crate::foundation::core::ViewId;
use crate::host::view::{ViewHost, ViewProvider};

/// Shared handle on a behaviour. Screens own behaviours for their whole life; orchestrators borrow
/// them for the duration of a run.
pub type BehaviourHandle = Rc<RefCell<Behaviour>>;

/// Per-run state the orchestrator hands to every behaviour before setup.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunInfo {
    /// `true` while presenting, `false` while dismissing.
    pub is_presenting: bool,
    /// `true` when progress is driven by a gesture.
    pub is_interactive: bool,
    /// Total transition duration in seconds.
    pub transition_duration: f64,
}

/// The strategy behind one kind of visual effect.
///
/// Effects only touch views through the context they are given. Any transient state an effect
/// keeps (snapshots, cached frames) must be reset in [`TransitionEffect::setup`] so that nothing
/// leaks from one run into the next.
pub trait TransitionEffect {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Put the views into their start state, synchronously and without animation.
    ///
    /// `paired` is the destination behaviour sharing this behaviour's identifier, if any.
    fn setup(&mut self, cx: &mut EffectCx<'_>, paired: Option<&Behaviour>);

    /// Schedule the changes that move the views from their start state to their end state.
    fn register_animations(&mut self, cx: &mut AnimationCx<'_>);

    /// Settle the views at the end of a run. `presented` is `true` when the destination state won.
    fn complete(&mut self, cx: &mut EffectCx<'_>, presented: bool);
}

/// Context handed to [`TransitionEffect::setup`] and [`TransitionEffect::complete`].
pub struct EffectCx<'a> {
    /// The host view hierarchy.
    pub host: &'a mut dyn ViewHost,
    /// Transition container view.
    pub container: ViewId,
    /// Run parameters.
    pub run: RunInfo,
    /// Views resolved for this behaviour.
    pub views: &'a [ViewId],
}

/// Context handed to [`TransitionEffect::register_animations`].
pub struct AnimationCx<'a> {
    host: &'a dyn ViewHost,
    timeline: &'a mut Timeline,
    slot: usize,
    timing: BehaviourTiming,
    run: RunInfo,
    views: &'a [ViewId],
}

impl<'a> AnimationCx<'a> {
    pub(crate) fn new(
        host: &'a dyn ViewHost,
        timeline: &'a mut Timeline,
        slot: usize,
        timing: BehaviourTiming,
        run: RunInfo,
        views: &'a [ViewId],
    ) -> Self {
        Self {
            host,
            timeline,
            slot,
            timing,
            run,
            views,
        }
    }

    /// Read-only view of the host hierarchy.
    pub fn host(&self) -> &dyn ViewHost {
        self.host
    }

    /// Run parameters.
    pub fn run(&self) -> RunInfo {
        self.run
    }

    /// Views resolved for this behaviour.
    pub fn views(&self) -> &[ViewId] {
        self.views
    }

    /// Animate `changes` over the behaviour's whole window.
    pub fn add_animation(&mut self, changes: impl IntoIterator<Item = PropertyChange>) {
        self.add_animation_within(RelativeWindow::FULL, changes);
    }

    /// Animate `changes` over `local`, a window relative to the behaviour's own window.
    pub fn add_animation_within(
        &mut self,
        local: RelativeWindow,
        changes: impl IntoIterator<Item = PropertyChange>,
    ) {
        let window = self.timing.schedule(
            local,
            self.run.is_presenting,
            self.run.transition_duration,
        );
        self.timeline.add(
            self.host,
            self.slot,
            window,
            self.timing.curve,
            self.timing.spring,
            changes,
        );
    }

    /// Animate `changes` over an explicit window in seconds, bypassing relative timing.
    pub fn add_timed_animation(
        &mut self,
        window: AbsoluteWindow,
        curve: AnimationCurve,
        changes: impl IntoIterator<Item = PropertyChange>,
    ) {
        self.timeline
            .add(self.host, self.slot, window, curve, None, changes);
    }
}

/// One visual effect applied to one or more views during a transition.
pub struct Behaviour {
    identifier: String,
    timing: BehaviourTiming,
    views: Vec<ViewId>,
    provider: Option<Rc<dyn ViewProvider>>,
    effect: Box<dyn TransitionEffect>,
    run: RunInfo,
    completion: Option<CompletionToken>,
}

impl Behaviour {
    /// Create a behaviour driving `effect`, with an empty identifier and default timing.
    pub fn new(effect: impl TransitionEffect + 'static) -> Self {
        Self::from_boxed(Box::new(effect))
    }

    /// Create a behaviour around an already boxed effect.
    pub fn from_boxed(effect: Box<dyn TransitionEffect>) -> Self {
        Self {
            identifier: String::new(),
            timing: BehaviourTiming::default(),
            views: Vec::new(),
            provider: None,
            effect,
            run: RunInfo::default(),
            completion: None,
        }
    }

    /// Set the pairing identifier.
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Append a statically wired view.
    pub fn view(mut self, view: ViewId) -> Self {
        self.views.push(view);
        self
    }

    /// Replace the statically wired views.
    pub fn views(mut self, views: impl IntoIterator<Item = ViewId>) -> Self {
        self.views = views.into_iter().collect();
        self
    }

    /// Resolve views through `provider` before falling back to the static views.
    pub fn provider(mut self, provider: Rc<dyn ViewProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Replace all timing attributes.
    pub fn timing(mut self, timing: BehaviourTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Set the behaviour window relative to the whole transition.
    pub fn window(mut self, start: f64, duration: f64) -> Self {
        self.timing.window = RelativeWindow::new(start, duration);
        self
    }

    /// Mirror the window when the run is a dismissal.
    pub fn reverse_on_dismissal(mut self, reverse: bool) -> Self {
        self.timing.reverse_on_dismissal = reverse;
        self
    }

    /// Set the easing curve.
    pub fn curve(mut self, curve: AnimationCurve) -> Self {
        self.timing.curve = curve;
        self
    }

    /// Use a spring instead of the easing curve.
    pub fn spring(mut self, spring: SpringParams) -> Self {
        self.timing.spring = Some(spring);
        self
    }

    /// Wrap into a shared handle.
    pub fn into_handle(self) -> BehaviourHandle {
        Rc::new(RefCell::new(self))
    }

    /// Pairing identifier; empty when unpaired.
    pub fn behaviour_identifier(&self) -> &str {
        &self.identifier
    }

    /// Timing attributes.
    pub fn timing_attrs(&self) -> &BehaviourTiming {
        &self.timing
    }

    /// Effect name, for logs.
    pub fn effect_name(&self) -> &'static str {
        self.effect.name()
    }

    /// Parameters of the current (or last) run.
    pub fn run_info(&self) -> RunInfo {
        self.run
    }

    /// `true` while the current run presents.
    pub fn is_presenting(&self) -> bool {
        self.run.is_presenting
    }

    /// `true` while the current run is interactive.
    pub fn is_interactive(&self) -> bool {
        self.run.is_interactive
    }

    /// Completion token of the current run.
    pub fn completion_token(&self) -> Option<CompletionToken> {
        self.completion
    }

    /// Views this behaviour applies to: the provider's answer when it has one, else the static
    /// views.
    pub fn resolved_views(&self) -> Vec<ViewId> {
        if let Some(provider) = &self.provider
            && let Some(views) = provider.views_for_behaviour(&self.identifier)
            && !views.is_empty()
        {
            return views;
        }
        self.views.clone()
    }

    pub(crate) fn configure(&mut self, run: RunInfo, completion: CompletionToken) {
        self.run = run;
        self.completion = Some(completion);
    }

    pub(crate) fn run_setup(
        &mut self,
        host: &mut dyn ViewHost,
        container: ViewId,
        paired: Option<&Behaviour>,
    ) {
        let views = self.resolved_views();
        let mut cx = EffectCx {
            host,
            container,
            run: self.run,
            views: &views,
        };
        self.effect.setup(&mut cx, paired);
    }

    pub(crate) fn run_registration(&mut self, host: &dyn ViewHost, timeline: &mut Timeline) {
        let Some(token) = self.completion else {
            return;
        };
        let views = self.resolved_views();
        let mut cx = AnimationCx::new(host, timeline, token.slot, self.timing, self.run, &views);
        self.effect.register_animations(&mut cx);
    }

    pub(crate) fn run_complete(
        &mut self,
        host: &mut dyn ViewHost,
        container: ViewId,
        presented: bool,
    ) {
        let views = self.resolved_views();
        let mut cx = EffectCx {
            host,
            container,
            run: self.run,
            views: &views,
        };
        self.effect.complete(&mut cx, presented);
        self.completion = None;
    }
}

impl fmt::Debug for Behaviour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Behaviour")
            .field("identifier", &self.identifier)
            .field("effect", &self.effect.name())
            .field("timing", &self.timing)
            .field("views", &self.views)
            .field("has_provider", &self.provider.is_some())
            .field("run", &self.run)
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/behaviour/behaviour.rs"]
mod tests;
