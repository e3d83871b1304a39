use super::*;
use crate::animation::timeline::PlaybackMode;
use crate::foundation::core::{Rect, RunId};
use crate::host::arena::ViewArena;

struct Probe {
    local: RelativeWindow,
}

impl TransitionEffect for Probe {
    fn name(&self) -> &'static str {
        "probe"
    }

    fn setup(&mut self, cx: &mut EffectCx<'_>, _paired: Option<&Behaviour>) {
        for &v in cx.views {
            cx.host.set_alpha(v, 0.0);
        }
    }

    fn register_animations(&mut self, cx: &mut AnimationCx<'_>) {
        let changes: Vec<_> = cx
            .views()
            .iter()
            .map(|&v| PropertyChange::alpha(v, 1.0))
            .collect();
        cx.add_animation_within(self.local, changes);
    }

    fn complete(&mut self, cx: &mut EffectCx<'_>, presented: bool) {
        for &v in cx.views {
            cx.host.set_alpha(v, if presented { 1.0 } else { 0.0 });
        }
    }
}

/// Schedules one fade over a fixed window in seconds.
struct Direct {
    window: AbsoluteWindow,
}

impl TransitionEffect for Direct {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn setup(&mut self, _cx: &mut EffectCx<'_>, _paired: Option<&Behaviour>) {}

    fn register_animations(&mut self, cx: &mut AnimationCx<'_>) {
        let changes: Vec<_> = cx
            .views()
            .iter()
            .map(|&v| PropertyChange::alpha(v, 1.0))
            .collect();
        cx.add_timed_animation(self.window, AnimationCurve::Linear, changes);
    }

    fn complete(&mut self, _cx: &mut EffectCx<'_>, _presented: bool) {}
}

struct FixedProvider(Option<Vec<ViewId>>);

impl ViewProvider for FixedProvider {
    fn views_for_behaviour(&self, _identifier: &str) -> Option<Vec<ViewId>> {
        self.0.clone()
    }
}

fn probe(local: RelativeWindow) -> Behaviour {
    Behaviour::new(Probe { local })
}

fn scheduled(presenting: bool) -> Vec<AbsoluteWindow> {
    let mut arena = ViewArena::new();
    let view = arena.create_view("v", Rect::new(0.0, 0.0, 10.0, 10.0));
    let mut behaviour = probe(RelativeWindow::new(0.5, 0.5))
        .view(view)
        .window(0.5, 0.5)
        .reverse_on_dismissal(true);
    behaviour.configure(
        RunInfo {
            is_presenting: presenting,
            is_interactive: false,
            transition_duration: 2.0,
        },
        CompletionToken {
            run: RunId(1),
            slot: 0,
        },
    );
    let mut timeline = Timeline::new(RunId(1), 2.0);
    behaviour.run_registration(&arena, &mut timeline);
    timeline.windows_for(0)
}

#[test]
fn provider_views_win_over_static_views() {
    let b = probe(RelativeWindow::FULL)
        .identifier("hero")
        .view(ViewId(1))
        .provider(Rc::new(FixedProvider(Some(vec![ViewId(7), ViewId(8)]))));
    assert_eq!(b.resolved_views(), vec![ViewId(7), ViewId(8)]);
}

#[test]
fn empty_or_missing_provider_answer_falls_back_to_static_views() {
    let none = probe(RelativeWindow::FULL)
        .view(ViewId(1))
        .provider(Rc::new(FixedProvider(None)));
    assert_eq!(none.resolved_views(), vec![ViewId(1)]);

    let empty = probe(RelativeWindow::FULL)
        .view(ViewId(1))
        .provider(Rc::new(FixedProvider(Some(Vec::new()))));
    assert_eq!(empty.resolved_views(), vec![ViewId(1)]);
}

#[test]
fn local_windows_compose_with_the_behaviour_window() {
    assert_eq!(scheduled(true), vec![AbsoluteWindow::new(1.5, 0.5)]);
}

#[test]
fn dismissal_mirrors_reversible_windows() {
    assert_eq!(scheduled(false), vec![AbsoluteWindow::new(0.0, 0.5)]);
}

#[test]
fn registration_without_a_run_is_ignored() {
    let arena = ViewArena::new();
    let mut behaviour = probe(RelativeWindow::FULL).view(ViewId(0));
    let mut timeline = Timeline::new(RunId(1), 1.0);
    behaviour.run_registration(&arena, &mut timeline);
    assert_eq!(timeline.entry_count(), 0);
}

#[test]
fn completion_clears_the_run_token() {
    let mut arena = ViewArena::new();
    let container = arena.create_view("c", Rect::new(0.0, 0.0, 10.0, 10.0));
    let view = arena.create_child(container, "v", Rect::new(0.0, 0.0, 10.0, 10.0));
    let mut behaviour = probe(RelativeWindow::FULL).view(view);
    let token = CompletionToken {
        run: RunId(3),
        slot: 2,
    };
    behaviour.configure(
        RunInfo {
            is_presenting: true,
            is_interactive: true,
            transition_duration: 0.5,
        },
        token,
    );
    assert!(behaviour.is_presenting());
    assert!(behaviour.is_interactive());
    assert_eq!(behaviour.completion_token(), Some(token));

    behaviour.run_setup(&mut arena, container, None);
    assert_eq!(arena.alpha(view), Some(0.0));
    behaviour.run_complete(&mut arena, container, true);
    assert_eq!(arena.alpha(view), Some(1.0));
    assert_eq!(behaviour.completion_token(), None);
}

fn direct_timeline(arena: &ViewArena, view: ViewId, interactive: bool) -> Timeline {
    let mut behaviour = Behaviour::new(Direct {
        window: AbsoluteWindow::new(0.25, 0.5),
    })
    .view(view)
    .window(0.5, 0.5)
    .reverse_on_dismissal(true);
    behaviour.configure(
        RunInfo {
            is_presenting: false,
            is_interactive: interactive,
            transition_duration: 2.0,
        },
        CompletionToken {
            run: RunId(4),
            slot: 0,
        },
    );
    let mut timeline = Timeline::new(RunId(4), 2.0);
    timeline.open_slot(0);
    behaviour.run_registration(arena, &mut timeline);
    timeline
}

fn drain(timeline: &mut Timeline) -> Vec<CompletionToken> {
    std::iter::from_fn(|| timeline.next_completion()).collect()
}

#[test]
fn timed_animations_keep_their_explicit_window() {
    let mut arena = ViewArena::new();
    let view = arena.create_view("v", Rect::new(0.0, 0.0, 10.0, 10.0));
    arena.set_alpha(view, 0.0);

    // Neither the behaviour window nor dismissal reversal moves it.
    let mut timeline = direct_timeline(&arena, view, false);
    assert_eq!(timeline.windows_for(0), vec![AbsoluteWindow::new(0.25, 0.5)]);

    timeline.start(PlaybackMode::Timed, &mut arena);
    timeline.advance(0.5, &mut arena);
    assert_eq!(arena.alpha(view), Some(0.5));
    assert!(drain(&mut timeline).is_empty());

    timeline.advance(0.25, &mut arena);
    let done = CompletionToken {
        run: RunId(4),
        slot: 0,
    };
    assert_eq!(drain(&mut timeline), vec![done]);
    timeline.advance(1.0, &mut arena);
    assert!(drain(&mut timeline).is_empty());
    assert_eq!(arena.alpha(view), Some(1.0));
}

#[test]
fn timed_animations_complete_once_after_an_interactive_settle() {
    let mut arena = ViewArena::new();
    let view = arena.create_view("v", Rect::new(0.0, 0.0, 10.0, 10.0));
    arena.set_alpha(view, 0.0);

    let mut timeline = direct_timeline(&arena, view, true);
    timeline.start(PlaybackMode::Interactive, &mut arena);
    assert!(timeline.scrub(1.0, &mut arena));
    assert!(drain(&mut timeline).is_empty());

    assert!(timeline.settle(true, &mut arena));
    assert_eq!(drain(&mut timeline).len(), 1);
    timeline.advance(1.0, &mut arena);
    assert!(drain(&mut timeline).is_empty());
    assert_eq!(arena.alpha(view), Some(1.0));
}
