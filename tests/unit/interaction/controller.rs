use super::*;
use crate::foundation::core::{Rect, ViewId};
use crate::foundation::error::SegueError;
use crate::host::arena::ViewArena;
use crate::host::context::{ContextLog, RecordingContext};
use crate::orchestrator::orchestrator::{
    TransitionConfig, TransitionOrchestrator, TransitionRequest,
};
use crate::screen::{Screen, ScreenRef};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct Bare(ViewId);

impl Screen for Bare {
    fn root_view(&self) -> ViewId {
        self.0
    }
}

/// Percent is the downward translation over 100 points.
struct Linear {
    begins: Rc<Cell<usize>>,
}

impl InteractionStrategy for Linear {
    fn on_gesture_begin(&mut self, _sample: &GestureSample, _for_presentation: bool) {
        self.begins.set(self.begins.get() + 1);
    }

    fn compute_percent(&self, sample: &GestureSample, _for_presentation: bool) -> f64 {
        sample.translation.y / 100.0
    }

    fn should_begin_presentation(&self, sample: &GestureSample) -> bool {
        sample.velocity.y > 0.0
    }

    fn should_begin_dismissal(&self, _sample: &GestureSample) -> bool {
        false
    }
}

struct Rig {
    arena: ViewArena,
    orchestrator: OrchestratorHandle,
    controller: InteractionController,
    log: Rc<RefCell<ContextLog>>,
    begins: Rc<Cell<usize>>,
}

fn rig() -> Rig {
    let mut arena = ViewArena::new();
    let container = arena.create_view("container", Rect::new(0.0, 0.0, 100.0, 100.0));
    let source: ScreenRef = Rc::new(Bare(arena.create_view("s", Rect::ZERO)));
    let destination: ScreenRef = Rc::new(Bare(arena.create_view("d", Rect::ZERO)));
    let orchestrator =
        TransitionOrchestrator::new(TransitionConfig::new("t").duration(1.0)).into_handle();
    let context = RecordingContext::new(container);
    let log = context.log();

    let target = Rc::clone(&orchestrator);
    let trigger: TransitionTrigger = Box::new(move |host: &mut dyn ViewHost| {
        let request = TransitionRequest::present(
            Rc::clone(&source),
            Rc::clone(&destination),
            context.clone(),
        );
        target.borrow_mut().begin_transition(host, request)
    });
    let begins = Rc::new(Cell::new(0));
    let controller = InteractionController::for_presentation(
        Rc::clone(&orchestrator),
        trigger,
        Linear {
            begins: Rc::clone(&begins),
        },
    );
    Rig {
        arena,
        orchestrator,
        controller,
        log,
        begins,
    }
}

fn sample(phase: GesturePhase, dy: f64) -> GestureSample {
    GestureSample::new(phase, Size::new(100.0, 100.0)).moved(Vec2::new(0.0, dy))
}

#[test]
fn began_starts_an_interactive_run() {
    let mut r = rig();
    r.controller
        .handle(&mut r.arena, sample(GesturePhase::Began, 0.0))
        .unwrap();
    assert_eq!(r.begins.get(), 1);
    assert!(r.controller.is_tracking());
    let o = r.orchestrator.borrow();
    assert!(o.is_interactive());
    assert!(o.is_running());
}

#[test]
fn changes_forward_clamped_progress() {
    let mut r = rig();
    r.controller
        .handle(&mut r.arena, sample(GesturePhase::Began, 0.0))
        .unwrap();
    r.controller
        .handle(&mut r.arena, sample(GesturePhase::Changed, 25.0))
        .unwrap();
    r.controller
        .handle(&mut r.arena, sample(GesturePhase::Changed, 250.0))
        .unwrap();
    r.controller
        .handle(&mut r.arena, sample(GesturePhase::Changed, -10.0))
        .unwrap();
    assert_eq!(r.log.borrow().updates, vec![0.25, 1.0, 0.0]);
}

#[test]
fn release_above_threshold_finishes() {
    let mut r = rig();
    r.controller
        .handle(&mut r.arena, sample(GesturePhase::Began, 0.0))
        .unwrap();
    r.controller
        .handle(&mut r.arena, sample(GesturePhase::Ended, 50.0))
        .unwrap();
    assert!(!r.controller.is_tracking());
    assert!(!r.orchestrator.borrow().is_interactive());
    assert_eq!(r.log.borrow().finishes, 1);

    r.orchestrator.borrow_mut().advance(&mut r.arena, 1.0);
    assert_eq!(r.log.borrow().completions, vec![true]);
}

#[test]
fn release_at_or_below_threshold_cancels() {
    let mut r = rig();
    r.controller
        .handle(&mut r.arena, sample(GesturePhase::Began, 0.0))
        .unwrap();
    r.controller
        .handle(&mut r.arena, sample(GesturePhase::Cancelled, 20.0))
        .unwrap();
    assert_eq!(r.log.borrow().cancels, 1);

    r.orchestrator.borrow_mut().advance(&mut r.arena, 1.0);
    assert_eq!(r.log.borrow().completions, vec![false]);
}

#[test]
fn samples_outside_a_gesture_are_ignored() {
    let mut r = rig();
    r.controller
        .handle(&mut r.arena, sample(GesturePhase::Changed, 50.0))
        .unwrap();
    r.controller
        .handle(&mut r.arena, sample(GesturePhase::Ended, 50.0))
        .unwrap();
    r.controller
        .handle(&mut r.arena, sample(GesturePhase::Possible, 0.0))
        .unwrap();
    assert!(!r.orchestrator.borrow().is_running());
    assert_eq!(*r.log.borrow(), ContextLog::default());
}

#[test]
fn failed_trigger_resets_the_controller() {
    let mut r = rig();
    r.controller
        .handle(&mut r.arena, sample(GesturePhase::Began, 0.0))
        .unwrap();
    let err = r
        .controller
        .handle(&mut r.arena, sample(GesturePhase::Began, 0.0))
        .unwrap_err();
    assert!(matches!(err, SegueError::RunInProgress { .. }));
    assert!(!r.controller.is_tracking());
    assert!(!r.orchestrator.borrow().is_interactive());
}

#[test]
fn should_begin_asks_the_strategy_for_the_target_kind() {
    let r = rig();
    assert!(r.controller.is_for_presentation());
    let down = sample(GesturePhase::Possible, 0.0).with_velocity(Vec2::new(0.0, 10.0));
    let up = sample(GesturePhase::Possible, 0.0).with_velocity(Vec2::new(0.0, -10.0));
    assert!(r.controller.should_begin(&down));
    assert!(!r.controller.should_begin(&up));
}

#[test]
fn rollback_threshold_is_clamped() {
    let r = rig();
    assert_eq!(r.controller.threshold(), DEFAULT_ROLLBACK);
    let c = r.controller.rollback_threshold(4.0);
    assert_eq!(c.threshold(), 1.0);
    let c = c.rollback_threshold(f64::NAN);
    assert_eq!(c.threshold(), DEFAULT_ROLLBACK);
}

#[test]
fn terminal_phases() {
    assert!(GesturePhase::Ended.is_terminal());
    assert!(GesturePhase::Failed.is_terminal());
    assert!(!GesturePhase::Changed.is_terminal());
}
