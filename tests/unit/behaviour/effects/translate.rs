use super::*;
use crate::animation::timeline::{CompletionToken, PlaybackMode, Timeline};
use crate::behaviour::behaviour::RunInfo;
use crate::foundation::core::{Rect, RunId};
use crate::host::arena::ViewArena;

fn configure(behaviour: &mut Behaviour, presenting: bool) {
    behaviour.configure(
        RunInfo {
            is_presenting: presenting,
            is_interactive: false,
            transition_duration: 1.0,
        },
        CompletionToken {
            run: RunId(1),
            slot: 0,
        },
    );
}

fn fixture() -> (ViewArena, ViewId, ViewId, ViewId) {
    let mut arena = ViewArena::new();
    let container = arena.create_view("container", Rect::new(0.0, 0.0, 400.0, 800.0));
    let reference = arena.create_child(container, "reference", Rect::new(0.0, 0.0, 200.0, 100.0));
    let view = arena.create_child(reference, "v", Rect::new(10.0, 10.0, 20.0, 20.0));
    (arena, container, reference, view)
}

#[test]
fn offsets_are_relative_to_the_reference_size() {
    let (mut arena, container, reference, view) = fixture();
    let effect = TranslateEffect::new(Vec2::new(1.0, -0.5), Vec2::ZERO).with_reference(reference);
    let mut behaviour = Behaviour::new(effect).view(view);
    configure(&mut behaviour, true);

    behaviour.run_setup(&mut arena, container, None);
    assert_eq!(
        arena.transform(view),
        Some(Affine::translate(Vec2::new(200.0, -50.0)))
    );

    let mut timeline = Timeline::new(RunId(1), 1.0);
    behaviour.run_registration(&arena, &mut timeline);
    timeline.start(PlaybackMode::Timed, &mut arena);
    timeline.advance(1.0, &mut arena);
    assert_eq!(arena.transform(view), Some(Affine::IDENTITY));
}

#[test]
fn parent_is_the_default_reference() {
    let (mut arena, container, _, view) = fixture();
    let mut behaviour =
        Behaviour::new(TranslateEffect::new(Vec2::ZERO, Vec2::new(0.0, 1.0))).view(view);
    configure(&mut behaviour, false);

    behaviour.run_setup(&mut arena, container, None);
    assert_eq!(
        arena.transform(view),
        Some(Affine::translate(Vec2::new(0.0, 100.0)))
    );
}

#[test]
fn complete_lands_on_origin_or_destination() {
    let (mut arena, container, reference, view) = fixture();
    let effect = TranslateEffect::new(Vec2::new(0.5, 0.0), Vec2::new(0.0, 1.0))
        .with_reference(reference);
    let mut behaviour = Behaviour::new(effect).view(view);

    behaviour.run_complete(&mut arena, container, true);
    assert_eq!(
        arena.transform(view),
        Some(Affine::translate(Vec2::new(0.0, 100.0)))
    );
    behaviour.run_complete(&mut arena, container, false);
    assert_eq!(
        arena.transform(view),
        Some(Affine::translate(Vec2::new(100.0, 0.0)))
    );
}

#[test]
fn missing_reference_does_not_move() {
    let mut arena = ViewArena::new();
    let container = arena.create_view("container", Rect::new(0.0, 0.0, 10.0, 10.0));
    let detached = arena.create_view("detached", Rect::new(0.0, 0.0, 10.0, 10.0));
    let mut behaviour =
        Behaviour::new(TranslateEffect::new(Vec2::new(1.0, 1.0), Vec2::ZERO)).view(detached);
    configure(&mut behaviour, true);
    behaviour.run_setup(&mut arena, container, None);
    assert_eq!(arena.transform(detached), Some(Affine::IDENTITY));
}
