use super::*;

fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
    Rect::new(x, y, x + w, y + h)
}

#[test]
fn add_child_appends_on_top_and_reparents() {
    let mut arena = ViewArena::new();
    let a = arena.create_view("a", rect(0.0, 0.0, 10.0, 10.0));
    let b = arena.create_view("b", rect(0.0, 0.0, 10.0, 10.0));
    let c = arena.create_view("c", rect(0.0, 0.0, 1.0, 1.0));

    arena.add_child(a, c);
    assert_eq!(arena.children(a), vec![c]);
    arena.add_child(b, c);
    assert!(arena.children(a).is_empty());
    assert_eq!(arena.children(b), vec![c]);
    assert_eq!(arena.parent(c), Some(b));
}

#[test]
fn re_adding_moves_to_top() {
    let mut arena = ViewArena::new();
    let root = arena.create_view("root", rect(0.0, 0.0, 10.0, 10.0));
    let x = arena.create_child(root, "x", Rect::ZERO);
    let y = arena.create_child(root, "y", Rect::ZERO);
    arena.add_child(root, x);
    assert_eq!(arena.children(root), vec![y, x]);
}

#[test]
fn cycles_are_refused() {
    let mut arena = ViewArena::new();
    let a = arena.create_view("a", Rect::ZERO);
    let b = arena.create_child(a, "b", Rect::ZERO);
    arena.add_child(b, a);
    assert_eq!(arena.parent(a), None);
    assert_eq!(arena.parent(b), Some(a));
}

#[test]
fn convert_frame_walks_shared_ancestors() {
    let mut arena = ViewArena::new();
    let window = arena.create_view("window", rect(0.0, 0.0, 400.0, 800.0));
    let container = arena.create_child(window, "container", rect(0.0, 100.0, 400.0, 700.0));
    let screen = arena.create_child(window, "screen", rect(10.0, 20.0, 300.0, 300.0));
    let thumb = arena.create_child(screen, "thumb", rect(5.0, 5.0, 50.0, 40.0));

    let converted = arena.convert_frame(thumb, container).unwrap();
    assert_eq!(converted, rect(15.0, -75.0, 50.0, 40.0));
}

#[test]
fn convert_frame_between_unrelated_views_is_none() {
    let mut arena = ViewArena::new();
    let a = arena.create_view("a", rect(0.0, 0.0, 10.0, 10.0));
    let b = arena.create_view("b", rect(0.0, 0.0, 10.0, 10.0));
    let child = arena.create_child(a, "child", rect(1.0, 1.0, 2.0, 2.0));
    assert!(arena.convert_frame(child, b).is_none());
    assert!(arena.convert_frame(ViewId(99), a).is_none());
}

#[test]
fn snapshot_is_detached_and_sized_like_the_source() {
    let mut arena = ViewArena::new();
    let root = arena.create_view("root", rect(0.0, 0.0, 100.0, 100.0));
    let photo = arena.create_child(root, "photo", rect(20.0, 30.0, 40.0, 60.0));
    arena.set_alpha(photo, 0.5);

    let snap = arena.snapshot(photo).unwrap();
    assert_eq!(arena.parent(snap), None);
    assert_eq!(arena.frame(snap), Some(rect(0.0, 0.0, 40.0, 60.0)));
    assert_eq!(arena.alpha(snap), Some(0.5));
    assert_eq!(arena.snapshot_source(snap), Some(photo));
    assert_eq!(arena.label(snap), Some("snapshot:photo"));
}

#[test]
fn unknown_views_are_ignored() {
    let mut arena = ViewArena::new();
    let ghost = ViewId(42);
    arena.set_alpha(ghost, 0.0);
    arena.set_hidden(ghost, true);
    assert!(!arena.contains(ghost));
    assert_eq!(arena.alpha(ghost), None);
    assert!(!arena.is_hidden(ghost));
    assert!(arena.is_empty());
}
