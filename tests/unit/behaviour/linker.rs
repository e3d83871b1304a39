use super::*;
use crate::behaviour::behaviour::Behaviour;
use crate::behaviour::effects::fade::FadeEffect;

fn named(id: &str) -> BehaviourHandle {
    Behaviour::new(FadeEffect::fade_in())
        .identifier(id)
        .into_handle()
}

fn partner_id(l: &BehaviourLink) -> Option<String> {
    l.destination
        .as_ref()
        .map(|d| d.borrow().behaviour_identifier().to_owned())
}

#[test]
fn pairs_on_equal_identifiers_in_source_order() {
    let source = vec![named("x"), named("y"), named("z")];
    let destination = vec![named("z"), named("x")];
    let links = link(&source, &destination);

    assert_eq!(links.len(), 3);
    assert!(Rc::ptr_eq(links[0].destination.as_ref().unwrap(), &destination[1]));
    assert!(links[1].destination.is_none());
    assert!(Rc::ptr_eq(links[2].destination.as_ref().unwrap(), &destination[0]));
}

#[test]
fn empty_identifiers_never_pair() {
    let links = link(&[named("")], &[named("")]);
    assert!(links[0].destination.is_none());
}

#[test]
fn duplicate_identifiers_take_the_first_match() {
    let destination = vec![named("hero"), named("hero")];
    let links = link(&[named("hero")], &destination);
    assert!(Rc::ptr_eq(links[0].destination.as_ref().unwrap(), &destination[0]));
    assert_eq!(partner_id(&links[0]).as_deref(), Some("hero"));
}

#[test]
fn repeated_source_identifiers_pair_only_once() {
    let source = vec![named("hero"), named("hero")];
    let destination = vec![named("hero"), named("hero")];
    let links = link(&source, &destination);
    assert!(Rc::ptr_eq(links[0].destination.as_ref().unwrap(), &destination[0]));
    assert!(links[1].destination.is_none());

    let rest = unlinked_destinations(&links, &destination);
    assert_eq!(rest.len(), 1);
    assert!(Rc::ptr_eq(&rest[0], &destination[1]));
}

#[test]
fn a_behaviour_never_pairs_with_itself() {
    let shared = named("hero");
    let other = named("hero");
    let links = link(
        std::slice::from_ref(&shared),
        &[Rc::clone(&shared), Rc::clone(&other)],
    );
    assert!(Rc::ptr_eq(links[0].destination.as_ref().unwrap(), &other));
}

#[test]
fn unlinked_destinations_keep_destination_order() {
    let destination = vec![named("a"), named("b"), named("c")];
    let links = link(&[named("b")], &destination);
    let rest = unlinked_destinations(&links, &destination);
    assert_eq!(rest.len(), 2);
    assert!(Rc::ptr_eq(&rest[0], &destination[0]));
    assert!(Rc::ptr_eq(&rest[1], &destination[2]));
}
