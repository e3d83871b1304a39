//! Pairing of source behaviours with destination behaviours.

use std::rc::Rc;

use crate::behaviour::behaviour::BehaviourHandle;

/// A source behaviour and the destination behaviour sharing its identifier, if any.
#[derive(Clone, Debug)]
pub struct BehaviourLink {
    pub source: BehaviourHandle,
    pub destination: Option<BehaviourHandle>,
}

/// Pair every source behaviour with the first destination behaviour carrying the same non-empty
/// identifier.
///
/// Output order follows `source`. Empty identifiers never pair, and a behaviour never pairs with
/// itself even when both screens list the same handle. When an identifier repeats on one side,
/// only its first behaviour pairs; later ones run unpaired.
pub fn link(source: &[BehaviourHandle], destination: &[BehaviourHandle]) -> Vec<BehaviourLink> {
    let links: Vec<BehaviourLink> = source
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let id = s.borrow().behaviour_identifier().to_owned();
            let paired = if id.is_empty() {
                None
            } else if repeats_earlier(&source[..i], &id) {
                tracing::warn!(identifier = %id, "duplicate source identifier runs unpaired");
                None
            } else {
                first_partner(s, &id, destination)
            };
            if paired.is_none() && !id.is_empty() {
                tracing::trace!(identifier = %id, "source behaviour has no destination partner");
            }
            BehaviourLink {
                source: Rc::clone(s),
                destination: paired,
            }
        })
        .collect();

    for (i, d) in destination.iter().enumerate() {
        let d = d.borrow();
        let id = d.behaviour_identifier();
        if !id.is_empty() && repeats_earlier(&destination[..i], id) {
            tracing::warn!(identifier = %id, "duplicate destination identifier runs unpaired");
        }
    }
    links
}

fn repeats_earlier(earlier: &[BehaviourHandle], id: &str) -> bool {
    earlier.iter().any(|e| e.borrow().behaviour_identifier() == id)
}

fn first_partner(
    source: &BehaviourHandle,
    id: &str,
    destination: &[BehaviourHandle],
) -> Option<BehaviourHandle> {
    destination
        .iter()
        .find(|d| !Rc::ptr_eq(source, d) && d.borrow().behaviour_identifier() == id)
        .cloned()
}

/// Destination behaviours no link claimed, in destination order.
pub fn unlinked_destinations(
    links: &[BehaviourLink],
    destination: &[BehaviourHandle],
) -> Vec<BehaviourHandle> {
    destination
        .iter()
        .filter(|d| {
            !links
                .iter()
                .filter_map(|l| l.destination.as_ref())
                .any(|claimed| Rc::ptr_eq(claimed, d))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/behaviour/linker.rs"]
mod tests;
