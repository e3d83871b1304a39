//! Screens taking part in a transition.

use std::rc::Rc;

use crate::behaviour::collection::BehaviourCollection;
use crate::foundation::core::ViewId;

/// Shared handle on a screen.
pub type ScreenRef = Rc<dyn Screen>;

/// Lifecycle notification delivered to screens around a transition run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// The screen is about to be used as the destination of a segue.
    Prepare,
    /// The screen will become visible.
    WillAppear,
    /// The screen will stop being visible.
    WillDisappear,
    /// The screen became visible.
    DidAppear,
    /// The screen stopped being visible.
    DidDisappear,
}

/// A screen (view controller) as seen by the orchestrator.
///
/// Hooks take `&self`; screens that record state use interior mutability.
pub trait Screen {
    /// Root view placed into the transition container.
    fn root_view(&self) -> ViewId;

    /// Behaviour collections declared on this screen.
    ///
    /// Screens that do not take part in behaviour-based transitions keep the default (none).
    fn behaviour_collections(&self) -> &[BehaviourCollection] {
        &[]
    }

    /// Nested screens managed by this one (tab/page containers, embedded children).
    fn children(&self) -> Vec<ScreenRef> {
        Vec::new()
    }

    /// Lifecycle hook for this screen only; propagation is done by [`dispatch_lifecycle`].
    fn on_lifecycle(&self, _event: LifecycleEvent, _transition_identifier: &str) {}
}

/// Deliver `event` to `screen`, then recursively to every nested child, depth first.
pub fn dispatch_lifecycle(screen: &dyn Screen, event: LifecycleEvent, transition_identifier: &str) {
    screen.on_lifecycle(event, transition_identifier);
    for child in screen.children() {
        dispatch_lifecycle(child.as_ref(), event, transition_identifier);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/screen/mod.rs"]
mod tests;
