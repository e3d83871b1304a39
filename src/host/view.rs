use crate::foundation::core::{Affine, Rect, ViewId};

/// The host's view hierarchy, seen from the orchestration engine.
///
/// Views are addressed by [`ViewId`]. Child order is back-to-front: the last child is drawn on top.
/// Lookups on unknown views return `None`; mutations on unknown views are ignored.
pub trait ViewHost {
    /// Return `true` when `view` is still alive in the hierarchy.
    fn contains(&self, view: ViewId) -> bool;

    /// Append `child` on top of `parent`'s children, detaching it from any previous parent first.
    fn add_child(&mut self, parent: ViewId, child: ViewId);

    /// Detach `view` from its parent. Detached views stay alive and can be re-added.
    fn remove_from_parent(&mut self, view: ViewId);

    /// Parent of `view`, if attached.
    fn parent(&self, view: ViewId) -> Option<ViewId>;

    /// Children of `view`, back-to-front.
    fn children(&self, view: ViewId) -> Vec<ViewId>;

    /// Frame of `view` in its parent's coordinate space.
    fn frame(&self, view: ViewId) -> Option<Rect>;

    /// Replace the frame of `view`.
    fn set_frame(&mut self, view: ViewId, frame: Rect);

    /// Convert the frame of `view` into the coordinate space of `target`.
    ///
    /// Returns `None` when the two views share no ancestor.
    fn convert_frame(&self, view: ViewId, target: ViewId) -> Option<Rect>;

    /// Current opacity of `view`.
    fn alpha(&self, view: ViewId) -> Option<f64>;

    /// Set the opacity of `view`.
    fn set_alpha(&mut self, view: ViewId, alpha: f64);

    /// Current paint-time transform of `view` (applied around the view's centre).
    fn transform(&self, view: ViewId) -> Option<Affine>;

    /// Set the paint-time transform of `view`.
    fn set_transform(&mut self, view: ViewId, transform: Affine);

    /// Return `true` when `view` is hidden.
    fn is_hidden(&self, view: ViewId) -> bool;

    /// Hide or show `view`.
    fn set_hidden(&mut self, view: ViewId, hidden: bool);

    /// Create a detached snapshot of `view`, sized like its bounds.
    fn snapshot(&mut self, view: ViewId) -> Option<ViewId>;
}

/// Supplies views to a behaviour dynamically, by behaviour identifier.
///
/// Used for views that only exist at transition time, such as a cell inside a virtualised list.
pub trait ViewProvider {
    /// Views to animate for the behaviour named `identifier`, or `None` to fall back to the
    /// behaviour's statically wired views.
    fn views_for_behaviour(&self, identifier: &str) -> Option<Vec<ViewId>>;
}

/// Frame of `view` in `container` space, degrading to [`Rect::ZERO`] when the views are unrelated.
pub fn frame_in_container(host: &dyn ViewHost, view: ViewId, container: ViewId) -> Rect {
    match host.convert_frame(view, container) {
        Some(frame) => frame,
        None => {
            tracing::warn!(
                ?view,
                ?container,
                "view has no ancestor shared with the container; using a zero frame"
            );
            Rect::ZERO
        }
    }
}
