use crate::foundation::core::{Affine, Point, Rect, ViewId};
use crate::host::view::ViewHost;

#[derive(Clone, Debug)]
struct Node {
    label: String,
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    frame: Rect,
    alpha: f64,
    transform: Affine,
    hidden: bool,
    snapshot_of: Option<ViewId>,
}

impl Node {
    fn new(label: String, frame: Rect) -> Self {
        Self {
            label,
            parent: None,
            children: Vec::new(),
            frame,
            alpha: 1.0,
            transform: Affine::IDENTITY,
            hidden: false,
            snapshot_of: None,
        }
    }
}

/// In-memory [`ViewHost`]: a retained view tree with frames, opacity, transforms and visibility.
///
/// Used by headless simulation and tests. Views are never freed; detached views simply have no
/// parent.
#[derive(Clone, Debug, Default)]
pub struct ViewArena {
    nodes: Vec<Node>,
}

impl ViewArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached view with the given frame.
    pub fn create_view(&mut self, label: impl Into<String>, frame: Rect) -> ViewId {
        let id = ViewId(self.nodes.len() as u64);
        self.nodes.push(Node::new(label.into(), frame));
        id
    }

    /// Create a view with the given frame and attach it on top of `parent`.
    pub fn create_child(
        &mut self,
        parent: ViewId,
        label: impl Into<String>,
        frame: Rect,
    ) -> ViewId {
        let id = self.create_view(label, frame);
        self.add_child(parent, id);
        id
    }

    /// Debug label given at creation.
    pub fn label(&self, view: ViewId) -> Option<&str> {
        self.node(view).map(|n| n.label.as_str())
    }

    /// View that `view` is a snapshot of, if any.
    pub fn snapshot_source(&self, view: ViewId) -> Option<ViewId> {
        self.node(view).and_then(|n| n.snapshot_of)
    }

    /// Number of views ever created.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Return `true` when no view was created yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn node(&self, view: ViewId) -> Option<&Node> {
        self.nodes.get(usize::try_from(view.0).ok()?)
    }

    fn node_mut(&mut self, view: ViewId) -> Option<&mut Node> {
        self.nodes.get_mut(usize::try_from(view.0).ok()?)
    }

    fn is_ancestor_or_self(&self, ancestor: ViewId, view: ViewId) -> bool {
        let mut cur = Some(view);
        while let Some(v) = cur {
            if v == ancestor {
                return true;
            }
            cur = self.node(v).and_then(|n| n.parent);
        }
        false
    }

    fn root_of(&self, view: ViewId) -> ViewId {
        let mut cur = view;
        while let Some(parent) = self.node(cur).and_then(|n| n.parent) {
            cur = parent;
        }
        cur
    }

    /// Origin of `view`'s own coordinate space, expressed in its root's space.
    fn content_origin(&self, view: ViewId) -> Point {
        let mut origin = Point::ZERO;
        let mut cur = Some(view);
        while let Some(v) = cur {
            let Some(node) = self.node(v) else { break };
            origin += node.frame.origin().to_vec2();
            cur = node.parent;
        }
        origin
    }
}

impl ViewHost for ViewArena {
    fn contains(&self, view: ViewId) -> bool {
        self.node(view).is_some()
    }

    fn add_child(&mut self, parent: ViewId, child: ViewId) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return;
        }
        // Refuse cycles: `parent` must not live inside `child`.
        if self.is_ancestor_or_self(child, parent) {
            tracing::warn!(?parent, ?child, "refusing to create a view cycle");
            return;
        }
        self.remove_from_parent(child);
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn remove_from_parent(&mut self, view: ViewId) {
        let Some(parent) = self.node_mut(view).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != view);
        }
    }

    fn parent(&self, view: ViewId) -> Option<ViewId> {
        self.node(view).and_then(|n| n.parent)
    }

    fn children(&self, view: ViewId) -> Vec<ViewId> {
        self.node(view)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn frame(&self, view: ViewId) -> Option<Rect> {
        self.node(view).map(|n| n.frame)
    }

    fn set_frame(&mut self, view: ViewId, frame: Rect) {
        if let Some(n) = self.node_mut(view) {
            n.frame = frame;
        }
    }

    fn convert_frame(&self, view: ViewId, target: ViewId) -> Option<Rect> {
        let frame = self.node(view)?.frame;
        if !self.contains(target) || self.root_of(view) != self.root_of(target) {
            return None;
        }
        let parent_origin = self
            .parent(view)
            .map(|p| self.content_origin(p))
            .unwrap_or(Point::ZERO);
        let target_origin = self.content_origin(target);
        let origin = frame.origin() + (parent_origin - target_origin);
        Some(Rect::from_origin_size(origin, frame.size()))
    }

    fn alpha(&self, view: ViewId) -> Option<f64> {
        self.node(view).map(|n| n.alpha)
    }

    fn set_alpha(&mut self, view: ViewId, alpha: f64) {
        if let Some(n) = self.node_mut(view) {
            n.alpha = alpha;
        }
    }

    fn transform(&self, view: ViewId) -> Option<Affine> {
        self.node(view).map(|n| n.transform)
    }

    fn set_transform(&mut self, view: ViewId, transform: Affine) {
        if let Some(n) = self.node_mut(view) {
            n.transform = transform;
        }
    }

    fn is_hidden(&self, view: ViewId) -> bool {
        self.node(view).is_some_and(|n| n.hidden)
    }

    fn set_hidden(&mut self, view: ViewId, hidden: bool) {
        if let Some(n) = self.node_mut(view) {
            n.hidden = hidden;
        }
    }

    fn snapshot(&mut self, view: ViewId) -> Option<ViewId> {
        let source = self.node(view)?;
        let label = format!("snapshot:{}", source.label);
        let bounds = Rect::from_origin_size(Point::ZERO, source.frame.size());
        let alpha = source.alpha;
        let id = self.create_view(label, bounds);
        if let Some(n) = self.node_mut(id) {
            n.snapshot_of = Some(view);
            n.alpha = alpha;
        }
        Some(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/arena.rs"]
mod tests;
