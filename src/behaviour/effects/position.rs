//! Move-to-position: a snapshot of the source view flies onto the paired destination view.

use crate::animation::timeline::PropertyChange;
use crate::behaviour::behaviour::{AnimationCx, Behaviour, EffectCx, TransitionEffect};
use crate::foundation::core::{Affine, Rect, ViewId};
use crate::host::view::frame_in_container;

#[derive(Clone, Copy, Debug, PartialEq)]
struct Flight {
    snapshot: ViewId,
    source: ViewId,
    destination: ViewId,
    target: Affine,
}

/// Source half of a move-to-position pair.
///
/// Setup snapshots the first source view, hides both the original and the paired destination
/// view, and animates the snapshot between the source frame and the paired destination frame.
/// With `on_top` the snapshot lives in the transition container above both screens; otherwise it
/// replaces the source view inside the source screen's hierarchy.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionSourceEffect {
    pub on_top: bool,
    flight: Option<Flight>,
}

impl PositionSourceEffect {
    pub fn new(on_top: bool) -> Self {
        Self {
            on_top,
            flight: None,
        }
    }

    /// Snapshot the source view currently in flight, if any.
    pub fn snapshot(&self) -> Option<ViewId> {
        self.flight.map(|f| f.snapshot)
    }
}

/// Transform that maps a view laid out at `source` onto `destination`, applied around the centre.
pub fn transform_between(source: Rect, destination: Rect) -> Affine {
    let ratio = |d: f64, s: f64| if s > 0.0 { d / s } else { 1.0 };
    let sx = ratio(destination.width(), source.width());
    let sy = ratio(destination.height(), source.height());
    let offset = destination.center() - source.center();
    Affine::new([sx, 0.0, 0.0, sy, offset.x, offset.y])
}

impl TransitionEffect for PositionSourceEffect {
    fn name(&self) -> &'static str {
        "position_source"
    }

    fn setup(&mut self, cx: &mut EffectCx<'_>, paired: Option<&Behaviour>) {
        self.flight = None;
        let Some(&source) = cx.views.first() else {
            return;
        };
        let Some(destination) = paired.and_then(|p| p.resolved_views().first().copied()) else {
            tracing::debug!(?source, "position source has no paired destination view");
            return;
        };
        let source_frame = frame_in_container(&*cx.host, source, cx.container);
        let destination_frame = frame_in_container(&*cx.host, destination, cx.container);
        let Some(snapshot) = cx.host.snapshot(source) else {
            return;
        };

        if self.on_top {
            cx.host.set_frame(snapshot, source_frame);
            cx.host.add_child(cx.container, snapshot);
        } else {
            let local = cx.host.frame(source).unwrap_or(source_frame);
            cx.host.set_frame(snapshot, local);
            match cx.host.parent(source) {
                Some(parent) => cx.host.add_child(parent, snapshot),
                None => cx.host.add_child(cx.container, snapshot),
            }
        }
        cx.host.set_hidden(source, true);
        // Linked destination behaviours get no setup of their own.
        cx.host.set_hidden(destination, true);

        let target = transform_between(source_frame, destination_frame);
        let start = if cx.run.is_presenting {
            Affine::IDENTITY
        } else {
            target
        };
        cx.host.set_transform(snapshot, start);
        self.flight = Some(Flight {
            snapshot,
            source,
            destination,
            target,
        });
    }

    fn register_animations(&mut self, cx: &mut AnimationCx<'_>) {
        let Some(flight) = self.flight else {
            return;
        };
        let end = if cx.run().is_presenting {
            flight.target
        } else {
            Affine::IDENTITY
        };
        cx.add_animation([PropertyChange::transform(flight.snapshot, end)]);
    }

    fn complete(&mut self, cx: &mut EffectCx<'_>, _presented: bool) {
        if let Some(flight) = self.flight.take() {
            cx.host.remove_from_parent(flight.snapshot);
            cx.host.set_hidden(flight.source, false);
            cx.host.set_hidden(flight.destination, false);
        }
    }
}

/// Destination half of a move-to-position pair.
///
/// Its views are what the paired source flies to. Run without a pair, it keeps its first view
/// hidden for the whole run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PositionDestinationEffect {
    hidden: Option<ViewId>,
}

impl PositionDestinationEffect {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransitionEffect for PositionDestinationEffect {
    fn name(&self) -> &'static str {
        "position_destination"
    }

    fn setup(&mut self, cx: &mut EffectCx<'_>, _paired: Option<&Behaviour>) {
        self.hidden = cx.views.first().copied();
        if let Some(view) = self.hidden {
            cx.host.set_hidden(view, true);
        }
    }

    fn register_animations(&mut self, _cx: &mut AnimationCx<'_>) {}

    fn complete(&mut self, cx: &mut EffectCx<'_>, _presented: bool) {
        if let Some(view) = self.hidden.take() {
            cx.host.set_hidden(view, false);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/behaviour/effects/position.rs"]
mod tests;
