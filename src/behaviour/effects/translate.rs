use crate::animation::timeline::PropertyChange;
use crate::behaviour::behaviour::{AnimationCx, Behaviour, EffectCx, TransitionEffect};
use crate::foundation::core::{Affine, Size, Vec2, ViewId};
use crate::host::view::ViewHost;

/// Translation between two offsets expressed relative to a reference view's size.
///
/// `(0, 0)` is the view's laid-out position, `(1, 1)` moves it one full reference width right and
/// one full reference height down. Without a reference view the parent of the first animated view
/// is used for every view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TranslateEffect {
    pub origin: Vec2,
    pub destination: Vec2,
    pub reference: Option<ViewId>,
    // Reference size captured at setup so every phase of a run uses the same geometry.
    captured: Option<Size>,
}

impl TranslateEffect {
    pub fn new(origin: Vec2, destination: Vec2) -> Self {
        Self {
            origin,
            destination,
            reference: None,
            captured: None,
        }
    }

    pub fn with_reference(mut self, reference: ViewId) -> Self {
        self.reference = Some(reference);
        self
    }

    fn reference_size(&self, host: &dyn ViewHost, view: ViewId) -> Size {
        if let Some(size) = self.captured {
            return size;
        }
        let reference = self.reference.or_else(|| host.parent(view));
        match reference.and_then(|r| host.frame(r)) {
            Some(frame) => frame.size(),
            None => {
                tracing::debug!(?view, "translate has no reference view; not moving");
                Size::ZERO
            }
        }
    }

    fn offset(size: Size, relative: Vec2) -> Affine {
        Affine::translate(Vec2::new(size.width * relative.x, size.height * relative.y))
    }
}

impl TransitionEffect for TranslateEffect {
    fn name(&self) -> &'static str {
        "translate"
    }

    fn setup(&mut self, cx: &mut EffectCx<'_>, _paired: Option<&Behaviour>) {
        self.captured = None;
        let Some(&first) = cx.views.first() else {
            return;
        };
        let size = self.reference_size(&*cx.host, first);
        self.captured = Some(size);
        let start = if cx.run.is_presenting {
            self.origin
        } else {
            self.destination
        };
        for &view in cx.views {
            cx.host.set_transform(view, Self::offset(size, start));
        }
    }

    fn register_animations(&mut self, cx: &mut AnimationCx<'_>) {
        let Some(&first) = cx.views().first() else {
            return;
        };
        let size = self.reference_size(cx.host(), first);
        let end = if cx.run().is_presenting {
            self.destination
        } else {
            self.origin
        };
        let changes: Vec<_> = cx
            .views()
            .iter()
            .map(|&v| PropertyChange::transform(v, Self::offset(size, end)))
            .collect();
        cx.add_animation(changes);
    }

    fn complete(&mut self, cx: &mut EffectCx<'_>, presented: bool) {
        if let Some(&first) = cx.views.first() {
            let size = self.reference_size(&*cx.host, first);
            let end = if presented {
                self.destination
            } else {
                self.origin
            };
            for &view in cx.views {
                cx.host.set_transform(view, Self::offset(size, end));
            }
        }
        self.captured = None;
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/behaviour/effects/translate.rs"]
mod tests;
