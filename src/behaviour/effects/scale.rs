use crate::animation::timeline::PropertyChange;
use crate::behaviour::behaviour::{AnimationCx, Behaviour, EffectCx, TransitionEffect};
use crate::foundation::core::Affine;

/// Smallest scale factor ever applied; a zero scale makes the transform singular.
pub const MIN_SCALE: f64 = 1e-7;

/// Uniform scale between two sizes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleEffect {
    pub start_size: f64,
    pub end_size: f64,
}

impl ScaleEffect {
    pub fn new(start_size: f64, end_size: f64) -> Self {
        Self {
            start_size,
            end_size,
        }
    }

    fn transform(size: f64) -> Affine {
        Affine::scale(sanitize_scale(size))
    }

    fn ends(&self, presenting: bool) -> (f64, f64) {
        if presenting {
            (self.start_size, self.end_size)
        } else {
            (self.end_size, self.start_size)
        }
    }
}

/// Replace a zero scale with [`MIN_SCALE`], keeping the sign.
pub fn sanitize_scale(size: f64) -> f64 {
    let sanitized = if size == 0.0 || !size.is_finite() {
        MIN_SCALE
    } else if size.abs() < MIN_SCALE {
        MIN_SCALE.copysign(size)
    } else {
        return size;
    };
    tracing::warn!(size, sanitized, "degenerate scale replaced");
    sanitized
}

impl TransitionEffect for ScaleEffect {
    fn name(&self) -> &'static str {
        "scale"
    }

    fn setup(&mut self, cx: &mut EffectCx<'_>, _paired: Option<&Behaviour>) {
        let (start, _) = self.ends(cx.run.is_presenting);
        for &view in cx.views {
            cx.host.set_transform(view, Self::transform(start));
        }
    }

    fn register_animations(&mut self, cx: &mut AnimationCx<'_>) {
        let (_, end) = self.ends(cx.run().is_presenting);
        let changes: Vec<_> = cx
            .views()
            .iter()
            .map(|&v| PropertyChange::transform(v, Self::transform(end)))
            .collect();
        cx.add_animation(changes);
    }

    fn complete(&mut self, cx: &mut EffectCx<'_>, presented: bool) {
        let size = if presented {
            self.end_size
        } else {
            self.start_size
        };
        for &view in cx.views {
            cx.host.set_transform(view, Self::transform(size));
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/behaviour/effects/scale.rs"]
mod tests;
