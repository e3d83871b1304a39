use crate::animation::timeline::PropertyChange;
use crate::behaviour::behaviour::{AnimationCx, Behaviour, EffectCx, TransitionEffect};

/// Cross-fade between two opacities.
///
/// Presenting runs from `from_alpha` to `to_alpha`; dismissing runs back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeEffect {
    pub from_alpha: f64,
    pub to_alpha: f64,
}

impl FadeEffect {
    pub fn new(from_alpha: f64, to_alpha: f64) -> Self {
        Self {
            from_alpha,
            to_alpha,
        }
    }

    /// Fade from transparent to opaque.
    pub fn fade_in() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Fade from opaque to transparent.
    pub fn fade_out() -> Self {
        Self::new(1.0, 0.0)
    }

    fn ends(&self, presenting: bool) -> (f64, f64) {
        if presenting {
            (self.from_alpha, self.to_alpha)
        } else {
            (self.to_alpha, self.from_alpha)
        }
    }
}

impl TransitionEffect for FadeEffect {
    fn name(&self) -> &'static str {
        "fade"
    }

    fn setup(&mut self, cx: &mut EffectCx<'_>, _paired: Option<&Behaviour>) {
        let (start, _) = self.ends(cx.run.is_presenting);
        for &view in cx.views {
            cx.host.set_alpha(view, start);
        }
    }

    fn register_animations(&mut self, cx: &mut AnimationCx<'_>) {
        let (_, end) = self.ends(cx.run().is_presenting);
        let changes: Vec<_> = cx
            .views()
            .iter()
            .map(|&v| PropertyChange::alpha(v, end))
            .collect();
        cx.add_animation(changes);
    }

    fn complete(&mut self, cx: &mut EffectCx<'_>, presented: bool) {
        let alpha = if presented {
            self.to_alpha
        } else {
            self.from_alpha
        };
        for &view in cx.views {
            cx.host.set_alpha(view, alpha);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/behaviour/effects/fade.rs"]
mod tests;
