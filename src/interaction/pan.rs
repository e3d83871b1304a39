use crate::interaction::controller::{GestureSample, InteractionStrategy};

/// Distance used before any gesture began.
pub const DEFAULT_MAX_DISTANCE: f64 = 500.0;

fn ratio(distance: f64, max_distance: f64) -> f64 {
    if max_distance > 0.0 {
        (distance / max_distance).max(0.0)
    } else {
        0.0
    }
}

/// Vertical pan: swipe up to present, swipe down to dismiss.
///
/// Progress is normalised by the distance left between the touch and the edge it travels towards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanInteraction {
    max_distance: f64,
}

impl PanInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }
}

impl Default for PanInteraction {
    fn default() -> Self {
        Self {
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

impl InteractionStrategy for PanInteraction {
    fn on_gesture_begin(&mut self, sample: &GestureSample, for_presentation: bool) {
        self.max_distance = if for_presentation {
            sample.location.y
        } else {
            sample.bounds.height - sample.location.y
        };
    }

    fn compute_percent(&self, sample: &GestureSample, for_presentation: bool) -> f64 {
        let sign = if for_presentation { -1.0 } else { 1.0 };
        ratio(sign * sample.translation.y, self.max_distance)
    }

    fn should_begin_presentation(&self, sample: &GestureSample) -> bool {
        sample.velocity.y < 0.0
    }

    fn should_begin_dismissal(&self, sample: &GestureSample) -> bool {
        sample.velocity.y > 0.0
    }
}

/// Pan axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// Pan along one axis with configurable swipe direction and edge insets.
///
/// A forward swipe moves towards the axis origin (up or left). Gestures starting within
/// `leading_inset` of the origin edge or `trailing_inset` of the far edge never begin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisPanInteraction {
    pub axis: Axis,
    pub forward_swipe_presents: bool,
    pub leading_inset: f64,
    pub trailing_inset: f64,
    max_distance: f64,
}

impl AxisPanInteraction {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            forward_swipe_presents: true,
            leading_inset: 0.0,
            trailing_inset: 0.0,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }

    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    pub fn forward_swipe_presents(mut self, presents: bool) -> Self {
        self.forward_swipe_presents = presents;
        self
    }

    pub fn insets(mut self, leading: f64, trailing: f64) -> Self {
        self.leading_inset = leading;
        self.trailing_inset = trailing;
        self
    }

    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    fn along(&self, sample: &GestureSample) -> (f64, f64, f64, f64) {
        match self.axis {
            Axis::Vertical => (
                sample.location.y,
                sample.translation.y,
                sample.velocity.y,
                sample.bounds.height,
            ),
            Axis::Horizontal => (
                sample.location.x,
                sample.translation.x,
                sample.velocity.x,
                sample.bounds.width,
            ),
        }
    }

    /// Whether this gesture travels forward (towards the axis origin).
    fn moves_forward(&self, for_presentation: bool) -> bool {
        for_presentation == self.forward_swipe_presents
    }

    fn within_insets(&self, sample: &GestureSample) -> bool {
        let (location, _, _, extent) = self.along(sample);
        location > self.leading_inset && location < extent - self.trailing_inset
    }
}

impl InteractionStrategy for AxisPanInteraction {
    fn on_gesture_begin(&mut self, sample: &GestureSample, for_presentation: bool) {
        let (location, _, _, extent) = self.along(sample);
        self.max_distance = if self.moves_forward(for_presentation) {
            location
        } else {
            extent - location
        };
    }

    fn compute_percent(&self, sample: &GestureSample, for_presentation: bool) -> f64 {
        let (_, translation, _, _) = self.along(sample);
        let sign = if self.moves_forward(for_presentation) {
            -1.0
        } else {
            1.0
        };
        ratio(sign * translation, self.max_distance)
    }

    fn should_begin_presentation(&self, sample: &GestureSample) -> bool {
        let (_, _, velocity, _) = self.along(sample);
        let heading = if self.moves_forward(true) {
            velocity < 0.0
        } else {
            velocity > 0.0
        };
        heading && self.within_insets(sample)
    }

    fn should_begin_dismissal(&self, sample: &GestureSample) -> bool {
        let (_, _, velocity, _) = self.along(sample);
        let heading = if self.moves_forward(false) {
            velocity < 0.0
        } else {
            velocity > 0.0
        };
        heading && self.within_insets(sample)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/pan.rs"]
mod tests;
