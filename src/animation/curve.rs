/// Easing curve applied to one scheduled animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationCurve {
    /// Slow start and end, fast middle.
    #[default]
    EaseInOut,
    /// Starts slow, ends fast.
    EaseIn,
    /// Starts fast, ends slow.
    EaseOut,
    /// Constant speed.
    Linear,
}

impl AnimationCurve {
    /// Apply this curve to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
        }
    }
}

/// Spring parameters passed through to playback in place of the easing curve.
///
/// `damping` is a damping ratio (1.0 settles without overshoot); `initial_velocity` is expressed
/// in "total distances per unit of animation time".
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringParams {
    /// Damping ratio, clamped into `(0, 1]` when evaluated.
    pub damping: f64,
    /// Initial velocity relative to the animated distance.
    #[serde(default)]
    pub initial_velocity: f64,
}

impl SpringParams {
    const MIN_DAMPING: f64 = 0.01;
    /// `-ln(0.001)`: the envelope has decayed to 0.1% at the end of the animation.
    const SETTLE: f64 = 6.907_755_278_982_137;

    /// Create spring parameters.
    pub fn new(damping: f64, initial_velocity: f64) -> Self {
        Self {
            damping,
            initial_velocity,
        }
    }

    /// Evaluate the spring response at normalized time `t` in `[0, 1]`.
    ///
    /// The natural frequency is chosen so the response settles by `t = 1`; the endpoint is
    /// snapped to exactly `1.0`. Under-damped springs overshoot in between.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return 1.0;
        }
        let zeta = if self.damping.is_finite() {
            self.damping.clamp(Self::MIN_DAMPING, 1.0)
        } else {
            1.0
        };
        let v0 = if self.initial_velocity.is_finite() {
            self.initial_velocity
        } else {
            0.0
        };

        let omega = Self::SETTLE / zeta;
        if zeta >= 1.0 {
            return 1.0 - (-omega * t).exp() * (1.0 + (omega - v0) * t);
        }

        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega * t).exp();
        1.0 - envelope
            * ((omega_d * t).cos() + ((zeta * omega - v0) / omega_d) * (omega_d * t).sin())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
