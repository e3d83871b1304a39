pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Opaque handle to a view owned by the host's view hierarchy.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ViewId(pub u64);

/// Monotonic identifier of one transition run on one orchestrator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(pub u64);

impl RunId {
    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Direction of a transition run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDirection {
    /// The destination screen is being presented over the source screen.
    Present,
    /// The destination screen is being dismissed back to the source screen.
    Dismiss,
}

impl TransitionDirection {
    /// Return `true` for [`TransitionDirection::Present`].
    pub fn is_presenting(self) -> bool {
        matches!(self, Self::Present)
    }

    /// Resolve the final `presented` flag handed to behaviours.
    ///
    /// `true` means the destination state won.
    pub fn presented(self, cancelled: bool) -> bool {
        self.is_presenting() != cancelled
    }
}

/// Linear interpolation of every affine coefficient.
///
/// Good enough for the translate/scale transforms behaviours produce; rotations are not
/// interpolated along an arc.
pub fn lerp_affine(from: Affine, to: Affine, t: f64) -> Affine {
    let a = from.as_coeffs();
    let b = to.as_coeffs();
    Affine::new(std::array::from_fn(|i| a[i] + (b[i] - a[i]) * t))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
