use crate::math::{PositiveSign, ZeroOne};

/// Velocity components smaller in magnitude than this are treated as zero, unless a
/// different threshold is given by [`BodyParams::with_rest_epsilon()`].
pub const DEFAULT_REST_EPSILON: PositiveSign = PositiveSign::new_strict(1e-10);

/// The fixed parameters of a [`KinematicBody`](crate::KinematicBody).
///
/// These cannot be changed after the body is constructed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[non_exhaustive]
pub struct BodyParams {
    /// Fraction of velocity remaining after one unit of time has passed.
    pub friction: ZeroOne,

    /// Velocity components whose magnitude is below this are snapped to zero after each
    /// update, and the body is considered at rest when all components are below it.
    ///
    /// The appropriate value depends on the units of position; the default is suitable
    /// for pixels or meters.
    #[cfg_attr(feature = "serde", serde(default = "default_rest_epsilon"))]
    pub rest_epsilon: PositiveSign,
}

impl BodyParams {
    /// Parameters with the given friction and [`DEFAULT_REST_EPSILON`].
    #[inline]
    pub const fn new(friction: ZeroOne) -> Self {
        Self {
            friction,
            rest_epsilon: DEFAULT_REST_EPSILON,
        }
    }

    /// Replaces the rest threshold.
    #[inline]
    #[must_use]
    pub const fn with_rest_epsilon(mut self, rest_epsilon: PositiveSign) -> Self {
        self.rest_epsilon = rest_epsilon;
        self
    }
}

impl From<ZeroOne> for BodyParams {
    #[inline]
    fn from(friction: ZeroOne) -> Self {
        Self::new(friction)
    }
}

#[cfg(feature = "serde")]
fn default_rest_epsilon() -> PositiveSign {
    DEFAULT_REST_EPSILON
}
