use alloc::boxed::Box;
use alloc::vec;
use core::fmt;
use core::time::Duration;

use manyfmt::Refmt as _;

/// Acts as polyfill for float methods
#[cfg(not(any(feature = "std", test)))]
#[allow(
    unused_imports,
    reason = "unclear why this warns even though it is needed"
)]
use num_traits::float::Float as _;

use crate::error::{BodyError, check_dimension};
use crate::math::{FreeCoordinate, PositiveSign, ZeroOne};
use crate::params::BodyParams;
use crate::util::ConciseDebug;


/// An object with a position and velocity in space of any fixed number of dimensions,
/// whose velocity decays over time according to a friction coefficient.
///
/// The number of dimensions is determined by the initial position and cannot change.
/// Every operation which accepts a vector checks its length against that dimension, and
/// fails without modifying the body if it differs.
///
/// Time is advanced by [`update()`](Self::update) with an explicit time delta.
/// For advancing by timestamps instead, wrap the body in a
/// [`ClockedBody`](crate::ClockedBody).
///
/// ```
/// use glide::KinematicBody;
///
/// let mut body = KinematicBody::new(&[0.0, 0.0], 0.9)?;
/// body.set_velocity(&[10.0, 5.0])?;
/// body.update(1.0);
/// assert_eq!(body.position(), [10.0, 5.0]);
/// # Ok::<(), glide::BodyError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct KinematicBody {
    /// Position.
    position: Box<[FreeCoordinate]>,
    /// Velocity, in position units per unit time. Always the same length as `position`.
    velocity: Box<[FreeCoordinate]>,
    params: BodyParams,
}

impl KinematicBody {
    /// Constructs a body at `initial_position`, with zero velocity and the given
    /// friction coefficient.
    ///
    /// Returns [`BodyError::InvalidFriction`] if `friction` is not between 0 and 1.
    pub fn new(initial_position: &[FreeCoordinate], friction: f64) -> Result<Self, BodyError> {
        let friction = ZeroOne::try_from(friction)?;
        Ok(Self::with_params(initial_position, friction))
    }

    /// Constructs a body at `initial_position`, with zero velocity and the given
    /// already-validated parameters.
    pub fn with_params(
        initial_position: &[FreeCoordinate],
        params: impl Into<BodyParams>,
    ) -> Self {
        Self {
            position: initial_position.into(),
            velocity: vec![0.0; initial_position.len()].into_boxed_slice(),
            params: params.into(),
        }
    }

    /// Constructs a body at the origin of a space with `dimension` dimensions.
    pub fn zeroed(dimension: usize, params: impl Into<BodyParams>) -> Self {
        Self {
            position: vec![0.0; dimension].into_boxed_slice(),
            velocity: vec![0.0; dimension].into_boxed_slice(),
            params: params.into(),
        }
    }

    /// Returns the position of this body.
    #[inline]
    pub fn position(&self) -> &[FreeCoordinate] {
        &self.position
    }

    /// Returns the velocity of this body.
    #[inline]
    pub fn velocity(&self) -> &[FreeCoordinate] {
        &self.velocity
    }

    /// Returns the number of components of the position and velocity.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.position.len()
    }

    /// Returns the parameters this body was constructed with.
    #[inline]
    pub fn params(&self) -> BodyParams {
        self.params
    }

    /// Returns the friction coefficient: the fraction of velocity that remains after one
    /// unit of time.
    #[inline]
    pub fn friction(&self) -> ZeroOne {
        self.params.friction
    }

    /// Returns the threshold below which velocity components are considered zero.
    #[inline]
    pub fn rest_epsilon(&self) -> PositiveSign {
        self.params.rest_epsilon
    }

    /// Returns the magnitude (Euclidean length) of the velocity.
    pub fn speed(&self) -> f64 {
        self.velocity
            .iter()
            .fold(0.0, |sum: f64, &v| v.mul_add(v, sum))
            .sqrt()
    }

    /// Returns whether every component of the velocity is below the rest threshold
    /// in magnitude.
    pub fn is_at_rest(&self) -> bool {
        let epsilon = self.params.rest_epsilon.into_inner();
        self.velocity.iter().all(|&v| negligible(v, epsilon))
    }

    /// Replaces the velocity.
    pub fn set_velocity(&mut self, velocity: &[FreeCoordinate]) -> Result<(), BodyError> {
        check_dimension(self.dimension(), velocity)?;
        self.velocity.copy_from_slice(velocity);
        Ok(())
    }

    /// Adds `delta_v` to the velocity; that is, applies an instantaneous impulse to
    /// a body of unit mass.
    pub fn apply_impulse(&mut self, delta_v: &[FreeCoordinate]) -> Result<(), BodyError> {
        check_dimension(self.dimension(), delta_v)?;
        for (v, dv) in self.velocity.iter_mut().zip(delta_v) {
            *v += dv;
        }
        Ok(())
    }

    /// Moves the body to `position` and sets its velocity to zero.
    ///
    /// This is a teleport: the body does not retain any momentum.
    pub fn set_position(&mut self, position: &[FreeCoordinate]) -> Result<(), BodyError> {
        check_dimension(self.dimension(), position)?;
        self.position.copy_from_slice(position);
        self.stop();
        Ok(())
    }

    /// Sets the velocity to zero without moving.
    pub fn stop(&mut self) {
        self.velocity.fill(0.0);
    }

    /// Moves to `target`, which must have the correct dimension. If `elapsed` is given,
    /// sets the velocity to the displacement divided by `elapsed`; otherwise leaves the
    /// velocity unchanged.
    pub(crate) fn track(&mut self, target: &[FreeCoordinate], elapsed: Option<f64>) {
        debug_assert_eq!(target.len(), self.dimension());
        for ((p, v), &t) in self
            .position
            .iter_mut()
            .zip(self.velocity.iter_mut())
            .zip(target)
        {
            if let Some(elapsed) = elapsed {
                *v = (t - *p) / elapsed;
            }
            *p = t;
        }
    }

    /// Advances time by `delta_t`.
    ///
    /// First, the position is moved by the velocity times `delta_t`, using the velocity as
    /// it was before this step. Then the velocity is multiplied by
    /// <code>friction<sup>delta_t</sup></code>, so that the result is independent of how
    /// an interval is divided into steps, and components below the rest threshold are
    /// set to exactly zero.
    ///
    /// `delta_t` may be zero (no change) or negative, which moves the body backward along
    /// its path and, for friction less than 1, increases its speed. A zero component of
    /// velocity always stays zero, even when the friction factor is infinite
    /// (zero friction and negative time).
    pub fn update(&mut self, delta_t: f64) {
        let was_at_rest = self.is_at_rest();

        for (p, &v) in self.position.iter_mut().zip(self.velocity.iter()) {
            if v != 0.0 {
                *p = v.mul_add(delta_t, *p);
            }
        }

        let decay = self.params.friction.into_inner().powf(delta_t);
        let epsilon = self.params.rest_epsilon.into_inner();
        for v in self.velocity.iter_mut() {
            if *v != 0.0 {
                *v *= decay;
            }
            if v.abs() < epsilon {
                *v = 0.0;
            }
        }

        if !was_at_rest && self.is_at_rest() {
            // `&mut Self` has no `Fmt` impl of its own.
            log::trace!("body came to rest at {}", (*self).refmt(&ConciseDebug));
        }
    }

    /// Advances time by `duration`, interpreted as seconds.
    ///
    /// This is equivalent to [`update()`](Self::update) with
    /// [`Duration::as_secs_f64()`], for bodies whose velocity is in units per second.
    pub fn update_duration(&mut self, duration: Duration) {
        self.update(duration.as_secs_f64());
    }
}

impl manyfmt::Fmt<ConciseDebug> for KinematicBody {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>, _: &ConciseDebug) -> fmt::Result {
        write!(fmt, "position ")?;
        manyfmt::Fmt::fmt(&self.position[..], fmt, &ConciseDebug)?;
        write!(fmt, " velocity ")?;
        manyfmt::Fmt::fmt(&self.velocity[..], fmt, &ConciseDebug)
    }
}

/// Whether `v` is treated as zero velocity.
///
/// Exact zero counts even if `epsilon` is zero.
#[inline]
fn negligible(v: f64, epsilon: f64) -> bool {
    v == 0.0 || v.abs() < epsilon
}
