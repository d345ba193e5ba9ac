//! Advancing bodies by timestamps rather than time deltas.

use core::fmt;
use core::time::Duration;

use crate::body::KinematicBody;
use crate::error::{BodyError, check_dimension};
use crate::math::FreeCoordinate;

// -------------------------------------------------------------------------------------------------

/// A point in time supplied by the caller of [`ClockedBody`] operations.
///
/// The library never reads a clock itself; every timestamp is passed in, so that
/// the results depend only on the arguments.
pub trait Timestamp: Copy + fmt::Debug {
    /// Returns the time from `earlier` to `self`, in the time unit of body velocities.
    ///
    /// The result is negative if `earlier` is actually later than `self`.
    fn elapsed_since(self, earlier: Self) -> f64;
}

/// Plain numbers are timestamps in arbitrary units, such as the milliseconds of a
/// `requestAnimationFrame` callback or the seconds of a simulation.
impl Timestamp for f64 {
    #[inline]
    fn elapsed_since(self, earlier: Self) -> f64 {
        self - earlier
    }
}

/// [`Duration`]s are interpreted as time since some fixed epoch, and elapsed time is
/// measured in seconds.
impl Timestamp for Duration {
    #[inline]
    fn elapsed_since(self, earlier: Self) -> f64 {
        match self.checked_sub(earlier) {
            Some(forward) => forward.as_secs_f64(),
            None => -(earlier - self).as_secs_f64(),
        }
    }
}

/// Elapsed time is measured in seconds.
#[cfg(feature = "std")]
impl Timestamp for std::time::Instant {
    #[inline]
    fn elapsed_since(self, earlier: Self) -> f64 {
        match self.checked_duration_since(earlier) {
            Some(forward) => forward.as_secs_f64(),
            None => -earlier.duration_since(self).as_secs_f64(),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// A [`KinematicBody`] together with the timestamp of its last update, for callers
/// which observe the passage of time as a sequence of clock readings (such as pointer
/// events) rather than as time deltas.
///
/// All time advancement is delegated to [`KinematicBody::update()`] with the elapsed
/// time between timestamps, so a body coasting by [`coast()`](Self::coast) follows
/// exactly the same path as one advanced by explicit deltas.
///
/// ```
/// use glide::{ClockedBody, KinematicBody};
///
/// // Drag the body from 0 to 10 units in half a second, then let go.
/// let mut body = ClockedBody::new(KinematicBody::new(&[0.0], 0.5)?, 0.0);
/// body.move_to(&[10.0], 0.5)?;
/// assert_eq!(body.body().velocity(), [20.0]);
///
/// body.coast(1.5);
/// assert_eq!(body.body().position(), [30.0]);
/// assert_eq!(body.body().velocity(), [10.0]);
/// # Ok::<(), glide::BodyError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ClockedBody<I> {
    body: KinematicBody,
    last_update: I,
}

impl<I: Timestamp> ClockedBody<I> {
    /// Wraps `body`, using `now` as the time of its current state.
    pub fn new(body: KinematicBody, now: I) -> Self {
        Self {
            body,
            last_update: now,
        }
    }

    /// Returns the body, for reading its state.
    #[inline]
    pub fn body(&self) -> &KinematicBody {
        &self.body
    }

    /// Returns the body, for changing its velocity.
    ///
    /// Changes made this way do not affect the timestamp of the last update.
    /// To teleport the body, use [`ClockedBody::set_position()`] instead of
    /// [`KinematicBody::set_position()`], so that the next [`move_to()`](Self::move_to)
    /// measures time from the teleport.
    #[inline]
    pub fn body_mut(&mut self) -> &mut KinematicBody {
        &mut self.body
    }

    /// Discards the timestamp and returns the body.
    #[inline]
    pub fn into_body(self) -> KinematicBody {
        self.body
    }

    /// Returns the timestamp given to the most recent operation which advanced time.
    #[inline]
    pub fn last_update(&self) -> I {
        self.last_update
    }

    /// Moves the body to `position`, sets its velocity to zero, and sets the time of
    /// the last update to `now`.
    pub fn set_position(&mut self, position: &[FreeCoordinate], now: I) -> Result<(), BodyError> {
        self.body.set_position(position)?;
        self.last_update = now;
        Ok(())
    }

    /// Moves the body exactly to `target`, and sets its velocity to the velocity which
    /// would have carried it there from its previous position in the time elapsed
    /// since the last update.
    ///
    /// This is how a dragged object acquires the velocity it will
    /// [coast](Self::coast) with when released.
    ///
    /// If no time, or negative time, has elapsed since the last update, then no
    /// velocity can be inferred, and the previous velocity is kept.
    pub fn move_to(&mut self, target: &[FreeCoordinate], now: I) -> Result<(), BodyError> {
        check_dimension(self.body.dimension(), target)?;

        let elapsed = now.elapsed_since(self.last_update);
        if elapsed > 0.0 && elapsed.is_finite() {
            self.body.track(target, Some(elapsed));
        } else {
            log::debug!(
                "move_to() at {now:?} has elapsed time {elapsed} since {last:?}; \
                keeping previous velocity",
                last = self.last_update,
            );
            self.body.track(target, None);
        }
        self.last_update = now;
        Ok(())
    }

    /// Advances the body to the time `now`, moving according to its velocity and
    /// friction as by [`KinematicBody::update()`].
    ///
    /// If `now` is earlier than the last update, the body moves backward in time.
    pub fn coast(&mut self, now: I) {
        let elapsed = now.elapsed_since(self.last_update);
        self.body.update(elapsed);
        self.last_update = now;
    }
}
