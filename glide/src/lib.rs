//! Inertial motion for interactive objects.
//!
//! A [`KinematicBody`] has a position and velocity in a space of any number of dimensions.
//! Its velocity decays exponentially under a friction coefficient as time passes, and may be
//! changed instantaneously by impulses. This is the motion of a flung card, a scrolled list
//! coasting after the finger lifts, or a puck sliding on a table.
//!
//! Time is advanced either by explicit deltas ([`KinematicBody::update()`]), or by caller-supplied
//! timestamps through a [`ClockedBody`], which also infers velocity from a sequence of dragged
//! positions ([`ClockedBody::move_to()`]). Both follow the same law of motion.
//!
//! This library is `no_std` compatible (it requires `alloc`). It does not read any clock itself.
//!
//! ## Package features
//!
//! * `std`: Use `std` float intrinsics, and allow [`std::time::Instant`] as a [`Timestamp`].
//! * `serde`: Implement serialization for [`BodyParams`] and the restricted number types.
//! * `arbitrary`: Implement [`arbitrary::Arbitrary`] for fuzzing.

#![no_std]
// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![cfg_attr(
    not(any(test, feature = "arbitrary")),
    warn(clippy::std_instead_of_core, clippy::std_instead_of_alloc)
)]

#[cfg(any(feature = "std", test))]
extern crate std;
extern crate alloc;

mod body;
pub use body::KinematicBody;

mod clock;
pub use clock::{ClockedBody, Timestamp};

mod error;
pub use error::BodyError;

pub mod math;

mod params;
pub use params::{BodyParams, DEFAULT_REST_EPSILON};

pub mod util;
