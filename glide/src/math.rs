//! Numeric types with restricted ranges, used for body parameters.

use core::fmt;
use core::hash;

use ordered_float::NotNan;

/// Component type of positions and velocities.
pub type FreeCoordinate = f64;

// -------------------------------------------------------------------------------------------------

/// A floating-point number which is within the range +0 to +1 (inclusive).
///
/// This is the type of a [friction coefficient](crate::BodyParams::friction), where 1 means
/// velocity never decays and 0 means it vanishes immediately.
///
/// Because NaN and negative zero are excluded, this type implements [`Eq`] and [`Hash`]
/// straightforwardly.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct ZeroOne(f64);

/// A floating-point number which is not NaN and whose sign bit is positive.
///
/// The allowed values consist of positive zero, positive infinity,
/// and every value in between those. This is the type of a
/// [rest threshold](crate::BodyParams::rest_epsilon).
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub struct PositiveSign(f64);

impl ZeroOne {
    /// The number zero, as a constant.
    pub const ZERO: Self = Self(0.0);
    /// The number one, as a constant.
    pub const ONE: Self = Self(1.0);

    /// Wraps the given value in `ZeroOne`.
    ///
    /// * If `value` is in range, returns wrapped `value`.
    /// * If `value` is zero of either sign, returns wrapped positive zero.
    /// * If `value` is out of range or NaN, panics.
    #[track_caller]
    #[inline]
    pub const fn new_strict(value: f64) -> Self {
        match Self::try_new(value) {
            Ok(zo) => zo,
            Err(_) => zero_one_out_of_range_panic(),
        }
    }

    /// Const equivalent of `TryFrom::try_from()`.
    #[inline]
    pub const fn try_new(value: f64) -> Result<Self, NotZeroOne> {
        if value > 0.0 && value <= 1.0 {
            Ok(Self(value))
        } else if value == 0.0 {
            // must be zero, not NaN, but we don’t know the sign
            Ok(Self::ZERO)
        } else {
            Err(NotZeroOne(value))
        }
    }

    /// Unwraps the value without modifying it.
    #[inline]
    pub const fn into_inner(self) -> f64 {
        self.0
    }
}

impl PositiveSign {
    /// The number zero, as a constant.
    pub const ZERO: Self = Self(0.0);

    /// Wraps the given value in `PositiveSign`.
    ///
    /// * If `value` is positive (including positive infinity), returns wrapped `value`.
    /// * If `value` is zero of either sign, returns wrapped positive zero.
    /// * If `value` is negative non-zero or NaN, panics.
    #[track_caller]
    #[inline]
    pub const fn new_strict(value: f64) -> Self {
        match Self::try_new(value) {
            Ok(ps) => ps,
            Err(_) => positive_sign_not_positive_panic(),
        }
    }

    /// Const equivalent of `TryFrom::try_from()`.
    #[inline]
    pub const fn try_new(value: f64) -> Result<Self, NotPositiveSign> {
        if value > 0.0 {
            Ok(Self(value))
        } else if value == 0.0 {
            Ok(Self::ZERO)
        } else {
            Err(NotPositiveSign(value))
        }
    }

    /// Unwraps the value without modifying it.
    #[inline]
    pub const fn into_inner(self) -> f64 {
        self.0
    }
}

// --- Trait implementations -----------------------------------------------------------------------

impl TryFrom<f64> for ZeroOne {
    type Error = NotZeroOne;

    /// Checks that `value` is within the range 0 to 1.
    #[inline]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}
impl TryFrom<f64> for PositiveSign {
    type Error = NotPositiveSign;

    /// Checks that `value` is non-negative and non-NaN.
    #[inline]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<ZeroOne> for f64 {
    #[inline]
    fn from(value: ZeroOne) -> Self {
        value.0
    }
}
impl From<PositiveSign> for f64 {
    #[inline]
    fn from(value: PositiveSign) -> Self {
        value.0
    }
}
impl From<ZeroOne> for NotNan<f64> {
    #[inline]
    fn from(value: ZeroOne) -> Self {
        // SAFETY: `ZeroOne` excludes NaN.
        unsafe { NotNan::new_unchecked(value.0) }
    }
}
impl From<PositiveSign> for NotNan<f64> {
    #[inline]
    fn from(value: PositiveSign) -> Self {
        // SAFETY: `PositiveSign` excludes NaN.
        unsafe { NotNan::new_unchecked(value.0) }
    }
}

impl fmt::Debug for ZeroOne {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Don't print the wrapper, just the value.
        fmt::Debug::fmt(&self.0, f)
    }
}
impl fmt::Display for ZeroOne {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
impl fmt::Debug for PositiveSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}
impl fmt::Display for PositiveSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// The derived PartialEq implementation is okay, but we need to add Eq.
impl Eq for ZeroOne {}
impl Eq for PositiveSign {}

impl hash::Hash for ZeroOne {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        NotNan::from(*self).hash(state)
    }
}
impl hash::Hash for PositiveSign {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        NotNan::from(*self).hash(state)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::de::Error as _;

    impl serde::Serialize for ZeroOne {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.0.serialize(serializer)
        }
    }
    impl<'de> serde::Deserialize<'de> for ZeroOne {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Self::try_from(f64::deserialize(deserializer)?).map_err(D::Error::custom)
        }
    }
    impl serde::Serialize for PositiveSign {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            self.0.serialize(serializer)
        }
    }
    impl<'de> serde::Deserialize<'de> for PositiveSign {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Self::try_from(f64::deserialize(deserializer)?).map_err(D::Error::custom)
        }
    }
}

#[cfg(feature = "arbitrary")]
#[mutants::skip]
impl<'a> arbitrary::Arbitrary<'a> for ZeroOne {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = f64::arbitrary(u)?.abs();
        Self::try_from(value)
            // if it's greater than 1, try to make it less than 1
            .or_else(|_| Self::try_from(value.recip()))
            .map_err(|_| arbitrary::Error::IncorrectFormat)
    }

    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        f64::size_hint(depth)
    }
}
#[cfg(feature = "arbitrary")]
#[mutants::skip]
impl<'a> arbitrary::Arbitrary<'a> for PositiveSign {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let value = f64::arbitrary(u)?;
        Self::try_from(value)
            .or_else(|_| Self::try_from(-value))
            .map_err(|_| arbitrary::Error::IncorrectFormat)
    }

    fn size_hint(depth: usize) -> (usize, Option<usize>) {
        f64::size_hint(depth)
    }
}

// --- Errors --------------------------------------------------------------------------------------

/// Error from attempting to construct a [`ZeroOne`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NotZeroOne(f64);

/// Error from attempting to construct a [`PositiveSign`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NotPositiveSign(f64);

impl NotZeroOne {
    /// The value which was rejected.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl NotPositiveSign {
    /// The value which was rejected.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for NotZeroOne {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value < 0.0 {
            write!(f, "{value} was less than zero")
        } else if value > 1.0 {
            write!(f, "{value} was greater than one")
        } else {
            write!(f, "value was NaN")
        }
    }
}

impl fmt::Display for NotPositiveSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        if value.is_nan() {
            write!(f, "value was NaN")
        } else {
            write!(f, "{value} did not have a positive sign bit")
        }
    }
}

impl core::error::Error for NotZeroOne {}
impl core::error::Error for NotPositiveSign {}

#[track_caller]
#[cold]
const fn positive_sign_not_positive_panic() -> ! {
    panic!("PositiveSign value must not be NaN or negative")
}

#[track_caller]
#[cold]
const fn zero_one_out_of_range_panic() -> ! {
    panic!("ZeroOne value must be between zero and one")
}

// -------------------------------------------------------------------------------------------------

/// Convenient alias for [`ZeroOne::new_strict()`], to be used in tests and pseudo-literals.
#[inline]
pub const fn zo64(value: f64) -> ZeroOne {
    ZeroOne::new_strict(value)
}

/// Convenient alias for [`PositiveSign::new_strict()`], to be used in tests and pseudo-literals.
#[inline]
pub const fn ps64(value: f64) -> PositiveSign {
    PositiveSign::new_strict(value)
}

// -------------------------------------------------------------------------------------------------
