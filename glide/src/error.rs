use crate::math::NotZeroOne;

/// Error from constructing or mutating a [`KinematicBody`](crate::KinematicBody).
///
/// Whenever an operation returns this error, the body it was called on is unchanged.
#[derive(Clone, Copy, Debug, PartialEq, displaydoc::Display)]
#[non_exhaustive]
pub enum BodyError {
    /// friction coefficient {value} is not between 0 and 1
    #[non_exhaustive]
    InvalidFriction {
        /// The rejected coefficient.
        value: f64,
    },

    /// vector has {actual} components but the body has {expected} dimensions
    #[non_exhaustive]
    DimensionMismatch {
        /// The dimension of the body.
        expected: usize,
        /// The length of the vector which was supplied.
        actual: usize,
    },
}

impl core::error::Error for BodyError {}

impl From<NotZeroOne> for BodyError {
    fn from(error: NotZeroOne) -> Self {
        BodyError::InvalidFriction {
            value: error.value(),
        }
    }
}

/// Returns an error unless `vector` has exactly `expected` components.
pub(crate) fn check_dimension(expected: usize, vector: &[f64]) -> Result<(), BodyError> {
    if vector.len() == expected {
        Ok(())
    } else {
        Err(BodyError::DimensionMismatch {
            expected,
            actual: vector.len(),
        })
    }
}
