//! Scalar trait for tensor element types.

use faer_traits::ComplexField;
use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

/// Trait for scalar types supported by heisdmrg tensors.
///
/// This wraps faer's `ComplexField` so that any tensor can be viewed as a
/// faer matrix, and adds the plain arithmetic the generic kernels need.
pub trait Scalar:
    ComplexField
    + Copy
    + Debug
    + Default
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + 'static
{
    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;
}

impl Scalar for f64 {
    fn one() -> Self {
        1.0
    }
}
