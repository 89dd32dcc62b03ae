//! Sample types accepted by the kernel and basis routines
//!
//! Input signals may be real or complex. Complex inputs are needed for the
//! term decomposition, where an order-n product is split by the number of
//! conjugated factors.

use scirs2_core::ndarray_ext::ScalarOperand;
use scirs2_core::numeric::{Complex64, Num, NumAssign};
use std::fmt::Debug;

/// Numeric sample of a signal or a kernel coefficient
///
/// Implemented for `f32`, `f64` and `Complex64`. Real samples are their own
/// conjugate.
pub trait Sample: Copy + Num + NumAssign + ScalarOperand + Debug + Send + Sync + 'static {
    /// Complex conjugate
    fn conj(self) -> Self;

    /// Real part, returned as a sample with zero imaginary part
    fn real_only(self) -> Self;

    /// Build a sample from a real value
    fn from_real(value: f64) -> Self;

    /// Real part as `f64`
    fn re(self) -> f64;

    /// Imaginary part as `f64` (zero for real samples)
    fn im(self) -> f64;

    /// Whether the type can carry an imaginary part
    fn is_complex() -> bool;

    /// Squared modulus
    fn norm_sqr(self) -> f64 {
        let (re, im) = (self.re(), self.im());
        re * re + im * im
    }

    /// Integer power by repeated multiplication
    fn pow_n(self, exp: usize) -> Self {
        let mut acc = Self::one();
        for _ in 0..exp {
            acc *= self;
        }
        acc
    }
}

impl Sample for f64 {
    fn conj(self) -> Self {
        self
    }

    fn real_only(self) -> Self {
        self
    }

    fn from_real(value: f64) -> Self {
        value
    }

    fn re(self) -> f64 {
        self
    }

    fn im(self) -> f64 {
        0.0
    }

    fn is_complex() -> bool {
        false
    }
}

impl Sample for f32 {
    fn conj(self) -> Self {
        self
    }

    fn real_only(self) -> Self {
        self
    }

    fn from_real(value: f64) -> Self {
        value as f32
    }

    fn re(self) -> f64 {
        self as f64
    }

    fn im(self) -> f64 {
        0.0
    }

    fn is_complex() -> bool {
        false
    }
}

impl Sample for Complex64 {
    fn conj(self) -> Self {
        Complex64::new(self.re, -self.im)
    }

    fn real_only(self) -> Self {
        Complex64::new(self.re, 0.0)
    }

    fn from_real(value: f64) -> Self {
        Complex64::new(value, 0.0)
    }

    fn re(self) -> f64 {
        self.re
    }

    fn im(self) -> f64 {
        self.im
    }

    fn is_complex() -> bool {
        true
    }
}
