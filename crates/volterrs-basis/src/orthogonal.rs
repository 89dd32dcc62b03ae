//! Orthogonal filter banks used to compress kernel memory
//!
//! Instead of one regressor per delay, a projected basis uses the outputs of
//! `K` orthonormal filters driven by the input. Any filter bank can be plugged
//! in through [`OrthogonalBasis`]; [`LaguerreBasis`] is the usual choice for
//! exponentially decaying kernels.

use crate::error::{BasisError, BasisResult};
use scirs2_core::ndarray_ext::{Array2, ArrayView1};
use volterrs_core::Sample;

/// A bank of `dimension()` filters applied to a signal
pub trait OrthogonalBasis {
    /// Number of filters `K`
    fn dimension(&self) -> usize;

    /// Filter the signal through every filter of the bank
    ///
    /// Returns an `(L, K)` matrix whose column `j` is the output of filter
    /// `j`, with `L` the signal length.
    fn project<T: Sample>(&self, signal: &ArrayView1<T>) -> BasisResult<Array2<T>>;
}

/// Orthogonal basis used for every order, or one basis per order
#[derive(Debug)]
pub enum Projection<'a, B> {
    /// Same basis for all orders
    Shared(&'a B),
    /// Basis for order `n` at index `n - 1`
    PerOrder(&'a [B]),
}

impl<B> Clone for Projection<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for Projection<'_, B> {}

impl<'a, B: OrthogonalBasis> Projection<'a, B> {
    /// Check that a per-order list covers exactly `order` orders
    pub fn validate(&self, order: usize) -> BasisResult<()> {
        match self {
            Projection::Shared(_) => Ok(()),
            Projection::PerOrder(list) if list.len() == order => Ok(()),
            Projection::PerOrder(list) => Err(BasisError::ProjectionCount {
                expected: order,
                actual: list.len(),
            }),
        }
    }

    /// Basis used for order `n` (1-based)
    pub fn for_order(&self, n: usize) -> Option<&'a B> {
        match *self {
            Projection::Shared(basis) => Some(basis),
            Projection::PerOrder(list) => n.checked_sub(1).and_then(|i| list.get(i)),
        }
    }

    /// Project `signal` with the basis of order `n` and check the output shape
    pub(crate) fn project_checked<T: Sample>(
        &self,
        signal: &ArrayView1<T>,
        n: usize,
    ) -> BasisResult<Array2<T>> {
        let basis = self.for_order(n).ok_or_else(|| BasisError::ProjectionCount {
            expected: n,
            actual: match self {
                Projection::Shared(_) => 1,
                Projection::PerOrder(list) => list.len(),
            },
        })?;
        let projected = basis.project(signal)?;
        let (rows, columns) = (signal.len(), basis.dimension());
        if projected.dim() != (rows, columns) {
            return Err(BasisError::ProjectionShape {
                order: n,
                rows,
                columns,
                actual: projected.shape().to_vec(),
            });
        }
        Ok(projected)
    }
}

/// Discrete Laguerre filter bank
///
/// Filter 0 is the first-order low-pass `sqrt(1 - a^2) / (1 - a z^-1)`; each
/// following filter appends the all-pass section `(z^-1 - a) / (1 - a z^-1)`.
/// The impulse responses are orthonormal for any pole `|a| < 1`.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use volterrs_basis::{LaguerreBasis, OrthogonalBasis};
///
/// let basis = LaguerreBasis::new(0.0, 3).unwrap();
/// // With a zero pole the filters are pure delays
/// let p = basis.project(&array![1.0, 2.0, 3.0].view()).unwrap();
/// assert_eq!(p, array![[1.0, 0.0, 0.0], [2.0, 1.0, 0.0], [3.0, 2.0, 1.0]]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaguerreBasis {
    pole: f64,
    dimension: usize,
}

impl LaguerreBasis {
    /// Laguerre bank with real pole `pole` and `dimension` filters
    ///
    /// # Errors
    ///
    /// Fails unless `|pole| < 1` and `dimension >= 1`.
    pub fn new(pole: f64, dimension: usize) -> BasisResult<Self> {
        if pole.is_nan() || pole.abs() >= 1.0 {
            return Err(BasisError::invalid_parameter(
                "pole",
                format!("{} is outside the open unit interval", pole),
            ));
        }
        if dimension == 0 {
            return Err(BasisError::invalid_parameter(
                "dimension",
                "at least one filter is required",
            ));
        }
        Ok(Self { pole, dimension })
    }

    /// Pole of the filters
    pub fn pole(&self) -> f64 {
        self.pole
    }
}

impl OrthogonalBasis for LaguerreBasis {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn project<T: Sample>(&self, signal: &ArrayView1<T>) -> BasisResult<Array2<T>> {
        let len = signal.len();
        let a = T::from_real(self.pole);
        let gain = T::from_real((1.0 - self.pole * self.pole).sqrt());
        let mut out = Array2::zeros((len, self.dimension));

        let mut state = T::zero();
        for (t, &x) in signal.iter().enumerate() {
            state = a * state + gain * x;
            out[[t, 0]] = state;
        }

        for k in 1..self.dimension {
            let mut state = T::zero();
            let mut prev_input = T::zero();
            for t in 0..len {
                let input = out[[t, k - 1]];
                state = a * state + prev_input - a * input;
                out[[t, k]] = state;
                prev_input = input;
            }
        }
        Ok(out)
    }
}
