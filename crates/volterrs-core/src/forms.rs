//! Conversion between vector, triangular and symmetric kernel forms
//!
//! A kernel of order `n` and memory `m` is stored for estimation as a flat
//! vector of its `C(m + n - 1, n)` non-redundant coefficients, ordered as the
//! non-decreasing index tuples enumerated by
//! [`CombinationsWithReplacement`](crate::CombinationsWithReplacement).
//!
//! - The *triangular* tensor holds each coefficient at its non-decreasing
//!   index tuple and zero elsewhere.
//! - The *symmetric* tensor spreads each coefficient evenly over all of its
//!   permutation-equivalent cells, so contracting it with the full
//!   input-product tensor gives the same output as the triangular form.
//!
//! [`vector_to_kernel`] and [`kernel_to_vector`] are mutual inverses for both
//! tensor forms.

use crate::combinatorics::{binomial, ensure_square, permutation_count, symmetrize};
use crate::combinatorics::CombinationsWithReplacement;
use crate::error::{VolterraError, VolterraResult};
use crate::scalar::Sample;
use log::debug;
use scirs2_core::ndarray_ext::{Array1, ArrayD, ArrayView1, ArrayViewD, IxDyn};
use std::fmt;
use std::str::FromStr;

/// Representation of a Volterra kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KernelForm {
    /// Non-decreasing index tuples only
    Triangular,
    /// Identical value at every permutation of an index tuple
    Symmetric,
    /// Flat vector of the non-redundant coefficients
    Vector,
    /// Dense tensor with no assumed structure
    Unconstrained,
}

impl KernelForm {
    /// Whether the form stores only the non-redundant coefficients
    pub fn is_reduced(&self) -> bool {
        !matches!(self, KernelForm::Unconstrained)
    }
}

impl fmt::Display for KernelForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KernelForm::Triangular => "triangular",
            KernelForm::Symmetric => "symmetric",
            KernelForm::Vector => "vector",
            KernelForm::Unconstrained => "unconstrained",
        };
        f.write_str(name)
    }
}

impl FromStr for KernelForm {
    type Err = VolterraError;

    /// Parse a form name; unknown names are rejected
    ///
    /// ```
    /// use volterrs_core::KernelForm;
    ///
    /// assert_eq!("sym".parse::<KernelForm>().unwrap(), KernelForm::Symmetric);
    /// assert_eq!("TRI".parse::<KernelForm>().unwrap(), KernelForm::Triangular);
    /// assert!("diag".parse::<KernelForm>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tri" | "triangular" => Ok(KernelForm::Triangular),
            "sym" | "symmetric" => Ok(KernelForm::Symmetric),
            "vec" | "vector" => Ok(KernelForm::Vector),
            "dense" | "unconstrained" => Ok(KernelForm::Unconstrained),
            _ => Err(VolterraError::unknown_name(
                "kernel form",
                s,
                "'tri', 'sym', 'vec' or 'dense'",
            )),
        }
    }
}

/// Number of meaningful coefficients of an order-`n` kernel with memory `m`
///
/// `C(m + n - 1, n)` for the reduced forms, `m^n` for the unconstrained one.
///
/// # Errors
///
/// [`VolterraError::Overflow`] if the count does not fit in `usize`.
///
/// # Examples
///
/// ```
/// use volterrs_core::{coefficient_count, KernelForm};
///
/// assert_eq!(coefficient_count(2, 3, KernelForm::Vector).unwrap(), 6);
/// assert_eq!(coefficient_count(2, 3, KernelForm::Unconstrained).unwrap(), 9);
/// ```
pub fn coefficient_count(n: usize, m: usize, form: KernelForm) -> VolterraResult<usize> {
    if form.is_reduced() {
        if m == 0 {
            return Ok(0);
        }
        binomial(m + n - 1, n)
    } else {
        u32::try_from(n)
            .ok()
            .and_then(|exp| m.checked_pow(exp))
            .ok_or_else(|| VolterraError::overflow(format!("{}^{}", m, n)))
    }
}

/// Rearrange an order-`n` coefficient vector into a kernel tensor of side `m`
///
/// `form` selects the output: [`KernelForm::Triangular`] returns the tensor as
/// written, [`KernelForm::Symmetric`] returns its symmetrization.
///
/// # Errors
///
/// - [`VolterraError::VectorLength`] if `vec` does not hold
///   `coefficient_count(n, m, Vector)` entries
/// - [`VolterraError::UnsupportedForm`] for the vector and unconstrained forms
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use volterrs_core::{vector_to_kernel, KernelForm};
///
/// let vec = array![1.0, 2.0, 3.0];
/// let tri = vector_to_kernel(&vec.view(), 2, 2, KernelForm::Triangular).unwrap();
/// assert_eq!(tri[[0, 1].as_slice()], 2.0);
/// assert_eq!(tri[[1, 0].as_slice()], 0.0);
///
/// let sym = vector_to_kernel(&vec.view(), 2, 2, KernelForm::Symmetric).unwrap();
/// assert_eq!(sym[[0, 1].as_slice()], 1.0);
/// assert_eq!(sym[[1, 0].as_slice()], 1.0);
/// ```
pub fn vector_to_kernel<T: Sample>(
    vec: &ArrayView1<T>,
    n: usize,
    m: usize,
    form: KernelForm,
) -> VolterraResult<ArrayD<T>> {
    if !matches!(form, KernelForm::Triangular | KernelForm::Symmetric) {
        return Err(VolterraError::unsupported_form("vector_to_kernel", form));
    }

    let expected = coefficient_count(n, m, KernelForm::Vector)?;
    if vec.len() != expected {
        return Err(VolterraError::vector_length(n, expected, vec.len()));
    }

    let mut kernel = ArrayD::<T>::zeros(IxDyn(&vec![m; n]));
    for (value, indexes) in vec.iter().zip(CombinationsWithReplacement::new(m, n)) {
        kernel[indexes.as_slice()] = *value;
    }

    match form {
        KernelForm::Symmetric => symmetrize(&kernel.view()),
        _ => Ok(kernel),
    }
}

/// Rearrange a kernel tensor into its coefficient vector
///
/// The order and memory are read from the tensor (`ndim` and side length).
/// `form` declares what the tensor holds:
///
/// - [`KernelForm::Triangular`]: values are read directly
/// - [`KernelForm::Symmetric`]: each value is multiplied by the number of its
///   permutation-equivalent cells
/// - [`KernelForm::Unconstrained`]: the tensor is symmetrized first, then read
///   as symmetric
///
/// # Errors
///
/// - [`VolterraError::NonSquareKernel`] if the dimensions differ
/// - [`VolterraError::UnsupportedForm`] for the vector form
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use volterrs_core::{kernel_to_vector, vector_to_kernel, KernelForm};
///
/// let vec = array![1.0, 2.0, 3.0];
/// let sym = vector_to_kernel(&vec.view(), 2, 2, KernelForm::Symmetric).unwrap();
/// let back = kernel_to_vector(&sym.view(), KernelForm::Symmetric).unwrap();
/// assert_eq!(back, vec);
/// ```
pub fn kernel_to_vector<T: Sample>(
    kernel: &ArrayViewD<T>,
    form: KernelForm,
) -> VolterraResult<Array1<T>> {
    ensure_square(kernel)?;
    let n = kernel.ndim();
    let m = kernel.shape().first().copied().unwrap_or(0);

    let symmetrized;
    let source = match form {
        KernelForm::Triangular | KernelForm::Symmetric => kernel.view(),
        KernelForm::Unconstrained => {
            debug!("symmetrizing unconstrained order-{} kernel before extraction", n);
            symmetrized = symmetrize(kernel)?;
            symmetrized.view()
        }
        KernelForm::Vector => {
            return Err(VolterraError::unsupported_form("kernel_to_vector", form));
        }
    };
    let weighted = !matches!(form, KernelForm::Triangular);

    let mut vec = Vec::with_capacity(coefficient_count(n, m, KernelForm::Vector)?);
    for indexes in CombinationsWithReplacement::new(m, n) {
        let value = source[indexes.as_slice()];
        if weighted {
            let factor = permutation_count(&indexes)?;
            vec.push(value * T::from_real(factor as f64));
        } else {
            vec.push(value);
        }
    }

    Ok(Array1::from_vec(vec))
}

/// Place diagonal (Hammerstein) coefficients on the diagonal of an order-`n` tensor
///
/// Entry `d` of `diag` is written at index `(d, d, ..., d)`.
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use volterrs_core::diagonal_to_kernel;
///
/// let k = diagonal_to_kernel(&array![1.0, 2.0].view(), 3);
/// assert_eq!(k.shape(), &[2, 2, 2]);
/// assert_eq!(k[[1, 1, 1].as_slice()], 2.0);
/// assert_eq!(k[[0, 1, 1].as_slice()], 0.0);
/// ```
pub fn diagonal_to_kernel<T: Sample>(diag: &ArrayView1<T>, n: usize) -> ArrayD<T> {
    let m = diag.len();
    let mut kernel = ArrayD::<T>::zeros(IxDyn(&vec![m; n]));
    for (d, value) in diag.iter().enumerate() {
        kernel[vec![d; n].as_slice()] = *value;
    }
    kernel
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::{array, Array, Array1};
    use scirs2_core::numeric::Complex64;

    #[test]
    fn test_coefficient_count() {
        assert_eq!(coefficient_count(1, 5, KernelForm::Triangular).unwrap(), 5);
        assert_eq!(coefficient_count(3, 4, KernelForm::Symmetric).unwrap(), 20);
        assert_eq!(coefficient_count(3, 4, KernelForm::Unconstrained).unwrap(), 64);
        assert_eq!(coefficient_count(2, 0, KernelForm::Vector).unwrap(), 0);
    }

    #[test]
    fn test_coefficient_count_overflow() {
        assert!(matches!(
            coefficient_count(36, 35, KernelForm::Vector),
            Err(VolterraError::Overflow { .. })
        ));
        assert_eq!(
            coefficient_count(40, 10, KernelForm::Unconstrained),
            Err(VolterraError::overflow("10^40"))
        );
        // The same size is rejected by the conversions instead of panicking
        let vec = Array1::<f64>::zeros(3);
        assert!(matches!(
            vector_to_kernel(&vec.view(), 36, 35, KernelForm::Triangular),
            Err(VolterraError::Overflow { .. })
        ));
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!("Triangular".parse::<KernelForm>().unwrap(), KernelForm::Triangular);
        assert_eq!("VEC".parse::<KernelForm>().unwrap(), KernelForm::Vector);
        assert!(matches!(
            "symetric".parse::<KernelForm>(),
            Err(VolterraError::UnknownName { .. })
        ));
    }

    #[test]
    fn test_vector_to_kernel_order_three_layout() {
        let vec = Array1::from_iter((1..=4).map(|v| v as f64));
        let tri = vector_to_kernel(&vec.view(), 3, 2, KernelForm::Triangular).unwrap();
        assert_eq!(tri[[0, 0, 0].as_slice()], 1.0);
        assert_eq!(tri[[0, 0, 1].as_slice()], 2.0);
        assert_eq!(tri[[0, 1, 1].as_slice()], 3.0);
        assert_eq!(tri[[1, 1, 1].as_slice()], 4.0);
        assert_eq!(tri[[1, 0, 0].as_slice()], 0.0);
    }

    #[test]
    fn test_vector_to_kernel_wrong_length() {
        let vec = array![1.0, 2.0];
        let err = vector_to_kernel(&vec.view(), 2, 2, KernelForm::Triangular).unwrap_err();
        assert_eq!(err, VolterraError::vector_length(2, 3, 2));
    }

    #[test]
    fn test_vector_to_kernel_rejects_vector_form() {
        let vec = array![1.0, 2.0, 3.0];
        assert!(matches!(
            vector_to_kernel(&vec.view(), 2, 2, KernelForm::Vector),
            Err(VolterraError::UnsupportedForm { .. })
        ));
    }

    #[test]
    fn test_round_trip_triangular() {
        let vec = Array1::from_iter((0..10).map(|v| v as f64 * 0.5 - 1.0));
        let tri = vector_to_kernel(&vec.view(), 3, 3, KernelForm::Triangular).unwrap();
        let back = kernel_to_vector(&tri.view(), KernelForm::Triangular).unwrap();
        assert_eq!(back, vec);
    }

    #[test]
    fn test_round_trip_symmetric_complex() {
        let vec = Array1::from_iter((0..6).map(|v| Complex64::new(v as f64, 1.0 - v as f64)));
        let sym = vector_to_kernel(&vec.view(), 2, 3, KernelForm::Symmetric).unwrap();
        let back = kernel_to_vector(&sym.view(), KernelForm::Symmetric).unwrap();
        for (a, b) in back.iter().zip(vec.iter()) {
            assert!((a - b).norm() < 1e-12);
        }
    }

    #[test]
    fn test_unconstrained_kernel_is_symmetrized() {
        // Full kernel h[i][j] with h[0][1] = 1, h[1][0] = 3 acts like a
        // triangular coefficient of 4 on x[t] x[t-1]
        let mut dense = Array::<f64, _>::zeros(IxDyn(&[2, 2]));
        dense[[0, 1].as_slice()] = 1.0;
        dense[[1, 0].as_slice()] = 3.0;
        dense[[1, 1].as_slice()] = 5.0;
        let vec = kernel_to_vector(&dense.view(), KernelForm::Unconstrained).unwrap();
        assert_eq!(vec, array![0.0, 4.0, 5.0]);
    }

    #[test]
    fn test_kernel_to_vector_non_square() {
        let dense = Array::<f64, _>::zeros(IxDyn(&[2, 3]));
        assert!(matches!(
            kernel_to_vector(&dense.view(), KernelForm::Triangular),
            Err(VolterraError::NonSquareKernel { .. })
        ));
    }

    #[test]
    fn test_diagonal_to_kernel_first_order() {
        let k = diagonal_to_kernel(&array![3.0, 4.0, 5.0].view(), 1);
        assert_eq!(k.shape(), &[3]);
        assert_eq!(k[[2].as_slice()], 5.0);
    }
}
