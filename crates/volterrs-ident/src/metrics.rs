//! Identification error metrics

use crate::error::{IdentError, IdentResult};
use scirs2_core::ndarray_ext::{ArrayView, Dimension};
use volterrs_core::{KernelSeries, Sample};

/// Root-mean-square of the moduli of all entries (0 for an empty array)
pub fn rms<T: Sample, D: Dimension>(values: &ArrayView<'_, T, D>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum: f64 = values.iter().map(|v| v.norm_sqr()).sum();
    (sum / values.len() as f64).sqrt()
}

/// `20 log10(value / reference)`
pub fn db(value: f64, reference: f64) -> f64 {
    20.0 * (value / reference).log10()
}

/// [`db`] with explicit infinities
///
/// A zero numerator gives `-inf`, otherwise a zero denominator gives `+inf`.
///
/// # Examples
///
/// ```
/// use volterrs_ident::safe_db;
///
/// assert_eq!(safe_db(0.0, 1.0), f64::NEG_INFINITY);
/// assert_eq!(safe_db(1.0, 0.0), f64::INFINITY);
/// assert!((safe_db(10.0, 1.0) - 20.0).abs() < 1e-12);
/// ```
pub fn safe_db(num: f64, den: f64) -> f64 {
    if num == 0.0 {
        f64::NEG_INFINITY
    } else if den == 0.0 {
        f64::INFINITY
    } else {
        db(num, den)
    }
}

/// Relative RMS error of each estimated kernel, in estimated-order order
///
/// Each value is `rms(estimate - reference) / rms(reference)`. A zero
/// reference RMS is replaced by 1, and an order missing from the reference is
/// measured against zero. With `in_db` the ratios go through [`safe_db`].
///
/// # Errors
///
/// Returns [`IdentError::ShapeMismatch`] when an estimate and its reference
/// differ in shape.
pub fn error_measure<T: Sample>(
    reference: &KernelSeries<T>,
    estimate: &KernelSeries<T>,
    in_db: bool,
) -> IdentResult<Vec<f64>> {
    let mut errors = Vec::with_capacity(estimate.len());
    for (order, kernel) in estimate.iter() {
        let (rms_error, rms_ref) = match reference.get(order) {
            Some(truth) => {
                if truth.shape() != kernel.shape() {
                    return Err(IdentError::ShapeMismatch(format!(
                        "order {} estimate has shape {:?}, reference has shape {:?}",
                        order,
                        kernel.shape(),
                        truth.shape()
                    )));
                }
                let diff = kernel - truth;
                let rms_ref = rms(&truth.view());
                (rms(&diff.view()), if rms_ref == 0.0 { 1.0 } else { rms_ref })
            }
            None => (rms(&kernel.view()), 1.0),
        };
        errors.push(if in_db {
            safe_db(rms_error, rms_ref)
        } else {
            rms_error / rms_ref
        });
    }
    Ok(errors)
}
