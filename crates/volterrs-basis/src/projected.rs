//! Combinatorial bases on projected inputs
//!
//! The delayed input samples are replaced by the outputs of an orthogonal
//! filter bank, so an order-`n` matrix has `C(K + n - 1, n)` columns with `K`
//! the bank dimension, independently of the memory length.

use crate::basis::CombinatorialBasis;
use crate::config::{BasisKey, Grouping};
use crate::error::BasisResult;
use crate::hammerstein::term_powers;
use crate::orthogonal::{OrthogonalBasis, Projection};
use log::debug;
use scirs2_core::ndarray_ext::{Array2, ArrayView1};
use volterrs_core::{binomial, combinations, CombinationsWithReplacement, Sample, VolterraError};

/// Products of projected columns for every non-decreasing index tuple
///
/// For `k > 0` each entry is the average over all placements of `k`
/// conjugated factors among the `n` factors.
fn projected_products<T: Sample>(
    projected: &Array2<T>,
    n: usize,
    k: usize,
) -> BasisResult<Array2<T>> {
    let (rows, dim) = projected.dim();
    let nb_coeff = binomial(dim + n - 1, n)?;
    let subsets = combinations(n, k);
    let scale = T::from_real(1.0 / subsets.len() as f64);
    let real_top = n % 2 == 0 && 2 * k == n;

    let mut out = Array2::zeros((rows, nb_coeff));
    let mut factors: Vec<T> = vec![T::zero(); n];
    for (col, idx) in CombinationsWithReplacement::new(dim, n).enumerate() {
        for t in 0..rows {
            for (slot, &j) in factors.iter_mut().zip(idx.iter()) {
                *slot = projected[[t, j]];
            }
            let value = if k == 0 {
                factors.iter().fold(T::one(), |acc, &f| acc * f)
            } else {
                let mut total = T::zero();
                for subset in &subsets {
                    let mut prod = T::one();
                    for (pos, &f) in factors.iter().enumerate() {
                        prod *= if subset.contains(&pos) { f.conj() } else { f };
                    }
                    total += prod;
                }
                total * scale
            };
            out[[t, col]] = if real_top { value.real_only() } else { value };
        }
    }
    Ok(out)
}

/// Volterra basis built from the projections of the input on orthogonal bases
///
/// Order 1 is the projection itself. With [`Projection::Shared`] the
/// projection is computed once and reused for every order.
///
/// # Errors
///
/// Fails on a zero order, a per-order list whose length differs from
/// `order`, or a basis returning a matrix of the wrong shape.
pub fn projected_volterra_basis<T: Sample, B: OrthogonalBasis>(
    signal: &ArrayView1<T>,
    order: usize,
    projection: Projection<'_, B>,
    grouping: Grouping,
) -> BasisResult<CombinatorialBasis<T>> {
    if order == 0 {
        return Err(VolterraError::InvalidOrder(order).into());
    }
    projection.validate(order)?;

    let mut basis = CombinatorialBasis::new(grouping);
    let first = projection.project_checked(signal, 1)?;

    for n in 2..=order {
        let owned;
        let projected = match projection {
            Projection::Shared(_) => &first,
            Projection::PerOrder(_) => {
                owned = projection.project_checked(signal, n)?;
                &owned
            }
        };
        for key in grouping.keys(n) {
            let matrix = projected_products(projected, n, key.conjugate_count())?;
            debug!(
                "Projected Volterra basis {}: {} columns from dimension {}",
                key,
                matrix.ncols(),
                projected.ncols()
            );
            basis.insert(key, matrix);
        }
    }

    let first_key = match grouping {
        Grouping::ByOrder => BasisKey::Order(1),
        Grouping::ByTerm => BasisKey::Term(1, 0),
    };
    basis.insert(first_key, first);
    Ok(basis)
}

/// Hammerstein basis built from projections of the input powers
///
/// Term `(n, k)` is the projection of `x^(n-k) * conj(x)^k` on the basis of
/// order `n`; order `n` is the projection of `x^n`.
pub fn projected_hammerstein_basis<T: Sample, B: OrthogonalBasis>(
    signal: &ArrayView1<T>,
    order: usize,
    projection: Projection<'_, B>,
    grouping: Grouping,
) -> BasisResult<CombinatorialBasis<T>> {
    if order == 0 {
        return Err(VolterraError::InvalidOrder(order).into());
    }
    projection.validate(order)?;

    let mut basis = CombinatorialBasis::new(grouping);
    for n in 1..=order {
        for key in grouping.keys(n) {
            let powers = term_powers(signal, n, key.conjugate_count());
            let matrix = projection.project_checked(&powers.view(), n)?;
            basis.insert(key, matrix);
        }
        debug!("Projected Hammerstein basis order {} done", n);
    }
    Ok(basis)
}
