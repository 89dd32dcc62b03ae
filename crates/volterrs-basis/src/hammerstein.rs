//! Hammerstein combinatorial basis
//!
//! A Hammerstein system has diagonal kernels only, so the order-`n` regressor
//! is the delay embedding of the pointwise power `x^n` (or, per term, of
//! `x^(n-k) * conj(x)^k`).

use crate::arena::delay_embedding;
use crate::basis::CombinatorialBasis;
use crate::config::{BasisKey, Grouping};
use crate::error::BasisResult;
use log::debug;
use scirs2_core::ndarray_ext::{Array1, Array2, ArrayView1};
use volterrs_core::{MemoryLength, Sample};

/// Pointwise `x^(n-k) * conj(x)^k`
///
/// For even `n` and `k = n / 2` this is `|x|^n`, returned with a zero
/// imaginary part.
pub fn term_powers<T: Sample>(signal: &ArrayView1<T>, n: usize, k: usize) -> Array1<T> {
    if n % 2 == 0 && 2 * k == n {
        return signal.mapv(|x| T::from_real(x.norm_sqr().powi(k as i32)));
    }
    signal.mapv(|x| x.pow_n(n - k) * x.conj().pow_n(k))
}

/// Hammerstein matrices of a single order `n` with memory `m`
pub fn hammerstein_order_basis<T: Sample>(
    signal: &ArrayView1<T>,
    n: usize,
    m: usize,
    grouping: Grouping,
) -> BasisResult<Vec<(BasisKey, Array2<T>)>> {
    grouping
        .keys(n)
        .into_iter()
        .map(|key| {
            let powers = term_powers(signal, n, key.conjugate_count());
            let samples: Vec<T> = powers.to_vec();
            Ok((key, delay_embedding(&samples, m).into_array()?))
        })
        .collect()
}

/// Hammerstein combinatorial basis up to order `order`
///
/// Order `n` has shape `(L, M[n-1])`. Term matrices are not rescaled: the
/// term-`(n, k)` matrix equals the diagonal columns of the matching Volterra
/// term matrix.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use volterrs_basis::{hammerstein_basis, Grouping};
///
/// let x = array![1.0, 2.0, 3.0];
/// let basis = hammerstein_basis(&x.view(), 2, 2, Grouping::ByOrder).unwrap();
/// assert_eq!(basis.order(2).unwrap(), &array![[1.0, 0.0], [4.0, 1.0], [9.0, 4.0]]);
/// ```
pub fn hammerstein_basis<T: Sample>(
    signal: &ArrayView1<T>,
    order: usize,
    memory: impl Into<MemoryLength>,
    grouping: Grouping,
) -> BasisResult<CombinatorialBasis<T>> {
    let memory: MemoryLength = memory.into();
    let memory = memory.per_order(order)?;

    let mut basis = CombinatorialBasis::new(grouping);
    for (n, &m) in (1..=order).zip(memory.iter()) {
        for (key, matrix) in hammerstein_order_basis(signal, n, m, grouping)? {
            basis.insert(key, matrix);
        }
        debug!("Hammerstein basis order {}: {} columns", n, m);
    }
    Ok(basis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volterra::volterra_basis;
    use scirs2_core::ndarray_ext::array;
    use scirs2_core::numeric::Complex64;
    use volterrs_core::CombinationsWithReplacement;

    #[test]
    fn test_term_powers() {
        let x = array![Complex64::new(1.0, 1.0)];
        // (1+i)^2 = 2i, conj^2 = -2i, |1+i|^4 = 4
        assert_eq!(term_powers(&x.view(), 2, 0)[0], Complex64::new(0.0, 2.0));
        assert_eq!(term_powers(&x.view(), 4, 2)[0], Complex64::new(4.0, 0.0));
        // (1+i)^2 * (1-i) = 2i * (1-i) = 2 + 2i
        assert_eq!(term_powers(&x.view(), 3, 1)[0], Complex64::new(2.0, 2.0));
    }

    #[test]
    fn test_order_shapes() {
        let x = array![0.5, 1.0, -1.0, 2.0];
        let basis = hammerstein_basis(&x.view(), 3, vec![4, 2, 1], Grouping::ByOrder).unwrap();
        assert_eq!(basis.order(1).unwrap().dim(), (4, 4));
        assert_eq!(basis.order(2).unwrap().dim(), (4, 2));
        assert_eq!(basis.order(3).unwrap().dim(), (4, 1));
        assert_eq!(basis.order(3).unwrap()[[3, 0]], 8.0);
    }

    #[test]
    fn test_terms_equal_volterra_diagonal() {
        let x = array![
            Complex64::new(0.5, -1.0),
            Complex64::new(-0.25, 0.75),
            Complex64::new(1.5, 0.5),
            Complex64::new(-1.0, -0.5),
            Complex64::new(0.25, 1.25)
        ];
        let m = 3;
        let hammerstein = hammerstein_basis(&x.view(), 4, m, Grouping::ByTerm).unwrap();
        let volterra = volterra_basis(&x.view(), 4, m, Grouping::ByTerm).unwrap();

        for (key, ham) in hammerstein.iter() {
            let n = key.order();
            let diagonal: Vec<usize> = CombinationsWithReplacement::new(m, n)
                .enumerate()
                .filter(|(_, idx)| idx.iter().all(|&i| i == idx[0]))
                .map(|(c, _)| c)
                .collect();
            let vol = volterra.get(key).unwrap();
            for (d, &c) in diagonal.iter().enumerate() {
                for t in 0..x.len() {
                    assert!((ham[[t, d]] - vol[[t, c]]).norm() < 1e-9, "{} at ({}, {})", key, t, d);
                }
            }
        }
    }
}
