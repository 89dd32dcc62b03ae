//! Exact counting and symmetrization primitives
//!
//! Counting is done in integer arithmetic. Binomial and multinomial values are
//! recomputed on every call; nothing is cached.
//!
//! # Index tuples
//!
//! Kernels of order `n` with memory `m` are addressed by tuples of `n` delay
//! indices in `[0, m)`. The non-redundant tuples are the non-decreasing ones,
//! enumerated in lexicographic order by [`CombinationsWithReplacement`]. That
//! enumeration order is the canonical coefficient order used everywhere else.

use crate::error::{VolterraError, VolterraResult};
use crate::scalar::Sample;
use scirs2_core::ndarray_ext::{ArrayD, ArrayViewD};

/// Exact binomial coefficient `C(n, k)`
///
/// Fails when `k > n`, or with [`VolterraError::Overflow`] when the value
/// does not fit in `usize`.
///
/// # Examples
///
/// ```
/// use volterrs_core::binomial;
///
/// assert_eq!(binomial(5, 2).unwrap(), 10);
/// assert_eq!(binomial(7, 0).unwrap(), 1);
/// assert!(binomial(2, 3).is_err());
/// ```
pub fn binomial(n: usize, k: usize) -> VolterraResult<usize> {
    if k > n {
        return Err(VolterraError::InvalidBinomial { n, k });
    }
    let overflow = || VolterraError::overflow(format!("C({}, {})", n, k));
    let k = k.min(n - k);
    // Each partial product is itself a binomial coefficient, so the division is exact
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc.checked_mul((n - i) as u128).ok_or_else(overflow)? / (i + 1) as u128;
    }
    usize::try_from(acc).map_err(|_| overflow())
}

/// Exact multinomial coefficient `total! / (p1! p2! ... pk!)`
///
/// `parts` holds the multiplicity of each distinct value and must sum to
/// `total`. This is the number of distinct arrangements of a multiset, i.e.
/// the number of permutation-equivalent cells of a kernel entry.
///
/// # Examples
///
/// ```
/// use volterrs_core::multinomial;
///
/// // (0, 0, 1) has 3 distinct arrangements
/// assert_eq!(multinomial(3, &[2, 1]).unwrap(), 3);
/// assert_eq!(multinomial(3, &[1, 1, 1]).unwrap(), 6);
/// ```
pub fn multinomial(total: usize, parts: &[usize]) -> VolterraResult<usize> {
    if parts.iter().sum::<usize>() != total {
        return Err(VolterraError::InvalidMultinomial {
            total,
            parts: parts.to_vec(),
        });
    }
    let mut remaining = total;
    let mut acc = 1usize;
    for &part in parts {
        acc = acc
            .checked_mul(binomial(remaining, part)?)
            .ok_or_else(|| VolterraError::overflow(format!("multinomial of {}", total)))?;
        remaining -= part;
    }
    Ok(acc)
}

/// `n!`, failing with [`VolterraError::Overflow`] past `usize::MAX`
pub fn factorial(n: usize) -> VolterraResult<usize> {
    (1..=n).try_fold(1usize, |acc, i| {
        acc.checked_mul(i)
            .ok_or_else(|| VolterraError::overflow(format!("{}!", n)))
    })
}

/// Multiplicities of the distinct values in a non-decreasing index tuple
pub fn multiplicities(indexes: &[usize]) -> Vec<usize> {
    let mut counts: Vec<usize> = Vec::new();
    let mut previous = None;
    for &idx in indexes {
        if previous == Some(idx) {
            if let Some(last) = counts.last_mut() {
                *last += 1;
            }
        } else {
            counts.push(1);
            previous = Some(idx);
        }
    }
    counts
}

/// Number of permutation-equivalent cells of a non-decreasing index tuple
pub fn permutation_count(indexes: &[usize]) -> VolterraResult<usize> {
    multinomial(indexes.len(), &multiplicities(indexes))
}

/// Iterator over non-decreasing index tuples of length `n` over `[0, m)`
///
/// Yields `C(m + n - 1, n)` tuples in lexicographic order.
///
/// # Examples
///
/// ```
/// use volterrs_core::CombinationsWithReplacement;
///
/// let tuples: Vec<Vec<usize>> = CombinationsWithReplacement::new(2, 2).collect();
/// assert_eq!(tuples, vec![vec![0, 0], vec![0, 1], vec![1, 1]]);
/// ```
#[derive(Debug, Clone)]
pub struct CombinationsWithReplacement {
    m: usize,
    current: Option<Vec<usize>>,
}

impl CombinationsWithReplacement {
    /// Create the iterator for tuples of length `n` over `[0, m)`
    pub fn new(m: usize, n: usize) -> Self {
        let current = if m == 0 && n > 0 {
            None
        } else {
            Some(vec![0; n])
        };
        Self { m, current }
    }
}

impl Iterator for CombinationsWithReplacement {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.take()?;
        let result = current.clone();

        let mut next = current;
        let mut pos = next.len();
        while pos > 0 && next[pos - 1] + 1 == self.m {
            pos -= 1;
        }
        if pos > 0 {
            let value = next[pos - 1] + 1;
            for slot in next[pos - 1..].iter_mut() {
                *slot = value;
            }
            self.current = Some(next);
        }

        Some(result)
    }
}

/// All permutations of `0..n` in lexicographic order
pub fn permutations(n: usize) -> Vec<Vec<usize>> {
    let mut perm: Vec<usize> = (0..n).collect();
    let mut all = vec![perm.clone()];
    loop {
        // Standard next-permutation step
        let Some(i) = (1..perm.len()).rev().find(|&i| perm[i - 1] < perm[i]) else {
            break;
        };
        let pivot = i - 1;
        let Some(j) = (i..perm.len()).rev().find(|&j| perm[j] > perm[pivot]) else {
            break;
        };
        perm.swap(pivot, j);
        perm[i..].reverse();
        all.push(perm.clone());
    }
    all
}

/// All `k`-element subsets of `0..n`, each sorted, in lexicographic order
///
/// # Examples
///
/// ```
/// use volterrs_core::combinations;
///
/// assert_eq!(combinations(3, 2), vec![vec![0, 1], vec![0, 2], vec![1, 2]]);
/// assert_eq!(combinations(2, 0), vec![Vec::<usize>::new()]);
/// ```
pub fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k > n {
        return Vec::new();
    }
    let mut subset: Vec<usize> = (0..k).collect();
    let mut all = vec![subset.clone()];
    loop {
        let Some(i) = (0..k).rev().find(|&i| subset[i] != i + n - k) else {
            break;
        };
        subset[i] += 1;
        for j in i + 1..k {
            subset[j] = subset[j - 1] + 1;
        }
        all.push(subset.clone());
    }
    all
}

/// Check that every dimension of a tensor has the same length
pub fn ensure_square<T>(tensor: &ArrayViewD<T>) -> VolterraResult<()> {
    let shape = tensor.shape();
    if shape.windows(2).any(|w| w[0] != w[1]) {
        return Err(VolterraError::NonSquareKernel {
            shape: shape.to_vec(),
        });
    }
    Ok(())
}

/// Average a square tensor over all `n!` permutations of its axes
///
/// The result holds the same value at every permutation of an index tuple.
/// Symmetrizing an already symmetric tensor leaves it unchanged.
///
/// # Errors
///
/// Returns [`VolterraError::NonSquareKernel`] if the dimensions differ.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::{array, IxDyn};
/// use volterrs_core::symmetrize;
///
/// let t = array![[0.0, 2.0], [0.0, 4.0]].into_dimensionality::<IxDyn>().unwrap();
/// let s = symmetrize(&t.view()).unwrap();
/// assert_eq!(s[[0, 1].as_slice()], 1.0);
/// assert_eq!(s[[1, 0].as_slice()], 1.0);
/// assert_eq!(s[[1, 1].as_slice()], 4.0);
/// ```
pub fn symmetrize<T: Sample>(tensor: &ArrayViewD<T>) -> VolterraResult<ArrayD<T>> {
    ensure_square(tensor)?;
    let n = tensor.ndim();

    let mut acc = ArrayD::<T>::zeros(tensor.raw_dim());
    for perm in permutations(n) {
        acc.zip_mut_with(&tensor.view().permuted_axes(perm), |a, &b| *a += b);
    }

    let scale = T::from_real(factorial(n)? as f64);
    acc.mapv_inplace(|v| v / scale);
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::{Array, IxDyn};

    #[test]
    fn test_binomial_values() {
        assert_eq!(binomial(0, 0).unwrap(), 1);
        assert_eq!(binomial(4, 2).unwrap(), 6);
        assert_eq!(binomial(10, 3).unwrap(), 120);
        assert_eq!(binomial(10, 7).unwrap(), 120);
        assert_eq!(binomial(60, 30).unwrap(), 118_264_581_564_861_424);
    }

    #[test]
    fn test_binomial_overflow_is_an_error() {
        // C(70, 35) = 112186277816662845432 > u64::MAX
        assert_eq!(
            binomial(70, 35),
            Err(VolterraError::overflow("C(70, 35)"))
        );
        assert!(binomial(70, 5).is_ok());
    }

    #[test]
    fn test_factorial_and_multinomial_overflow() {
        assert_eq!(factorial(5).unwrap(), 120);
        assert!(matches!(factorial(40), Err(VolterraError::Overflow { .. })));
        assert!(matches!(
            multinomial(70, &[35, 35]),
            Err(VolterraError::Overflow { .. })
        ));
    }

    #[test]
    fn test_binomial_out_of_domain() {
        assert_eq!(
            binomial(3, 4),
            Err(VolterraError::InvalidBinomial { n: 3, k: 4 })
        );
    }

    #[test]
    fn test_multinomial() {
        assert_eq!(multinomial(4, &[2, 2]).unwrap(), 6);
        assert_eq!(multinomial(4, &[4]).unwrap(), 1);
        assert_eq!(multinomial(5, &[2, 2, 1]).unwrap(), 30);
        assert!(multinomial(4, &[2, 1]).is_err());
    }

    #[test]
    fn test_multiplicities() {
        assert_eq!(multiplicities(&[0, 0, 1, 3, 3, 3]), vec![2, 1, 3]);
        assert_eq!(multiplicities(&[2]), vec![1]);
        assert!(multiplicities(&[]).is_empty());
        assert_eq!(permutation_count(&[0, 1, 1]).unwrap(), 3);
    }

    #[test]
    fn test_combinations_order() {
        let tuples: Vec<Vec<usize>> = CombinationsWithReplacement::new(3, 2).collect();
        assert_eq!(
            tuples,
            vec![
                vec![0, 0],
                vec![0, 1],
                vec![0, 2],
                vec![1, 1],
                vec![1, 2],
                vec![2, 2]
            ]
        );
    }

    #[test]
    fn test_combinations_count() {
        for m in 1..6 {
            for n in 1..5 {
                let count = CombinationsWithReplacement::new(m, n).count();
                assert_eq!(count, binomial(m + n - 1, n).unwrap());
            }
        }
    }

    #[test]
    fn test_combinations_empty_range() {
        assert_eq!(CombinationsWithReplacement::new(0, 2).count(), 0);
    }

    #[test]
    fn test_permutations() {
        let perms = permutations(3);
        assert_eq!(perms.len(), 6);
        assert_eq!(perms[0], vec![0, 1, 2]);
        assert_eq!(perms[5], vec![2, 1, 0]);
    }

    #[test]
    fn test_combinations_without_replacement() {
        let subsets = combinations(4, 2);
        assert_eq!(subsets.len(), binomial(4, 2).unwrap());
        assert_eq!(subsets[0], vec![0, 1]);
        assert_eq!(subsets[5], vec![2, 3]);
        assert_eq!(combinations(3, 3), vec![vec![0, 1, 2]]);
        assert!(combinations(2, 3).is_empty());
    }

    #[test]
    fn test_symmetrize_order_three() {
        let mut t = Array::<f64, _>::zeros(IxDyn(&[2, 2, 2]));
        t[[0, 0, 1].as_slice()] = 3.0;
        let s = symmetrize(&t.view()).unwrap();
        for idx in [[0, 0, 1], [0, 1, 0], [1, 0, 0]] {
            assert!((s[idx.as_slice()] - 1.0).abs() < 1e-12);
        }
        assert_eq!(s[[1, 1, 0].as_slice()], 0.0);
    }

    #[test]
    fn test_symmetrize_non_square() {
        let t = Array::<f64, _>::zeros(IxDyn(&[2, 3]));
        assert!(matches!(
            symmetrize(&t.view()),
            Err(VolterraError::NonSquareKernel { .. })
        ));
    }
}
