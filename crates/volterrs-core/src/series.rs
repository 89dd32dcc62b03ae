//! Whole truncated series: per-order kernels and their flat coefficient vector
//!
//! The flat vector of a series is the concatenation of the per-order vectors,
//! order 1 first, each of length `coefficient_count(n, m_n, Vector)`.

use crate::error::{VolterraError, VolterraResult};
use crate::forms::{coefficient_count, kernel_to_vector, vector_to_kernel, KernelForm};
use crate::memory::MemoryLength;
use crate::scalar::Sample;
use scirs2_core::ndarray_ext::{s, Array1, ArrayD, ArrayView1};
use std::collections::BTreeMap;

/// Per-order coefficient counts of a series truncated at `order`
///
/// ```
/// use volterrs_core::{series_coefficient_counts, KernelForm, MemoryLength};
///
/// let counts = series_coefficient_counts(3, &MemoryLength::from(vec![4, 3, 2]), KernelForm::Vector).unwrap();
/// assert_eq!(counts, vec![4, 6, 4]);
/// ```
pub fn series_coefficient_counts(
    order: usize,
    memory: &MemoryLength,
    form: KernelForm,
) -> VolterraResult<Vec<usize>> {
    let memory = memory.per_order(order)?;
    memory
        .iter()
        .enumerate()
        .map(|(idx, &m)| coefficient_count(idx + 1, m, form))
        .collect()
}

/// Total number of coefficients of a series truncated at `order`
pub fn series_coefficient_count(
    order: usize,
    memory: &MemoryLength,
    form: KernelForm,
) -> VolterraResult<usize> {
    series_coefficient_counts(order, memory, form)?
        .into_iter()
        .try_fold(0usize, |acc, count| acc.checked_add(count))
        .ok_or_else(|| VolterraError::overflow("series coefficient count"))
}

/// Cut a flat vector into consecutive chunks of the given lengths
///
/// # Errors
///
/// [`VolterraError::SeriesLength`] if the lengths do not add up to `vec.len()`.
pub fn split_series_vector<T: Sample>(
    vec: &ArrayView1<T>,
    counts: &[usize],
) -> VolterraResult<Vec<Array1<T>>> {
    let expected: usize = counts.iter().sum();
    if vec.len() != expected {
        return Err(VolterraError::SeriesLength {
            expected,
            actual: vec.len(),
        });
    }

    let mut start = 0;
    let mut chunks = Vec::with_capacity(counts.len());
    for &count in counts {
        chunks.push(vec.slice(s![start..start + count]).to_owned());
        start += count;
    }
    Ok(chunks)
}

/// Kernels of a truncated Volterra series, keyed by order
#[derive(Debug, Clone, PartialEq)]
pub struct KernelSeries<T> {
    kernels: BTreeMap<usize, ArrayD<T>>,
}

impl<T> Default for KernelSeries<T> {
    fn default() -> Self {
        Self {
            kernels: BTreeMap::new(),
        }
    }
}

impl<T> KernelSeries<T> {
    /// Empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or replace) the kernel of order `order`
    pub fn insert(&mut self, order: usize, kernel: ArrayD<T>) -> Option<ArrayD<T>> {
        self.kernels.insert(order, kernel)
    }

    /// Kernel of order `order`, if present
    pub fn get(&self, order: usize) -> Option<&ArrayD<T>> {
        self.kernels.get(&order)
    }

    /// Highest order present
    pub fn truncation_order(&self) -> usize {
        self.kernels.keys().next_back().copied().unwrap_or(0)
    }

    /// Orders present, ascending
    pub fn orders(&self) -> impl Iterator<Item = usize> + '_ {
        self.kernels.keys().copied()
    }

    /// `(order, kernel)` pairs, ascending by order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ArrayD<T>)> {
        self.kernels.iter().map(|(n, k)| (*n, k))
    }

    /// Number of kernels
    pub fn len(&self) -> usize {
        self.kernels.len()
    }

    /// Whether the series holds no kernel
    pub fn is_empty(&self) -> bool {
        self.kernels.is_empty()
    }

    /// Underlying order-to-kernel map
    pub fn into_inner(self) -> BTreeMap<usize, ArrayD<T>> {
        self.kernels
    }
}

impl<T> From<BTreeMap<usize, ArrayD<T>>> for KernelSeries<T> {
    fn from(kernels: BTreeMap<usize, ArrayD<T>>) -> Self {
        Self { kernels }
    }
}

impl<T> FromIterator<(usize, ArrayD<T>)> for KernelSeries<T> {
    fn from_iter<I: IntoIterator<Item = (usize, ArrayD<T>)>>(iter: I) -> Self {
        Self {
            kernels: iter.into_iter().collect(),
        }
    }
}

/// Rearrange the flat coefficient vector of a series into kernel tensors
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array1;
/// use volterrs_core::{vector_to_series, KernelForm, MemoryLength};
///
/// let vec = Array1::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0]);
/// let series = vector_to_series(&vec.view(), 2, &MemoryLength::from(2), KernelForm::Triangular).unwrap();
/// assert_eq!(series.get(1).unwrap().shape(), &[2]);
/// assert_eq!(series.get(2).unwrap()[[0, 1].as_slice()], 4.0);
/// ```
pub fn vector_to_series<T: Sample>(
    vec: &ArrayView1<T>,
    order: usize,
    memory: &MemoryLength,
    form: KernelForm,
) -> VolterraResult<KernelSeries<T>> {
    let per_order = memory.per_order(order)?;
    let counts = series_coefficient_counts(order, memory, KernelForm::Vector)?;
    let chunks = split_series_vector(vec, &counts)?;

    chunks
        .iter()
        .zip(per_order.iter())
        .enumerate()
        .map(|(idx, (chunk, &m))| {
            let n = idx + 1;
            vector_to_kernel(&chunk.view(), n, m, form).map(|kernel| (n, kernel))
        })
        .collect::<VolterraResult<BTreeMap<_, _>>>()
        .map(KernelSeries::from)
}

/// Rearrange per-order coefficient vectors into kernel tensors
///
/// Orders may be a subset of `1..=order`; `memory` is normalized against
/// `order`.
pub fn vectors_to_series<T: Sample>(
    vectors: &BTreeMap<usize, Array1<T>>,
    order: usize,
    memory: &MemoryLength,
    form: KernelForm,
) -> VolterraResult<KernelSeries<T>> {
    let per_order = memory.per_order(order)?;
    let mut series = KernelSeries::new();
    for (&n, vec) in vectors {
        if n == 0 || n > order {
            return Err(VolterraError::OrderOutOfRange {
                order: n,
                max_order: order,
            });
        }
        series.insert(n, vector_to_kernel(&vec.view(), n, per_order[n - 1], form)?);
    }
    Ok(series)
}

/// Flatten a series into the concatenation of its per-order vectors
///
/// `form` declares what the kernel tensors hold, as in
/// [`kernel_to_vector`](crate::kernel_to_vector).
pub fn series_to_vector<T: Sample>(
    series: &KernelSeries<T>,
    form: KernelForm,
) -> VolterraResult<Array1<T>> {
    let mut flat = Vec::new();
    for (_, kernel) in series.iter() {
        flat.extend(kernel_to_vector(&kernel.view(), form)?);
    }
    Ok(Array1::from_vec(flat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_counts() {
        let memory = MemoryLength::Uniform(3);
        assert_eq!(
            series_coefficient_counts(3, &memory, KernelForm::Triangular).unwrap(),
            vec![3, 6, 10]
        );
        assert_eq!(
            series_coefficient_count(3, &memory, KernelForm::Unconstrained).unwrap(),
            3 + 9 + 27
        );
    }

    #[test]
    fn test_split_series_vector() {
        let vec = Array1::from_iter((0..6).map(|v| v as f64));
        let chunks = split_series_vector(&vec.view(), &[1, 2, 3]).unwrap();
        assert_eq!(chunks[0].to_vec(), vec![0.0]);
        assert_eq!(chunks[1].to_vec(), vec![1.0, 2.0]);
        assert_eq!(chunks[2].to_vec(), vec![3.0, 4.0, 5.0]);
        assert!(split_series_vector(&vec.view(), &[1, 2]).is_err());
    }

    #[test]
    fn test_series_round_trip_per_order_memory() {
        let memory = MemoryLength::from(vec![4, 2, 3]);
        let total = series_coefficient_count(3, &memory, KernelForm::Vector).unwrap();
        assert_eq!(total, 4 + 3 + 10);

        let vec = Array1::from_iter((0..total).map(|v| (v as f64).sin()));
        let series = vector_to_series(&vec.view(), 3, &memory, KernelForm::Symmetric).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.get(3).unwrap().shape(), &[3, 3, 3]);

        let back = series_to_vector(&series, KernelForm::Symmetric).unwrap();
        for (a, b) in back.iter().zip(vec.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_vector_to_series_wrong_length() {
        let vec = Array1::from_elem(4, 1.0);
        let err = vector_to_series(&vec.view(), 2, &MemoryLength::Uniform(2), KernelForm::Triangular)
            .unwrap_err();
        assert_eq!(
            err,
            VolterraError::SeriesLength {
                expected: 5,
                actual: 4
            }
        );
    }

    #[test]
    fn test_vectors_to_series_subset() {
        let mut vectors = BTreeMap::new();
        vectors.insert(2, Array1::from_vec(vec![1.0, 2.0, 3.0]));
        let series =
            vectors_to_series(&vectors, 3, &MemoryLength::Uniform(2), KernelForm::Triangular)
                .unwrap();
        assert_eq!(series.orders().collect::<Vec<_>>(), vec![2]);
        assert_eq!(series.truncation_order(), 2);

        vectors.insert(4, Array1::from_vec(vec![1.0]));
        assert!(matches!(
            vectors_to_series(&vectors, 3, &MemoryLength::Uniform(2), KernelForm::Triangular),
            Err(VolterraError::OrderOutOfRange { order: 4, .. })
        ));
    }
}
