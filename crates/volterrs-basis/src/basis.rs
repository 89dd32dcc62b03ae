//! The combinatorial basis container

use crate::config::{BasisKey, Grouping};
use crate::error::BasisResult;
use scirs2_core::ndarray_ext::{s, Array2};
use std::collections::btree_map;
use std::collections::BTreeMap;
use volterrs_core::{Sample, VolterraError};

/// Basis matrices keyed by order or by term
///
/// Every matrix has one row per input sample. Keys iterate in ascending
/// order, so order `n` comes before order `n + 1` and term `(n, k)` before
/// `(n, k + 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinatorialBasis<T> {
    grouping: Grouping,
    matrices: BTreeMap<BasisKey, Array2<T>>,
}

impl<T: Sample> CombinatorialBasis<T> {
    /// Empty basis with the given grouping
    pub fn new(grouping: Grouping) -> Self {
        Self {
            grouping,
            matrices: BTreeMap::new(),
        }
    }

    /// Grouping of the stored matrices
    pub fn grouping(&self) -> Grouping {
        self.grouping
    }

    /// Store a matrix, replacing any previous one under the same key
    pub fn insert(&mut self, key: BasisKey, matrix: Array2<T>) -> Option<Array2<T>> {
        self.matrices.insert(key, matrix)
    }

    /// Matrix stored under `key`
    pub fn get(&self, key: &BasisKey) -> Option<&Array2<T>> {
        self.matrices.get(key)
    }

    /// Matrix of order `n` (order grouping only)
    pub fn order(&self, n: usize) -> Option<&Array2<T>> {
        self.matrices.get(&BasisKey::Order(n))
    }

    /// Matrix of term `(n, k)` (term grouping only)
    pub fn term(&self, n: usize, k: usize) -> Option<&Array2<T>> {
        self.matrices.get(&BasisKey::Term(n, k))
    }

    /// Iterate over `(key, matrix)` pairs in key order
    pub fn iter(&self) -> btree_map::Iter<'_, BasisKey, Array2<T>> {
        self.matrices.iter()
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &BasisKey> {
        self.matrices.keys()
    }

    /// Number of matrices
    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    /// Whether no matrix is stored
    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    /// Highest order present
    pub fn truncation_order(&self) -> Option<usize> {
        self.matrices.keys().map(BasisKey::order).max()
    }

    /// Number of rows shared by all matrices
    pub fn rows(&self) -> Option<usize> {
        self.matrices.values().next().map(|m| m.nrows())
    }

    /// Total number of columns over all matrices
    pub fn total_columns(&self) -> usize {
        self.matrices.values().map(|m| m.ncols()).sum()
    }

    /// Horizontal concatenation of all matrices in key order
    ///
    /// With order grouping this is the full regressor of the direct
    /// least-squares problem.
    pub fn stacked(&self) -> BasisResult<Array2<T>> {
        stack_columns(self.matrices.iter())
    }

    /// Consume into the underlying map
    pub fn into_inner(self) -> BTreeMap<BasisKey, Array2<T>> {
        self.matrices
    }
}

/// Horizontal concatenation of keyed matrices, in the given order
///
/// # Errors
///
/// Fails with a shape error if the matrices do not all have the same number
/// of rows.
pub fn stack_columns<'a, T, I>(matrices: I) -> BasisResult<Array2<T>>
where
    T: Sample,
    I: IntoIterator<Item = (&'a BasisKey, &'a Array2<T>)>,
{
    let matrices: Vec<(&BasisKey, &Array2<T>)> = matrices.into_iter().collect();
    let rows = matrices.first().map_or(0, |(_, m)| m.nrows());
    let cols = matrices.iter().map(|(_, m)| m.ncols()).sum();

    let mut stacked = Array2::zeros((rows, cols));
    let mut offset = 0;
    for (key, matrix) in matrices {
        if matrix.nrows() != rows {
            return Err(VolterraError::shape(format!(
                "{} has {} rows, expected {}",
                key,
                matrix.nrows(),
                rows
            ))
            .into());
        }
        stacked
            .slice_mut(s![.., offset..offset + matrix.ncols()])
            .assign(matrix);
        offset += matrix.ncols();
    }
    Ok(stacked)
}

impl<T> IntoIterator for CombinatorialBasis<T> {
    type Item = (BasisKey, Array2<T>);
    type IntoIter = btree_map::IntoIter<BasisKey, Array2<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.matrices.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a CombinatorialBasis<T> {
    type Item = (&'a BasisKey, &'a Array2<T>);
    type IntoIter = btree_map::Iter<'a, BasisKey, Array2<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.matrices.iter()
    }
}
