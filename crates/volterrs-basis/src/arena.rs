//! Owned column buffers and delay embedding
//!
//! Basis matrices are assembled column by column. A [`ColumnArena`] is a
//! preallocated column-major buffer for one order (or one term); every write
//! addresses a column by index and a row range, so delayed copies of a column
//! are plain `copy_within` calls on the buffer.

use crate::error::BasisResult;
use scirs2_core::ndarray_ext::{Array2, ArrayView1};
use volterrs_core::{Sample, VolterraError};

/// Preallocated column-major matrix
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnArena<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Sample> ColumnArena<T> {
    /// Zero-filled arena with `rows` rows and `cols` columns
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::zero(); rows * cols],
        }
    }

    /// Number of rows (time samples)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Column `col` as a slice
    pub fn column(&self, col: usize) -> &[T] {
        &self.data[col * self.rows..(col + 1) * self.rows]
    }

    /// Column `col` as a mutable slice
    pub fn column_mut(&mut self, col: usize) -> &mut [T] {
        &mut self.data[col * self.rows..(col + 1) * self.rows]
    }

    /// Copy column `src` into column `dst`, delayed by `offset` rows
    ///
    /// Rows `[offset, rows)` of `dst` receive rows `[0, rows - offset)` of
    /// `src`; rows before `offset` are left untouched.
    pub fn copy_delayed(&mut self, src: usize, dst: usize, offset: usize) {
        if offset >= self.rows {
            return;
        }
        let start = src * self.rows;
        let len = self.rows - offset;
        self.data
            .copy_within(start..start + len, dst * self.rows + offset);
    }

    /// New arena holding the listed columns, in the listed order
    pub fn select(&self, keep: &[usize]) -> Self {
        let mut data = Vec::with_capacity(keep.len() * self.rows);
        for &col in keep {
            data.extend_from_slice(self.column(col));
        }
        Self {
            rows: self.rows,
            cols: keep.len(),
            data,
        }
    }

    /// Multiply every entry by `factor`
    pub fn scale(&mut self, factor: T) {
        for value in self.data.iter_mut() {
            *value *= factor;
        }
    }

    /// Convert into an `(rows, cols)` matrix
    pub fn into_array(self) -> BasisResult<Array2<T>> {
        let (rows, cols) = (self.rows, self.cols);
        let transposed =
            Array2::from_shape_vec((cols, rows), self.data).map_err(VolterraError::shape)?;
        Ok(transposed.reversed_axes())
    }
}

/// Delay-embedding arena of a sequence: column `d` holds `x[t - d]`, zero for `t < d`
///
/// This is the Toeplitz matrix with first column `x` and a zero first row past
/// the diagonal, built in `O(L * m)`.
pub fn delay_embedding<T: Sample>(signal: &[T], m: usize) -> ColumnArena<T> {
    let rows = signal.len();
    let mut arena = ColumnArena::zeros(rows, m);
    for d in 0..m.min(rows) {
        arena.column_mut(d)[d..].copy_from_slice(&signal[..rows - d]);
    }
    arena
}

/// Delay-embedding matrix of a signal, shape `(L, m)`
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use volterrs_basis::delay_matrix;
///
/// let phi = delay_matrix(&array![1.0, 2.0, 3.0].view(), 2).unwrap();
/// assert_eq!(phi, array![[1.0, 0.0], [2.0, 1.0], [3.0, 2.0]]);
/// ```
pub fn delay_matrix<T: Sample>(signal: &ArrayView1<T>, m: usize) -> BasisResult<Array2<T>> {
    let samples: Vec<T> = signal.iter().copied().collect();
    delay_embedding(&samples, m).into_array()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_delay_embedding_columns() {
        let arena = delay_embedding(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(arena.column(0), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(arena.column(1), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(arena.column(2), &[0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_delay_embedding_memory_longer_than_signal() {
        let arena = delay_embedding(&[5.0, 6.0], 4);
        assert_eq!(arena.cols(), 4);
        assert_eq!(arena.column(1), &[0.0, 5.0]);
        assert_eq!(arena.column(3), &[0.0, 0.0]);
    }

    #[test]
    fn test_copy_delayed() {
        let mut arena = ColumnArena::zeros(4, 2);
        arena.column_mut(0).copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        arena.copy_delayed(0, 1, 2);
        assert_eq!(arena.column(1), &[0.0, 0.0, 1.0, 2.0]);

        // Offsets past the end leave the column unchanged
        arena.copy_delayed(0, 1, 7);
        assert_eq!(arena.column(1), &[0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_select_and_into_array() {
        let arena = delay_embedding(&[1.0, 2.0, 3.0], 3);
        let picked = arena.select(&[2, 0]);
        let matrix = picked.into_array().unwrap();
        assert_eq!(matrix, array![[0.0, 1.0], [0.0, 2.0], [1.0, 3.0]]);
    }

    #[test]
    fn test_scale() {
        let mut arena = delay_embedding(&[1.0, 2.0], 1);
        arena.scale(0.5);
        assert_eq!(arena.column(0), &[0.5, 1.0]);
    }
}
