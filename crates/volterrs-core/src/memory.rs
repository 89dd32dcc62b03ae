//! Memory-length arguments
//!
//! A memory length is given either once for every order or explicitly per
//! order. [`MemoryLength::per_order`] validates it against the truncation
//! order and returns a fresh per-order vector; the caller's value is never
//! modified.

use crate::error::{VolterraError, VolterraResult};

/// Memory length (in samples) of the kernels of a truncated series
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemoryLength {
    /// Same memory for every order
    Uniform(usize),
    /// One memory length per order, starting at order 1
    PerOrder(Vec<usize>),
}

impl MemoryLength {
    /// Explicit per-order memory lengths for truncation order `order`
    ///
    /// # Errors
    ///
    /// - [`VolterraError::InvalidOrder`] if `order` is 0
    /// - [`VolterraError::MemoryLengthMismatch`] if a per-order list does not
    ///   have `order` entries
    /// - [`VolterraError::ZeroMemoryLength`] if any entry is 0
    ///
    /// # Examples
    ///
    /// ```
    /// use volterrs_core::MemoryLength;
    ///
    /// assert_eq!(MemoryLength::from(4).per_order(3).unwrap(), vec![4, 4, 4]);
    /// assert_eq!(MemoryLength::from(vec![5, 3]).per_order(2).unwrap(), vec![5, 3]);
    /// assert!(MemoryLength::from(vec![5, 3]).per_order(3).is_err());
    /// ```
    pub fn per_order(&self, order: usize) -> VolterraResult<Vec<usize>> {
        if order == 0 {
            return Err(VolterraError::InvalidOrder(order));
        }
        let memory = match self {
            MemoryLength::Uniform(m) => vec![*m; order],
            MemoryLength::PerOrder(list) => {
                if list.len() != order {
                    return Err(VolterraError::MemoryLengthMismatch {
                        expected: order,
                        actual: list.len(),
                    });
                }
                list.clone()
            }
        };
        if let Some(pos) = memory.iter().position(|&m| m == 0) {
            return Err(VolterraError::ZeroMemoryLength { order: pos + 1 });
        }
        Ok(memory)
    }

    /// Largest memory length over all orders
    pub fn max(&self) -> usize {
        match self {
            MemoryLength::Uniform(m) => *m,
            MemoryLength::PerOrder(list) => list.iter().copied().max().unwrap_or(0),
        }
    }
}

impl From<usize> for MemoryLength {
    fn from(m: usize) -> Self {
        MemoryLength::Uniform(m)
    }
}

impl From<Vec<usize>> for MemoryLength {
    fn from(list: Vec<usize>) -> Self {
        MemoryLength::PerOrder(list)
    }
}

impl From<&[usize]> for MemoryLength {
    fn from(list: &[usize]) -> Self {
        MemoryLength::PerOrder(list.to_vec())
    }
}
