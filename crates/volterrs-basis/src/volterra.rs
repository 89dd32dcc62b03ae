//! Volterra combinatorial basis
//!
//! # Algorithm
//!
//! Column `c` of the order-`n` matrix holds, at time `t`, the product
//! `x[t - i1] * x[t - i2] * ... * x[t - in]` for the `c`-th non-decreasing
//! index tuple. Instead of forming each product from scratch, order `n` is
//! derived from order `n - 1`:
//!
//! 1. Multiply every order-`n - 1` column whose largest delay fits the
//!    order-`n` memory by the undelayed input. This yields all tuples whose
//!    smallest index is 0.
//! 2. Every other tuple is one of those tuples with all indices raised by an
//!    `offset`, so its column is a copy of an existing column shifted down by
//!    `offset` rows.
//!
//! Each order is built at the *effective* memory `max(M[n..])`, so that
//! columns needed by later orders are never discarded too early, and pruned
//! to the requested memory only when emitted.
//!
//! With term grouping the same recurrence runs once per conjugation count
//! `k`: a term-`(n, k)` column gets either an extra plain factor on top of
//! term `(n - 1, k)` or an extra conjugated factor on top of `(n - 1, k - 1)`.
//! Emitted term columns are divided by `C(n, k)`, so term `(n, k)` is the
//! average over all placements of the `k` conjugates.

use crate::arena::{delay_embedding, ColumnArena};
use crate::basis::CombinatorialBasis;
use crate::config::{BasisKey, Grouping};
use crate::error::{BasisError, BasisResult};
use log::{debug, trace, warn};
use scirs2_core::ndarray_ext::{Array2, ArrayView1};
use volterrs_core::{binomial, MemoryLength, Sample};

/// Suffix maximum of the per-order memory lengths
pub(crate) fn effective_memory(memory: &[usize]) -> Vec<usize> {
    let mut effective = memory.to_vec();
    for i in (0..effective.len().saturating_sub(1)).rev() {
        effective[i] = effective[i].max(effective[i + 1]);
    }
    effective
}

/// Unpruned columns of the last computed order
#[derive(Debug, Clone)]
struct OrderState<T> {
    /// One arena per conjugation count
    arenas: Vec<ColumnArena<T>>,
    /// Largest delay of the index tuple behind each column
    delays: Vec<usize>,
}

/// Streaming builder yielding the Volterra basis one order at a time
///
/// Only the previous order is kept in memory, so the peak footprint is two
/// orders instead of the whole series.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use volterrs_basis::{BasisKey, Grouping, VolterraOrders};
///
/// let signal = array![1.0, 2.0, 3.0, 4.0];
/// let mut orders = VolterraOrders::new(&signal.view(), 2, 2, Grouping::ByOrder).unwrap();
///
/// let first = orders.next().unwrap().unwrap();
/// assert_eq!(first[0].0, BasisKey::Order(1));
///
/// let second = orders.next().unwrap().unwrap();
/// assert_eq!(second[0].1.row(3).to_vec(), vec![16.0, 12.0, 9.0]);
/// assert!(orders.next().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct VolterraOrders<T> {
    signal: Vec<T>,
    memory: Vec<usize>,
    effective: Vec<usize>,
    grouping: Grouping,
    next_order: usize,
    state: Option<OrderState<T>>,
    failed: bool,
}

impl<T: Sample> VolterraOrders<T> {
    /// Validate the arguments and prepare the iterator
    pub fn new(
        signal: &ArrayView1<T>,
        order: usize,
        memory: impl Into<MemoryLength>,
        grouping: Grouping,
    ) -> BasisResult<Self> {
        let memory: MemoryLength = memory.into();
        let memory = memory.per_order(order)?;
        let effective = effective_memory(&memory);
        if signal.len() < effective[0] {
            warn!(
                "Signal has {} samples but memory length is {}; late delays are all zero",
                signal.len(),
                effective[0]
            );
        }
        Ok(Self {
            signal: signal.iter().copied().collect(),
            memory,
            effective,
            grouping,
            next_order: 1,
            state: None,
            failed: false,
        })
    }

    /// Truncation order
    pub fn order(&self) -> usize {
        self.memory.len()
    }

    /// Number of conjugation counts tracked for order `n`
    fn term_count(&self, n: usize) -> usize {
        match self.grouping {
            Grouping::ByOrder => 1,
            Grouping::ByTerm => n / 2 + 1,
        }
    }

    fn first_order(&self) -> OrderState<T> {
        let m = self.effective[0];
        OrderState {
            arenas: vec![delay_embedding(&self.signal, m)],
            delays: (0..m).collect(),
        }
    }

    fn next_state(&self, n: usize, prev: &OrderState<T>) -> BasisResult<OrderState<T>> {
        let m = self.effective[n - 1];
        let rows = self.signal.len();
        let nb_coeff = binomial(m + n - 1, n)?;
        let terms = self.term_count(n);

        let ind: Vec<usize> = (0..prev.delays.len())
            .filter(|&c| prev.delays[c] < m)
            .collect();
        let dec = ind.len();
        if dec > nb_coeff {
            return Err(BasisError::internal(
                "volterra_basis",
                format!("order {}: {} seed columns exceed {} coefficients", n, dec, nb_coeff),
            ));
        }

        let mut arenas: Vec<ColumnArena<T>> =
            (0..terms).map(|_| ColumnArena::zeros(rows, nb_coeff)).collect();
        for (k, arena) in arenas.iter_mut().enumerate() {
            for (col, &src) in ind.iter().enumerate() {
                let out = arena.column_mut(col);
                if k == 0 {
                    let plain = prev.arenas[0].column(src);
                    for t in 0..rows {
                        out[t] = self.signal[t] * plain[t];
                    }
                } else if n % 2 == 0 && k == n / 2 {
                    // Conjugate-symmetric top term: x * conj(p) + conj(x) * p
                    let lower = prev.arenas[k - 1].column(src);
                    let two = T::from_real(2.0);
                    for t in 0..rows {
                        out[t] = two * (self.signal[t].conj() * lower[t]).real_only();
                    }
                } else {
                    let plain = prev.arenas[k].column(src);
                    let lower = prev.arenas[k - 1].column(src);
                    for t in 0..rows {
                        let x = self.signal[t];
                        out[t] = x * plain[t] + x.conj() * lower[t];
                    }
                }
            }
        }

        let mut delays: Vec<usize> = ind.iter().map(|&c| prev.delays[c]).collect();
        let mut col = dec;
        for offset in 1..m {
            for src in 0..dec {
                let delay = delays[src] + offset;
                if delay >= m {
                    continue;
                }
                if col >= nb_coeff {
                    return Err(BasisError::internal(
                        "volterra_basis",
                        format!("order {}: more than {} columns generated", n, nb_coeff),
                    ));
                }
                for arena in arenas.iter_mut() {
                    arena.copy_delayed(src, col, offset);
                }
                delays.push(delay);
                col += 1;
            }
        }

        if col != nb_coeff {
            return Err(BasisError::internal(
                "volterra_basis",
                format!("order {}: {} columns generated, {} expected", n, col, nb_coeff),
            ));
        }
        Ok(OrderState { arenas, delays })
    }

    /// Prune a state to the requested memory and convert to keyed matrices
    fn emit(&self, n: usize, state: &OrderState<T>) -> BasisResult<Vec<(BasisKey, Array2<T>)>> {
        let requested = self.memory[n - 1];
        let keep: Vec<usize> = (0..state.delays.len())
            .filter(|&c| state.delays[c] < requested)
            .collect();
        trace!(
            "Volterra basis order {}: pruning {} of {} columns",
            n,
            state.delays.len() - keep.len(),
            state.delays.len()
        );

        let keys = self.grouping.keys(n);
        let mut out = Vec::with_capacity(keys.len());
        for (key, arena) in keys.into_iter().zip(state.arenas.iter()) {
            let mut pruned = arena.select(&keep);
            if let BasisKey::Term(_, k) = key {
                let count = binomial(n, k)?;
                if count > 1 {
                    pruned.scale(T::from_real(1.0 / count as f64));
                }
            }
            out.push((key, pruned.into_array()?));
        }

        debug!(
            "Volterra basis order {}: {} columns (built at memory {}, kept at memory {})",
            n,
            keep.len(),
            self.effective[n - 1],
            requested
        );
        Ok(out)
    }

    fn advance(&mut self) -> BasisResult<Vec<(BasisKey, Array2<T>)>> {
        let n = self.next_order;
        let state = match self.state.take() {
            None => self.first_order(),
            Some(prev) => self.next_state(n, &prev)?,
        };
        let out = self.emit(n, &state)?;
        self.state = Some(state);
        self.next_order += 1;
        Ok(out)
    }
}

impl<T: Sample> Iterator for VolterraOrders<T> {
    type Item = BasisResult<Vec<(BasisKey, Array2<T>)>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_order > self.memory.len() {
            return None;
        }
        let result = self.advance();
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.failed {
            0
        } else {
            (self.memory.len() + 1).saturating_sub(self.next_order)
        };
        (remaining, Some(remaining))
    }
}

/// Volterra combinatorial basis of a signal up to order `order`
///
/// Each order-`n` matrix has shape `(L, C(M[n-1] + n - 1, n))`, columns in
/// lexicographic index-tuple order.
///
/// # Errors
///
/// Fails on a zero order, a memory list of the wrong length or a zero memory
/// length.
pub fn volterra_basis<T: Sample>(
    signal: &ArrayView1<T>,
    order: usize,
    memory: impl Into<MemoryLength>,
    grouping: Grouping,
) -> BasisResult<CombinatorialBasis<T>> {
    let mut basis = CombinatorialBasis::new(grouping);
    for matrices in VolterraOrders::new(signal, order, memory, grouping)? {
        for (key, matrix) in matrices? {
            basis.insert(key, matrix);
        }
    }
    Ok(basis)
}
