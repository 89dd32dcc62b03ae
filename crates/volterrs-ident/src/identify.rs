//! Kernel identification by least squares on a combinatorial basis
//!
//! Three strategies are supported, differing in which output is available:
//!
//! - **direct**: only the total output `y = Σ y_n` is known, so all orders are
//!   solved together on the column-wise stacked basis.
//! - **by order**: the output has been separated into its homogeneous orders
//!   `y_n`; each order is a separate, smaller problem.
//! - **by term**: each order output has further been separated into its
//!   combinatorial terms `y_{n,k}` (complex input); the term matrices of an
//!   order are stacked row-wise against their term outputs.
//!
//! Term outputs are expected in the scaling of the term matrices, i.e.
//! `y_{n,k} = Φ_{n,k} f_n` with `Φ_{n,k}` the averaged term matrix.

use crate::error::{IdentError, IdentResult};
use crate::solve::{real_system, LeastSquares, LstsqSolver};
use log::{debug, warn};
use scirs2_core::ndarray_ext::{s, Array1, Array2, ArrayD, ArrayView1};
use std::collections::BTreeMap;
use volterrs_basis::{
    compute_combinatorial_basis, stack_columns, BasisConfig, BasisKey, CombinatorialBasis, Grouping,
    SystemType,
};
use volterrs_core::{diagonal_to_kernel, vector_to_kernel, KernelForm, KernelSeries, Sample};

/// Check that a least-squares problem has at least as many equations as unknowns
///
/// # Examples
///
/// ```
/// use volterrs_ident::check_data_samples;
///
/// assert!(check_data_samples(100, 20, "direct").is_ok());
/// assert!(check_data_samples(10, 20, "direct").is_err());
/// ```
pub fn check_data_samples(available: usize, required: usize, method: &str) -> IdentResult<()> {
    if available < required {
        return Err(IdentError::insufficient_data(available, required, method));
    }
    Ok(())
}

/// Least-squares kernel identification
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array1;
/// use volterrs_basis::{BasisConfig, Grouping};
/// use volterrs_ident::Identifier;
///
/// // y[t] = 2 x[t] - x[t-1] + 0.5 x[t]^2
/// let x = Array1::from_iter((0..40).map(|t| ((t * 7 % 11) as f64) / 5.0 - 1.0));
/// let y = Array1::from_iter((0..40).map(|t| {
///     let prev = if t > 0 { x[t - 1] } else { 0.0 };
///     2.0 * x[t] - prev + 0.5 * x[t] * x[t]
/// }));
///
/// let identifier = Identifier::new(BasisConfig::new(2, 2));
/// let basis = identifier.basis(&x.view(), Grouping::ByOrder).unwrap();
/// let kernels = identifier.direct(&basis, &y.view()).unwrap();
///
/// let h1 = kernels.get(1).unwrap();
/// assert!((h1[[0].as_slice()] - 2.0).abs() < 1e-8);
/// assert!((h1[[1].as_slice()] + 1.0).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct Identifier<S = LstsqSolver> {
    config: BasisConfig,
    solver: S,
    form: KernelForm,
    allow_underdetermined: bool,
}

impl Identifier<LstsqSolver> {
    /// Identifier with the default solver, returning symmetric kernels
    pub fn new(config: BasisConfig) -> Self {
        Self {
            config,
            solver: LstsqSolver,
            form: KernelForm::Symmetric,
            allow_underdetermined: false,
        }
    }
}

impl<S: LeastSquares> Identifier<S> {
    /// Replace the least-squares solver
    pub fn with_solver<R: LeastSquares>(self, solver: R) -> Identifier<R> {
        Identifier {
            config: self.config,
            solver,
            form: self.form,
            allow_underdetermined: self.allow_underdetermined,
        }
    }

    /// Form of the returned kernels
    ///
    /// `Vector` keeps the raw coefficient vectors; `Triangular` and
    /// `Symmetric` give tensors. `Unconstrained` is rejected when converting.
    pub fn with_form(mut self, form: KernelForm) -> Self {
        self.form = form;
        self
    }

    /// Solve underdetermined problems (with a warning) instead of failing
    pub fn allow_underdetermined(mut self, allow: bool) -> Self {
        self.allow_underdetermined = allow;
        self
    }

    /// Basis configuration
    pub fn config(&self) -> &BasisConfig {
        &self.config
    }

    /// Basis of `signal` for this configuration, with the given grouping
    ///
    /// Use [`Grouping::ByOrder`] for [`direct`](Self::direct) and
    /// [`by_order`](Self::by_order), [`Grouping::ByTerm`] for
    /// [`by_term`](Self::by_term).
    pub fn basis<T: Sample>(
        &self,
        signal: &ArrayView1<T>,
        grouping: Grouping,
    ) -> IdentResult<CombinatorialBasis<T>> {
        let config = self.config.clone().with_grouping(grouping);
        Ok(compute_combinatorial_basis(signal, &config)?)
    }

    /// Identify all kernels from the total output
    pub fn direct<T: Sample>(
        &self,
        basis: &CombinatorialBasis<T>,
        output: &ArrayView1<T>,
    ) -> IdentResult<KernelSeries<f64>> {
        check_grouping(basis, Grouping::ByOrder, "direct")?;
        let order = self.config.order;
        let keys: Vec<BasisKey> = (1..=order).map(BasisKey::Order).collect();
        let matrices = keys
            .iter()
            .map(|key| lookup(basis, *key).map(|m| (key, m)))
            .collect::<IdentResult<Vec<_>>>()?;
        let widths: Vec<usize> = matrices.iter().map(|(_, m)| m.ncols()).collect();

        let phi = stack_columns(matrices)?;
        check_output_length(phi.nrows(), output.len())?;

        let coefficients = self.solve_system(&phi, output, "direct")?;

        let mut series = KernelSeries::new();
        let mut start = 0;
        for (n, width) in (1..=order).zip(widths) {
            let vec = coefficients.slice(s![start..start + width]).to_owned();
            series.insert(n, self.to_kernel(n, vec)?);
            start += width;
        }
        Ok(series)
    }

    /// Identify each kernel from its separated order output
    ///
    /// `outputs` maps order `n` to the order-`n` output `y_n`.
    pub fn by_order<T: Sample>(
        &self,
        basis: &CombinatorialBasis<T>,
        outputs: &BTreeMap<usize, Array1<T>>,
    ) -> IdentResult<KernelSeries<f64>> {
        check_grouping(basis, Grouping::ByOrder, "order")?;
        let mut series = KernelSeries::new();
        for n in 1..=self.config.order {
            let phi = lookup(basis, BasisKey::Order(n))?;
            let y = outputs.get(&n).ok_or(IdentError::MissingOrder(n))?;
            check_output_length(phi.nrows(), y.len())?;

            let coefficients = self.solve_system(phi, &y.view(), "order")?;
            series.insert(n, self.to_kernel(n, coefficients)?);
        }
        Ok(series)
    }

    /// Identify each kernel from its separated term outputs
    ///
    /// `outputs` maps `(n, k)` to the term output `y_{n,k}`, for every
    /// `k` in `0..=n/2`.
    pub fn by_term<T: Sample>(
        &self,
        basis: &CombinatorialBasis<T>,
        outputs: &BTreeMap<(usize, usize), Array1<T>>,
    ) -> IdentResult<KernelSeries<f64>> {
        check_grouping(basis, Grouping::ByTerm, "term")?;
        let mut series = KernelSeries::new();
        for n in 1..=self.config.order {
            let mut blocks = Vec::with_capacity(n / 2 + 1);
            for k in 0..=n / 2 {
                let phi = lookup(basis, BasisKey::Term(n, k))?;
                let y = outputs
                    .get(&(n, k))
                    .ok_or(IdentError::MissingTerm { order: n, term: k })?;
                check_output_length(phi.nrows(), y.len())?;
                blocks.push((phi, y));
            }

            let rows: usize = blocks.iter().map(|(phi, _)| phi.nrows()).sum();
            let cols = blocks.first().map_or(0, |(phi, _)| phi.ncols());
            let mut phi_n = Array2::zeros((rows, cols));
            let mut y_n = Array1::zeros(rows);
            let mut offset = 0;
            for (phi, y) in &blocks {
                if phi.ncols() != cols {
                    return Err(IdentError::ShapeMismatch(format!(
                        "term matrices of order {} have {} and {} columns",
                        n,
                        cols,
                        phi.ncols()
                    )));
                }
                let end = offset + phi.nrows();
                phi_n.slice_mut(s![offset..end, ..]).assign(*phi);
                y_n.slice_mut(s![offset..end]).assign(*y);
                offset = end;
            }

            let coefficients = self.solve_system(&phi_n, &y_n.view(), "term")?;
            series.insert(n, self.to_kernel(n, coefficients)?);
        }
        Ok(series)
    }

    fn solve_system<T: Sample>(
        &self,
        phi: &Array2<T>,
        y: &ArrayView1<T>,
        method: &str,
    ) -> IdentResult<Array1<f64>> {
        let (real_phi, real_y) = real_system(&phi.view(), y);
        let (rows, cols) = real_phi.dim();
        if let Err(err) = check_data_samples(rows, cols, method) {
            if !self.allow_underdetermined {
                return Err(err);
            }
            warn!("{}; solving the underdetermined problem anyway", err);
        }
        debug!("{} identification: {} equations, {} unknowns", method, rows, cols);
        self.solver.solve(&real_phi.view(), &real_y.view())
    }

    fn to_kernel(&self, n: usize, vec: Array1<f64>) -> IdentResult<ArrayD<f64>> {
        if self.form == KernelForm::Vector {
            return Ok(vec.into_dyn());
        }
        match self.config.system {
            SystemType::Volterra => {
                let memory = self.config.per_order_memory()?;
                Ok(vector_to_kernel(&vec.view(), n, memory[n - 1], self.form)?)
            }
            SystemType::Hammerstein => Ok(diagonal_to_kernel(&vec.view(), n)),
        }
    }
}

fn lookup<T: Sample>(basis: &CombinatorialBasis<T>, key: BasisKey) -> IdentResult<&Array2<T>> {
    basis.get(&key).ok_or(IdentError::MissingBasis(key))
}

fn check_grouping<T: Sample>(
    basis: &CombinatorialBasis<T>,
    expected: Grouping,
    method: &str,
) -> IdentResult<()> {
    if basis.grouping() != expected {
        return Err(IdentError::WrongGrouping {
            expected,
            actual: basis.grouping(),
            method: method.to_string(),
        });
    }
    Ok(())
}

fn check_output_length(rows: usize, len: usize) -> IdentResult<()> {
    if rows != len {
        return Err(IdentError::OutputLength {
            expected: rows,
            actual: len,
        });
    }
    Ok(())
}
