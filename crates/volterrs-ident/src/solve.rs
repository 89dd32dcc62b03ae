//! Least-squares solvers
//!
//! Kernel coefficients of a physical system are real, so every problem is
//! reduced to a real system before solving: a complex equation
//! `Φ f = y` contributes its real and its imaginary part as two real rows.

use crate::error::IdentResult;
use log::debug;
use scirs2_core::ndarray_ext::{s, Array1, Array2, ArrayView1, ArrayView2};
use scirs2_linalg::lstsq;
use volterrs_core::Sample;

/// Solver for overdetermined real linear systems
pub trait LeastSquares {
    /// Minimizer `f` of `||Φ f - y||²`
    fn solve(&self, phi: &ArrayView2<f64>, y: &ArrayView1<f64>) -> IdentResult<Array1<f64>>;
}

/// Least squares backed by `scirs2_linalg::lstsq`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LstsqSolver;

impl LeastSquares for LstsqSolver {
    fn solve(&self, phi: &ArrayView2<f64>, y: &ArrayView1<f64>) -> IdentResult<Array1<f64>> {
        debug!("lstsq on a {}x{} system", phi.nrows(), phi.ncols());
        let solution = lstsq(phi, y, None)?;
        Ok(solution.x)
    }
}

/// Real form of a possibly complex system
///
/// Real inputs are converted as is. Complex inputs give `[Re Φ; Im Φ]` and
/// `[Re y; Im y]`, twice as many rows.
pub fn real_system<T: Sample>(
    phi: &ArrayView2<T>,
    y: &ArrayView1<T>,
) -> (Array2<f64>, Array1<f64>) {
    let re_phi = phi.mapv(|v| v.re());
    let re_y = y.mapv(|v| v.re());
    if !T::is_complex() {
        return (re_phi, re_y);
    }

    let rows = phi.nrows();
    let mut full_phi = Array2::zeros((2 * rows, phi.ncols()));
    full_phi.slice_mut(s![..rows, ..]).assign(&re_phi);
    full_phi
        .slice_mut(s![rows.., ..])
        .assign(&phi.mapv(|v| v.im()));

    let mut full_y = Array1::zeros(2 * rows);
    full_y.slice_mut(s![..rows]).assign(&re_y);
    full_y.slice_mut(s![rows..]).assign(&y.mapv(|v| v.im()));
    (full_phi, full_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;
    use scirs2_core::numeric::Complex64;

    #[test]
    fn test_lstsq_exact_system() {
        let phi = array![[1.0, 0.0], [0.0, 2.0], [1.0, 1.0]];
        let f = array![3.0, -1.0];
        let y = phi.dot(&f);
        let solved = LstsqSolver.solve(&phi.view(), &y.view()).unwrap();
        for (a, b) in solved.iter().zip(f.iter()) {
            assert!((a - b).abs() < 1e-10);
        }
    }

    #[test]
    fn test_real_system_for_real_input() {
        let phi = array![[1.0, 2.0]];
        let y = array![3.0];
        let (p, v) = real_system(&phi.view(), &y.view());
        assert_eq!(p, phi);
        assert_eq!(v, y);
    }

    #[test]
    fn test_real_system_splits_complex_rows() {
        let phi = array![[Complex64::new(1.0, 2.0), Complex64::new(0.0, -1.0)]];
        let y = array![Complex64::new(4.0, 5.0)];
        let (p, v) = real_system(&phi.view(), &y.view());
        assert_eq!(p, array![[1.0, 0.0], [2.0, -1.0]]);
        assert_eq!(v, array![4.0, 5.0]);
    }
}
