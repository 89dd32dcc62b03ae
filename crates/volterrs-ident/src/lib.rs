//! # volterrs-ident
//!
//! Least-squares identification of Volterra kernels.
//!
//! Given an input signal, its combinatorial basis (from `volterrs-basis`) and
//! a measured output, the kernel coefficients solve a linear least-squares
//! problem. The estimated coefficient vectors are converted back to kernel
//! tensors with `volterrs-core`.
//!
//! - [`Identifier`] - direct, per-order and per-term identification
//! - [`LeastSquares`] - pluggable solver, [`LstsqSolver`] by default
//! - [`error_measure`], [`rms`], [`safe_db`] - estimation error metrics
//!
//! ## SciRS2 Integration
//!
//! Least squares uses `scirs2_linalg::lstsq`; complex problems are split into
//! real and imaginary rows so that real kernels are estimated.

pub mod error;
pub mod identify;
pub mod metrics;
pub mod solve;


pub use error::{IdentError, IdentResult};
pub use identify::{check_data_samples, Identifier};
pub use metrics::{db, error_measure, rms, safe_db};
pub use solve::{real_system, LeastSquares, LstsqSolver};
