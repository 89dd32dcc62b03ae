//! # volterrs - Volterra series toolkit
//!
//! Kernel representation, combinatorial regression bases and least-squares
//! identification for truncated Volterra series.
//!
//! This is the **meta crate** that re-exports all components.
//!
//! ## Quick Start
//!
//! ```
//! use scirs2_core::ndarray_ext::Array1;
//! use volterrs::prelude::*;
//!
//! let signal = Array1::from_iter((0..64).map(|t| ((t * 5 % 13) as f64) / 6.0 - 1.0));
//! let config = BasisConfig::new(2, 3);
//! let basis = compute_combinatorial_basis(&signal.view(), &config)?;
//! assert_eq!(basis.order(2).map(|m| m.ncols()), Some(6));
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Kernel bookkeeping ([`core`])
//!
//! Counting, canonical coefficient order and conversions between coefficient
//! vectors and triangular / symmetric kernel tensors.
//!
//! ```
//! use scirs2_core::ndarray_ext::array;
//! use volterrs::core::{vector_to_kernel, KernelForm};
//!
//! let kernel = vector_to_kernel(&array![1.0, 2.0, 3.0].view(), 2, 2, KernelForm::Triangular)?;
//! assert_eq!(kernel[[0, 1].as_slice()], 2.0);
//! assert_eq!(kernel[[1, 0].as_slice()], 0.0);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ### Combinatorial bases ([`basis`])
//!
//! Volterra, Hammerstein and projected regression matrices, per order or per
//! combinatorial term.
//!
//! ### Identification ([`ident`])
//!
//! Direct, per-order and per-term least-squares kernel estimation, plus error
//! metrics.
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for configuration types

pub use volterrs_basis as basis;
pub use volterrs_core as core;
pub use volterrs_ident as ident;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use volterrs::prelude::*;
    //!
    //! let config = BasisConfig::new(3, vec![10, 6, 4]).with_grouping(Grouping::ByTerm);
    //! assert_eq!(config.per_order_memory().unwrap(), vec![10, 6, 4]);
    //! ```

    // Kernel forms and series
    pub use crate::core::{
        kernel_to_vector, series_to_vector, vector_to_kernel, vector_to_series, KernelForm,
        KernelSeries, MemoryLength, Sample, VolterraError,
    };

    // Bases
    pub use crate::basis::{
        compute_combinatorial_basis, compute_projected_combinatorial_basis, BasisConfig,
        BasisError, BasisKey, CombinatorialBasis, Grouping, LaguerreBasis, OrthogonalBasis,
        Projection, SystemType,
    };

    // Identification
    pub use crate::ident::{error_measure, IdentError, Identifier, LeastSquares, LstsqSolver};
}
