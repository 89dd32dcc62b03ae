//! # volterrs-basis
//!
//! Combinatorial regression matrices for kernel identification.
//!
//! The output of a truncated Volterra series is linear in its kernel
//! coefficients. Stacking, for every time sample, the products of delayed
//! input samples that multiply each non-redundant coefficient gives one
//! regression matrix per nonlinear order: the *combinatorial basis*. Solving
//! `Φ_n f_n ≈ y_n` then recovers the coefficient vector `f_n`, which
//! `volterrs_core::vector_to_kernel` turns back into a kernel tensor.
//!
//! **Key Features:**
//! - **Volterra basis** - all cross-products, built order by order with
//!   shifted column copies ([`volterra_basis`], streaming via
//!   [`VolterraOrders`])
//! - **Hammerstein basis** - diagonal kernels only ([`hammerstein_basis`])
//! - **Term grouping** - split each order by number of conjugated factors for
//!   complex inputs ([`Grouping::ByTerm`])
//! - **Projected bases** - replace delays by orthogonal filter outputs
//!   ([`OrthogonalBasis`], [`LaguerreBasis`])
//!
//! ## Quick Start
//!
//! ```rust
//! use scirs2_core::ndarray_ext::array;
//! use volterrs_basis::{compute_combinatorial_basis, BasisConfig, Grouping};
//!
//! let signal = array![1.0, 2.0, 3.0, 4.0];
//! let config = BasisConfig::new(2, 2).with_grouping(Grouping::ByOrder);
//! let basis = compute_combinatorial_basis(&signal.view(), &config).unwrap();
//!
//! // Order 2, memory 2: columns x[t]^2, x[t] x[t-1], x[t-1]^2
//! let phi2 = basis.order(2).unwrap();
//! assert_eq!(phi2.row(3).to_vec(), vec![16.0, 12.0, 9.0]);
//! ```
//!
//! ## Column order
//!
//! Column `c` of an order-`n` matrix corresponds to the `c`-th tuple of
//! `volterrs_core::CombinationsWithReplacement::new(m, n)`, the same order as
//! the coefficient vectors of `volterrs_core`.
//!
//! ## Features
//!
//! - `serde` - derive `Serialize`/`Deserialize` for the configuration types

pub mod arena;
pub mod basis;
pub mod compute;
pub mod config;
pub mod error;
pub mod hammerstein;
pub mod orthogonal;
pub mod projected;
pub mod volterra;


pub use arena::{delay_embedding, delay_matrix, ColumnArena};
pub use basis::{stack_columns, CombinatorialBasis};
pub use compute::{compute_combinatorial_basis, compute_projected_combinatorial_basis};
pub use config::{BasisConfig, BasisKey, Grouping, SystemType};
pub use error::{BasisError, BasisResult};
pub use hammerstein::{hammerstein_basis, hammerstein_order_basis, term_powers};
pub use orthogonal::{LaguerreBasis, OrthogonalBasis, Projection};
pub use projected::{projected_hammerstein_basis, projected_volterra_basis};
pub use volterra::{volterra_basis, VolterraOrders};
