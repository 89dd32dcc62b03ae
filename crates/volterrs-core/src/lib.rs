//! # volterrs-core
//!
//! Kernel bookkeeping for truncated Volterra series.
//!
//! A Volterra series models a nonlinear system's output as a sum of
//! homogeneous-order convolutions of its input history. The order-`n` kernel
//! is an `n`-dimensional tensor over delay indices, but only its
//! `C(m + n - 1, n)` non-redundant entries are ever estimated. This crate
//! provides:
//!
//! - **Combinatorics** ([`binomial`], [`multinomial`],
//!   [`CombinationsWithReplacement`], [`symmetrize`])
//! - **Kernel forms** ([`KernelForm`]) and the conversions between the flat
//!   coefficient vector and the triangular / symmetric tensors
//!   ([`vector_to_kernel`], [`kernel_to_vector`])
//! - **Series helpers** ([`KernelSeries`], [`vector_to_series`],
//!   [`series_to_vector`])
//! - **Memory-length normalization** ([`MemoryLength`])
//!
//! ## Quick Start
//!
//! ```
//! use scirs2_core::ndarray_ext::array;
//! use volterrs_core::{coefficient_count, kernel_to_vector, vector_to_kernel, KernelForm};
//!
//! // Second-order kernel with a memory of 2 samples: (0,0), (0,1), (1,1)
//! assert_eq!(coefficient_count(2, 2, KernelForm::Vector).unwrap(), 3);
//!
//! let vec = array![1.0, 4.0, 9.0];
//! let sym = vector_to_kernel(&vec.view(), 2, 2, KernelForm::Symmetric).unwrap();
//! assert_eq!(sym[[1, 0].as_slice()], 2.0);
//!
//! let back = kernel_to_vector(&sym.view(), KernelForm::Symmetric).unwrap();
//! assert_eq!(back, vec);
//! ```
//!
//! ## SciRS2 Integration
//!
//! All array types come from `scirs2_core::ndarray_ext`; complex samples use
//! `scirs2_core::numeric::Complex64`.
//!
//! ## Features
//!
//! - `serde`: derive `Serialize`/`Deserialize` for [`KernelForm`] and
//!   [`MemoryLength`]

pub mod combinatorics;
pub mod error;
pub mod forms;
pub mod memory;
pub mod scalar;
pub mod series;


pub use combinatorics::{
    binomial, combinations, ensure_square, factorial, multinomial, multiplicities, permutation_count,
    permutations, symmetrize, CombinationsWithReplacement,
};
pub use error::{VolterraError, VolterraResult};
pub use forms::{coefficient_count, diagonal_to_kernel, kernel_to_vector, vector_to_kernel, KernelForm};
pub use memory::MemoryLength;
pub use scalar::Sample;
pub use series::{
    series_coefficient_count, series_coefficient_counts, series_to_vector, split_series_vector,
    vector_to_series, vectors_to_series, KernelSeries,
};
