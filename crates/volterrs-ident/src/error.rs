//! Error types for kernel identification

use scirs2_linalg::LinalgError;
use thiserror::Error;
use volterrs_basis::{BasisError, BasisKey, Grouping};
use volterrs_core::VolterraError;

/// Error type for kernel identification
#[derive(Error, Debug)]
pub enum IdentError {
    #[error(transparent)]
    Volterra(#[from] VolterraError),

    #[error(transparent)]
    Basis(#[from] BasisError),

    #[error("Linear algebra error: {0}")]
    Linalg(#[from] LinalgError),

    /// Fewer equations than unknowns
    #[error(
        "Input signal has {available} data samples, it should have at least {required} \
         for the {method} method"
    )]
    InsufficientData {
        available: usize,
        required: usize,
        method: String,
    },

    /// Separated output for an order is missing
    #[error("No output given for order {0}")]
    MissingOrder(usize),

    /// Separated output for a term is missing
    #[error("No output given for term ({order}, {term})")]
    MissingTerm { order: usize, term: usize },

    /// Basis does not contain a matrix the method needs
    #[error("Basis has no matrix for {0}")]
    MissingBasis(BasisKey),

    /// Basis grouping does not match the identification method
    #[error("Basis is grouped by {actual}, the {method} method needs grouping by {expected}")]
    WrongGrouping {
        expected: Grouping,
        actual: Grouping,
        method: String,
    },

    /// Output length differs from the number of basis rows
    #[error("Output has {actual} samples, basis has {expected} rows")]
    OutputLength { expected: usize, actual: usize },

    /// Arrays of different shapes where equal shapes are required
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
}

/// Result type for kernel identification
pub type IdentResult<T> = Result<T, IdentError>;

impl IdentError {
    /// Create an insufficient data error
    pub fn insufficient_data(available: usize, required: usize, method: impl Into<String>) -> Self {
        IdentError::InsufficientData {
            available,
            required,
            method: method.into(),
        }
    }
}
