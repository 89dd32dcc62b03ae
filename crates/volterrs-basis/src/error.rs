//! Error types for basis construction

use thiserror::Error;
use volterrs_core::VolterraError;

/// Error type for combinatorial basis construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BasisError {
    /// Invalid order, memory length or conversion argument
    #[error(transparent)]
    Volterra(#[from] VolterraError),

    /// System type name could not be parsed
    #[error("Unknown system type '{0}'; available types are 'volterra' or 'hammerstein'")]
    UnknownSystemType(String),

    /// Grouping name could not be parsed
    #[error("Unknown grouping '{0}'; available groupings are 'order' or 'term'")]
    UnknownGrouping(String),

    /// Per-order orthogonal basis list of the wrong length
    #[error("Orthogonal basis list has {actual} entries, but truncation order is {expected}")]
    ProjectionCount { expected: usize, actual: usize },

    /// Orthogonal basis returned a matrix of the wrong shape
    #[error("Projection for order {order} has shape {actual:?}, expected [{rows}, {columns}]")]
    ProjectionShape {
        order: usize,
        rows: usize,
        columns: usize,
        actual: Vec<usize>,
    },

    /// Invalid parameter for an orthogonal basis
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Internal bookkeeping invariant violated (a defect, not a caller error)
    #[error("Internal invariant violated in {operation}: {message}")]
    Internal { operation: String, message: String },
}

/// Result type for basis construction
pub type BasisResult<T> = Result<T, BasisError>;

impl BasisError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        BasisError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an internal invariant error
    pub fn internal(operation: impl Into<String>, message: impl Into<String>) -> Self {
        BasisError::Internal {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_system_display() {
        let err = BasisError::UnknownSystemType("wiener".to_string());
        let msg = err.to_string();
        assert!(msg.contains("'wiener'"));
        assert!(msg.contains("'volterra' or 'hammerstein'"));
    }

    #[test]
    fn test_volterra_error_is_transparent() {
        let err: BasisError = VolterraError::InvalidOrder(0).into();
        assert_eq!(err.to_string(), VolterraError::InvalidOrder(0).to_string());
    }

    #[test]
    fn test_internal_display() {
        let err = BasisError::internal("volterra_basis", "6 columns written, 5 declared");
        assert!(err.to_string().contains("volterra_basis"));
        assert!(err.to_string().contains("5 declared"));
    }
}
