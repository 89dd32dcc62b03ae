//! Error types for kernel bookkeeping and form conversion
//!
//! Every failure in this crate is a deterministic function of malformed input
//! and is reported synchronously. There is no retry surface.

use thiserror::Error;

/// Error type for combinatorics and kernel-form operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VolterraError {
    /// Truncation order must be at least 1
    #[error("Invalid truncation order {0}: must be at least 1")]
    InvalidOrder(usize),

    /// Memory-length argument does not match the truncation order
    #[error("Memory length has {actual} entries, but truncation order is {expected}")]
    MemoryLengthMismatch { expected: usize, actual: usize },

    /// A memory length of zero was supplied
    #[error("Memory length for order {order} must be at least 1")]
    ZeroMemoryLength { order: usize },

    /// Coefficient vector does not hold the expected number of entries
    #[error(
        "Coefficient vector for kernel of order {order} has wrong length (got {actual}, expected {expected})"
    )]
    VectorLength {
        order: usize,
        expected: usize,
        actual: usize,
    },

    /// Flat series vector does not hold the expected number of entries
    #[error("Coefficient vector for the series has wrong length (got {actual}, expected {expected})")]
    SeriesLength { expected: usize, actual: usize },

    /// Order is missing or outside of the truncation range
    #[error("Order {order} is outside of the truncation range 1..={max_order}")]
    OrderOutOfRange { order: usize, max_order: usize },

    /// Tensor does not have equal-length dimensions
    #[error("Kernel is not square (it has shape {shape:?})")]
    NonSquareKernel { shape: Vec<usize> },

    /// Binomial coefficient requested outside of its domain
    #[error("Invalid binomial coefficient C({n}, {k}): k must not exceed n")]
    InvalidBinomial { n: usize, k: usize },

    /// Multiplicities do not add up to the multinomial total
    #[error("Invalid multinomial coefficient: parts {parts:?} do not sum to {total}")]
    InvalidMultinomial { total: usize, parts: Vec<usize> },

    /// Exact count does not fit in `usize`
    #[error("{operation} overflows usize")]
    Overflow { operation: String },

    /// Kernel form cannot be used for the requested operation
    #[error("{operation}: kernel form '{form}' is not supported")]
    UnsupportedForm { operation: String, form: String },

    /// A mode name could not be parsed
    #[error("Unknown {kind} '{value}'; expected one of {expected}")]
    UnknownName {
        kind: String,
        value: String,
        expected: String,
    },

    /// Error from the array layer
    #[error("Shape error: {0}")]
    Shape(String),
}

/// Result type for kernel operations
pub type VolterraResult<T> = Result<T, VolterraError>;

impl VolterraError {
    /// Create a vector length error
    pub fn vector_length(order: usize, expected: usize, actual: usize) -> Self {
        VolterraError::VectorLength {
            order,
            expected,
            actual,
        }
    }

    /// Create an unsupported form error
    pub fn unsupported_form(operation: impl Into<String>, form: impl ToString) -> Self {
        VolterraError::UnsupportedForm {
            operation: operation.into(),
            form: form.to_string(),
        }
    }

    /// Create an unknown name error
    pub fn unknown_name(
        kind: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        VolterraError::UnknownName {
            kind: kind.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create an overflow error
    pub fn overflow(operation: impl Into<String>) -> Self {
        VolterraError::Overflow {
            operation: operation.into(),
        }
    }

    /// Create a shape error from any displayable array-layer error
    pub fn shape(err: impl std::fmt::Display) -> Self {
        VolterraError::Shape(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_length_display() {
        let err = VolterraError::vector_length(2, 6, 5);
        let msg = err.to_string();
        assert!(msg.contains("order 2"));
        assert!(msg.contains("got 5"));
        assert!(msg.contains("expected 6"));
    }

    #[test]
    fn test_non_square_display() {
        let err = VolterraError::NonSquareKernel { shape: vec![3, 4] };
        assert!(err.to_string().contains("[3, 4]"));
    }

    #[test]
    fn test_unknown_name_display() {
        let err = VolterraError::unknown_name("kernel form", "diag", "'tri', 'sym', 'vec'");
        let msg = err.to_string();
        assert!(msg.contains("kernel form"));
        assert!(msg.contains("'diag'"));
        assert!(msg.contains("'tri'"));
    }

    #[test]
    fn test_overflow_display() {
        let err = VolterraError::overflow("C(70, 35)");
        assert_eq!(err.to_string(), "C(70, 35) overflows usize");
    }

    #[test]
    fn test_memory_mismatch_display() {
        let err = VolterraError::MemoryLengthMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Memory length has 2 entries, but truncation order is 3"
        );
    }
}
