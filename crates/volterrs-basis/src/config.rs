//! Basis keys, construction modes and configuration

use crate::error::{BasisError, BasisResult};
use std::fmt;
use std::str::FromStr;
use volterrs_core::MemoryLength;

/// Key of a basis matrix
///
/// Matrices are either built per nonlinear order, or per combinatorial term
/// `(n, k)` where `k` counts the conjugated input factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BasisKey {
    /// Whole order-`n` contribution
    Order(usize),
    /// Term `(n, k)`: order `n` with `k` conjugated factors
    Term(usize, usize),
}

impl BasisKey {
    /// Nonlinear order of the key
    pub fn order(&self) -> usize {
        match self {
            BasisKey::Order(n) | BasisKey::Term(n, _) => *n,
        }
    }

    /// Number of conjugated factors (0 for order keys)
    pub fn conjugate_count(&self) -> usize {
        match self {
            BasisKey::Order(_) => 0,
            BasisKey::Term(_, k) => *k,
        }
    }
}

impl fmt::Display for BasisKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasisKey::Order(n) => write!(f, "order {}", n),
            BasisKey::Term(n, k) => write!(f, "term ({}, {})", n, k),
        }
    }
}

/// Assumed structure of the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SystemType {
    /// All cross-products between delayed input samples
    #[default]
    Volterra,
    /// Diagonal kernels only: powers of a single delayed sample
    Hammerstein,
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemType::Volterra => f.write_str("volterra"),
            SystemType::Hammerstein => f.write_str("hammerstein"),
        }
    }
}

impl FromStr for SystemType {
    type Err = BasisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "volterra" => Ok(SystemType::Volterra),
            "hammerstein" => Ok(SystemType::Hammerstein),
            _ => Err(BasisError::UnknownSystemType(s.to_string())),
        }
    }
}

/// How basis matrices are grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Grouping {
    /// One matrix per nonlinear order
    #[default]
    ByOrder,
    /// One matrix per combinatorial term `(n, k)`
    ByTerm,
}

impl Grouping {
    /// Keys produced for order `n`
    ///
    /// ```
    /// use volterrs_basis::{BasisKey, Grouping};
    ///
    /// assert_eq!(Grouping::ByOrder.keys(3), vec![BasisKey::Order(3)]);
    /// assert_eq!(
    ///     Grouping::ByTerm.keys(4),
    ///     vec![BasisKey::Term(4, 0), BasisKey::Term(4, 1), BasisKey::Term(4, 2)]
    /// );
    /// ```
    pub fn keys(&self, n: usize) -> Vec<BasisKey> {
        match self {
            Grouping::ByOrder => vec![BasisKey::Order(n)],
            Grouping::ByTerm => (0..=n / 2).map(|k| BasisKey::Term(n, k)).collect(),
        }
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grouping::ByOrder => f.write_str("order"),
            Grouping::ByTerm => f.write_str("term"),
        }
    }
}

impl FromStr for Grouping {
    type Err = BasisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "order" => Ok(Grouping::ByOrder),
            "term" => Ok(Grouping::ByTerm),
            _ => Err(BasisError::UnknownGrouping(s.to_string())),
        }
    }
}

/// Configuration of a combinatorial basis
///
/// # Examples
///
/// ```
/// use volterrs_basis::{BasisConfig, Grouping, SystemType};
///
/// let config = BasisConfig::new(3, vec![10, 6, 4])
///     .with_system(SystemType::Volterra)
///     .with_grouping(Grouping::ByTerm);
/// assert_eq!(config.per_order_memory().unwrap(), vec![10, 6, 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasisConfig {
    /// Truncation order N
    pub order: usize,
    /// Memory length per order
    pub memory: MemoryLength,
    /// Assumed system structure
    pub system: SystemType,
    /// Matrix grouping
    pub grouping: Grouping,
}

impl BasisConfig {
    /// Volterra basis grouped by order
    pub fn new(order: usize, memory: impl Into<MemoryLength>) -> Self {
        Self {
            order,
            memory: memory.into(),
            system: SystemType::default(),
            grouping: Grouping::default(),
        }
    }

    /// Build a configuration from mode names, rejecting unknown names
    pub fn from_names(
        order: usize,
        memory: impl Into<MemoryLength>,
        system: &str,
        grouping: &str,
    ) -> BasisResult<Self> {
        Ok(Self::new(order, memory)
            .with_system(system.parse()?)
            .with_grouping(grouping.parse()?))
    }

    /// Set the assumed system structure
    pub fn with_system(mut self, system: SystemType) -> Self {
        self.system = system;
        self
    }

    /// Set the matrix grouping
    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }

    /// Validated per-order memory lengths
    pub fn per_order_memory(&self) -> BasisResult<Vec<usize>> {
        Ok(self.memory.per_order(self.order)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use volterrs_core::VolterraError;

    #[test]
    fn test_key_accessors() {
        assert_eq!(BasisKey::Order(3).order(), 3);
        assert_eq!(BasisKey::Order(3).conjugate_count(), 0);
        assert_eq!(BasisKey::Term(5, 2).order(), 5);
        assert_eq!(BasisKey::Term(5, 2).conjugate_count(), 2);
        assert_eq!(BasisKey::Term(2, 1).to_string(), "term (2, 1)");
    }

    #[test]
    fn test_key_ordering() {
        let mut keys = vec![BasisKey::Term(2, 1), BasisKey::Term(1, 0), BasisKey::Term(2, 0)];
        keys.sort();
        assert_eq!(
            keys,
            vec![BasisKey::Term(1, 0), BasisKey::Term(2, 0), BasisKey::Term(2, 1)]
        );
    }

    #[test]
    fn test_parse_system_type() {
        assert_eq!("Volterra".parse::<SystemType>().unwrap(), SystemType::Volterra);
        assert_eq!("HAMMERSTEIN".parse::<SystemType>().unwrap(), SystemType::Hammerstein);
        assert_eq!(
            "unknown".parse::<SystemType>(),
            Err(BasisError::UnknownSystemType("unknown".to_string()))
        );
    }

    #[test]
    fn test_parse_grouping() {
        assert_eq!("term".parse::<Grouping>().unwrap(), Grouping::ByTerm);
        assert!("terms".parse::<Grouping>().is_err());
    }

    #[test]
    fn test_term_keys_for_odd_order() {
        assert_eq!(
            Grouping::ByTerm.keys(3),
            vec![BasisKey::Term(3, 0), BasisKey::Term(3, 1)]
        );
    }

    #[test]
    fn test_from_names_rejects_before_validation() {
        let err = BasisConfig::from_names(2, 3, "unknown", "order").unwrap_err();
        assert_eq!(err, BasisError::UnknownSystemType("unknown".to_string()));
    }

    #[test]
    fn test_per_order_memory_validation() {
        let config = BasisConfig::new(3, vec![4, 4]);
        assert_eq!(
            config.per_order_memory(),
            Err(BasisError::Volterra(VolterraError::MemoryLengthMismatch {
                expected: 3,
                actual: 2
            }))
        );
    }
}
