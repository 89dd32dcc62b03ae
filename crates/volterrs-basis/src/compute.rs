//! Configuration-driven entry points

use crate::basis::CombinatorialBasis;
use crate::config::{BasisConfig, SystemType};
use crate::error::BasisResult;
use crate::hammerstein::hammerstein_basis;
use crate::orthogonal::{OrthogonalBasis, Projection};
use crate::projected::{projected_hammerstein_basis, projected_volterra_basis};
use crate::volterra::volterra_basis;
use scirs2_core::ndarray_ext::ArrayView1;
use volterrs_core::Sample;

/// Combinatorial basis of `signal` as described by `config`
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use volterrs_basis::{compute_combinatorial_basis, BasisConfig, BasisKey};
///
/// let config = BasisConfig::from_names(2, 2, "volterra", "order").unwrap();
/// let basis = compute_combinatorial_basis(&array![1.0, 2.0, 3.0, 4.0].view(), &config).unwrap();
/// let keys: Vec<BasisKey> = basis.keys().copied().collect();
/// assert_eq!(keys, vec![BasisKey::Order(1), BasisKey::Order(2)]);
/// ```
pub fn compute_combinatorial_basis<T: Sample>(
    signal: &ArrayView1<T>,
    config: &BasisConfig,
) -> BasisResult<CombinatorialBasis<T>> {
    let memory = config.per_order_memory()?;
    match config.system {
        SystemType::Volterra => volterra_basis(signal, config.order, memory, config.grouping),
        SystemType::Hammerstein => {
            hammerstein_basis(signal, config.order, memory, config.grouping)
        }
    }
}

/// Combinatorial basis of `signal` on projected inputs
///
/// The memory lengths in `config` are ignored: the orthogonal bases fix the
/// number of regressors.
pub fn compute_projected_combinatorial_basis<T: Sample, B: OrthogonalBasis>(
    signal: &ArrayView1<T>,
    config: &BasisConfig,
    projection: Projection<'_, B>,
) -> BasisResult<CombinatorialBasis<T>> {
    match config.system {
        SystemType::Volterra => {
            projected_volterra_basis(signal, config.order, projection, config.grouping)
        }
        SystemType::Hammerstein => {
            projected_hammerstein_basis(signal, config.order, projection, config.grouping)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BasisKey, Grouping};
    use crate::error::BasisError;
    use crate::orthogonal::LaguerreBasis;
    use scirs2_core::ndarray_ext::array;
    use volterrs_core::VolterraError;

    #[test]
    fn test_dispatch_hammerstein_by_term() {
        let config = BasisConfig::new(3, 2)
            .with_system(SystemType::Hammerstein)
            .with_grouping(Grouping::ByTerm);
        let basis = compute_combinatorial_basis(&array![1.0, 2.0].view(), &config).unwrap();
        let keys: Vec<BasisKey> = basis.keys().copied().collect();
        assert_eq!(
            keys,
            vec![
                BasisKey::Term(1, 0),
                BasisKey::Term(2, 0),
                BasisKey::Term(2, 1),
                BasisKey::Term(3, 0),
                BasisKey::Term(3, 1)
            ]
        );
    }

    #[test]
    fn test_dispatch_validates_memory() {
        let config = BasisConfig::new(2, vec![3]);
        assert_eq!(
            compute_combinatorial_basis(&array![1.0].view(), &config).unwrap_err(),
            BasisError::Volterra(VolterraError::MemoryLengthMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_projected_dispatch() {
        let config = BasisConfig::new(2, 1).with_system(SystemType::Hammerstein);
        let laguerre = LaguerreBasis::new(0.2, 3).unwrap();
        let basis = compute_projected_combinatorial_basis(
            &array![1.0, -1.0, 0.5, 0.25].view(),
            &config,
            Projection::Shared(&laguerre),
        )
        .unwrap();
        assert_eq!(basis.order(2).unwrap().dim(), (4, 3));
    }
}
