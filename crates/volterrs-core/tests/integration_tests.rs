//! Integration tests for volterrs-core
//!
//! These tests exercise the public conversion API the way an identification
//! layer uses it: flat estimates in, human-usable kernel tensors out.

use scirs2_core::ndarray_ext::{Array1, IxDyn};
use scirs2_core::numeric::Complex64;
use volterrs_core::{
    coefficient_count, kernel_to_vector, series_coefficient_count, series_to_vector,
    vector_to_kernel, vector_to_series, CombinationsWithReplacement, KernelForm, MemoryLength,
    VolterraError,
};

#[test]
fn test_triangular_and_symmetric_give_same_output() -> anyhow::Result<()> {
    // y = sum over all (i, j) of h_sym[i][j] x[t-i] x[t-j] must equal
    // sum over non-decreasing (i, j) of h_tri[i][j] x[t-i] x[t-j]
    let m = 3;
    let vec = Array1::from_vec(vec![0.5_f64, -1.0, 2.0, 0.25, 3.0, -0.75]);
    let tri = vector_to_kernel(&vec.view(), 2, m, KernelForm::Triangular)?;
    let sym = vector_to_kernel(&vec.view(), 2, m, KernelForm::Symmetric)?;

    let window = [1.5_f64, -0.5, 2.0];
    let mut y_tri = 0.0_f64;
    let mut y_sym = 0.0_f64;
    for i in 0..m {
        for j in 0..m {
            let product = window[i] * window[j];
            y_tri += tri[[i, j].as_slice()] * product;
            y_sym += sym[[i, j].as_slice()] * product;
        }
    }
    assert!((y_tri - y_sym).abs() < 1e-12);
    Ok(())
}

#[test]
fn test_series_flat_vector_layout() -> anyhow::Result<()> {
    let memory = MemoryLength::from(vec![3, 2]);
    let total = series_coefficient_count(2, &memory, KernelForm::Vector)?;
    assert_eq!(total, 3 + 3);

    let vec = Array1::from_iter((1..=total).map(|v| v as f64));
    let series = vector_to_series(&vec.view(), 2, &memory, KernelForm::Triangular)?;

    let first = series.get(1).ok_or_else(|| anyhow::anyhow!("missing order 1"))?;
    assert_eq!(first.shape(), &[3]);
    assert_eq!(first[[2].as_slice()], 3.0);

    let second = series.get(2).ok_or_else(|| anyhow::anyhow!("missing order 2"))?;
    assert_eq!(second[[0, 0].as_slice()], 4.0);
    assert_eq!(second[[0, 1].as_slice()], 5.0);
    assert_eq!(second[[1, 1].as_slice()], 6.0);

    assert_eq!(series_to_vector(&series, KernelForm::Triangular)?, vec);
    Ok(())
}

#[test]
fn test_complex_kernel_round_trip() -> anyhow::Result<()> {
    let n = 3;
    let m = 2;
    let len = coefficient_count(n, m, KernelForm::Vector)?;
    let vec = Array1::from_iter((0..len).map(|v| Complex64::new(v as f64, -(v as f64) / 2.0)));
    let sym = vector_to_kernel(&vec.view(), n, m, KernelForm::Symmetric)?;
    let back = kernel_to_vector(&sym.view(), KernelForm::Symmetric)?;
    for (a, b) in back.iter().zip(vec.iter()) {
        assert!((a - b).norm() < 1e-12);
    }
    Ok(())
}

#[test]
fn test_canonical_order_matches_tensor_write_order() -> anyhow::Result<()> {
    let (n, m) = (3, 3);
    let len = coefficient_count(n, m, KernelForm::Vector)?;
    let vec = Array1::from_iter((0..len).map(|v| v as f64));
    let tri = vector_to_kernel(&vec.view(), n, m, KernelForm::Triangular)?;
    for (pos, idx) in CombinationsWithReplacement::new(m, n).enumerate() {
        assert_eq!(tri[idx.as_slice()], pos as f64);
    }
    Ok(())
}

#[test]
fn test_non_square_kernel_rejected() {
    let dense = scirs2_core::ndarray_ext::Array::<f64, _>::zeros(IxDyn(&[2, 2, 3]));
    let err = kernel_to_vector(&dense.view(), KernelForm::Symmetric).unwrap_err();
    assert_eq!(
        err,
        VolterraError::NonSquareKernel {
            shape: vec![2, 2, 3]
        }
    );
}
