//! Dense generalized eigensolvers.
//!
//! The generalized problem `K·v = λ·M·v` is reduced to the ordinary problem
//! `(M⁻¹K)·v = λ·v` and handed to a symmetric eigendecomposition, which reads
//! a single triangle of its input. Eigenpairs come back sorted ascending so
//! the leading entries are the structurally interesting low-frequency modes.

use nalgebra::{DMatrix, SymmetricEigen};

use crate::error::{ModalError, ModalResult};

/// Convergence threshold for the iterative symmetric decomposition.
pub(crate) const EIGEN_EPS: f64 = 1.0e-13;

/// Eigenvalues with their mode shapes, one column per retained mode.
#[derive(Debug, Clone)]
pub struct Eigenpairs {
    /// Eigenvalues, ascending.
    pub values: Vec<f64>,
    /// Mode shapes; row dimension matches the solved (possibly reduced) block.
    pub vectors: DMatrix<f64>,
}

/// Smallest `num_modes` eigenpairs of `M⁻¹K`.
pub(crate) fn dense_eigenpairs(
    k: &DMatrix<f64>,
    m: &DMatrix<f64>,
    num_modes: usize,
) -> ModalResult<Eigenpairs> {
    let n = k.nrows();
    let m_inv = m
        .clone()
        .try_inverse()
        .ok_or_else(|| ModalError::LinearAlgebraFailure {
            dimension: n,
            detail: "mass matrix is singular".into(),
        })?;
    let a = &m_inv * k;

    let eigen = SymmetricEigen::try_new(a, EIGEN_EPS, 50 * n.max(1)).ok_or_else(|| {
        ModalError::LinearAlgebraFailure {
            dimension: n,
            detail: "symmetric eigendecomposition did not converge".into(),
        }
    })?;

    Ok(select_smallest(&eigen, num_modes))
}

/// Sort eigenpairs ascending by eigenvalue and keep the first `num_modes`.
fn select_smallest(eigen: &SymmetricEigen<f64, nalgebra::Dyn>, num_modes: usize) -> Eigenpairs {
    let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[a]
            .partial_cmp(&eigen.eigenvalues[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let take = num_modes.min(order.len());

    let values: Vec<f64> = order[..take]
        .iter()
        .map(|&i| eigen.eigenvalues[i])
        .collect();
    let n = eigen.eigenvectors.nrows();
    let mut vectors = DMatrix::zeros(n, take);
    for (dst, &src) in order[..take].iter().enumerate() {
        vectors.set_column(dst, &eigen.eigenvectors.column(src));
    }

    Eigenpairs { values, vectors }
}
