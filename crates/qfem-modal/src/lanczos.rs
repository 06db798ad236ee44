//! Sparse generalized eigensolver.
//!
//! Shift-invert Lanczos for the smallest eigenvalues of `K·v = λ·M·v`. The
//! recurrence runs on the operator `K⁻¹M` in the M-inner product, where the
//! smallest generalized eigenvalues become the dominant Ritz values and
//! converge first. Inner solves against `K` use conjugate gradients, so the
//! stiffness matrix must be symmetric positive definite; anything else
//! surfaces as a [`ModalError::LinearAlgebraFailure`] and the caller falls
//! back to a reduced dense solve.

use nalgebra::{DMatrix, SymmetricEigen};
use tracing::debug;

use crate::eigen::{EIGEN_EPS, Eigenpairs};
use crate::error::{ModalError, ModalResult};
use crate::sparse::CsrMatrix;

/// Relative residual target for the inner conjugate-gradient solves.
const CG_RELATIVE_TOL: f64 = 1.0e-10;
/// Below this M-norm the Krylov basis is considered exhausted.
const BREAKDOWN_EPS: f64 = 1.0e-12;
/// Ritz values at or below this map to no finite generalized eigenvalue.
const RITZ_FLOOR: f64 = 1.0e-14;

/// Smallest `num_modes` eigenpairs of the generalized problem.
pub(crate) fn smallest_eigenpairs(
    stiffness: &CsrMatrix<f64>,
    mass: &CsrMatrix<f64>,
    num_modes: usize,
) -> ModalResult<Eigenpairs> {
    let n = stiffness.dim();
    let steps = (2 * num_modes + 8).min(n);

    let mut basis: Vec<Vec<f64>> = Vec::with_capacity(steps);
    let mut alphas: Vec<f64> = Vec::with_capacity(steps);
    let mut betas: Vec<f64> = Vec::with_capacity(steps.saturating_sub(1));
    let mut scratch = vec![0.0; n];

    let mut start = vec![1.0 / (n as f64).sqrt(); n];
    let norm = m_norm(mass, &start, &mut scratch);
    if norm < BREAKDOWN_EPS {
        return Err(ModalError::LinearAlgebraFailure {
            dimension: n,
            detail: "mass matrix annihilates the start vector".into(),
        });
    }
    scale(&mut start, 1.0 / norm);
    basis.push(start);

    for j in 0..steps {
        mass.matvec(&basis[j], &mut scratch);
        let mut w = conjugate_gradient(stiffness, &scratch)?;

        let alpha = m_dot(mass, &w, &basis[j], &mut scratch);
        alphas.push(alpha);
        axpy(-alpha, &basis[j], &mut w);
        if j > 0 {
            axpy(-betas[j - 1], &basis[j - 1], &mut w);
        }
        // Full reorthogonalization keeps the basis M-orthonormal in floating
        // point.
        for u in &basis {
            let overlap = m_dot(mass, &w, u, &mut scratch);
            axpy(-overlap, u, &mut w);
        }

        if j + 1 == steps {
            break;
        }
        let beta = m_norm(mass, &w, &mut scratch);
        if beta < BREAKDOWN_EPS {
            debug!(dimension = n, steps = j + 1, "krylov basis exhausted early");
            break;
        }
        scale(&mut w, 1.0 / beta);
        betas.push(beta);
        basis.push(w);
    }

    ritz_pairs(&basis, &alphas, &betas, num_modes, n)
}

/// Solve the projected tridiagonal problem and lift the dominant Ritz pairs
/// back to generalized eigenpairs.
fn ritz_pairs(
    basis: &[Vec<f64>],
    alphas: &[f64],
    betas: &[f64],
    num_modes: usize,
    n: usize,
) -> ModalResult<Eigenpairs> {
    let m = alphas.len();
    let mut tri = DMatrix::zeros(m, m);
    for i in 0..m {
        tri[(i, i)] = alphas[i];
        if i + 1 < m {
            tri[(i, i + 1)] = betas[i];
            tri[(i + 1, i)] = betas[i];
        }
    }
    let eigen = SymmetricEigen::try_new(tri, EIGEN_EPS, 50 * m.max(1)).ok_or_else(|| {
        ModalError::LinearAlgebraFailure {
            dimension: n,
            detail: "projected eigendecomposition did not converge".into(),
        }
    })?;

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| {
        eigen.eigenvalues[b]
            .partial_cmp(&eigen.eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut values = Vec::with_capacity(num_modes);
    let mut columns = Vec::with_capacity(num_modes);
    for &i in &order {
        let theta = eigen.eigenvalues[i];
        if theta <= RITZ_FLOOR || values.len() == num_modes {
            break;
        }
        values.push(1.0 / theta);
        columns.push(i);
    }
    if values.len() < num_modes {
        return Err(ModalError::LinearAlgebraFailure {
            dimension: n,
            detail: format!(
                "lanczos converged {} of {} requested modes",
                values.len(),
                num_modes
            ),
        });
    }

    let mut vectors = DMatrix::zeros(n, values.len());
    for (dst, &src) in columns.iter().enumerate() {
        let weights = eigen.eigenvectors.column(src);
        for (j, direction) in basis.iter().enumerate() {
            let w = weights[j];
            for (row, &entry) in direction.iter().enumerate() {
                vectors[(row, dst)] += w * entry;
            }
        }
    }

    Ok(Eigenpairs { values, vectors })
}

/// Conjugate-gradient solve of `A·x = b` for symmetric positive definite `A`.
fn conjugate_gradient(a: &CsrMatrix<f64>, b: &[f64]) -> ModalResult<Vec<f64>> {
    let n = b.len();
    let mut x = vec![0.0; n];
    let mut r = b.to_vec();
    let mut p = r.clone();
    let mut ap = vec![0.0; n];

    let tol = CG_RELATIVE_TOL * dot(b, b).sqrt();
    let mut rs_old = dot(&r, &r);
    let max_iter = 20 * n.max(1);

    for _ in 0..max_iter {
        if rs_old.sqrt() <= tol {
            return Ok(x);
        }
        a.matvec(&p, &mut ap);
        let curvature = dot(&p, &ap);
        if curvature <= 0.0 {
            return Err(ModalError::LinearAlgebraFailure {
                dimension: n,
                detail: "stiffness matrix is not positive definite".into(),
            });
        }
        let step = rs_old / curvature;
        axpy(step, &p, &mut x);
        axpy(-step, &ap, &mut r);
        let rs_new = dot(&r, &r);
        let ratio = rs_new / rs_old;
        for (pi, &ri) in p.iter_mut().zip(&r) {
            *pi = ri + ratio * *pi;
        }
        rs_old = rs_new;
    }

    if rs_old.sqrt() <= tol {
        Ok(x)
    } else {
        Err(ModalError::LinearAlgebraFailure {
            dimension: n,
            detail: "conjugate gradient did not converge".into(),
        })
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) {
    for (yi, &xi) in y.iter_mut().zip(x) {
        *yi += alpha * xi;
    }
}

fn scale(v: &mut [f64], factor: f64) {
    for vi in v.iter_mut() {
        *vi *= factor;
    }
}

fn m_dot(mass: &CsrMatrix<f64>, a: &[f64], b: &[f64], scratch: &mut [f64]) -> f64 {
    mass.matvec(b, scratch);
    dot(a, scratch)
}

fn m_norm(mass: &CsrMatrix<f64>, v: &[f64], scratch: &mut [f64]) -> f64 {
    m_dot(mass, v, v, scratch).max(0.0).sqrt()
}
