//! System matrices from finite-element assembly.
//!
//! Stiffness and mass matrices arrive from an external assembly stage, dense
//! or sparse, tagged with a symmetry flag the assembler vouches for. This
//! module only stores them and answers the questions the eigensolvers ask.

use nalgebra::DMatrix;

use crate::sparse::CsrMatrix;

/// Storage backing a system matrix.
#[derive(Debug, Clone)]
pub enum MatrixData {
    /// Dense column-major storage.
    Dense(DMatrix<f64>),
    /// Compressed sparse row storage.
    Sparse(CsrMatrix<f64>),
}

/// A square stiffness or mass matrix with a symmetry tag.
#[derive(Debug, Clone)]
pub struct SystemMatrix {
    data: MatrixData,
    symmetric: bool,
}

impl SystemMatrix {
    /// Wrap a dense matrix.
    ///
    /// Panics if the matrix is not square.
    pub fn from_dense(matrix: DMatrix<f64>, symmetric: bool) -> Self {
        assert_eq!(matrix.nrows(), matrix.ncols(), "system matrix must be square");
        Self {
            data: MatrixData::Dense(matrix),
            symmetric,
        }
    }

    /// Wrap a CSR matrix.
    pub fn from_csr(matrix: CsrMatrix<f64>, symmetric: bool) -> Self {
        Self {
            data: MatrixData::Sparse(matrix),
            symmetric,
        }
    }

    /// Dense identity scaled by `value` (convenient for uniform models).
    pub fn scaled_identity(dim: usize, value: f64) -> Self {
        Self::from_dense(DMatrix::from_diagonal_element(dim, dim, value), true)
    }

    /// Sparse identity scaled by `value`.
    pub fn sparse_scaled_identity(dim: usize, value: f64) -> Self {
        Self::from_csr(CsrMatrix::scaled_identity(dim, value), true)
    }

    /// Side length.
    pub fn dim(&self) -> usize {
        match &self.data {
            MatrixData::Dense(m) => m.nrows(),
            MatrixData::Sparse(m) => m.dim(),
        }
    }

    /// True when stored in CSR form.
    pub fn is_sparse(&self) -> bool {
        matches!(self.data, MatrixData::Sparse(_))
    }

    /// The symmetry tag supplied by the assembler.
    pub fn is_symmetric(&self) -> bool {
        self.symmetric
    }

    /// Access the underlying storage.
    pub fn data(&self) -> &MatrixData {
        &self.data
    }

    /// Dense copy of the leading `k`×`k` block (`k` clamped to the dimension).
    pub fn leading_block(&self, k: usize) -> DMatrix<f64> {
        match &self.data {
            MatrixData::Dense(m) => {
                let k = k.min(m.nrows());
                m.view((0, 0), (k, k)).into_owned()
            }
            MatrixData::Sparse(m) => m.leading_block(k),
        }
    }

    /// Entry at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        match &self.data {
            MatrixData::Dense(m) => m[(row, col)],
            MatrixData::Sparse(m) => m.get(row, col),
        }
    }

    /// Fraction of entries with magnitude above 1e-12.
    pub fn nonzero_fraction(&self) -> f64 {
        let n = self.dim();
        if n == 0 {
            return 0.0;
        }
        let total = (n * n) as f64;
        let nonzero = match &self.data {
            MatrixData::Dense(m) => m.iter().filter(|v| v.abs() > 1e-12).count(),
            MatrixData::Sparse(m) => m.iter().filter(|(_, _, v)| v.abs() > 1e-12).count(),
        };
        nonzero as f64 / total
    }

    /// Rough condition-number estimate.
    ///
    /// Power iteration (deterministic start vector) approximates the largest
    /// eigenvalue; the smallest is taken as trace/n scaled down two orders of
    /// magnitude, floored at 1e-10. Good enough to flag ill-conditioned
    /// assemblies in diagnostics, nothing more.
    pub fn estimate_condition_number(&self, iterations: usize) -> f64 {
        let n = self.dim();
        if n == 0 {
            return 1.0;
        }

        let mut v = vec![1.0 / (n as f64).sqrt(); n];
        let mut av = vec![0.0; n];
        for _ in 0..iterations {
            self.apply(&v, &mut av);
            let norm = av.iter().map(|x| x * x).sum::<f64>().sqrt();
            if norm <= f64::MIN_POSITIVE {
                return 1.0;
            }
            for (vi, avi) in v.iter_mut().zip(av.iter()) {
                *vi = avi / norm;
            }
        }
        self.apply(&v, &mut av);
        let lambda_max = v.iter().zip(av.iter()).map(|(x, y)| x * y).sum::<f64>();

        let trace: f64 = (0..n).map(|i| self.get(i, i)).sum();
        let lambda_min = (trace / n as f64 * 0.01).max(1e-10);
        (lambda_max / lambda_min).abs()
    }

    fn apply(&self, x: &[f64], y: &mut [f64]) {
        match &self.data {
            MatrixData::Dense(m) => {
                for (r, out) in y.iter_mut().enumerate() {
                    *out = (0..x.len()).map(|c| m[(r, c)] * x[c]).sum();
                }
            }
            MatrixData::Sparse(m) => m.matvec(x, y),
        }
    }
}
