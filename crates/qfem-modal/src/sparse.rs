//! Compressed sparse row storage.
//!
//! A minimal square CSR matrix, generic over the scalar so the same storage
//! backs real stiffness/mass input and the complex Hermitian operator. Only
//! the operations the eigensolvers and the decomposer actually need are
//! provided.

use nalgebra::DMatrix;
use std::ops::AddAssign;

/// A square sparse matrix in compressed sparse row format.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix<T> {
    dim: usize,
    row_ptr: Vec<usize>,
    col_idx: Vec<usize>,
    values: Vec<T>,
}

impl<T> CsrMatrix<T>
where
    T: Copy + Default + PartialEq + AddAssign,
{
    /// Build from (row, col, value) triplets. Duplicate entries are summed;
    /// entries that sum to zero are dropped.
    ///
    /// Panics if any index is outside `dim`.
    pub fn from_triplets(dim: usize, triplets: &[(usize, usize, T)]) -> Self {
        let mut sorted: Vec<(usize, usize, T)> = triplets.to_vec();
        for &(r, c, _) in &sorted {
            assert!(r < dim && c < dim, "triplet ({r}, {c}) outside {dim}x{dim} matrix");
        }
        sorted.sort_by_key(|&(r, c, _)| (r, c));

        let mut merged: Vec<(usize, usize, T)> = Vec::with_capacity(sorted.len());
        for (r, c, v) in sorted {
            match merged.last_mut() {
                Some(last) if last.0 == r && last.1 == c => last.2 += v,
                _ => merged.push((r, c, v)),
            }
        }
        merged.retain(|&(_, _, v)| v != T::default());

        let mut row_ptr = vec![0usize; dim + 1];
        let mut col_idx = Vec::with_capacity(merged.len());
        let mut values = Vec::with_capacity(merged.len());
        for (r, c, v) in merged {
            row_ptr[r + 1] += 1;
            col_idx.push(c);
            values.push(v);
        }
        for i in 0..dim {
            row_ptr[i + 1] += row_ptr[i];
        }

        Self {
            dim,
            row_ptr,
            col_idx,
            values,
        }
    }

    /// Identity matrix scaled by `value`.
    pub fn scaled_identity(dim: usize, value: T) -> Self {
        let triplets: Vec<(usize, usize, T)> = (0..dim).map(|i| (i, i, value)).collect();
        Self::from_triplets(dim, &triplets)
    }

    /// Side length.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Entry at (row, col); zero when not stored.
    pub fn get(&self, row: usize, col: usize) -> T {
        let lo = self.row_ptr[row];
        let hi = self.row_ptr[row + 1];
        match self.col_idx[lo..hi].binary_search(&col) {
            Ok(pos) => self.values[lo + pos],
            Err(_) => T::default(),
        }
    }

    /// Stored entries of one row as (col, value) pairs.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, T)> + '_ {
        let lo = self.row_ptr[row];
        let hi = self.row_ptr[row + 1];
        self.col_idx[lo..hi]
            .iter()
            .copied()
            .zip(self.values[lo..hi].iter().copied())
    }

    /// All stored entries as (row, col, value) triplets in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, T)> + '_ {
        (0..self.dim).flat_map(move |r| self.row(r).map(move |(c, v)| (r, c, v)))
    }
}

impl CsrMatrix<f64> {
    /// y = A·x.
    ///
    /// Panics if the slice lengths do not match the matrix dimension.
    pub fn matvec(&self, x: &[f64], y: &mut [f64]) {
        assert_eq!(x.len(), self.dim, "matvec input length mismatch");
        assert_eq!(y.len(), self.dim, "matvec output length mismatch");
        for (r, out) in y.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (c, v) in self.row(r) {
                sum += v * x[c];
            }
            *out = sum;
        }
    }

    /// Dense copy of the leading `k`×`k` block (`k` clamped to the dimension).
    pub fn leading_block(&self, k: usize) -> DMatrix<f64> {
        let k = k.min(self.dim);
        let mut block = DMatrix::zeros(k, k);
        for r in 0..k {
            for (c, v) in self.row(r) {
                if c < k {
                    block[(r, c)] = v;
                }
            }
        }
        block
    }
}
