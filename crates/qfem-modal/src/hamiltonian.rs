//! Hamiltonian construction from structural system matrices.
//!
//! The generalized eigenproblem
//!
//!   K·v = λ·M·v
//!
//! is solved for the lowest `num_modes` eigenpairs, and the resulting spectrum
//! is embedded as a diagonal Hermitian operator, zero-padded to the next
//! power-of-two dimension so it maps onto a qubit register.
//!
//! # Example
//!
//! ```rust
//! use qfem_modal::{HamiltonianBuilder, SystemMatrix};
//!
//! let stiffness = SystemMatrix::scaled_identity(8, 200.0e9);
//! let mass = SystemMatrix::scaled_identity(8, 7850.0);
//! let hamiltonian = HamiltonianBuilder::new(stiffness, mass)
//!     .with_num_modes(4)
//!     .build()
//!     .unwrap();
//! assert_eq!(hamiltonian.qubit_count(), 2);
//! ```

use nalgebra::DMatrix;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::eigen::{self, Eigenpairs};
use crate::error::{ModalError, ModalResult};
use crate::lanczos;
use crate::material::MaterialProperties;
use crate::matrix::{MatrixData, SystemMatrix};
use crate::sparse::CsrMatrix;

/// Dense systems above this size are truncated to a leading block.
pub const DENSE_CUTOFF: usize = 1000;
/// Leading-block size used when a large dense system is truncated.
pub const REDUCED_BLOCK: usize = 100;
/// Leading-block size for the dense retry after a sparse-solver failure.
pub const SPARSE_RETRY_BLOCK: usize = 20;
/// Operator side above which the Hamiltonian is stored as CSR.
pub const SPARSE_STORAGE_THRESHOLD: usize = 50;
/// Default ceiling on the qubit register.
pub const DEFAULT_MAX_QUBITS: u32 = 20;
/// Default number of retained modes.
pub const DEFAULT_NUM_MODES: usize = 10;
/// Eigenvalue spreads at or below this skip normalization.
const SPREAD_EPSILON: f64 = 1e-10;

/// How raw eigenvalues become diagonal entries of the operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Use the eigenvalues as-is.
    #[default]
    Standard,
    /// Rescale the spectrum to [0, 1]; near-degenerate spectra pass through
    /// unchanged.
    Normalized,
}

/// Complex operator storage, dense up to [`SPARSE_STORAGE_THRESHOLD`].
#[derive(Debug, Clone, PartialEq)]
pub enum OperatorMatrix {
    Dense(DMatrix<Complex64>),
    Sparse(CsrMatrix<Complex64>),
}

impl OperatorMatrix {
    /// Side length.
    pub fn dim(&self) -> usize {
        match self {
            Self::Dense(m) => m.nrows(),
            Self::Sparse(m) => m.dim(),
        }
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self, Self::Sparse(_))
    }

    /// Entry at `(row, col)`; absent sparse entries read as zero.
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        match self {
            Self::Dense(m) => m[(row, col)],
            Self::Sparse(m) => m.get(row, col),
        }
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> Complex64 {
        match self {
            Self::Dense(m) => {
                let mut total = Complex64::new(0.0, 0.0);
                for i in 0..m.nrows() {
                    total += m[(i, i)];
                }
                total
            }
            Self::Sparse(m) => {
                let mut total = Complex64::new(0.0, 0.0);
                for (i, j, v) in m.iter() {
                    if i == j {
                        total += v;
                    }
                }
                total
            }
        }
    }

    /// Frobenius norm.
    pub fn frobenius_norm(&self) -> f64 {
        let sum: f64 = match self {
            Self::Dense(m) => m.iter().map(|v| v.norm_sqr()).sum(),
            Self::Sparse(m) => m.iter().map(|(_, _, v)| v.norm_sqr()).sum(),
        };
        sum.sqrt()
    }
}

/// Padded Hermitian operator derived from a structural eigenproblem.
#[derive(Debug, Clone)]
pub struct Hamiltonian {
    operator: OperatorMatrix,
    original_dimension: usize,
    padded_dimension: usize,
    qubit_count: u32,
    norm: f64,
    trace: f64,
    eigenvalues: Option<Vec<f64>>,
    mode_shapes: Option<DMatrix<f64>>,
    material: Option<MaterialProperties>,
}

impl Hamiltonian {
    /// Embed a Hermitian operator into the smallest power-of-two dimension.
    ///
    /// Fails with [`ModalError::CapacityExceeded`] when the padded dimension
    /// needs more than `max_qubits` qubits.
    pub fn from_hermitian(operator: OperatorMatrix, max_qubits: u32) -> ModalResult<Self> {
        let original = operator.dim();
        let padded = original.next_power_of_two();
        let qubit_count = padded.trailing_zeros();
        if qubit_count > max_qubits {
            return Err(ModalError::CapacityExceeded {
                qubit_count,
                max_qubits,
            });
        }

        let operator = pad_operator(operator, padded);
        let norm = operator.frobenius_norm();
        let trace = operator.trace().re;
        debug!(original, padded, qubit_count, "embedded hermitian operator");

        Ok(Self {
            operator,
            original_dimension: original,
            padded_dimension: padded,
            qubit_count,
            norm,
            trace,
            eigenvalues: None,
            mode_shapes: None,
            material: None,
        })
    }

    /// The padded operator.
    pub fn operator(&self) -> &OperatorMatrix {
        &self.operator
    }

    /// Side length before padding.
    pub fn original_dimension(&self) -> usize {
        self.original_dimension
    }

    /// Side length after padding, always a power of two.
    pub fn padded_dimension(&self) -> usize {
        self.padded_dimension
    }

    /// Qubits needed to index the padded dimension.
    pub fn qubit_count(&self) -> u32 {
        self.qubit_count
    }

    /// Frobenius norm of the padded operator.
    pub fn norm(&self) -> f64 {
        self.norm
    }

    /// Real part of the trace.
    pub fn trace(&self) -> f64 {
        self.trace
    }

    /// Generalized eigenvalues retained from the modal solve, before any
    /// spectrum scaling. `None` for operators built directly from a matrix.
    pub fn eigenvalues(&self) -> Option<&[f64]> {
        self.eigenvalues.as_deref()
    }

    /// Mode shapes from the modal solve; rows match the solved block, which
    /// may be smaller than the assembled system after a reduced retry.
    pub fn mode_shapes(&self) -> Option<&DMatrix<f64>> {
        self.mode_shapes.as_ref()
    }

    /// Material metadata, when the builder was given any.
    pub fn material(&self) -> Option<&MaterialProperties> {
        self.material.as_ref()
    }
}

/// Builder for [`Hamiltonian`] values.
#[derive(Debug, Clone)]
pub struct HamiltonianBuilder {
    stiffness: SystemMatrix,
    mass: SystemMatrix,
    num_modes: usize,
    method: Method,
    max_qubits: u32,
    material: Option<MaterialProperties>,
}

impl HamiltonianBuilder {
    pub fn new(stiffness: SystemMatrix, mass: SystemMatrix) -> Self {
        Self {
            stiffness,
            mass,
            num_modes: DEFAULT_NUM_MODES,
            method: Method::Standard,
            max_qubits: DEFAULT_MAX_QUBITS,
            material: None,
        }
    }

    /// Number of low modes to retain; clamped to `1..=n-2` at build time.
    #[must_use]
    pub fn with_num_modes(mut self, num_modes: usize) -> Self {
        self.num_modes = num_modes;
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    #[must_use]
    pub fn with_material(mut self, material: MaterialProperties) -> Self {
        self.material = Some(material);
        self
    }

    /// Solve the eigenproblem and assemble the padded operator.
    ///
    /// Panics if the stiffness and mass matrices differ in dimension.
    pub fn build(self) -> ModalResult<Hamiltonian> {
        let n = self.stiffness.dim();
        assert_eq!(
            n,
            self.mass.dim(),
            "stiffness and mass matrices must have matching dimensions"
        );
        let num_modes = clamp_modes(self.num_modes, n);
        debug!(
            dimension = n,
            modes = num_modes,
            method = ?self.method,
            "solving generalized eigenproblem"
        );

        let pairs = solve_modes(&self.stiffness, &self.mass, num_modes)?;
        let scaled = scale_spectrum(&pairs.values, self.method);
        let operator = diagonal_operator(&scaled);

        let mut hamiltonian = Hamiltonian::from_hermitian(operator, self.max_qubits)?;
        hamiltonian.eigenvalues = Some(pairs.values);
        hamiltonian.mode_shapes = Some(pairs.vectors);
        hamiltonian.material = self.material;
        Ok(hamiltonian)
    }
}

/// Convenience entry point covering the common pipeline call.
pub fn build_hamiltonian(
    stiffness: SystemMatrix,
    mass: SystemMatrix,
    material: Option<MaterialProperties>,
    num_modes: usize,
    method: Method,
) -> ModalResult<Hamiltonian> {
    let mut builder = HamiltonianBuilder::new(stiffness, mass)
        .with_num_modes(num_modes)
        .with_method(method);
    if let Some(material) = material {
        builder = builder.with_material(material);
    }
    builder.build()
}

/// Requested mode counts are display-oriented; clamp instead of failing.
fn clamp_modes(requested: usize, dim: usize) -> usize {
    requested.min(dim.saturating_sub(2)).max(1)
}

/// Dispatch between the sparse and dense solvers, with the documented single
/// degrade-and-retry on sparse failure.
fn solve_modes(
    stiffness: &SystemMatrix,
    mass: &SystemMatrix,
    num_modes: usize,
) -> ModalResult<Eigenpairs> {
    let n = stiffness.dim();
    if let (MatrixData::Sparse(ks), MatrixData::Sparse(ms)) = (stiffness.data(), mass.data()) {
        return match lanczos::smallest_eigenpairs(ks, ms, num_modes) {
            Ok(pairs) => Ok(pairs),
            Err(error) => {
                let block = SPARSE_RETRY_BLOCK.min(n);
                warn!(
                    %error,
                    dimension = n,
                    block,
                    "sparse eigensolver failed, retrying on reduced dense block"
                );
                let kd = stiffness.leading_block(block);
                let md = mass.leading_block(block);
                eigen::dense_eigenpairs(&kd, &md, num_modes.min(block))
            }
        };
    }

    if n > DENSE_CUTOFF {
        let block = REDUCED_BLOCK.min(n);
        debug!(
            dimension = n,
            block, "reducing large dense system to leading block"
        );
        let kd = stiffness.leading_block(block);
        let md = mass.leading_block(block);
        return eigen::dense_eigenpairs(&kd, &md, num_modes.min(block));
    }

    let kd = stiffness.leading_block(n);
    let md = mass.leading_block(n);
    eigen::dense_eigenpairs(&kd, &md, num_modes)
}

fn scale_spectrum(values: &[f64], method: Method) -> Vec<f64> {
    match method {
        Method::Standard => values.to_vec(),
        Method::Normalized => {
            let lowest = values.iter().copied().fold(f64::INFINITY, f64::min);
            let highest = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let spread = highest - lowest;
            if spread > SPREAD_EPSILON {
                values.iter().map(|&v| (v - lowest) / spread).collect()
            } else {
                values.to_vec()
            }
        }
    }
}

fn diagonal_operator(values: &[f64]) -> OperatorMatrix {
    let side = values.len();
    if side > SPARSE_STORAGE_THRESHOLD {
        let triplets: Vec<(usize, usize, Complex64)> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i, i, Complex64::new(v, 0.0)))
            .collect();
        OperatorMatrix::Sparse(CsrMatrix::from_triplets(side, &triplets))
    } else {
        let mut dense = DMatrix::from_element(side, side, Complex64::new(0.0, 0.0));
        for (i, &v) in values.iter().enumerate() {
            dense[(i, i)] = Complex64::new(v, 0.0);
        }
        OperatorMatrix::Dense(dense)
    }
}

fn pad_operator(operator: OperatorMatrix, padded: usize) -> OperatorMatrix {
    if operator.dim() == padded {
        return operator;
    }
    match operator {
        OperatorMatrix::Dense(m) => {
            let mut out = DMatrix::from_element(padded, padded, Complex64::new(0.0, 0.0));
            out.view_mut((0, 0), (m.nrows(), m.ncols())).copy_from(&m);
            OperatorMatrix::Dense(out)
        }
        OperatorMatrix::Sparse(m) => {
            let triplets: Vec<(usize, usize, Complex64)> = m.iter().collect();
            OperatorMatrix::Sparse(CsrMatrix::from_triplets(padded, &triplets))
        }
    }
}
