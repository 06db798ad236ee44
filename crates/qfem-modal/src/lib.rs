//! `qfem-modal` — classical modal analysis feeding the quantum pipeline.
//!
//! Takes the stiffness and mass matrices of an assembled finite-element
//! system, solves the generalized eigenproblem
//!
//!   K·v = λ·M·v
//!
//! for the lowest modes, and embeds the retained spectrum as a padded
//! Hermitian operator sized for a qubit register. Sparse systems go through
//! a shift-invert Lanczos solver with a single documented fallback to a
//! reduced dense solve; dense systems use a symmetric eigendecomposition
//! directly.
//!
//! # Quick start
//!
//! ```rust
//! use qfem_modal::{HamiltonianBuilder, MaterialProperties, SystemMatrix};
//!
//! // Idealized 8-DOF steel system with decoupled unit geometry.
//! let steel = MaterialProperties::steel();
//! let stiffness = SystemMatrix::scaled_identity(8, steel.young_modulus);
//! let mass = SystemMatrix::scaled_identity(8, steel.density);
//!
//! let hamiltonian = HamiltonianBuilder::new(stiffness, mass)
//!     .with_num_modes(4)
//!     .with_material(steel)
//!     .build()
//!     .unwrap();
//!
//! // Four retained modes pad to a 4-dimensional operator on 2 qubits.
//! assert_eq!(hamiltonian.padded_dimension(), 4);
//! assert_eq!(hamiltonian.qubit_count(), 2);
//! ```

pub mod eigen;
pub mod error;
pub mod hamiltonian;
mod lanczos;
pub mod material;
pub mod matrix;
pub mod sparse;

pub use error::{ModalError, ModalResult};
pub use hamiltonian::{
    DEFAULT_MAX_QUBITS, DEFAULT_NUM_MODES, Hamiltonian, HamiltonianBuilder, Method,
    OperatorMatrix, build_hamiltonian,
};
pub use material::MaterialProperties;
pub use matrix::{MatrixData, SystemMatrix};
pub use sparse::CsrMatrix;
