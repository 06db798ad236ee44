//! Error types for the modal crate.

use thiserror::Error;

/// Errors produced during Hamiltonian construction.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ModalError {
    /// The eigensolver failed, including the one degrade-and-retry pass.
    #[error("linear algebra failure on {dimension}x{dimension} system: {detail}")]
    LinearAlgebraFailure {
        /// Side length of the system that failed.
        dimension: usize,
        /// Human-readable description of the failure.
        detail: String,
    },

    /// The padded operator needs more qubits than the configured maximum.
    #[error("system requires {qubit_count} qubits, maximum allowed is {max_qubits}")]
    CapacityExceeded {
        /// Qubits required by the padded dimension.
        qubit_count: u32,
        /// Configured qubit ceiling.
        max_qubits: u32,
    },
}

/// Result type for modal operations.
pub type ModalResult<T> = Result<T, ModalError>;
