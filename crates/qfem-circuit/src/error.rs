//! Error types for the circuit crate.

use crate::qubit::{ClbitId, QubitId};
use thiserror::Error;

/// Errors that can occur while building a circuit.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum CircuitError {
    /// Qubit index is outside the circuit width.
    #[error("qubit {qubit} out of range for circuit with {num_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the circuit.
        num_qubits: u32,
    },

    /// Classical bit index is outside the circuit's classical register.
    #[error("classical bit {clbit} out of range for circuit with {num_clbits} classical bits")]
    ClbitOutOfRange {
        /// The offending classical bit.
        clbit: ClbitId,
        /// Number of classical bits in the circuit.
        num_clbits: u32,
    },

    /// Two-qubit gate applied to the same qubit twice.
    #[error("gate '{gate_name}' requires distinct qubits, got {qubit} twice")]
    DuplicateQubit {
        /// Name of the gate.
        gate_name: String,
        /// The duplicated qubit.
        qubit: QubitId,
    },
}

/// Result type for circuit operations.
pub type CircuitResult<T> = Result<T, CircuitError>;
