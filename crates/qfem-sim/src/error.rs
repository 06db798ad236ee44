//! Error types for the sim crate.

use qfem_circuit::CircuitError;
use thiserror::Error;

/// Errors produced while synthesizing an evolution circuit.
///
/// These never escape [`synthesize_trotter_circuit`]: the synthesizer converts
/// them into a degraded mock result and attaches the cause.
///
/// [`synthesize_trotter_circuit`]: crate::synthesize_trotter_circuit
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum SynthesisError {
    /// The configured backend provider reports no circuit capability.
    #[error("backend '{0}' has no circuit capability")]
    BackendUnavailable(String),

    /// The circuit builder rejected an instruction.
    #[error("circuit construction failed: {0}")]
    Circuit(#[from] CircuitError),
}

/// Result type for synthesis operations.
pub type SynthesisResult<T> = Result<T, SynthesisError>;
