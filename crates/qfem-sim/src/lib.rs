//! `qfem-sim` — quantum-side pipeline for decomposed structural Hamiltonians.
//!
//! Takes the padded Hermitian operator produced by `qfem-modal` and carries
//! it the rest of the way to a circuit:
//!
//! - **Pauli decomposition** — truncated, magnitude-sorted sum of Pauli
//!   tensor terms (a deliberate local-coupling heuristic, not an exact
//!   basis projection)
//! - **Trotter synthesis** — first-order product-formula evolution circuit
//!   with a mandatory degraded/mock fallback that never fails
//! - **Evolution estimation** — illustrative, non-physical energy and
//!   amplitude series for visualization
//! - **Analysis** — coefficient statistics and classical-cost estimates
//!
//! # Quick start
//!
//! ```rust
//! use qfem_modal::{HamiltonianBuilder, SystemMatrix};
//! use qfem_sim::{PauliDecomposer, TrotterSynthesizer};
//!
//! let hamiltonian = HamiltonianBuilder::new(
//!     SystemMatrix::scaled_identity(4, 4.0),
//!     SystemMatrix::scaled_identity(4, 1.0),
//! )
//! .with_num_modes(2)
//! .build()
//! .unwrap();
//!
//! let decomposition = PauliDecomposer::new().decompose(&hamiltonian);
//! let result = TrotterSynthesizer::new().synthesize(&decomposition);
//!
//! assert!(!result.degraded);
//! assert_eq!(result.qubit_count, 1);
//! ```

pub mod analysis;
pub mod backend;
pub mod decompose;
pub mod error;
pub mod evolution;
pub mod pauli;
pub mod synthesis;
pub mod trotter;

pub use analysis::{ClassicalCost, DecompositionStats, classical_cost, decomposition_stats};
pub use backend::{BackendCapability, GateModel, Unavailable};
pub use decompose::{DEFAULT_MAX_TERMS, DEFAULT_THRESHOLD, PauliDecomposer, decompose_pauli};
pub use error::{SynthesisError, SynthesisResult};
pub use evolution::{
    AmplitudeEstimate, EvolutionSample, estimate_evolution, estimate_evolution_with_rng,
};
pub use pauli::{PauliDecomposition, PauliOp, PauliString, PauliTerm};
pub use trotter::{
    DEFAULT_EVOLUTION_TIME, DEFAULT_TROTTER_STEPS, TrotterCircuit, TrotterSynthesizer,
    synthesize_trotter_circuit,
};
