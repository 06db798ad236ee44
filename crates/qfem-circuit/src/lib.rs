//! `qfem-circuit` — gate-level circuit representation.
//!
//! A deliberately small circuit IR for time-evolution synthesis: Hadamard,
//! axis rotations with bound `f64` angles, CNOT and per-qubit measurement.
//! Depth and gate counts are computed from the emitted instruction sequence.
//!
//! # Quick start
//!
//! ```rust
//! use qfem_circuit::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::new("bell", 2);
//! circuit
//!     .h(QubitId(0)).unwrap()
//!     .cx(QubitId(0), QubitId(1)).unwrap()
//!     .measure_all().unwrap();
//!
//! assert_eq!(circuit.gate_count(), 2); // measurements are counted separately
//! assert_eq!(circuit.depth(), 3);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;
pub mod render;

pub use circuit::Circuit;
pub use error::{CircuitError, CircuitResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
pub use render::sketch;
