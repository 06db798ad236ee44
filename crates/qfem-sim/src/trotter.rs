//! First-order Trotter circuit synthesis.
//!
//! Approximates `exp(-i H t)` for a decomposed Hamiltonian H = Σ c_k P_k by
//! splitting the evolution into `trotter_steps` slices and evolving each term
//! in sequence within every slice (Lie-Trotter, error O(t²/n)):
//!
//!   exp(-i H t) ≈ [∏_k exp(-i c_k P_k t/n)]^n
//!
//! The circuit starts every qubit in uniform superposition with a Hadamard
//! layer and ends with a measurement of every qubit.
//!
//! Synthesis never fails. When the injected backend reports no circuit
//! capability, or gate construction errors internally, the result degrades to
//! a structural mock that carries the same counts a real circuit of that
//! shape would have, with `degraded = true` and the cause attached.

use qfem_circuit::{Circuit, QubitId, sketch};
use std::fmt;
use tracing::{debug, warn};

use crate::backend::{BackendCapability, GateModel};
use crate::error::{SynthesisError, SynthesisResult};
use crate::pauli::PauliDecomposition;
use crate::synthesis::append_pauli_rotation;

/// Default total evolution time.
pub const DEFAULT_EVOLUTION_TIME: f64 = 1.0;

/// Default number of Trotter slices.
pub const DEFAULT_TROTTER_STEPS: usize = 10;

/// Mock estimate: gates contributed by one term in one slice.
const MOCK_GATES_PER_TERM: usize = 3;

/// Slices spelled out in the mock sketch before it elides the rest.
const MOCK_SKETCH_STEPS: usize = 3;

/// Outcome of a synthesis call, real or degraded.
///
/// `gate_count` excludes measurements; `depth` counts every instruction on
/// the busiest wire, measurements included. Both conventions are fixed and
/// shared with [`Circuit`].
#[derive(Debug, Clone)]
pub struct TrotterCircuit {
    /// The synthesized circuit. `None` on the degraded path.
    pub circuit: Option<Circuit>,
    /// Width of the (real or mock) circuit.
    pub qubit_count: u32,
    /// Emitted gates, or the structural estimate when degraded.
    pub gate_count: usize,
    /// Circuit depth, or the structural estimate when degraded.
    pub depth: usize,
    /// Total evolution time the circuit approximates.
    pub evolution_time: f64,
    /// Number of Trotter slices.
    pub trotter_steps: usize,
    /// Accumulated phase from identity terms.
    pub global_phase: f64,
    /// Text rendering of the circuit, or the mock sketch when degraded.
    pub sketch: String,
    /// True when this result is a structural mock rather than a real circuit.
    pub degraded: bool,
    /// What forced the degraded path, when it was taken.
    pub cause: Option<SynthesisError>,
}

impl TrotterCircuit {
    /// True when a real circuit was produced.
    pub fn is_real(&self) -> bool {
        !self.degraded
    }
}

/// Trotter evolution synthesizer.
///
/// Configured once, then applied to any number of decompositions. The
/// backend capability provider is consulted on every call; swap in
/// [`Unavailable`](crate::backend::Unavailable) to force the mock path.
pub struct TrotterSynthesizer {
    evolution_time: f64,
    trotter_steps: usize,
    /// Circuit width override; inferred from the decomposition when `None`.
    qubit_count: Option<u32>,
    backend: Box<dyn BackendCapability>,
}

impl fmt::Debug for TrotterSynthesizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrotterSynthesizer")
            .field("evolution_time", &self.evolution_time)
            .field("trotter_steps", &self.trotter_steps)
            .field("qubit_count", &self.qubit_count)
            .field("backend", &self.backend.label())
            .finish()
    }
}

impl Default for TrotterSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TrotterSynthesizer {
    /// Synthesizer with default time and step count on the built-in
    /// gate-model backend.
    pub fn new() -> Self {
        Self {
            evolution_time: DEFAULT_EVOLUTION_TIME,
            trotter_steps: DEFAULT_TROTTER_STEPS,
            qubit_count: None,
            backend: Box::new(GateModel),
        }
    }

    /// Set the total evolution time.
    #[must_use]
    pub fn with_evolution_time(mut self, time: f64) -> Self {
        self.evolution_time = time;
        self
    }

    /// Set the number of Trotter slices.
    ///
    /// Zero slices is tolerated: the circuit reduces to the Hadamard layer
    /// and the measurements.
    #[must_use]
    pub fn with_trotter_steps(mut self, steps: usize) -> Self {
        self.trotter_steps = steps;
        self
    }

    /// Override the circuit width.
    ///
    /// By default the width is taken from the decomposition. A narrower
    /// override makes terms fall outside the circuit, which lands on the
    /// degraded path like any other construction error.
    #[must_use]
    pub fn with_qubit_count(mut self, qubit_count: u32) -> Self {
        self.qubit_count = Some(qubit_count);
        self
    }

    /// Replace the backend capability provider.
    #[must_use]
    pub fn with_backend(mut self, backend: impl BackendCapability + 'static) -> Self {
        self.backend = Box::new(backend);
        self
    }

    /// Synthesize the evolution circuit for `decomposition`.
    ///
    /// Total over its input domain. Any internal failure is converted into
    /// a degraded mock result carrying the cause.
    pub fn synthesize(&self, decomposition: &PauliDecomposition) -> TrotterCircuit {
        let qubit_count = self.effective_qubit_count(decomposition);

        if !self.backend.circuits_available() {
            let cause = SynthesisError::BackendUnavailable(self.backend.label().to_string());
            warn!(
                backend = self.backend.label(),
                "backend has no circuit capability, producing mock result"
            );
            return self.mock(decomposition, qubit_count, cause);
        }

        match self.build_circuit(decomposition, qubit_count) {
            Ok(circuit) => {
                debug!(
                    num_terms = decomposition.len(),
                    trotter_steps = self.trotter_steps,
                    qubit_count,
                    gates = circuit.gate_count(),
                    depth = circuit.depth(),
                    "synthesized first-order trotter circuit"
                );
                TrotterCircuit {
                    qubit_count,
                    gate_count: circuit.gate_count(),
                    depth: circuit.depth(),
                    evolution_time: self.evolution_time,
                    trotter_steps: self.trotter_steps,
                    global_phase: circuit.global_phase(),
                    sketch: sketch(&circuit),
                    degraded: false,
                    cause: None,
                    circuit: Some(circuit),
                }
            }
            Err(error) => {
                warn!(%error, "circuit synthesis failed, producing mock result");
                self.mock(decomposition, qubit_count, error)
            }
        }
    }

    fn effective_qubit_count(&self, decomposition: &PauliDecomposition) -> u32 {
        self.qubit_count.unwrap_or_else(|| decomposition.qubit_count())
    }

    fn build_circuit(
        &self,
        decomposition: &PauliDecomposition,
        qubit_count: u32,
    ) -> SynthesisResult<Circuit> {
        let mut circuit = Circuit::new("trotter_evolution", qubit_count);

        for q in 0..qubit_count {
            circuit.h(QubitId(q))?;
        }

        if self.trotter_steps > 0 {
            let dt = self.evolution_time / self.trotter_steps as f64;
            for _ in 0..self.trotter_steps {
                for term in decomposition.terms() {
                    append_pauli_rotation(&mut circuit, term, dt)?;
                }
            }
        }

        circuit.measure_all()?;
        Ok(circuit)
    }

    fn mock(
        &self,
        decomposition: &PauliDecomposition,
        qubit_count: u32,
        cause: SynthesisError,
    ) -> TrotterCircuit {
        let num_terms = decomposition.len();
        let gate_count =
            num_terms * MOCK_GATES_PER_TERM * self.trotter_steps + qubit_count as usize;
        let depth = self.trotter_steps * num_terms;

        TrotterCircuit {
            circuit: None,
            qubit_count,
            gate_count,
            depth,
            evolution_time: self.evolution_time,
            trotter_steps: self.trotter_steps,
            global_phase: 0.0,
            sketch: mock_sketch(qubit_count, num_terms, self.trotter_steps),
            degraded: true,
            cause: Some(cause),
        }
    }
}

/// Synthesize a first-order Trotter circuit for `decomposition`.
///
/// Always succeeds; inspect the result's `degraded` flag and `cause` to
/// distinguish a real circuit from a structural mock.
pub fn synthesize_trotter_circuit(
    decomposition: &PauliDecomposition,
    qubit_count: u32,
    evolution_time: f64,
    trotter_steps: usize,
) -> TrotterCircuit {
    TrotterSynthesizer::new()
        .with_qubit_count(qubit_count)
        .with_evolution_time(evolution_time)
        .with_trotter_steps(trotter_steps)
        .synthesize(decomposition)
}

/// QASM-flavoured sketch for the degraded path, shaped like the real
/// rendering but with a representative entangler ladder in place of the
/// actual term sequence.
fn mock_sketch(qubit_count: u32, num_terms: usize, trotter_steps: usize) -> String {
    let mut text = String::new();
    text.push_str("OPENQASM 2.0;\n");
    text.push_str("include \"qelib1.inc\";\n");
    if qubit_count > 0 {
        text.push_str(&format!("qreg q[{qubit_count}];\n"));
        text.push_str(&format!("creg c[{qubit_count}];\n"));
    }
    text.push_str(&format!(
        "// mock trotter evolution: {trotter_steps} steps over {num_terms} terms\n"
    ));

    for q in 0..qubit_count {
        text.push_str(&format!("h q[{q}];\n"));
    }

    for step in 0..trotter_steps.min(MOCK_SKETCH_STEPS) {
        text.push_str(&format!("// step {}\n", step + 1));
        for q in 0..qubit_count.saturating_sub(1) {
            text.push_str(&format!("cx q[{q}],q[{}];\n", q + 1));
            text.push_str(&format!("rz(0.1) q[{}];\n", q + 1));
            text.push_str(&format!("cx q[{q}],q[{}];\n", q + 1));
        }
    }
    if trotter_steps > MOCK_SKETCH_STEPS {
        text.push_str(&format!(
            "// ... {} further steps elided\n",
            trotter_steps - MOCK_SKETCH_STEPS
        ));
    }

    for q in 0..qubit_count {
        text.push_str(&format!("measure q[{q}] -> c[{q}];\n"));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Unavailable;
    use crate::pauli::PauliTerm;

    fn two_single_qubit_terms() -> PauliDecomposition {
        PauliDecomposition::new(
            2,
            1e-10,
            vec![PauliTerm::z(2, 0, 5.0), PauliTerm::z(2, 1, -3.0)],
        )
    }

    #[test]
    fn test_defaults_flow_into_result() {
        let result = TrotterSynthesizer::new().synthesize(&two_single_qubit_terms());
        assert!((result.evolution_time - DEFAULT_EVOLUTION_TIME).abs() < 1e-12);
        assert_eq!(result.trotter_steps, DEFAULT_TROTTER_STEPS);
        assert!(!result.degraded);
    }

    #[test]
    fn test_real_path_counts_hadamards_and_rotations() {
        let result = TrotterSynthesizer::new()
            .with_trotter_steps(3)
            .synthesize(&two_single_qubit_terms());
        assert!(result.is_real());
        assert_eq!(result.gate_count, 2 + 3 * 2);
        assert_eq!(result.qubit_count, 2);
        assert!(result.circuit.is_some());
    }

    #[test]
    fn test_unavailable_backend_degrades_with_cause() {
        let result = TrotterSynthesizer::new()
            .with_backend(Unavailable)
            .with_trotter_steps(3)
            .synthesize(&two_single_qubit_terms());
        assert!(result.degraded);
        assert!(result.circuit.is_none());
        assert_eq!(result.gate_count, 2 * 3 * 3 + 2);
        assert_eq!(result.depth, 3 * 2);
        assert!(matches!(
            result.cause,
            Some(SynthesisError::BackendUnavailable(_))
        ));
    }

    #[test]
    fn test_narrow_width_override_degrades_instead_of_panicking() {
        let result = TrotterSynthesizer::new()
            .with_qubit_count(1)
            .synthesize(&two_single_qubit_terms());
        assert!(result.degraded);
        assert_eq!(result.qubit_count, 1);
        assert!(matches!(result.cause, Some(SynthesisError::Circuit(_))));
    }

    #[test]
    fn test_zero_steps_leaves_superposition_and_measurement() {
        let result = TrotterSynthesizer::new()
            .with_trotter_steps(0)
            .synthesize(&two_single_qubit_terms());
        assert!(result.is_real());
        assert_eq!(result.gate_count, 2);
        let circuit = result.circuit.unwrap();
        assert_eq!(circuit.measure_count(), 2);
    }

    #[test]
    fn test_mock_sketch_elides_long_runs() {
        let text = mock_sketch(2, 4, 10);
        assert!(text.contains("// step 3"));
        assert!(!text.contains("// step 4"));
        assert!(text.contains("7 further steps elided"));
        assert!(text.contains("measure q[1] -> c[1];"));
    }
}
