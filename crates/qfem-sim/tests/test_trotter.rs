//! Tests for Trotter circuit synthesis and its degraded fallback.

use qfem_sim::{
    PauliDecomposition, PauliOp, PauliString, PauliTerm, SynthesisError, TrotterSynthesizer,
    Unavailable, synthesize_trotter_circuit,
};

fn two_term_decomposition() -> PauliDecomposition {
    PauliDecomposition::new(
        2,
        1e-10,
        vec![PauliTerm::z(2, 0, 5.0), PauliTerm::z(2, 1, -3.0)],
    )
}

// ---------------------------------------------------------------------------
// Gate counting
// ---------------------------------------------------------------------------

#[test]
fn two_single_qubit_terms_over_three_steps_count_eight_gates() {
    let result = synthesize_trotter_circuit(&two_term_decomposition(), 2, 1.0, 3);

    assert!(!result.degraded);
    assert_eq!(result.qubit_count, 2);
    // 2 initial Hadamards + 3 steps x 2 rotations; measurements excluded.
    assert_eq!(result.gate_count, 8);

    let circuit = result.circuit.expect("real path returns a circuit");
    assert_eq!(circuit.measure_count(), 2);
    // Per wire: h, three rz, measure.
    assert_eq!(result.depth, 5);
}

#[test]
fn counts_never_shrink_as_steps_grow() {
    let decomposition = two_term_decomposition();
    let mut last_gates = 0;
    let mut last_depth = 0;
    for steps in [0, 1, 2, 5, 10] {
        let result = TrotterSynthesizer::new()
            .with_trotter_steps(steps)
            .synthesize(&decomposition);
        assert!(result.gate_count >= last_gates);
        assert!(result.depth >= last_depth);
        last_gates = result.gate_count;
        last_depth = result.depth;
    }
}

#[test]
fn zero_steps_reduce_to_superposition_and_measurement() {
    let result = synthesize_trotter_circuit(&two_term_decomposition(), 2, 1.0, 0);

    assert!(!result.degraded);
    assert_eq!(result.gate_count, 2);
    let circuit = result.circuit.unwrap();
    let gates_are_hadamards = circuit
        .instructions()
        .iter()
        .filter(|i| i.is_gate())
        .all(|i| i.name() == "h");
    assert!(gates_are_hadamards);
    assert_eq!(circuit.measure_count(), 2);
}

#[test]
fn identity_terms_accumulate_global_phase_only() {
    let decomposition = PauliDecomposition::new(2, 1e-10, vec![PauliTerm::identity(2, 0.8)]);
    let result = TrotterSynthesizer::new()
        .with_evolution_time(2.0)
        .with_trotter_steps(4)
        .synthesize(&decomposition);

    assert!(!result.degraded);
    // 4 steps of coefficient * dt = 0.8 * 0.5 each.
    assert!((result.global_phase - 1.6).abs() < 1e-12);
    assert_eq!(result.gate_count, 2);
}

#[test]
fn multi_qubit_term_fans_parity_onto_last_qubit() {
    let term = PauliTerm::new(
        PauliString::from_ops(vec![PauliOp::Z, PauliOp::Z, PauliOp::Z]),
        1.0,
    );
    let decomposition = PauliDecomposition::new(3, 1e-10, vec![term]);
    let result = TrotterSynthesizer::new()
        .with_trotter_steps(1)
        .synthesize(&decomposition);

    assert!(!result.degraded);
    // 3 Hadamards + cx cx rz cx cx.
    assert_eq!(result.gate_count, 8);
    assert!(result.sketch.contains("cx q[0],q[2];"));
    assert!(result.sketch.contains("cx q[1],q[2];"));
}

// ---------------------------------------------------------------------------
// Degraded fallback
// ---------------------------------------------------------------------------

#[test]
fn unavailable_backend_returns_structural_mock() {
    let result = TrotterSynthesizer::new()
        .with_trotter_steps(3)
        .with_backend(Unavailable)
        .synthesize(&two_term_decomposition());

    assert!(result.degraded);
    assert!(result.circuit.is_none());
    assert_eq!(result.qubit_count, 2);
    assert_eq!(result.gate_count, 2 * 3 * 3 + 2);
    assert_eq!(result.depth, 3 * 2);
    assert!(matches!(
        result.cause,
        Some(SynthesisError::BackendUnavailable(ref label)) if label == "unavailable"
    ));
}

#[test]
fn too_narrow_width_degrades_with_circuit_cause() {
    // One wire cannot hold a term on qubit 1; the error is absorbed, not
    // propagated.
    let result = synthesize_trotter_circuit(&two_term_decomposition(), 1, 1.0, 3);

    assert!(result.degraded);
    assert_eq!(result.qubit_count, 1);
    assert_eq!(result.gate_count, 2 * 3 * 3 + 1);
    assert!(matches!(result.cause, Some(SynthesisError::Circuit(_))));
}

#[test]
fn mock_sketch_is_qasm_flavoured() {
    let result = TrotterSynthesizer::new()
        .with_trotter_steps(10)
        .with_backend(Unavailable)
        .synthesize(&two_term_decomposition());

    assert!(result.sketch.starts_with("OPENQASM 2.0;"));
    assert!(result.sketch.contains("qreg q[2];"));
    assert!(result.sketch.contains("// step 3"));
    assert!(result.sketch.contains("further steps elided"));
    assert!(result.sketch.contains("measure q[1] -> c[1];"));
}

#[test]
fn empty_decomposition_still_synthesizes() {
    let empty = PauliDecomposition::new(2, 1e-10, vec![]);
    let result = TrotterSynthesizer::new().synthesize(&empty);

    assert!(!result.degraded);
    // Hadamard layer only; nothing to evolve.
    assert_eq!(result.gate_count, 2);
    assert_eq!(result.global_phase, 0.0);
}

// ---------------------------------------------------------------------------
// Result metadata
// ---------------------------------------------------------------------------

#[test]
fn result_echoes_synthesis_parameters() {
    let result = synthesize_trotter_circuit(&two_term_decomposition(), 2, 0.25, 7);

    assert!(result.is_real());
    assert!((result.evolution_time - 0.25).abs() < 1e-12);
    assert_eq!(result.trotter_steps, 7);
    assert!(result.sketch.contains("rz("));
    assert!(result.cause.is_none());
}
