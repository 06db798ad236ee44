//! Pauli-term exponentiation.
//!
//! Appends the gates for
//!
//!   exp(-i · coeff · dt · P)
//!
//! where P is one term of the decomposed Hamiltonian. Single-qubit factors
//! rotate about their own axis:
//!
//!   X → Rx(2·coeff·dt),  Y → Ry(2·coeff·dt),  Z → Rz(2·coeff·dt)
//!
//! Multi-qubit strings fan the parity of every active qubit onto the last
//! one with CNOTs, apply Rz(2·coeff·dt) there, and unwind the chain in
//! reverse. No basis-change conjugation is applied around the chain, so X
//! and Y factors in multi-qubit strings are treated as Z. That keeps the
//! gate count at 2·(k-1) CX + 1 Rz per weight-k term and is consistent with
//! the truncated decomposition feeding it, which only ever emits XX and YY
//! pairs whose axes the chain ignores.

use qfem_circuit::{Circuit, QubitId};

use crate::error::SynthesisResult;
use crate::pauli::{PauliOp, PauliTerm};

/// Append the gates for `exp(-i · coeff · dt · P)` to `circuit`.
///
/// An identity string contributes only a global phase of `coeff · dt`.
pub fn append_pauli_rotation(
    circuit: &mut Circuit,
    term: &PauliTerm,
    dt: f64,
) -> SynthesisResult<()> {
    let active: Vec<(usize, PauliOp)> = term.operator.active().collect();
    let theta = 2.0 * term.coefficient * dt;

    match active.as_slice() {
        [] => {
            circuit.add_global_phase(term.coefficient * dt);
        }
        [(qubit, op)] => {
            let q = QubitId(*qubit as u32);
            match op {
                PauliOp::X => {
                    circuit.rx(theta, q)?;
                }
                PauliOp::Y => {
                    circuit.ry(theta, q)?;
                }
                PauliOp::Z => {
                    circuit.rz(theta, q)?;
                }
                // active() never yields identity factors.
                PauliOp::I => {}
            }
        }
        _ => {
            let target = QubitId(active[active.len() - 1].0 as u32);
            for &(qubit, _) in &active[..active.len() - 1] {
                circuit.cx(QubitId(qubit as u32), target)?;
            }
            circuit.rz(theta, target)?;
            for &(qubit, _) in active[..active.len() - 1].iter().rev() {
                circuit.cx(QubitId(qubit as u32), target)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pauli::PauliString;
    use qfem_circuit::StandardGate;

    fn gate_names(circuit: &Circuit) -> Vec<&str> {
        circuit.instructions().iter().map(|i| i.name()).collect()
    }

    #[test]
    fn test_identity_term_becomes_global_phase() {
        let mut circuit = Circuit::new("t", 2);
        let term = PauliTerm::identity(2, 0.5);
        append_pauli_rotation(&mut circuit, &term, 0.2).unwrap();
        assert!(circuit.is_empty());
        assert!((circuit.global_phase() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_single_qubit_axes_map_to_their_rotations() {
        for (op, expected) in [(PauliOp::X, "rx"), (PauliOp::Y, "ry"), (PauliOp::Z, "rz")] {
            let mut circuit = Circuit::new("t", 2);
            let term = PauliTerm::new(PauliString::single(2, 1, op), 3.0);
            append_pauli_rotation(&mut circuit, &term, 0.1).unwrap();
            assert_eq!(gate_names(&circuit), vec![expected]);
        }
    }

    #[test]
    fn test_rotation_angle_is_twice_coeff_dt() {
        let mut circuit = Circuit::new("t", 1);
        let term = PauliTerm::z(1, 0, 0.7);
        append_pauli_rotation(&mut circuit, &term, 0.25).unwrap();
        let gate = circuit.instructions()[0].as_gate().unwrap();
        match gate {
            StandardGate::Rz(theta) => assert!((theta - 2.0 * 0.7 * 0.25).abs() < 1e-12),
            other => panic!("expected rz, got {other:?}"),
        }
    }

    #[test]
    fn test_pair_term_fans_onto_last_active_qubit() {
        let mut circuit = Circuit::new("t", 3);
        let term = PauliTerm::new(PauliString::pair(3, 0, 2, PauliOp::X), 1.0);
        append_pauli_rotation(&mut circuit, &term, 0.5).unwrap();
        assert_eq!(gate_names(&circuit), vec!["cx", "rz", "cx"]);
    }

    #[test]
    fn test_weight_three_chain_unwinds_in_reverse() {
        let mut circuit = Circuit::new("t", 3);
        let ops = vec![PauliOp::Z, PauliOp::Z, PauliOp::Z];
        let term = PauliTerm::new(PauliString::from_ops(ops), 1.0);
        append_pauli_rotation(&mut circuit, &term, 0.5).unwrap();
        assert_eq!(gate_names(&circuit), vec!["cx", "cx", "rz", "cx", "cx"]);
        let controls: Vec<u32> = circuit
            .instructions()
            .iter()
            .filter(|i| i.name() == "cx")
            .map(|i| i.qubits[0].0)
            .collect();
        assert_eq!(controls, vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_out_of_range_qubit_is_rejected() {
        let mut circuit = Circuit::new("t", 1);
        let term = PauliTerm::z(3, 2, 1.0);
        assert!(append_pauli_rotation(&mut circuit, &term, 0.5).is_err());
    }
}
