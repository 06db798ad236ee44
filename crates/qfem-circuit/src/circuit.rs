//! High-level circuit builder API.

use crate::error::{CircuitError, CircuitResult};
use crate::gate::StandardGate;
use crate::instruction::Instruction;
use crate::qubit::{ClbitId, QubitId};

/// A quantum circuit.
///
/// Instructions are stored in emission order; depth is maintained
/// incrementally as the maximum over per-wire running levels, where every
/// qubit and every classical bit is one wire.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits (fixed at construction).
    num_qubits: u32,
    /// Instructions in emission order.
    instructions: Vec<Instruction>,
    /// Accumulated global phase (radians).
    global_phase: f64,
    /// Running level per qubit wire.
    qubit_levels: Vec<usize>,
    /// Running level per classical wire; grows with `add_clbit`.
    clbit_levels: Vec<usize>,
}

impl Circuit {
    /// Create a circuit with the given number of qubits and no classical bits.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self::with_size(name, num_qubits, 0)
    }

    /// Create a circuit with a given number of qubits and classical bits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            instructions: vec![],
            global_phase: 0.0,
            qubit_levels: vec![0; num_qubits as usize],
            clbit_levels: vec![0; num_clbits as usize],
        }
    }

    /// Add a single classical bit to the circuit.
    pub fn add_clbit(&mut self) -> ClbitId {
        let id = ClbitId(self.clbit_levels.len() as u32);
        self.clbit_levels.push(0);
        id
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.check_qubit(qubit)?;
        self.push_single(StandardGate::H, qubit);
        Ok(self)
    }

    /// Apply rotation around the X axis.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.check_qubit(qubit)?;
        self.push_single(StandardGate::Rx(theta), qubit);
        Ok(self)
    }

    /// Apply rotation around the Y axis.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.check_qubit(qubit)?;
        self.push_single(StandardGate::Ry(theta), qubit);
        Ok(self)
    }

    /// Apply rotation around the Z axis.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> CircuitResult<&mut Self> {
        self.check_qubit(qubit)?;
        self.push_single(StandardGate::Rz(theta), qubit);
        Ok(self)
    }

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> CircuitResult<&mut Self> {
        self.check_qubit(control)?;
        self.check_qubit(target)?;
        if control == target {
            return Err(CircuitError::DuplicateQubit {
                gate_name: "cx".into(),
                qubit: control,
            });
        }
        let level =
            1 + self.qubit_levels[control.0 as usize].max(self.qubit_levels[target.0 as usize]);
        self.qubit_levels[control.0 as usize] = level;
        self.qubit_levels[target.0 as usize] = level;
        self.instructions
            .push(Instruction::two_qubit_gate(StandardGate::Cx, control, target));
        Ok(self)
    }

    /// Measure a qubit into a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> CircuitResult<&mut Self> {
        self.check_qubit(qubit)?;
        self.check_clbit(clbit)?;
        let level =
            1 + self.qubit_levels[qubit.0 as usize].max(self.clbit_levels[clbit.0 as usize]);
        self.qubit_levels[qubit.0 as usize] = level;
        self.clbit_levels[clbit.0 as usize] = level;
        self.instructions.push(Instruction::measure(qubit, clbit));
        Ok(self)
    }

    /// Measure every qubit into the matching classical bit, extending the
    /// classical register as needed.
    pub fn measure_all(&mut self) -> CircuitResult<&mut Self> {
        while self.clbit_levels.len() < self.num_qubits as usize {
            self.add_clbit();
        }
        for q in 0..self.num_qubits {
            self.measure(QubitId(q), ClbitId(q))?;
        }
        Ok(self)
    }

    /// Accumulate a global phase (radians).
    pub fn add_global_phase(&mut self, phase: f64) -> &mut Self {
        self.global_phase += phase;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.clbit_levels.len()
    }

    /// Total number of instructions, measurements included.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True if no instructions have been emitted.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Number of gate instructions.
    ///
    /// Counting convention: measurements are excluded; only unitary gate
    /// operations count.
    pub fn gate_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Number of measurement instructions.
    pub fn measure_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_measure()).count()
    }

    /// Circuit depth: longest wire-ordered chain of instructions, with
    /// measurements occupying both their qubit and classical wires.
    pub fn depth(&self) -> usize {
        self.qubit_levels
            .iter()
            .chain(self.clbit_levels.iter())
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// The accumulated global phase (radians).
    pub fn global_phase(&self) -> f64 {
        self.global_phase
    }

    /// Instructions in emission order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn check_qubit(&self, qubit: QubitId) -> CircuitResult<()> {
        if qubit.0 >= self.num_qubits {
            return Err(CircuitError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    fn check_clbit(&self, clbit: ClbitId) -> CircuitResult<()> {
        if clbit.0 as usize >= self.clbit_levels.len() {
            return Err(CircuitError::ClbitOutOfRange {
                clbit,
                num_clbits: self.clbit_levels.len() as u32,
            });
        }
        Ok(())
    }

    fn push_single(&mut self, gate: StandardGate, qubit: QubitId) {
        self.qubit_levels[qubit.0 as usize] += 1;
        self.instructions
            .push(Instruction::single_qubit_gate(gate, qubit));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fluent_building() {
        let mut c = Circuit::new("test", 2);
        c.h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .rz(0.5, QubitId(1))
            .unwrap();
        assert_eq!(c.len(), 3);
        assert_eq!(c.gate_count(), 3);
        assert_eq!(c.depth(), 3);
    }

    #[test]
    fn test_parallel_gates_share_depth() {
        let mut c = Circuit::new("parallel", 3);
        for q in 0..3 {
            c.h(QubitId(q)).unwrap();
        }
        // One layer: all Hadamards act on distinct wires.
        assert_eq!(c.depth(), 1);
        assert_eq!(c.gate_count(), 3);
    }

    #[test]
    fn test_measure_all_extends_clbits() {
        let mut c = Circuit::new("meas", 2);
        c.h(QubitId(0)).unwrap();
        c.measure_all().unwrap();
        assert_eq!(c.num_clbits(), 2);
        assert_eq!(c.measure_count(), 2);
        // Measurements are not gates.
        assert_eq!(c.gate_count(), 1);
        // q0: H then measure → level 2; q1: measure only → level 1.
        assert_eq!(c.depth(), 2);
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut c = Circuit::new("oob", 1);
        assert!(matches!(
            c.h(QubitId(3)),
            Err(CircuitError::QubitOutOfRange { .. })
        ));
    }

    #[test]
    fn test_cx_requires_distinct_qubits() {
        let mut c = Circuit::new("dup", 2);
        assert!(matches!(
            c.cx(QubitId(1), QubitId(1)),
            Err(CircuitError::DuplicateQubit { .. })
        ));
    }

    #[test]
    fn test_global_phase_accumulates() {
        let mut c = Circuit::new("phase", 1);
        c.add_global_phase(0.25).add_global_phase(0.5);
        assert!((c.global_phase() - 0.75).abs() < 1e-12);
        assert!(c.is_empty());
    }

    #[test]
    fn test_depth_counts_serial_chain() {
        let mut c = Circuit::new("chain", 2);
        c.h(QubitId(0)).unwrap();
        c.cx(QubitId(0), QubitId(1)).unwrap();
        c.rz(1.0, QubitId(1)).unwrap();
        c.cx(QubitId(0), QubitId(1)).unwrap();
        assert_eq!(c.depth(), 4);
    }
}
