//! Text rendering of circuits.
//!
//! Produces a deterministic QASM-flavoured listing for logs, demo output and
//! degraded-mode sketches. This is a human-readable rendering only; it is not
//! a serialization format and there is no reader for it.

use crate::circuit::Circuit;
use crate::gate::StandardGate;
use crate::instruction::InstructionKind;

/// Render a circuit as QASM-flavoured text.
pub fn sketch(circuit: &Circuit) -> String {
    let mut renderer = Renderer::new();
    renderer.render(circuit)
}

struct Renderer {
    output: String,
}

impl Renderer {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn render(&mut self, circuit: &Circuit) -> String {
        self.writeln("OPENQASM 2.0;");
        self.writeln("include \"qelib1.inc\";");

        let num_qubits = circuit.num_qubits();
        if num_qubits > 0 {
            self.writeln(&format!("qreg q[{num_qubits}];"));
        }
        let num_clbits = circuit.num_clbits();
        if num_clbits > 0 {
            self.writeln(&format!("creg c[{num_clbits}];"));
        }

        self.writeln(&format!(
            "// {}: {} gates, depth {}",
            circuit.name(),
            circuit.gate_count(),
            circuit.depth()
        ));
        if circuit.global_phase() != 0.0 {
            self.writeln(&format!("// global phase: {:.6}", circuit.global_phase()));
        }

        for instruction in circuit.instructions() {
            match &instruction.kind {
                InstructionKind::Gate(gate) => {
                    let q = instruction.qubits[0].0;
                    match gate {
                        StandardGate::H => self.writeln(&format!("h q[{q}];")),
                        StandardGate::Rx(theta) => {
                            self.writeln(&format!("rx({theta:.6}) q[{q}];"));
                        }
                        StandardGate::Ry(theta) => {
                            self.writeln(&format!("ry({theta:.6}) q[{q}];"));
                        }
                        StandardGate::Rz(theta) => {
                            self.writeln(&format!("rz({theta:.6}) q[{q}];"));
                        }
                        StandardGate::Cx => {
                            let t = instruction.qubits[1].0;
                            self.writeln(&format!("cx q[{q}],q[{t}];"));
                        }
                    }
                }
                InstructionKind::Measure => {
                    let q = instruction.qubits[0].0;
                    let c = instruction.clbits[0].0;
                    self.writeln(&format!("measure q[{q}] -> c[{c}];"));
                }
            }
        }

        std::mem::take(&mut self.output)
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}
