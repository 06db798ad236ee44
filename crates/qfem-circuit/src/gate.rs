//! Quantum gate types.
//!
//! The gate set is the one evolution synthesis actually emits: Hadamard for
//! state preparation, axis rotations for single-Pauli exponentials, and CX
//! for parity chains. Angles are always fully bound `f64` radians.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Hadamard gate.
    H,
    /// Rotation around the X axis by the given angle (radians).
    Rx(f64),
    /// Rotation around the Y axis by the given angle (radians).
    Ry(f64),
    /// Rotation around the Z axis by the given angle (radians).
    Rz(f64),
    /// Controlled-X (CNOT) gate.
    Cx,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::Cx => "cx",
        }
    }

    /// Number of qubits this gate acts on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::H | StandardGate::Rx(_) | StandardGate::Ry(_) | StandardGate::Rz(_) => 1,
            StandardGate::Cx => 2,
        }
    }

    /// The rotation angle, for parameterised gates.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(theta) | StandardGate::Ry(theta) | StandardGate::Rz(theta) => {
                Some(*theta)
            }
            StandardGate::H | StandardGate::Cx => None,
        }
    }

    /// True for single-qubit rotation gates.
    pub fn is_rotation(&self) -> bool {
        matches!(
            self,
            StandardGate::Rx(_) | StandardGate::Ry(_) | StandardGate::Rz(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_names() {
        assert_eq!(StandardGate::H.name(), "h");
        assert_eq!(StandardGate::Rx(0.5).name(), "rx");
        assert_eq!(StandardGate::Cx.name(), "cx");
    }

    #[test]
    fn test_gate_widths() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::Rz(1.0).num_qubits(), 1);
        assert_eq!(StandardGate::Cx.num_qubits(), 2);
    }

    #[test]
    fn test_angle_accessor() {
        assert_eq!(StandardGate::Ry(0.25).angle(), Some(0.25));
        assert_eq!(StandardGate::H.angle(), None);
        assert!(StandardGate::Rz(1.0).is_rotation());
        assert!(!StandardGate::Cx.is_rotation());
    }
}
