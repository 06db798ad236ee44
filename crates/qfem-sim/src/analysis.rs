//! Descriptive statistics and classical-cost estimates for decompositions.
//!
//! Everything here is derived arithmetic over an existing
//! [`PauliDecomposition`]; nothing feeds back into the pipeline.

use serde::{Deserialize, Serialize};

use crate::pauli::{PauliDecomposition, PauliOp};

/// Bytes per statevector amplitude (complex double).
const BYTES_PER_AMPLITUDE: f64 = 16.0;

/// Dense classical simulation is called feasible up to this width.
const CLASSICAL_QUBIT_LIMIT: u32 = 30;

/// And up to this much statevector memory.
const CLASSICAL_MEMORY_LIMIT_GIB: f64 = 64.0;

/// Width at which the problem is flagged as quantum-advantage territory.
const ADVANTAGE_QUBITS: u32 = 50;

/// Nominal classical throughput for the time estimate.
const OPS_PER_SECOND: f64 = 1.0e9;

/// Occurrence counts per operator kind over every position of every term.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct OperatorCounts {
    pub i: usize,
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl OperatorCounts {
    fn bump(&mut self, op: PauliOp) {
        match op {
            PauliOp::I => self.i += 1,
            PauliOp::X => self.x += 1,
            PauliOp::Y => self.y += 1,
            PauliOp::Z => self.z += 1,
        }
    }

    /// Total positions counted.
    pub fn total(&self) -> usize {
        self.i + self.x + self.y + self.z
    }
}

/// The same distribution as percentages of all counted positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct OperatorPercentages {
    pub i: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Summary of a decomposition's coefficients and operator mix.
///
/// An empty decomposition yields all-zero statistics rather than an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionStats {
    pub total_terms: usize,
    /// Mean of the signed coefficients.
    pub mean: f64,
    /// Population standard deviation of the signed coefficients.
    pub std_dev: f64,
    /// Largest |coefficient|.
    pub max_magnitude: f64,
    /// Smallest |coefficient|.
    pub min_magnitude: f64,
    pub counts: OperatorCounts,
    pub percentages: OperatorPercentages,
}

/// Compute summary statistics for `decomposition`.
pub fn decomposition_stats(decomposition: &PauliDecomposition) -> DecompositionStats {
    let total_terms = decomposition.len();

    let mut counts = OperatorCounts::default();
    for term in decomposition.terms() {
        for &op in term.operator.ops() {
            counts.bump(op);
        }
    }
    let positions = counts.total();
    let percentages = if positions > 0 {
        let share = |count: usize| count as f64 / positions as f64 * 100.0;
        OperatorPercentages {
            i: share(counts.i),
            x: share(counts.x),
            y: share(counts.y),
            z: share(counts.z),
        }
    } else {
        OperatorPercentages::default()
    };

    if total_terms == 0 {
        return DecompositionStats {
            total_terms,
            mean: 0.0,
            std_dev: 0.0,
            max_magnitude: 0.0,
            min_magnitude: 0.0,
            counts,
            percentages,
        };
    }

    let n = total_terms as f64;
    let mean = decomposition.coefficients().sum::<f64>() / n;
    let variance = decomposition
        .coefficients()
        .map(|c| (c - mean).powi(2))
        .sum::<f64>()
        / n;
    let max_magnitude = decomposition
        .coefficients()
        .map(f64::abs)
        .fold(0.0, f64::max);
    let min_magnitude = decomposition
        .coefficients()
        .map(f64::abs)
        .fold(f64::INFINITY, f64::min);

    DecompositionStats {
        total_terms,
        mean,
        std_dev: variance.sqrt(),
        max_magnitude,
        min_magnitude,
        counts,
        percentages,
    }
}

/// Cost of simulating the decomposed system classically with a dense
/// statevector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassicalCost {
    pub qubit_count: u32,
    /// 2^qubit_count, saturating at `u64::MAX`.
    pub state_space_size: u64,
    /// Dense statevector memory at 16 bytes per amplitude.
    pub memory_gib: f64,
    /// One sweep per term over the statevector.
    pub total_operations: f64,
    /// `total_operations` at a nominal 10^9 op/s.
    pub estimated_seconds: f64,
    /// Within both the width and memory limits of a dense simulation.
    pub feasible_classical: bool,
    /// Wide enough that no classical statevector approach applies.
    pub quantum_advantage: bool,
}

/// Estimate dense classical simulation cost for `decomposition`.
pub fn classical_cost(decomposition: &PauliDecomposition) -> ClassicalCost {
    let qubit_count = decomposition.qubit_count();
    let num_terms = decomposition.len();

    let state_space_size = 1u64.checked_shl(qubit_count).unwrap_or(u64::MAX);
    let states = f64::from(qubit_count).exp2();
    let memory_gib = states * BYTES_PER_AMPLITUDE / f64::from(1u32 << 30);
    let total_operations = states * f64::from(qubit_count) * num_terms as f64;

    ClassicalCost {
        qubit_count,
        state_space_size,
        memory_gib,
        total_operations,
        estimated_seconds: total_operations / OPS_PER_SECOND,
        feasible_classical: qubit_count <= CLASSICAL_QUBIT_LIMIT
            && memory_gib <= CLASSICAL_MEMORY_LIMIT_GIB,
        quantum_advantage: qubit_count >= ADVANTAGE_QUBITS,
    }
}
