//! Heuristic Pauli decomposition of a padded Hamiltonian.
//!
//! Exact projection onto the tensor Pauli basis costs O(4^q) coefficient
//! integrals, which is pointless for an operator we only ever evolve
//! approximately. This module instead samples the couplings that dominate
//! modal Hamiltonians:
//!
//! - one identity term from the trace,
//! - a Z term per leading diagonal entry,
//! - XX/YY pairs from the leading off-diagonal block.
//!
//! Candidates are assembled in full, sorted by |coefficient| descending with
//! a stable sort, then truncated to `max_terms`, so output order is
//! deterministic even among tied magnitudes. The result is a deliberate
//! approximation of the operator, not an exact expansion.

use qfem_modal::Hamiltonian;
use std::cmp::Ordering;
use tracing::debug;

use crate::pauli::{PauliDecomposition, PauliOp, PauliString, PauliTerm};

/// Default cap on the number of retained terms.
pub const DEFAULT_MAX_TERMS: usize = 1000;
/// Default coefficient floor; callers usually pass something coarser.
pub const DEFAULT_THRESHOLD: f64 = 1e-10;

/// Configurable decomposer.
///
/// Total over its input domain: any Hamiltonian yields a (possibly empty)
/// decomposition, and identical input gives identical output.
#[derive(Debug, Clone)]
pub struct PauliDecomposer {
    max_terms: usize,
    threshold: f64,
}

impl PauliDecomposer {
    pub fn new() -> Self {
        Self {
            max_terms: DEFAULT_MAX_TERMS,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Cap on retained terms after sorting.
    #[must_use]
    pub fn with_max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms;
        self
    }

    /// Coefficient magnitude floor for candidate terms.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Decompose `hamiltonian` into a truncated, magnitude-sorted term sum.
    pub fn decompose(&self, hamiltonian: &Hamiltonian) -> PauliDecomposition {
        let qubit_count = hamiltonian.qubit_count();
        let width = qubit_count as usize;
        let n = hamiltonian.padded_dimension();
        let operator = hamiltonian.operator();
        let mut candidates: Vec<PauliTerm> = Vec::new();

        let identity = hamiltonian.trace() / n as f64;
        if identity.abs() > self.threshold {
            candidates.push(PauliTerm::identity(width, identity));
        }

        for i in 0..width.min(n) {
            if candidates.len() >= self.max_terms {
                break;
            }
            let coefficient = operator.get(i, i).re;
            if coefficient.abs() > self.threshold {
                candidates.push(PauliTerm::z(width, i, coefficient));
            }
        }

        'pairs: for i in 0..width.min(n) {
            for j in (i + 1)..width.min(n) {
                if candidates.len() >= self.max_terms {
                    break 'pairs;
                }
                let entry = operator.get(i, j);
                if entry.re.abs() > self.threshold {
                    candidates.push(PauliTerm::new(
                        PauliString::pair(width, i, j, PauliOp::X),
                        entry.re,
                    ));
                }
                if candidates.len() < self.max_terms && entry.im.abs() > self.threshold {
                    candidates.push(PauliTerm::new(
                        PauliString::pair(width, i, j, PauliOp::Y),
                        entry.im,
                    ));
                }
            }
        }

        // Stable sort: tied magnitudes keep collection order.
        candidates.sort_by(|a, b| {
            b.magnitude()
                .partial_cmp(&a.magnitude())
                .unwrap_or(Ordering::Equal)
        });
        candidates.truncate(self.max_terms);

        debug!(
            terms = candidates.len(),
            qubit_count, "assembled pauli decomposition"
        );
        PauliDecomposition::new(qubit_count, self.threshold, candidates)
    }
}

impl Default for PauliDecomposer {
    fn default() -> Self {
        Self::new()
    }
}

/// Decompose with explicit limits.
pub fn decompose_pauli(
    hamiltonian: &Hamiltonian,
    max_terms: usize,
    threshold: f64,
) -> PauliDecomposition {
    PauliDecomposer::new()
        .with_max_terms(max_terms)
        .with_threshold(threshold)
        .decompose(hamiltonian)
}
