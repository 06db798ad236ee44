//! Pauli term vocabulary for decomposed Hamiltonians.
//!
//! A decomposition approximates the Hamiltonian as a sum of weighted Pauli
//! strings:
//!
//!   H ≈ Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators,
//! spelled as a dense string over {I, X, Y, Z} with position i acting on
//! qubit i, and c_k ∈ ℝ.
//!
//! # Example
//!
//! ```rust
//! use qfem_sim::pauli::{PauliOp, PauliString, PauliTerm};
//!
//! let term = PauliTerm::new(PauliString::single(2, 0, PauliOp::Z), 5.0);
//! assert_eq!(term.operator.to_string(), "ZI");
//! assert_eq!(term.operator.weight(), 1);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity; contributes only a global phase under evolution.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// One-letter spelling used in operator strings.
    #[inline]
    pub fn symbol(self) -> char {
        match self {
            Self::I => 'I',
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }

    /// Inverse of [`symbol`](Self::symbol).
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'I' => Some(Self::I),
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            _ => None,
        }
    }
}

/// Parse failure for an operator string.
#[derive(Debug, Clone, Error)]
#[error("invalid pauli symbol '{0}'")]
pub struct InvalidPauliSymbol(pub char);

/// A dense tensor product of Pauli operators.
///
/// Position i acts on qubit i; the length always equals the qubit count of
/// the decomposition the string belongs to. Serializes as its string
/// spelling (`"ZI"` is Z on qubit 0 of a 2-qubit register).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PauliString {
    ops: Vec<PauliOp>,
}

impl PauliString {
    /// All-identity string over `len` qubits.
    pub fn identity(len: usize) -> Self {
        Self {
            ops: vec![PauliOp::I; len],
        }
    }

    /// Build from explicit per-qubit operators.
    pub fn from_ops(ops: Vec<PauliOp>) -> Self {
        Self { ops }
    }

    /// Identity everywhere except `op` at `position`.
    pub fn single(len: usize, position: usize, op: PauliOp) -> Self {
        assert!(position < len, "position {position} outside {len} qubits");
        let mut ops = vec![PauliOp::I; len];
        ops[position] = op;
        Self { ops }
    }

    /// Identity everywhere except `op` at both `first` and `second`.
    pub fn pair(len: usize, first: usize, second: usize, op: PauliOp) -> Self {
        assert!(first < len && second < len && first != second);
        let mut ops = vec![PauliOp::I; len];
        ops[first] = op;
        ops[second] = op;
        Self { ops }
    }

    /// Number of qubit positions.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Per-qubit operators, position i = qubit i.
    pub fn ops(&self) -> &[PauliOp] {
        &self.ops
    }

    /// True when every position is the identity.
    pub fn is_identity(&self) -> bool {
        self.ops.iter().all(|op| *op == PauliOp::I)
    }

    /// The non-identity (qubit, op) pairs in qubit order.
    pub fn active(&self) -> impl Iterator<Item = (usize, PauliOp)> + '_ {
        self.ops
            .iter()
            .enumerate()
            .filter(|(_, op)| **op != PauliOp::I)
            .map(|(qubit, op)| (qubit, *op))
    }

    /// Number of non-identity positions.
    pub fn weight(&self) -> usize {
        self.active().count()
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in &self.ops {
            write!(f, "{}", op.symbol())?;
        }
        Ok(())
    }
}

impl From<PauliString> for String {
    fn from(string: PauliString) -> Self {
        string.to_string()
    }
}

impl TryFrom<String> for PauliString {
    type Error = InvalidPauliSymbol;

    fn try_from(spelling: String) -> Result<Self, Self::Error> {
        let ops = spelling
            .chars()
            .map(|c| PauliOp::from_symbol(c).ok_or(InvalidPauliSymbol(c)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { ops })
    }
}

/// A single weighted term: `coefficient · operator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    /// Dense operator string.
    pub operator: PauliString,
    /// Real coefficient.
    pub coefficient: f64,
}

impl PauliTerm {
    /// Create a new term.
    pub fn new(operator: PauliString, coefficient: f64) -> Self {
        Self {
            operator,
            coefficient,
        }
    }

    /// Shorthand: identity over `len` qubits.
    pub fn identity(len: usize, coefficient: f64) -> Self {
        Self::new(PauliString::identity(len), coefficient)
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(len: usize, qubit: usize, coefficient: f64) -> Self {
        Self::new(PauliString::single(len, qubit, PauliOp::Z), coefficient)
    }

    /// Shorthand: single-qubit X term.
    pub fn x(len: usize, qubit: usize, coefficient: f64) -> Self {
        Self::new(PauliString::single(len, qubit, PauliOp::X), coefficient)
    }

    /// |coefficient|, the sort key for truncation.
    pub fn magnitude(&self) -> f64 {
        self.coefficient.abs()
    }
}

/// An ordered, truncated Pauli-sum approximation of a Hamiltonian.
///
/// Terms are sorted by descending |coefficient|; every operator string has
/// exactly `qubit_count` positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliDecomposition {
    qubit_count: u32,
    threshold: f64,
    terms: Vec<PauliTerm>,
}

impl PauliDecomposition {
    /// Assemble from parts. [`decompose_pauli`] is the usual constructor;
    /// this exists for tests and hand-built term sets.
    ///
    /// [`decompose_pauli`]: crate::decompose_pauli
    pub fn new(qubit_count: u32, threshold: f64, terms: Vec<PauliTerm>) -> Self {
        Self {
            qubit_count,
            threshold,
            terms,
        }
    }

    /// Width of the register the terms act on.
    pub fn qubit_count(&self) -> u32 {
        self.qubit_count
    }

    /// Coefficient floor the decomposition was filtered with.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// All terms, descending |coefficient|.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The raw coefficients in term order.
    pub fn coefficients(&self) -> impl Iterator<Item = f64> + '_ {
        self.terms.iter().map(|t| t.coefficient)
    }
}
