//! Property-based tests for decomposition invariants.

use nalgebra::DMatrix;
use num_complex::Complex64;
use proptest::collection::vec;
use proptest::prelude::*;
use qfem_modal::{Hamiltonian, OperatorMatrix};
use qfem_sim::decompose_pauli;

fn hamiltonian_from_diag(entries: &[f64]) -> Hamiltonian {
    let n = entries.len();
    let mut m = DMatrix::from_element(n, n, Complex64::new(0.0, 0.0));
    for (i, &v) in entries.iter().enumerate() {
        m[(i, i)] = Complex64::new(v, 0.0);
    }
    Hamiltonian::from_hermitian(OperatorMatrix::Dense(m), 20).unwrap()
}

proptest! {
    /// Every decomposition respects the cap, the threshold, the width
    /// invariant, and descending magnitude order.
    #[test]
    fn test_terms_respect_cap_threshold_and_order(
        entries in vec(-10.0_f64..10.0, 1..20),
        max_terms in 1_usize..12,
    ) {
        let h = hamiltonian_from_diag(&entries);
        let decomposition = decompose_pauli(&h, max_terms, 1e-10);

        prop_assert!(decomposition.len() <= max_terms);
        let width = decomposition.qubit_count() as usize;
        for term in decomposition.terms() {
            prop_assert_eq!(term.operator.len(), width);
            prop_assert!(term.magnitude() > 1e-10);
        }
        for pair in decomposition.terms().windows(2) {
            prop_assert!(pair[0].magnitude() >= pair[1].magnitude());
        }
    }

    /// The scan is pure: the same operator always yields the same terms.
    #[test]
    fn test_decomposition_is_deterministic(
        entries in vec(-10.0_f64..10.0, 1..20),
    ) {
        let h = hamiltonian_from_diag(&entries);
        prop_assert_eq!(
            decompose_pauli(&h, 100, 1e-10),
            decompose_pauli(&h, 100, 1e-10)
        );
    }

    /// A single coupling entry lands its real part on XX and its imaginary
    /// part on YY, each filtered independently against the threshold.
    #[test]
    fn test_coupling_parts_map_to_xx_and_yy(
        re in -5.0_f64..5.0,
        im in -5.0_f64..5.0,
    ) {
        let mut m = DMatrix::from_element(4, 4, Complex64::new(0.0, 0.0));
        m[(0, 1)] = Complex64::new(re, im);
        m[(1, 0)] = Complex64::new(re, -im);
        let h = Hamiltonian::from_hermitian(OperatorMatrix::Dense(m), 20).unwrap();

        let decomposition = decompose_pauli(&h, 100, 1e-10);
        for term in decomposition.terms() {
            match term.operator.to_string().as_str() {
                "XX" => prop_assert_eq!(term.coefficient, re),
                "YY" => prop_assert_eq!(term.coefficient, im),
                other => prop_assert!(false, "unexpected operator {}", other),
            }
        }
        let expected =
            usize::from(re.abs() > 1e-10) + usize::from(im.abs() > 1e-10);
        prop_assert_eq!(decomposition.len(), expected);
    }
}
