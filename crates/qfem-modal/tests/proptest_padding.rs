//! Property-based tests for power-of-two padding and the qubit ceiling.

use proptest::prelude::*;
use qfem_modal::{CsrMatrix, Hamiltonian, ModalError, OperatorMatrix};

proptest! {
    /// Padding lands on the smallest power of two covering the original
    /// dimension, and the qubit count indexes it exactly.
    #[test]
    fn test_padding_covers_dimension(dim in 1_usize..=4096) {
        let operator = OperatorMatrix::Sparse(CsrMatrix::from_triplets(dim, &[]));
        let hamiltonian = Hamiltonian::from_hermitian(operator, 20).unwrap();

        let padded = hamiltonian.padded_dimension();
        prop_assert!(padded >= dim);
        prop_assert!(padded.is_power_of_two());
        // Smallest such power: halving it would no longer cover dim.
        prop_assert!(padded < 2 * dim);
        prop_assert_eq!(1_usize << hamiltonian.qubit_count(), padded);
        prop_assert_eq!(hamiltonian.original_dimension(), dim);
    }

    /// Every dimension past 2^max_qubits is rejected, regardless of content.
    #[test]
    fn test_capacity_rejects_oversized_systems(dim in 17_usize..=4096) {
        let operator = OperatorMatrix::Sparse(CsrMatrix::from_triplets(dim, &[]));
        let result = Hamiltonian::from_hermitian(operator, 4);
        prop_assert!(
            matches!(result, Err(ModalError::CapacityExceeded { .. })),
            "expected CapacityExceeded error"
        );
    }
}
