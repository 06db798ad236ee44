//! Illustrative energy and amplitude series.
//!
//! Nothing in this module evolves a statevector. The curves are synthetic:
//! a damped oscillation whose amplitude is set by the spread of the
//! decomposition's coefficients, and a random amplitude profile over a
//! handful of basis states. They exist so a caller can plot *something*
//! shaped like an evolution without a simulator backend, and must never be
//! read as physics.
//!
//! The randomized amplitude profile takes the generator as an argument.
//! Seeding it makes the output reproducible:
//! ```rust,ignore
//! use rand::SeedableRng;
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let (samples, amplitudes) =
//!     estimate_evolution_with_rng(&decomposition, 1.0, 10, 3, &mut rng);
//! ```

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::f64::consts::PI;
use tracing::debug;

use crate::pauli::PauliDecomposition;

/// Ceiling on the number of energy samples per series.
const MAX_SAMPLES: usize = 100;

/// Energy samples per Trotter step.
const SAMPLES_PER_STEP: usize = 10;

/// Ceiling on the number of basis states drawn for the amplitude profile.
const MAX_DRAWN_STATES: usize = 16;

/// Amplitude entries kept after sorting by probability.
const MAX_AMPLITUDES: usize = 10;

/// One point of the illustrative energy series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionSample {
    /// Sample time in [0, sim_time].
    pub time: f64,
    /// Damped-oscillation stand-in for total energy.
    pub total_energy: f64,
    /// Non-negative kinetic component.
    pub kinetic_energy: f64,
    /// Non-negative potential component.
    pub potential_energy: f64,
}

/// One basis state of the illustrative final-state profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmplitudeEstimate {
    /// Basis state as a bit-string, `qubit_count` characters wide.
    pub basis_state: String,
    /// Real part of the synthetic amplitude.
    pub amplitude_re: f64,
    /// Imaginary part of the synthetic amplitude.
    pub amplitude_im: f64,
    /// Probability mass; the returned set sums to 1.
    pub probability: f64,
}

/// Produce the illustrative series with a caller-supplied generator.
///
/// The energy series is deterministic in its inputs; only the amplitude
/// profile draws randomness. Returns empty series for degenerate inputs
/// (no samples requested, non-positive sim_time) rather than failing.
pub fn estimate_evolution_with_rng(
    decomposition: &PauliDecomposition,
    sim_time: f64,
    trotter_steps: usize,
    qubit_count: u32,
    rng: &mut impl Rng,
) -> (Vec<EvolutionSample>, Vec<AmplitudeEstimate>) {
    let samples = energy_series(decomposition, sim_time, trotter_steps);
    let amplitudes = amplitude_profile(qubit_count, rng);
    debug!(
        samples = samples.len(),
        amplitudes = amplitudes.len(),
        "estimated illustrative evolution"
    );
    (samples, amplitudes)
}

/// Produce the illustrative series with the thread-local generator.
pub fn estimate_evolution(
    decomposition: &PauliDecomposition,
    sim_time: f64,
    trotter_steps: usize,
    qubit_count: u32,
) -> (Vec<EvolutionSample>, Vec<AmplitudeEstimate>) {
    estimate_evolution_with_rng(
        decomposition,
        sim_time,
        trotter_steps,
        qubit_count,
        &mut rand::thread_rng(),
    )
}

fn energy_series(
    decomposition: &PauliDecomposition,
    sim_time: f64,
    trotter_steps: usize,
) -> Vec<EvolutionSample> {
    let count = MAX_SAMPLES.min(trotter_steps * SAMPLES_PER_STEP);
    if count == 0 || sim_time <= 0.0 {
        return Vec::new();
    }

    let scale = coefficient_spread(decomposition);
    let mut samples = Vec::with_capacity(count);
    for i in 0..count {
        // Evenly spaced with both endpoints included.
        let time = if count == 1 {
            0.0
        } else {
            sim_time * i as f64 / (count - 1) as f64
        };
        let angle = 2.0 * PI * time / sim_time * 3.0;
        let total_energy = scale * (-0.01 * time).exp() * angle.cos();
        let kinetic_energy = (scale * angle.sin() * 0.5).abs();
        let potential_energy = (total_energy - kinetic_energy).abs();
        samples.push(EvolutionSample {
            time,
            total_energy,
            kinetic_energy,
            potential_energy,
        });
    }
    samples
}

/// Population standard deviation of the coefficients, 1.0 when there are
/// none.
fn coefficient_spread(decomposition: &PauliDecomposition) -> f64 {
    if decomposition.is_empty() {
        return 1.0;
    }
    let n = decomposition.len() as f64;
    let mean = decomposition.coefficients().sum::<f64>() / n;
    let variance = decomposition
        .coefficients()
        .map(|c| (c - mean).powi(2))
        .sum::<f64>()
        / n;
    variance.sqrt()
}

fn amplitude_profile(qubit_count: u32, rng: &mut impl Rng) -> Vec<AmplitudeEstimate> {
    let num_states = if qubit_count >= 4 {
        MAX_DRAWN_STATES
    } else {
        1usize << qubit_count
    };

    // Exponential mass via inverse transform, normalized over every drawn
    // state before truncation.
    let mut mass: Vec<f64> = (0..num_states)
        .map(|_| -(1.0 - rng.gen_range(0.0..1.0f64)).ln())
        .collect();
    let total: f64 = mass.iter().sum();
    if total > 0.0 {
        for m in &mut mass {
            *m /= total;
        }
    } else {
        mass.fill(1.0 / num_states as f64);
    }

    let width = qubit_count as usize;
    let mut amplitudes: Vec<AmplitudeEstimate> = mass
        .into_iter()
        .enumerate()
        .map(|(state, probability)| {
            let phase = rng.gen_range(0.0..2.0 * PI);
            let magnitude = probability.sqrt();
            AmplitudeEstimate {
                basis_state: format!("{state:0width$b}"),
                amplitude_re: magnitude * phase.cos(),
                amplitude_im: magnitude * phase.sin(),
                probability,
            }
        })
        .collect();

    amplitudes.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });
    amplitudes.truncate(MAX_AMPLITUDES);

    // Rescale the kept states so the reported distribution still sums to 1.
    let kept: f64 = amplitudes.iter().map(|a| a.probability).sum();
    if kept > 0.0 {
        let amp_scale = kept.sqrt().recip();
        for a in &mut amplitudes {
            a.probability /= kept;
            a.amplitude_re *= amp_scale;
            a.amplitude_im *= amp_scale;
        }
    }
    amplitudes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pauli::PauliTerm;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_decomposition() -> PauliDecomposition {
        PauliDecomposition::new(
            2,
            1e-10,
            vec![PauliTerm::z(2, 0, 4.0), PauliTerm::z(2, 1, -2.0)],
        )
    }

    #[test]
    fn test_sample_count_is_capped() {
        let mut rng = StdRng::seed_from_u64(1);
        let (samples, _) =
            estimate_evolution_with_rng(&sample_decomposition(), 2.0, 50, 2, &mut rng);
        assert_eq!(samples.len(), MAX_SAMPLES);
    }

    #[test]
    fn test_series_starts_at_zero_and_never_goes_back() {
        let mut rng = StdRng::seed_from_u64(1);
        let (samples, _) =
            estimate_evolution_with_rng(&sample_decomposition(), 3.0, 4, 2, &mut rng);
        assert_eq!(samples.len(), 40);
        assert_eq!(samples[0].time, 0.0);
        assert!((samples.last().unwrap().time - 3.0).abs() < 1e-12);
        for pair in samples.windows(2) {
            assert!(pair[1].time > pair[0].time);
        }
    }

    #[test]
    fn test_zero_steps_gives_empty_series() {
        let mut rng = StdRng::seed_from_u64(1);
        let (samples, _) =
            estimate_evolution_with_rng(&sample_decomposition(), 1.0, 0, 2, &mut rng);
        assert!(samples.is_empty());
    }

    #[test]
    fn test_nonpositive_sim_time_gives_empty_series() {
        let mut rng = StdRng::seed_from_u64(1);
        let (samples, _) =
            estimate_evolution_with_rng(&sample_decomposition(), 0.0, 10, 2, &mut rng);
        assert!(samples.is_empty());
    }

    #[test]
    fn test_empty_decomposition_uses_unit_scale() {
        let empty = PauliDecomposition::new(2, 1e-10, vec![]);
        let mut rng = StdRng::seed_from_u64(1);
        let (samples, _) = estimate_evolution_with_rng(&empty, 1.0, 2, 2, &mut rng);
        // At t = 0: energy = 1·exp(0)·cos(0) = 1, kinetic = 0, potential = 1.
        assert!((samples[0].total_energy - 1.0).abs() < 1e-12);
        assert_eq!(samples[0].kinetic_energy, 0.0);
        assert!((samples[0].potential_energy - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_energy_components_are_consistent() {
        let mut rng = StdRng::seed_from_u64(1);
        let (samples, _) =
            estimate_evolution_with_rng(&sample_decomposition(), 2.0, 5, 2, &mut rng);
        for s in &samples {
            assert!(s.kinetic_energy >= 0.0);
            assert!(s.potential_energy >= 0.0);
            let expected = (s.total_energy - s.kinetic_energy).abs();
            assert!((s.potential_energy - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_probabilities_sum_to_one_after_truncation() {
        let mut rng = StdRng::seed_from_u64(7);
        // 5 qubits → 16 drawn states → 10 kept, renormalized.
        let (_, amplitudes) =
            estimate_evolution_with_rng(&sample_decomposition(), 1.0, 10, 5, &mut rng);
        assert_eq!(amplitudes.len(), MAX_AMPLITUDES);
        let total: f64 = amplitudes.iter().map(|a| a.probability).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_amplitudes_sorted_descending_and_consistent() {
        let mut rng = StdRng::seed_from_u64(7);
        let (_, amplitudes) =
            estimate_evolution_with_rng(&sample_decomposition(), 1.0, 10, 3, &mut rng);
        for pair in amplitudes.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
        for a in &amplitudes {
            let norm = a.amplitude_re.powi(2) + a.amplitude_im.powi(2);
            assert!((norm - a.probability).abs() < 1e-9);
        }
    }

    #[test]
    fn test_basis_states_have_qubit_count_width() {
        let mut rng = StdRng::seed_from_u64(7);
        let (_, amplitudes) =
            estimate_evolution_with_rng(&sample_decomposition(), 1.0, 10, 3, &mut rng);
        assert_eq!(amplitudes.len(), 8);
        for a in &amplitudes {
            assert_eq!(a.basis_state.len(), 3);
            assert!(a.basis_state.chars().all(|c| c == '0' || c == '1'));
        }
    }

    #[test]
    fn test_seeded_generator_reproduces_profile() {
        let (_, first) = estimate_evolution_with_rng(
            &sample_decomposition(),
            1.0,
            10,
            4,
            &mut StdRng::seed_from_u64(42),
        );
        let (_, second) = estimate_evolution_with_rng(
            &sample_decomposition(),
            1.0,
            10,
            4,
            &mut StdRng::seed_from_u64(42),
        );
        assert_eq!(first, second);
    }
}
