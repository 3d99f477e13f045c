//! Statevector sampler implementation.

use nalgebra::DMatrix;
use num_complex::Complex64;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::{debug, instrument};

use ladder_hal::{Distribution, HalError, HalResult, SampleConfig, Sampler};
use ladder_ir::{Circuit, QubitId};

use crate::statevector::Statevector;

/// Default width limit.
pub const DEFAULT_MAX_QUBITS: usize = 20;

/// Local statevector sampler.
///
/// Simulates the circuit once and either reports the exact outcome
/// probabilities or draws shots from them. Limited by memory to roughly
/// twenty qubits.
#[derive(Debug, Clone)]
pub struct StatevectorSimulator {
    /// Name reported through [`Sampler::name`].
    name: String,
    /// Maximum number of qubits supported.
    max_qubits: usize,
}

impl StatevectorSimulator {
    /// Create a new simulator with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: usize) -> Self {
        Self {
            name: "statevector".into(),
            max_qubits,
        }
    }

    fn check_size(&self, circuit: &Circuit) -> HalResult<()> {
        if circuit.num_qubits() > self.max_qubits {
            return Err(HalError::CircuitTooLarge {
                num_qubits: circuit.num_qubits(),
                max_qubits: self.max_qubits,
            });
        }
        Ok(())
    }

    /// Run `circuit` from `|0...0⟩` and return the final state.
    pub fn statevector(&self, circuit: &Circuit) -> HalResult<Statevector> {
        self.check_size(circuit)?;
        let mut sv = Statevector::new(circuit.num_qubits());
        sv.run(circuit);
        Ok(sv)
    }

    /// The unitary `circuit` implements on `qubits`, with every other wire
    /// (ancillas included) starting and ending in `|0⟩`.
    ///
    /// Column `k` is the image of the basis state whose bit `j` is the
    /// value of `qubits[j]`. Amplitude left on the other wires is dropped,
    /// so a circuit that fails to uncompute its ancillas yields a
    /// non-unitary matrix.
    pub fn unitary(&self, circuit: &Circuit, qubits: &[QubitId]) -> HalResult<DMatrix<Complex64>> {
        self.check_size(circuit)?;
        let n = circuit.num_qubits();
        for q in qubits {
            if q.index() >= n {
                return Err(HalError::InvalidCircuit(format!(
                    "qubit {q} is not part of the {n}-qubit circuit"
                )));
            }
        }

        let dim = 1usize << qubits.len();
        let embed = |k: usize| -> usize {
            qubits
                .iter()
                .enumerate()
                .filter(|(j, _)| (k >> j) & 1 == 1)
                .fold(0, |acc, (_, q)| acc | (1 << q.index()))
        };

        let mut unitary = DMatrix::zeros(dim, dim);
        for col in 0..dim {
            let mut sv = Statevector::basis_state(n, embed(col));
            sv.run(circuit);
            for row in 0..dim {
                unitary[(row, col)] = sv.amplitudes()[embed(row)];
            }
        }
        Ok(unitary)
    }
}

impl Default for StatevectorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for StatevectorSimulator {
    fn name(&self) -> &str {
        &self.name
    }

    fn max_qubits(&self) -> usize {
        self.max_qubits
    }

    #[instrument(skip(self, circuit), fields(num_qubits = circuit.num_qubits()))]
    fn sample(&self, circuit: &Circuit, config: &SampleConfig) -> HalResult<Distribution> {
        config.validate()?;
        let start = Instant::now();

        let sv = self.statevector(circuit)?;
        let num_qubits = circuit.num_qubits();

        let dist = match config.shots {
            None => Distribution::from_probabilities(
                num_qubits,
                sv.probabilities()
                    .into_iter()
                    .enumerate()
                    .map(|(i, p)| (i as u64, p)),
            ),
            Some(shots) => {
                let mut rng = config
                    .seed
                    .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
                let counts = sv.sample_counts(shots, &mut rng);
                Distribution::from_counts(num_qubits, &counts)
            }
        };

        debug!(
            instructions = circuit.instructions().len(),
            outcomes = dist.len(),
            elapsed = ?start.elapsed(),
            "sampling completed"
        );
        Ok(dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_ir::IrError;

    #[test]
    fn test_simulator_ghz_exact() {
        let sim = StatevectorSimulator::new();
        let circuit = Circuit::ghz(3).unwrap();
        let dist = sim.sample(&circuit, &SampleConfig::exact()).unwrap();

        assert_eq!(dist.len(), 2);
        assert!((dist.probability(0b000) - 0.5).abs() < 1e-12);
        assert!((dist.probability(0b111) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_simulator_seeded_shots() {
        let sim = StatevectorSimulator::new();
        let circuit = Circuit::ghz(2).unwrap();
        let config = SampleConfig::with_shots(1000).with_seed(42);

        let a = sim.sample(&circuit, &config).unwrap();
        let b = sim.sample(&circuit, &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.shots(), Some(1000));
        assert!((a.probability(0b00) + a.probability(0b11) - 1.0).abs() < 1e-12);
        assert!((a.probability(0b00) - 0.5).abs() < 0.1);
    }

    #[test]
    fn test_simulator_too_many_qubits() {
        let sim = StatevectorSimulator::with_max_qubits(5);
        let circuit = Circuit::with_size("test", 10);
        let result = sim.sample(&circuit, &SampleConfig::exact());
        assert!(matches!(
            result,
            Err(HalError::CircuitTooLarge {
                num_qubits: 10,
                max_qubits: 5
            })
        ));
    }

    #[test]
    fn test_simulator_rejects_zero_shots() {
        let sim = StatevectorSimulator::new();
        let circuit = Circuit::with_size("test", 1);
        let config = SampleConfig {
            shots: Some(0),
            seed: None,
        };
        assert!(matches!(
            sim.sample(&circuit, &config),
            Err(HalError::ZeroShots)
        ));
    }

    #[test]
    fn test_unitary_of_cx() {
        let sim = StatevectorSimulator::new();
        let mut circuit = Circuit::with_size("cx", 2);
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        let u = sim.unitary(&circuit, &[QubitId(0), QubitId(1)]).unwrap();

        // |01⟩ (q0 = 1) maps to |11⟩.
        assert!((u[(0b11, 0b01)] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert!((u[(0b00, 0b00)] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert!(u[(0b01, 0b01)].norm() < 1e-12);
    }

    #[test]
    fn test_unitary_hides_clean_ancilla() {
        let sim = StatevectorSimulator::new();
        let mut circuit = Circuit::with_size("anc", 1);
        circuit
            .with_ancilla(|c, anc| {
                c.conjugate(
                    |c| {
                        c.cx(QubitId(0), anc)?;
                        Ok::<_, IrError>(())
                    },
                    |c| {
                        c.control(anc, |c| {
                            c.z(QubitId(0))?;
                            Ok(())
                        })
                    },
                )
            })
            .unwrap();

        let u = sim.unitary(&circuit, &[QubitId(0)]).unwrap();
        assert!((u[(0, 0)] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        assert!((u[(1, 1)] - Complex64::new(-1.0, 0.0)).norm() < 1e-12);
    }
}
