//! QDrift stochastic product-formula synthesis.
//!
//! QDrift (Campbell 2019) approximates `exp(i H t)` by randomly sampling
//! Hamiltonian entries with probability proportional to their coefficients,
//! rather than applying all entries uniformly.
//!
//! Algorithm:
//!   λ = Σ |c_k|                 (non-identity entries)
//!   τ = λ t / N                 (effective time per sample)
//!   For j = 1..N:
//!     Draw index k with p_k = |c_k| / λ
//!     Apply exp(i · τ · (c_k/|c_k| · T_k + h.c.))
//!
//! Identity entries are applied once, exactly, as a global phase.
//!
//! Error (in diamond norm): O(λ² t² / N).
//!
//! # Reference
//! E. Campbell, "Random Compiler for Fast Hamiltonian Simulation",
//! PRL 123, 070503 (2019). <https://doi.org/10.1103/PhysRevLett.123.070503>

use ladder_ir::{Circuit, QubitId};
use num_complex::Complex64;
use rand::Rng;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::hamiltonian::Hamiltonian;
use crate::operators::{PauliTerm, Term};
use crate::synthesis::append_exp_term;

/// QDrift stochastic time-evolution synthesiser.
#[derive(Debug, Clone)]
pub struct QDriftEvolution<T: Term = PauliTerm> {
    hamiltonian: Hamiltonian<T>,
    /// Total evolution time t.
    t: f64,
    /// Number of random samples N.
    n_samples: usize,
    /// Override circuit width; None → inferred from Hamiltonian.
    n_qubits: Option<u32>,
}

impl<T: Term> QDriftEvolution<T> {
    /// Construct a new QDrift synthesiser.
    ///
    /// # Arguments
    /// * `hamiltonian`: the Hamiltonian H = Σ (c_k T_k + h.c.)
    /// * `t`: total evolution time
    /// * `n_samples`: number of random channel samples N (higher is more accurate)
    pub fn new(hamiltonian: Hamiltonian<T>, t: f64, n_samples: usize) -> Self {
        Self {
            hamiltonian,
            t,
            n_samples,
            n_qubits: None,
        }
    }

    /// Override circuit width.
    #[must_use]
    pub fn with_n_qubits(mut self, n: u32) -> Self {
        self.n_qubits = Some(n);
        self
    }

    /// Append a sampled evolution to `circuit`, term index `k` on `register[k]`.
    pub fn apply_with_rng<R: Rng + ?Sized>(
        &self,
        circuit: &mut Circuit,
        register: &[QubitId],
        rng: &mut R,
    ) -> SimResult<()> {
        self.validate()?;

        let constant = self.hamiltonian.constant();
        if constant != 0.0 {
            circuit.add_global_phase(constant * self.t)?;
        }

        let entries: Vec<(&T, Complex64)> = self
            .hamiltonian
            .iter()
            .filter(|(term, c)| !term.is_identity() && c.norm() > 0.0)
            .collect();
        let lambda: f64 = entries.iter().map(|(_, c)| c.norm()).sum();
        if entries.is_empty() {
            // Nothing but a constant: the phase above is exact.
            return Ok(());
        }

        // Effective time per sample: τ = λ t / N
        let tau = lambda * self.t / self.n_samples as f64;
        debug!(
            n_terms = entries.len(),
            n_samples = self.n_samples,
            lambda,
            tau,
            n_qubits = register.len(),
            "synthesising QDrift circuit"
        );

        let weights: Vec<f64> = entries.iter().map(|(_, c)| c.norm() / lambda).collect();
        for _ in 0..self.n_samples {
            let k = sample_index(&weights, rng);
            let (term, coeff) = entries[k];
            // Unit-modulus direction of c_k scaled by τ.
            let weight = coeff / coeff.norm() * tau;
            append_exp_term(circuit, term, register, weight)?;
        }
        Ok(())
    }

    /// Synthesise a QDrift circuit using the given random number generator.
    ///
    /// Seeding `rng` makes the circuit reproducible:
    /// ```rust,ignore
    /// use rand::SeedableRng;
    /// let rng = rand::rngs::StdRng::seed_from_u64(42);
    /// let circuit = qdrift.circuit_with_rng(rng)?;
    /// ```
    pub fn circuit_with_rng<R: Rng>(&self, mut rng: R) -> SimResult<Circuit> {
        self.validate()?;
        let n_qubits = self.effective_n_qubits();
        let mut circuit = Circuit::with_size("qdrift", n_qubits);
        let register: Vec<QubitId> = (0..n_qubits).map(QubitId).collect();
        self.apply_with_rng(&mut circuit, &register, &mut rng)?;
        Ok(circuit)
    }

    /// Synthesise a QDrift circuit using the thread-local RNG.
    pub fn circuit(&self) -> SimResult<Circuit> {
        self.circuit_with_rng(rand::thread_rng())
    }

    fn validate(&self) -> SimResult<()> {
        if self.hamiltonian.is_empty() {
            return Err(SimError::EmptyHamiltonian);
        }
        if self.n_samples == 0 {
            return Err(SimError::InvalidSamples(0));
        }
        if !self.t.is_finite() {
            return Err(SimError::InvalidTime(self.t));
        }
        Ok(())
    }

    fn effective_n_qubits(&self) -> u32 {
        self.n_qubits
            .unwrap_or_else(|| self.hamiltonian.min_qubits())
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Sample an index from a normalised probability distribution (CDF method).
fn sample_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let u: f64 = rng.r#gen();
    let mut cumsum = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumsum += w;
        if u < cumsum {
            return i;
        }
    }
    // Floating-point rounding: return last index.
    weights.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_sample_index_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert!(sample_index(&[0.2, 0.3, 0.5], &mut rng) < 3);
        }
        assert_eq!(sample_index(&[1.0], &mut rng), 0);
    }
}
