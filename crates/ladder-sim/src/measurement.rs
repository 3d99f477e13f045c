//! Expectation values by sampling.
//!
//! Each entry is measured in its own basis: the state circuit is cloned,
//! the entry's diagonalizing rotation appended, and the outcome distribution
//! from a [`Sampler`] weighted by the entry's eigenvalue per basis state.

use ladder_hal::{SampleConfig, Sampler};
use ladder_ir::{Circuit, QubitId};
use tracing::{debug, trace};

use crate::error::SimResult;
use crate::hamiltonian::Hamiltonian;
use crate::operators::Term;
use crate::synthesis::RotationPlan;

impl<T: Term> Hamiltonian<T> {
    /// Estimate `⟨ψ|H|ψ⟩` for the state prepared by `state`, term index `k`
    /// on `register[k]`.
    ///
    /// With `config.shots == None` the sampler reports exact probabilities
    /// and the result is exact. With a seed, entry `j` is sampled with seed
    /// `seed + j` so the estimate is reproducible.
    pub fn expectation_value(
        &self,
        state: &Circuit,
        register: &[QubitId],
        sampler: &dyn Sampler,
        config: &SampleConfig,
    ) -> SimResult<f64> {
        config.validate()?;
        let pauli = self.to_pauli();
        debug!(
            n_terms = pauli.n_terms(),
            sampler = sampler.name(),
            shots = ?config.shots,
            "estimating expectation value"
        );

        let mut total = 0.0;
        for (j, (term, coeff)) in pauli.iter().enumerate() {
            if term.is_identity() {
                total += coeff.re;
                continue;
            }
            let plan = RotationPlan::from_pauli(term, register, coeff)?;
            if plan.theta() == 0.0 {
                continue;
            }

            let mut circuit = state.clone();
            plan.append_measurement_basis(&mut circuit)?;
            let entry_config = SampleConfig {
                shots: config.shots,
                seed: config.seed.map(|s| s.wrapping_add(j as u64)),
            };
            let distribution = sampler.sample(&circuit, &entry_config)?;
            let value = plan.theta() * distribution.expectation(|outcome| plan.eigenvalue(outcome));
            trace!(%term, value, "measured entry");
            total += value;
        }
        Ok(total)
    }
}
