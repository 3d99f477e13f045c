//! Trotter-Suzuki product-formula synthesis.
//!
//! Approximates `exp(i H t)` by splitting the evolution into `n_steps`
//! slices, each evolved exactly under each entry in sequence.
//!
//! # First-order Trotter (Lie-Trotter)
//!
//!   exp(i H t) ≈ [∏_k exp(i (c_k T_k + h.c.) t/n)]^n
//!
//! Error: O(t² / n).
//!
//! # Second-order Trotter (Suzuki-Trotter)
//!
//!   exp(i H t) ≈ [S₂(t/n)]^n
//!   S₂(τ) = [∏_k exp(i H_k τ/2)] · [∏_k exp(i H_{n-k} τ/2)]
//!
//! Error: O(t³ / n²).
//!
//! Identity entries contribute a global phase `c·t`.

use ladder_ir::{Circuit, QubitId};
use num_complex::Complex64;
use tracing::{debug, trace};

use crate::config::{EvolutionConfig, TrotterOrder};
use crate::error::{SimError, SimResult};
use crate::hamiltonian::Hamiltonian;
use crate::operators::{PauliTerm, Term};
use crate::synthesis::append_exp_term;

/// Trotter product-formula time-evolution synthesiser.
#[derive(Debug, Clone)]
pub struct TrotterEvolution<T: Term = PauliTerm> {
    hamiltonian: Hamiltonian<T>,
    /// Total evolution time t.
    t: f64,
    /// Number of Trotter steps (repetitions).
    n_steps: usize,
    /// Product-formula order used by [`TrotterEvolution::apply`].
    order: TrotterOrder,
    /// Number of qubits; if None, inferred from the Hamiltonian.
    n_qubits: Option<u32>,
}

impl<T: Term> TrotterEvolution<T> {
    /// Construct a new first-order Trotter synthesiser.
    ///
    /// # Arguments
    /// * `hamiltonian`: the Hamiltonian H = Σ (c_k T_k + h.c.)
    /// * `t`: total evolution time
    /// * `n_steps`: number of Trotter slices (higher is more accurate)
    pub fn new(hamiltonian: Hamiltonian<T>, t: f64, n_steps: usize) -> Self {
        Self {
            hamiltonian,
            t,
            n_steps,
            order: TrotterOrder::First,
            n_qubits: None,
        }
    }

    /// Construct from an [`EvolutionConfig`].
    pub fn from_config(hamiltonian: Hamiltonian<T>, config: &EvolutionConfig) -> Self {
        Self::new(hamiltonian, config.time, config.steps).with_order(config.order)
    }

    /// Override the circuit width (number of qubits).
    ///
    /// By default the width is inferred from the highest qubit index in the
    /// Hamiltonian.
    #[must_use]
    pub fn with_n_qubits(mut self, n: u32) -> Self {
        self.n_qubits = Some(n);
        self
    }

    /// Select the product-formula order.
    #[must_use]
    pub fn with_order(mut self, order: TrotterOrder) -> Self {
        self.order = order;
        self
    }

    /// The Hamiltonian being evolved.
    pub fn hamiltonian(&self) -> &Hamiltonian<T> {
        &self.hamiltonian
    }

    /// Append the evolution to `circuit`, term index `k` acting on `register[k]`.
    pub fn apply(&self, circuit: &mut Circuit, register: &[QubitId]) -> SimResult<()> {
        self.apply_order(circuit, register, self.order)
    }

    /// Synthesise a fresh circuit with the configured order.
    pub fn circuit(&self) -> SimResult<Circuit> {
        self.build(self.order)
    }

    /// Synthesise a first-order Trotter circuit.
    ///
    /// Each Trotter slice applies every entry once with time step `t / n_steps`.
    pub fn first_order(&self) -> SimResult<Circuit> {
        self.build(TrotterOrder::First)
    }

    /// Synthesise a second-order Suzuki-Trotter circuit.
    ///
    /// Each slice is a symmetric product: forward half-step then reverse
    /// half-step, giving O(t³/n²) error.
    pub fn second_order(&self) -> SimResult<Circuit> {
        self.build(TrotterOrder::Second)
    }

    fn build(&self, order: TrotterOrder) -> SimResult<Circuit> {
        self.validate()?;
        let n_qubits = self.effective_n_qubits();
        let name = match order {
            TrotterOrder::First => "trotter1",
            TrotterOrder::Second => "trotter2",
        };
        let mut circuit = Circuit::with_size(name, n_qubits);
        let register: Vec<QubitId> = (0..n_qubits).map(QubitId).collect();
        self.apply_order(&mut circuit, &register, order)?;
        Ok(circuit)
    }

    fn apply_order(
        &self,
        circuit: &mut Circuit,
        register: &[QubitId],
        order: TrotterOrder,
    ) -> SimResult<()> {
        self.validate()?;
        let entries: Vec<(&T, Complex64)> = self.hamiltonian.iter().collect();
        debug!(
            n_terms = entries.len(),
            n_steps = self.n_steps,
            n_qubits = register.len(),
            ?order,
            "synthesising Trotter evolution"
        );

        match order {
            TrotterOrder::First => {
                let step_t = self.t / self.n_steps as f64;
                for _ in 0..self.n_steps {
                    for &(term, coeff) in &entries {
                        append_entry(circuit, register, term, coeff * step_t)?;
                    }
                }
            }
            TrotterOrder::Second => {
                let half_t = self.t / (2.0 * self.n_steps as f64);
                for _ in 0..self.n_steps {
                    // Forward sweep.
                    for &(term, coeff) in &entries {
                        append_entry(circuit, register, term, coeff * half_t)?;
                    }
                    // Reverse sweep.
                    for &(term, coeff) in entries.iter().rev() {
                        append_entry(circuit, register, term, coeff * half_t)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn validate(&self) -> SimResult<()> {
        if self.hamiltonian.is_empty() {
            return Err(SimError::EmptyHamiltonian);
        }
        if self.n_steps == 0 {
            return Err(SimError::InvalidSteps(0));
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

fn append_entry<T: Term>(
    circuit: &mut Circuit,
    register: &[QubitId],
    term: &T,
    weight: Complex64,
) -> SimResult<()> {
    trace!(%term, re = weight.re, im = weight.im, "appending term exponential");
    append_exp_term(circuit, term, register, weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::pauli::{x, z};

    #[test]
    fn test_validation() {
        let empty = TrotterEvolution::new(Hamiltonian::<PauliTerm>::new(), 1.0, 1);
        assert!(matches!(empty.first_order(), Err(SimError::EmptyHamiltonian)));

        let zero_steps = TrotterEvolution::new(z(0), 1.0, 0);
        assert!(matches!(zero_steps.first_order(), Err(SimError::InvalidSteps(0))));
    }

    #[test]
    fn test_width_and_order() {
        let h = z(0) * z(1) + 0.5 * x(2);
        let first = TrotterEvolution::new(h.clone(), 1.0, 3).first_order().unwrap();
        assert_eq!(first.num_qubits(), 3);
        assert_eq!(first.count_ops().get("rz"), Some(&6));

        let second = h.trotterization(1.0, 3).second_order().unwrap();
        assert_eq!(second.count_ops().get("rz"), Some(&12));
        assert_eq!(second.name(), "trotter2");
    }

    #[test]
    fn test_identity_entry_is_global_phase() {
        let h = 0.75 + z(0);
        let circuit = TrotterEvolution::new(h, 2.0, 4).first_order().unwrap();
        assert!((circuit.global_phase() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_from_config() {
        let config = EvolutionConfig::new(0.5, 2).with_order(TrotterOrder::Second);
        let evo = TrotterEvolution::from_config(z(0), &config).with_n_qubits(2);
        let circuit = evo.circuit().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.count_ops().get("rz"), Some(&4));
    }
}
