//! Term exponentiation.
//!
//! Every term reduces to the same shape: a set of *ladder* qubits on which
//! the term acts as `|b⟩⟨b̄|`, a set of *parity* qubits carrying X, Y or Z,
//! and a set of *projector* qubits carrying `|s⟩⟨s|`. The circuit for
//!
//!   exp(i·θ·(e^{iφ}·T + e^{-iφ}·T†))
//!
//! is built from nested [`Circuit::conjugate`] scopes:
//!
//! 1. `P(∓φ)` on one ladder qubit moves the phase `e^{iφ}` into the term.
//! 2. The GHZ pattern (CX from the anchor into every other ladder qubit,
//!    then H on the anchor) maps `|b⟩⟨b̄| + h.c.` to `|s⟩⟨s| ⊗ Z_anchor`,
//!    where `s_j = b_j ⊕ b_anchor`.
//! 3. Basis rotations (X: H, Y: Sdg·H) and a CX fold collapse the parity
//!    string onto the anchor.
//! 4. A multi-controlled X computes "every control matches" into a scoped
//!    ancilla, which controls `Rz(-2θ)` on the anchor.
//!
//! Terms without ladder qubits skip steps 1 and 2; projector-only terms
//! apply a controlled phase gate instead of a rotation.

use ladder_ir::{Circuit, McxMethod, QubitId};
use num_complex::Complex64;

use crate::error::{SimError, SimResult};
use crate::operators::{FermionicTerm, PauliOp, PauliTerm, Term};

/// Imaginary parts below this fraction of `|w|` are treated as zero.
const REAL_WEIGHT_TOL: f64 = 1e-12;

/// Qubit-level description of one term exponential.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RotationPlan {
    /// `(qubit, ket bit)`: the term maps `|b̄⟩` to `|b⟩` on these qubits.
    ladder: Vec<(QubitId, bool)>,
    /// X, Y or Z factors.
    parity: Vec<(QubitId, PauliOp)>,
    /// `(qubit, bit)` for a `|bit⟩⟨bit|` factor.
    projectors: Vec<(QubitId, bool)>,
    /// Rotation strength.
    theta: f64,
    /// Phase `φ` of the weight, zero for real weights.
    phase: f64,
}

impl RotationPlan {
    /// Plan for a Pauli/ladder string acting on `register`.
    pub(crate) fn from_pauli(
        term: &PauliTerm,
        register: &[QubitId],
        weight: Complex64,
    ) -> SimResult<Self> {
        let mut plan = Self::empty();
        for &(q, op) in term.ops() {
            let wire = wire(register, q)?;
            match op {
                PauliOp::A => plan.ladder.push((wire, false)),
                PauliOp::C => plan.ladder.push((wire, true)),
                PauliOp::P0 => plan.projectors.push((wire, false)),
                PauliOp::P1 => plan.projectors.push((wire, true)),
                PauliOp::X | PauliOp::Y | PauliOp::Z => plan.parity.push((wire, op)),
                PauliOp::I => {}
            }
        }
        plan.set_weight(weight, term.is_self_adjoint());
        Ok(plan)
    }

    /// Plan for a fermionic term on distinct modes, mode `k` on `register[k]`.
    ///
    /// The ladder bit of a mode is its creator flag, the parity qubits are the
    /// phase-flipping modes, and the Jordan-Wigner sign folds into the weight.
    pub(crate) fn from_fermionic(
        term: &FermionicTerm,
        register: &[QubitId],
        weight: Complex64,
    ) -> SimResult<Self> {
        let mut plan = Self::empty();
        for &(mode, creator) in term.ladders() {
            plan.ladder.push((wire(register, mode)?, creator));
        }
        for mode in term.phase_flipping_modes() {
            plan.parity.push((wire(register, mode)?, PauliOp::Z));
        }
        plan.set_weight(weight * term.jordan_wigner_sign(), term.is_self_adjoint());
        Ok(plan)
    }

    fn empty() -> Self {
        Self {
            ladder: Vec::new(),
            parity: Vec::new(),
            projectors: Vec::new(),
            theta: 0.0,
            phase: 0.0,
        }
    }

    fn set_weight(&mut self, weight: Complex64, self_adjoint: bool) {
        if self_adjoint || weight.im.abs() <= REAL_WEIGHT_TOL * weight.norm() {
            self.theta = weight.re;
            self.phase = 0.0;
        } else {
            self.theta = weight.norm();
            self.phase = weight.arg();
        }
    }

    /// Rotation strength the eigenvalues are scaled by.
    pub(crate) fn theta(&self) -> f64 {
        self.theta
    }

    /// Append the exponential to `circuit`.
    pub(crate) fn append_rotation(&self, circuit: &mut Circuit) -> SimResult<()> {
        if self.theta == 0.0 {
            return Ok(());
        }
        let theta = self.theta;
        if let Some(&(anchor, anchor_bit)) = self.ladder.last() {
            let (controls, states) = self.ladder_controls(anchor_bit);
            circuit.conjugate(
                |c: &mut Circuit| self.phase_pattern(c),
                |c: &mut Circuit| {
                    c.conjugate(
                        |c: &mut Circuit| self.ghz_pattern(c, anchor),
                        |c: &mut Circuit| {
                            c.conjugate(
                                |c: &mut Circuit| self.parity_pattern(c, anchor),
                                |c: &mut Circuit| {
                                    controlled(c, &controls, &states, |c| {
                                        c.rz(-2.0 * theta, anchor)?;
                                        Ok(())
                                    })
                                },
                            )
                        },
                    )
                },
            )
        } else if let Some(&(anchor, _)) = self.parity.last() {
            let (controls, states): (Vec<QubitId>, Vec<bool>) =
                self.projectors.iter().copied().unzip();
            circuit.conjugate(
                |c: &mut Circuit| self.parity_pattern(c, anchor),
                |c: &mut Circuit| {
                    controlled(c, &controls, &states, |c| {
                        c.rz(-2.0 * theta, anchor)?;
                        Ok(())
                    })
                },
            )
        } else if let Some((&(anchor, bit), rest)) = self.projectors.split_last() {
            let (controls, states): (Vec<QubitId>, Vec<bool>) = rest.iter().copied().unzip();
            circuit.conjugate(
                |c: &mut Circuit| -> SimResult<()> {
                    if !bit {
                        c.x(anchor)?;
                    }
                    Ok(())
                },
                |c: &mut Circuit| {
                    controlled(c, &controls, &states, |c| {
                        c.p(theta, anchor)?;
                        Ok(())
                    })
                },
            )
        } else {
            Err(SimError::EmptyTerm)
        }
    }

    /// Append the rotation that diagonalizes the term's Hermitian completion.
    ///
    /// After it, [`RotationPlan::eigenvalue`] gives the value of each basis
    /// outcome.
    pub(crate) fn append_measurement_basis(&self, circuit: &mut Circuit) -> SimResult<()> {
        self.phase_pattern(circuit)?;
        if let Some(&(anchor, _)) = self.ladder.last() {
            self.ghz_pattern(circuit, anchor)?;
        }
        self.basis_pattern(circuit)
    }

    /// Eigenvalue (up to `theta`) of a basis outcome in the measurement basis.
    pub(crate) fn eigenvalue(&self, outcome: u64) -> f64 {
        let bit = |q: QubitId| (outcome >> q.0) & 1 == 1;
        if self.projectors.iter().any(|&(q, b)| bit(q) != b) {
            return 0.0;
        }
        let mut odd = self.parity.iter().filter(|&&(q, _)| bit(q)).count() % 2 == 1;
        if let Some((&(anchor, anchor_bit), others)) = self.ladder.split_last() {
            if others.iter().any(|&(q, b)| bit(q) != (b ^ anchor_bit)) {
                return 0.0;
            }
            odd ^= bit(anchor);
        }
        if odd { -1.0 } else { 1.0 }
    }

    // -----------------------------------------------------------------------
    // Patterns
    // -----------------------------------------------------------------------

    fn ladder_controls(&self, anchor_bit: bool) -> (Vec<QubitId>, Vec<bool>) {
        let others = &self.ladder[..self.ladder.len().saturating_sub(1)];
        others
            .iter()
            .map(|&(q, b)| (q, b ^ anchor_bit))
            .chain(self.projectors.iter().copied())
            .unzip()
    }

    /// `P(∓φ)` on a ladder qubit, so that conjugating `T` by it yields `e^{iφ}·T`.
    fn phase_pattern(&self, circuit: &mut Circuit) -> SimResult<()> {
        if self.phase == 0.0 {
            return Ok(());
        }
        match self.ladder.iter().find(|&&(_, b)| b) {
            Some(&(q, _)) => circuit.p(-self.phase, q)?,
            None => match self.ladder.first() {
                Some(&(q, _)) => circuit.p(self.phase, q)?,
                None => return Ok(()),
            },
        };
        Ok(())
    }

    fn ghz_pattern(&self, circuit: &mut Circuit, anchor: QubitId) -> SimResult<()> {
        for &(q, _) in &self.ladder {
            if q != anchor {
                circuit.cx(anchor, q)?;
            }
        }
        circuit.h(anchor)?;
        Ok(())
    }

    fn basis_pattern(&self, circuit: &mut Circuit) -> SimResult<()> {
        for &(q, op) in &self.parity {
            match op {
                PauliOp::X => {
                    circuit.h(q)?;
                }
                PauliOp::Y => {
                    circuit.sdg(q)?.h(q)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn parity_pattern(&self, circuit: &mut Circuit, anchor: QubitId) -> SimResult<()> {
        self.basis_pattern(circuit)?;
        for &(q, _) in &self.parity {
            if q != anchor {
                circuit.cx(q, anchor)?;
            }
        }
        Ok(())
    }
}

/// Run `gate` controlled on `controls` matching `states`.
///
/// The match is computed into a scoped ancilla with a phase-tolerant
/// multi-controlled X and uncomputed afterwards. With no controls `gate`
/// runs directly and no ancilla is taken.
fn controlled<F>(circuit: &mut Circuit, controls: &[QubitId], states: &[bool], gate: F) -> SimResult<()>
where
    F: FnOnce(&mut Circuit) -> SimResult<()>,
{
    if controls.is_empty() {
        return gate(circuit);
    }
    circuit.with_ancilla(|c, ancilla| {
        c.conjugate(
            |c: &mut Circuit| -> SimResult<()> {
                c.mcx(controls, states, ancilla, McxMethod::GrayPhaseTolerant)?;
                Ok(())
            },
            |c: &mut Circuit| c.control(ancilla, gate),
        )
    })
}

fn wire(register: &[QubitId], index: u32) -> SimResult<QubitId> {
    register
        .get(index as usize)
        .copied()
        .ok_or(SimError::QubitOutOfRange {
            qubit: index,
            n_qubits: u32::try_from(register.len()).unwrap_or(u32::MAX),
        })
}

/// Append `exp(i·(w·T + conj(w)·T†))` for any term.
///
/// Convenience wrapper over [`Term::simulate_weighted`] that turns an
/// identity term into a global phase instead of an error.
pub fn append_exp_term<T: Term>(
    circuit: &mut Circuit,
    term: &T,
    register: &[QubitId],
    weight: Complex64,
) -> SimResult<()> {
    if term.is_identity() {
        circuit.add_global_phase(weight.re)?;
        return Ok(());
    }
    term.simulate_weighted(circuit, register, weight)
}
