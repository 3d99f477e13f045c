//! Operator monomials: fermionic ladder products and Pauli/ladder strings.
//!
//! Both kinds implement [`Term`], the interface the [`Hamiltonian`](crate::Hamiltonian)
//! container and the schedulers are generic over.

pub mod fermionic;
pub mod pauli;

use std::fmt;
use std::hash::Hash;

use ladder_ir::{Circuit, QubitId};
use num_complex::Complex64;

use crate::error::SimResult;

pub use fermionic::FermionicTerm;
pub use pauli::{PauliOp, PauliTerm};

/// A product of elementary operators that can be accumulated in a
/// [`Hamiltonian`](crate::Hamiltonian) and synthesized into a circuit.
///
/// Equality and hashing identify a term with its Hermitian conjugate, so a
/// term and its adjoint share one Hamiltonian entry. [`Term::same_orientation`]
/// distinguishes the two.
pub trait Term: Clone + Eq + Hash + fmt::Debug + fmt::Display {
    /// The empty product.
    fn identity() -> Self;

    /// True for the empty product.
    fn is_identity(&self) -> bool;

    /// Operator product `self · other`, as `(phase, term)` with
    /// `self · other = phase · term`.
    fn compose(&self, other: &Self) -> (Complex64, Self);

    /// Hermitian adjoint as `(phase, term)` with `self† = phase · term`.
    fn adjoint(&self) -> (Complex64, Self);

    /// True when both terms store the same operator list, not just the
    /// same identity key.
    fn same_orientation(&self, other: &Self) -> bool;

    /// True when the term equals its own adjoint.
    fn is_self_adjoint(&self) -> bool;

    /// Highest qubit (or mode) index the term touches.
    fn max_qubit(&self) -> Option<u32>;

    /// Distinct qubit (or mode) indices the term touches, ascending.
    fn indices(&self) -> Vec<u32>;

    /// Relabel indices through a strictly increasing map.
    ///
    /// Order is preserved, so no operators are reordered and no sign appears.
    fn remap(&self, map: impl Fn(u32) -> u32) -> Self;

    /// Qubit image of the term as `(phase, pauli)` with `self = phase · pauli`.
    fn to_pauli(&self) -> (Complex64, PauliTerm);

    /// Append `exp(i·(w·T + conj(w)·T†))` to `circuit`, acting on
    /// `register[k]` for index `k` of the term.
    ///
    /// For a self-adjoint term only `Re(w)` contributes and the unitary is
    /// `exp(i·Re(w)·T)`.
    fn simulate_weighted(
        &self,
        circuit: &mut Circuit,
        register: &[QubitId],
        weight: Complex64,
    ) -> SimResult<()>;

    /// Append `exp(i·θ·(T + T†))`, or `exp(i·θ·T)` for a self-adjoint term.
    fn simulate(&self, circuit: &mut Circuit, register: &[QubitId], theta: f64) -> SimResult<()> {
        self.simulate_weighted(circuit, register, Complex64::new(theta, 0.0))
    }
}
