//! Hamiltonian representation.
//!
//! A Hamiltonian is a weighted sum of terms, H = Σ_k (c_k T_k + c̄_k T_k†).
//! A term and its Hermitian conjugate share one entry; for a self-adjoint
//! term the entry is the Hermitian part `Re(c_k)·T_k`. Entries keep their
//! insertion order, which is the order the schedulers synthesize them in.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use indexmap::IndexMap;
use num_complex::Complex64;
use rustc_hash::FxBuildHasher;

use crate::operators::{FermionicTerm, PauliTerm, Term};
use crate::trotter::TrotterEvolution;

/// Hamiltonian over Pauli/ladder strings.
pub type PauliHamiltonian = Hamiltonian<PauliTerm>;

/// Hamiltonian over fermionic ladder products.
pub type FermionicHamiltonian = Hamiltonian<FermionicTerm>;

/// A Hermitian operator H = Σ_k (c_k T_k + h.c.).
#[derive(Debug, Clone)]
pub struct Hamiltonian<T: Term = PauliTerm> {
    terms: IndexMap<T, Complex64, FxBuildHasher>,
}

impl<T: Term> Default for Hamiltonian<T> {
    fn default() -> Self {
        Self {
            terms: IndexMap::default(),
        }
    }
}

impl<T: Term> Hamiltonian<T> {
    /// The zero operator.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-entry Hamiltonian.
    pub fn from_term(term: T, coeff: impl Into<Complex64>) -> Self {
        let mut h = Self::new();
        h.add_term(term, coeff);
        h
    }

    /// Accumulate `(term, coeff)` pairs.
    pub fn from_terms<C: Into<Complex64>>(terms: impl IntoIterator<Item = (T, C)>) -> Self {
        let mut h = Self::new();
        for (term, coeff) in terms {
            h.add_term(term, coeff);
        }
        h
    }

    /// Add `coeff · term` (plus its conjugate).
    ///
    /// When the entry is stored in the conjugate orientation, the
    /// coefficient is conjugated and corrected by the adjoint phase before
    /// it is added, so `c·T + c̄·T†` accumulates on a single entry. Entries
    /// that cancel to zero stay in place; see [`Hamiltonian::prune`].
    pub fn add_term(&mut self, term: T, coeff: impl Into<Complex64>) {
        let coeff = coeff.into();
        if let Some((stored, value)) = self.terms.get_key_value(&term) {
            let delta = if stored.same_orientation(&term) {
                coeff
            } else {
                let (phase, _) = term.adjoint();
                coeff.conj() * phase
            };
            let sum = *value + delta;
            if let Some(slot) = self.terms.get_mut(&term) {
                *slot = sum;
            }
        } else {
            self.terms.insert(term, coeff);
        }
    }

    /// Coefficient of `term` expressed in `term`'s orientation.
    pub fn coefficient(&self, term: &T) -> Option<Complex64> {
        let (stored, value) = self.terms.get_key_value(term)?;
        if stored.same_orientation(term) {
            Some(*value)
        } else {
            let (phase, _) = term.adjoint();
            Some(value.conj() * phase)
        }
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, Complex64)> + '_ {
        self.terms.iter().map(|(t, c)| (t, *c))
    }

    /// Number of entries, including zero ones.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// True when there are no entries.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Drop entries with `|c| <= tol`.
    pub fn prune(&mut self, tol: f64) {
        self.terms.retain(|_, c| c.norm() > tol);
    }

    /// Coefficient of the identity entry.
    pub fn constant(&self) -> f64 {
        self.terms
            .get(&T::identity())
            .map_or(0.0, |c| c.re)
    }

    /// Hermitian conjugate.
    ///
    /// Every entry is rewritten in the conjugate orientation. Each entry is
    /// Hermitian, so the result denotes the same operator.
    pub fn dagger(&self) -> Self {
        let mut out = Self::new();
        for (term, coeff) in self.iter() {
            let (phase, adjoint) = term.adjoint();
            out.add_term(adjoint, coeff.conj() * phase);
        }
        out
    }

    /// Qubit image of the Hamiltonian (Jordan-Wigner for fermionic terms).
    ///
    /// Products that vanish identically are dropped.
    pub fn to_pauli(&self) -> PauliHamiltonian {
        let mut out = PauliHamiltonian::new();
        for (term, coeff) in self.iter() {
            let (phase, image) = term.to_pauli();
            if phase.norm() == 0.0 {
                continue;
            }
            let coeff = if term.is_self_adjoint() {
                Complex64::new(coeff.re, 0.0)
            } else {
                coeff
            };
            out.add_term(image, coeff * phase);
        }
        out
    }

    /// Minimum register size needed to hold every term.
    pub fn min_qubits(&self) -> u32 {
        self.terms
            .keys()
            .filter_map(Term::max_qubit)
            .max()
            .map_or(0, |q| q + 1)
    }

    /// λ = Σ |c_k| over non-identity entries.
    pub fn lambda(&self) -> f64 {
        self.iter()
            .filter(|(t, _)| !t.is_identity())
            .map(|(_, c)| c.norm())
            .sum()
    }

    /// Trotter scheduler for `exp(i·H·t)` over `steps` slices.
    pub fn trotterization(&self, t: f64, steps: usize) -> TrotterEvolution<T> {
        TrotterEvolution::new(self.clone(), t, steps)
    }

    fn scaled(mut self, factor: Complex64) -> Self {
        for c in self.terms.values_mut() {
            *c *= factor;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

impl<T: Term> AddAssign for Hamiltonian<T> {
    fn add_assign(&mut self, rhs: Self) {
        for (term, coeff) in rhs.terms {
            self.add_term(term, coeff);
        }
    }
}

impl<T: Term> SubAssign for Hamiltonian<T> {
    fn sub_assign(&mut self, rhs: Self) {
        for (term, coeff) in rhs.terms {
            self.add_term(term, -coeff);
        }
    }
}

impl<T: Term> Add for Hamiltonian<T> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<T: Term> Sub for Hamiltonian<T> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<T: Term> Neg for Hamiltonian<T> {
    type Output = Self;

    fn neg(self) -> Self {
        self.scaled(Complex64::new(-1.0, 0.0))
    }
}

/// Term-by-term product: every pair is composed and the composition phase
/// multiplies the coefficient product.
impl<T: Term> Mul for Hamiltonian<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut out = Self::new();
        for (left, a) in self.iter() {
            for (right, b) in rhs.iter() {
                let (phase, term) = left.compose(right);
                if phase.norm() == 0.0 {
                    continue;
                }
                out.add_term(term, a * b * phase);
            }
        }
        out
    }
}

impl<T: Term> Mul<Complex64> for Hamiltonian<T> {
    type Output = Self;

    fn mul(self, rhs: Complex64) -> Self {
        self.scaled(rhs)
    }
}

impl<T: Term> Mul<f64> for Hamiltonian<T> {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scaled(Complex64::new(rhs, 0.0))
    }
}

impl<T: Term> Mul<Hamiltonian<T>> for Complex64 {
    type Output = Hamiltonian<T>;

    fn mul(self, rhs: Hamiltonian<T>) -> Hamiltonian<T> {
        rhs.scaled(self)
    }
}

impl<T: Term> Mul<Hamiltonian<T>> for f64 {
    type Output = Hamiltonian<T>;

    fn mul(self, rhs: Hamiltonian<T>) -> Hamiltonian<T> {
        rhs.scaled(Complex64::new(self, 0.0))
    }
}

impl<T: Term> MulAssign<f64> for Hamiltonian<T> {
    fn mul_assign(&mut self, rhs: f64) {
        for c in self.terms.values_mut() {
            *c *= rhs;
        }
    }
}

impl<T: Term> Add<f64> for Hamiltonian<T> {
    type Output = Self;

    fn add(mut self, rhs: f64) -> Self {
        self.add_term(T::identity(), rhs);
        self
    }
}

impl<T: Term> Sub<f64> for Hamiltonian<T> {
    type Output = Self;

    fn sub(mut self, rhs: f64) -> Self {
        self.add_term(T::identity(), -rhs);
        self
    }
}

impl<T: Term> Add<Hamiltonian<T>> for f64 {
    type Output = Hamiltonian<T>;

    fn add(self, rhs: Hamiltonian<T>) -> Hamiltonian<T> {
        let mut out = Hamiltonian::from_term(T::identity(), self);
        out += rhs;
        out
    }
}

impl<T: Term> Sub<Hamiltonian<T>> for f64 {
    type Output = Hamiltonian<T>;

    fn sub(self, rhs: Hamiltonian<T>) -> Hamiltonian<T> {
        let mut out = Hamiltonian::from_term(T::identity(), self);
        out -= rhs;
        out
    }
}

impl<T: Term> Sum for Hamiltonian<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), |acc, h| acc + h)
    }
}

impl<T: Term> FromIterator<(T, Complex64)> for Hamiltonian<T> {
    fn from_iter<I: IntoIterator<Item = (T, Complex64)>>(iter: I) -> Self {
        Self::from_terms(iter)
    }
}

impl<T: Term> fmt::Display for Hamiltonian<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (k, (term, c)) in self.iter().enumerate() {
            let negative = c.im == 0.0 && c.re < 0.0;
            match (k, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            if c.im == 0.0 {
                write!(f, "{}", c.re.abs())?;
            } else {
                write!(f, "({}{:+}i)", c.re, c.im)?;
            }
            if !term.is_identity() {
                write!(f, "*{term}")?;
            }
        }
        Ok(())
    }
}
