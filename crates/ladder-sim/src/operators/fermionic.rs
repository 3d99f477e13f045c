//! Products of fermionic creation and annihilation operators.
//!
//! A [`FermionicTerm`] stores its ladder operators sorted by mode. Sorting
//! operators on distinct modes past each other costs a sign per swap;
//! [`FermionicTerm::canonical`] reports that sign, [`FermionicTerm::new`]
//! drops it. All Hamiltonian arithmetic goes through [`Term::compose`] and
//! [`Term::adjoint`], which keep it.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use ladder_ir::{Circuit, QubitId};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::hamiltonian::Hamiltonian;
use crate::operators::pauli::{PauliOp, PauliTerm};
use crate::operators::Term;
use crate::synthesis::RotationPlan;

/// A product of ladder operators `(mode, is_creator)`, ascending by mode.
///
/// Equality and hashing use the smaller of the ladder list and the ladder
/// list of the adjoint, so a term and its Hermitian conjugate are equal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FermionicTerm {
    ladders: Vec<(u32, bool)>,
}

impl FermionicTerm {
    /// Stable-sort `ladders` by mode, discarding the reordering sign.
    pub fn new(ladders: impl IntoIterator<Item = (u32, bool)>) -> Self {
        Self::canonical(ladders).1
    }

    /// Stable-sort `ladders` by mode.
    ///
    /// Returns `(sign, term)` where the operator product in the given order
    /// equals `sign` times the sorted product. Operators on the same mode
    /// keep their relative order and contribute no sign.
    pub fn canonical(ladders: impl IntoIterator<Item = (u32, bool)>) -> (f64, Self) {
        let mut ladders: Vec<(u32, bool)> = ladders.into_iter().collect();
        let inversions = ladders
            .iter()
            .enumerate()
            .map(|(i, &(m, _))| ladders[i + 1..].iter().filter(|&&(n, _)| n < m).count())
            .sum::<usize>();
        ladders.sort_by_key(|&(m, _)| m);
        let sign = if inversions % 2 == 0 { 1.0 } else { -1.0 };
        (sign, Self { ladders })
    }

    /// A single creation operator.
    pub fn creator(mode: u32) -> Self {
        Self {
            ladders: vec![(mode, true)],
        }
    }

    /// A single annihilation operator.
    pub fn annihilator(mode: u32) -> Self {
        Self {
            ladders: vec![(mode, false)],
        }
    }

    /// Ladder operators, ascending by mode.
    pub fn ladders(&self) -> &[(u32, bool)] {
        &self.ladders
    }

    /// Number of ladder operators.
    pub fn len(&self) -> usize {
        self.ladders.len()
    }

    /// True for the identity.
    pub fn is_empty(&self) -> bool {
        self.ladders.is_empty()
    }

    /// True when no mode appears twice.
    pub fn has_distinct_modes(&self) -> bool {
        self.ladders.windows(2).all(|w| w[0].0 != w[1].0)
    }

    /// Hermitian adjoint: reversed product with every flag flipped,
    /// re-canonicalized. Returns `(sign, term)` with `self† = sign · term`.
    pub fn dagger(&self) -> (f64, Self) {
        Self::canonical(self.ladders.iter().rev().map(|&(m, c)| (m, !c)))
    }

    /// Multi-controlled X state string: `0` for a creator, `1` for an
    /// annihilator, in ladder order.
    pub fn control_state(&self) -> String {
        self.ladders
            .iter()
            .map(|&(_, creator)| if creator { '0' } else { '1' })
            .collect()
    }

    /// Modes that carry a Jordan-Wigner `Z`: every non-participating mode
    /// below the last one with an odd number of participating modes above it.
    pub fn phase_flipping_modes(&self) -> Vec<u32> {
        let Some(&(last, _)) = self.ladders.last() else {
            return Vec::new();
        };
        (0..last)
            .filter(|l| !self.ladders.iter().any(|&(m, _)| m == *l))
            .filter(|l| self.ladders.iter().filter(|&&(m, _)| m > *l).count() % 2 == 1)
            .collect()
    }

    /// Sign picked up when the Jordan-Wigner strings of a distinct-mode term
    /// are moved past its ladder factors: `-1` per annihilator with an odd
    /// number of operators after it.
    pub fn jordan_wigner_sign(&self) -> f64 {
        let k = self.ladders.len();
        let flips = self
            .ladders
            .iter()
            .enumerate()
            .filter(|&(p, &(_, creator))| !creator && (k - 1 - p) % 2 == 1)
            .count();
        if flips % 2 == 0 { 1.0 } else { -1.0 }
    }

    /// `c<i>` for a creator and `a<i>` for an annihilator, joined by `*`.
    pub fn to_display_expression(&self) -> String {
        if self.ladders.is_empty() {
            return "1".to_string();
        }
        self.ladders
            .iter()
            .map(|&(m, creator)| format!("{}{m}", if creator { 'c' } else { 'a' }))
            .collect::<Vec<_>>()
            .join("*")
    }

    fn key(&self) -> Cow<'_, [(u32, bool)]> {
        let (_, adjoint) = self.dagger();
        if adjoint.ladders < self.ladders {
            Cow::Owned(adjoint.ladders)
        } else {
            Cow::Borrowed(&self.ladders)
        }
    }
}

impl PartialEq for FermionicTerm {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for FermionicTerm {}

impl Hash for FermionicTerm {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Term for FermionicTerm {
    fn identity() -> Self {
        Self::default()
    }

    fn is_identity(&self) -> bool {
        self.ladders.is_empty()
    }

    fn compose(&self, other: &Self) -> (Complex64, Self) {
        let (sign, term) =
            Self::canonical(self.ladders.iter().chain(other.ladders.iter()).copied());
        (Complex64::new(sign, 0.0), term)
    }

    fn adjoint(&self) -> (Complex64, Self) {
        let (sign, term) = self.dagger();
        (Complex64::new(sign, 0.0), term)
    }

    fn same_orientation(&self, other: &Self) -> bool {
        self.ladders == other.ladders
    }

    fn is_self_adjoint(&self) -> bool {
        self.dagger().1.ladders == self.ladders
    }

    fn max_qubit(&self) -> Option<u32> {
        self.ladders.last().map(|&(m, _)| m)
    }

    fn indices(&self) -> Vec<u32> {
        let mut modes: Vec<u32> = self.ladders.iter().map(|&(m, _)| m).collect();
        modes.dedup();
        modes
    }

    fn remap(&self, map: impl Fn(u32) -> u32) -> Self {
        Self {
            ladders: self.ladders.iter().map(|&(m, c)| (map(m), c)).collect(),
        }
    }

    fn to_pauli(&self) -> (Complex64, PauliTerm) {
        let mut phase = Complex64::new(1.0, 0.0);
        let mut image = PauliTerm::identity();
        for &(mode, creator) in &self.ladders {
            let ladder = if creator { PauliOp::C } else { PauliOp::A };
            let factor = PauliTerm::from_sorted(
                (0..mode)
                    .map(|q| (q, PauliOp::Z))
                    .chain(std::iter::once((mode, ladder)))
                    .collect(),
            );
            let (p, next) = image.compose(&factor);
            phase *= p;
            image = next;
        }
        (phase, image)
    }

    fn simulate_weighted(
        &self,
        circuit: &mut Circuit,
        register: &[QubitId],
        weight: Complex64,
    ) -> SimResult<()> {
        if self.is_identity() {
            return Err(SimError::EmptyTerm);
        }
        if !self.has_distinct_modes() {
            let (phase, image) = self.to_pauli();
            // Nilpotent products such as c0*c0 vanish.
            if phase.norm() == 0.0 {
                return Ok(());
            }
            return image.simulate_weighted(circuit, register, weight * phase);
        }
        let plan = RotationPlan::from_fermionic(self, register, weight)?;
        plan.append_rotation(circuit)
    }
}

impl fmt::Display for FermionicTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_expression())
    }
}

impl FromStr for FermionicTerm {
    type Err = SimError;

    /// Parse `c0*a1`. The result is canonicalized like [`FermionicTerm::new`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "1" {
            return Ok(Self::default());
        }
        let ladders = s
            .split('*')
            .map(|token| {
                let token = token.trim();
                let malformed =
                    || SimError::MalformedTerm(format!("cannot parse ladder operator '{token}'"));
                let creator = match token.chars().next() {
                    Some('c') => true,
                    Some('a') => false,
                    _ => return Err(malformed()),
                };
                let mode = token[1..].parse::<u32>().map_err(|_| malformed())?;
                Ok((mode, creator))
            })
            .collect::<SimResult<Vec<_>>>()?;
        Ok(Self::new(ladders))
    }
}

// ---------------------------------------------------------------------------
// Single-operator Hamiltonians
// ---------------------------------------------------------------------------

/// Creation operator on `mode`.
pub fn c(mode: u32) -> Hamiltonian<FermionicTerm> {
    Hamiltonian::from_term(FermionicTerm::creator(mode), 1.0)
}

/// Annihilation operator on `mode`.
pub fn a(mode: u32) -> Hamiltonian<FermionicTerm> {
    Hamiltonian::from_term(FermionicTerm::annihilator(mode), 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_sign() {
        let (sign, t) = FermionicTerm::canonical([(1, true), (0, false)]);
        assert_eq!(sign, -1.0);
        assert_eq!(t.ladders(), &[(0, false), (1, true)]);

        // Same-mode operators keep their order and cost nothing.
        let (sign, t) = FermionicTerm::canonical([(2, false), (2, true), (0, true)]);
        assert_eq!(sign, 1.0);
        assert_eq!(t.ladders(), &[(0, true), (2, false), (2, true)]);
    }

    #[test]
    fn test_remap_merges_repeated_modes_in_indices() {
        let t: FermionicTerm = "c0*a5*c5*a9".parse().unwrap();
        assert_eq!(t.indices(), vec![0, 5, 9]);
        let r = t.remap(|m| [0, 5, 9].iter().position(|&u| u == m).map_or(m, |k| k as u32));
        assert_eq!(r.ladders(), &[(0, true), (1, false), (1, true), (2, false)]);
        assert_eq!(r.jordan_wigner_sign(), t.jordan_wigner_sign());
    }

    #[test]
    fn test_dagger_two_modes() {
        let t: FermionicTerm = "c0*a1".parse().unwrap();
        let (sign, d) = t.dagger();
        assert_eq!(d.ladders(), &[(0, false), (1, true)]);
        assert_eq!(sign, -1.0);
        assert_eq!(t, d);
        assert!(!t.same_orientation(&d));
    }

    #[test]
    fn test_number_operator_is_self_adjoint() {
        let n: FermionicTerm = "c0*a0".parse().unwrap();
        assert!(n.is_self_adjoint());
        assert!(!n.has_distinct_modes());
        let (phase, p) = n.to_pauli();
        assert_eq!(phase, Complex64::new(1.0, 0.0));
        assert_eq!(p.ops(), &[(0, PauliOp::P1)]);
    }

    #[test]
    fn test_control_state_and_phase_flips() {
        let t: FermionicTerm = "c0*a3".parse().unwrap();
        assert_eq!(t.control_state(), "01");
        assert_eq!(t.phase_flipping_modes(), vec![1, 2]);

        let t: FermionicTerm = "c0*c2*a3*a5".parse().unwrap();
        assert_eq!(t.phase_flipping_modes(), vec![1, 4]);
    }

    #[test]
    fn test_jordan_wigner_sign_matches_image() {
        for text in ["c0*a1", "a0*c1", "a0*a1", "c0*c1", "c0*a2*c3*a5", "a1*a2*a4"] {
            let t: FermionicTerm = text.parse().unwrap();
            let (phase, image) = t.to_pauli();
            assert_eq!(phase, Complex64::new(t.jordan_wigner_sign(), 0.0), "{text}");
            for m in t.phase_flipping_modes() {
                assert_eq!(image.op(m), PauliOp::Z, "{text}");
            }
        }
    }

    #[test]
    fn test_display_round_trip() {
        let t: FermionicTerm = "a1*c0".parse().unwrap();
        assert_eq!(t.to_string(), "c0*a1");
        assert_eq!(FermionicTerm::identity().to_string(), "1");
        assert!(matches!(
            "b0*a1".parse::<FermionicTerm>(),
            Err(SimError::MalformedTerm(_))
        ));
        assert!(matches!(
            "cx".parse::<FermionicTerm>(),
            Err(SimError::MalformedTerm(_))
        ));
    }
}
