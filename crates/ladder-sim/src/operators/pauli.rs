//! Pauli and qubit-ladder strings.
//!
//! A [`PauliTerm`] is a tensor product of single-qubit operators drawn from
//! the Paulis, the ladder operators `A = |0⟩⟨1|` and `C = |1⟩⟨0|`, and the
//! projectors `P0 = |0⟩⟨0|`, `P1 = |1⟩⟨1|`. It is the image of a fermionic
//! term under the Jordan-Wigner mapping and the unit the measurement path
//! diagonalizes.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use ladder_ir::{Circuit, Matrix2, QubitId};
use nalgebra::DMatrix;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::hamiltonian::Hamiltonian;
use crate::operators::Term;
use crate::spectral::DEFAULT_MAX_DENSE_QUBITS;
use crate::synthesis::RotationPlan;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Single-qubit operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity.
    I,
    /// Pauli X.
    X,
    /// Pauli Y.
    Y,
    /// Pauli Z.
    Z,
    /// Lowering operator `|0⟩⟨1|`.
    A,
    /// Raising operator `|1⟩⟨0|`.
    C,
    /// Projector `|0⟩⟨0|`.
    P0,
    /// Projector `|1⟩⟨1|`.
    P1,
}

impl PauliOp {
    /// Every operator, in the order products are matched against.
    pub const ALL: [PauliOp; 8] = [
        PauliOp::I,
        PauliOp::X,
        PauliOp::Y,
        PauliOp::Z,
        PauliOp::A,
        PauliOp::C,
        PauliOp::P0,
        PauliOp::P1,
    ];

    /// The 2x2 matrix, rows indexed by output bit.
    pub fn matrix(self) -> Matrix2 {
        match self {
            PauliOp::I => [[ONE, ZERO], [ZERO, ONE]],
            PauliOp::X => [[ZERO, ONE], [ONE, ZERO]],
            PauliOp::Y => [[ZERO, -I], [I, ZERO]],
            PauliOp::Z => [[ONE, ZERO], [ZERO, -ONE]],
            PauliOp::A => [[ZERO, ONE], [ZERO, ZERO]],
            PauliOp::C => [[ZERO, ZERO], [ONE, ZERO]],
            PauliOp::P0 => [[ONE, ZERO], [ZERO, ZERO]],
            PauliOp::P1 => [[ZERO, ZERO], [ZERO, ONE]],
        }
    }

    /// Hermitian adjoint. Only the ladder operators change.
    pub fn adjoint(self) -> Self {
        match self {
            PauliOp::A => PauliOp::C,
            PauliOp::C => PauliOp::A,
            other => other,
        }
    }

    /// True for `A` and `C`.
    pub fn is_ladder(self) -> bool {
        matches!(self, PauliOp::A | PauliOp::C)
    }

    /// True for `P0` and `P1`.
    pub fn is_projector(self) -> bool {
        matches!(self, PauliOp::P0 | PauliOp::P1)
    }

    /// Product `self · other` as `(phase, op)`.
    ///
    /// Nilpotent products such as `C · C` return a zero phase.
    pub fn compose(self, other: Self) -> (Complex64, Self) {
        let a = self.matrix();
        let b = other.matrix();
        let mut product = [[ZERO; 2]; 2];
        for (r, row) in product.iter_mut().enumerate() {
            for (c, entry) in row.iter_mut().enumerate() {
                *entry = a[r][0] * b[0][c] + a[r][1] * b[1][c];
            }
        }
        Self::ALL
            .iter()
            .find_map(|&op| proportional(&product, &op.matrix()).map(|phase| (phase, op)))
            .unwrap_or((ZERO, PauliOp::I))
    }

    /// Output row of the single non-zero entry in column `bit`, with its value.
    fn column(self, bit: usize) -> Option<(usize, Complex64)> {
        let m = self.matrix();
        (0..2).find(|&r| m[r][bit] != ZERO).map(|r| (r, m[r][bit]))
    }

    fn symbol(self) -> &'static str {
        match self {
            PauliOp::I => "I",
            PauliOp::X => "X",
            PauliOp::Y => "Y",
            PauliOp::Z => "Z",
            PauliOp::A => "A",
            PauliOp::C => "C",
            PauliOp::P0 => "P0_",
            PauliOp::P1 => "P1_",
        }
    }
}

/// `Some(phase)` when `m == phase · basis` for a non-zero phase.
fn proportional(m: &Matrix2, basis: &Matrix2) -> Option<Complex64> {
    let (r, c) = (0..4)
        .map(|k| (k / 2, k % 2))
        .find(|&(r, c)| basis[r][c] != ZERO)?;
    let phase = m[r][c] / basis[r][c];
    if phase.norm() < 1e-12 {
        return None;
    }
    let matches = (0..4).all(|k| {
        let (r, c) = (k / 2, k % 2);
        (m[r][c] - phase * basis[r][c]).norm() < 1e-12
    });
    matches.then_some(phase)
}

/// A tensor product of single-qubit operators.
///
/// Factors are sorted by qubit, identity factors are dropped and every
/// qubit appears at most once. Equality and hashing use the smaller of the
/// factor list and its adjoint, so `A0` and `C0` name the same entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PauliTerm {
    ops: Vec<(u32, PauliOp)>,
}

impl PauliTerm {
    /// The identity string.
    pub fn identity() -> Self {
        Self::default()
    }

    /// A single factor on one qubit.
    pub fn single(qubit: u32, op: PauliOp) -> Self {
        if op == PauliOp::I {
            return Self::default();
        }
        Self {
            ops: vec![(qubit, op)],
        }
    }

    /// Build from `(qubit, op)` factors in any order.
    ///
    /// Returns [`SimError::MalformedTerm`] when a qubit repeats.
    pub fn from_ops(ops: impl IntoIterator<Item = (u32, PauliOp)>) -> SimResult<Self> {
        let mut ops: Vec<(u32, PauliOp)> = ops.into_iter().collect();
        ops.sort_by_key(|&(q, _)| q);
        if let Some(w) = ops.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(SimError::MalformedTerm(format!(
                "qubit {} appears more than once",
                w[0].0
            )));
        }
        ops.retain(|&(_, op)| op != PauliOp::I);
        Ok(Self { ops })
    }

    /// Factors already sorted by distinct qubit, none of them `I`.
    pub(crate) fn from_sorted(ops: Vec<(u32, PauliOp)>) -> Self {
        debug_assert!(ops.windows(2).all(|w| w[0].0 < w[1].0));
        Self { ops }
    }

    /// Non-identity factors, ascending by qubit.
    pub fn ops(&self) -> &[(u32, PauliOp)] {
        &self.ops
    }

    /// Number of non-identity factors.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True for the identity string.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Factor on `qubit`, `I` if untouched.
    pub fn op(&self, qubit: u32) -> PauliOp {
        self.ops
            .binary_search_by_key(&qubit, |&(q, _)| q)
            .map_or(PauliOp::I, |k| self.ops[k].1)
    }

    fn adjoint_ops(&self) -> Vec<(u32, PauliOp)> {
        self.ops.iter().map(|&(q, op)| (q, op.adjoint())).collect()
    }

    fn key(&self) -> Cow<'_, [(u32, PauliOp)]> {
        if self.is_self_adjoint() {
            return Cow::Borrowed(&self.ops);
        }
        let adjoint = self.adjoint_ops();
        if adjoint < self.ops {
            Cow::Owned(adjoint)
        } else {
            Cow::Borrowed(&self.ops)
        }
    }

    /// Image of basis state `index` as `(index', amplitude)`, or `None` when
    /// the string annihilates it.
    pub fn apply_to_basis(&self, index: usize) -> Option<(usize, Complex64)> {
        let mut image = index;
        let mut amplitude = ONE;
        for &(q, op) in &self.ops {
            let bit = (index >> q) & 1;
            let (row, value) = op.column(bit)?;
            amplitude *= value;
            image = (image & !(1 << q)) | (row << q);
        }
        Some((image, amplitude))
    }

    /// Dense matrix of the string itself (not its Hermitian completion) over
    /// qubits `0..n_qubits`, at most [`DEFAULT_MAX_DENSE_QUBITS`] of them.
    pub fn matrix(&self, n_qubits: u32) -> SimResult<DMatrix<Complex64>> {
        if n_qubits > DEFAULT_MAX_DENSE_QUBITS {
            return Err(SimError::TooManyQubits {
                n_qubits,
                max_qubits: DEFAULT_MAX_DENSE_QUBITS,
            });
        }
        self.check_range(n_qubits)?;
        let dim = 1usize << n_qubits;
        let mut m = DMatrix::zeros(dim, dim);
        for k in 0..dim {
            if let Some((row, amplitude)) = self.apply_to_basis(k) {
                m[(row, k)] = amplitude;
            }
        }
        Ok(m)
    }

    pub(crate) fn check_range(&self, n_qubits: u32) -> SimResult<()> {
        match self.ops.last() {
            Some(&(q, _)) if q >= n_qubits => Err(SimError::QubitOutOfRange {
                qubit: q,
                n_qubits,
            }),
            _ => Ok(()),
        }
    }
}

impl PartialEq for PauliTerm {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PauliTerm {}

impl Hash for PauliTerm {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Term for PauliTerm {
    fn indices(&self) -> Vec<u32> {
        self.ops.iter().map(|&(q, _)| q).collect()
    }

    fn remap(&self, map: impl Fn(u32) -> u32) -> Self {
        Self {
            ops: self.ops.iter().map(|&(q, op)| (map(q), op)).collect(),
        }
    }

    fn identity() -> Self {
        Self::default()
    }

    fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }

    fn compose(&self, other: &Self) -> (Complex64, Self) {
        let mut phase = ONE;
        let mut ops = Vec::with_capacity(self.ops.len() + other.ops.len());
        let (mut i, mut j) = (0, 0);
        while i < self.ops.len() || j < other.ops.len() {
            match (self.ops.get(i), other.ops.get(j)) {
                (Some(&(qa, a)), Some(&(qb, b))) if qa == qb => {
                    let (p, op) = a.compose(b);
                    phase *= p;
                    if op != PauliOp::I {
                        ops.push((qa, op));
                    }
                    i += 1;
                    j += 1;
                }
                (Some(&left), Some(&(qb, _))) if left.0 < qb => {
                    ops.push(left);
                    i += 1;
                }
                (Some(&left), None) => {
                    ops.push(left);
                    i += 1;
                }
                (_, Some(&right)) => {
                    ops.push(right);
                    j += 1;
                }
                (None, None) => break,
            }
        }
        (phase, Self { ops })
    }

    fn adjoint(&self) -> (Complex64, Self) {
        (
            ONE,
            Self {
                ops: self.adjoint_ops(),
            },
        )
    }

    fn same_orientation(&self, other: &Self) -> bool {
        self.ops == other.ops
    }

    fn is_self_adjoint(&self) -> bool {
        !self.ops.iter().any(|&(_, op)| op.is_ladder())
    }

    fn max_qubit(&self) -> Option<u32> {
        self.ops.last().map(|&(q, _)| q)
    }

    fn to_pauli(&self) -> (Complex64, PauliTerm) {
        (ONE, self.clone())
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
        let plan = RotationPlan::from_pauli(self, register, weight)?;
        plan.append_rotation(circuit)
    }
}

impl fmt::Display for PauliTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ops.is_empty() {
            return write!(f, "I");
        }
        for (k, &(q, op)) in self.ops.iter().enumerate() {
            if k > 0 {
                write!(f, "*")?;
            }
            write!(f, "{}{q}", op.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for PauliTerm {
    type Err = SimError;

    /// Parse `X0*Z1*A2`. Projectors are written `P0_3` / `P1_3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == "I" || s == "1" {
            return Ok(Self::default());
        }
        let factors = s
            .split('*')
            .map(|token| parse_factor(token.trim()))
            .collect::<SimResult<Vec<_>>>()?;
        Self::from_ops(factors)
    }
}

fn parse_factor(token: &str) -> SimResult<(u32, PauliOp)> {
    let malformed = || SimError::MalformedTerm(format!("cannot parse factor '{token}'"));
    let (op, index) = if let Some(rest) = token.strip_prefix("P0_") {
        (PauliOp::P0, rest)
    } else if let Some(rest) = token.strip_prefix("P1_") {
        (PauliOp::P1, rest)
    } else {
        let mut chars = token.chars();
        let op = match chars.next() {
            Some('I') => PauliOp::I,
            Some('X') => PauliOp::X,
            Some('Y') => PauliOp::Y,
            Some('Z') => PauliOp::Z,
            Some('A') => PauliOp::A,
            Some('C') => PauliOp::C,
            _ => return Err(malformed()),
        };
        (op, chars.as_str())
    };
    let qubit = index.parse::<u32>().map_err(|_| malformed())?;
    Ok((qubit, op))
}

// ---------------------------------------------------------------------------
// Single-factor Hamiltonians
// ---------------------------------------------------------------------------

fn factor(qubit: u32, op: PauliOp) -> Hamiltonian<PauliTerm> {
    Hamiltonian::from_term(PauliTerm::single(qubit, op), 1.0)
}

/// `X` on `qubit`.
pub fn x(qubit: u32) -> Hamiltonian<PauliTerm> {
    factor(qubit, PauliOp::X)
}

/// `Y` on `qubit`.
pub fn y(qubit: u32) -> Hamiltonian<PauliTerm> {
    factor(qubit, PauliOp::Y)
}

/// `Z` on `qubit`.
pub fn z(qubit: u32) -> Hamiltonian<PauliTerm> {
    factor(qubit, PauliOp::Z)
}

/// Lowering operator `|0⟩⟨1|` on `qubit`.
pub fn a(qubit: u32) -> Hamiltonian<PauliTerm> {
    factor(qubit, PauliOp::A)
}

/// Raising operator `|1⟩⟨0|` on `qubit`.
pub fn c(qubit: u32) -> Hamiltonian<PauliTerm> {
    factor(qubit, PauliOp::C)
}

/// Projector `|0⟩⟨0|` on `qubit`.
pub fn p0(qubit: u32) -> Hamiltonian<PauliTerm> {
    factor(qubit, PauliOp::P0)
}

/// Projector `|1⟩⟨1|` on `qubit`.
pub fn p1(qubit: u32) -> Hamiltonian<PauliTerm> {
    factor(qubit, PauliOp::P1)
}
