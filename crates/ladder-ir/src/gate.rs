//! Quantum gate types.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4};

/// A 2x2 complex matrix, row-major.
pub type Matrix2 = [[Complex64; 2]; 2];

/// How a multi-controlled X should be lowered by downstream passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum McxMethod {
    /// Let the lowering pass choose.
    #[default]
    Auto,
    /// Gray-code decomposition into controlled phase rotations.
    Gray,
    /// Gray-code decomposition correct only up to relative phases.
    ///
    /// Only valid when the gate is uncomputed by its own inverse, as inside
    /// [`Circuit::conjugate`](crate::Circuit::conjugate).
    GrayPhaseTolerant,
}

impl McxMethod {
    /// Short name used when printing circuits.
    pub fn name(self) -> &'static str {
        match self {
            McxMethod::Auto => "auto",
            McxMethod::Gray => "gray",
            McxMethod::GrayPhaseTolerant => "gray_pt",
        }
    }
}

/// Standard gates with known semantics.
///
/// Angles follow the usual conventions: `Rz(θ) = exp(-iθZ/2)`,
/// `P(θ) = diag(1, e^{iθ})`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// SWAP gate.
    Swap,
    /// Controlled rotation around X.
    CRx(f64),
    /// Controlled rotation around Y.
    CRy(f64),
    /// Controlled rotation around Z.
    CRz(f64),
    /// Controlled phase gate.
    CP(f64),

    // Multi-qubit gates
    /// Toffoli gate (CCX).
    CCX,
    /// Multi-controlled X.
    ///
    /// Operands are the controls in order followed by the target. The
    /// target flips when control `k` is in state `ctrl_state[k]`
    /// for every `k`.
    Mcx {
        /// Required value of each control qubit.
        ctrl_state: Vec<bool>,
        /// Lowering strategy.
        method: McxMethod,
    },
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::SX => "sx",
            StandardGate::SXdg => "sxdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::CH => "ch",
            StandardGate::Swap => "swap",
            StandardGate::CRx(_) => "crx",
            StandardGate::CRy(_) => "cry",
            StandardGate::CRz(_) => "crz",
            StandardGate::CP(_) => "cp",
            StandardGate::CCX => "ccx",
            StandardGate::Mcx { .. } => "mcx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::SX
            | StandardGate::SXdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::CH
            | StandardGate::Swap
            | StandardGate::CRx(_)
            | StandardGate::CRy(_)
            | StandardGate::CRz(_)
            | StandardGate::CP(_) => 2,

            StandardGate::CCX => 3,

            #[allow(clippy::cast_possible_truncation)]
            StandardGate::Mcx { ctrl_state, .. } => ctrl_state.len() as u32 + 1,
        }
    }

    /// Get the rotation angle, if this gate has one.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(t)
            | StandardGate::Ry(t)
            | StandardGate::Rz(t)
            | StandardGate::P(t)
            | StandardGate::CRx(t)
            | StandardGate::CRy(t)
            | StandardGate::CRz(t)
            | StandardGate::CP(t) => Some(*t),
            _ => None,
        }
    }

    /// The inverse gate.
    pub fn inverse(&self) -> Self {
        match self {
            StandardGate::S => StandardGate::Sdg,
            StandardGate::Sdg => StandardGate::S,
            StandardGate::T => StandardGate::Tdg,
            StandardGate::Tdg => StandardGate::T,
            StandardGate::SX => StandardGate::SXdg,
            StandardGate::SXdg => StandardGate::SX,
            StandardGate::Rx(t) => StandardGate::Rx(-t),
            StandardGate::Ry(t) => StandardGate::Ry(-t),
            StandardGate::Rz(t) => StandardGate::Rz(-t),
            StandardGate::P(t) => StandardGate::P(-t),
            StandardGate::CRx(t) => StandardGate::CRx(-t),
            StandardGate::CRy(t) => StandardGate::CRy(-t),
            StandardGate::CRz(t) => StandardGate::CRz(-t),
            StandardGate::CP(t) => StandardGate::CP(-t),
            // Self-inverse.
            other => other.clone(),
        }
    }

    /// The same gate with one extra control (in state `|1⟩`) prepended to
    /// its operands, or `None` if no standard gate expresses it.
    pub fn controlled(&self) -> Option<Self> {
        let gate = match self {
            StandardGate::X => StandardGate::CX,
            StandardGate::Y => StandardGate::CY,
            StandardGate::Z => StandardGate::CZ,
            StandardGate::H => StandardGate::CH,
            StandardGate::S => StandardGate::CP(FRAC_PI_2),
            StandardGate::Sdg => StandardGate::CP(-FRAC_PI_2),
            StandardGate::T => StandardGate::CP(FRAC_PI_4),
            StandardGate::Tdg => StandardGate::CP(-FRAC_PI_4),
            StandardGate::Rx(t) => StandardGate::CRx(*t),
            StandardGate::Ry(t) => StandardGate::CRy(*t),
            StandardGate::Rz(t) => StandardGate::CRz(*t),
            StandardGate::P(t) => StandardGate::CP(*t),
            StandardGate::CX => StandardGate::CCX,
            StandardGate::CCX => StandardGate::Mcx {
                ctrl_state: vec![true; 3],
                method: McxMethod::Auto,
            },
            StandardGate::Mcx { ctrl_state, method } => {
                let mut ctrl = Vec::with_capacity(ctrl_state.len() + 1);
                ctrl.push(true);
                ctrl.extend_from_slice(ctrl_state);
                StandardGate::Mcx {
                    ctrl_state: ctrl,
                    method: *method,
                }
            }
            _ => return None,
        };
        Some(gate)
    }

    /// Split a (multi-)controlled gate into its control states and the
    /// single-qubit gate applied to the last operand.
    ///
    /// Single-qubit gates return an empty control list. Returns `None` for
    /// gates that are not of this shape (SWAP).
    pub fn split_controls(&self) -> Option<(Vec<bool>, StandardGate)> {
        let split = match self {
            StandardGate::CX => (vec![true], StandardGate::X),
            StandardGate::CY => (vec![true], StandardGate::Y),
            StandardGate::CZ => (vec![true], StandardGate::Z),
            StandardGate::CH => (vec![true], StandardGate::H),
            StandardGate::CRx(t) => (vec![true], StandardGate::Rx(*t)),
            StandardGate::CRy(t) => (vec![true], StandardGate::Ry(*t)),
            StandardGate::CRz(t) => (vec![true], StandardGate::Rz(*t)),
            StandardGate::CP(t) => (vec![true], StandardGate::P(*t)),
            StandardGate::CCX => (vec![true, true], StandardGate::X),
            StandardGate::Mcx { ctrl_state, .. } => (ctrl_state.clone(), StandardGate::X),
            StandardGate::Swap => return None,
            single => (vec![], single.clone()),
        };
        Some(split)
    }

    /// Unitary matrix of a single-qubit gate.
    pub fn matrix(&self) -> Option<Matrix2> {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        let m = match self {
            StandardGate::I => [[one, zero], [zero, one]],
            StandardGate::X => [[zero, one], [one, zero]],
            StandardGate::Y => [[zero, -i], [i, zero]],
            StandardGate::Z => [[one, zero], [zero, -one]],
            StandardGate::H => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            StandardGate::S => phase_matrix(FRAC_PI_2),
            StandardGate::Sdg => phase_matrix(-FRAC_PI_2),
            StandardGate::T => phase_matrix(FRAC_PI_4),
            StandardGate::Tdg => phase_matrix(-FRAC_PI_4),
            StandardGate::SX => {
                let a = Complex64::new(0.5, 0.5);
                let b = Complex64::new(0.5, -0.5);
                [[a, b], [b, a]]
            }
            StandardGate::SXdg => {
                let a = Complex64::new(0.5, -0.5);
                let b = Complex64::new(0.5, 0.5);
                [[a, b], [b, a]]
            }
            StandardGate::Rx(t) => {
                let c = Complex64::new((t / 2.0).cos(), 0.0);
                let s = Complex64::new(0.0, -(t / 2.0).sin());
                [[c, s], [s, c]]
            }
            StandardGate::Ry(t) => {
                let c = Complex64::new((t / 2.0).cos(), 0.0);
                let s = Complex64::new((t / 2.0).sin(), 0.0);
                [[c, -s], [s, c]]
            }
            StandardGate::Rz(t) => [
                [Complex64::from_polar(1.0, -t / 2.0), zero],
                [zero, Complex64::from_polar(1.0, t / 2.0)],
            ],
            StandardGate::P(t) => phase_matrix(*t),
            _ => return None,
        };
        Some(m)
    }
}

fn phase_matrix(theta: f64) -> Matrix2 {
    let zero = Complex64::new(0.0, 0.0);
    [
        [Complex64::new(1.0, 0.0), zero],
        [zero, Complex64::from_polar(1.0, theta)],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn mat_mul(a: &Matrix2, b: &Matrix2) -> Matrix2 {
        let mut out = [[Complex64::new(0.0, 0.0); 2]; 2];
        for r in 0..2 {
            for c in 0..2 {
                out[r][c] = a[r][0] * b[0][c] + a[r][1] * b[1][c];
            }
        }
        out
    }

    fn is_identity(m: &Matrix2) -> bool {
        (m[0][0] - 1.0).norm() < 1e-12
            && (m[1][1] - 1.0).norm() < 1e-12
            && m[0][1].norm() < 1e-12
            && m[1][0].norm() < 1e-12
    }

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::H.num_qubits(), 1);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::CCX.num_qubits(), 3);
        let mcx = StandardGate::Mcx {
            ctrl_state: vec![true, false, true],
            method: McxMethod::Gray,
        };
        assert_eq!(mcx.num_qubits(), 4);
        assert_eq!(mcx.name(), "mcx");
        assert_eq!(StandardGate::Rz(0.3).angle(), Some(0.3));
        assert_eq!(StandardGate::H.angle(), None);
    }

    #[test]
    fn test_inverse_matrices() {
        let gates = [
            StandardGate::S,
            StandardGate::T,
            StandardGate::SX,
            StandardGate::Rx(0.7),
            StandardGate::Ry(-1.3),
            StandardGate::Rz(PI / 3.0),
            StandardGate::P(2.1),
            StandardGate::H,
        ];
        for gate in gates {
            let m = gate.matrix().unwrap();
            let inv = gate.inverse().matrix().unwrap();
            assert!(is_identity(&mat_mul(&m, &inv)), "{}", gate.name());
        }
    }

    #[test]
    fn test_controlled_chain() {
        let cx = StandardGate::X.controlled().unwrap();
        assert_eq!(cx, StandardGate::CX);
        let ccx = cx.controlled().unwrap();
        assert_eq!(ccx, StandardGate::CCX);
        let mcx = ccx.controlled().unwrap();
        assert_eq!(mcx.num_qubits(), 4);

        let open = StandardGate::Mcx {
            ctrl_state: vec![false],
            method: McxMethod::GrayPhaseTolerant,
        };
        match open.controlled().unwrap() {
            StandardGate::Mcx { ctrl_state, method } => {
                assert_eq!(ctrl_state, vec![true, false]);
                assert_eq!(method, McxMethod::GrayPhaseTolerant);
            }
            other => panic!("unexpected {other:?}"),
        }

        assert_eq!(StandardGate::Rz(0.5).controlled(), Some(StandardGate::CRz(0.5)));
        assert!(StandardGate::Swap.controlled().is_none());
    }

    #[test]
    fn test_split_controls() {
        let (ctrl, base) = StandardGate::CRz(0.25).split_controls().unwrap();
        assert_eq!(ctrl, vec![true]);
        assert_eq!(base, StandardGate::Rz(0.25));

        let (ctrl, base) = StandardGate::H.split_controls().unwrap();
        assert!(ctrl.is_empty());
        assert_eq!(base, StandardGate::H);

        assert!(StandardGate::Swap.split_controls().is_none());
    }

    #[test]
    fn test_sx_squares_to_x() {
        let sx = StandardGate::SX.matrix().unwrap();
        let x = StandardGate::X.matrix().unwrap();
        let sq = mat_mul(&sx, &sx);
        for r in 0..2 {
            for c in 0..2 {
                assert!((sq[r][c] - x[r][c]).norm() < 1e-12);
            }
        }
    }
}
