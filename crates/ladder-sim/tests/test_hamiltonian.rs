//! Tests for Hamiltonian arithmetic and dense spectral estimates.

use nalgebra::DMatrix;
use num_complex::Complex64;

use ladder_sim::fermionic;
use ladder_sim::pauli::{a, c, p0, p1, x, y, z};
use ladder_sim::{
    FermionicHamiltonian, FermionicTerm, Hamiltonian, PauliHamiltonian, PauliOp, PauliTerm,
    SimError, Term,
};

fn hydrogen() -> PauliHamiltonian {
    -1.05237325 + 0.39793742 * z(0) - 0.39793742 * z(1) - 0.0112801 * z(0) * z(1)
        + 0.1809312 * x(0) * x(1)
}

fn assert_same_matrix<T: Term, U: Term>(lhs: &Hamiltonian<T>, rhs: &Hamiltonian<U>, n: u32) {
    let diff = lhs.to_matrix(n).unwrap() - rhs.to_matrix(n).unwrap();
    assert!(diff.norm() < 1e-12, "{lhs} != {rhs}");
}

// ---------------------------------------------------------------------------
// PauliTerm
// ---------------------------------------------------------------------------

#[test]
fn pauli_term_sorted_by_qubit() {
    let t = PauliTerm::from_ops([(3, PauliOp::Z), (0, PauliOp::A)]).unwrap();
    assert_eq!(t.ops(), &[(0, PauliOp::A), (3, PauliOp::Z)]);
    assert_eq!(t.to_string(), "A0*Z3");
    assert_eq!(t.max_qubit(), Some(3));
}

#[test]
fn pauli_term_rejects_repeated_qubit() {
    let err = PauliTerm::from_ops([(1, PauliOp::X), (1, PauliOp::Z)]).unwrap_err();
    assert!(matches!(err, SimError::MalformedTerm(_)));
}

#[test]
fn pauli_term_equals_its_adjoint() {
    let t: PauliTerm = "A0*C2*Y3".parse().unwrap();
    let (phase, adjoint) = t.adjoint();
    assert_eq!(phase, Complex64::new(1.0, 0.0));
    assert_eq!(adjoint.to_string(), "C0*A2*Y3");
    assert_eq!(t, adjoint);
    assert!(!t.same_orientation(&adjoint));
}

#[test]
fn pauli_term_parse_round_trips_display() {
    for s in ["I", "X0*Y1*Z2", "A0*C1*P0_2*P1_5"] {
        let t: PauliTerm = s.parse().unwrap();
        assert_eq!(t.to_string(), s);
    }
    assert!("Q0".parse::<PauliTerm>().is_err());
}

// ---------------------------------------------------------------------------
// Hamiltonian accumulation
// ---------------------------------------------------------------------------

#[test]
fn conjugate_terms_share_one_entry() {
    let mut h = PauliHamiltonian::from_term(PauliTerm::single(0, PauliOp::A), 1.0);
    h.add_term(PauliTerm::single(0, PauliOp::C), 2.0);
    assert_eq!(h.n_terms(), 1);
    assert_eq!(h.coefficient(&PauliTerm::single(0, PauliOp::A)), Some(Complex64::new(3.0, 0.0)));
    assert_same_matrix(&h, &(3.0 * x(0)), 1);
}

#[test]
fn complex_coefficient_read_back_in_either_orientation() {
    let mut h = PauliHamiltonian::new();
    h.add_term(PauliTerm::single(0, PauliOp::A), Complex64::new(0.5, 0.25));
    let c0 = PauliTerm::single(0, PauliOp::C);
    assert_eq!(h.coefficient(&c0), Some(Complex64::new(0.5, -0.25)));
}

#[test]
fn cancelling_terms_leave_zero_entry_until_pruned() {
    let mut h = z(0) * z(1) + x(2);
    h -= z(0) * z(1);
    assert_eq!(h.n_terms(), 2);
    h.prune(1e-12);
    assert_eq!(h.n_terms(), 1);
    assert_eq!(h.to_string(), "1*X2");
}

#[test]
fn products_multiply_coefficients() {
    let h = (2.0 * x(0)) * (0.5 * y(0));
    // XY = iZ
    assert_eq!(
        h.coefficient(&PauliTerm::single(0, PauliOp::Z)),
        Some(Complex64::new(0.0, 1.0))
    );
}

#[test]
fn nilpotent_products_vanish() {
    let h = a(0) * a(0);
    assert!(h.is_empty());
    // c2 c2 survives as a term but has no qubit image.
    let f = fermionic::c(2) * fermionic::c(2);
    assert_eq!(f.n_terms(), 1);
    assert!(f.to_pauli().is_empty());
}

#[test]
fn projector_products() {
    assert!((p0(0) * p1(0)).is_empty());
    assert_same_matrix(&(c(0) * a(0)), &p1(0), 1);
    assert_same_matrix(&(p0(0) + p1(0)), &(1.0 + PauliHamiltonian::new()), 1);
}

#[test]
fn lambda_and_constant() {
    let h = hydrogen();
    assert!((h.constant() + 1.05237325).abs() < 1e-15);
    let expected = 0.39793742 * 2.0 + 0.0112801 + 0.1809312;
    assert!((h.lambda() - expected).abs() < 1e-12);
    assert_eq!(h.min_qubits(), 2);
}

#[test]
fn display_uses_signs() {
    let h = -1.5 + 0.5 * z(0) - 0.25 * x(1);
    assert_eq!(h.to_string(), "-1.5 + 0.5*Z0 - 0.25*X1");
    assert_eq!(PauliHamiltonian::new().to_string(), "0");
}

#[test]
fn dagger_denotes_same_operator() {
    let h = Complex64::new(0.3, 0.7) * a(0) * c(1) + Complex64::new(0.0, 1.0) * c(2)
        - 0.4 * y(0) * z(2)
        + 0.2;
    let d = h.dagger();
    assert_eq!(d.n_terms(), h.n_terms());
    assert_same_matrix(&h, &d, 3);
    assert_same_matrix(&h, &d.dagger(), 3);
}

#[test]
fn to_matrix_is_hermitian() {
    let h = Complex64::new(0.3, -0.1) * a(0) * z(1) * c(2) + 0.5 * y(1) + p1(2);
    let m = h.to_matrix(3).unwrap();
    assert!((m.adjoint() - &m).norm() < 1e-12);
}

#[test]
fn to_matrix_rejects_out_of_range_terms() {
    let err = z(4).to_matrix(2).unwrap_err();
    assert!(matches!(err, SimError::QubitOutOfRange { qubit: 4, .. }));
}

// ---------------------------------------------------------------------------
// Fermionic Hamiltonians
// ---------------------------------------------------------------------------

#[test]
fn fermionic_hermitian_pair_merges() {
    use fermionic::{a, c};
    let h = c(0) * a(1) + c(1) * a(0);
    assert_eq!(h.n_terms(), 1);
    assert_same_matrix(&h, &(2.0 * c(0) * a(1)), 2);
}

#[test]
fn fermionic_number_operator() {
    use fermionic::{a, c};
    let n1 = c(1) * a(1);
    let m = n1.to_matrix(2).unwrap();
    let expected = DMatrix::from_diagonal(&nalgebra::DVector::from_vec(vec![
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(1.0, 0.0),
        Complex64::new(1.0, 0.0),
    ]));
    assert!((m - expected).norm() < 1e-12);
    assert_same_matrix(&n1, &p1(1), 2);
}

#[test]
fn fermionic_anticommutation() {
    use fermionic::{a, c};
    // {a_0, c_0} = 1
    let h = c(0) * a(0) + a(0) * c(0);
    assert_same_matrix(&h, &(1.0 + FermionicHamiltonian::new()), 1);
    // {a_0, c_1} = 0
    let mut h = a(0) * c(1) + c(1) * a(0);
    h.prune(1e-12);
    assert!(h.is_empty());
}

#[test]
fn fermionic_terms_sort_with_sign() {
    let (sign, term) = FermionicTerm::canonical([(2, true), (0, false)]);
    assert_eq!(sign, -1.0);
    assert_eq!(term.to_string(), "a0*c2");
    assert_eq!(term, "c2*a0".parse().unwrap());
}

#[test]
fn fermionic_to_pauli_matches_jordan_wigner() {
    let h = fermionic::c(0) * fermionic::a(2);
    // c0 a2 = C0 Z1 A2 under Jordan-Wigner
    assert_same_matrix(&h, &(c(0) * z(1) * a(2)), 3);
    let pauli = h.to_pauli();
    let expected: PauliTerm = "C0*Z1*A2".parse().unwrap();
    assert_eq!(pauli.coefficient(&expected), Some(Complex64::new(1.0, 0.0)));
}

// ---------------------------------------------------------------------------
// Ground state
// ---------------------------------------------------------------------------

#[test]
fn hydrogen_ground_state_energy() {
    let e0 = hydrogen().ground_state_energy().unwrap();
    assert!((e0 - (-1.857275029288228)).abs() < 1e-6);
}

#[test]
fn ground_state_of_fermionic_hopping() {
    use fermionic::{a, c};
    // Single particle on two sites: eigenvalues ±1 plus the empty and full states at 0.
    let h = c(0) * a(1);
    let e0 = h.ground_state_energy().unwrap();
    assert!((e0 + 1.0).abs() < 1e-9);
}

#[test]
fn fermionic_ground_state_sized_by_distinct_modes() {
    use fermionic::{a, c};
    let near = c(0) * a(1) + 0.5 * c(1) * a(1);
    let far = c(0) * a(20) + 0.5 * c(20) * a(20);
    let e_near = near.ground_state_energy().unwrap();
    let e_far = far.ground_state_energy_with_limit(2).unwrap();
    assert!((e_near - e_far).abs() < 1e-9);
    assert!((e_far - (0.25 - 1.0625f64.sqrt())).abs() < 1e-9);
}

#[test]
fn ground_state_size_limit() {
    let h: PauliHamiltonian = (0..6).map(z).sum();
    assert!(matches!(
        h.ground_state_energy_with_limit(5),
        Err(SimError::TooManyQubits { n_qubits: 6, max_qubits: 5 })
    ));
}
