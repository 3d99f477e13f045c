//! Property-based tests for term algebra.
//!
//! Products, adjoints and the Jordan-Wigner image are checked against the
//! dense operators they stand for.

use std::collections::BTreeMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use num_complex::Complex64;
use proptest::prelude::*;

use ladder_sim::{FermionicTerm, PauliOp, PauliTerm, Term};

const N_QUBITS: u32 = 3;

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Random Pauli/ladder string on qubits `0..N_QUBITS`.
fn arb_pauli_term() -> impl Strategy<Value = PauliTerm> {
    prop::collection::vec(
        prop::sample::select(PauliOp::ALL.to_vec()),
        N_QUBITS as usize,
    )
    .prop_map(|ops| PauliTerm::from_ops((0..N_QUBITS).zip(ops)).unwrap())
}

/// Random ladder product, modes may repeat.
fn arb_fermionic_ladders() -> impl Strategy<Value = Vec<(u32, bool)>> {
    prop::collection::vec((0_u32..5, any::<bool>()), 0..=5)
}

/// Random ladder product on distinct modes.
fn arb_distinct_term() -> impl Strategy<Value = FermionicTerm> {
    prop::collection::btree_map(0_u32..6, any::<bool>(), 1..=4)
        .prop_map(|ladders: BTreeMap<u32, bool>| FermionicTerm::new(ladders))
}

proptest! {
    /// Pauli products agree with the matrix product of their factors.
    #[test]
    fn test_pauli_compose_matches_matrix_product(p in arb_pauli_term(), q in arb_pauli_term()) {
        let (phase, product) = p.compose(&q);
        let lhs = p.matrix(N_QUBITS).unwrap() * q.matrix(N_QUBITS).unwrap();
        let rhs = product.matrix(N_QUBITS).unwrap() * phase;
        prop_assert!((lhs - rhs).norm() < 1e-12);
    }

    /// `(p·q)·r == p·(q·r)` including the phase.
    #[test]
    fn test_pauli_compose_is_associative(
        p in arb_pauli_term(),
        q in arb_pauli_term(),
        r in arb_pauli_term(),
    ) {
        let (s1, pq) = p.compose(&q);
        let (s2, left) = pq.compose(&r);
        let (s3, qr) = q.compose(&r);
        let (s4, right) = p.compose(&qr);
        let (left_phase, right_phase) = (s1 * s2, s3 * s4);
        prop_assert!((left_phase - right_phase).norm() < 1e-12);
        if left_phase.norm() > 0.0 {
            prop_assert_eq!(left.ops(), right.ops());
        }
    }

    /// A string and its adjoint are one entry.
    #[test]
    fn test_pauli_adjoint_shares_key(p in arb_pauli_term()) {
        let (phase, adjoint) = p.adjoint();
        prop_assert_eq!(phase, Complex64::new(1.0, 0.0));
        prop_assert_eq!(&p, &adjoint);
        prop_assert_eq!(hash_of(&p), hash_of(&adjoint));
        let m = p.matrix(N_QUBITS).unwrap();
        prop_assert!((m.adjoint() - adjoint.matrix(N_QUBITS).unwrap()).norm() < 1e-12);
    }

    /// Canonicalizing a canonical term is a no-op.
    #[test]
    fn test_fermionic_canonical_is_idempotent(ladders in arb_fermionic_ladders()) {
        let (_, term) = FermionicTerm::canonical(ladders);
        let (sign, again) = FermionicTerm::canonical(term.ladders().iter().copied());
        prop_assert_eq!(sign, 1.0);
        prop_assert_eq!(again.ladders(), term.ladders());
    }

    /// Fermionic products are associative, sign included.
    #[test]
    fn test_fermionic_compose_is_associative(
        a in arb_fermionic_ladders(),
        b in arb_fermionic_ladders(),
        c in arb_fermionic_ladders(),
    ) {
        let (a, b, c) = (FermionicTerm::new(a), FermionicTerm::new(b), FermionicTerm::new(c));
        let (s1, ab) = a.compose(&b);
        let (s2, left) = ab.compose(&c);
        let (s3, bc) = b.compose(&c);
        let (s4, right) = a.compose(&bc);
        prop_assert_eq!(s1 * s2, s3 * s4);
        prop_assert_eq!(left.ladders(), right.ladders());
    }

    /// A term equals its Hermitian conjugate and hashes alike.
    #[test]
    fn test_fermionic_dagger_shares_key(ladders in arb_fermionic_ladders()) {
        let term = FermionicTerm::new(ladders);
        let (sign, dagger) = term.dagger();
        prop_assert!(sign == 1.0 || sign == -1.0);
        prop_assert_eq!(&term, &dagger);
        prop_assert_eq!(hash_of(&term), hash_of(&dagger));
        let (_, back) = dagger.dagger();
        prop_assert_eq!(back.ladders(), term.ladders());
    }

    /// The Jordan-Wigner image of a distinct-mode product is its ladder
    /// string with `Z` on the phase-flipping modes, scaled by the
    /// Jordan-Wigner sign.
    #[test]
    fn test_jordan_wigner_sign_matches_pauli_image(term in arb_distinct_term()) {
        let (phase, image) = term.to_pauli();
        prop_assert_eq!(phase, Complex64::new(term.jordan_wigner_sign(), 0.0));

        let expected = PauliTerm::from_ops(
            term.ladders()
                .iter()
                .map(|&(m, creator)| (m, if creator { PauliOp::C } else { PauliOp::A }))
                .chain(term.phase_flipping_modes().into_iter().map(|m| (m, PauliOp::Z))),
        )
        .unwrap();
        prop_assert_eq!(image.ops(), expected.ops());
    }

    /// The adjoint of a Jordan-Wigner image is the image of the adjoint.
    #[test]
    fn test_jordan_wigner_commutes_with_dagger(ladders in arb_fermionic_ladders()) {
        let term = FermionicTerm::new(ladders);
        let n = 5;
        let (phase, image) = term.to_pauli();
        let (sign, dagger) = term.dagger();
        let (dagger_phase, dagger_image) = dagger.to_pauli();
        let lhs = image.matrix(n).unwrap().adjoint() * phase.conj();
        let rhs = dagger_image.matrix(n).unwrap() * (dagger_phase * sign);
        prop_assert!((lhs - rhs).norm() < 1e-12);
    }
}
