//! Dense-matrix spectral estimates.
//!
//! These build the full `2^n x 2^n` matrix of a Hamiltonian and are meant
//! for validation on small systems: exact ground-state energies and the
//! exact propagator `exp(i·H·t)` that product formulas are compared against.

use std::collections::BTreeSet;

use nalgebra::linalg::SymmetricEigen;
use nalgebra::DMatrix;
use num_complex::Complex64;
use tracing::{debug, warn};

use crate::error::{SimError, SimResult};
use crate::hamiltonian::{Hamiltonian, PauliHamiltonian};
use crate::operators::{PauliTerm, Term};

/// Largest register [`Hamiltonian::to_matrix`] and
/// [`Hamiltonian::ground_state_energy`] build a dense matrix for.
pub const DEFAULT_MAX_DENSE_QUBITS: u32 = 12;

impl<T: Term> Hamiltonian<T> {
    /// Dense Hermitian matrix over qubits `0..n_qubits`.
    ///
    /// Bit `q` of a basis index is qubit `q`.
    pub fn to_matrix(&self, n_qubits: u32) -> SimResult<DMatrix<Complex64>> {
        if n_qubits > DEFAULT_MAX_DENSE_QUBITS {
            return Err(SimError::TooManyQubits {
                n_qubits,
                max_qubits: DEFAULT_MAX_DENSE_QUBITS,
            });
        }
        dense_matrix(&self.to_pauli(), n_qubits)
    }

    /// Smallest eigenvalue, with the default size limit.
    pub fn ground_state_energy(&self) -> SimResult<f64> {
        self.ground_state_energy_with_limit(DEFAULT_MAX_DENSE_QUBITS)
    }

    /// Smallest eigenvalue of the Hamiltonian restricted to the indices it
    /// references.
    ///
    /// Unused indices are dropped before the qubit image is taken, so the
    /// matrix is `2^q x 2^q` for `q` distinct qubits (or fermionic modes).
    /// Fermionic modes `{0, 20}` cost a `4 x 4` matrix: relabelling modes in
    /// order keeps the anticommutation relations and hence the spectrum.
    pub fn ground_state_energy_with_limit(&self, max_qubits: u32) -> SimResult<f64> {
        let used: BTreeSet<u32> = self.iter().flat_map(|(t, _)| t.indices()).collect();
        let n_qubits = u32::try_from(used.len()).unwrap_or(u32::MAX);
        if n_qubits > max_qubits {
            return Err(SimError::TooManyQubits {
                n_qubits,
                max_qubits,
            });
        }
        let index: Vec<u32> = used.into_iter().collect();
        let compressed: Hamiltonian<T> = self
            .iter()
            .map(|(t, c)| (t.remap(|q| compressed_index(&index, q)), c))
            .collect();

        let matrix = dense_matrix(&compressed.to_pauli(), n_qubits)?;
        let eigen = hermitian_eigen(matrix)?;
        let energy = eigen
            .eigenvalues
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        debug!(n_qubits, energy, "computed ground-state energy");
        Ok(energy)
    }

    /// Exact propagator `exp(i·H·t)` over qubits `0..n_qubits`.
    pub fn evolution_matrix(&self, t: f64, n_qubits: u32) -> SimResult<DMatrix<Complex64>> {
        let generator = self.to_matrix(n_qubits)? * Complex64::new(0.0, t);
        Ok(generator.exp())
    }
}

/// Position of `q` among the sorted used indices.
fn compressed_index(index: &[u32], q: u32) -> u32 {
    u32::try_from(index.partition_point(|&u| u < q)).unwrap_or(u32::MAX)
}

fn dense_matrix(h: &PauliHamiltonian, n_qubits: u32) -> SimResult<DMatrix<Complex64>> {
    if n_qubits + 2 >= DEFAULT_MAX_DENSE_QUBITS {
        warn!(n_qubits, "building a dense Hamiltonian matrix close to the size limit");
    }
    let dim = 1usize << n_qubits;
    let mut m = DMatrix::<Complex64>::zeros(dim, dim);
    for (term, coeff) in h.iter() {
        term.check_range(n_qubits)?;
        add_entry(&mut m, term, coeff);
    }
    Ok(m)
}

/// Add the Hermitian operator an entry `(term, coeff)` denotes.
fn add_entry(m: &mut DMatrix<Complex64>, term: &PauliTerm, coeff: Complex64) {
    // c·T + c̄·T† for ladder strings, Hermitian part of c·T otherwise.
    let weight = if term.is_self_adjoint() { 0.5 } else { 1.0 };
    for k in 0..m.ncols() {
        if let Some((row, amplitude)) = term.apply_to_basis(k) {
            let value = coeff * amplitude * weight;
            m[(row, k)] += value;
            m[(k, row)] += value.conj();
        }
    }
}

fn hermitian_eigen(m: DMatrix<Complex64>) -> SimResult<SymmetricEigen<Complex64, nalgebra::Dyn>> {
    SymmetricEigen::try_new(m, f64::EPSILON, 0).ok_or(SimError::EigenSolver)
}
