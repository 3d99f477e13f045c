//! `ladder-sim`: fermionic and Pauli term algebra with circuit synthesis.
//!
//! Builds Hamiltonians from fermionic ladder operators or qubit-level
//! Pauli/ladder strings and turns them into `ladder_ir::Circuit`s that
//! approximate `exp(i H t)` using:
//!
//! - **Trotter-Suzuki** product formulas (first- and second-order)
//! - **QDrift** randomised product formula (Campbell 2019)
//!
//! Every term is exponentiated directly, including non-Hermitian ladder
//! products, which are paired with their conjugate: an entry `(T, c)`
//! stands for `c·T + c̄·T†`. Small systems can be checked against the
//! dense spectrum ([`Hamiltonian::ground_state_energy`],
//! [`Hamiltonian::evolution_matrix`]) and estimated by sampling
//! ([`Hamiltonian::expectation_value`]).
//!
//! # Quick start
//!
//! ```rust
//! use ladder_sim::pauli::{x, z};
//! use ladder_sim::TrotterEvolution;
//!
//! // Reduced two-qubit hydrogen Hamiltonian.
//! let h = -1.05237325 + 0.39793742 * z(0) - 0.39793742 * z(1)
//!     - 0.0112801 * z(0) * z(1)
//!     + 0.1809312 * x(0) * x(1);
//!
//! let e0 = h.ground_state_energy().unwrap();
//! assert!((e0 + 1.857275).abs() < 1e-5);
//!
//! let evol = TrotterEvolution::new(h, 1.0 /* t */, 10 /* steps */);
//! let circuit = evol.first_order().unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! ```
//!
//! Fermionic terms go through the same scheduler:
//!
//! ```rust
//! use ladder_sim::fermionic::{a, c};
//!
//! let hopping = c(0) * a(2) + 0.5 * c(1) * a(1);
//! let circuit = hopping.trotterization(1.0, 4).first_order().unwrap();
//! assert_eq!(circuit.live_ancillas(), 0);
//! ```

pub mod config;
pub mod error;
pub mod hamiltonian;
pub mod measurement;
pub mod operators;
pub mod qdrift;
pub mod spectral;
pub mod synthesis;
pub mod trotter;

pub use config::{EvolutionConfig, TrotterOrder};
pub use error::{SimError, SimResult};
pub use hamiltonian::{FermionicHamiltonian, Hamiltonian, PauliHamiltonian};
pub use operators::{FermionicTerm, PauliOp, PauliTerm, Term, fermionic, pauli};
pub use qdrift::QDriftEvolution;
pub use spectral::DEFAULT_MAX_DENSE_QUBITS;
pub use synthesis::append_exp_term;
pub use trotter::TrotterEvolution;
