//! Ladder Circuit Intermediate Representation
//!
//! This crate provides the circuit data structures the term synthesizer
//! writes into. It is deliberately small: a flat instruction list with a
//! global phase, plus the scoped building blocks that term synthesis is
//! written in terms of.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] and [`Qubit`] (data or ancilla wires)
//! - **Gates**: [`StandardGate`], including the multi-controlled X with an
//!   explicit control state and [`McxMethod`]
//! - **Instructions**: [`Instruction`] combining gates with their operands
//! - **Circuit**: [`Circuit`] high-level builder API with
//!   [`Circuit::conjugate`], [`Circuit::control`] and
//!   [`Circuit::with_ancilla`]
//!
//! # Example: Conjugated Controlled Rotation
//!
//! ```rust
//! use ladder_ir::{Circuit, IrError, QubitId};
//!
//! let mut circuit = Circuit::with_size("demo", 2);
//! let (q0, q1) = (QubitId(0), QubitId(1));
//!
//! // H q1; CRz(q0 -> q1); H q1
//! circuit
//!     .conjugate(
//!         |c| {
//!             c.h(q1)?;
//!             Ok::<_, IrError>(())
//!         },
//!         |c| {
//!             c.control(q0, |c| {
//!                 c.rz(0.25, q1)?;
//!                 Ok::<_, IrError>(())
//!             })
//!         },
//!     )
//!     .unwrap();
//!
//! assert_eq!(circuit.gate_count(), 3);
//! assert_eq!(circuit.live_ancillas(), 0);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `S`, `Sdg`, `T`, `Tdg`, `SX`, `SXdg` | 1 | Clifford+T gates |
//! | `Rx`, `Ry`, `Rz`, `P` | 1 | Rotation and phase gates |
//! | `CX`, `CY`, `CZ`, `CH` | 2 | Controlled Pauli and Hadamard |
//! | `CRx`, `CRy`, `CRz`, `CP` | 2 | Controlled rotations |
//! | `Swap` | 2 | SWAP gate |
//! | `CCX` | 3 | Toffoli (CCNOT) gate |
//! | `Mcx` | n+1 | Multi-controlled X with control state |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Matrix2, McxMethod, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{Qubit, QubitId, QubitRole};
