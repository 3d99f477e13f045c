//! Ladder Local Statevector Simulator
//!
//! This crate provides a local quantum simulator for testing and
//! validating synthesized circuits. It uses statevector simulation, which
//! gives exact results but is limited to roughly twenty qubits.
//!
//! # Features
//!
//! - **Exact or sampled**: [`ladder_hal::SampleConfig`] selects exact
//!   probabilities or seeded finite-shot sampling
//! - **All Standard Gates**: every gate of `ladder-ir`, including
//!   multi-controlled X with open controls
//! - **Unitary extraction**: [`StatevectorSimulator::unitary`] restricts a
//!   circuit to a chosen qubit list, for comparison against an exact
//!   propagator
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```
//! use ladder_adapter_sim::StatevectorSimulator;
//! use ladder_hal::{SampleConfig, Sampler};
//! use ladder_ir::Circuit;
//!
//! let sim = StatevectorSimulator::new();
//! let circuit = Circuit::ghz(2).unwrap();
//! let dist = sim.sample(&circuit, &SampleConfig::exact()).unwrap();
//!
//! assert!((dist.probability(0b00) - 0.5).abs() < 1e-12);
//! assert!((dist.probability(0b11) - 0.5).abs() < 1e-12);
//! ```

mod simulator;
mod statevector;

pub use simulator::{DEFAULT_MAX_QUBITS, StatevectorSimulator};
pub use statevector::Statevector;
