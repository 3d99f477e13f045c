//! Ladder Hardware Abstraction Layer
//!
//! This crate defines how the term algebra talks to whatever executes its
//! circuits. The only capability required is sampling: given a circuit and
//! a [`SampleConfig`], return a [`Distribution`] over basis outcomes.
//!
//! # Implementing a Custom Sampler
//!
//! ```
//! use ladder_hal::{Distribution, HalResult, SampleConfig, Sampler};
//! use ladder_ir::Circuit;
//!
//! /// Always reports the all-zero outcome.
//! struct ZeroSampler;
//!
//! impl Sampler for ZeroSampler {
//!     fn name(&self) -> &str {
//!         "zero"
//!     }
//!
//!     fn max_qubits(&self) -> usize {
//!         64
//!     }
//!
//!     fn sample(&self, circuit: &Circuit, _config: &SampleConfig) -> HalResult<Distribution> {
//!         Ok(Distribution::from_probabilities(circuit.num_qubits(), [(0, 1.0)]))
//!     }
//! }
//!
//! let dist = ZeroSampler
//!     .sample(&Circuit::with_size("c", 2), &SampleConfig::exact())
//!     .unwrap();
//! assert_eq!(dist.probability(0), 1.0);
//! ```

pub mod error;
pub mod result;
pub mod sampler;

pub use error::{HalError, HalResult};
pub use result::Distribution;
pub use sampler::{SampleConfig, Sampler};
