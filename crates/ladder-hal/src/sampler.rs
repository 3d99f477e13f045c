//! Sampler trait and sampling configuration.
//!
//! A [`Sampler`] turns a prepared circuit into a probability distribution
//! over computational-basis outcomes. Everything is synchronous: the
//! expectation estimator calls it once per Hamiltonian entry and consumes
//! the result immediately.

use serde::{Deserialize, Serialize};

use ladder_ir::Circuit;

use crate::error::{HalError, HalResult};
use crate::result::Distribution;

/// Configuration for a single sampling call.
///
/// Every field has a default, so partial JSON such as `{"shots": 1000}`
/// deserializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Number of shots. `None` asks for exact probabilities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shots: Option<u32>,
    /// Seed for the shot sampler. `None` draws from entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SampleConfig {
    /// Exact probabilities, no shot noise.
    pub fn exact() -> Self {
        Self::default()
    }

    /// Finite-shot sampling.
    pub fn with_shots(shots: u32) -> Self {
        Self {
            shots: Some(shots),
            seed: None,
        }
    }

    /// Fix the sampler seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> HalResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// True when no shot noise is requested.
    pub fn is_exact(&self) -> bool {
        self.shots.is_none()
    }

    /// Check the configuration for values no sampler can honour.
    pub fn validate(&self) -> HalResult<()> {
        if self.shots == Some(0) {
            return Err(HalError::ZeroShots);
        }
        Ok(())
    }
}

/// Trait for circuit samplers.
///
/// Implementations measure every qubit of the circuit (ancillas included)
/// in the computational basis. Outcome bit `q` is the value of qubit `q`.
pub trait Sampler: Send + Sync {
    /// Get the name of this sampler.
    fn name(&self) -> &str;

    /// Largest circuit width this sampler accepts.
    fn max_qubits(&self) -> usize;

    /// Sample `circuit` according to `config`.
    fn sample(&self, circuit: &Circuit, config: &SampleConfig) -> HalResult<Distribution>;
}
