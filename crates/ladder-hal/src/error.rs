//! Sampler errors.

use thiserror::Error;

/// Errors raised while sampling a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// The circuit cannot be run as given.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// The circuit is wider than the sampler supports.
    #[error("Circuit has {num_qubits} qubits but the sampler supports at most {max_qubits}")]
    CircuitTooLarge {
        /// Width of the circuit, ancillas included.
        num_qubits: usize,
        /// Sampler limit.
        max_qubits: usize,
    },

    /// `Some(0)` shots.
    #[error("Shots must be positive, use None for exact sampling")]
    ZeroShots,

    /// Malformed sampling configuration.
    #[error("Invalid sample configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for sampler operations.
pub type HalResult<T> = Result<T, HalError>;
