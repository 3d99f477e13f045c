//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced by the term algebra and circuit synthesis.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Hamiltonian contains no terms.
    #[error("Hamiltonian is empty, no terms to synthesise")]
    EmptyHamiltonian,

    /// An identity term reached the synthesizer.
    #[error("Cannot synthesise the identity term: it has no anchor qubit")]
    EmptyTerm,

    /// A term could not be parsed or constructed.
    #[error("Malformed term: {0}")]
    MalformedTerm(String),

    /// A term references a qubit index that is out of range.
    #[error("Term references qubit {qubit} but the register only has {n_qubits} qubits")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: u32,
        /// Number of qubits in the target register.
        n_qubits: u32,
    },

    /// Dense matrix requested for too many qubits.
    #[error("Dense matrix over {n_qubits} qubits exceeds the limit of {max_qubits}")]
    TooManyQubits {
        /// Qubits the matrix would span.
        n_qubits: u32,
        /// Configured limit.
        max_qubits: u32,
    },

    /// The Hermitian eigensolver did not converge.
    #[error("Eigensolver failed to converge")]
    EigenSolver,

    /// n_steps must be ≥ 1.
    #[error("n_steps must be at least 1, got {0}")]
    InvalidSteps(usize),

    /// n_samples must be ≥ 1 for QDrift.
    #[error("n_samples must be at least 1, got {0}")]
    InvalidSamples(usize),

    /// Evolution time must be finite.
    #[error("Evolution time must be finite, got {0}")]
    InvalidTime(f64),

    /// Configuration could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] ladder_ir::IrError),

    /// Sampler returned an error.
    #[error("Sampler error: {0}")]
    Hal(#[from] ladder_hal::HalError),
}

/// Result type for simulation synthesis operations.
pub type SimResult<T> = Result<T, SimError>;
