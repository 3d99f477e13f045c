//! Sampling results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Probability distribution over computational-basis outcomes.
///
/// Outcomes are little-endian basis indices: bit `q` is qubit `q`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    num_qubits: usize,
    shots: Option<u32>,
    probabilities: FxHashMap<u64, f64>,
}

impl Distribution {
    /// An empty distribution over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            shots: None,
            probabilities: FxHashMap::default(),
        }
    }

    /// Build an exact distribution from `(outcome, probability)` pairs.
    ///
    /// Zero-probability outcomes are dropped.
    pub fn from_probabilities(
        num_qubits: usize,
        probabilities: impl IntoIterator<Item = (u64, f64)>,
    ) -> Self {
        let mut dist = Self::new(num_qubits);
        for (outcome, p) in probabilities {
            if p > 0.0 {
                *dist.probabilities.entry(outcome).or_insert(0.0) += p;
            }
        }
        dist
    }

    /// Build an empirical distribution from shot counts.
    pub fn from_counts(num_qubits: usize, counts: &FxHashMap<u64, u32>) -> Self {
        let shots: u32 = counts.values().sum();
        let mut dist = Self::new(num_qubits);
        dist.shots = Some(shots);
        if shots == 0 {
            return dist;
        }
        let total = f64::from(shots);
        dist.probabilities = counts
            .iter()
            .filter(|&(_, &n)| n > 0)
            .map(|(&outcome, &n)| (outcome, f64::from(n) / total))
            .collect();
        dist
    }

    /// Number of measured qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Shots behind this distribution, `None` if exact.
    pub fn shots(&self) -> Option<u32> {
        self.shots
    }

    /// Probability of `outcome`.
    pub fn probability(&self, outcome: u64) -> f64 {
        self.probabilities.get(&outcome).copied().unwrap_or(0.0)
    }

    /// Number of outcomes with non-zero probability.
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// True if no outcome has been recorded.
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Iterate over `(outcome, probability)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.probabilities.iter().map(|(&k, &v)| (k, v))
    }

    /// Sum of all probabilities.
    pub fn total(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// Most likely outcome. Ties go to the smaller index.
    pub fn most_likely(&self) -> Option<(u64, f64)> {
        self.iter().max_by(|a, b| a.1.total_cmp(&b.1).then(b.0.cmp(&a.0)))
    }

    /// Expectation of `f` over this distribution.
    pub fn expectation(&self, mut f: impl FnMut(u64) -> f64) -> f64 {
        self.iter().map(|(outcome, p)| p * f(outcome)).sum()
    }

    /// Render `outcome` as a bitstring, highest qubit first.
    pub fn bitstring(&self, outcome: u64) -> String {
        (0..self.num_qubits)
            .rev()
            .map(|q| if (outcome >> q) & 1 == 1 { '1' } else { '0' })
            .collect()
    }
}
