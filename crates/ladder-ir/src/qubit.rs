//! Qubit identifiers and wire metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl QubitId {
    /// Index of this qubit in a little-endian basis state.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// What a qubit wire is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QubitRole {
    /// Part of a user register.
    Data,
    /// Scratch qubit handed out by [`Circuit::allocate_ancilla`](crate::Circuit::allocate_ancilla).
    Ancilla,
}

/// A quantum bit with optional register membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    /// The unique identifier.
    pub id: QubitId,
    /// The name of the register this qubit belongs to, if any.
    pub register: Option<String>,
    /// The index within the register, if any.
    pub index: Option<u32>,
    /// Data or ancilla wire.
    pub role: QubitRole,
}

impl Qubit {
    /// Create a new data qubit with just an id.
    pub fn new(id: QubitId) -> Self {
        Self {
            id,
            register: None,
            index: None,
            role: QubitRole::Data,
        }
    }

    /// Create a new data qubit with register membership.
    pub fn with_register(id: QubitId, register: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            register: Some(register.into()),
            index: Some(index),
            role: QubitRole::Data,
        }
    }

    /// Create an ancilla wire.
    pub fn ancilla(id: QubitId) -> Self {
        Self {
            id,
            register: None,
            index: None,
            role: QubitRole::Ancilla,
        }
    }

    /// True for scratch wires.
    pub fn is_ancilla(&self) -> bool {
        self.role == QubitRole::Ancilla
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.register, self.index, self.role) {
            (Some(reg), Some(idx), _) => write!(f, "{reg}[{idx}]"),
            (_, _, QubitRole::Ancilla) => write!(f, "anc{}", self.id.0),
            _ => write!(f, "{}", self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qubit_display() {
        let q = Qubit::new(QubitId(0));
        assert_eq!(format!("{q}"), "q0");

        let q_reg = Qubit::with_register(QubitId(1), "qr", 0);
        assert_eq!(format!("{q_reg}"), "qr[0]");

        let anc = Qubit::ancilla(QubitId(4));
        assert_eq!(format!("{anc}"), "anc4");
        assert!(anc.is_ancilla());
    }

    #[test]
    fn test_qubit_index() {
        assert_eq!(QubitId(7).index(), 7);
        assert_eq!(QubitId::from(3u32), QubitId(3));
    }
}
