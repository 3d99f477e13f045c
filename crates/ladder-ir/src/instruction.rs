//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::StandardGate;
use crate::qubit::QubitId;

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A quantum gate operation.
    Gate(StandardGate),
    /// Barrier (synchronization point).
    Barrier,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            InstructionKind::Barrier => None,
        }
    }

    /// Get the name of the instruction.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Barrier => "barrier",
        }
    }

    /// The instruction undoing this one.
    pub fn inverse(&self) -> Self {
        let kind = match &self.kind {
            InstructionKind::Gate(g) => InstructionKind::Gate(g.inverse()),
            InstructionKind::Barrier => InstructionKind::Barrier,
        };
        Self {
            kind,
            qubits: self.qubits.clone(),
        }
    }

    /// This instruction with an extra control on `control`.
    ///
    /// Barriers are widened to include the control. Returns `None` when
    /// the gate has no controlled form.
    pub fn controlled_by(&self, control: QubitId) -> Option<Self> {
        let kind = match &self.kind {
            InstructionKind::Gate(g) => InstructionKind::Gate(g.controlled()?),
            InstructionKind::Barrier => InstructionKind::Barrier,
        };
        let mut qubits = Vec::with_capacity(self.qubits.len() + 1);
        qubits.push(control);
        qubits.extend_from_slice(&self.qubits);
        Some(Self { kind, qubits })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        if let InstructionKind::Gate(gate) = &self.kind {
            match gate {
                StandardGate::Mcx { ctrl_state, method } => {
                    let bits: String = ctrl_state
                        .iter()
                        .map(|&b| if b { '1' } else { '0' })
                        .collect();
                    write!(f, "[{bits};{}]", method.name())?;
                }
                other => {
                    if let Some(theta) = other.angle() {
                        write!(f, "({theta})")?;
                    }
                }
            }
        }
        let operands: Vec<String> = self.qubits.iter().map(ToString::to_string).collect();
        write!(f, " {}", operands.join(", "))
    }
}
