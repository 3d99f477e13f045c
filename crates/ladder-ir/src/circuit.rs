//! High-level circuit builder API.

use rustc_hash::FxHashMap;
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::gate::{McxMethod, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{Qubit, QubitId};

/// A quantum circuit.
///
/// This provides a high-level API for building quantum circuits,
/// with convenient methods for common gates and operations. Besides plain
/// gate appends it offers three scoped combinators:
///
/// - [`Circuit::conjugate`] runs `pattern; body; pattern⁻¹`,
/// - [`Circuit::control`] makes every gate of a body controlled on a qubit,
/// - [`Circuit::with_ancilla`] lends a scratch qubit for the duration of a body.
///
/// Qubit ids are dense: the `k`-th qubit added has id `k`, which is also
/// its bit position in a little-endian basis index.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit, indexed by id.
    qubits: Vec<Qubit>,
    /// Flat instruction list in application order.
    instructions: Vec<Instruction>,
    /// Global phase in radians.
    global_phase: f64,
    /// Ancillas currently lent out.
    live_ancillas: Vec<QubitId>,
    /// Released ancillas available for reuse.
    free_ancillas: Vec<QubitId>,
    /// Active control qubits, outermost first.
    control_stack: Vec<QubitId>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            instructions: vec![],
            global_phase: 0.0,
            live_ancillas: vec![],
            free_ancillas: vec![],
            control_stack: vec![],
        }
    }

    /// Create a circuit with a given number of qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        circuit
    }

    fn next_id(&self) -> QubitId {
        #[allow(clippy::cast_possible_truncation)]
        QubitId(self.qubits.len() as u32)
    }

    /// Add a single qubit to the circuit.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = self.next_id();
        self.qubits.push(Qubit::new(id));
        id
    }

    /// Add a quantum register with multiple qubits.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> Vec<QubitId> {
        let name = name.into();
        let mut ids = vec![];
        for i in 0..size {
            let id = self.next_id();
            self.qubits.push(Qubit::with_register(id, &name, i));
            ids.push(id);
        }
        ids
    }

    // =========================================================================
    // Instruction intake
    // =========================================================================

    fn check_qubit(&self, qubit: QubitId, gate_name: Option<&str>) -> IrResult<()> {
        if qubit.index() < self.qubits.len() {
            Ok(())
        } else {
            Err(IrError::QubitNotFound {
                qubit,
                gate_name: gate_name.map(String::from),
            })
        }
    }

    /// Append an instruction, applying the active control scopes.
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        let name = instruction.name();
        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits();
            #[allow(clippy::cast_possible_truncation)]
            let got = instruction.qubits.len() as u32;
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: name.to_string(),
                    expected,
                    got,
                });
            }
        }
        for (i, &qubit) in instruction.qubits.iter().enumerate() {
            self.check_qubit(qubit, Some(name))?;
            if instruction.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(name.to_string()),
                });
            }
        }

        let mut instruction = instruction;
        for &control in self.control_stack.iter().rev() {
            if instruction.qubits.contains(&control) {
                return Err(IrError::DuplicateQubit {
                    qubit: control,
                    gate_name: Some(name.to_string()),
                });
            }
            instruction = instruction
                .controlled_by(control)
                .ok_or_else(|| IrError::NotControllable(name.to_string()))?;
        }
        self.instructions.push(instruction);
        Ok(self)
    }

    /// Apply a standard gate to the given operands.
    pub fn gate(
        &mut self,
        gate: StandardGate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Add `phase` radians of global phase.
    ///
    /// Inside a [`Circuit::control`] scope the phase is only picked up when
    /// the controls are set, so it becomes a phase gate on the innermost
    /// control instead.
    pub fn add_global_phase(&mut self, phase: f64) -> IrResult<&mut Self> {
        match self.control_stack.pop() {
            None => {
                self.global_phase += phase;
                Ok(self)
            }
            Some(innermost) => {
                let result = self
                    .apply(Instruction::single_qubit_gate(
                        StandardGate::P(phase),
                        innermost,
                    ))
                    .map(|_| ());
                self.control_stack.push(innermost);
                result?;
                Ok(self)
            }
        }
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::X, qubit))
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Z, qubit))
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::S, qubit))
    }

    /// Apply S-dagger gate.
    pub fn sdg(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Sdg, qubit))
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::T, qubit))
    }

    /// Apply Rx rotation gate.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rx(theta), qubit))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Ry(theta), qubit))
    }

    /// Apply Rz rotation gate.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::Rz(theta), qubit))
    }

    /// Apply phase gate.
    pub fn p(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::single_qubit_gate(StandardGate::P(theta), qubit))
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::CX, control, target))
    }

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(StandardGate::Swap, q1, q2))
    }

    /// Apply controlled-Rz gate.
    pub fn crz(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Instruction::two_qubit_gate(
            StandardGate::CRz(theta),
            control,
            target,
        ))
    }

    // =========================================================================
    // Multi-qubit gates
    // =========================================================================

    /// Apply a multi-controlled X.
    ///
    /// The target flips when every `controls[k]` is in state `ctrl_state[k]`.
    pub fn mcx(
        &mut self,
        controls: &[QubitId],
        ctrl_state: &[bool],
        target: QubitId,
        method: McxMethod,
    ) -> IrResult<&mut Self> {
        if controls.len() != ctrl_state.len() {
            return Err(IrError::ControlStateMismatch {
                controls: controls.len(),
                states: ctrl_state.len(),
            });
        }
        let gate = StandardGate::Mcx {
            ctrl_state: ctrl_state.to_vec(),
            method,
        };
        let qubits = controls.iter().copied().chain(std::iter::once(target));
        self.apply(Instruction::gate(gate, qubits))
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.apply(Instruction::barrier(qubits))
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits: Vec<_> = self.qubits.iter().map(|q| q.id).collect();
        self.apply(Instruction::barrier(qubits))
    }

    /// Append every instruction of `other`, plus its global phase.
    ///
    /// `other` must only reference qubits that exist in `self`.
    pub fn compose(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        for instruction in &other.instructions {
            self.apply(instruction.clone())?;
        }
        self.add_global_phase(other.global_phase)
    }

    // =========================================================================
    // Scoped combinators
    // =========================================================================

    /// Run `pattern`, then `body`, then the exact inverse of `pattern`.
    ///
    /// The inverse is appended even when `body` fails. When `pattern` itself
    /// fails, whatever it emitted is removed again. Inside a
    /// [`Circuit::control`] scope only `body` is controlled: a conjugated
    /// block is the identity whenever its body is.
    pub fn conjugate<R, E, P, B>(&mut self, pattern: P, body: B) -> Result<R, E>
    where
        P: FnOnce(&mut Self) -> Result<(), E>,
        B: FnOnce(&mut Self) -> Result<R, E>,
        E: From<IrError>,
    {
        let controls = std::mem::take(&mut self.control_stack);
        let start = self.instructions.len();
        let phase_before = self.global_phase;
        let pattern_result = pattern(self);
        self.control_stack = controls;

        if let Err(e) = pattern_result {
            self.instructions.truncate(start);
            self.global_phase = phase_before;
            return Err(e);
        }

        let end = self.instructions.len();
        let pattern_phase = self.global_phase - phase_before;
        let result = body(self);

        let undo: Vec<Instruction> = self.instructions[start..end]
            .iter()
            .rev()
            .map(Instruction::inverse)
            .collect();
        self.instructions.extend(undo);
        self.global_phase -= pattern_phase;
        result
    }

    /// Run `body` with every emitted gate controlled on `qubit` being `|1⟩`.
    pub fn control<R, E, B>(&mut self, qubit: QubitId, body: B) -> Result<R, E>
    where
        B: FnOnce(&mut Self) -> Result<R, E>,
        E: From<IrError>,
    {
        self.check_qubit(qubit, None)?;
        if self.control_stack.contains(&qubit) {
            return Err(IrError::DuplicateQubit {
                qubit,
                gate_name: None,
            }
            .into());
        }
        self.control_stack.push(qubit);
        let result = body(self);
        self.control_stack.pop();
        result
    }

    // =========================================================================
    // Ancillas
    // =========================================================================

    /// Borrow a scratch qubit in `|0⟩`, reusing a released one if possible.
    pub fn allocate_ancilla(&mut self) -> QubitId {
        let id = match self.free_ancillas.pop() {
            Some(id) => id,
            None => {
                let id = self.next_id();
                self.qubits.push(Qubit::ancilla(id));
                id
            }
        };
        self.live_ancillas.push(id);
        id
    }

    /// Return a scratch qubit to the pool. It must be back in `|0⟩`.
    pub fn release_ancilla(&mut self, qubit: QubitId) -> IrResult<()> {
        let pos = self
            .live_ancillas
            .iter()
            .position(|&q| q == qubit)
            .ok_or(IrError::AncillaNotAllocated(qubit))?;
        self.live_ancillas.swap_remove(pos);
        self.free_ancillas.push(qubit);
        Ok(())
    }

    /// Lend a scratch qubit to `body`, releasing it on every exit path.
    pub fn with_ancilla<R, E, B>(&mut self, body: B) -> Result<R, E>
    where
        B: FnOnce(&mut Self, QubitId) -> Result<R, E>,
        E: From<IrError>,
    {
        let ancilla = self.allocate_ancilla();
        let result = body(self, ancilla);
        let released = self.release_ancilla(ancilla);
        let value = result?;
        released?;
        Ok(value)
    }

    /// Number of ancillas currently lent out.
    pub fn live_ancillas(&self) -> usize {
        self.live_ancillas.len()
    }

    /// Number of ancilla wires ever created.
    pub fn num_ancillas(&self) -> usize {
        self.qubits.iter().filter(|q| q.is_ancilla()).count()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits, ancillas included.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// Get the instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Get the global phase in radians.
    pub fn global_phase(&self) -> f64 {
        self.global_phase
    }

    /// Number of gate instructions.
    pub fn gate_count(&self) -> usize {
        self.instructions.iter().filter(|i| i.is_gate()).count()
    }

    /// Gate counts keyed by gate name.
    pub fn count_ops(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for inst in self.instructions.iter().filter(|i| i.is_gate()) {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Get the circuit depth.
    ///
    /// Barriers align the qubits they touch without adding a layer.
    pub fn depth(&self) -> usize {
        let mut level = vec![0usize; self.qubits.len()];
        let mut depth = 0;
        for inst in &self.instructions {
            let current = inst
                .qubits
                .iter()
                .map(|q| level[q.index()])
                .max()
                .unwrap_or(0);
            let next = if inst.is_gate() { current + 1 } else { current };
            for q in &inst.qubits {
                level[q.index()] = next;
            }
            depth = depth.max(next);
        }
        depth
    }

    /// The circuit implementing the inverse unitary.
    pub fn inverse(&self) -> Self {
        let mut inv = self.clone();
        inv.name = format!("{}_dg", self.name);
        inv.instructions = self
            .instructions
            .iter()
            .rev()
            .map(Instruction::inverse)
            .collect();
        inv.global_phase = -self.global_phase;
        inv.control_stack.clear();
        inv
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a GHZ state preparation circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        if n == 0 {
            return Ok(Self::new("ghz_0"));
        }

        let mut circuit = Self::with_size("ghz", n);
        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }
        Ok(circuit)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "circuit {} ({} qubits, global phase {})",
            self.name,
            self.qubits.len(),
            self.global_phase
        )?;
        for inst in &self.instructions {
            writeln!(f, "  {inst}")?;
        }
        Ok(())
    }
}
