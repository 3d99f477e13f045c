//! Statevector simulation engine.

use num_complex::Complex64;
use rand::Rng;
use rustc_hash::FxHashMap;
use std::f64::consts::FRAC_1_SQRT_2;

use ladder_ir::{Circuit, Instruction, InstructionKind, Matrix2, StandardGate};

/// A statevector representing a quantum state.
///
/// Amplitude `i` belongs to the basis state whose bit `q` is qubit `q`.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        Self::basis_state(num_qubits, 0)
    }

    /// Create the computational basis state `|index⟩`.
    pub fn basis_state(num_qubits: usize, index: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Get the amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Apply every instruction of `circuit`, then its global phase.
    pub fn run(&mut self, circuit: &Circuit) {
        for inst in circuit.instructions() {
            self.apply(inst);
        }
        self.apply_global_phase(circuit.global_phase());
    }

    /// Apply an instruction to the statevector.
    pub fn apply(&mut self, instruction: &Instruction) {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let qubits: Vec<_> = instruction.qubits.iter().map(|q| q.index()).collect();
                self.apply_standard_gate(gate, &qubits);
            }
            InstructionKind::Barrier => {}
        }
    }

    /// Apply a standard gate.
    fn apply_standard_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::I => {}
            StandardGate::X => self.apply_x(qubits[0]),
            StandardGate::Z => self.apply_z(qubits[0]),
            StandardGate::H => self.apply_h(qubits[0]),
            StandardGate::CX => self.apply_cx(qubits[0], qubits[1]),
            StandardGate::Swap => self.apply_swap(qubits[0], qubits[1]),
            other => {
                // Everything else is a (multi-)controlled single-qubit gate.
                let Some((ctrl_state, base)) = other.split_controls() else {
                    return;
                };
                let Some(matrix) = base.matrix() else {
                    return;
                };
                let (target, controls) = match qubits.split_last() {
                    Some(split) => split,
                    None => return,
                };
                let mut ctrl_mask = 0usize;
                let mut ctrl_value = 0usize;
                for (&q, &state) in controls.iter().zip(&ctrl_state) {
                    ctrl_mask |= 1 << q;
                    if state {
                        ctrl_value |= 1 << q;
                    }
                }
                self.apply_controlled(ctrl_mask, ctrl_value, *target, &matrix);
            }
        }
    }

    /// Multiply the whole state by `e^{i·phase}`.
    pub fn apply_global_phase(&mut self, phase: f64) {
        if phase == 0.0 {
            return;
        }
        let factor = Complex64::from_polar(1.0, phase);
        for amp in &mut self.amplitudes {
            *amp *= factor;
        }
    }

    // =========================================================================
    // Gate kernels
    // =========================================================================

    /// Apply `matrix` to `target` on the basis states where the bits in
    /// `ctrl_mask` equal `ctrl_value`.
    fn apply_controlled(
        &mut self,
        ctrl_mask: usize,
        ctrl_value: usize,
        target: usize,
        matrix: &Matrix2,
    ) {
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if i & tgt_mask == 0 && i & ctrl_mask == ctrl_value {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = matrix[0][0] * a + matrix[0][1] * b;
                self.amplitudes[j] = matrix[1][0] * a + matrix[1][1] * b;
            }
        }
    }

    fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = FRAC_1_SQRT_2 * (a + b);
                self.amplitudes[j] = FRAC_1_SQRT_2 * (a - b);
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..(1 << self.num_qubits) {
            let b1 = (i & mask1) != 0;
            let b2 = (i & mask2) != 0;
            if b1 && !b2 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Outcome probabilities indexed by basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Draw `shots` computational-basis samples.
    pub fn sample_counts<R: Rng + ?Sized>(&self, shots: u32, rng: &mut R) -> FxHashMap<u64, u32> {
        let mut cumulative = Vec::with_capacity(self.amplitudes.len());
        let mut total = 0.0;
        for amp in &self.amplitudes {
            total += amp.norm_sqr();
            cumulative.push(total);
        }

        let last = cumulative.len() - 1;
        let mut counts = FxHashMap::default();
        for _ in 0..shots {
            let r: f64 = rng.r#gen::<f64>() * total;
            let outcome = cumulative.partition_point(|&c| c <= r).min(last);
            *counts.entry(outcome as u64).or_insert(0) += 1;
        }
        counts
    }
}
