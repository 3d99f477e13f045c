//! Benchmarks for ladder circuit operations
//!
//! Run with: cargo bench -p ladder-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ladder_ir::{Circuit, IrError, McxMethod, QubitId};
use std::f64::consts::PI;

/// Benchmark GHZ state circuit creation
fn bench_ghz_circuit(c: &mut Criterion) {
    let mut group = c.benchmark_group("ghz_circuit");

    for num_qubits in &[3, 5, 10, 20, 50, 100] {
        group.bench_with_input(
            BenchmarkId::new("create", num_qubits),
            num_qubits,
            |b, &n| {
                b.iter(|| black_box(Circuit::ghz(black_box(n)).unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark the conjugate / control / ancilla block used by term synthesis
fn bench_scoped_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("scoped_rotation");

    for num_qubits in &[2u32, 4, 8, 16] {
        group.bench_with_input(
            BenchmarkId::new("ladder", num_qubits),
            num_qubits,
            |b, &n| {
                b.iter(|| {
                    let mut circuit = Circuit::with_size("bench", n);
                    let anchor = QubitId(n - 1);
                    let others: Vec<QubitId> = (0..n - 1).map(QubitId).collect();
                    let state: Vec<bool> = (0..n - 1).map(|i| i % 2 == 0).collect();
                    circuit
                        .conjugate(
                            |c| {
                                for &q in &others {
                                    c.cx(anchor, q)?;
                                }
                                c.h(anchor)?;
                                Ok::<_, IrError>(())
                            },
                            |c| {
                                c.with_ancilla(|c, anc| {
                                    c.conjugate(
                                        |c| {
                                            c.mcx(&others, &state, anc, McxMethod::GrayPhaseTolerant)?;
                                            Ok::<_, IrError>(())
                                        },
                                        |c| {
                                            c.control(anc, |c| {
                                                c.rz(black_box(PI / 8.0), anchor)?;
                                                Ok(())
                                            })
                                        },
                                    )
                                })
                            },
                        )
                        .unwrap();
                    black_box(circuit)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark circuit depth calculation
fn bench_circuit_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_depth");

    for num_qubits in &[5, 10, 20, 50] {
        let mut circuit = Circuit::with_size("bench", *num_qubits);

        for _layer in 0..5 {
            for i in 0..*num_qubits {
                circuit.h(QubitId(i)).unwrap();
            }
            for i in (0..*num_qubits - 1).step_by(2) {
                circuit.cx(QubitId(i), QubitId(i + 1)).unwrap();
            }
        }

        group.bench_with_input(
            BenchmarkId::new("depth", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(circuit.depth()));
            },
        );
    }

    group.finish();
}

/// Benchmark circuit inversion
fn bench_inverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("inverse");

    for num_qubits in &[10u32, 50, 100] {
        let mut circuit = Circuit::with_size("bench", *num_qubits);
        for i in 0..*num_qubits {
            circuit.rz(PI / f64::from(i + 1), QubitId(i)).unwrap();
        }
        for i in 0..*num_qubits - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1)).unwrap();
        }

        group.bench_with_input(
            BenchmarkId::new("inverse", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(circuit.inverse()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_ghz_circuit,
    bench_scoped_rotation,
    bench_circuit_depth,
    bench_inverse,
);

criterion_main!(benches);
