//! Benchmarks for term synthesis
//!
//! Run with: cargo bench -p ladder-sim

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ladder_sim::fermionic::{a, c};
use ladder_sim::pauli::{x, z};
use ladder_sim::{FermionicHamiltonian, PauliHamiltonian};

/// Spinless hopping chain with on-site occupation.
fn hopping_chain(n: u32) -> FermionicHamiltonian {
    let hopping: FermionicHamiltonian = (0..n - 1).map(|i| -1.0 * c(i) * a(i + 1)).sum();
    let onsite: FermionicHamiltonian = (0..n).map(|i| 0.5 * c(i) * a(i)).sum();
    hopping + onsite
}

/// Transverse-field Ising chain.
fn ising_chain(n: u32) -> PauliHamiltonian {
    let coupling: PauliHamiltonian = (0..n - 1).map(|i| -1.0 * z(i) * z(i + 1)).sum();
    let field: PauliHamiltonian = (0..n).map(|i| -0.5 * x(i)).sum();
    coupling + field
}

/// Benchmark first-order Trotter synthesis of fermionic hopping
fn bench_fermionic_trotter(crit: &mut Criterion) {
    let mut group = crit.benchmark_group("fermionic_trotter");

    for n in &[4u32, 8, 16, 32] {
        let h = hopping_chain(*n);
        group.bench_with_input(BenchmarkId::new("first_order", n), &h, |b, h| {
            b.iter(|| black_box(h.trotterization(1.0, 4).first_order().unwrap()));
        });
    }

    group.finish();
}

/// Benchmark Jordan-Wigner mapping
fn bench_to_pauli(crit: &mut Criterion) {
    let mut group = crit.benchmark_group("to_pauli");

    for n in &[8u32, 32, 128] {
        let h = hopping_chain(*n);
        group.bench_with_input(BenchmarkId::new("hopping", n), &h, |b, h| {
            b.iter(|| black_box(h.to_pauli()));
        });
    }

    group.finish();
}

/// Benchmark dense ground-state energies
fn bench_ground_state(crit: &mut Criterion) {
    let mut group = crit.benchmark_group("ground_state");
    group.sample_size(20);

    for n in &[4u32, 6, 8] {
        let h = ising_chain(*n);
        group.bench_with_input(BenchmarkId::new("ising", n), &h, |b, h| {
            b.iter(|| black_box(h.ground_state_energy().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fermionic_trotter,
    bench_to_pauli,
    bench_ground_state
);
criterion_main!(benches);
