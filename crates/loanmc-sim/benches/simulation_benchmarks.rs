//! Benchmarks for the loanmc Monte Carlo engine.
//!
//! Run with: cargo bench -p loanmc-sim --features parallel

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

use loanmc_core::{LoanTerms, Portfolio, RateSensitivity};
use loanmc_sim::loan::simulate_loan;
use loanmc_sim::stress::{run_stress_scenarios, standard};
use loanmc_sim::{MonteCarloEngine, SimulationConfig};

// =============================================================================
// SINGLE LOAN
// =============================================================================

fn bench_single_loan(c: &mut Criterion) {
    let terms = LoanTerms::standard();
    let sensitivity = RateSensitivity::default();
    let mut rng = StdRng::seed_from_u64(1);

    c.bench_function("simulate_loan_10y", |b| {
        b.iter(|| simulate_loan(black_box(&terms), black_box(0.01), &sensitivity, &mut rng))
    });
}

// =============================================================================
// ENGINE
// =============================================================================

fn bench_engine(c: &mut Criterion) {
    let portfolio = Portfolio::homogeneous(50, LoanTerms::standard()).unwrap();
    let mut group = c.benchmark_group("engine_run");
    group.sample_size(20);

    for simulations in [500_usize, 5_000] {
        group.throughput(Throughput::Elements(simulations as u64));

        let sequential = MonteCarloEngine::new(
            SimulationConfig::sequential()
                .with_simulations(simulations)
                .with_seed(7),
        )
        .unwrap();
        group.bench_with_input(
            BenchmarkId::new("sequential", simulations),
            &portfolio,
            |b, p| b.iter(|| sequential.run(black_box(p))),
        );

        let parallel = MonteCarloEngine::new(
            SimulationConfig::default()
                .with_simulations(simulations)
                .with_seed(7),
        )
        .unwrap();
        group.bench_with_input(
            BenchmarkId::new("parallel", simulations),
            &portfolio,
            |b, p| b.iter(|| parallel.run(black_box(p))),
        );
    }

    group.finish();
}

// =============================================================================
// STRESS
// =============================================================================

fn bench_stress(c: &mut Criterion) {
    let portfolio = Portfolio::homogeneous(50, LoanTerms::standard()).unwrap();
    let config = SimulationConfig::default().with_simulations(500).with_seed(7);
    let scenarios = standard::all();

    let mut group = c.benchmark_group("stress");
    group.sample_size(10);
    group.bench_function("standard_scenarios_500", |b| {
        b.iter(|| run_stress_scenarios(&config, black_box(&portfolio), &scenarios))
    });
    group.finish();
}

criterion_group!(benches, bench_single_loan, bench_engine, bench_stress);
criterion_main!(benches);
