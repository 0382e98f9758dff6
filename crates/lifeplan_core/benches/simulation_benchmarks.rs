//! Criterion benchmarks for lifeplan_core simulation
//!
//! Run with: cargo bench -p lifeplan_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lifeplan_core::config::{Scenario, ScenarioBuilder};
use lifeplan_core::model::GrowthProfile;
use lifeplan_core::simulation::{monte_carlo_simulate, simulate};

fn create_working_life_scenario() -> Scenario {
    ScenarioBuilder::new(30, 90, 65)
        .with_parameters(|p| {
            p.initial_savings = 20_000.0;
            p.inflation = 0.02;
            p.pension_percentage = 1.0;
            p.personal_tax_credit = 2_000.0;
            p.funds_allocation = 0.6;
            p.shares_allocation = 0.2;
            p.emergency_stash = 30_000.0;
            p.pension_growth = GrowthProfile::fixed(0.06);
            p.funds_growth = GrowthProfile::fixed(0.05);
            p.shares_growth = GrowthProfile::fixed(0.05);
            p.state_pension_weekly = 289.0;
        })
        .salary(65_000.0, 30, 64)
        .expense(35_000.0, 30, 100)
        .property("home", 60_000.0, 33, 90, 0.03)
        .mortgage("home", 22_000.0, 33, 58, 0.035)
        .build()
        .unwrap()
}

fn create_volatile_scenario() -> Scenario {
    let mut scenario = create_working_life_scenario();
    scenario.parameters.pension_growth.std_dev = 0.12;
    scenario.parameters.funds_growth.std_dev = 0.15;
    scenario.parameters.shares_growth.std_dev = 0.18;
    scenario
}

fn bench_lifetime_simulation(c: &mut Criterion) {
    let scenario = create_working_life_scenario();

    c.bench_function("lifetime_70yr_simulation", |b| {
        b.iter(|| simulate(black_box(&scenario), black_box(42)))
    });
}

fn bench_volatile_simulation(c: &mut Criterion) {
    let scenario = create_volatile_scenario();

    c.bench_function("volatile_70yr_simulation", |b| {
        b.iter(|| simulate(black_box(&scenario), black_box(42)))
    });
}

fn bench_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");
    let scenario = create_volatile_scenario();

    for runs in [100u32, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("runs", runs), runs, |b, &runs| {
            b.iter(|| monte_carlo_simulate(black_box(&scenario), black_box(runs), black_box(42)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_lifetime_simulation,
    bench_volatile_simulation,
    bench_monte_carlo
);
criterion_main!(benches);
