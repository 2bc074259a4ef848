//! Criterion benchmarks for u-roster model building and solving.
//!
//! Uses fixed synthetic instances so runs are comparable: the small
//! reference roster and a wider ward-scale roster.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_roster::model::{ModelBuilder, RosterProblem, Worker};
use u_roster::solver::{BacktrackSolver, RosterSolver, SearchConfig};

/// 5 workers, 3 slots, 7 days, 2 skills, late/night rest rules.
fn small_instance() -> RosterProblem {
    let mut problem = RosterProblem::new(7, 3, 2)
        .with_worker(Worker::new("head").with_skills([0, 1]))
        .with_worker(Worker::new("w1").with_skill(1))
        .with_worker(Worker::new("w2").with_skill(1))
        .with_worker(Worker::new("w3").with_skill(1))
        .with_worker(Worker::new("relief").with_skills([0, 1]))
        .with_forbidden_transition(1, 0)
        .with_forbidden_transition(2, 0)
        .with_forbidden_transition(2, 1);
    for day in 0..7 {
        problem = problem
            .with_requirement(day, 0, 1, 1)
            .with_requirement(day, 2, 1, 1);
    }
    problem.with_requirement(0, 0, 0, 1).with_requirement(5, 1, 0, 1)
}

/// `workers` workers over a 14-day horizon, one general duty per slot
/// per day plus a daily charge duty.
fn ward_instance(workers: usize) -> RosterProblem {
    let mut problem = RosterProblem::new(14, 3, 2)
        .with_forbidden_transition(1, 0)
        .with_forbidden_transition(2, 0)
        .with_forbidden_transition(2, 1);
    for w in 0..workers {
        let mut worker = Worker::new(format!("w{w}")).with_skill(1);
        if w % 4 == 0 {
            worker = worker.with_skill(0);
        }
        problem = problem.with_worker(worker);
    }
    for day in 0..14 {
        problem = problem
            .with_requirement(day, 0, 0, 1)
            .with_requirement(day, 0, 1, 2)
            .with_requirement(day, 1, 1, 2)
            .with_requirement(day, 2, 1, 1);
    }
    problem
}

fn bench_build(c: &mut Criterion) {
    let small = small_instance();
    let ward = ward_instance(12);

    c.bench_function("build/small", |b| {
        b.iter(|| ModelBuilder::new(black_box(&small)).build().unwrap())
    });
    c.bench_function("build/ward", |b| {
        b.iter(|| ModelBuilder::new(black_box(&ward)).build().unwrap())
    });
}

fn bench_solve(c: &mut Criterion) {
    let solver = BacktrackSolver::new();
    let config = SearchConfig::default();

    let small = ModelBuilder::new(&small_instance()).build().unwrap();
    c.bench_function("solve/small", |b| {
        b.iter(|| solver.solve(black_box(&small), &config))
    });

    let mut group = c.benchmark_group("solve/ward");
    for workers in [8, 12, 16] {
        let model = ModelBuilder::new(&ward_instance(workers)).build().unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(workers),
            &model,
            |b, model| b.iter(|| solver.solve(black_box(model), &config)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_solve);
criterion_main!(benches);
