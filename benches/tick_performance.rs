use criterion::{black_box, criterion_group, criterion_main, Criterion};
use intersection_sim::simulation::{Engine, EngineParams};

fn warmed_engine(denominator: u32) -> Engine {
    let params = EngineParams::new(600, 600, 1.0 / denominator as f64, u64::MAX).with_seed(42);
    let mut engine = Engine::new(params).expect("valid benchmark parameters");

    // Fill the lanes so the benchmark measures steady-state traffic
    for _ in 0..2_000 {
        engine.advance();
    }
    engine
}

fn benchmark_advance(c: &mut Criterion) {
    let mut engine = warmed_engine(6);

    c.bench_function("engine_advance", |b| {
        b.iter(|| {
            engine.advance();
            black_box(engine.statistics());
        })
    });
}

fn benchmark_arrival_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("arrival_scaling");

    for denominator in [1u32, 2, 6, 20].iter() {
        let mut engine = warmed_engine(*denominator);

        group.bench_with_input(
            format!("one_in_{}", denominator),
            denominator,
            |b, _denominator| {
                b.iter(|| {
                    engine.advance();
                });
            },
        );
    }

    group.finish();
}

fn benchmark_snapshot(c: &mut Criterion) {
    let engine = warmed_engine(2);

    c.bench_function("vehicle_snapshot", |b| {
        b.iter(|| black_box(engine.vehicles()))
    });
}

criterion_group!(benches, benchmark_advance, benchmark_arrival_scaling, benchmark_snapshot);
criterion_main!(benches);
