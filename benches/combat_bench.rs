//! Benchmarks for battle odds and route planning

use std::hint::black_box;

use conquest::combat::{simulate_battle, CombatResolver};
use conquest::core::types::{PlayerId, TerritoryId};
use conquest::pathing::{nearest_region_border, path_through_rivals};
use conquest::world::classic_world;
use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn bench_simulate_battle(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    c.bench_function("simulate_battle_20v15", |b| {
        b.iter(|| simulate_battle(black_box(20), black_box(15), &mut rng))
    });
}

fn bench_win_probability(c: &mut Criterion) {
    c.bench_function("win_probability_cold_10k", |b| {
        b.iter(|| {
            let resolver = CombatResolver::with_trials(10_000, 42);
            black_box(resolver.win_probability(black_box(12), black_box(9)))
        })
    });

    let resolver = CombatResolver::with_trials(10_000, 42);
    resolver.win_probability(12, 9);
    c.bench_function("win_probability_cached", |b| {
        b.iter(|| black_box(resolver.win_probability(black_box(12), black_box(9))))
    });
}

fn bench_pathing(c: &mut Criterion) {
    let mut world = classic_world().expect("classic map");
    let ids: Vec<TerritoryId> = world.territories().iter().map(|t| t.id).collect();
    for (i, id) in ids.iter().enumerate() {
        world
            .occupy(*id, PlayerId((i % 4) as u32), 1 + (i % 7) as u32)
            .expect("occupy");
    }
    let source = ids[0];
    let target = ids[41];
    let asia = world.region_by_name("Asia").expect("asia").id;

    c.bench_function("path_through_rivals_classic", |b| {
        b.iter(|| black_box(path_through_rivals(&world, black_box(source), black_box(target))))
    });
    c.bench_function("nearest_region_border_classic", |b| {
        b.iter(|| black_box(nearest_region_border(&world, black_box(source), asia)))
    });
}

criterion_group!(benches, bench_simulate_battle, bench_win_probability, bench_pathing);
criterion_main!(benches);
