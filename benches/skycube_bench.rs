use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use skycube::prelude::*;

fn random_table(n_points: usize, n_dims: usize, values: u32) -> Dataset {
    let mut rng = SmallRng::seed_from_u64(42);
    let rows: Vec<Vec<f64>> = (0..n_points)
        .map(|_| {
            (0..n_dims)
                .map(|_| f64::from(rng.gen_range(0..values)))
                .collect()
        })
        .collect();
    Dataset::from_rows_minimized(&rows).expect("valid table")
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("skycube");
    group.sample_size(20);

    for &(n_points, n_dims) in &[(500usize, 4usize), (2000, 6)] {
        let data = random_table(n_points, n_dims, 1000);
        let label = format!("{n_points}x{n_dims}");
        for strategy in [
            Strategy::Depth {
                full_subset_first: true,
            },
            Strategy::Depth {
                full_subset_first: false,
            },
            Strategy::Breadth,
            Strategy::BreadthDomain,
        ] {
            group.bench_with_input(
                BenchmarkId::new(strategy.tag(), &label),
                &data,
                |b, data| {
                    b.iter(|| {
                        let mut cube = Skycube::new(data.clone());
                        let stats = cube.run(strategy).expect("fresh engine").clone();
                        black_box(stats)
                    })
                },
            );
        }
    }

    group.finish();
}

fn bench_ties(c: &mut Criterion) {
    // few distinct values: large Combined groups
    let data = random_table(2000, 5, 4);
    c.bench_function("skycube_ties_brd", |b| {
        b.iter(|| {
            let mut cube = Skycube::new(data.clone());
            black_box(cube.breadth_first(true).expect("fresh engine").comparisons)
        })
    });
}

criterion_group!(benches, bench_strategies, bench_ties);
criterion_main!(benches);
