#![allow(dead_code)]
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use skycube::prelude::*;
use std::collections::BTreeMap;

pub fn pid(i: usize) -> PointId {
    PointId::new(i)
}

pub fn ids(raw: &[usize]) -> Vec<PointId> {
    raw.iter().copied().map(PointId::new).collect()
}

pub fn path(dims: &[usize]) -> Path {
    Path::from_dims(dims.to_vec()).expect("valid path")
}

/// Dataset from integer rows, one `l`/`u` letter per dimension.
pub fn table<R: AsRef<[i32]>>(rows: &[R], directions: &str) -> Dataset {
    let rows: Vec<Vec<f64>> = rows
        .iter()
        .map(|r| r.as_ref().iter().map(|&v| f64::from(v)).collect())
        .collect();
    let prefs = Preference::parse_all(directions).expect("valid directions");
    Dataset::from_rows(&rows, prefs).expect("valid table")
}

/// Random table with values in `0..values`; small ranges give many ties.
pub fn random_table(seed: u64, n_points: usize, n_dims: usize, values: i32) -> Dataset {
    let mut rng = SmallRng::seed_from_u64(seed);
    let rows: Vec<Vec<i32>> = (0..n_points)
        .map(|_| (0..n_dims).map(|_| rng.gen_range(0..values)).collect())
        .collect();
    let directions: String = (0..n_dims)
        .map(|_| if rng.gen_bool(0.6) { 'l' } else { 'u' })
        .collect();
    table(&rows, &directions)
}

/// Every non-empty subset of `0..n_dims`.
pub fn all_paths(n_dims: usize) -> Vec<Path> {
    (1u32..1 << n_dims)
        .map(|mask| {
            let dims = (0..n_dims).filter(|d| mask & (1 << d) != 0).collect();
            Path::from_dims(dims).expect("valid path")
        })
        .collect()
}

/// Quadratic reference skyline, independent of the crate's algorithms.
pub fn naive_skyline(ds: &Dataset, dims: &[usize]) -> CompactSkyline {
    let better_or_equal = |a: PointId, b: PointId| {
        dims.iter().all(|&d| {
            let pref = ds.preference(d);
            pref.oriented(ds.value(a, d)) <= pref.oriented(ds.value(b, d))
        })
    };
    let dominates =
        |a: PointId, b: PointId| better_or_equal(a, b) && !better_or_equal(b, a);
    let survivors: Vec<PointId> = ds
        .points()
        .filter(|&p| !ds.points().any(|q| dominates(q, p)))
        .collect();

    let mut classes: Vec<Vec<PointId>> = Vec::new();
    for p in survivors {
        match classes
            .iter_mut()
            .find(|c| better_or_equal(c[0], p) && better_or_equal(p, c[0]))
        {
            Some(class) => class.push(p),
            None => classes.push(vec![p]),
        }
    }
    let (distinct, combined): (Vec<_>, Vec<_>) = classes.into_iter().partition(|c| c.len() == 1);
    CompactSkyline::new(distinct.into_iter().flatten().collect(), combined)
}

/// Reference skycube of `ds`, keyed by path.
pub fn naive_skycube(ds: &Dataset) -> BTreeMap<Path, CompactSkyline> {
    all_paths(ds.n_dims())
        .into_iter()
        .map(|p| {
            let sky = naive_skyline(ds, p.dims());
            (p, sky)
        })
        .collect()
}

pub const ALL_STRATEGIES: [Strategy; 4] = [
    Strategy::Depth {
        full_subset_first: true,
    },
    Strategy::Depth {
        full_subset_first: false,
    },
    Strategy::Breadth,
    Strategy::BreadthDomain,
];

/// Run `strategy` on a fresh engine and collect every subset's skyline.
pub fn run_collect(ds: &Dataset, strategy: Strategy) -> (Skycube, SkycubeCollector) {
    let mut cube = Skycube::new(ds.clone());
    let mut all = SkycubeCollector::new();
    cube.run_with(strategy, &mut all).expect("first run succeeds");
    (cube, all)
}

/// Assert `got` equals the reference skycube, naming the first mismatch.
pub fn assert_matches_reference(ds: &Dataset, strategy: Strategy, got: &SkycubeCollector) {
    let want = naive_skycube(ds);
    assert_eq!(got.len(), want.len(), "{strategy}: subset count");
    for (p, sky) in &want {
        assert_eq!(got.get(p), Some(sky), "{strategy}: skyline of {p}");
    }
}
