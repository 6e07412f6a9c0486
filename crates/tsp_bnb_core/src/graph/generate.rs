use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{Error, Result, WeightedGraph, constants::MIN_TOUR_NODES};

/// Complete graph over `n` random points in the unit square, weighted by Euclidean distance.
pub fn random_euclidean(n: usize, seed: u64) -> Result<WeightedGraph> {
    if n < MIN_TOUR_NODES {
        return Err(Error::invalid_graph(format!(
            "random graph needs at least {MIN_TOUR_NODES} nodes, got {n}"
        )));
    }

    log::info!("generate: random euclidean graph n={n} seed={seed}");

    let mut rng = StdRng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random::<f64>(), rng.random::<f64>()))
        .collect();

    WeightedGraph::from_fn(n, |u, v| {
        let (dx, dy) = (points[u].0 - points[v].0, points[u].1 - points[v].1);
        dx.hypot(dy)
    })
}
