#![allow(dead_code)]

use tsp_core::CostMatrix;

pub const INF: f64 = f64::INFINITY;

/// Integer costs in `1..=100`, each off-diagonal edge blocked with probability `p`.
pub fn random_matrix(n: usize, seed: u64, p: f64) -> CostMatrix {
    tsp_validation::generate::random_matrix(n, seed, p).unwrap()
}

/// Mostly blocked edges around one planted cycle.
pub fn adversarial_matrix(n: usize, seed: u64) -> CostMatrix {
    tsp_validation::generate::adversarial_matrix(n, seed).unwrap()
}

/// Every edge of `path` as (from, to).
pub fn edges(path: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    path.windows(2).map(|w| (w[0], w[1]))
}
