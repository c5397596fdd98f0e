use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use std::fmt;
use tsp_core::{CostMatrix, InvalidInput};

const INF: f64 = f64::INFINITY;

/// Families of seeded test instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum InstanceKind {
    /// Asymmetric integer costs, each edge blocked with a given probability.
    Random,
    /// Symmetric integer costs, fully connected.
    Symmetric,
    /// A planted expensive cycle hidden among cheap edges, most edges blocked.
    Adversarial,
    /// Random costs with one node unreachable, so no tour exists.
    Disconnected,
}

impl fmt::Display for InstanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstanceKind::Random => "random",
            InstanceKind::Symmetric => "symmetric",
            InstanceKind::Adversarial => "adversarial",
            InstanceKind::Disconnected => "disconnected",
        };
        f.write_str(name)
    }
}

impl InstanceKind {
    pub fn generate(
        self,
        n: usize,
        seed: u64,
        blocked_probability: f64,
    ) -> Result<CostMatrix, InvalidInput> {
        match self {
            InstanceKind::Random => random_matrix(n, seed, blocked_probability),
            InstanceKind::Symmetric => symmetric_matrix(n, seed),
            InstanceKind::Adversarial => adversarial_matrix(n, seed),
            InstanceKind::Disconnected => disconnected_matrix(n, seed),
        }
    }
}

pub fn random_matrix(
    n: usize,
    seed: u64,
    blocked_probability: f64,
) -> Result<CostMatrix, InvalidInput> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let p = blocked_probability.clamp(0.0, 1.0);
    let mut rows = vec![vec![0.0; n]; n];
    for (i, row) in rows.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            if i != j {
                *cell = if rng.gen_bool(p) { INF } else { rng.gen_range(1..=100) as f64 };
            }
        }
    }
    CostMatrix::from_rows(rows)
}

pub fn symmetric_matrix(n: usize, seed: u64) -> Result<CostMatrix, InvalidInput> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut rows = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let c = rng.gen_range(1..=100) as f64;
            rows[i][j] = c;
            rows[j][i] = c;
        }
    }
    CostMatrix::from_rows(rows)
}

/// Blocks about 80% of the edges but keeps one random Hamiltonian cycle
/// open. The planted cycle is expensive and the surviving decoys are cheap,
/// so greedy choices walk into dead ends.
pub fn adversarial_matrix(n: usize, seed: u64) -> Result<CostMatrix, InvalidInput> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut rows = vec![vec![INF; n]; n];
    for (i, row) in rows.iter_mut().enumerate() {
        row[i] = 0.0;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);
    for w in 0..n {
        let (a, b) = (order[w], order[(w + 1) % n]);
        if a != b {
            rows[a][b] = rng.gen_range(60..=100) as f64;
        }
    }

    for i in 0..n {
        for j in 0..n {
            if i != j && rows[i][j] == INF && rng.gen_bool(0.2) {
                rows[i][j] = rng.gen_range(1..=20) as f64;
            }
        }
    }
    CostMatrix::from_rows(rows)
}

/// Random costs where no edge enters the last node.
pub fn disconnected_matrix(n: usize, seed: u64) -> Result<CostMatrix, InvalidInput> {
    let mut rows = random_matrix(n, seed, 0.0)?.to_rows();
    if let Some(isolated) = n.checked_sub(1) {
        for (i, row) in rows.iter_mut().enumerate() {
            if i != isolated {
                row[isolated] = None;
            }
        }
    }
    CostMatrix::from_options(rows)
}
