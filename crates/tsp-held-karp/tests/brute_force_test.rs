mod common;

use common::{adversarial_matrix, random_matrix};
use tsp_core::{CostMatrix, SolveError};
use tsp_held_karp::{HeldKarp, SolverConfig};

fn check(hk: &HeldKarp, m: &CostMatrix, start: usize) {
    let exact = hk.solve(m, start);
    let truth = tsp_brute_force::solve(m, start);
    match (&exact, &truth) {
        (Ok(a), Ok(b)) => {
            assert_eq!(a.cost, b.cost, "held-karp {:?} vs brute force {:?}", a.path, b.path);
            assert_eq!(a.verify(m), Ok(()));
        }
        (Err(SolveError::Infeasible), Err(SolveError::Infeasible)) => {}
        _ => panic!("held-karp {exact:?} vs brute force {truth:?}"),
    }
}

#[test]
fn random_instances_match_brute_force() {
    let hk = HeldKarp::new(SolverConfig::default().with_workers(4));
    for n in 3..=9 {
        for seed in 0..4 {
            check(&hk, &random_matrix(n, seed * 31 + n as u64, 0.1), seed as usize % n);
        }
    }
}

#[test]
fn ten_nodes_random_matches_brute_force() {
    let hk = HeldKarp::new(SolverConfig::default().with_workers(4));
    check(&hk, &random_matrix(10, 2024, 0.0), 0);
}

#[test]
fn adversarial_instances_match_brute_force() {
    let hk = HeldKarp::new(SolverConfig::default().with_workers(4));
    for n in [5, 8, 10, 12] {
        for seed in 0..2 {
            let m = adversarial_matrix(n, seed);
            check(&hk, &m, 0);
            // A planted cycle always exists.
            assert!(hk.solve(&m, 0).is_ok());
        }
    }
}

#[test]
fn heavily_blocked_instances_agree_on_infeasibility() {
    let hk = HeldKarp::new(SolverConfig::default().with_workers(2));
    let mut infeasible = 0;
    for seed in 0..30 {
        let m = random_matrix(7, 900 + seed, 0.6);
        check(&hk, &m, 0);
        if hk.solve(&m, 0) == Err(SolveError::Infeasible) {
            infeasible += 1;
        }
    }
    assert!(infeasible > 0);
}
