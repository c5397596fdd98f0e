//! Exhaustive permutation search: the slow but obviously correct answer.

use tsp_core::{CostMatrix, ResourceLimit, SolveError, TourPlan};

/// Past this size the factorial blow-up is not worth waiting for.
pub const MAX_NODES: usize = 13;

struct Search<'a> {
    matrix: &'a CostMatrix,
    start: usize,
    full_mask: u32,
    path: Vec<usize>,
    best_cost: f64,
    best_path: Vec<usize>,
}

impl Search<'_> {
    fn dfs(&mut self, last: usize, visited: u32, cost: f64) {
        // Costs never go down, so a partial tour at or above the best is done.
        // The best starts at infinity, which also drops sums that overflow.
        if cost >= self.best_cost {
            return;
        }

        if visited == self.full_mask {
            if let Some(back) = self.matrix.cost(last, self.start) {
                let total = cost + back;
                if total < self.best_cost {
                    self.best_cost = total;
                    self.best_path.clone_from(&self.path);
                }
            }
            return;
        }

        for next in 0..self.matrix.n() {
            let bit = 1 << next;
            if visited & bit != 0 {
                continue;
            }
            let Some(edge) = self.matrix.cost(last, next) else { continue };

            self.path.push(next);
            self.dfs(next, visited | bit, cost + edge);
            self.path.pop();
        }
    }
}

pub fn solve(matrix: &CostMatrix, start: usize) -> Result<TourPlan, SolveError> {
    matrix.check_start(start)?;
    let n = matrix.n();
    if n > MAX_NODES {
        return Err(ResourceLimit::Nodes { n, max: MAX_NODES }.into());
    }
    if n == 1 {
        return Ok(TourPlan { cost: 0.0, path: vec![start, start] });
    }

    let mut search = Search {
        matrix,
        start,
        full_mask: (1u32 << n) - 1,
        path: Vec::with_capacity(n + 1),
        best_cost: f64::INFINITY,
        best_path: Vec::new(),
    };
    search.path.push(start);
    search.dfs(start, 1 << start, 0.0);

    if search.best_path.is_empty() {
        return Err(SolveError::Infeasible);
    }
    let mut path = search.best_path;
    path.push(start);
    Ok(TourPlan { cost: search.best_cost, path })
}
