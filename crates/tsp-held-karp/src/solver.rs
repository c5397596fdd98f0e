use crate::config::SolverConfig;
use crate::layer::LayerSolver;
use crate::pool::WorkerPool;
use crate::reconstruct::reconstruct;
use crate::table::{total_entries, DpTable};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Instant;
use tsp_core::{CostMatrix, ResourceLimit, SolveError, SubsetSpace, TourPlan};

/// Exact Held-Karp solver with its own worker pool.
///
/// Layers `2..n` are solved one after another; within a layer, subsets are
/// spread across the pool. Building a `HeldKarp` starts the threads, so keep
/// one around when solving many instances.
pub struct HeldKarp {
    config: SolverConfig,
    pool: WorkerPool,
}

impl Default for HeldKarp {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl HeldKarp {
    pub fn new(config: SolverConfig) -> Self {
        let pool = WorkerPool::new(config.worker_count());
        HeldKarp { config, pool }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn workers(&self) -> usize {
        self.pool.size()
    }

    pub fn solve(&self, matrix: &CostMatrix, start: usize) -> Result<TourPlan, SolveError> {
        matrix.check_start(start)?;
        let n = matrix.n();
        let ceiling = self.config.node_ceiling();
        if n > ceiling {
            warn!("refusing {n}-node instance, ceiling is {ceiling}");
            return Err(ResourceLimit::Nodes { n, max: ceiling }.into());
        }

        match n {
            1 => return Ok(TourPlan { cost: 0.0, path: vec![start, start] }),
            2 => return round_trip(matrix, start),
            _ => {}
        }

        let space = Arc::new(SubsetSpace::new(n, start)?);
        let required = total_entries(&space);
        if required > self.config.max_table_entries {
            warn!("{n}-node instance needs {required} table entries");
            return Err(ResourceLimit::TableEntries {
                layer: n - 1,
                required,
                max: self.config.max_table_entries,
            }
            .into());
        }

        let started = Instant::now();
        let matrix = Arc::new(matrix.clone());
        let mut table = DpTable::seeded(Arc::clone(&space), &matrix);
        let chunks = self.config.chunk_count(self.pool.size().max(1), usize::MAX);
        let solver = LayerSolver::new(&self.pool, chunks);

        for k in 2..n {
            self.check_time(k, started)?;
            let layer_started = Instant::now();
            let layer = solver.solve(&matrix, &space, &table.latest(), k)?;
            debug!(
                "layer {k}/{}: {} subsets, {}/{} entries reachable in {:?}",
                n - 1,
                space.layer_len(k),
                layer.reachable(),
                layer.len(),
                layer_started.elapsed()
            );
            table.seal(layer);
        }

        let plan = reconstruct(&table, &matrix)?;
        info!(
            "solved {n} nodes from {start}: cost {} with {} entries in {:?}",
            plan.cost,
            table.entries(),
            started.elapsed()
        );
        Ok(plan)
    }

    /// Runs before layer `k` is allocated; a failure drops the partial table.
    /// The table size needs no per-layer check, the up-front total covers it.
    fn check_time(&self, k: usize, started: Instant) -> Result<(), SolveError> {
        if let Some(budget) = self.config.time_budget() {
            let elapsed = started.elapsed();
            if elapsed >= budget {
                warn!("aborting before layer {k}: {elapsed:?} spent of {budget:?}");
                return Err(ResourceLimit::TimeBudget { layer: k, elapsed, budget }.into());
            }
        }
        Ok(())
    }
}

fn round_trip(matrix: &CostMatrix, start: usize) -> Result<TourPlan, SolveError> {
    let other = 1 - start;
    let there = matrix.cost(start, other).ok_or(SolveError::Infeasible)?;
    let back = matrix.cost(other, start).ok_or(SolveError::Infeasible)?;
    let cost = there + back;
    if !cost.is_finite() {
        return Err(SolveError::Infeasible);
    }
    Ok(TourPlan { cost, path: vec![start, other, start] })
}

/// Solves with the default configuration on a fresh pool.
pub fn solve(matrix: &CostMatrix, start: usize) -> Result<TourPlan, SolveError> {
    HeldKarp::default().solve(matrix, start)
}
