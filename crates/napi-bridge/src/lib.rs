#![deny(clippy::all)]

use napi::{Error, Result};
use napi_derive::napi;
use tsp_core::{Instance, SolveError};
use tsp_held_karp::{HeldKarp, SolverConfig};

mod models;

use models::{MatrixInput, SolverOptions, TourOutput};

fn config(options: Option<SolverOptions>) -> SolverConfig {
    let options = options.unwrap_or_default();
    let mut config = SolverConfig {
        workers: options.workers.map(|w| w as usize),
        time_budget_ms: options.time_budget_ms.map(u64::from),
        ..SolverConfig::default()
    };
    if let Some(max_nodes) = options.max_nodes {
        config.max_nodes = max_nodes as usize;
    }
    config
}

/// Infeasibility comes back as `feasible: false`; every other failure throws.
#[napi]
pub fn solve_held_karp(input: MatrixInput, options: Option<SolverOptions>) -> Result<TourOutput> {
    let instance = Instance {
        labels: input.labels.unwrap_or_default(),
        costs: input.costs,
        start: input.start as usize,
    };
    let matrix = instance.matrix().map_err(|e| Error::from_reason(e.to_string()))?;

    match HeldKarp::new(config(options)).solve(&matrix, instance.start) {
        Ok(plan) => {
            let labels = instance.labels();
            Ok(TourOutput {
                feasible: true,
                total_cost: Some(plan.cost),
                labels: plan.labeled(&labels).into_iter().map(String::from).collect(),
                path: plan.path.iter().map(|&v| v as u32).collect(),
            })
        }
        Err(SolveError::Infeasible) => Ok(TourOutput::default()),
        Err(e) => Err(Error::from_reason(e.to_string())),
    }
}
