//! Solves one instance file and prints the labelled tour as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tsp_core::{Instance, SolveError};
use tsp_held_karp::{HeldKarp, SolverConfig};

#[derive(Parser)]
#[command(name = "tsp-solve")]
#[command(about = "Exact TSP tour for a JSON cost-matrix instance")]
struct Cli {
    /// Instance JSON: {"labels": [...], "costs": [[...]], "start": 0}, null = no edge
    instance: PathBuf,

    /// Override the start node from the file
    #[arg(long)]
    start: Option<usize>,

    /// Worker threads (0 = all CPUs)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Safety ceiling on the number of nodes
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Wall-clock budget in milliseconds
    #[arg(long)]
    time_budget_ms: Option<u64>,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
enum Report {
    Solved { cost: f64, path: Vec<usize>, labels: Vec<String> },
    Infeasible,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    let raw = fs::read_to_string(&cli.instance)
        .with_context(|| format!("reading {}", cli.instance.display()))?;
    let mut instance = Instance::from_json_str(&raw)
        .with_context(|| format!("loading {}", cli.instance.display()))?;
    if let Some(start) = cli.start {
        instance.start = start;
    }
    let matrix = instance.matrix()?;

    let mut config = SolverConfig {
        workers: cli.workers,
        time_budget_ms: cli.time_budget_ms,
        ..SolverConfig::default()
    };
    if let Some(max_nodes) = cli.max_nodes {
        config.max_nodes = max_nodes;
    }
    let solver = HeldKarp::new(config);
    info!("solving {} nodes from {} on {} workers", matrix.n(), instance.start, solver.workers());

    let report = match solver.solve(&matrix, instance.start) {
        Ok(plan) => {
            let labels = instance.labels();
            Report::Solved {
                cost: plan.cost,
                labels: plan.labeled(&labels).into_iter().map(String::from).collect(),
                path: plan.path,
            }
        }
        Err(SolveError::Infeasible) => Report::Infeasible,
        Err(e) => return Err(e).context("solving instance"),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
