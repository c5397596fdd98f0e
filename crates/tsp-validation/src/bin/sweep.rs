//! Cross-checks Held-Karp against brute force over seeded instances and
//! writes one CSV row per instance.

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tsp_held_karp::{HeldKarp, SolverConfig};
use tsp_validation::{InstanceKind, SweepPlan};

#[derive(Parser)]
#[command(name = "tsp-sweep")]
#[command(about = "Compare the Held-Karp solver with brute force on generated instances")]
struct Cli {
    /// Instance families to generate
    #[arg(long, value_enum, value_delimiter = ',', default_value = "random,adversarial")]
    kinds: Vec<InstanceKind>,

    #[arg(long, default_value_t = 3)]
    min_n: usize,

    #[arg(long, default_value_t = 10)]
    max_n: usize,

    /// Seeds per (kind, n)
    #[arg(long, default_value_t = 3)]
    seeds: u64,

    /// Edge closure probability for random instances
    #[arg(long, default_value_t = 0.05)]
    blocked: f64,

    /// Largest N still checked by brute force
    #[arg(long, default_value_t = 10)]
    brute_force_limit: usize,

    /// Worker threads (0 = all CPUs)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Solver configuration as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV destination, stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    if cli.min_n == 0 || cli.min_n > cli.max_n {
        bail!("invalid size range {}..={}", cli.min_n, cli.max_n);
    }

    let mut config = match &cli.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))?
        }
        None => SolverConfig::default(),
    };
    if cli.workers.is_some() {
        config.workers = cli.workers;
    }

    let solver = HeldKarp::new(config);
    info!("sweeping n={}..={} on {} workers", cli.min_n, cli.max_n, solver.workers());

    let plan = SweepPlan {
        kinds: cli.kinds,
        min_n: cli.min_n,
        max_n: cli.max_n,
        seeds: cli.seeds,
        blocked_probability: cli.blocked,
        brute_force_limit: cli.brute_force_limit,
    };
    let records = tsp_validation::run(&plan, &solver).context("generating instances")?;

    let disagreements = records.iter().filter(|r| r.agree == Some(false)).count();
    let unverified = records.iter().filter(|r| r.verified == Some(false)).count();
    info!(
        "{} instances, {disagreements} disagreements, {unverified} unverified tours",
        records.len()
    );

    match &cli.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            tsp_validation::write_csv(&records, BufWriter::new(file))?;
        }
        None => tsp_validation::write_csv(&records, io::stdout().lock())?,
    }

    if disagreements > 0 || unverified > 0 {
        bail!("sweep found {disagreements} disagreements and {unverified} unverified tours");
    }
    Ok(())
}
