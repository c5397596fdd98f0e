use crate::generate::InstanceKind;
use log::{debug, warn};
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::time::Instant;
use tsp_core::{InvalidInput, SolveError, TourPlan};
use tsp_held_karp::HeldKarp;

/// Outcome of one solver on one instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "kebab-case")]
pub enum Outcome {
    Cost(f64),
    Infeasible,
    Failed(String),
    Skipped,
}

impl From<&Result<TourPlan, SolveError>> for Outcome {
    fn from(result: &Result<TourPlan, SolveError>) -> Self {
        match result {
            Ok(plan) => Outcome::Cost(plan.cost),
            Err(SolveError::Infeasible) => Outcome::Infeasible,
            Err(e) => Outcome::Failed(e.to_string()),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Cost(c) => write!(f, "{c}"),
            Outcome::Infeasible => f.write_str("infeasible"),
            Outcome::Failed(_) => f.write_str("failed"),
            Outcome::Skipped => f.write_str("skipped"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepRecord {
    pub kind: InstanceKind,
    pub n: usize,
    pub seed: u64,
    pub held_karp: Outcome,
    pub brute_force: Outcome,
    /// `None` when brute force was skipped.
    pub agree: Option<bool>,
    /// Whether the Held-Karp tour re-derives to its reported cost.
    pub verified: Option<bool>,
    pub held_karp_ms: f64,
    pub brute_force_ms: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub kinds: Vec<InstanceKind>,
    pub min_n: usize,
    pub max_n: usize,
    pub seeds: u64,
    pub blocked_probability: f64,
    /// Largest N still cross-checked against brute force.
    pub brute_force_limit: usize,
}

impl Default for SweepPlan {
    fn default() -> Self {
        SweepPlan {
            kinds: vec![InstanceKind::Random, InstanceKind::Adversarial],
            min_n: 3,
            max_n: 10,
            seeds: 3,
            blocked_probability: 0.05,
            brute_force_limit: 10,
        }
    }
}

pub fn run(plan: &SweepPlan, solver: &HeldKarp) -> Result<Vec<SweepRecord>, InvalidInput> {
    let mut records = Vec::new();
    for &kind in &plan.kinds {
        for n in plan.min_n..=plan.max_n {
            for seed in 0..plan.seeds {
                let matrix = kind.generate(n, seed, plan.blocked_probability)?;

                let t = Instant::now();
                let held_karp = solver.solve(&matrix, 0);
                let held_karp_ms = t.elapsed().as_secs_f64() * 1e3;
                let verified = held_karp.as_ref().ok().map(|p| p.verify(&matrix).is_ok());

                let (brute_force, brute_force_ms) = if n <= plan.brute_force_limit {
                    let t = Instant::now();
                    let result = tsp_brute_force::solve(&matrix, 0);
                    (Outcome::from(&result), Some(t.elapsed().as_secs_f64() * 1e3))
                } else {
                    (Outcome::Skipped, None)
                };

                let held_karp = Outcome::from(&held_karp);
                let agree = match brute_force {
                    Outcome::Skipped => None,
                    ref bf => Some(*bf == held_karp),
                };
                if agree == Some(false) || verified == Some(false) {
                    warn!(
                        "{kind} n={n} seed={seed}: held-karp {held_karp}, brute force {brute_force}"
                    );
                } else {
                    debug!("{kind} n={n} seed={seed}: {held_karp} in {held_karp_ms:.3} ms");
                }

                records.push(SweepRecord {
                    kind,
                    n,
                    seed,
                    held_karp,
                    brute_force,
                    agree,
                    verified,
                    held_karp_ms,
                    brute_force_ms,
                });
            }
        }
    }
    Ok(records)
}

pub fn write_csv<W: Write>(records: &[SweepRecord], mut out: W) -> io::Result<()> {
    writeln!(out, "kind,n,seed,held_karp,brute_force,agree,verified,held_karp_ms,brute_force_ms")?;
    let opt = |v: Option<bool>| v.map(|b| b.to_string()).unwrap_or_default();
    for r in records {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{:.3},{}",
            r.kind,
            r.n,
            r.seed,
            r.held_karp,
            r.brute_force,
            opt(r.agree),
            opt(r.verified),
            r.held_karp_ms,
            r.brute_force_ms.map(|ms| format!("{ms:.3}")).unwrap_or_default(),
        )?;
    }
    out.flush()
}
