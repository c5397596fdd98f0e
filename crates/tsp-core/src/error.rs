use std::time::Duration;
use thiserror::Error;

/// Reasons an instance is rejected before any computation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("cost matrix has no nodes")]
    Empty,
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },
    #[error("cost {from}->{to} is negative ({value})")]
    NegativeCost { from: usize, to: usize, value: f64 },
    #[error("cost {from}->{to} is not a number")]
    NotANumber { from: usize, to: usize },
    #[error("start node {start} is out of range for {n} nodes")]
    StartOutOfRange { start: usize, n: usize },
    #[error("{labels} labels given for {n} nodes")]
    LabelCount { labels: usize, n: usize },
    #[error("a tour needs at least 3 nodes to enumerate layers, got {n}")]
    TooFewNodes { n: usize },
    #[error("layer size {k} is outside [2, {}] for {n} nodes", .n.saturating_sub(1))]
    LayerOutOfRange { k: usize, n: usize },
}

/// Ceilings that stop the exponential blow-up before memory or time runs out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceLimit {
    #[error("{n} nodes exceed the ceiling of {max}")]
    Nodes { n: usize, max: usize },
    #[error("layer {layer} needs {required} table entries, ceiling is {max}")]
    TableEntries { layer: usize, required: usize, max: usize },
    #[error("time budget of {budget:?} exhausted before layer {layer} ({elapsed:?} elapsed)")]
    TimeBudget { layer: usize, elapsed: Duration, budget: Duration },
}

/// Global outcomes a solver reports to its caller.
///
/// Per-subset dead ends are not errors; only conditions about the whole
/// instance surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("no Hamiltonian cycle exists under the blocked edges")]
    Infeasible,
    #[error("resource ceiling reached: {0}")]
    ResourceExceeded(#[from] ResourceLimit),
    #[error("a worker died while solving layer {layer}")]
    WorkerFailed { layer: usize },
}

/// Failure to load an [`Instance`](crate::Instance) from JSON.
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("malformed instance JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] InvalidInput),
}
