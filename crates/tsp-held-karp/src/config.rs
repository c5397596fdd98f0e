use serde::{Deserialize, Serialize};
use std::time::Duration;
use tsp_core::MAX_NODES;

/// Tuning and safety ceilings for [`HeldKarp`](crate::HeldKarp).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Pool size. `None` or `0` uses every logical CPU.
    pub workers: Option<usize>,
    /// Largest instance accepted; clamped to the bitmask width.
    pub max_nodes: usize,
    /// Ceiling on DP slots summed over all layers.
    pub max_table_entries: usize,
    /// Wall-clock budget, checked before each layer.
    pub time_budget_ms: Option<u64>,
    /// Subset slices handed to each worker per layer.
    pub chunks_per_worker: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            workers: None,
            max_nodes: 24,
            max_table_entries: 1 << 26,
            time_budget_ms: None,
            chunks_per_worker: 4,
        }
    }
}

impl SolverConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn worker_count(&self) -> usize {
        match self.workers {
            Some(w) if w > 0 => w,
            _ => num_cpus::get(),
        }
    }

    pub fn node_ceiling(&self) -> usize {
        self.max_nodes.min(MAX_NODES)
    }

    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    pub(crate) fn chunk_count(&self, workers: usize, subsets: usize) -> usize {
        workers.saturating_mul(self.chunks_per_worker.max(1)).min(subsets).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_workers_means_all_cpus() {
        let cfg = SolverConfig::default().with_workers(0);
        assert_eq!(cfg.worker_count(), num_cpus::get());
        assert_eq!(SolverConfig::default().with_workers(3).worker_count(), 3);
    }

    #[test]
    fn node_ceiling_never_exceeds_mask_width() {
        let cfg = SolverConfig { max_nodes: 100, ..SolverConfig::default() };
        assert_eq!(cfg.node_ceiling(), MAX_NODES);
    }

    #[test]
    fn chunk_count_is_bounded_by_subsets() {
        let cfg = SolverConfig::default();
        assert_eq!(cfg.chunk_count(8, 3), 3);
        assert_eq!(cfg.chunk_count(2, 1000), 8);
        assert_eq!(cfg.chunk_count(4, 0), 1);

        let huge = SolverConfig { chunks_per_worker: usize::MAX, ..SolverConfig::default() };
        assert_eq!(huge.chunk_count(2, usize::MAX), usize::MAX);
        assert_eq!(huge.chunk_count(2, 35), 35);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: SolverConfig =
            serde_json::from_str(r#"{"workers": 2, "time_budget_ms": 500}"#).unwrap();
        assert_eq!(cfg.workers, Some(2));
        assert_eq!(cfg.time_budget(), Some(Duration::from_millis(500)));
        assert_eq!(cfg.max_nodes, 24);
    }
}
