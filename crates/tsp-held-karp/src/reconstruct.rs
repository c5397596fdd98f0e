use crate::table::DpTable;
use tsp_core::{CostMatrix, SolveError, TourPlan};

/// Closes the cheapest full-subset entry back to the start and walks the
/// predecessor chain to recover the visiting order.
pub fn reconstruct(table: &DpTable, matrix: &CostMatrix) -> Result<TourPlan, SolveError> {
    let space = table.space();
    let start = space.start();
    let full = space.full();

    let mut best: Option<(f64, usize)> = None;
    for last in full.nodes() {
        let Some(step) = table.lookup(full, last) else { continue };
        let Some(back) = matrix.cost(last, start) else { continue };
        let total = step.cost + back;
        if !total.is_finite() {
            continue;
        }
        if best.map_or(true, |(cost, _)| total < cost) {
            best = Some((total, last));
        }
    }
    let (cost, last) = best.ok_or(SolveError::Infeasible)?;

    let mut path = Vec::with_capacity(space.n() + 1);
    let mut subset = full;
    let mut node = last;
    while !subset.is_empty() {
        path.push(node);
        // Every entry on the chain was reached, so its predecessor exists.
        let step = table.lookup(subset, node).ok_or(SolveError::Infeasible)?;
        subset = subset.without(node);
        node = step.predecessor();
    }
    path.push(start);
    path.reverse();
    path.push(start);

    Ok(TourPlan { cost, path })
}
