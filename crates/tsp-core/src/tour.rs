use crate::matrix::CostMatrix;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An optimal closed tour: starts and ends at the start node and visits
/// every other node exactly once in between.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourPlan {
    pub cost: f64,
    pub path: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TourDefect {
    #[error("path has {len} nodes, a closed tour over {n} nodes needs {}", .n + 1)]
    Length { len: usize, n: usize },
    #[error("path does not start and end at the same node")]
    NotClosed,
    #[error("node {0} is visited more than once")]
    Revisit(usize),
    #[error("node {0} is not a node of the matrix")]
    UnknownNode(usize),
    #[error("path traverses a blocked edge")]
    BlockedEdge,
    #[error("reported cost {reported} differs from recomputed {recomputed}")]
    CostMismatch { reported: f64, recomputed: f64 },
}

impl TourPlan {
    pub fn start(&self) -> Option<usize> {
        self.path.first().copied()
    }

    /// Re-derives the tour from scratch against `matrix`.
    ///
    /// The recomputed cost has to match exactly: the solver accumulates edge
    /// costs in travel order, the same order used here.
    pub fn verify(&self, matrix: &CostMatrix) -> Result<(), TourDefect> {
        let n = matrix.n();
        if self.path.len() != n + 1 {
            return Err(TourDefect::Length { len: self.path.len(), n });
        }
        if self.path.first() != self.path.last() {
            return Err(TourDefect::NotClosed);
        }

        let mut seen = vec![false; n];
        for &node in &self.path[..n] {
            if node >= n {
                return Err(TourDefect::UnknownNode(node));
            }
            if seen[node] {
                return Err(TourDefect::Revisit(node));
            }
            seen[node] = true;
        }

        let recomputed = matrix.path_cost(&self.path).ok_or(TourDefect::BlockedEdge)?;
        if recomputed != self.cost {
            return Err(TourDefect::CostMismatch { reported: self.cost, recomputed });
        }
        Ok(())
    }

    /// The path rendered through a parallel array of node labels.
    pub fn labeled<'a, S: AsRef<str>>(&self, labels: &'a [S]) -> Vec<&'a str> {
        self.path
            .iter()
            .filter_map(|&node| labels.get(node).map(AsRef::as_ref))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> CostMatrix {
        CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 2.0, 1.0],
            vec![1.0, 0.0, 1.0, 2.0],
            vec![2.0, 1.0, 0.0, 1.0],
            vec![1.0, 2.0, f64::INFINITY, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn accepts_a_valid_tour() {
        let plan = TourPlan { cost: 4.0, path: vec![0, 1, 2, 3, 0] };
        assert_eq!(plan.verify(&square()), Ok(()));
        assert_eq!(plan.start(), Some(0));
    }

    #[test]
    fn flags_each_defect() {
        let m = square();
        let short = TourPlan { cost: 4.0, path: vec![0, 1, 2, 0] };
        assert!(matches!(short.verify(&m), Err(TourDefect::Length { .. })));

        let open = TourPlan { cost: 4.0, path: vec![0, 1, 2, 3, 1] };
        assert_eq!(open.verify(&m), Err(TourDefect::NotClosed));

        let revisit = TourPlan { cost: 4.0, path: vec![0, 1, 1, 3, 0] };
        assert_eq!(revisit.verify(&m), Err(TourDefect::Revisit(1)));

        let blocked = TourPlan { cost: 4.0, path: vec![0, 1, 3, 2, 0] };
        assert_eq!(blocked.verify(&m), Err(TourDefect::BlockedEdge));

        let wrong = TourPlan { cost: 3.0, path: vec![0, 1, 2, 3, 0] };
        assert!(matches!(wrong.verify(&m), Err(TourDefect::CostMismatch { .. })));
    }

    #[test]
    fn single_node_tour_ignores_the_diagonal() {
        let plan = TourPlan { cost: 0.0, path: vec![0, 0] };
        for diagonal in [0.0, 5.0, f64::INFINITY] {
            let m = CostMatrix::from_rows(vec![vec![diagonal]]).unwrap();
            assert_eq!(plan.verify(&m), Ok(()));
        }
    }

    #[test]
    fn labels_follow_the_path() {
        let plan = TourPlan { cost: 0.0, path: vec![2, 0, 1, 2] };
        let labels = ["Lyon", "Paris", "Nantes"];
        assert_eq!(plan.labeled(&labels), vec!["Nantes", "Lyon", "Paris", "Nantes"]);
    }
}
