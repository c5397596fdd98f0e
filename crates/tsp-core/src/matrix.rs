use crate::error::InvalidInput;

/// Frozen N×N travel costs with an explicit "no edge" marker.
///
/// Costs are stored row-major in a flat vector. A blocked transition is
/// `None`, so it can never leak into arithmetic as a large finite value.
/// The matrix is never mutated after construction and is shared read-only
/// by every worker of a solve.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    n: usize,
    costs: Vec<Option<f64>>,
}

impl CostMatrix {
    /// Builds a matrix from raw rows where `f64::INFINITY` marks a blocked edge.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, InvalidInput> {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Some).collect())
            .collect();
        Self::from_options(rows)
    }

    /// Builds a matrix where `None` (or `+inf`) marks a blocked edge.
    pub fn from_options(rows: Vec<Vec<Option<f64>>>) -> Result<Self, InvalidInput> {
        let n = rows.len();
        if n == 0 {
            return Err(InvalidInput::Empty);
        }

        let mut costs = Vec::with_capacity(n * n);
        for (from, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(InvalidInput::NotSquare { row: from, len: row.len(), expected: n });
            }
            for (to, value) in row.into_iter().enumerate() {
                costs.push(match value {
                    None => None,
                    Some(v) if v.is_nan() => return Err(InvalidInput::NotANumber { from, to }),
                    Some(v) if v < 0.0 => {
                        return Err(InvalidInput::NegativeCost { from, to, value: v })
                    }
                    Some(v) if v.is_infinite() => None,
                    Some(v) => Some(v),
                });
            }
        }

        Ok(CostMatrix { n, costs })
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Direct cost of `from -> to`, `None` when the edge is blocked.
    #[inline(always)]
    pub fn cost(&self, from: usize, to: usize) -> Option<f64> {
        self.costs[from * self.n + to]
    }

    #[inline]
    pub fn is_blocked(&self, from: usize, to: usize) -> bool {
        self.cost(from, to).is_none()
    }

    pub fn check_start(&self, start: usize) -> Result<(), InvalidInput> {
        if start >= self.n {
            return Err(InvalidInput::StartOutOfRange { start, n: self.n });
        }
        Ok(())
    }

    /// Sums the edge costs along `path` in travel order.
    ///
    /// Returns `None` if any step uses a blocked edge or an out-of-range node.
    /// Staying put costs nothing: the diagonal is never charged.
    pub fn path_cost(&self, path: &[usize]) -> Option<f64> {
        let mut total = 0.0;
        for pair in path.windows(2) {
            if pair[0] >= self.n || pair[1] >= self.n {
                return None;
            }
            if pair[0] != pair[1] {
                total += self.cost(pair[0], pair[1])?;
            }
        }
        Some(total)
    }

    /// Rows with `None` for blocked edges, the shape used for JSON interchange.
    pub fn to_rows(&self) -> Vec<Vec<Option<f64>>> {
        self.costs.chunks(self.n).map(|row| row.to_vec()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INF: f64 = f64::INFINITY;

    #[test]
    fn infinity_becomes_blocked() {
        let m = CostMatrix::from_rows(vec![vec![0.0, INF], vec![3.0, 0.0]]).unwrap();
        assert!(m.is_blocked(0, 1));
        assert_eq!(m.cost(1, 0), Some(3.0));
        assert_eq!(m.n(), 2);
    }

    #[test]
    fn rejects_bad_shapes_and_values() {
        assert_eq!(CostMatrix::from_rows(vec![]), Err(InvalidInput::Empty));
        assert_eq!(
            CostMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]),
            Err(InvalidInput::NotSquare { row: 1, len: 1, expected: 2 })
        );
        assert_eq!(
            CostMatrix::from_rows(vec![vec![0.0, -2.0], vec![1.0, 0.0]]),
            Err(InvalidInput::NegativeCost { from: 0, to: 1, value: -2.0 })
        );
        assert_eq!(
            CostMatrix::from_rows(vec![vec![0.0, f64::NAN], vec![1.0, 0.0]]),
            Err(InvalidInput::NotANumber { from: 0, to: 1 })
        );
        assert!(matches!(
            CostMatrix::from_rows(vec![vec![0.0, f64::NEG_INFINITY], vec![1.0, 0.0]]),
            Err(InvalidInput::NegativeCost { .. })
        ));
    }

    #[test]
    fn path_cost_sums_in_order_and_stops_at_blocked() {
        let m = CostMatrix::from_rows(vec![
            vec![0.0, 1.0, 4.0],
            vec![2.0, 0.0, INF],
            vec![5.0, 3.0, 0.0],
        ])
        .unwrap();
        assert_eq!(m.path_cost(&[0, 2, 1, 0]), Some(9.0));
        assert_eq!(m.path_cost(&[0, 1, 2, 0]), None);
        assert_eq!(m.path_cost(&[0, 7]), None);
        assert_eq!(m.path_cost(&[1]), Some(0.0));
    }

    #[test]
    fn diagonal_is_never_charged() {
        let m = CostMatrix::from_rows(vec![vec![5.0, 1.0], vec![2.0, INF]]).unwrap();
        assert_eq!(m.path_cost(&[0, 0]), Some(0.0));
        assert_eq!(m.path_cost(&[1, 1]), Some(0.0));
        assert_eq!(m.path_cost(&[0, 0, 1, 0]), Some(3.0));
        assert_eq!(m.path_cost(&[2, 2]), None);
    }

    #[test]
    fn start_must_be_a_node() {
        let m = CostMatrix::from_rows(vec![vec![0.0]]).unwrap();
        assert!(m.check_start(0).is_ok());
        assert_eq!(m.check_start(1), Err(InvalidInput::StartOutOfRange { start: 1, n: 1 }));
    }

    #[test]
    fn rows_round_trip_through_options() {
        let rows = vec![vec![Some(0.0), None], vec![Some(1.5), Some(0.0)]];
        let m = CostMatrix::from_options(rows.clone()).unwrap();
        assert_eq!(m.to_rows(), rows);
    }
}
