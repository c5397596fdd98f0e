use rand::Rng;
use serde::{Deserialize, Serialize};
use tsp_core::{CostMatrix, InvalidInput};

/// One resolved road leg between two locations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub duration: f64,
    pub distance: f64,
}

/// Blend of duration and distance into a single travel cost, with random
/// road conditions and closures layered on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weighting {
    pub duration_weight: f64,
    pub distance_weight: f64,
    pub road_factor_min: f64,
    pub road_factor_max: f64,
    /// Chance that a leg is closed outright.
    pub blocked_probability: f64,
}

impl Default for Weighting {
    fn default() -> Self {
        Weighting {
            duration_weight: 0.7,
            distance_weight: 0.5,
            road_factor_min: 0.6,
            road_factor_max: 1.4,
            blocked_probability: 0.05,
        }
    }
}

impl Weighting {
    /// Cost of a single open leg under the given road factor; each term is
    /// truncated to whole units.
    pub fn leg_cost(&self, leg: Leg, road_factor: f64) -> f64 {
        (leg.duration * self.duration_weight).trunc()
            + (leg.distance * self.distance_weight * road_factor).trunc()
    }

    /// Turns an N×N leg matrix into a cost matrix.
    ///
    /// Off-diagonal legs with zero duration were never resolved and are
    /// blocked, as are legs that lose the closure draw.
    pub fn apply<R: Rng>(
        &self,
        legs: &[Vec<Leg>],
        rng: &mut R,
    ) -> Result<CostMatrix, InvalidInput> {
        let n = legs.len();
        let p = self.blocked_probability.clamp(0.0, 1.0);
        let (lo, hi) = if self.road_factor_min <= self.road_factor_max {
            (self.road_factor_min, self.road_factor_max)
        } else {
            (self.road_factor_max, self.road_factor_min)
        };

        let mut rows = Vec::with_capacity(n);
        for (i, row) in legs.iter().enumerate() {
            if row.len() != n {
                return Err(InvalidInput::NotSquare { row: i, len: row.len(), expected: n });
            }
            let costs = row
                .iter()
                .enumerate()
                .map(|(j, &leg)| {
                    if i == j {
                        return 0.0;
                    }
                    let closed = rng.gen_bool(p);
                    let road_factor = if hi > lo { rng.gen_range(lo..hi) } else { lo };
                    if closed || leg.duration == 0.0 {
                        f64::INFINITY
                    } else {
                        self.leg_cost(leg, road_factor)
                    }
                })
                .collect();
            rows.push(costs);
        }
        CostMatrix::from_rows(rows)
    }
}
