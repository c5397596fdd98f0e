//! Exact TSP by Held-Karp dynamic programming, parallel within each layer.
//!
//! ```
//! use tsp_core::CostMatrix;
//!
//! let matrix = CostMatrix::from_rows(vec![
//!     vec![0.0, 2.0, 9.0],
//!     vec![1.0, 0.0, 6.0],
//!     vec![15.0, 7.0, 0.0],
//! ])
//! .unwrap();
//! let plan = tsp_held_karp::solve(&matrix, 0).unwrap();
//! assert_eq!(plan.path, vec![0, 2, 1, 0]);
//! assert_eq!(plan.cost, 17.0);
//! ```

pub mod config;
pub mod layer;
pub mod pool;
pub mod reconstruct;
pub mod solver;
pub mod table;

pub use config::SolverConfig;
pub use solver::{solve, HeldKarp};
pub use tsp_core::{CostMatrix, SolveError, TourPlan};
