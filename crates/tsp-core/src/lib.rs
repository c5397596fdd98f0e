//! Shared types for the exact TSP solvers.

pub mod error;
pub mod instance;
pub mod matrix;
pub mod subset;
pub mod tour;

pub use error::{InstanceError, InvalidInput, ResourceLimit, SolveError};
pub use instance::Instance;
pub use matrix::CostMatrix;
pub use subset::{Combinations, Subset, SubsetSpace, MAX_NODES};
pub use tour::{TourDefect, TourPlan};
