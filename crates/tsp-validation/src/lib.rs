//! Instance generators and the Held-Karp vs brute-force sweep.

pub mod generate;
pub mod sweep;
pub mod weighting;

pub use generate::InstanceKind;
pub use sweep::{run, write_csv, Outcome, SweepPlan, SweepRecord};
pub use weighting::{Leg, Weighting};
