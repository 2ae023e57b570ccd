//! Output contract returned by [`solve`](crate::solve).

mod plan;

pub use plan::{extract, RoutePlan, SolveOutcome, VehicleRoute};
