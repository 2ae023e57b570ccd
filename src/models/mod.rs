//! Domain model types for crew routing problems.
//!
//! Provides the core abstractions: nodes with coordinates, vehicles with
//! forbidden sets and distance caps, routes as ordered sequences of visits,
//! and the validated problem that ties everything together.

mod input;
mod node;
mod problem;
mod route;
mod solution;
mod vehicle;

pub use input::ProblemInput;
pub use node::Node;
pub use problem::{RoutingProblem, DEFAULT_PENALTY_WEIGHT};
pub use route::Route;
pub use solution::{Solution, Violation, ViolationType};
pub use vehicle::Vehicle;
