//! # crew-routing
//!
//! Multi-vehicle routing library: a depot, a set of clients, and a fixed
//! crew of vehicles with per-vehicle forbidden clients and soft distance
//! caps. Routes are built by cheapest-arc construction and improved by
//! guided local search under a time budget.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Node, Vehicle, Route, Solution, RoutingProblem)
//! - [`distance`] — Integer distance matrix
//! - [`evaluation`] — Feasibility checks, soft-cap penalty and objective
//! - [`constructive`] — Path-cheapest-arc construction
//! - [`local_search`] — Move generators (relocate, exchange, 2-opt, 2-opt*)
//! - [`gls`] — Guided local search engine
//! - [`output`] — Solve result types
//! - [`config`] — Solver configuration (TOML)
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use crew_routing::config::SolverConfig;
//! use crew_routing::distance::DistanceMatrix;
//! use crew_routing::models::{Node, RoutingProblem, Vehicle};
//! use crew_routing::output::SolveOutcome;
//!
//! let nodes: Vec<Node> = (0..5).map(|i| Node::new(i, i as f64 * 10.0, 0.0)).collect();
//! let problem = RoutingProblem::new(
//!     DistanceMatrix::from_nodes(&nodes),
//!     0,
//!     vec![Vehicle::new(0).with_soft_cap(1000)],
//! ).unwrap();
//!
//! let config = SolverConfig::new().with_step_limit(50);
//! match crew_routing::solve(&problem, &config) {
//!     SolveOutcome::Solved(plan) => {
//!         assert_eq!(plan.routes[0].nodes, vec![0, 1, 2, 3, 4, 0]);
//!         assert_eq!(plan.total_distance, 80);
//!     }
//!     SolveOutcome::Infeasible { .. } => unreachable!(),
//! }
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod gls;
pub mod local_search;
pub mod models;
pub mod output;
mod solver;

pub use solver::solve;
