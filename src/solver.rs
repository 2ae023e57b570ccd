//! Solve entry point: construction, guided search, extraction.

use std::time::Instant;

use tracing::{info, warn};

use crate::config::SolverConfig;
use crate::constructive::path_cheapest_arc;
use crate::gls::{GuidedLocalSearch, SearchStats};
use crate::models::RoutingProblem;
use crate::output::{extract, SolveOutcome};

/// Solves `problem` within the limits of `config`.
///
/// Builds a start solution with [`path_cheapest_arc`]. If some client
/// cannot be placed on any allowed vehicle the result is
/// [`SolveOutcome::Infeasible`] and no search runs. Otherwise the start
/// solution is improved by [`GuidedLocalSearch`] and the best solution
/// found is returned.
///
/// # Examples
///
/// ```
/// use crew_routing::config::SolverConfig;
/// use crew_routing::distance::DistanceMatrix;
/// use crew_routing::models::{Node, RoutingProblem, Vehicle};
/// use crew_routing::solve;
///
/// let nodes: Vec<Node> = (0..5).map(|i| Node::new(i, i as f64 * 10.0, 0.0)).collect();
/// let problem = RoutingProblem::new(
///     DistanceMatrix::from_nodes(&nodes),
///     0,
///     vec![Vehicle::new(0), Vehicle::new(1).with_forbidden([3])],
/// ).unwrap();
///
/// let config = SolverConfig::new().with_step_limit(100);
/// let plan = solve(&problem, &config).plan().cloned().unwrap();
/// assert_eq!(plan.total_distance, 80);
/// assert!(!plan.routes[1].nodes.contains(&3));
/// ```
pub fn solve(problem: &RoutingProblem, config: &SolverConfig) -> SolveOutcome {
    let start = Instant::now();
    info!(
        event = "solve_start",
        nodes = problem.node_count(),
        vehicles = problem.vehicle_count(),
        time_limit_ms = config.time_limit().as_millis() as u64,
    );

    let initial = path_cheapest_arc(problem);
    if !initial.is_complete() {
        warn!(
            event = "construction_failed",
            unassigned = ?initial.unassigned(),
        );
        return extract(problem, &initial, SearchStats::default());
    }

    let result = GuidedLocalSearch::new(problem, config).run(&initial);
    let outcome = extract(problem, &result.best, result.stats);

    if let SolveOutcome::Solved(plan) = &outcome {
        info!(
            event = "solve_end",
            duration_ms = start.elapsed().as_millis() as u64,
            distance = plan.total_distance,
            overage = plan.total_overage,
            objective = plan.objective,
        );
    }
    outcome
}
