//! Guided local search over a complete solution.
//!
//! # Algorithm
//!
//! 1. Run best-improvement descent on the augmented objective
//!    `objective + λ × Σ count(edge)` over the enabled neighborhoods.
//! 2. At a local optimum, set `λ = coefficient × best distance / clients`
//!    and add one to the count of the current edge with the highest
//!    utility `distance / (1 + count)`.
//! 3. Repeat until the time limit or step limit is reached.
//!
//! The best solution by true objective (distance plus soft-cap penalty) is
//! recorded after every accepted move, so the result is never worse than
//! the starting solution.
//!
//! # Reference
//!
//! Voudouris, C. & Tsang, E. (1999). "Guided local search and its
//! application to the traveling salesman problem", *European Journal of
//! Operational Research* 113(2), 469-499.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, trace};

use super::penalties::GuidedPenalties;
use crate::config::SolverConfig;
use crate::evaluation::ConstraintEvaluator;
use crate::local_search::{find_best_move, MoveContext, RouteState};
use crate::models::{RoutingProblem, Solution};

/// Counters describing one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SearchStats {
    /// Accepted moves.
    pub steps: u64,
    /// Edge penalizations at local optima.
    pub penalizations: u64,
    /// Times the best solution improved.
    pub improvements: u64,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
    /// λ at the end of the run.
    pub lambda: f64,
}

/// Best solution found and how the search got there.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best solution by true objective; never worse than the start.
    pub best: Solution,
    /// Distance plus soft-cap penalty of `best`.
    pub best_objective: i64,
    /// Counters of the run.
    pub stats: SearchStats,
}

/// Guided local search engine bound to one problem.
///
/// # Examples
///
/// ```
/// use crew_routing::config::SolverConfig;
/// use crew_routing::constructive::path_cheapest_arc;
/// use crew_routing::distance::DistanceMatrix;
/// use crew_routing::gls::GuidedLocalSearch;
/// use crew_routing::models::{Node, RoutingProblem, Vehicle};
///
/// let nodes = vec![
///     Node::new(0, 0.0, 0.0),
///     Node::new(1, 10.0, 0.0),
///     Node::new(2, 10.0, 10.0),
///     Node::new(3, 0.0, 10.0),
/// ];
/// let problem = RoutingProblem::new(
///     DistanceMatrix::from_nodes(&nodes), 0, vec![Vehicle::new(0), Vehicle::new(1)],
/// ).unwrap();
///
/// let initial = path_cheapest_arc(&problem);
/// let config = SolverConfig::new().with_step_limit(200);
/// let result = GuidedLocalSearch::new(&problem, &config).run(&initial);
/// assert_eq!(result.best.num_served(), 3);
/// assert!(result.best_objective <= initial.total_distance());
/// ```
pub struct GuidedLocalSearch<'a> {
    problem: &'a RoutingProblem,
    config: &'a SolverConfig,
}

impl<'a> GuidedLocalSearch<'a> {
    pub fn new(problem: &'a RoutingProblem, config: &'a SolverConfig) -> Self {
        Self { problem, config }
    }

    /// Improves `initial` until the configured limits are reached.
    ///
    /// Unassigned nodes of `initial` are carried over unchanged; only the
    /// routes are searched.
    pub fn run(&self, initial: &Solution) -> SearchResult {
        let start = Instant::now();
        // At most `MAX_TIME_LIMIT`, so the deadline is always representable.
        let time_limit = self.config.time_limit();
        let deadline = start + time_limit;
        let step_limit = self.config.termination.step_count_limit;
        let ls = &self.config.local_search;

        let evaluator = ConstraintEvaluator::new(self.problem);
        let mut state = RouteState::from_solution(&evaluator, initial);
        let mut best = state.clone();
        let mut best_objective = best.objective(&evaluator);
        let mut penalties = GuidedPenalties::new(self.problem.node_count());
        let mut stats = SearchStats::default();

        info!(
            event = "search_start",
            nodes = self.problem.node_count(),
            vehicles = self.problem.vehicle_count(),
            time_limit_ms = time_limit.as_millis() as u64,
            step_limit = ?step_limit,
            objective = best_objective,
        );

        loop {
            if Instant::now() >= deadline
                || step_limit.is_some_and(|limit| stats.steps + stats.penalizations >= limit)
            {
                break;
            }

            let ctx = MoveContext::new(evaluator, &penalties, Some(deadline));
            if let Some(found) = find_best_move(&state, &ctx, ls) {
                state.apply(found.mv, &evaluator);
                stats.steps += 1;

                let objective = state.objective(&evaluator);
                if objective < best_objective {
                    best_objective = objective;
                    best = state.clone();
                    stats.improvements += 1;
                    debug!(
                        event = "new_best",
                        step = stats.steps,
                        objective,
                        distance = state.total_distance(),
                    );
                }
                continue;
            }
            if ctx.expired() {
                break;
            }

            let customers = self.problem.num_customers();
            let lambda = if customers == 0 {
                0.0
            } else {
                ls.lambda_coefficient * best.total_distance() as f64 / customers as f64
            };
            penalties.set_lambda(lambda);
            stats.lambda = lambda;
            if lambda <= 0.0 {
                debug!(event = "search_stalled", reason = "zero lambda");
                break;
            }

            let problem = self.problem;
            match penalties.penalize_max_utility(state.edges(), |a, b| problem.distance(a, b)) {
                Some(((from, to), count)) => {
                    stats.penalizations += 1;
                    trace!(event = "penalize", from, to, count, lambda);
                }
                None => {
                    debug!(event = "search_stalled", reason = "no edges");
                    break;
                }
            }
        }

        stats.elapsed = start.elapsed();
        info!(
            event = "search_end",
            duration_ms = stats.elapsed.as_millis() as u64,
            steps = stats.steps,
            penalizations = stats.penalizations,
            improvements = stats.improvements,
            objective = best_objective,
            distance = best.total_distance(),
        );

        let mut solution = best.to_solution(&evaluator);
        for &node in initial.unassigned() {
            solution.add_unassigned(node);
        }
        SearchResult {
            best: solution,
            best_objective,
            stats,
        }
    }
}
