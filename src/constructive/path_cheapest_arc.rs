//! Path-cheapest-arc constructive heuristic.
//!
//! # Algorithm
//!
//! Every vehicle keeps an open route whose end starts at the depot. At each
//! step, over all `(vehicle, unassigned node)` pairs where the vehicle may
//! visit the node, pick the one with the cheapest arc
//! `distance(route_end(vehicle), node)` and append the node to that route.
//! Ties go to the lowest vehicle id, then the lowest node id, so the result
//! is a pure function of the problem.
//!
//! Construction stops when every node is placed, or when nodes remain but no
//! vehicle may take any of them. Those nodes are returned as unassigned.
//!
//! # Complexity
//!
//! O(n² × k) where n = nodes, k = vehicles.

use tracing::debug;

use crate::evaluation::ConstraintEvaluator;
use crate::models::{Route, RoutingProblem, Solution};

/// Builds an initial solution with the path-cheapest-arc rule.
///
/// Every vehicle gets a route, possibly empty. A vehicle with a hard
/// maximum distance only takes a node if its route, closed back to the
/// depot through that node, still fits.
///
/// # Examples
///
/// ```
/// use crew_routing::models::{Node, RoutingProblem, Vehicle};
/// use crew_routing::distance::DistanceMatrix;
/// use crew_routing::constructive::path_cheapest_arc;
///
/// let nodes: Vec<Node> = (0..5).map(|i| Node::new(i, i as f64 * 10.0, 0.0)).collect();
/// let problem = RoutingProblem::new(
///     DistanceMatrix::from_nodes(&nodes),
///     0,
///     vec![Vehicle::new(0).with_soft_cap(1000)],
/// ).unwrap();
///
/// let solution = path_cheapest_arc(&problem);
/// assert!(solution.is_complete());
/// assert_eq!(solution.routes()[0].stops(), &[1, 2, 3, 4]);
/// assert_eq!(solution.total_distance(), 80);
/// ```
pub fn path_cheapest_arc(problem: &RoutingProblem) -> Solution {
    let evaluator = ConstraintEvaluator::new(problem);
    let depot = problem.depot();
    let k = problem.vehicle_count();

    let mut unassigned: Vec<usize> = problem.customers().collect();
    let mut routes: Vec<Route> = (0..k).map(Route::new).collect();
    // Length of each open route, depot to current end.
    let mut open_len = vec![0i64; k];

    while !unassigned.is_empty() {
        let mut best: Option<(usize, usize, i64)> = None;

        for (v, route) in routes.iter().enumerate() {
            let end = route.last_or(depot);
            for (idx, &node) in unassigned.iter().enumerate() {
                if !evaluator.feasible_to_insert(v, node) {
                    continue;
                }
                let arc = problem.distance(end, node);
                let closed = open_len[v]
                    .saturating_add(arc)
                    .saturating_add(problem.distance(node, depot));
                if !evaluator.within_max_distance(v, closed) {
                    continue;
                }
                if best.is_none_or(|(_, _, d)| arc < d) {
                    best = Some((v, idx, arc));
                }
            }
        }

        let Some((v, idx, arc)) = best else {
            break;
        };
        let node = unassigned.remove(idx);
        routes[v].push_stop(node);
        open_len[v] = open_len[v].saturating_add(arc);
    }

    let mut solution = Solution::new();
    for (v, mut route) in routes.into_iter().enumerate() {
        let closed = open_len[v].saturating_add(problem.distance(route.last_or(depot), depot));
        route.set_total_distance(closed);
        solution.add_route(route);
    }
    for node in unassigned {
        solution.add_unassigned(node);
    }

    debug!(
        event = "construction_end",
        served = solution.num_served(),
        unassigned = solution.num_unassigned(),
        distance = solution.total_distance(),
    );

    solution
}
