//! Intra-route 2-opt.
//!
//! # Algorithm
//!
//! For stops `i < j` of one route, reversing `r[i..=j]` replaces the arcs
//! `(p, r[i])` and `(r[j], n)` with `(p, r[j])` and `(r[i], n)`:
//!
//! ```text
//! delta = d(p, r[j]) + d(r[i], n) - d(p, r[i]) - d(r[j], n)
//! ```
//!
//! Interior arcs are traversed backwards; with a symmetric matrix and
//! undirected edge penalties their cost is unchanged.
//!
//! # Complexity
//!
//! O(n²) per scan.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::moves::{ArcPenalty, Move, MoveContext, RouteState, ScoredMove};

/// Finds the best improving segment reversal, if any.
///
/// # Examples
///
/// ```
/// use crew_routing::models::{Node, Route, RoutingProblem, Solution, Vehicle};
/// use crew_routing::distance::DistanceMatrix;
/// use crew_routing::evaluation::ConstraintEvaluator;
/// use crew_routing::local_search::{best_two_opt, MoveContext, NoPenalty, RouteState};
///
/// let nodes = vec![
///     Node::new(0, 0.0, 0.0),
///     Node::new(1, 0.0, 10.0),
///     Node::new(2, 10.0, 10.0),
///     Node::new(3, 10.0, 0.0),
/// ];
/// let problem = RoutingProblem::new(
///     DistanceMatrix::from_nodes(&nodes), 0, vec![Vehicle::new(0)],
/// ).unwrap();
/// let evaluator = ConstraintEvaluator::new(&problem);
///
/// // 0 → 2 → 1 → 3 → 0 crosses itself.
/// let mut solution = Solution::new();
/// solution.add_route(Route::with_stops(0, vec![2, 1, 3]));
/// let mut state = RouteState::from_solution(&evaluator, &solution);
///
/// let ctx = MoveContext::new(evaluator, &NoPenalty, None);
/// let best = best_two_opt(&state, &ctx).unwrap();
/// state.apply(best.mv, &evaluator);
/// assert_eq!(state.total_distance(), 40);
/// ```
pub fn best_two_opt<P: ArcPenalty>(
    state: &RouteState,
    ctx: &MoveContext<'_, P>,
) -> Option<ScoredMove> {
    let mut best = None;

    for vehicle in 0..state.num_routes() {
        let route = &state.routes()[vehicle];
        let n = route.len();
        if n < 2 {
            continue;
        }
        let old = state.length(vehicle);
        for i in 0..n - 1 {
            if ctx.expired() {
                return best;
            }
            let p = state.prev(vehicle, i);
            let a = route[i];
            for j in i + 1..n {
                let b = route[j];
                let next = state.at_or_depot(vehicle, j + 1);
                let dist = ctx.dist(p, b) + ctx.dist(a, next) - ctx.dist(p, a) - ctx.dist(b, next);
                let guided = ctx.arc(p, b) + ctx.arc(a, next) - ctx.arc(p, a) - ctx.arc(b, next);
                if let Some(delta) = ctx.score(&[(vehicle, old, old + dist)], guided) {
                    let mv = Move::TwoOpt {
                        vehicle,
                        start: i,
                        end: j,
                    };
                    ScoredMove { mv, delta }.keep_best(&mut best);
                }
            }
        }
    }

    best
}
