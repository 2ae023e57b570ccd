//! Segment relocation (relocate / Or-opt) operator.
//!
//! # Algorithm
//!
//! Removes a segment of 1..=`max_len` consecutive stops from a route and
//! reinserts it, in the same orientation, between two consecutive nodes of
//! the same or another route:
//!
//! ```text
//! removal   = d(p, n) - d(p, s₀) - d(sₗ, n) - inner
//! insertion = d(a, s₀) + d(sₗ, b) - d(a, b) + inner
//! ```
//!
//! where `inner` is the length travelled inside the segment. Every node of
//! the segment must be allowed on the destination vehicle. Within one
//! route, insertion positions index the route with the segment removed and
//! the two `inner` terms cancel.
//!
//! # Complexity
//!
//! O(n² × L) per scan where n = stops, L = `max_len`.
//!
//! # Reference
//!
//! Or, I. (1976). "Traveling Salesman-Type Combinatorial Problems and Their
//! Relation to the Logistics of Blood Banking". PhD thesis.

use super::moves::{ArcPenalty, Move, MoveContext, RouteState, ScoredMove};

/// Finds the best improving segment relocation, if any.
///
/// # Examples
///
/// ```
/// use crew_routing::models::{Node, Route, RoutingProblem, Solution, Vehicle};
/// use crew_routing::distance::DistanceMatrix;
/// use crew_routing::evaluation::ConstraintEvaluator;
/// use crew_routing::local_search::{best_relocate, MoveContext, NoPenalty, RouteState};
///
/// let nodes: Vec<Node> = (0..4).map(|i| Node::new(i, i as f64 * 10.0, 0.0)).collect();
/// let problem = RoutingProblem::new(
///     DistanceMatrix::from_nodes(&nodes), 0, vec![Vehicle::new(0)],
/// ).unwrap();
/// let evaluator = ConstraintEvaluator::new(&problem);
///
/// let mut solution = Solution::new();
/// solution.add_route(Route::with_stops(0, vec![3, 1, 2]));
/// let state = RouteState::from_solution(&evaluator, &solution);
///
/// let ctx = MoveContext::new(evaluator, &NoPenalty, None);
/// let best = best_relocate(&state, &ctx, 3).unwrap();
/// assert_eq!(best.delta, -20.0);
/// ```
pub fn best_relocate<P: ArcPenalty>(
    state: &RouteState,
    ctx: &MoveContext<'_, P>,
    max_len: usize,
) -> Option<ScoredMove> {
    let mut best = None;
    let k = state.num_routes();

    for from in 0..k {
        let route = &state.routes()[from];
        let len = route.len();
        for seg_len in 1..=max_len.min(len) {
            for start in 0..=len - seg_len {
                if ctx.expired() {
                    return best;
                }
                let end = start + seg_len - 1;
                let first = route[start];
                let last = route[end];
                let p = state.prev(from, start);
                let n = state.at_or_depot(from, end + 1);

                let rem_dist = ctx.dist(p, n) - ctx.dist(p, first) - ctx.dist(last, n);
                let rem_arc = ctx.arc(p, n) - ctx.arc(p, first) - ctx.arc(last, n);
                let segment = &route[start..=end];
                // Travelled inside the segment; leaves `from` and joins `to`.
                let inner: i64 = segment.windows(2).map(|w| ctx.dist(w[0], w[1])).sum();

                for to in 0..k {
                    if segment.iter().any(|&node| !ctx.feasible(to, node)) {
                        continue;
                    }
                    if to == from {
                        scan_same_route(state, ctx, from, start, seg_len, rem_dist, rem_arc, &mut best);
                    } else {
                        let old_from = state.length(from);
                        let old_to = state.length(to);
                        for pos in 0..=state.routes()[to].len() {
                            let a = state.prev(to, pos);
                            let b = state.at_or_depot(to, pos);
                            let ins_dist = ctx.dist(a, first) + ctx.dist(last, b) - ctx.dist(a, b);
                            let ins_arc = ctx.arc(a, first) + ctx.arc(last, b) - ctx.arc(a, b);
                            let changes = [
                                (from, old_from, old_from + rem_dist - inner),
                                (to, old_to, old_to + ins_dist + inner),
                            ];
                            if let Some(delta) = ctx.score(&changes, rem_arc + ins_arc) {
                                let mv = Move::Relocate {
                                    from,
                                    start,
                                    len: seg_len,
                                    to,
                                    pos,
                                };
                                ScoredMove { mv, delta }.keep_best(&mut best);
                            }
                        }
                    }
                }
            }
        }
    }

    best
}

#[allow(clippy::too_many_arguments)]
fn scan_same_route<P: ArcPenalty>(
    state: &RouteState,
    ctx: &MoveContext<'_, P>,
    vehicle: usize,
    start: usize,
    seg_len: usize,
    rem_dist: i64,
    rem_arc: f64,
    best: &mut Option<ScoredMove>,
) {
    let route = &state.routes()[vehicle];
    let first = route[start];
    let last = route[start + seg_len - 1];
    let depot = state.prev(vehicle, 0);
    let reduced_len = route.len() - seg_len;
    // Node at index `t` of the route with the segment removed.
    let reduced = |t: usize| -> usize {
        if t < start {
            route[t]
        } else {
            route[t + seg_len]
        }
    };
    let old = state.length(vehicle);

    for pos in 0..=reduced_len {
        if pos == start {
            continue;
        }
        let a = if pos == 0 { depot } else { reduced(pos - 1) };
        let b = if pos == reduced_len { depot } else { reduced(pos) };
        let ins_dist = ctx.dist(a, first) + ctx.dist(last, b) - ctx.dist(a, b);
        let ins_arc = ctx.arc(a, first) + ctx.arc(last, b) - ctx.arc(a, b);
        let changes = [(vehicle, old, old + rem_dist + ins_dist)];
        if let Some(delta) = ctx.score(&changes, rem_arc + ins_arc) {
            let mv = Move::Relocate {
                from: vehicle,
                start,
                len: seg_len,
                to: vehicle,
                pos,
            };
            ScoredMove { mv, delta }.keep_best(best);
        }
    }
}
