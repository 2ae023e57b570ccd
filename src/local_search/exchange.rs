//! Node exchange (swap) operator.
//!
//! # Algorithm
//!
//! Swaps two stops, either between two routes or between two non-adjacent
//! positions of the same route. Each swapped node must be allowed on the
//! vehicle it moves to. For node `a` at position `i` replaced by `b`:
//!
//! ```text
//! delta = d(p, b) + d(b, n) - d(p, a) - d(a, n)
//! ```
//!
//! Adjacent swaps within a route are a 2-opt of length two and are left to
//! [`best_two_opt`](super::best_two_opt).
//!
//! # Complexity
//!
//! O(n²) per scan where n = total stops.

use super::moves::{ArcPenalty, Move, MoveContext, RouteState, ScoredMove};

/// Finds the best improving exchange, if any.
pub fn best_exchange<P: ArcPenalty>(
    state: &RouteState,
    ctx: &MoveContext<'_, P>,
) -> Option<ScoredMove> {
    let mut best = None;
    let k = state.num_routes();

    for r1 in 0..k {
        for i in 0..state.routes()[r1].len() {
            if ctx.expired() {
                return best;
            }
            let a = state.routes()[r1][i];
            let (p1, n1) = (state.prev(r1, i), state.at_or_depot(r1, i + 1));

            for r2 in r1..k {
                let first_j = if r1 == r2 { i + 2 } else { 0 };
                for j in first_j..state.routes()[r2].len() {
                    let b = state.routes()[r2][j];
                    if r1 != r2 && (!ctx.feasible(r1, b) || !ctx.feasible(r2, a)) {
                        continue;
                    }
                    let (p2, n2) = (state.prev(r2, j), state.at_or_depot(r2, j + 1));

                    let d1 = ctx.dist(p1, b) + ctx.dist(b, n1) - ctx.dist(p1, a) - ctx.dist(a, n1);
                    let d2 = ctx.dist(p2, a) + ctx.dist(a, n2) - ctx.dist(p2, b) - ctx.dist(b, n2);
                    let guided = ctx.arc(p1, b) + ctx.arc(b, n1) - ctx.arc(p1, a) - ctx.arc(a, n1)
                        + ctx.arc(p2, a)
                        + ctx.arc(a, n2)
                        - ctx.arc(p2, b)
                        - ctx.arc(b, n2);

                    let old1 = state.length(r1);
                    let scored = if r1 == r2 {
                        ctx.score(&[(r1, old1, old1 + d1 + d2)], guided)
                    } else {
                        let old2 = state.length(r2);
                        ctx.score(&[(r1, old1, old1 + d1), (r2, old2, old2 + d2)], guided)
                    };
                    if let Some(delta) = scored {
                        let mv = Move::Exchange {
                            first: (r1, i),
                            second: (r2, j),
                        };
                        ScoredMove { mv, delta }.keep_best(&mut best);
                    }
                }
            }
        }
    }

    best
}
