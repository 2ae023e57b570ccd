//! Inter-route tail exchange (2-opt*).
//!
//! # Algorithm
//!
//! Cuts two routes and swaps their tails. Given
//! R1 = [a₁, ..., aᵢ, aᵢ₊₁, ..., aₙ] and R2 = [b₁, ..., bⱼ, bⱼ₊₁, ..., bₘ]:
//!
//! ```text
//! R1' = [a₁, ..., aᵢ, bⱼ₊₁, ..., bₘ]
//! R2' = [b₁, ..., bⱼ, aᵢ₊₁, ..., aₙ]
//! ```
//!
//! Cuts may fall before the first stop or after the last, so a tail can be
//! empty or a whole route. Every node of a moved tail must be allowed on
//! its new vehicle. New route lengths come from prefix sums, which makes
//! each candidate O(1).
//!
//! # Complexity
//!
//! O(n² × R²) per scan, where n = stops per route, R = number of routes.
//!
//! # Reference
//!
//! Potvin, J.-Y. & Rousseau, J.-M. (1995). "An Exchange Heuristic for
//! Routeing Problems with Time Windows", *Journal of the Operational Research
//! Society* 46(12), 1433-1446.

use super::moves::{ArcPenalty, Move, MoveContext, RouteState, ScoredMove};

/// A route closed at the depot with cumulative distances.
struct PaddedRoute {
    nodes: Vec<usize>,
    prefix: Vec<i64>,
}

impl PaddedRoute {
    fn new<P: ArcPenalty>(state: &RouteState, ctx: &MoveContext<'_, P>, vehicle: usize) -> Self {
        let depot = state.prev(vehicle, 0);
        let mut nodes = Vec::with_capacity(state.routes()[vehicle].len() + 2);
        nodes.push(depot);
        nodes.extend_from_slice(&state.routes()[vehicle]);
        nodes.push(depot);

        let mut prefix = Vec::with_capacity(nodes.len());
        prefix.push(0);
        for w in nodes.windows(2) {
            let last = prefix[prefix.len() - 1];
            prefix.push(last + ctx.dist(w[0], w[1]));
        }
        Self { nodes, prefix }
    }

    fn total(&self) -> i64 {
        self.prefix[self.prefix.len() - 1]
    }

    /// `ok[c]` is `true` if every stop after cut `c` may ride on `vehicle`.
    fn tail_feasible<P: ArcPenalty>(&self, ctx: &MoveContext<'_, P>, vehicle: usize) -> Vec<bool> {
        let stops = self.nodes.len() - 2;
        let mut ok = vec![true; stops + 1];
        for c in (0..stops).rev() {
            ok[c] = ok[c + 1] && ctx.feasible(vehicle, self.nodes[c + 1]);
        }
        ok
    }
}

/// Finds the best improving tail exchange between two routes, if any.
pub fn best_cross_exchange<P: ArcPenalty>(
    state: &RouteState,
    ctx: &MoveContext<'_, P>,
) -> Option<ScoredMove> {
    let mut best = None;
    let k = state.num_routes();

    for r1 in 0..k {
        let path1 = PaddedRoute::new(state, ctx, r1);
        let len1 = state.routes()[r1].len();
        for r2 in r1 + 1..k {
            if ctx.expired() {
                return best;
            }
            let len2 = state.routes()[r2].len();
            if len1 == 0 && len2 == 0 {
                continue;
            }
            let path2 = PaddedRoute::new(state, ctx, r2);
            let ok1_to_2 = path1.tail_feasible(ctx, r2);
            let ok2_to_1 = path2.tail_feasible(ctx, r1);
            let (old1, old2) = (path1.total(), path2.total());

            for c1 in 0..=len1 {
                if !ok1_to_2[c1] {
                    continue;
                }
                let (x1, y1) = (path1.nodes[c1], path1.nodes[c1 + 1]);
                for c2 in 0..=len2 {
                    if !ok2_to_1[c2] || (c1 == len1 && c2 == len2) {
                        continue;
                    }
                    let (x2, y2) = (path2.nodes[c2], path2.nodes[c2 + 1]);

                    let new1 = path1.prefix[c1] + ctx.dist(x1, y2) + (old2 - path2.prefix[c2 + 1]);
                    let new2 = path2.prefix[c2] + ctx.dist(x2, y1) + (old1 - path1.prefix[c1 + 1]);
                    let guided =
                        ctx.arc(x1, y2) + ctx.arc(x2, y1) - ctx.arc(x1, y1) - ctx.arc(x2, y2);

                    if let Some(delta) = ctx.score(&[(r1, old1, new1), (r2, old2, new2)], guided) {
                        let mv = Move::CrossExchange {
                            first: r1,
                            first_cut: c1,
                            second: r2,
                            second_cut: c2,
                        };
                        ScoredMove { mv, delta }.keep_best(&mut best);
                    }
                }
            }
        }
    }

    best
}
