//! Local search operators for improving routing solutions.
//!
//! - [`relocate`] — Segment relocation within and between routes
//! - [`exchange`] — Node swap within and between routes
//! - [`two_opt`] — Intra-route 2-opt segment reversal
//! - [`cross_exchange`] — Inter-route tail exchange (2-opt*)
//!
//! Every generator scores candidates through a [`MoveContext`], so the same
//! scan serves plain descent ([`NoPenalty`]) and the guided search.

mod cross_exchange;
mod exchange;
mod moves;
mod relocate;
mod two_opt;

pub use cross_exchange::best_cross_exchange;
pub use exchange::best_exchange;
pub use moves::{
    ArcPenalty, Move, MoveContext, NoPenalty, RouteState, ScoredMove, IMPROVEMENT_EPSILON,
};
pub use relocate::best_relocate;
pub use two_opt::best_two_opt;

use crate::config::LocalSearchConfig;

/// Scans every enabled neighborhood and returns the best improving move.
///
/// Ties between neighborhoods go to the one scanned first: relocate,
/// exchange, 2-opt, then cross exchange.
pub fn find_best_move<P: ArcPenalty>(
    state: &RouteState,
    ctx: &MoveContext<'_, P>,
    config: &LocalSearchConfig,
) -> Option<ScoredMove> {
    let mut best = None;
    let candidates = [
        config
            .relocate
            .then(|| best_relocate(state, ctx, config.max_segment_len))
            .flatten(),
        config.exchange.then(|| best_exchange(state, ctx)).flatten(),
        config.two_opt.then(|| best_two_opt(state, ctx)).flatten(),
        config
            .cross_exchange
            .then(|| best_cross_exchange(state, ctx))
            .flatten(),
    ];
    for candidate in candidates.into_iter().flatten() {
        candidate.keep_best(&mut best);
    }
    best
}
