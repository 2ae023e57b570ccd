//! Constructive heuristics for building initial solutions.
//!
//! - [`path_cheapest_arc`] — Greedy cheapest-arc extension over all vehicles, O(n²k)

mod path_cheapest_arc;

pub use path_cheapest_arc::path_cheapest_arc;
