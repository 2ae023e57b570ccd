//! Guided local search metaheuristic.
//!
//! - [`GuidedLocalSearch`] — the search loop
//! - [`GuidedPenalties`] — per-edge penalty counters charged on the
//!   augmented objective

mod engine;
mod penalties;

pub use engine::{GuidedLocalSearch, SearchResult, SearchStats};
pub use penalties::{EdgePenalties, GuidedPenalties};
