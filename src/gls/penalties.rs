//! Per-edge penalty counters for guided local search.

use crate::local_search::ArcPenalty;

/// Dense, symmetric store of edge penalty counts.
///
/// Counts are kept in a contiguous row-major `n × n` array; both `(a, b)`
/// and `(b, a)` are written on every increment so lookups need no
/// normalization. Increments saturate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgePenalties {
    counts: Vec<u32>,
    size: usize,
}

impl EdgePenalties {
    /// Creates an all-zero table for `size` nodes.
    pub fn new(size: usize) -> Self {
        Self {
            counts: vec![0; size * size],
            size,
        }
    }

    /// Penalty count of the undirected edge `{a, b}`.
    #[inline]
    pub fn get(&self, a: usize, b: usize) -> u32 {
        self.counts[a * self.size + b]
    }

    /// Increments the count of edge `{a, b}` and returns the new value.
    pub fn increment(&mut self, a: usize, b: usize) -> u32 {
        let count = self.get(a, b).saturating_add(1);
        self.counts[a * self.size + b] = count;
        self.counts[b * self.size + a] = count;
        count
    }

    /// Number of nodes covered.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Edge penalties scaled by λ, as charged on the augmented objective.
#[derive(Debug, Clone)]
pub struct GuidedPenalties {
    edges: EdgePenalties,
    lambda: f64,
}

impl GuidedPenalties {
    /// Zero counts and λ = 0, so the augmented objective starts equal to
    /// the true one.
    pub fn new(size: usize) -> Self {
        Self {
            edges: EdgePenalties::new(size),
            lambda: 0.0,
        }
    }

    pub fn edges(&self) -> &EdgePenalties {
        &self.edges
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn set_lambda(&mut self, lambda: f64) {
        self.lambda = lambda;
    }

    /// Penalizes the edge of `edges` with the highest utility
    /// `distance / (1 + count)`. The first edge wins ties.
    ///
    /// Returns the penalized edge and its new count, or `None` when
    /// `edges` is empty.
    pub fn penalize_max_utility<I>(
        &mut self,
        edges: I,
        distance: impl Fn(usize, usize) -> i64,
    ) -> Option<((usize, usize), u32)>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut chosen: Option<((usize, usize), f64)> = None;
        for (a, b) in edges {
            let utility = distance(a, b) as f64 / (1.0 + f64::from(self.edges.get(a, b)));
            if chosen.is_none_or(|(_, best)| utility > best) {
                chosen = Some(((a, b), utility));
            }
        }
        let ((a, b), _) = chosen?;
        let count = self.edges.increment(a, b);
        Some(((a, b), count))
    }
}

impl ArcPenalty for GuidedPenalties {
    #[inline]
    fn arc_penalty(&self, from: usize, to: usize) -> f64 {
        self.lambda * f64::from(self.edges.get(from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_is_symmetric() {
        let mut p = EdgePenalties::new(4);
        assert_eq!(p.increment(1, 3), 1);
        assert_eq!(p.increment(3, 1), 2);
        assert_eq!(p.get(1, 3), 2);
        assert_eq!(p.get(3, 1), 2);
        assert_eq!(p.get(1, 2), 0);
    }

    #[test]
    fn test_increment_saturates() {
        let mut p = EdgePenalties::new(2);
        p.counts[1] = u32::MAX;
        p.counts[2] = u32::MAX;
        assert_eq!(p.increment(0, 1), u32::MAX);
    }

    #[test]
    fn test_arc_penalty_scales_with_lambda() {
        let mut g = GuidedPenalties::new(3);
        g.edges.increment(0, 2);
        assert_eq!(g.arc_penalty(2, 0), 0.0);
        g.set_lambda(2.5);
        assert_eq!(g.arc_penalty(2, 0), 2.5);
        assert_eq!(g.arc_penalty(0, 1), 0.0);
    }

    #[test]
    fn test_penalize_max_utility() {
        let mut g = GuidedPenalties::new(3);
        let dist = |a: usize, b: usize| [[0, 10, 8], [10, 0, 10], [8, 10, 0]][a][b];
        let tour = [(0, 1), (1, 2), (2, 0)];

        // 10 and 10 tie; the first one wins.
        assert_eq!(g.penalize_max_utility(tour, dist), Some(((0, 1), 1)));
        // (0, 1) now has utility 5, (1, 2) still 10.
        assert_eq!(g.penalize_max_utility(tour, dist), Some(((1, 2), 1)));
        // 5, 5, 8
        assert_eq!(g.penalize_max_utility(tour, dist), Some(((2, 0), 1)));
        assert_eq!(g.penalize_max_utility(std::iter::empty(), dist), None);
    }
}
