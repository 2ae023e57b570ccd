//! Moves, move scoring, and the working route representation.

use std::time::Instant;

use crate::evaluation::ConstraintEvaluator;
use crate::models::{RoutingProblem, Solution};

/// Smallest augmented-cost decrease that counts as an improvement.
pub const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// A neighborhood move over a [`RouteState`].
///
/// Positions index the stop list of a route (depot excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Moves `len` consecutive stops starting at `start` of route `from`
    /// to position `pos` of route `to`. When `from == to`, `pos` indexes
    /// the route with the segment already removed.
    Relocate {
        from: usize,
        start: usize,
        len: usize,
        to: usize,
        pos: usize,
    },
    /// Swaps stop `first.1` of route `first.0` with stop `second.1` of
    /// route `second.0`.
    Exchange {
        first: (usize, usize),
        second: (usize, usize),
    },
    /// Reverses stops `start..=end` of one route.
    TwoOpt {
        vehicle: usize,
        start: usize,
        end: usize,
    },
    /// Swaps the tails `first[first_cut..]` and `second[second_cut..]`.
    CrossExchange {
        first: usize,
        first_cut: usize,
        second: usize,
        second_cut: usize,
    },
}

/// A move with its change in augmented cost (negative = improving).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub mv: Move,
    pub delta: f64,
}

impl ScoredMove {
    /// Keeps whichever of `best` and `self` improves more.
    pub(crate) fn keep_best(self, best: &mut Option<ScoredMove>) {
        if self.delta < -IMPROVEMENT_EPSILON && best.is_none_or(|b| self.delta < b.delta) {
            *best = Some(self);
        }
    }
}

/// Extra cost charged on arcs during move evaluation.
///
/// Plain descent uses [`NoPenalty`]; guided local search charges its
/// per-edge penalty counters scaled by λ.
pub trait ArcPenalty {
    /// Augmentation added to the arc `from → to`.
    fn arc_penalty(&self, from: usize, to: usize) -> f64;
}

/// Charges nothing: moves are scored on the true objective.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPenalty;

impl ArcPenalty for NoPenalty {
    #[inline]
    fn arc_penalty(&self, _from: usize, _to: usize) -> f64 {
        0.0
    }
}

/// Everything a move generator needs to score candidates.
pub struct MoveContext<'a, P: ArcPenalty> {
    evaluator: ConstraintEvaluator<'a>,
    penalties: &'a P,
    deadline: Option<Instant>,
}

impl<'a, P: ArcPenalty> MoveContext<'a, P> {
    /// Creates a context; generators stop scanning once `deadline` passes.
    pub fn new(
        evaluator: ConstraintEvaluator<'a>,
        penalties: &'a P,
        deadline: Option<Instant>,
    ) -> Self {
        Self {
            evaluator,
            penalties,
            deadline,
        }
    }

    /// The constraint evaluator.
    pub fn evaluator(&self) -> &ConstraintEvaluator<'a> {
        &self.evaluator
    }

    pub(crate) fn problem(&self) -> &'a RoutingProblem {
        self.evaluator.problem()
    }

    /// Returns `true` once the deadline has passed.
    pub fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    #[inline]
    pub(crate) fn dist(&self, from: usize, to: usize) -> i64 {
        self.problem().distance(from, to)
    }

    #[inline]
    pub(crate) fn arc(&self, from: usize, to: usize) -> f64 {
        self.penalties.arc_penalty(from, to)
    }

    #[inline]
    pub(crate) fn feasible(&self, vehicle: usize, node: usize) -> bool {
        self.evaluator.feasible_to_insert(vehicle, node)
    }

    /// Augmented-cost delta of changing route lengths `(vehicle, old, new)`
    /// plus `guided` arc augmentation, or `None` if a hard distance limit
    /// would be broken.
    pub(crate) fn score(&self, changes: &[(usize, i64, i64)], guided: f64) -> Option<f64> {
        let mut delta = guided;
        for &(vehicle, old, new) in changes {
            if new > old && !self.evaluator.within_max_distance(vehicle, new) {
                return None;
            }
            delta += self.evaluator.penalized_cost(vehicle, new) as f64
                - self.evaluator.penalized_cost(vehicle, old) as f64;
        }
        Some(delta)
    }
}

/// Working representation of a complete solution: one stop list per
/// vehicle plus cached route lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteState {
    depot: usize,
    routes: Vec<Vec<usize>>,
    lengths: Vec<i64>,
}

impl RouteState {
    /// Copies the routes of `solution`, recomputing lengths.
    pub fn from_solution(evaluator: &ConstraintEvaluator<'_>, solution: &Solution) -> Self {
        let problem = evaluator.problem();
        let mut routes = vec![Vec::new(); problem.vehicle_count()];
        for route in solution.routes() {
            routes[route.vehicle_id()] = route.stops().to_vec();
        }
        let lengths = routes.iter().map(|r| evaluator.path_cost(r)).collect();
        Self {
            depot: problem.depot(),
            routes,
            lengths,
        }
    }

    /// Builds a [`Solution`] with one route per vehicle.
    pub fn to_solution(&self, evaluator: &ConstraintEvaluator<'_>) -> Solution {
        let mut solution = Solution::new();
        for (vehicle, stops) in self.routes.iter().enumerate() {
            solution.add_route(evaluator.build_route(vehicle, stops.clone()));
        }
        solution
    }

    /// Stop lists indexed by vehicle.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// Cached length of the route of `vehicle`.
    pub fn length(&self, vehicle: usize) -> i64 {
        self.lengths[vehicle]
    }

    /// Σ route length.
    pub fn total_distance(&self) -> i64 {
        self.lengths.iter().fold(0, |acc, &len| acc.saturating_add(len))
    }

    /// Σ route length + Σ soft-cap penalty.
    pub fn objective(&self, evaluator: &ConstraintEvaluator<'_>) -> i64 {
        self.lengths
            .iter()
            .enumerate()
            .map(|(v, &len)| evaluator.penalized_cost(v, len))
            .fold(0, i64::saturating_add)
    }

    /// Number of vehicles.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// The node visited before stop `pos` of route `vehicle`.
    #[inline]
    pub(crate) fn prev(&self, vehicle: usize, pos: usize) -> usize {
        if pos == 0 {
            self.depot
        } else {
            self.routes[vehicle][pos - 1]
        }
    }

    /// The node at `pos` of route `vehicle`, or the depot past the end.
    #[inline]
    pub(crate) fn at_or_depot(&self, vehicle: usize, pos: usize) -> usize {
        self.routes[vehicle].get(pos).copied().unwrap_or(self.depot)
    }

    /// Every arc `(from, to)` of every non-empty route, depot arcs included.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.routes
            .iter()
            .filter(|r| !r.is_empty())
            .flat_map(move |r| {
                std::iter::once(self.depot)
                    .chain(r.iter().copied())
                    .zip(r.iter().copied().chain(std::iter::once(self.depot)))
            })
    }

    /// Applies `mv` and refreshes the lengths of the touched routes.
    pub fn apply(&mut self, mv: Move, evaluator: &ConstraintEvaluator<'_>) {
        let touched = match mv {
            Move::Relocate {
                from,
                start,
                len,
                to,
                pos,
            } => {
                let segment: Vec<usize> = self.routes[from].drain(start..start + len).collect();
                self.routes[to].splice(pos..pos, segment);
                [from, to]
            }
            Move::Exchange { first, second } => {
                let a = self.routes[first.0][first.1];
                let b = self.routes[second.0][second.1];
                self.routes[first.0][first.1] = b;
                self.routes[second.0][second.1] = a;
                [first.0, second.0]
            }
            Move::TwoOpt {
                vehicle,
                start,
                end,
            } => {
                self.routes[vehicle][start..=end].reverse();
                [vehicle, vehicle]
            }
            Move::CrossExchange {
                first,
                first_cut,
                second,
                second_cut,
            } => {
                let tail_first = self.routes[first].split_off(first_cut);
                let tail_second = self.routes[second].split_off(second_cut);
                self.routes[first].extend(tail_second);
                self.routes[second].extend(tail_first);
                [first, second]
            }
        };
        for vehicle in touched {
            self.lengths[vehicle] = evaluator.path_cost(&self.routes[vehicle]);
        }
    }
}
