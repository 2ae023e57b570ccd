//! Constraint evaluator: feasibility, route cost and soft-cap penalties.

use crate::models::{Route, RoutingProblem, Solution, Violation, ViolationType};

/// Evaluates routes and solutions against a [`RoutingProblem`].
///
/// All methods are pure: the evaluator only borrows the problem and keeps no
/// state, so evaluating the same solution twice gives the same value.
///
/// # Examples
///
/// ```
/// use crew_routing::models::{Node, RoutingProblem, Vehicle};
/// use crew_routing::distance::DistanceMatrix;
/// use crew_routing::evaluation::ConstraintEvaluator;
///
/// let nodes = vec![Node::new(0, 0.0, 0.0), Node::new(1, 3.0, 4.0), Node::new(2, 6.0, 8.0)];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// let problem = RoutingProblem::new(dm, 0, vec![Vehicle::new(0).with_soft_cap(15)]).unwrap();
///
/// let evaluator = ConstraintEvaluator::new(&problem);
/// let route = evaluator.build_route(0, vec![1, 2]);
/// assert_eq!(route.total_distance(), 20);
/// assert_eq!(evaluator.penalty(0, 20), 5 * 1000);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ConstraintEvaluator<'a> {
    problem: &'a RoutingProblem,
}

impl<'a> ConstraintEvaluator<'a> {
    /// Creates an evaluator for the given problem.
    pub fn new(problem: &'a RoutingProblem) -> Self {
        Self { problem }
    }

    /// The problem being evaluated.
    pub fn problem(&self) -> &'a RoutingProblem {
        self.problem
    }

    /// Returns `false` iff `node` is in the forbidden set of `vehicle`.
    #[inline]
    pub fn feasible_to_insert(&self, vehicle: usize, node: usize) -> bool {
        !self.problem.is_forbidden(vehicle, node)
    }

    /// Distance of `depot → stops... → depot`; zero for no stops.
    ///
    /// Saturates at `i64::MAX`.
    pub fn path_cost(&self, stops: &[usize]) -> i64 {
        let (Some(&first), Some(&last)) = (stops.first(), stops.last()) else {
            return 0;
        };
        let depot = self.problem.depot();
        stops
            .windows(2)
            .map(|w| self.problem.distance(w[0], w[1]))
            .fold(self.problem.distance(depot, first), i64::saturating_add)
            .saturating_add(self.problem.distance(last, depot))
    }

    /// Sum of consecutive-node distances of a closed route.
    pub fn route_cost(&self, route: &Route) -> i64 {
        self.path_cost(route.stops())
    }

    /// Distance above the soft cap of `vehicle`, or zero.
    pub fn overage(&self, vehicle: usize, route_cost: i64) -> i64 {
        self.problem
            .cap(vehicle)
            .map_or(0, |cap| (route_cost - cap).max(0))
    }

    /// `penalty_weight × max(0, route_cost − cap(vehicle))`, saturating.
    pub fn penalty(&self, vehicle: usize, route_cost: i64) -> i64 {
        self.problem
            .penalty_weight()
            .saturating_mul(self.overage(vehicle, route_cost))
    }

    /// Route cost plus its soft-cap penalty, saturating.
    #[inline]
    pub fn penalized_cost(&self, vehicle: usize, route_cost: i64) -> i64 {
        route_cost.saturating_add(self.penalty(vehicle, route_cost))
    }

    /// Returns `true` if `route_cost` respects the hard limit of `vehicle`.
    #[inline]
    pub fn within_max_distance(&self, vehicle: usize, route_cost: i64) -> bool {
        self.problem
            .max_distance(vehicle)
            .is_none_or(|max| route_cost <= max)
    }

    /// `Σ routeCost(v) + Σ penalty(v, routeCost(v))`.
    ///
    /// Route costs are recomputed from the stops, not read from the cached
    /// route totals.
    pub fn objective(&self, solution: &Solution) -> i64 {
        solution
            .routes()
            .iter()
            .map(|r| self.penalized_cost(r.vehicle_id(), self.route_cost(r)))
            .fold(0, i64::saturating_add)
    }

    /// Builds a route for `vehicle` with its distance filled in.
    pub fn build_route(&self, vehicle: usize, stops: Vec<usize>) -> Route {
        let mut route = Route::with_stops(vehicle, stops);
        route.set_total_distance(self.route_cost(&route));
        route
    }

    /// Evaluates an entire solution, returning `(objective, violations)`.
    ///
    /// Checks the partition (every non-depot node exactly once, depot never
    /// an intermediate stop), forbidden visits, hard distance limits, and
    /// reports soft-cap overage as a non-fatal violation.
    pub fn evaluate(&self, solution: &Solution) -> (i64, Vec<Violation>) {
        let n = self.problem.node_count();
        let depot = self.problem.depot();
        let mut visits = vec![0usize; n];
        let mut violations = Vec::new();

        for route in solution.routes() {
            let vehicle_id = route.vehicle_id();
            for &node in route.stops() {
                if node == depot {
                    violations.push(Violation::new(ViolationType::DepotVisited { vehicle_id }));
                    continue;
                }
                visits[node] += 1;
                if !self.feasible_to_insert(vehicle_id, node) {
                    violations.push(Violation::new(ViolationType::ForbiddenNode {
                        vehicle_id,
                        node,
                    }));
                }
            }

            let distance = self.route_cost(route);
            if let Some(max_distance) = self.problem.max_distance(vehicle_id) {
                if distance > max_distance {
                    violations.push(Violation::new(ViolationType::MaxDistanceExceeded {
                        vehicle_id,
                        distance,
                        max_distance,
                    }));
                }
            }
            if let Some(cap) = self.problem.cap(vehicle_id) {
                if distance > cap {
                    violations.push(Violation::new(ViolationType::SoftCapExceeded {
                        vehicle_id,
                        distance,
                        cap,
                    }));
                }
            }
        }

        for node in self.problem.customers() {
            match visits[node] {
                0 => violations.push(Violation::new(ViolationType::MissingNode { node })),
                1 => {}
                _ => violations.push(Violation::new(ViolationType::DuplicateNode { node })),
            }
        }

        (self.objective(solution), violations)
    }
}
