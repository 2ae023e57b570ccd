//! Public result types and conversion from the search representation.

use serde::Serialize;

use crate::evaluation::ConstraintEvaluator;
use crate::gls::SearchStats;
use crate::models::{RoutingProblem, Solution};

/// Result of a solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SolveOutcome {
    /// Every client is served.
    Solved(RoutePlan),
    /// Construction could not place these clients on any allowed vehicle.
    Infeasible { unassigned: Vec<usize> },
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    /// The plan, if solved.
    pub fn plan(&self) -> Option<&RoutePlan> {
        match self {
            SolveOutcome::Solved(plan) => Some(plan),
            SolveOutcome::Infeasible { .. } => None,
        }
    }
}

/// Routes for every vehicle with their costs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    /// One entry per vehicle, ordered by vehicle id.
    pub routes: Vec<VehicleRoute>,
    /// Σ route distance.
    pub total_distance: i64,
    /// Σ distance above the soft caps.
    pub total_overage: i64,
    /// Distance plus soft-cap penalty, the value the search minimized.
    pub objective: i64,
    pub stats: SearchStats,
}

impl RoutePlan {
    /// Route of `vehicle`.
    pub fn route(&self, vehicle: usize) -> Option<&VehicleRoute> {
        self.routes.get(vehicle)
    }

    /// Returns `true` if any vehicle drives past its soft cap.
    pub fn exceeds_any_cap(&self) -> bool {
        self.routes.iter().any(VehicleRoute::exceeds_cap)
    }
}

/// A single vehicle's tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleRoute {
    pub vehicle_id: usize,
    /// Visited nodes, starting and ending at the depot.
    pub nodes: Vec<usize>,
    pub distance: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap: Option<i64>,
    /// Distance above `cap`, zero if within it.
    pub overage: i64,
}

impl VehicleRoute {
    pub fn exceeds_cap(&self) -> bool {
        self.overage > 0
    }

    /// Visited clients, depot excluded.
    pub fn stops(&self) -> &[usize] {
        match self.nodes.len() {
            0..=2 => &[],
            len => &self.nodes[1..len - 1],
        }
    }
}

/// Converts a searched solution into the public result.
///
/// A solution with unassigned nodes becomes [`SolveOutcome::Infeasible`];
/// partial plans are never reported. Vehicles without a route in
/// `solution` get a depot-to-depot entry.
pub fn extract(problem: &RoutingProblem, solution: &Solution, stats: SearchStats) -> SolveOutcome {
    if !solution.is_complete() {
        let mut unassigned = solution.unassigned().to_vec();
        unassigned.sort_unstable();
        return SolveOutcome::Infeasible { unassigned };
    }

    let evaluator = ConstraintEvaluator::new(problem);
    let depot = problem.depot();
    let mut routes: Vec<VehicleRoute> = (0..problem.vehicle_count())
        .map(|vehicle_id| VehicleRoute {
            vehicle_id,
            nodes: vec![depot, depot],
            distance: 0,
            cap: problem.cap(vehicle_id),
            overage: 0,
        })
        .collect();

    for route in solution.routes() {
        let vehicle_id = route.vehicle_id();
        let distance = evaluator.route_cost(route);
        routes[vehicle_id] = VehicleRoute {
            vehicle_id,
            nodes: route.nodes_with_depot(depot),
            distance,
            cap: problem.cap(vehicle_id),
            overage: evaluator.overage(vehicle_id, distance),
        };
    }

    let total_distance = routes.iter().fold(0, |acc: i64, r| acc.saturating_add(r.distance));
    let total_overage = routes.iter().fold(0, |acc: i64, r| acc.saturating_add(r.overage));
    SolveOutcome::Solved(RoutePlan {
        routes,
        total_distance,
        total_overage,
        objective: evaluator.objective(solution),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::{Node, Route, Vehicle};

    fn line_problem() -> RoutingProblem {
        let nodes: Vec<Node> = (0..4).map(|i| Node::new(i, i as f64 * 10.0, 0.0)).collect();
        RoutingProblem::new(
            DistanceMatrix::from_nodes(&nodes),
            0,
            vec![Vehicle::new(0).with_soft_cap(40), Vehicle::new(1)],
        )
        .expect("valid")
    }

    #[test]
    fn test_extract_solved() {
        let problem = line_problem();
        let mut sol = Solution::new();
        sol.add_route(Route::with_stops(0, vec![1, 2, 3]));
        sol.add_route(Route::new(1));

        let outcome = extract(&problem, &sol, SearchStats::default());
        let plan = outcome.plan().expect("solved");
        assert_eq!(plan.routes.len(), 2);

        let first = plan.route(0).expect("vehicle 0");
        assert_eq!(first.nodes, vec![0, 1, 2, 3, 0]);
        assert_eq!(first.stops(), &[1, 2, 3][..]);
        assert_eq!(first.distance, 60);
        assert_eq!(first.overage, 20);
        assert!(first.exceeds_cap());

        let second = plan.route(1).expect("vehicle 1");
        assert_eq!(second.nodes, vec![0, 0]);
        assert!(second.stops().is_empty());
        assert_eq!(second.cap, None);

        assert_eq!(plan.total_distance, 60);
        assert_eq!(plan.total_overage, 20);
        assert_eq!(plan.objective, 60 + 20 * 1000);
        assert!(plan.exceeds_any_cap());
    }

    #[test]
    fn test_extract_missing_route_is_depot_only() {
        let problem = line_problem();
        let mut sol = Solution::new();
        sol.add_route(Route::with_stops(1, vec![3, 2, 1]));

        let outcome = extract(&problem, &sol, SearchStats::default());
        let plan = outcome.plan().expect("solved");
        assert_eq!(plan.routes[0].nodes, vec![0, 0]);
        assert_eq!(plan.routes[1].nodes, vec![0, 3, 2, 1, 0]);
        assert!(!plan.exceeds_any_cap());
    }

    #[test]
    fn test_extract_infeasible() {
        let problem = line_problem();
        let mut sol = Solution::new();
        sol.add_route(Route::with_stops(0, vec![1]));
        sol.add_unassigned(3);
        sol.add_unassigned(2);

        let outcome = extract(&problem, &sol, SearchStats::default());
        assert!(!outcome.is_solved());
        assert_eq!(outcome, SolveOutcome::Infeasible { unassigned: vec![2, 3] });
    }

    #[test]
    fn test_serialize_outcome() {
        let problem = line_problem();
        let mut sol = Solution::new();
        sol.add_route(Route::with_stops(0, vec![1]));
        sol.add_route(Route::with_stops(1, vec![2, 3]));

        let json = serde_json::to_value(extract(&problem, &sol, SearchStats::default()))
            .expect("serializable");
        assert_eq!(json["status"], "solved");
        assert_eq!(json["routes"][1]["nodes"], serde_json::json!([0, 2, 3, 0]));
        assert_eq!(json["routes"][0]["cap"], 40);
        assert!(json["routes"][1].get("cap").is_none());

        let infeasible = SolveOutcome::Infeasible { unassigned: vec![4] };
        let json = serde_json::to_value(infeasible).expect("serializable");
        assert_eq!(json["status"], "infeasible");
        assert_eq!(json["unassigned"], serde_json::json!([4]));
    }
}
