use std::collections::BTreeSet;
use std::time::Duration;

use crew_routing::config::SolverConfig;
use crew_routing::constructive::path_cheapest_arc;
use crew_routing::distance::DistanceMatrix;
use crew_routing::evaluation::ConstraintEvaluator;
use crew_routing::models::{Node, RoutingProblem, Vehicle};
use crew_routing::output::SolveOutcome;
use crew_routing::solve;
use proptest::prelude::*;

prop_compose! {
    fn generate_problem()
    (n in 2usize..12, k in 1usize..4)
    (
        coords in prop::collection::vec((0.0f64..300.0, 0.0f64..300.0), n),
        forbidden in prop::collection::vec(prop::collection::vec(prop::bool::weighted(0.2), n), k),
        caps in prop::collection::vec(50i64..800, k),
        depot in 0..n,
    ) -> RoutingProblem {
        let nodes: Vec<Node> = coords
            .into_iter()
            .enumerate()
            .map(|(id, (x, y))| Node::new(id, x, y))
            .collect();
        let vehicles = forbidden
            .into_iter()
            .zip(caps)
            .enumerate()
            .map(|(id, (mask, cap))| {
                let banned = mask.into_iter().enumerate().filter(|&(_, b)| b).map(|(node, _)| node);
                Vehicle::new(id).with_forbidden(banned).with_soft_cap(cap)
            })
            .collect();
        RoutingProblem::new(DistanceMatrix::from_nodes(&nodes), depot, vehicles).expect("valid")
    }
}

fn config() -> SolverConfig {
    SolverConfig::new()
        .with_time_limit(Duration::from_millis(200))
        .with_step_limit(100)
}

fn forbidden_everywhere(problem: &RoutingProblem) -> Vec<usize> {
    problem
        .customers()
        .filter(|&node| (0..problem.vehicle_count()).all(|v| problem.is_forbidden(v, node)))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn solved_plans_keep_every_invariant(problem in generate_problem()) {
        let depot = problem.depot();
        match solve(&problem, &config()) {
            SolveOutcome::Solved(plan) => {
                prop_assert!(forbidden_everywhere(&problem).is_empty());
                prop_assert_eq!(plan.routes.len(), problem.vehicle_count());

                let mut seen = BTreeSet::new();
                for route in &plan.routes {
                    prop_assert_eq!(route.nodes.first(), Some(&depot));
                    prop_assert_eq!(route.nodes.last(), Some(&depot));
                    for &node in route.stops() {
                        prop_assert_ne!(node, depot);
                        prop_assert!(!problem.is_forbidden(route.vehicle_id, node));
                        prop_assert!(seen.insert(node), "node {} visited twice", node);
                    }
                }
                let expected: BTreeSet<usize> = problem.customers().collect();
                prop_assert_eq!(seen, expected);

                let total: i64 = plan.routes.iter().map(|r| r.distance).sum();
                prop_assert_eq!(plan.total_distance, total);
            }
            SolveOutcome::Infeasible { unassigned } => {
                prop_assert!(!unassigned.is_empty());
                prop_assert_eq!(unassigned, forbidden_everywhere(&problem));
            }
        }
    }

    #[test]
    fn search_never_worsens_construction(problem in generate_problem()) {
        let initial = path_cheapest_arc(&problem);
        let evaluator = ConstraintEvaluator::new(&problem);
        if let Some(plan) = solve(&problem, &config()).plan() {
            prop_assert!(plan.objective <= evaluator.objective(&initial));
        }
    }

    #[test]
    fn construction_is_pure(problem in generate_problem()) {
        prop_assert_eq!(path_cheapest_arc(&problem), path_cheapest_arc(&problem));
    }
}
