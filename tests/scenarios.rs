use std::time::Duration;

use crew_routing::config::SolverConfig;
use crew_routing::constructive::path_cheapest_arc;
use crew_routing::distance::DistanceMatrix;
use crew_routing::error::InvalidProblemError;
use crew_routing::evaluation::ConstraintEvaluator;
use crew_routing::models::{Node, ProblemInput, RoutingProblem, Vehicle};
use crew_routing::output::SolveOutcome;
use crew_routing::solve;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn line_nodes() -> Vec<Node> {
    (0..5).map(|i| Node::new(i, i as f64 * 10.0, 0.0)).collect()
}

fn quick_config() -> SolverConfig {
    SolverConfig::new()
        .with_time_limit(Duration::from_secs(2))
        .with_step_limit(200)
}

fn random_problem(seed: u64, n: usize, k: usize) -> RoutingProblem {
    let mut rng = StdRng::seed_from_u64(seed);
    let nodes: Vec<Node> = (0..n)
        .map(|i| Node::new(i, rng.random_range(0.0..500.0), rng.random_range(0.0..500.0)))
        .collect();
    let vehicles = (0..k)
        .map(|v| {
            // Vehicle 0 may go anywhere, so every instance is feasible.
            let forbidden: Vec<usize> = if v == 0 {
                Vec::new()
            } else {
                (1..n).filter(|_| rng.random_bool(0.2)).collect()
            };
            Vehicle::new(v)
                .with_forbidden(forbidden)
                .with_soft_cap(rng.random_range(500..2000))
        })
        .collect();
    RoutingProblem::new(DistanceMatrix::from_nodes(&nodes), 0, vehicles).expect("valid")
}

#[test]
fn test_single_vehicle_line() {
    let problem = RoutingProblem::new(
        DistanceMatrix::from_nodes(&line_nodes()),
        0,
        vec![Vehicle::new(0).with_soft_cap(1000)],
    )
    .expect("valid");

    let plan = solve(&problem, &quick_config()).plan().cloned().expect("solved");
    assert_eq!(plan.routes[0].nodes, vec![0, 1, 2, 3, 4, 0]);
    assert_eq!(plan.routes[0].distance, 80);
    assert_eq!(plan.total_distance, 80);
    assert!(!plan.exceeds_any_cap());
}

#[test]
fn test_forbidden_node_goes_to_other_vehicle() {
    let problem = RoutingProblem::new(
        DistanceMatrix::from_nodes(&line_nodes()),
        0,
        vec![
            Vehicle::new(0).with_forbidden([3]).with_soft_cap(1000),
            Vehicle::new(1).with_soft_cap(1000),
        ],
    )
    .expect("valid");

    let plan = solve(&problem, &quick_config()).plan().cloned().expect("solved");
    assert!(!plan.routes[0].nodes.contains(&3));
    assert!(plan.routes[1].nodes.contains(&3));
    assert_eq!(plan.total_distance, 80);
}

#[test]
fn test_cap_overage_is_reported_not_fatal() {
    let nodes = vec![Node::new(0, 0.0, 0.0), Node::new(1, 250.0, 0.0)];
    let problem = RoutingProblem::new(
        DistanceMatrix::from_nodes(&nodes),
        0,
        vec![Vehicle::new(0).with_soft_cap(100)],
    )
    .expect("valid");

    let config = SolverConfig::new().with_time_limit(Duration::from_millis(50));
    let plan = solve(&problem, &config).plan().cloned().expect("solved");
    let route = &plan.routes[0];
    assert_eq!(route.nodes, vec![0, 1, 0]);
    assert_eq!(route.distance, 500);
    assert_eq!(route.overage, 400);
    assert!(route.exceeds_cap());
    assert_eq!(plan.total_distance, 500);
    assert_eq!(plan.total_overage, 400);
}

#[test]
fn test_node_forbidden_everywhere_is_infeasible() {
    let nodes: Vec<Node> = line_nodes().into_iter().take(3).collect();
    let problem = RoutingProblem::new(
        DistanceMatrix::from_nodes(&nodes),
        0,
        vec![
            Vehicle::new(0).with_forbidden([2]),
            Vehicle::new(1).with_forbidden([2]),
        ],
    )
    .expect("valid");

    let outcome = solve(&problem, &quick_config());
    assert_eq!(outcome, SolveOutcome::Infeasible { unassigned: vec![2] });
    assert!(outcome.plan().is_none());
}

#[test]
fn test_hard_limit_can_make_instance_infeasible() {
    let problem = RoutingProblem::new(
        DistanceMatrix::from_nodes(&line_nodes()),
        0,
        vec![Vehicle::new(0).with_max_distance(60)],
    )
    .expect("valid");

    // Node 4 needs an 80-long round trip on its own.
    match solve(&problem, &quick_config()) {
        SolveOutcome::Infeasible { unassigned } => assert_eq!(unassigned, vec![4]),
        SolveOutcome::Solved(_) => panic!("expected infeasible"),
    }
}

#[test]
fn test_search_never_worse_than_construction() {
    for seed in 0..6 {
        let problem = random_problem(seed, 25, 4);
        let evaluator = ConstraintEvaluator::new(&problem);
        let initial = path_cheapest_arc(&problem);
        assert!(initial.is_complete());

        let config = SolverConfig::new()
            .with_time_limit(Duration::from_millis(200))
            .with_step_limit(500);
        let plan = solve(&problem, &config).plan().cloned().expect("solved");
        assert!(plan.objective <= evaluator.objective(&initial));
    }
}

#[test]
fn test_construction_is_deterministic() {
    let problem = random_problem(42, 30, 4);
    let first = path_cheapest_arc(&problem);
    let second = path_cheapest_arc(&problem);
    assert_eq!(first, second);
}

#[test]
fn test_objective_is_idempotent() {
    let problem = random_problem(9, 20, 3);
    let evaluator = ConstraintEvaluator::new(&problem);
    let solution = path_cheapest_arc(&problem);
    assert_eq!(evaluator.objective(&solution), evaluator.objective(&solution));
}

#[test]
fn test_solve_from_json_input() {
    let input = ProblemInput::from_json_str(
        r#"{
            "node_count": 4,
            "depot": 0,
            "vehicle_count": 2,
            "distances": [
                [0, 10, 10, 14],
                [10, 0, 14, 10],
                [10, 14, 0, 10],
                [14, 10, 10, 0]
            ],
            "forbidden": [[3], []],
            "caps": [100, 100],
            "max_distances": [3000, 3000]
        }"#,
    )
    .expect("valid json");
    let problem = RoutingProblem::try_from(input).expect("valid problem");

    let plan = solve(&problem, &quick_config()).plan().cloned().expect("solved");
    assert!(!plan.routes[0].nodes.contains(&3));
    let served: usize = plan.routes.iter().map(|r| r.stops().len()).sum();
    assert_eq!(served, 3);
}

#[test]
fn test_invalid_input_is_rejected() {
    let input = ProblemInput {
        node_count: 2,
        depot: 5,
        vehicle_count: 1,
        distances: vec![vec![0, 1], vec![1, 0]],
        forbidden: vec![vec![]],
        caps: vec![10],
        penalty_weight: 1000,
        max_distances: None,
    };
    assert_eq!(
        RoutingProblem::try_from(input),
        Err(InvalidProblemError::DepotOutOfRange {
            depot: 5,
            node_count: 2
        })
    );
}

#[test]
fn test_huge_distances_do_not_overflow() {
    let d = 10_000_000_000_000_000;
    let distances = DistanceMatrix::from_rows(vec![vec![0, d], vec![d, 0]]).expect("square");
    let problem = RoutingProblem::new(distances, 0, vec![Vehicle::new(0).with_soft_cap(0)])
        .expect("valid");

    let plan = solve(&problem, &quick_config()).plan().cloned().expect("solved");
    assert_eq!(plan.routes[0].nodes, vec![0, 1, 0]);
    assert_eq!(plan.total_distance, 2 * d);
    assert_eq!(plan.total_overage, 2 * d);
    assert_eq!(plan.objective, i64::MAX);
}

#[test]
fn test_out_of_range_forbidden_ids_are_skipped() {
    let nodes: Vec<Node> = (0..5).map(|i| Node::new(i, i as f64 * 10.0, 10.0)).collect();
    let vehicles = [[2, 3], [4, 5], [6, 7], [8, 9]]
        .into_iter()
        .enumerate()
        .map(|(id, banned)| Vehicle::new(id).with_forbidden(banned).with_soft_cap(3000))
        .collect();
    let problem =
        RoutingProblem::new(DistanceMatrix::from_nodes(&nodes), 0, vehicles).expect("valid");

    let plan = solve(&problem, &quick_config()).plan().cloned().expect("solved");
    assert!(!plan.routes[0].nodes.contains(&2));
    assert!(!plan.routes[0].nodes.contains(&3));
    assert!(!plan.routes[1].nodes.contains(&4));
    let served: usize = plan.routes.iter().map(|r| r.stops().len()).sum();
    assert_eq!(served, 4);
}
