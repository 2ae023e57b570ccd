//! Validated, immutable routing problem.

use tracing::debug;

use super::Vehicle;
use crate::distance::DistanceMatrix;
use crate::error::InvalidProblemError;

/// Penalty charged per unit of soft-cap overage unless overridden.
///
/// It has to dominate ordinary distance differences so that the search
/// trades any amount of distance for a reduction in cap overage.
pub const DEFAULT_PENALTY_WEIGHT: i64 = 1000;

/// A multi-vehicle routing problem instance.
///
/// Holds the distance matrix, the depot, and the fleet with its per-vehicle
/// restrictions. All checks happen in [`RoutingProblem::new`]; afterwards the
/// problem is read-only for the duration of a solve.
///
/// Forbidden sets are expanded into a dense `vehicle × node` mask so that
/// feasibility lookups in the search loops are constant time.
///
/// # Examples
///
/// ```
/// use crew_routing::models::{Node, RoutingProblem, Vehicle};
/// use crew_routing::distance::DistanceMatrix;
///
/// let nodes: Vec<Node> = (0..4).map(|i| Node::new(i, i as f64 * 10.0, 0.0)).collect();
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// let vehicles = vec![
///     Vehicle::new(0).with_forbidden([3]).with_soft_cap(100),
///     Vehicle::new(1).with_soft_cap(100),
/// ];
///
/// let problem = RoutingProblem::new(dm, 0, vehicles).unwrap();
/// assert_eq!(problem.node_count(), 4);
/// assert_eq!(problem.vehicle_count(), 2);
/// assert!(problem.is_forbidden(0, 3));
/// assert!(!problem.is_forbidden(1, 3));
/// assert_eq!(problem.distance(1, 3), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingProblem {
    distances: DistanceMatrix,
    depot: usize,
    vehicles: Vec<Vehicle>,
    forbidden: Vec<bool>,
    penalty_weight: i64,
}

impl RoutingProblem {
    /// Validates and builds a problem with the default penalty weight.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidProblemError`] if the matrix is empty, negative,
    /// asymmetric or has a non-zero diagonal, if the depot is out of range,
    /// if there are no vehicles, if vehicle ids are not `0..k` in order, or
    /// if a distance limit is negative.
    ///
    /// A depot listed in a forbidden set is ignored: every route starts and
    /// ends there. Forbidden ids outside `0..n` name no node and are ignored
    /// too.
    pub fn new(
        distances: DistanceMatrix,
        depot: usize,
        vehicles: Vec<Vehicle>,
    ) -> Result<Self, InvalidProblemError> {
        let n = distances.size();
        if n == 0 {
            return Err(InvalidProblemError::NoNodes);
        }
        if depot >= n {
            return Err(InvalidProblemError::DepotOutOfRange {
                depot,
                node_count: n,
            });
        }
        distances.validate()?;
        if vehicles.is_empty() {
            return Err(InvalidProblemError::NoVehicles);
        }

        let mut forbidden = vec![false; vehicles.len() * n];
        for (position, vehicle) in vehicles.iter().enumerate() {
            if vehicle.id() != position {
                return Err(InvalidProblemError::VehicleIdMismatch {
                    position,
                    id: vehicle.id(),
                });
            }
            for cap in [vehicle.soft_cap(), vehicle.max_distance()].into_iter().flatten() {
                if cap < 0 {
                    return Err(InvalidProblemError::NegativeCap {
                        vehicle: position,
                        cap,
                    });
                }
            }
            for &node in vehicle.forbidden() {
                if node >= n {
                    debug!(vehicle = position, node, "ignoring out-of-range forbidden node");
                    continue;
                }
                if node == depot {
                    debug!(vehicle = position, node, "ignoring forbidden depot");
                    continue;
                }
                forbidden[position * n + node] = true;
            }
        }

        Ok(Self {
            distances,
            depot,
            vehicles,
            forbidden,
            penalty_weight: DEFAULT_PENALTY_WEIGHT,
        })
    }

    /// Replaces the soft-cap penalty weight.
    pub fn with_penalty_weight(mut self, weight: i64) -> Result<Self, InvalidProblemError> {
        if weight < 0 {
            return Err(InvalidProblemError::NegativePenaltyWeight(weight));
        }
        self.penalty_weight = weight;
        Ok(self)
    }

    /// Travel distance between two nodes.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> i64 {
        self.distances.get(from, to)
    }

    /// Returns `true` if `vehicle` may never visit `node`.
    #[inline]
    pub fn is_forbidden(&self, vehicle: usize, node: usize) -> bool {
        self.forbidden[vehicle * self.node_count() + node]
    }

    /// Soft distance cap of `vehicle`, if it has one.
    pub fn cap(&self, vehicle: usize) -> Option<i64> {
        self.vehicles[vehicle].soft_cap()
    }

    /// Hard maximum route distance of `vehicle`, if it has one.
    pub fn max_distance(&self, vehicle: usize) -> Option<i64> {
        self.vehicles[vehicle].max_distance()
    }

    /// The depot node.
    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Number of nodes including the depot.
    pub fn node_count(&self) -> usize {
        self.distances.size()
    }

    /// Number of non-depot nodes that must be visited.
    pub fn num_customers(&self) -> usize {
        self.node_count() - 1
    }

    /// Non-depot nodes in ascending order.
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.node_count()).filter(move |&node| node != self.depot)
    }

    /// Number of vehicles.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// The fleet, indexed by vehicle id.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Penalty per unit of soft-cap overage.
    pub fn penalty_weight(&self) -> i64 {
        self.penalty_weight
    }

    /// The underlying distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }
}
