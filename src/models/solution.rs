//! Solution and violation types.

use super::Route;

/// A type of constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationType {
    /// A non-depot node is not visited by any route.
    MissingNode {
        /// The unvisited node.
        node: usize,
    },
    /// A node is visited more than once across all routes.
    DuplicateNode {
        /// The repeated node.
        node: usize,
    },
    /// The depot appears as an intermediate stop.
    DepotVisited {
        /// Route whose stops contain the depot.
        vehicle_id: usize,
    },
    /// A vehicle visits a node from its forbidden set.
    ForbiddenNode {
        /// Offending vehicle.
        vehicle_id: usize,
        /// Forbidden node it visits.
        node: usize,
    },
    /// Route distance exceeds the vehicle's hard maximum.
    MaxDistanceExceeded {
        /// Offending vehicle.
        vehicle_id: usize,
        /// Actual distance.
        distance: i64,
        /// Maximum allowed distance.
        max_distance: i64,
    },
    /// Route distance exceeds the vehicle's soft cap (penalized, not fatal).
    SoftCapExceeded {
        /// Offending vehicle.
        vehicle_id: usize,
        /// Actual distance.
        distance: i64,
        /// Soft cap.
        cap: i64,
    },
}

/// A constraint violation in a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }

    /// Returns `true` for violations that make a solution unusable.
    ///
    /// Soft-cap overage is the only non-fatal kind.
    pub fn is_hard(&self) -> bool {
        !matches!(self.kind, ViolationType::SoftCapExceeded { .. })
    }
}

/// A multi-vehicle solution: one route per vehicle, indexed by vehicle id.
///
/// Nodes that construction could not place are kept in `unassigned`; a
/// solution with unassigned nodes is incomplete and never reported as solved.
///
/// # Examples
///
/// ```
/// use crew_routing::models::{Route, Solution};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::with_stops(0, vec![1, 2]));
/// sol.add_route(Route::new(1));
/// assert_eq!(sol.num_routes(), 2);
/// assert_eq!(sol.num_served(), 2);
/// assert!(sol.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    routes: Vec<Route>,
    unassigned: Vec<usize>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            unassigned: Vec::new(),
        }
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Marks a node as unassigned.
    pub fn add_unassigned(&mut self, node: usize) {
        self.unassigned.push(node);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Returns the nodes that could not be placed.
    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    /// Returns the number of unplaced nodes.
    pub fn num_unassigned(&self) -> usize {
        self.unassigned.len()
    }

    /// Returns `true` if every node was placed.
    pub fn is_complete(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Total distance across all routes.
    pub fn total_distance(&self) -> i64 {
        self.routes.iter().map(|r| r.total_distance()).sum()
    }

    /// Total number of nodes served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }
}

impl Default for Solution {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_empty() {
        let sol = Solution::new();
        assert_eq!(sol.num_routes(), 0);
        assert_eq!(sol.num_unassigned(), 0);
        assert_eq!(sol.num_served(), 0);
        assert_eq!(sol.total_distance(), 0);
    }

    #[test]
    fn test_solution_with_routes() {
        let mut sol = Solution::new();

        let mut r1 = Route::with_stops(0, vec![1]);
        r1.set_total_distance(50);
        let mut r2 = Route::with_stops(1, vec![2, 3]);
        r2.set_total_distance(80);

        sol.add_route(r1);
        sol.add_route(r2);
        sol.add_unassigned(4);

        assert_eq!(sol.num_routes(), 2);
        assert_eq!(sol.num_served(), 3);
        assert_eq!(sol.unassigned(), &[4]);
        assert!(!sol.is_complete());
        assert_eq!(sol.total_distance(), 130);
    }

    #[test]
    fn test_violation_hardness() {
        let soft = Violation::new(ViolationType::SoftCapExceeded {
            vehicle_id: 0,
            distance: 250,
            cap: 200,
        });
        let hard = Violation::new(ViolationType::ForbiddenNode {
            vehicle_id: 0,
            node: 3,
        });
        assert!(!soft.is_hard());
        assert!(hard.is_hard());
    }
}
