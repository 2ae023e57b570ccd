//! Route type.

/// An ordered sequence of node visits assigned to a single vehicle.
///
/// A route starts and ends at the depot; the depot itself is not stored in
/// `stops`. Use [`Route::nodes_with_depot`] for the closed sequence.
///
/// # Examples
///
/// ```
/// use crew_routing::models::Route;
///
/// let mut route = Route::new(0);
/// route.push_stop(3);
/// route.push_stop(1);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.nodes_with_depot(0), vec![0, 3, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    vehicle_id: usize,
    stops: Vec<usize>,
    total_distance: i64,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: usize) -> Self {
        Self {
            vehicle_id,
            stops: Vec::new(),
            total_distance: 0,
        }
    }

    /// Creates a route from an explicit stop sequence (depot excluded).
    pub fn with_stops(vehicle_id: usize, stops: Vec<usize>) -> Self {
        Self {
            vehicle_id,
            stops,
            total_distance: 0,
        }
    }

    /// Appends a stop to the end of this route.
    pub fn push_stop(&mut self, node: usize) {
        self.stops.push(node);
    }

    /// Returns the vehicle assigned to this route.
    pub fn vehicle_id(&self) -> usize {
        self.vehicle_id
    }

    /// Returns the visited nodes in order (depot excluded).
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Number of visits (depot excluded).
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the vehicle stays at the depot.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Last visited node, or the depot when the route is empty.
    pub fn last_or(&self, depot: usize) -> usize {
        self.stops.last().copied().unwrap_or(depot)
    }

    /// The closed sequence `depot, stops..., depot`.
    pub fn nodes_with_depot(&self, depot: usize) -> Vec<usize> {
        let mut nodes = Vec::with_capacity(self.stops.len() + 2);
        nodes.push(depot);
        nodes.extend_from_slice(&self.stops);
        nodes.push(depot);
        nodes
    }

    /// Total distance of this route (set by the evaluator).
    pub fn total_distance(&self) -> i64 {
        self.total_distance
    }

    /// Sets the total distance (used by the evaluator).
    pub fn set_total_distance(&mut self, d: i64) {
        self.total_distance = d;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_empty() {
        let r = Route::new(2);
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.vehicle_id(), 2);
        assert_eq!(r.total_distance(), 0);
        assert_eq!(r.last_or(7), 7);
        assert_eq!(r.nodes_with_depot(7), vec![7, 7]);
    }

    #[test]
    fn test_route_push_stop() {
        let mut r = Route::new(1);
        r.push_stop(5);
        r.push_stop(3);
        assert_eq!(r.stops(), &[5, 3]);
        assert_eq!(r.last_or(0), 3);
    }

    #[test]
    fn test_route_with_stops() {
        let mut r = Route::with_stops(0, vec![4, 2]);
        r.set_total_distance(42);
        assert_eq!(r.len(), 2);
        assert_eq!(r.total_distance(), 42);
    }
}
