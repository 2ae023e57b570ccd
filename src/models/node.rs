//! Node (depot or client location) type.

/// A location in a routing problem: the depot or a client to be visited.
///
/// Nodes only carry coordinates. The solver itself works on the distance
/// matrix; coordinates exist so callers can derive that matrix with
/// [`DistanceMatrix::from_nodes`](crate::distance::DistanceMatrix::from_nodes).
///
/// # Examples
///
/// ```
/// use crew_routing::models::Node;
///
/// let a = Node::new(0, 0.0, 0.0);
/// let b = Node::new(1, 3.0, 4.0);
/// assert_eq!(b.id(), 1);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    id: usize,
    x: f64,
    y: f64,
}

impl Node {
    /// Creates a node at the given coordinates.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Node ID (index into the distance matrix).
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
