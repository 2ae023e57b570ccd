//! Dense integer distance matrix.

use crate::error::InvalidProblemError;
use crate::models::Node;

/// A dense n×n integer distance matrix stored in row-major order.
///
/// Distances are integers; [`from_nodes`](Self::from_nodes) truncates
/// Euclidean distances toward zero.
///
/// # Examples
///
/// ```
/// use crew_routing::models::Node;
/// use crew_routing::distance::DistanceMatrix;
///
/// let nodes = vec![
///     Node::new(0, 0.0, 0.0),
///     Node::new(1, 3.0, 4.0),
///     Node::new(2, 6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_nodes(&nodes);
/// assert_eq!(dm.get(0, 1), 5);
/// assert_eq!(dm.get(0, 2), 10);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    data: Vec<i64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Computes a Euclidean distance matrix from node coordinates,
    /// truncating each distance to an integer.
    pub fn from_nodes(nodes: &[Node]) -> Self {
        let n = nodes.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance_to(&nodes[j]) as i64;
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from explicit rows.
    ///
    /// Fails if any row length differs from the number of rows.
    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, InvalidProblemError> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(InvalidProblemError::MatrixNotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            data.extend(values);
        }
        Ok(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> i64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    pub fn set(&mut self, from: usize, to: usize, distance: i64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Checks the matrix is usable as a routing metric: non-negative,
    /// zero diagonal, symmetric.
    pub fn validate(&self) -> Result<(), InvalidProblemError> {
        for from in 0..self.size {
            for to in 0..self.size {
                let distance = self.get(from, to);
                if distance < 0 {
                    return Err(InvalidProblemError::NegativeDistance { from, to, distance });
                }
            }
            let diagonal = self.get(from, from);
            if diagonal != 0 {
                return Err(InvalidProblemError::NonZeroDiagonal {
                    node: from,
                    distance: diagonal,
                });
            }
        }
        if let Some((from, to)) = self.first_asymmetry() {
            return Err(InvalidProblemError::AsymmetricDistance { from, to });
        }
        Ok(())
    }

    fn first_asymmetry(&self) -> Option<(usize, usize)> {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if self.get(i, j) != self.get(j, i) {
                    return Some((i, j));
                }
            }
        }
        None
    }
}
