//! Serializable problem description.

use serde::{Deserialize, Serialize};

use super::{RoutingProblem, Vehicle, DEFAULT_PENALTY_WEIGHT};
use crate::distance::DistanceMatrix;
use crate::error::{ConfigError, InvalidProblemError};

/// Plain-data form of a routing problem, as handed over by a caller.
///
/// `forbidden[v]` and `caps[v]` belong to vehicle `v`; both lists must have
/// `vehicle_count` entries. `max_distances`, when present, must as well.
///
/// # Examples
///
/// ```
/// use crew_routing::models::{ProblemInput, RoutingProblem};
///
/// let input = ProblemInput::from_json_str(r#"{
///     "node_count": 3,
///     "depot": 0,
///     "vehicle_count": 2,
///     "distances": [[0, 4, 6], [4, 0, 3], [6, 3, 0]],
///     "forbidden": [[2], []],
///     "caps": [200, 200]
/// }"#).unwrap();
///
/// let problem = RoutingProblem::try_from(input).unwrap();
/// assert!(problem.is_forbidden(0, 2));
/// assert_eq!(problem.penalty_weight(), 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProblemInput {
    pub node_count: usize,
    pub depot: usize,
    pub vehicle_count: usize,
    pub distances: Vec<Vec<i64>>,
    pub forbidden: Vec<Vec<usize>>,
    pub caps: Vec<i64>,
    #[serde(default = "default_penalty_weight")]
    pub penalty_weight: i64,
    #[serde(default)]
    pub max_distances: Option<Vec<i64>>,
}

fn default_penalty_weight() -> i64 {
    DEFAULT_PENALTY_WEIGHT
}

impl ProblemInput {
    /// Parses a problem description from JSON.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }
}

impl TryFrom<ProblemInput> for RoutingProblem {
    type Error = InvalidProblemError;

    fn try_from(input: ProblemInput) -> Result<Self, Self::Error> {
        let k = input.vehicle_count;
        let limits_ok = input.max_distances.as_ref().is_none_or(|m| m.len() == k);
        if input.forbidden.len() != k || input.caps.len() != k || !limits_ok {
            return Err(InvalidProblemError::VehicleDataMismatch {
                vehicles: k,
                forbidden: input.forbidden.len(),
                caps: input.caps.len(),
            });
        }

        let distances = DistanceMatrix::from_rows(input.distances)?;
        if distances.size() != input.node_count {
            return Err(InvalidProblemError::NodeCountMismatch {
                nodes: input.node_count,
                matrix: distances.size(),
            });
        }

        let vehicles = input
            .forbidden
            .into_iter()
            .zip(input.caps)
            .enumerate()
            .map(|(id, (forbidden, cap))| {
                let vehicle = Vehicle::new(id).with_forbidden(forbidden).with_soft_cap(cap);
                match &input.max_distances {
                    Some(limits) => vehicle.with_max_distance(limits[id]),
                    None => vehicle,
                }
            })
            .collect();

        RoutingProblem::new(distances, input.depot, vehicles)?.with_penalty_weight(input.penalty_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> ProblemInput {
        ProblemInput {
            node_count: 3,
            depot: 0,
            vehicle_count: 2,
            distances: vec![vec![0, 4, 6], vec![4, 0, 3], vec![6, 3, 0]],
            forbidden: vec![vec![1], vec![]],
            caps: vec![100, 50],
            penalty_weight: 1000,
            max_distances: None,
        }
    }

    #[test]
    fn test_try_from_valid() {
        let problem = RoutingProblem::try_from(sample_input()).expect("valid");
        assert_eq!(problem.vehicle_count(), 2);
        assert_eq!(problem.cap(1), Some(50));
        assert!(problem.is_forbidden(0, 1));
        assert_eq!(problem.max_distance(0), None);
    }

    #[test]
    fn test_try_from_vehicle_mismatch() {
        let mut input = sample_input();
        input.caps.pop();
        assert!(matches!(
            RoutingProblem::try_from(input),
            Err(InvalidProblemError::VehicleDataMismatch {
                vehicles: 2,
                forbidden: 2,
                caps: 1
            })
        ));
    }

    #[test]
    fn test_try_from_node_count_mismatch() {
        let mut input = sample_input();
        input.node_count = 4;
        assert_eq!(
            RoutingProblem::try_from(input).unwrap_err(),
            InvalidProblemError::NodeCountMismatch {
                nodes: 4,
                matrix: 3
            }
        );
    }

    #[test]
    fn test_try_from_max_distances() {
        let mut input = sample_input();
        input.max_distances = Some(vec![3000, 20]);
        let problem = RoutingProblem::try_from(input).expect("valid");
        assert_eq!(problem.max_distance(1), Some(20));
    }

    #[test]
    fn test_from_json_defaults() {
        let input = ProblemInput::from_json_str(
            r#"{"node_count": 2, "depot": 1, "vehicle_count": 1,
                "distances": [[0, 7], [7, 0]], "forbidden": [[]], "caps": [10]}"#,
        )
        .expect("parses");
        assert_eq!(input.penalty_weight, DEFAULT_PENALTY_WEIGHT);
        assert!(input.max_distances.is_none());
    }

    #[test]
    fn test_from_json_malformed() {
        let err = ProblemInput::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
