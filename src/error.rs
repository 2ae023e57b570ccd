//! Error types.
//!
//! Malformed problems are rejected eagerly with [`InvalidProblemError`].
//! An instance that simply cannot be served under its forbidden-visit rules
//! is not an error; it comes back as
//! [`SolveOutcome::Infeasible`](crate::output::SolveOutcome::Infeasible).

use thiserror::Error;

/// A routing problem failed validation and cannot be solved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidProblemError {
    #[error("problem has no nodes")]
    NoNodes,

    #[error("depot {depot} is out of range for {node_count} nodes")]
    DepotOutOfRange { depot: usize, node_count: usize },

    #[error("distance matrix row {row} has {len} entries, expected {expected}")]
    MatrixNotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("problem declares {nodes} nodes but the distance matrix is {matrix}x{matrix}")]
    NodeCountMismatch { nodes: usize, matrix: usize },

    #[error("negative distance {distance} from {from} to {to}")]
    NegativeDistance { from: usize, to: usize, distance: i64 },

    #[error("distance from node {node} to itself is {distance}, expected 0")]
    NonZeroDiagonal { node: usize, distance: i64 },

    #[error("distance matrix is not symmetric between {from} and {to}")]
    AsymmetricDistance { from: usize, to: usize },

    #[error("problem has no vehicles")]
    NoVehicles,

    #[error("vehicle at position {position} has id {id}")]
    VehicleIdMismatch { position: usize, id: usize },

    #[error("{vehicles} vehicles but {forbidden} forbidden sets and {caps} caps")]
    VehicleDataMismatch {
        vehicles: usize,
        forbidden: usize,
        caps: usize,
    },

    #[error("vehicle {vehicle} has negative distance cap {cap}")]
    NegativeCap { vehicle: usize, cap: i64 },

    #[error("penalty weight must be non-negative, got {0}")]
    NegativePenaltyWeight(i64),
}

/// Solver configuration could not be loaded or is inconsistent.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
