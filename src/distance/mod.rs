//! Distance matrices.
//!
//! Provides a dense integer distance matrix for routing problems.

mod matrix;

pub use matrix::DistanceMatrix;
