//! Error types produced by the clustering core.

use thiserror::Error;

/// Errors raised while building neighbor lists, clustering or aggregating.
///
/// Every variant is fatal to the current evaluation: clustering is
/// deterministic, so retrying with the same input cannot succeed.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum ClusterError {
    /// The input has the wrong dimensions for the expected node count.
    #[error("input of shape {rows}x{cols} does not match the expected {expected} nodes")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
    },
    /// A negative or non-finite edge weight was encountered.
    #[error("invalid edge weight {weight} at row {row}, column {col}")]
    InvalidWeight { row: usize, col: usize, weight: f64 },
    /// A derivative or force was requested through a discrete quantity.
    #[error("{quantity} is a discrete cluster assignment and has no derivative")]
    NotDifferentiable { quantity: String },
    /// A configuration value is outside its domain.
    #[error("invalid clustering configuration: {reason}")]
    Config { reason: String },
}
