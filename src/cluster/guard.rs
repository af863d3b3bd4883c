//! Refusal of derivative feedback through cluster assignments

use crate::cluster::ClusterResult;
use crate::error::ClusterError;

/// Rejects every attempt to push forces or derivatives through a
/// clustering result. Cluster membership is piecewise constant in the
/// input; no zero gradient is ever returned in place of the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackGuard {
    quantity: String,
}

impl FeedbackGuard {
    /// Guard for the quantity named `quantity` (used in error messages)
    pub fn for_quantity(quantity: impl Into<String>) -> Self {
        Self {
            quantity: quantity.into(),
        }
    }

    /// Name of the guarded quantity
    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    /// Request the derivative of `result` with respect to the input
    pub fn request_derivative(&self, result: &ClusterResult) -> Result<(), ClusterError> {
        log::error!(
            "Derivative requested through {} ({} nodes, {} clusters)",
            self.quantity,
            result.node_count(),
            result.number_of_clusters()
        );
        Err(self.refusal())
    }

    /// Force on one element of the `imat`-th input matrix
    pub fn force_on_matrix_element(
        &self,
        imat: usize,
        row: usize,
        col: usize,
    ) -> Result<f64, ClusterError> {
        log::error!(
            "Force requested on element ({}, {}) of matrix {} through {}",
            row,
            col,
            imat,
            self.quantity
        );
        Err(self.refusal())
    }

    fn refusal(&self) -> ClusterError {
        ClusterError::NotDifferentiable {
            quantity: self.quantity.clone(),
        }
    }
}
