//! Neighbor list construction from an adjacency matrix

use crate::error::ClusterError;
use crate::graph::{AdjacencyView, NeighborLists};
use rayon::prelude::*;

/// Row count from which rows are scanned on the rayon pool
pub const PARALLEL_ROW_THRESHOLD: usize = 256;

/// Turns an adjacency matrix into per-node neighbor lists.
///
/// An entry `(i, j)` with `i != j` becomes an edge when its weight is
/// strictly greater than `edge_threshold`. Diagonal entries are ignored.
/// Symmetry of the matrix is assumed, not checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborListBuilder {
    expected_nodes: usize,
    edge_threshold: f64,
}

impl NeighborListBuilder {
    /// Create a builder for matrices of `expected_nodes` × `expected_nodes`.
    ///
    /// The threshold must be finite and non-negative.
    pub fn new(expected_nodes: usize, edge_threshold: f64) -> Result<Self, ClusterError> {
        if !edge_threshold.is_finite() || edge_threshold < 0.0 {
            return Err(ClusterError::Config {
                reason: format!(
                    "edge_threshold must be finite and non-negative, got {}",
                    edge_threshold
                ),
            });
        }

        Ok(Self {
            expected_nodes,
            edge_threshold,
        })
    }

    /// Expected matrix dimension
    pub fn expected_nodes(&self) -> usize {
        self.expected_nodes
    }

    /// Minimum weight an entry must exceed to count as an edge
    pub fn edge_threshold(&self) -> f64 {
        self.edge_threshold
    }

    /// Build neighbor lists for `adjacency`.
    ///
    /// The shape is checked before any row is read. When several entries
    /// carry invalid weights, the first one in row-major order is reported.
    pub fn build<A: AdjacencyView>(&self, adjacency: &A) -> Result<NeighborLists, ClusterError> {
        let (rows, cols) = adjacency.shape();
        if rows != cols || rows != self.expected_nodes {
            return Err(ClusterError::ShapeMismatch {
                rows,
                cols,
                expected: self.expected_nodes,
            });
        }

        let scanned: Vec<Result<Vec<usize>, ClusterError>> = if rows >= PARALLEL_ROW_THRESHOLD {
            log::debug!("Scanning {} adjacency rows in parallel", rows);
            (0..rows)
                .into_par_iter()
                .map(|row| self.scan_row(adjacency, row))
                .collect()
        } else {
            (0..rows).map(|row| self.scan_row(adjacency, row)).collect()
        };

        let lists = scanned.into_iter().collect::<Result<Vec<_>, _>>()?;
        let neighbors = NeighborLists::from_sorted_lists(lists);

        log::debug!(
            "Built neighbor lists for {} nodes with {} entries",
            neighbors.node_count(),
            neighbors.entry_count()
        );

        Ok(neighbors)
    }

    fn scan_row<A: AdjacencyView>(&self, adjacency: &A, row: usize) -> Result<Vec<usize>, ClusterError> {
        let mut neighbors = Vec::new();
        let mut invalid = None;

        adjacency.for_each_in_row(row, |col, weight| {
            if invalid.is_some() {
                return;
            }
            if !weight.is_finite() || weight < 0.0 {
                invalid = Some(ClusterError::InvalidWeight { row, col, weight });
                return;
            }
            if col != row && weight > self.edge_threshold {
                neighbors.push(col);
            }
        });

        if let Some(err) = invalid {
            return Err(err);
        }

        neighbors.sort_unstable();
        neighbors.dedup();
        Ok(neighbors)
    }
}
