//! Cluster statistics and per-cluster aggregates

use crate::cluster::{ClusterId, ClusterResult};
use crate::error::ClusterError;
use crate::graph::NeighborLists;
use itertools::Itertools;
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BTreeMap;

/// Maximum number of hub nodes reported per cluster
pub const MAX_HUBS: usize = 5;

/// Descriptive statistics of one cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub id: ClusterId,
    pub size: usize,
    pub members: Vec<usize>,

    /// Undirected edges with both ends in the cluster
    pub internal_edges: usize,

    /// internal_edges / (size * (size - 1) / 2)
    pub density: f64,

    /// Members with the most neighbors inside the cluster
    pub hubs: Vec<usize>,
}

/// Number of clusters of each size, keyed by size
pub fn size_distribution(result: &ClusterResult) -> BTreeMap<usize, usize> {
    result.sizes().map(|entry| entry.size).counts().into_iter().collect()
}

/// Summaries for every cluster in canonical order.
///
/// `neighbors` must describe the same nodes as `result`.
pub fn summarize(
    result: &ClusterResult,
    neighbors: &NeighborLists,
) -> Result<Vec<ClusterSummary>, ClusterError> {
    if neighbors.node_count() != result.node_count() {
        return Err(ClusterError::ShapeMismatch {
            rows: neighbors.node_count(),
            cols: neighbors.node_count(),
            expected: result.node_count(),
        });
    }

    log::debug!("Summarizing {} clusters", result.number_of_clusters());

    Ok(result
        .cluster_ids()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|id| summarize_cluster(result, neighbors, id))
        .collect())
}

fn summarize_cluster(
    result: &ClusterResult,
    neighbors: &NeighborLists,
    id: ClusterId,
) -> ClusterSummary {
    let members = result.members_of(id).unwrap_or_default().to_vec();

    // Degree of each member counted over neighbors in the same cluster
    let inner_degrees: Vec<(usize, usize)> = members
        .iter()
        .map(|&node| {
            let degree = neighbors
                .neighbors_of(node)
                .iter()
                .filter(|&&next| result.cluster_of(next) == Some(id))
                .count();
            (node, degree)
        })
        .collect();

    let internal_edges = members
        .iter()
        .map(|&node| {
            neighbors
                .neighbors_of(node)
                .iter()
                .filter(|&&next| next > node && result.cluster_of(next) == Some(id))
                .count()
        })
        .sum();

    let hubs = inner_degrees
        .iter()
        .filter(|&&(_, degree)| degree > 0)
        .sorted_by_key(|&&(node, degree)| (Reverse(degree), node))
        .take(MAX_HUBS)
        .map(|&(node, _)| node)
        .collect();

    ClusterSummary {
        id,
        size: members.len(),
        density: calculate_density(members.len(), internal_edges),
        internal_edges,
        members,
        hubs,
    }
}

/// Density of an undirected cluster of `size` nodes with `internal_edges`
pub fn calculate_density(size: usize, internal_edges: usize) -> f64 {
    if size <= 1 {
        return 1.0; // By convention, singleton clusters have density 1
    }

    let potential_edges = size * (size - 1) / 2;
    internal_edges as f64 / potential_edges as f64
}

/// Sum a per-node scalar over every cluster, in canonical order
pub fn property_sums(result: &ClusterResult, values: &[f64]) -> Result<Vec<f64>, ClusterError> {
    if values.len() != result.node_count() {
        return Err(ClusterError::ShapeMismatch {
            rows: values.len(),
            cols: 1,
            expected: result.node_count(),
        });
    }

    let mut sums = vec![0.0; result.number_of_clusters()];
    for (id, value) in result.assignment().iter().zip(values) {
        sums[id.get() - 1] += value;
    }
    Ok(sums)
}
