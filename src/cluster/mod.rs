//! Cluster analysis module

pub mod detection;
pub mod guard;
pub mod metrics;
pub mod pipeline;
pub mod result;

pub use detection::{ConnectedComponents, DensityThreshold, DisjointSets, UnionFindComponents};
pub use guard::FeedbackGuard;
pub use pipeline::ClusteringAction;
pub use result::{ClusterId, ClusterResult, ClusterSize, TieBreak};

use crate::graph::NeighborLists;
use serde::{Deserialize, Serialize};

/// Per-node labels straight out of an engine, before canonical ranking.
///
/// Nodes sharing a label belong to the same cluster; label values mean
/// nothing else.
pub type RawAssignment = Vec<usize>;

/// A clustering algorithm over neighbor lists.
///
/// `perform_clustering` is the only method an algorithm has to provide.
/// It must label every node and must not fail on well-formed lists.
pub trait ClusterEngine {
    /// Short algorithm name used in logs
    fn name(&self) -> &'static str;

    /// Label every node of `neighbors`
    fn perform_clustering(&self, neighbors: &NeighborLists) -> RawAssignment;

    /// Run the algorithm and rank its clusters canonically
    fn cluster(&self, neighbors: &NeighborLists, tie_break: TieBreak) -> ClusterResult {
        let raw = self.perform_clustering(neighbors);
        debug_assert_eq!(raw.len(), neighbors.node_count(), "{} skipped nodes", self.name());
        ClusterResult::from_assignment(&raw, tie_break)
    }
}

/// Built-in algorithms selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ClusterStrategy {
    /// Breadth-first connected components
    #[default]
    ConnectedComponents,
    /// Disjoint-set connected components
    UnionFind,
    /// Core nodes with at least `min_neighbors` neighbors seed clusters
    DensityThreshold { min_neighbors: usize },
}

impl ClusterEngine for ClusterStrategy {
    fn name(&self) -> &'static str {
        match self {
            Self::ConnectedComponents => ConnectedComponents.name(),
            Self::UnionFind => UnionFindComponents.name(),
            Self::DensityThreshold { min_neighbors } => DensityThreshold::new(*min_neighbors).name(),
        }
    }

    fn perform_clustering(&self, neighbors: &NeighborLists) -> RawAssignment {
        match self {
            Self::ConnectedComponents => ConnectedComponents.perform_clustering(neighbors),
            Self::UnionFind => UnionFindComponents.perform_clustering(neighbors),
            Self::DensityThreshold { min_neighbors } => {
                DensityThreshold::new(*min_neighbors).perform_clustering(neighbors)
            }
        }
    }
}
