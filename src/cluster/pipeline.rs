//! Per-frame clustering action

use crate::cluster::{ClusterEngine, ClusterResult, FeedbackGuard, RawAssignment};
use crate::config::ClusteringConfig;
use crate::error::ClusterError;
use crate::graph::{AdjacencyView, NeighborListBuilder, NeighborLists};

/// Clusters one adjacency matrix per call for a fixed number of nodes.
///
/// Nothing is carried from one call to the next: neighbor lists and the
/// result are rebuilt from the matrix every time. A different node count
/// needs a new action.
pub struct ClusteringAction {
    config: ClusteringConfig,
    builder: NeighborListBuilder,
    engine: Box<dyn ClusterEngine + Send + Sync>,
    guard: FeedbackGuard,
}

impl ClusteringAction {
    /// Create an action running the strategy named in `config`
    pub fn new(node_count: usize, config: ClusteringConfig) -> Result<Self, ClusterError> {
        Self::with_engine(node_count, config, Box::new(config.strategy))
    }

    /// Create an action running a caller-supplied engine; the strategy in
    /// `config` is ignored
    pub fn with_engine(
        node_count: usize,
        config: ClusteringConfig,
        engine: Box<dyn ClusterEngine + Send + Sync>,
    ) -> Result<Self, ClusterError> {
        config.validate()?;
        let builder = NeighborListBuilder::new(node_count, config.edge_threshold)?;

        log::info!(
            "Clustering {} nodes with {} (edge threshold {})",
            node_count,
            engine.name(),
            config.edge_threshold
        );

        Ok(Self {
            builder,
            guard: FeedbackGuard::for_quantity(format!("{} clusters", engine.name())),
            config,
            engine,
        })
    }

    /// Number of nodes every input matrix must have
    pub fn node_count(&self) -> usize {
        self.builder.expected_nodes()
    }

    /// Active configuration
    pub fn config(&self) -> &ClusteringConfig {
        &self.config
    }

    /// Build neighbor lists for `adjacency` without clustering
    pub fn neighbor_lists<A: AdjacencyView>(&self, adjacency: &A) -> Result<NeighborLists, ClusterError> {
        self.builder.build(adjacency)
    }

    /// Cluster one adjacency matrix
    pub fn compute<A: AdjacencyView>(&self, adjacency: &A) -> Result<ClusterResult, ClusterError> {
        Ok(self.compute_with_neighbors(adjacency)?.0)
    }

    /// Cluster one adjacency matrix and also return the neighbor lists used.
    ///
    /// An engine that does not label exactly one entry per node fails with
    /// [`ClusterError::ShapeMismatch`].
    pub fn compute_with_neighbors<A: AdjacencyView>(
        &self,
        adjacency: &A,
    ) -> Result<(ClusterResult, NeighborLists), ClusterError> {
        let neighbors = self.builder.build(adjacency)?;
        let raw: RawAssignment = self.engine.perform_clustering(&neighbors);

        if raw.len() != neighbors.node_count() {
            log::error!(
                "{} labelled {} of {} nodes",
                self.engine.name(),
                raw.len(),
                neighbors.node_count()
            );
            return Err(ClusterError::ShapeMismatch {
                rows: raw.len(),
                cols: 1,
                expected: neighbors.node_count(),
            });
        }

        let result = ClusterResult::from_assignment(&raw, self.config.tie_break);

        log::debug!(
            "Found {} clusters, largest has {} nodes",
            result.number_of_clusters(),
            result.sizes().next().map_or(0, |entry| entry.size)
        );

        Ok((result, neighbors))
    }

    /// Back-propagate forces through `result`; always refused
    pub fn apply_forces(&self, result: &ClusterResult) -> Result<(), ClusterError> {
        self.guard.request_derivative(result)
    }

    /// Guard used for derivative requests
    pub fn guard(&self) -> &FeedbackGuard {
        &self.guard
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{ClusterId, ClusterStrategy, TieBreak};
    use crate::graph::{DenseAdjacency, SparseAdjacency};

    fn id(value: usize) -> ClusterId {
        ClusterId::new(value).unwrap()
    }

    #[test]
    fn five_node_example() {
        let mut dense = DenseAdjacency::zeros(5);
        dense.connect(0, 1, 1.0);
        dense.connect(1, 2, 1.0);
        dense.connect(3, 4, 1.0);

        let action = ClusteringAction::new(5, ClusteringConfig::default()).unwrap();
        let result = action.compute(&dense).unwrap();

        assert_eq!(result.number_of_clusters(), 2);
        assert_eq!(result.cluster_of(0), result.cluster_of(2));
        assert_eq!(result.cluster_of(3), result.cluster_of(4));
        assert_ne!(result.cluster_of(0), result.cluster_of(3));
        assert_eq!(result.size_of(id(1)), Some(3));
        assert_eq!(result.size_of(id(2)), Some(2));
    }

    #[test]
    fn malformed_matrix_fails_before_clustering() {
        let action = ClusteringAction::new(3, ClusteringConfig::default()).unwrap();
        let dense = DenseAdjacency::new(ndarray::Array2::ones((3, 4)));

        assert_eq!(
            action.compute(&dense),
            Err(ClusterError::ShapeMismatch {
                rows: 3,
                cols: 4,
                expected: 3
            })
        );
    }

    #[test]
    fn threshold_from_config_controls_edges() {
        let mut dense = DenseAdjacency::zeros(3);
        dense.connect(0, 1, 0.9);
        dense.connect(1, 2, 0.1);
        let config = ClusteringConfig::new(0.5, TieBreak::LargestFirst, ClusterStrategy::UnionFind);

        let result = ClusteringAction::new(3, config).unwrap().compute(&dense).unwrap();

        assert_eq!(result.number_of_clusters(), 2);
        assert_eq!(result.members_of(id(1)), Some(&[0, 1][..]));
        assert_eq!(result.members_of(id(2)), Some(&[2][..]));
    }

    #[test]
    fn repeated_calls_share_no_state() {
        let action = ClusteringAction::new(4, ClusteringConfig::default()).unwrap();

        let mut connected = DenseAdjacency::zeros(4);
        for i in 0..3 {
            connected.connect(i, i + 1, 1.0);
        }
        let first = action.compute(&connected).unwrap();
        let second = action.compute(&DenseAdjacency::zeros(4)).unwrap();
        let third = action.compute(&connected).unwrap();

        assert_eq!(first.number_of_clusters(), 1);
        assert_eq!(second.number_of_clusters(), 4);
        assert_eq!(first, third);
    }

    #[test]
    fn sparse_input_is_accepted() {
        let sparse = SparseAdjacency::from_triplets(3, 3, &[(0, 2, 1.0), (2, 0, 1.0)]).unwrap();
        let action = ClusteringAction::new(3, ClusteringConfig::default()).unwrap();
        let (result, neighbors) = action.compute_with_neighbors(&sparse).unwrap();

        assert_eq!(neighbors.neighbors_of(0), &[2]);
        assert_eq!(result.members_of(id(1)), Some(&[0, 2][..]));
    }

    #[test]
    fn forces_are_refused() {
        let action = ClusteringAction::new(2, ClusteringConfig::default()).unwrap();
        let result = action.compute(&DenseAdjacency::zeros(2)).unwrap();

        assert!(matches!(
            action.apply_forces(&result),
            Err(ClusterError::NotDifferentiable { .. })
        ));
    }

    #[test]
    fn engine_labelling_too_few_nodes_is_rejected() {
        struct Truncated;
        impl ClusterEngine for Truncated {
            fn name(&self) -> &'static str {
                "truncated"
            }
            fn perform_clustering(&self, _neighbors: &NeighborLists) -> RawAssignment {
                vec![0]
            }
        }

        let action =
            ClusteringAction::with_engine(3, ClusteringConfig::default(), Box::new(Truncated))
                .unwrap();

        assert_eq!(
            action.compute(&DenseAdjacency::zeros(3)),
            Err(ClusterError::ShapeMismatch {
                rows: 1,
                cols: 1,
                expected: 3
            })
        );
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = ClusteringConfig::new(f64::NAN, TieBreak::LargestFirst, ClusterStrategy::default());
        assert!(ClusteringAction::new(2, config).is_err());
    }
}
