//! Compressed per-node neighbor lists

use crate::error::ClusterError;

/// Neighbor lists for every node, stored in compressed-row form.
///
/// `offsets[i]..offsets[i + 1]` is the slice of `neighbors` belonging to
/// node `i`. Each slice is sorted ascending and holds no duplicates or
/// self-loops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborLists {
    node_count: usize,
    offsets: Vec<usize>,
    neighbors: Vec<usize>,
}

impl NeighborLists {
    /// Build from per-node lists, sorting and de-duplicating each one.
    ///
    /// Self-loops are dropped. A neighbor index outside `0..lists.len()`
    /// fails with [`ClusterError::ShapeMismatch`].
    pub fn from_lists(mut lists: Vec<Vec<usize>>) -> Result<Self, ClusterError> {
        let node_count = lists.len();

        for (node, list) in lists.iter_mut().enumerate() {
            if let Some(&out_of_range) = list.iter().find(|&&n| n >= node_count) {
                return Err(ClusterError::ShapeMismatch {
                    rows: node_count,
                    cols: out_of_range + 1,
                    expected: node_count,
                });
            }
            list.retain(|&n| n != node);
            list.sort_unstable();
            list.dedup();
        }

        Ok(Self::from_sorted_lists(lists))
    }

    /// Pack lists that already satisfy the ordering invariant
    pub(crate) fn from_sorted_lists(lists: Vec<Vec<usize>>) -> Self {
        let node_count = lists.len();
        let edge_count: usize = lists.iter().map(Vec::len).sum();

        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        let mut neighbors = Vec::with_capacity(edge_count);

        for list in lists {
            neighbors.extend_from_slice(&list);
            offsets.push(neighbors.len());
        }

        Self {
            node_count,
            offsets,
            neighbors,
        }
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Neighbors of `node` in ascending order
    pub fn neighbors_of(&self, node: usize) -> &[usize] {
        let start = self.offsets[node];
        let end = self.offsets[node + 1];
        &self.neighbors[start..end]
    }

    /// Number of neighbors of `node`
    pub fn degree(&self, node: usize) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    /// Degree of every node, indexed by node
    pub fn degrees(&self) -> Vec<usize> {
        self.offsets.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Check if `dst` is in the neighbor list of `src`
    pub fn has_edge(&self, src: usize, dst: usize) -> bool {
        self.neighbors_of(src).binary_search(&dst).is_ok()
    }

    /// Total number of stored (directed) neighbor entries
    pub fn entry_count(&self) -> usize {
        self.neighbors.len()
    }
}
