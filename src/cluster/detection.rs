//! Cluster detection algorithms

use crate::cluster::{ClusterEngine, RawAssignment};
use crate::graph::NeighborLists;
use std::collections::{HashMap, VecDeque};

const UNASSIGNED: usize = usize::MAX;

/// Union-Find structure used by [`UnionFindComponents`]
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<usize>,

    /// Size of the set rooted at each node
    size: Vec<usize>,
}

impl DisjointSets {
    /// Create `n` singleton sets
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    /// Find the root of the set containing `x`, halving the path on the way
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Union the sets containing `x` and `y`
    pub fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        // Union by size: attach smaller tree under root of larger tree
        let (big, small) = if self.size[root_x] >= self.size[root_y] {
            (root_x, root_y)
        } else {
            (root_y, root_x)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
    }

    /// Size of the set containing `x`
    pub fn size(&mut self, x: usize) -> usize {
        let root = self.find(x);
        self.size[root]
    }
}

/// Plain connected components by breadth-first traversal.
///
/// Nodes are scanned in index order; every unassigned node opens a new
/// label and the traversal labels everything reachable from it. Edge
/// weights play no role beyond the builder's threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectedComponents;

impl ClusterEngine for ConnectedComponents {
    fn name(&self) -> &'static str {
        "connected-components"
    }

    fn perform_clustering(&self, neighbors: &NeighborLists) -> RawAssignment {
        let node_count = neighbors.node_count();
        let mut labels = vec![UNASSIGNED; node_count];
        let mut queue = VecDeque::new();
        let mut next_label = 0;

        for start in 0..node_count {
            if labels[start] != UNASSIGNED {
                continue;
            }
            labels[start] = next_label;
            queue.push_back(start);

            while let Some(node) = queue.pop_front() {
                for &next in neighbors.neighbors_of(node) {
                    if labels[next] == UNASSIGNED {
                        labels[next] = next_label;
                        queue.push_back(next);
                    }
                }
            }
            next_label += 1;
        }

        log::debug!("Connected components found {} clusters", next_label);
        labels
    }
}

/// Connected components via disjoint-set union.
///
/// Yields the same partition as [`ConnectedComponents`]; labels are the
/// order in which each set's first member appears in the index scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnionFindComponents;

impl ClusterEngine for UnionFindComponents {
    fn name(&self) -> &'static str {
        "union-find"
    }

    fn perform_clustering(&self, neighbors: &NeighborLists) -> RawAssignment {
        let node_count = neighbors.node_count();
        let mut sets = DisjointSets::new(node_count);

        for node in 0..node_count {
            for &next in neighbors.neighbors_of(node) {
                sets.union(node, next);
            }
        }

        let mut label_of_root: HashMap<usize, usize> = HashMap::new();
        let labels: Vec<usize> = (0..node_count)
            .map(|node| {
                let root = sets.find(node);
                let next_label = label_of_root.len();
                *label_of_root.entry(root).or_insert(next_label)
            })
            .collect();

        log::debug!("Union-find found {} clusters", label_of_root.len());
        labels
    }
}

/// Density-based clustering with a minimum neighbor count.
///
/// A node with at least `min_neighbors` neighbors is a core node. Core
/// nodes linked by an edge share a cluster. A non-core node joins the
/// cluster of its lowest-indexed core neighbor, or stays a singleton if it
/// has none. With `min_neighbors == 0` every node is core and the result
/// equals [`ConnectedComponents`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DensityThreshold {
    pub min_neighbors: usize,
}

impl DensityThreshold {
    pub fn new(min_neighbors: usize) -> Self {
        Self { min_neighbors }
    }
}

impl ClusterEngine for DensityThreshold {
    fn name(&self) -> &'static str {
        "density-threshold"
    }

    fn perform_clustering(&self, neighbors: &NeighborLists) -> RawAssignment {
        let node_count = neighbors.node_count();
        let is_core: Vec<bool> = (0..node_count)
            .map(|node| neighbors.degree(node) >= self.min_neighbors)
            .collect();

        let mut labels = vec![UNASSIGNED; node_count];
        let mut queue = VecDeque::new();
        let mut next_label = 0;

        // Grow clusters over core-core edges only
        for start in (0..node_count).filter(|&n| is_core[n]) {
            if labels[start] != UNASSIGNED {
                continue;
            }
            labels[start] = next_label;
            queue.push_back(start);

            while let Some(node) = queue.pop_front() {
                for &next in neighbors.neighbors_of(node) {
                    if is_core[next] && labels[next] == UNASSIGNED {
                        labels[next] = next_label;
                        queue.push_back(next);
                    }
                }
            }
            next_label += 1;
        }

        let core_clusters = next_label;

        // Attach border nodes; leftovers become singletons
        for node in (0..node_count).filter(|&n| !is_core[n]) {
            let anchor = neighbors
                .neighbors_of(node)
                .iter()
                .find(|&&next| is_core[next]);
            labels[node] = match anchor {
                Some(&core) => labels[core],
                None => {
                    next_label += 1;
                    next_label - 1
                }
            };
        }

        log::debug!(
            "Density threshold (min_neighbors={}) found {} core clusters and {} singletons",
            self.min_neighbors,
            core_clusters,
            next_label - core_clusters
        );
        labels
    }
}
