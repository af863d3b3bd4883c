//! Canonically ordered clustering results

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;

/// Identifier of a cluster; ids run contiguously from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClusterId(NonZeroUsize);

impl ClusterId {
    /// Create an id, returning `None` for zero
    pub fn new(id: usize) -> Option<Self> {
        NonZeroUsize::new(id).map(Self)
    }

    /// Numeric value of the id
    pub fn get(self) -> usize {
        self.0.get()
    }

    fn from_rank(rank: usize) -> Self {
        Self(NonZeroUsize::MIN.saturating_add(rank))
    }

    fn rank(self) -> usize {
        self.0.get() - 1
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rule used to rank clusters into canonical ids
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Descending size, ties by ascending smallest member
    #[default]
    LargestFirst,
    /// Ascending smallest member only
    LowestMemberFirst,
}

/// One row of the size table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClusterSize {
    pub cluster: ClusterId,
    pub size: usize,
}

/// Immutable outcome of one clustering call.
///
/// Cluster ids are already canonical: id `k` is the `k`-th cluster under
/// the configured [`TieBreak`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterResult {
    which_cluster: Vec<ClusterId>,
    cluster_sizes: Vec<ClusterSize>,
    #[serde(skip)]
    members: Vec<Vec<usize>>,
}

impl ClusterResult {
    /// Canonicalize a raw labelling.
    ///
    /// `raw[i]` is an arbitrary label for node `i`; nodes sharing a label
    /// form one cluster. Label values and their order carry no meaning.
    pub fn from_assignment(raw: &[usize], tie_break: TieBreak) -> Self {
        // Members are pushed in index order, so each group is ascending and
        // its first element is the smallest member.
        let mut group_of_label: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for (node, &label) in raw.iter().enumerate() {
            let group = *group_of_label.entry(label).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(node);
        }

        match tie_break {
            TieBreak::LargestFirst => groups.sort_by_key(|g| (Reverse(g.len()), g[0])),
            TieBreak::LowestMemberFirst => groups.sort_by_key(|g| g[0]),
        }

        let placeholder = ClusterId::from_rank(0);
        let mut which_cluster = vec![placeholder; raw.len()];
        let mut cluster_sizes = Vec::with_capacity(groups.len());

        for (rank, members) in groups.iter().enumerate() {
            let cluster = ClusterId::from_rank(rank);
            for &node in members {
                which_cluster[node] = cluster;
            }
            cluster_sizes.push(ClusterSize {
                cluster,
                size: members.len(),
            });
        }

        Self {
            which_cluster,
            cluster_sizes,
            members: groups,
        }
    }

    /// Number of nodes that were clustered
    pub fn node_count(&self) -> usize {
        self.which_cluster.len()
    }

    /// Number of clusters
    pub fn number_of_clusters(&self) -> usize {
        self.cluster_sizes.len()
    }

    /// Cluster holding `node`, or `None` if the node is out of range
    pub fn cluster_of(&self, node: usize) -> Option<ClusterId> {
        self.which_cluster.get(node).copied()
    }

    /// Size of cluster `id`
    pub fn size_of(&self, id: ClusterId) -> Option<usize> {
        self.cluster_sizes.get(id.rank()).map(|entry| entry.size)
    }

    /// Members of cluster `id` in ascending order
    pub fn members_of(&self, id: ClusterId) -> Option<&[usize]> {
        self.members.get(id.rank()).map(Vec::as_slice)
    }

    /// Size table in canonical order
    pub fn sizes(&self) -> impl Iterator<Item = ClusterSize> + '_ {
        self.cluster_sizes.iter().copied()
    }

    /// Cluster id of every node, indexed by node
    pub fn assignment(&self) -> &[ClusterId] {
        &self.which_cluster
    }

    /// All cluster ids in canonical order
    pub fn cluster_ids(&self) -> impl Iterator<Item = ClusterId> + '_ {
        self.cluster_sizes.iter().map(|entry| entry.cluster)
    }
}
