//! Clustering of nodes connected through an adjacency matrix

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod storage;

pub use anyhow::{anyhow, Result};
pub use cluster::{ClusterEngine, ClusterId, ClusterResult, ClusterStrategy, ClusteringAction, TieBreak};
pub use config::ClusteringConfig;
pub use error::ClusterError;
pub use graph::{AdjacencyView, DenseAdjacency, NeighborListBuilder, NeighborLists, SparseAdjacency};
