//! Adjacency matrix access and neighbor list construction

pub mod adjacency;
pub mod builder;
pub mod neighbors;

pub use adjacency::{AdjacencyView, DenseAdjacency, SparseAdjacency};
pub use builder::{NeighborListBuilder, PARALLEL_ROW_THRESHOLD};
pub use neighbors::NeighborLists;
