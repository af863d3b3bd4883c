//! JSON trajectory of adjacency matrices

use crate::graph::{AdjacencyView, DenseAdjacency, SparseAdjacency};
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;

/// Sparse frame as written on disk
#[derive(Debug, Clone, Deserialize)]
pub struct SparseFrame {
    pub size: usize,
    pub entries: Vec<(usize, usize, f64)>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
enum FrameInput {
    Dense(Vec<Vec<f64>>),
    Sparse(SparseFrame),
}

#[derive(Debug, Deserialize)]
struct Trajectory {
    frames: Vec<FrameInput>,
}

/// One adjacency matrix of a trajectory
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Dense(DenseAdjacency),
    Sparse(SparseAdjacency),
}

impl AdjacencyView for Frame {
    fn shape(&self) -> (usize, usize) {
        match self {
            Frame::Dense(dense) => dense.shape(),
            Frame::Sparse(sparse) => sparse.shape(),
        }
    }

    fn for_each_in_row<F: FnMut(usize, f64)>(&self, row: usize, visit: F) {
        match self {
            Frame::Dense(dense) => dense.for_each_in_row(row, visit),
            Frame::Sparse(sparse) => sparse.for_each_in_row(row, visit),
        }
    }
}

/// Parse a trajectory from JSON text
pub fn parse_frames(text: &str) -> Result<Vec<Frame>> {
    let trajectory: Trajectory = serde_json::from_str(text)?;

    trajectory
        .frames
        .into_iter()
        .enumerate()
        .map(|(index, input)| {
            let frame = match input {
                FrameInput::Dense(rows) => DenseAdjacency::from_rows(rows).map(Frame::Dense),
                FrameInput::Sparse(sparse) => {
                    SparseAdjacency::from_triplets(sparse.size, sparse.size, &sparse.entries)
                        .map(Frame::Sparse)
                }
            };
            frame.map_err(|e| anyhow!("frame {}: {}", index, e))
        })
        .collect()
}

/// Load a JSON trajectory of adjacency matrices
pub fn load_frames<P: AsRef<Path>>(path: P) -> Result<Vec<Frame>> {
    let path = path.as_ref();
    log::info!("Reading adjacency frames: {}", path.display());

    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }

    let text = std::fs::read_to_string(path)?;
    let frames = parse_frames(&text)?;

    log::info!("Loaded {} frames", frames.len());
    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dense_and_sparse_frames() {
        let frames = parse_frames(
            r#"{
                "frames": [
                    {"dense": [[0, 1], [1, 0]]},
                    {"sparse": {"size": 3, "entries": [[0, 2, 0.5], [2, 0, 0.5]]}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].shape(), (2, 2));
        assert!(matches!(frames[1], Frame::Sparse(_)));

        let mut row = Vec::new();
        frames[1].for_each_in_row(2, |col, weight| row.push((col, weight)));
        assert_eq!(row, vec![(0, 0.5)]);
    }

    #[test]
    fn ragged_dense_frame_names_its_index() {
        let err = parse_frames(r#"{"frames": [{"dense": [[0]]}, {"dense": [[0, 1], [1]]}]}"#)
            .unwrap_err();
        assert!(err.to_string().starts_with("frame 1:"));
    }

    #[test]
    fn huge_sparse_index_is_an_error() {
        let err = parse_frames(
            r#"{"frames": [{"sparse": {"size": 2, "entries": [[18446744073709551615, 0, 1.0]]}}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("frame 0:"));
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(load_frames("/nonexistent/frames.json").is_err());
    }
}
