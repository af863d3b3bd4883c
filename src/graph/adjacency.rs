//! Read-only adjacency matrix backends

use crate::error::ClusterError;
use ndarray::Array2;

/// Read-only access to an N×N matrix of non-negative edge weights.
///
/// Implementations only need to report their shape and visit the stored
/// entries of a row in ascending column order. Dense backends visit every
/// column, sparse backends only the stored ones; an unvisited entry is
/// treated as weight zero.
pub trait AdjacencyView: Sync {
    /// Matrix shape as `(rows, cols)`
    fn shape(&self) -> (usize, usize);

    /// Visit `(col, weight)` for each stored entry of `row`
    fn for_each_in_row<F: FnMut(usize, f64)>(&self, row: usize, visit: F);
}

/// Dense weight matrix backed by an `ndarray` array
#[derive(Debug, Clone, PartialEq)]
pub struct DenseAdjacency {
    weights: Array2<f64>,
}

impl DenseAdjacency {
    /// Wrap an existing array. No shape or weight checks happen here;
    /// they are the neighbor list builder's job.
    pub fn new(weights: Array2<f64>) -> Self {
        Self { weights }
    }

    /// All-zero N×N matrix
    pub fn zeros(node_count: usize) -> Self {
        Self {
            weights: Array2::zeros((node_count, node_count)),
        }
    }

    /// Build from row vectors, rejecting ragged input
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ClusterError> {
        let row_count = rows.len();
        let col_count = rows.first().map_or(0, Vec::len);

        if let Some(ragged) = rows.iter().find(|row| row.len() != col_count) {
            return Err(ClusterError::ShapeMismatch {
                rows: row_count,
                cols: ragged.len(),
                expected: col_count,
            });
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let weights = Array2::from_shape_vec((row_count, col_count), flat).map_err(|_| {
            ClusterError::ShapeMismatch {
                rows: row_count,
                cols: col_count,
                expected: row_count,
            }
        })?;

        Ok(Self { weights })
    }

    /// Set both `(i, j)` and `(j, i)` to `weight`
    pub fn connect(&mut self, i: usize, j: usize, weight: f64) {
        self.weights[[i, j]] = weight;
        self.weights[[j, i]] = weight;
    }

    /// Underlying array
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }
}

impl AdjacencyView for DenseAdjacency {
    fn shape(&self) -> (usize, usize) {
        self.weights.dim()
    }

    fn for_each_in_row<F: FnMut(usize, f64)>(&self, row: usize, mut visit: F) {
        for (col, &weight) in self.weights.row(row).iter().enumerate() {
            visit(col, weight);
        }
    }
}

/// Compressed-row sparse weight matrix
///
/// `offsets[i]..offsets[i + 1]` is the range of `columns` and `weights`
/// holding row `i`, in ascending column order.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseAdjacency {
    rows: usize,
    cols: usize,
    offsets: Vec<usize>,
    columns: Vec<usize>,
    weights: Vec<f64>,
}

impl SparseAdjacency {
    /// Build from `(row, col, weight)` triplets.
    ///
    /// Duplicate coordinates are summed, saturating at `f64::MAX`. Every
    /// triplet must lie inside the declared shape and carry a finite,
    /// non-negative weight.
    pub fn from_triplets(
        rows: usize,
        cols: usize,
        entries: &[(usize, usize, f64)],
    ) -> Result<Self, ClusterError> {
        for &(row, col, weight) in entries {
            if row >= rows || col >= cols {
                return Err(ClusterError::ShapeMismatch {
                    rows: rows.max(row.saturating_add(1)),
                    cols: cols.max(col.saturating_add(1)),
                    expected: rows,
                });
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(ClusterError::InvalidWeight { row, col, weight });
            }
        }

        let mut sorted = entries.to_vec();
        sorted.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let mut row_counts = vec![0usize; rows];
        let mut columns = Vec::with_capacity(sorted.len());
        let mut weights: Vec<f64> = Vec::with_capacity(sorted.len());
        let mut last: Option<(usize, usize)> = None;

        for (row, col, weight) in sorted {
            if last == Some((row, col)) {
                if let Some(stored) = weights.last_mut() {
                    *stored = (*stored + weight).min(f64::MAX);
                }
                continue;
            }
            row_counts[row] += 1;
            columns.push(col);
            weights.push(weight);
            last = Some((row, col));
        }

        let mut offsets = Vec::with_capacity(rows + 1);
        offsets.push(0);
        let mut offset = 0;
        for count in row_counts {
            offset += count;
            offsets.push(offset);
        }

        Ok(Self {
            rows,
            cols,
            offsets,
            columns,
            weights,
        })
    }

    /// Number of stored entries
    pub fn stored_entries(&self) -> usize {
        self.columns.len()
    }
}

impl AdjacencyView for SparseAdjacency {
    fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn for_each_in_row<F: FnMut(usize, f64)>(&self, row: usize, mut visit: F) {
        let start = self.offsets[row];
        let end = self.offsets[row + 1];
        for (&col, &weight) in self.columns[start..end].iter().zip(&self.weights[start..end]) {
            visit(col, weight);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_entries<A: AdjacencyView>(matrix: &A, row: usize) -> Vec<(usize, f64)> {
        let mut out = Vec::new();
        matrix.for_each_in_row(row, |col, weight| out.push((col, weight)));
        out
    }

    #[test]
    fn from_rows_keeps_shape_and_order() {
        let dense = DenseAdjacency::from_rows(vec![
            vec![0.0, 0.5, 0.0, 0.0],
            vec![0.5, 0.0, 0.0, 0.0],
            vec![0.0, 0.0, 0.0, 1.0],
        ])
        .unwrap();

        assert_eq!(dense.shape(), (3, 4));
        assert_eq!(
            row_entries(&dense, 2),
            vec![(0, 0.0), (1, 0.0), (2, 0.0), (3, 1.0)]
        );
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let err = DenseAdjacency::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert_eq!(
            err,
            ClusterError::ShapeMismatch {
                rows: 2,
                cols: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn from_rows_accepts_empty_matrix() {
        let dense = DenseAdjacency::from_rows(Vec::new()).unwrap();
        assert_eq!(dense.shape(), (0, 0));
    }

    #[test]
    fn connect_is_symmetric() {
        let mut dense = DenseAdjacency::zeros(3);
        dense.connect(0, 2, 0.75);
        assert_eq!(dense.weights()[[0, 2]], 0.75);
        assert_eq!(dense.weights()[[2, 0]], 0.75);
    }

    #[test]
    fn triplets_are_sorted_and_duplicates_summed() {
        let sparse = SparseAdjacency::from_triplets(
            3,
            3,
            &[(1, 2, 0.25), (0, 1, 1.0), (1, 0, 1.0), (1, 2, 0.5)],
        )
        .unwrap();

        assert_eq!(sparse.stored_entries(), 3);
        assert_eq!(row_entries(&sparse, 0), vec![(1, 1.0)]);
        assert_eq!(row_entries(&sparse, 1), vec![(0, 1.0), (2, 0.75)]);
        assert!(row_entries(&sparse, 2).is_empty());
    }

    #[test]
    fn triplet_outside_shape_is_rejected() {
        let err = SparseAdjacency::from_triplets(2, 2, &[(0, 3, 1.0)]).unwrap_err();
        assert_eq!(
            err,
            ClusterError::ShapeMismatch {
                rows: 2,
                cols: 4,
                expected: 2
            }
        );
    }

    #[test]
    fn huge_triplet_index_is_a_shape_error() {
        let err = SparseAdjacency::from_triplets(2, 2, &[(usize::MAX, 0, 1.0)]).unwrap_err();
        assert_eq!(
            err,
            ClusterError::ShapeMismatch {
                rows: usize::MAX,
                cols: 2,
                expected: 2
            }
        );
    }

    #[test]
    fn summed_duplicates_stay_finite() {
        let sparse =
            SparseAdjacency::from_triplets(2, 2, &[(0, 1, 1e308), (0, 1, 1e308)]).unwrap();
        assert_eq!(row_entries(&sparse, 0), vec![(1, f64::MAX)]);
    }

    #[test]
    fn negative_triplet_is_rejected() {
        let err = SparseAdjacency::from_triplets(2, 2, &[(1, 0, -0.1)]).unwrap_err();
        assert_eq!(
            err,
            ClusterError::InvalidWeight {
                row: 1,
                col: 0,
                weight: -0.1
            }
        );
    }
}
