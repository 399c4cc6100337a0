use nalgebra::DMatrix;

use crate::math::similarity::distance_to_similarity;
use crate::operations::centroid::GroupCentroid;

/// Pairwise centroid distances between target groups (rows) and source
/// groups (columns).
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    distances: DMatrix<f64>,
}

impl SimilarityMatrix {
    /// Builds the full `|targets| × |sources|` distance matrix.
    #[must_use]
    pub fn new(sources: &[GroupCentroid], targets: &[GroupCentroid]) -> Self {
        let distances = DMatrix::from_fn(targets.len(), sources.len(), |i, j| {
            nalgebra::distance(&targets[i].position, &sources[j].position)
        });
        Self { distances }
    }

    /// Number of target groups.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.distances.nrows()
    }

    /// Number of source groups.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.distances.ncols()
    }

    /// Euclidean distance between target `row` and source `col`.
    #[must_use]
    pub fn distance(&self, row: usize, col: usize) -> f64 {
        self.distances[(row, col)]
    }

    /// Similarity `1 / (1 + d)` between target `row` and source `col`.
    #[must_use]
    pub fn similarity(&self, row: usize, col: usize) -> f64 {
        distance_to_similarity(self.distance(row, col))
    }
}
