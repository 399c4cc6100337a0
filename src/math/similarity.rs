use super::Point3;

/// Converts a distance into a similarity score in `(0, 1]`.
///
/// `s = 1 / (1 + d)`, so coincident points score exactly `1.0` and the
/// score decreases monotonically with distance.
#[must_use]
pub fn distance_to_similarity(distance: f64) -> f64 {
    1.0 / (1.0 + distance)
}

/// Similarity between two points, see [`distance_to_similarity`].
#[must_use]
pub fn point_similarity(a: &Point3, b: &Point3) -> f64 {
    distance_to_similarity(nalgebra::distance(a, b))
}
