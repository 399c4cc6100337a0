use tracing::debug;

use crate::math::{Point3, Vector3};
use crate::mesh::GroupWeights;

/// Weighted mean world position of one vertex group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCentroid {
    /// Name of the group.
    pub name: String,
    /// Weighted average of the group's vertex positions.
    pub position: Point3,
}

/// Centroids of an object's vertex groups, in the object's group order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupCentroids(Vec<GroupCentroid>);

impl GroupCentroids {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a centroid. Callers keep names unique.
    pub fn push(&mut self, name: impl Into<String>, position: Point3) {
        self.0.push(GroupCentroid {
            name: name.into(),
            position,
        });
    }

    /// Returns the centroid of the group called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Point3> {
        self.0.iter().find(|c| c.name == name).map(|c| &c.position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GroupCentroid> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[GroupCentroid] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Point3)> for GroupCentroids {
    fn from_iter<I: IntoIterator<Item = (S, Point3)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (name, position) in iter {
            out.push(name, position);
        }
        out
    }
}

/// Computes one weighted-average position per vertex group.
///
/// For each group, `Σ(position · weight) / Σ weight` over the vertices that
/// carry a positive weight in it; zero, negative and NaN weights are ignored.
/// Groups whose total weight is zero, or whose centroid is not finite, have
/// no centroid and are left out of the result. Weight entries referring to a
/// vertex outside `positions` are ignored.
pub struct ExtractCentroids<'a> {
    positions: &'a [Point3],
    groups: &'a GroupWeights,
}

impl<'a> ExtractCentroids<'a> {
    /// Creates a new `ExtractCentroids` operation over world-space
    /// `positions`.
    #[must_use]
    pub fn new(positions: &'a [Point3], groups: &'a GroupWeights) -> Self {
        Self { positions, groups }
    }

    /// Executes the extraction.
    #[must_use]
    pub fn execute(&self) -> GroupCentroids {
        let mut centroids = GroupCentroids::new();

        for (name, weights) in self.groups.iter() {
            let mut weighted_sum = Vector3::zeros();
            let mut total_weight = 0.0;

            for (vertex, weight) in weights.iter() {
                if weight.is_nan() || weight <= 0.0 {
                    continue;
                }
                let Some(position) = self.positions.get(vertex) else {
                    debug!(group = name, vertex, "weight refers to a missing vertex, ignored");
                    continue;
                };
                weighted_sum += position.coords * weight;
                total_weight += weight;
            }

            if total_weight <= 0.0 {
                continue;
            }
            let centroid = Point3::from(weighted_sum / total_weight);
            if centroid.iter().all(|c| c.is_finite()) {
                centroids.push(name, centroid);
            } else {
                debug!(group = name, "centroid is not finite, group left out");
            }
        }

        debug!(
            groups = self.groups.len(),
            centroids = centroids.len(),
            "extracted group centroids"
        );
        centroids
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mesh::VertexWeights;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn weights(pairs: &[(usize, f64)]) -> VertexWeights {
        pairs.iter().copied().collect()
    }

    #[test]
    fn weighted_mean_of_two_vertices() {
        let positions = [p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0)];
        let groups: GroupWeights = [("g", weights(&[(0, 1.0), (1, 0.25)]))]
            .into_iter()
            .collect();

        let centroids = ExtractCentroids::new(&positions, &groups).execute();
        let c = centroids.get("g").unwrap();
        // (0*1 + 4*0.25) / 1.25 = 0.8
        assert_relative_eq!(c.x, 0.8);
        assert_relative_eq!(c.y, 0.0);
    }

    #[test]
    fn zero_weight_groups_have_no_centroid() {
        let positions = [p(1.0, 1.0, 1.0)];
        let groups: GroupWeights = [
            ("empty", VertexWeights::new()),
            ("zeros", weights(&[(0, 0.0)])),
            ("ok", weights(&[(0, 0.5)])),
        ]
        .into_iter()
        .collect();

        let centroids = ExtractCentroids::new(&positions, &groups).execute();
        assert_eq!(centroids.len(), 1);
        assert!(centroids.get("empty").is_none());
        assert!(centroids.get("zeros").is_none());
        assert_eq!(centroids.get("ok"), Some(&p(1.0, 1.0, 1.0)));
    }

    #[test]
    fn output_follows_group_order() {
        let positions = [p(0.0, 0.0, 0.0), p(0.0, 1.0, 0.0)];
        let groups: GroupWeights = [
            ("spine", weights(&[(1, 1.0)])),
            ("hip", weights(&[(0, 1.0)])),
        ]
        .into_iter()
        .collect();

        let centroids = ExtractCentroids::new(&positions, &groups).execute();
        let names: Vec<_> = centroids.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["spine", "hip"]);
    }

    #[test]
    fn missing_vertices_are_ignored() {
        let positions = [p(2.0, 0.0, 0.0)];
        let groups: GroupWeights = [("g", weights(&[(0, 1.0), (7, 1.0)]))]
            .into_iter()
            .collect();

        let centroids = ExtractCentroids::new(&positions, &groups).execute();
        assert_eq!(centroids.get("g"), Some(&p(2.0, 0.0, 0.0)));

        let only_missing: GroupWeights = [("g", weights(&[(9, 1.0)]))].into_iter().collect();
        assert!(ExtractCentroids::new(&positions, &only_missing)
            .execute()
            .is_empty());
    }

    #[test]
    fn only_positive_weights_contribute() {
        let positions = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(5.0, 0.0, 0.0)];
        let groups: GroupWeights = [
            ("g", weights(&[(0, 1.0), (1, -0.99), (2, f64::NAN)])),
            ("negative", weights(&[(1, -1.0)])),
        ]
        .into_iter()
        .collect();

        let centroids = ExtractCentroids::new(&positions, &groups).execute();
        assert_eq!(centroids.get("g"), Some(&p(0.0, 0.0, 0.0)));
        assert!(centroids.get("negative").is_none());
    }

    #[test]
    fn non_finite_centroids_are_left_out() {
        let positions = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0)];
        let groups: GroupWeights = [
            ("infinite", weights(&[(0, f64::INFINITY)])),
            ("ok", weights(&[(1, 1.0)])),
        ]
        .into_iter()
        .collect();

        let centroids = ExtractCentroids::new(&positions, &groups).execute();
        assert!(centroids.get("infinite").is_none());
        assert_eq!(centroids.get("ok"), Some(&p(1.0, 0.0, 0.0)));
    }

    #[test]
    fn many_small_weights_do_not_drift() {
        let n: usize = 10_000;
        let positions: Vec<_> = (0..n).map(|_| p(3.0, -1.5, 0.25)).collect();
        let spread: VertexWeights = (0..n).map(|i| (i, 1e-4)).collect();
        let groups: GroupWeights = [("g", spread)].into_iter().collect();

        let centroids = ExtractCentroids::new(&positions, &groups).execute();
        let c = centroids.get("g").unwrap();
        assert_relative_eq!(c.x, 3.0, epsilon = 1e-9);
        assert_relative_eq!(c.y, -1.5, epsilon = 1e-9);
        assert_relative_eq!(c.z, 0.25, epsilon = 1e-9);
    }
}
