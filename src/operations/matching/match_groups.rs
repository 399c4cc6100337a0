use std::fmt;

use tracing::{debug, info};

use super::similarity_matrix::SimilarityMatrix;
use super::DEFAULT_SIMILARITY_THRESHOLD;
use crate::operations::centroid::GroupCentroids;

/// Parameters controlling group matching.
#[derive(Debug, Clone, Copy)]
pub struct MatchParams {
    /// Minimum similarity, in `(0, 1]`, for a pair to match.
    pub threshold: f64,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

/// The outcome for one target group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMatch {
    /// Original name of the target group.
    pub target: String,
    /// Source group whose name the target should take, if any.
    pub source: Option<String>,
    /// Similarity of the chosen pair; `None` when unmatched.
    pub similarity: Option<f64>,
}

/// Rename plan produced by [`MatchGroups`].
///
/// Holds one entry per target group, in target order. Each source name
/// appears at most once.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Per-target outcomes.
    pub matches: Vec<GroupMatch>,
    /// Number of source groups that had a centroid.
    pub source_count: usize,
    /// Number of target groups that had a centroid.
    pub target_count: usize,
    /// Threshold the plan was computed with.
    pub threshold: f64,
}

impl MatchResult {
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matches.iter().filter(|m| m.source.is_some()).count()
    }

    #[must_use]
    pub fn unmatched_count(&self) -> usize {
        self.matches.len() - self.matched_count()
    }

    /// `(target, source)` name pairs for every matched target group.
    pub fn rename_plan(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.matches
            .iter()
            .filter_map(|m| m.source.as_deref().map(|s| (m.target.as_str(), s)))
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "similarity threshold: {:.3}", self.threshold)?;
        writeln!(f, "{:<30} {:<30} {:<12}", "target", "renamed to", "similarity")?;
        writeln!(f, "{}", "-".repeat(74))?;
        for m in &self.matches {
            match (&m.source, m.similarity) {
                (Some(source), Some(similarity)) => {
                    writeln!(f, "{:<30} {:<30} {:<12.3}", m.target, source, similarity)?;
                }
                _ => writeln!(f, "{:<30} {:<30} {:<12}", m.target, "(kept)", "no match")?,
            }
        }
        writeln!(f, "{}", "-".repeat(74))?;
        writeln!(f, "source groups with weight: {}", self.source_count)?;
        writeln!(f, "target groups with weight: {}", self.target_count)?;
        writeln!(f, "matched: {}", self.matched_count())?;
        write!(f, "unmatched: {}", self.unmatched_count())
    }
}

/// Matches target vertex groups to source vertex groups by centroid
/// proximity.
///
/// Every target group, in its given order, claims the not-yet-claimed source
/// group with the highest similarity at or above the threshold. When several
/// sources tie, the first one in source order wins. Claims are never
/// revisited, so the assignment is greedy rather than globally optimal.
///
/// The threshold must lie in `(0, 1]`.
pub struct MatchGroups<'a> {
    source: &'a GroupCentroids,
    target: &'a GroupCentroids,
    params: MatchParams,
}

impl<'a> MatchGroups<'a> {
    /// Creates a new `MatchGroups` operation with default parameters.
    ///
    /// Names flow from `source` to `target`.
    #[must_use]
    pub fn new(source: &'a GroupCentroids, target: &'a GroupCentroids) -> Self {
        Self {
            source,
            target,
            params: MatchParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: MatchParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.params.threshold = threshold;
        self
    }

    /// Executes the matching, returning the rename plan.
    #[must_use]
    pub fn execute(&self) -> MatchResult {
        let threshold = self.params.threshold;
        debug_assert!(
            threshold > 0.0 && threshold <= 1.0,
            "similarity threshold {threshold} outside (0, 1]"
        );

        let mut result = MatchResult {
            matches: Vec::with_capacity(self.target.len()),
            source_count: self.source.len(),
            target_count: self.target.len(),
            threshold,
        };
        if self.source.is_empty() || self.target.is_empty() {
            return result;
        }

        let matrix = SimilarityMatrix::new(self.source.as_slice(), self.target.as_slice());
        let mut claimed = vec![false; matrix.cols()];

        for (row, target) in self.target.iter().enumerate() {
            let mut best: Option<(usize, f64)> = None;
            for col in (0..matrix.cols()).filter(|&c| !claimed[c]) {
                let similarity = matrix.similarity(row, col);
                if similarity.is_nan() || similarity < threshold {
                    continue;
                }
                if best.is_none_or(|(_, s)| similarity > s) {
                    best = Some((col, similarity));
                }
            }

            let entry = match best {
                Some((col, similarity)) => {
                    claimed[col] = true;
                    let source = &self.source.as_slice()[col].name;
                    debug!(group = %target.name, source = %source, similarity, "group matched");
                    GroupMatch {
                        target: target.name.clone(),
                        source: Some(source.clone()),
                        similarity: Some(similarity),
                    }
                }
                None => GroupMatch {
                    target: target.name.clone(),
                    source: None,
                    similarity: None,
                },
            };
            result.matches.push(entry);
        }

        info!(
            matched = result.matched_count(),
            unmatched = result.unmatched_count(),
            threshold,
            "vertex group matching finished"
        );
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use std::collections::HashSet;

    fn centroids(entries: &[(&str, [f64; 3])]) -> GroupCentroids {
        entries
            .iter()
            .map(|&(n, [x, y, z])| (n, Point3::new(x, y, z)))
            .collect()
    }

    fn skeleton() -> GroupCentroids {
        centroids(&[("Hip", [0.0, 0.0, 0.0]), ("Spine", [0.0, 1.0, 0.0])])
    }

    #[test]
    fn nearby_groups_match() {
        let a = skeleton();
        let b = centroids(&[("pelvis", [0.0, 0.01, 0.0]), ("spine1", [0.0, 1.02, 0.0])]);

        let result = MatchGroups::new(&a, &b).with_threshold(0.9).execute();
        let plan: Vec<_> = result.rename_plan().collect();
        assert_eq!(plan, [("pelvis", "Hip"), ("spine1", "Spine")]);
        assert!(result.matches[0].similarity.unwrap() > 0.99);
        assert_eq!(result.matched_count(), 2);
    }

    #[test]
    fn distant_group_is_not_matched() {
        let a = skeleton();
        let b = centroids(&[("pelvis", [5.0, 5.0, 5.0])]);

        let result = MatchGroups::new(&a, &b).with_threshold(0.9).execute();
        assert_eq!(
            result.matches,
            [GroupMatch {
                target: "pelvis".into(),
                source: None,
                similarity: None,
            }]
        );
        assert!(result.to_string().contains("no match"));
    }

    #[test]
    fn empty_inputs_give_empty_result() {
        let a = skeleton();
        let empty = GroupCentroids::new();
        assert!(MatchGroups::new(&a, &empty).execute().matches.is_empty());
        let result = MatchGroups::new(&empty, &a).execute();
        assert!(result.matches.is_empty());
        assert_eq!(result.matched_count(), 0);
    }

    #[test]
    fn sources_are_claimed_once_in_target_order() {
        // Both targets are closest to "Hip"; the first one claims it and the
        // second falls back to the next best source above the threshold.
        let a = centroids(&[("Hip", [0.0, 0.0, 0.0]), ("Hip2", [0.0, 0.05, 0.0])]);
        let b = centroids(&[("x", [0.0, 0.02, 0.0]), ("y", [0.0, 0.0, 0.0])]);

        let result = MatchGroups::new(&a, &b).with_threshold(0.9).execute();
        let plan: Vec<_> = result.rename_plan().collect();
        assert_eq!(plan, [("x", "Hip"), ("y", "Hip2")]);
    }

    #[test]
    fn greedy_can_leave_a_target_unmatched() {
        let a = centroids(&[("Hip", [0.0, 0.0, 0.0])]);
        let b = centroids(&[("x", [0.0, 0.05, 0.0]), ("y", [0.0, 0.0, 0.0])]);

        let result = MatchGroups::new(&a, &b).with_threshold(0.9).execute();
        assert_eq!(result.matches[0].source.as_deref(), Some("Hip"));
        assert_eq!(result.matches[1].source, None);
    }

    #[test]
    fn ties_go_to_the_first_source() {
        let a = centroids(&[("left", [-1.0, 0.0, 0.0]), ("right", [1.0, 0.0, 0.0])]);
        let b = centroids(&[("mid", [0.0, 0.0, 0.0])]);

        let result = MatchGroups::new(&a, &b).with_threshold(0.5).execute();
        assert_eq!(result.matches[0].source.as_deref(), Some("left"));
    }

    #[test]
    fn threshold_is_inclusive() {
        let a = centroids(&[("a", [0.0, 0.0, 0.0])]);
        let b = centroids(&[("b", [1.0, 0.0, 0.0])]);
        // Similarity is exactly 0.5.
        let result = MatchGroups::new(&a, &b).with_threshold(0.5).execute();
        assert_eq!(result.matched_count(), 1);
    }

    #[test]
    fn rerun_is_identical_and_never_double_claims() {
        let a = centroids(&[
            ("a", [0.0, 0.0, 0.0]),
            ("b", [0.0, 0.02, 0.0]),
            ("c", [0.0, 0.04, 0.0]),
        ]);
        let b = centroids(&[
            ("p", [0.0, 0.01, 0.0]),
            ("q", [0.0, 0.01, 0.0]),
            ("r", [0.0, 0.01, 0.0]),
            ("s", [0.0, 0.01, 0.0]),
        ]);

        let first = MatchGroups::new(&a, &b).with_threshold(0.9).execute();
        let second = MatchGroups::new(&a, &b).with_threshold(0.9).execute();
        assert_eq!(first, second);

        let sources: Vec<_> = first.rename_plan().map(|(_, s)| s).collect();
        let unique: HashSet<_> = sources.iter().collect();
        assert_eq!(sources.len(), unique.len());
        assert_eq!(first.matched_count(), 3);
        assert_eq!(first.matches[3].source, None);
    }

    #[test]
    fn degenerate_source_cannot_claim_a_target() {
        let a = centroids(&[("Broken", [f64::NAN; 3]), ("Hip", [0.0, 0.0, 0.0])]);
        let b = centroids(&[("pelvis", [0.0, 0.0, 0.0])]);

        let result = MatchGroups::new(&a, &b).with_threshold(0.9).execute();
        assert_eq!(result.matches[0].source.as_deref(), Some("Hip"));
        assert_eq!(result.matches[0].similarity, Some(1.0));
    }

    #[test]
    fn default_threshold_is_strict() {
        let a = centroids(&[("a", [0.0, 0.0, 0.0])]);
        let b = centroids(&[("b", [0.1, 0.0, 0.0])]);
        // 1 / 1.1 ≈ 0.909 < 0.94
        assert_eq!(MatchGroups::new(&a, &b).execute().matched_count(), 0);
        let params = MatchParams { threshold: 0.9 };
        assert_eq!(
            MatchGroups::new(&a, &b).with_params(params).execute().matched_count(),
            1
        );
    }
}
