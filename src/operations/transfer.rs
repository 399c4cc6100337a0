use std::fmt;

use tracing::info;

use crate::error::{OperationError, Result};
use crate::mesh::SkinnedMesh;
use crate::operations::apply::{ApplyRenamePlan, ReorderGroups};
use crate::operations::centroid::{ExtractCentroids, GroupCentroids};
use crate::operations::matching::{MatchGroups, MatchParams, MatchResult};
use crate::operations::reorder::ReorderResult;

/// Outcome of a [`TransferGroupNames`] run.
#[derive(Debug, Clone)]
pub struct TransferReport {
    /// The rename plan computed from centroid proximity.
    pub matches: MatchResult,
    /// Number of target groups renamed.
    pub renamed: usize,
    /// The applied reorder plan.
    pub reorder: ReorderResult,
}

impl fmt::Display for TransferReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.matches)?;
        writeln!(f, "renamed: {}", self.renamed)?;
        writeln!(f)?;
        write!(f, "{}", self.reorder)
    }
}

/// Gives a target mesh the vertex-group names and order of a source mesh.
///
/// Runs the full pipeline: world-space centroids for both meshes, greedy
/// matching, renaming the target's groups to the matched source names, and
/// finally rebuilding the target's group list in the source's group order.
/// Names and order always flow from source to target.
pub struct TransferGroupNames<'a> {
    source: &'a SkinnedMesh,
    params: MatchParams,
}

impl<'a> TransferGroupNames<'a> {
    #[must_use]
    pub fn new(source: &'a SkinnedMesh) -> Self {
        Self {
            source,
            params: MatchParams::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: MatchParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the transfer onto `target`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if either mesh has no vertex
    /// group carrying weight; `target` is not modified in that case.
    pub fn execute(&self, target: &mut SkinnedMesh) -> Result<TransferReport> {
        let source_centroids = centroids_of(self.source);
        if source_centroids.is_empty() {
            return Err(OperationError::InvalidInput(
                "source mesh has no vertex group with weights".into(),
            )
            .into());
        }
        let target_centroids = centroids_of(target);
        if target_centroids.is_empty() {
            return Err(OperationError::InvalidInput(
                "target mesh has no vertex group with weights".into(),
            )
            .into());
        }

        let matches = MatchGroups::new(&source_centroids, &target_centroids)
            .with_params(self.params)
            .execute();
        let renamed = ApplyRenamePlan::new(&matches).execute(target)?;
        let order = self.source.group_names();
        let reorder = ReorderGroups::new(&order).execute(target)?;

        info!(
            renamed,
            groups = reorder.entries.len(),
            "vertex group names transferred"
        );
        Ok(TransferReport {
            matches,
            renamed,
            reorder,
        })
    }
}

fn centroids_of(mesh: &SkinnedMesh) -> GroupCentroids {
    let positions = mesh.world_positions();
    let groups = mesh.group_weights();
    ExtractCentroids::new(&positions, &groups).execute()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::SkinmatchError;
    use crate::math::{Matrix4, Point3, Vector3};
    use crate::operations::reorder::ReorderStatus;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// A three-bone chain: one vertex per bone, fully weighted, plus an
    /// optional group without weights.
    fn rig(names: &[&str], positions: Vec<Point3>) -> SkinnedMesh {
        let mut m = SkinnedMesh::new(positions);
        for (i, name) in names.iter().enumerate() {
            let id = m.add_group(*name).unwrap();
            if i < m.vertex_count() {
                m.assign(id, i, 1.0).unwrap();
            }
        }
        m
    }

    fn chain() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 1.5),
            Point3::new(0.0, 0.0, 2.0),
        ]
    }

    #[test]
    fn numbered_groups_take_bone_names_and_order() {
        init_tracing();
        let source = rig(&["Hips", "Spine", "Head", "Eye_L"], chain());
        // Same rig moved by an object transform, with groups listed out of
        // order and numbered instead of named.
        let offset = Vector3::new(0.0, 0.01, 0.0);
        let local: Vec<_> = chain().into_iter().rev().collect();
        let mut target = rig(&["2", "1", "0"], local)
            .with_world(Matrix4::new_translation(&offset));

        let report = TransferGroupNames::new(&source)
            .with_params(MatchParams { threshold: 0.95 })
            .execute(&mut target)
            .unwrap();

        assert_eq!(report.renamed, 3);
        assert_eq!(target.group_names(), ["Hips", "Spine", "Head", "Eye_L"]);
        // "2" sat on the head vertex of the reversed target.
        assert_eq!(
            target.group_by_name("Head").unwrap().weights().get(0),
            Some(1.0)
        );
        assert_eq!(
            report.reorder.entries[3].status,
            ReorderStatus::NewlyCreatedEmpty
        );
        assert!(report.to_string().contains("renamed: 3"));
    }

    #[test]
    fn unmatched_groups_keep_their_names_and_go_last() {
        init_tracing();
        let source = rig(&["Hips", "Spine"], chain()[..2].to_vec());
        let mut target = rig(&["0", "1", "9"], chain());

        let report = TransferGroupNames::new(&source).execute(&mut target).unwrap();
        assert_eq!(report.renamed, 2);
        assert_eq!(report.matches.matches[2].source, None);
        assert_eq!(target.group_names(), ["Hips", "Spine", "9"]);
        assert_eq!(
            report.reorder.entries[2].status,
            ReorderStatus::ExtraRetained
        );
    }

    #[test]
    fn rejects_meshes_without_weights() {
        let source = rig(&["Hips"], chain());
        let mut empty = rig(&["0"], Vec::new());

        let err = TransferGroupNames::new(&source)
            .execute(&mut empty)
            .unwrap_err();
        assert!(matches!(err, SkinmatchError::Operation(OperationError::InvalidInput(_))));
        assert_eq!(empty.group_names(), ["0"]);

        let err = TransferGroupNames::new(&empty).execute(&mut rig(&["x"], chain()));
        assert!(err.is_err());
    }
}
