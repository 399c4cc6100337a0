use tracing::info;

use crate::error::Result;
use crate::mesh::SkinnedMesh;

/// Deletes the vertex groups that carry no positive weight.
pub struct RemoveEmptyGroups;

impl RemoveEmptyGroups {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the removal, returning the removed names in group order.
    ///
    /// # Errors
    ///
    /// Returns an error if a group disappears while being removed.
    pub fn execute(&self, mesh: &mut SkinnedMesh) -> Result<Vec<String>> {
        let empty: Vec<_> = mesh
            .group_ids()
            .iter()
            .copied()
            .filter(|&id| {
                mesh.group(id)
                    .is_ok_and(|g| !g.weights().has_positive_weight())
            })
            .collect();

        let mut removed = Vec::with_capacity(empty.len());
        for id in empty {
            removed.push(mesh.remove_group(id)?.name().to_owned());
        }

        info!(
            removed = removed.len(),
            remaining = mesh.group_ids().len(),
            "empty vertex groups removed"
        );
        Ok(removed)
    }
}

impl Default for RemoveEmptyGroups {
    fn default() -> Self {
        Self::new()
    }
}
