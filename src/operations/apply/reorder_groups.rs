use tracing::debug;

use crate::error::Result;
use crate::mesh::SkinnedMesh;
use crate::operations::reorder::{ReconcileOrder, ReorderResult};

/// Rebuilds a mesh's vertex-group list in a desired name order.
///
/// Plans the rebuild with [`ReconcileOrder`] bounded by the mesh's vertex
/// count, then replaces the group list with the planned one. Applying the
/// same order twice leaves the mesh as after the first application.
pub struct ReorderGroups<'a, S> {
    desired: &'a [S],
}

impl<'a, S: AsRef<str>> ReorderGroups<'a, S> {
    #[must_use]
    pub fn new(desired: &'a [S]) -> Self {
        Self { desired }
    }

    /// Executes the rebuild on `mesh`, returning the applied plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the mesh rejects a planned group.
    pub fn execute(&self, mesh: &mut SkinnedMesh) -> Result<ReorderResult> {
        let snapshot = mesh.group_weights();
        let plan = ReconcileOrder::new(&snapshot, self.desired)
            .with_vertex_count(mesh.vertex_count())
            .execute();

        mesh.clear_groups();
        for entry in &plan.entries {
            let id = mesh.add_group(entry.name.as_str())?;
            for (vertex, weight) in entry.weights.iter() {
                mesh.assign(id, vertex, weight)?;
            }
        }

        debug!(groups = plan.entries.len(), "vertex group list rebuilt");
        Ok(plan)
    }
}
